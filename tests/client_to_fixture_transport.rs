use xmlrpc_wsc::{Client, Error, Request, Response, Transport, Value};

/// Transport that records outgoing documents and replies from a fixture.
struct FixtureTransport {
    reply: &'static str,
    requests: Vec<String>,
}

impl FixtureTransport {
    fn new(reply: &'static str) -> FixtureTransport {
        FixtureTransport {
            reply,
            requests: Vec::new(),
        }
    }
}

impl Transport for FixtureTransport {
    fn send(
        &mut self,
        document: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.requests.push(document.to_owned());
        Ok(self.reply.to_owned())
    }
}

struct FailingTransport;

impl Transport for FailingTransport {
    fn send(&mut self, _: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Err("connection refused".into())
    }
}

const SUM_REPLY: &str = concat!(
    r#"<?xml version="1.0"?>"#,
    "<methodResponse><params><param>",
    "<value><int>3</int></value>",
    "</param></params></methodResponse>",
);

const FAULT_REPLY: &str = concat!(
    r#"<?xml version="1.0"?>"#,
    "<methodResponse><fault><value><struct>",
    "<member><name>faultCode</name><value><int>1</int></value></member>",
    "<member><name>faultString</name><value><string>Error</string></value></member>",
    "</struct></value></fault></methodResponse>",
);

#[test]
fn executes_call_end_to_end() {
    let mut client = Client::new(FixtureTransport::new(SUM_REPLY));
    let exchange = client
        .call("demo.add", vec![Value::Int(1), Value::Int(2)])
        .unwrap();

    assert_eq!(
        Response::Success {
            value: Value::Int(3),
        },
        exchange.response
    );
    assert_eq!(3, exchange.response.as_int().unwrap());

    // both documents are retained for diagnostics, exactly as exchanged
    assert!(exchange
        .request_document
        .contains("<methodName>demo.add</methodName>"));
    assert!(exchange.request_document.contains("<int>1</int>"));
    assert!(exchange.request_document.contains("<int>2</int>"));
    assert_eq!(SUM_REPLY, exchange.response_document);

    let transport = client.into_transport();
    assert_eq!(vec![exchange.request_document], transport.requests);
}

#[test]
fn surfaces_fault_with_code_and_message() {
    let mut client = Client::new(FixtureTransport::new(FAULT_REPLY));
    let exchange = client.execute(&Request::new("demo.fail")).unwrap();

    assert!(exchange.response.is_fault());
    assert_eq!(Some(1), exchange.response.fault_code());
    assert_eq!(Some("Error"), exchange.response.fault_message());
    // the raw fault struct stays inspectable
    assert_eq!(
        "{faultCode: 1, faultString: Error}",
        exchange.response.as_string().unwrap()
    );
}

#[test]
fn propagates_transport_failure_unchanged() {
    let mut client = Client::new(FailingTransport);
    match client.execute(&Request::new("demo.add")) {
        Err(Error::Transport(source)) => {
            assert_eq!("connection refused", source.to_string());
        }
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[test]
fn rejects_malformed_reply_atomically() {
    let mut client = Client::new(FixtureTransport::new(
        "<methodResponse><params><param><value></value></param></params></methodResponse>",
    ));
    let err = client.execute(&Request::new("demo.add")).unwrap_err();
    assert!(err.to_string().contains("need type tag"));
}

#[test]
fn request_can_be_reused_across_calls() {
    let mut client = Client::new(FixtureTransport::new(SUM_REPLY));
    let mut request = Request::new("demo.add");
    request.add_param(1).add_param(2);

    let first = client.execute(&request).unwrap();
    request.remove_param_at(1);
    request.add_param(5);
    let second = client.execute(&request).unwrap();

    assert!(first.request_document.contains("<int>2</int>"));
    assert!(second.request_document.contains("<int>5</int>"));
    assert!(!second.request_document.contains("<int>2</int>"));
}
