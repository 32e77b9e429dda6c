use crate::decoder::decode_response;
use crate::encoder::request_to_xml;
use crate::error::{Error, Result};
use crate::request::Request;
use crate::response::Response;
use crate::value::Value;
use log::{debug, trace};

/// Carries one outgoing document to the remote endpoint and returns the
/// reply document.
///
/// Implementations own every network concern, timeouts included; their
/// failures are surfaced unchanged as [`Error::Transport`].
pub trait Transport {
    fn send(
        &mut self,
        document: &str,
    ) -> std::result::Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Everything produced by one call: both documents exactly as sent and
/// received, for diagnostics, and the decoded response.
#[derive(Clone, Debug)]
pub struct Exchange {
    pub request_document: String,
    pub response_document: String,
    pub response: Response,
}

/// Composes the encoder, a transport, and the decoder into single calls.
///
/// The client keeps no per-call state; each [`Exchange`] owns its documents
/// and result.
pub struct Client<T: Transport> {
    transport: T,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Client<T> {
        Client { transport }
    }

    /// Consumes the client, handing the transport back.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Encodes `request`, sends it, and decodes the reply.
    pub fn execute(&mut self, request: &Request) -> Result<Exchange> {
        let request_document = request_to_xml(request)?;
        debug!(
            "calling `{}` with {} parameter(s)",
            request.method(),
            request.params_count()
        );
        trace!("outgoing document: {}", request_document);
        let response_document = self
            .transport
            .send(&request_document)
            .map_err(Error::Transport)?;
        trace!("incoming document: {}", response_document);
        let response = decode_response(response_document.as_bytes())?;
        match response {
            Response::Fault {
                code, ref message, ..
            } => debug!("`{}` faulted with #{}: {}", request.method(), code, message),
            Response::Success { .. } => debug!("`{}` succeeded", request.method()),
        }
        Ok(Exchange {
            request_document,
            response_document,
            response,
        })
    }

    /// Builds a request for `method` with `params` and executes it.
    pub fn call<I, V>(&mut self, method: &str, params: I) -> Result<Exchange>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.execute(&Request::with_params(method, params))
    }
}
