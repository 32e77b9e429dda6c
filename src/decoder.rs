use crate::error::{Error, Result};
use crate::response::Response;
use crate::value::{insert_member, Value, DATE_TIME_FORMAT};
use chrono::NaiveDateTime;
use std::io::Read;
use xml::reader::XmlEvent;
use xml::EventReader;

/// Decodes a `methodResponse` document into a [`Response`].
///
/// Decoding is all-or-nothing: any structural violation or unconvertible
/// text aborts the whole attempt with a descriptive error.
pub fn decode_response<R: Read>(body: R) -> Result<Response> {
    let (name, children) = match Tree::new(body)? {
        Tree::Node(name, children) => (name, children),
        Tree::Leaf(_) => return Err(Error::Structure("no methodResponse tag".to_owned())),
    };
    if name != "methodResponse" {
        return Err(Error::Structure("no methodResponse tag".to_owned()));
    }
    match children.into_iter().next() {
        Some(Tree::Node(tag, tag_children)) => match tag.as_str() {
            "fault" => decode_fault(tag_children),
            "params" => decode_success(tag_children),
            _ => Err(Error::Structure(format!(
                "unrecognized methodResponse child `{}`",
                tag
            ))),
        },
        _ => Err(Error::Structure(
            "methodResponse tag must hold fault or params".to_owned(),
        )),
    }
}

/// The fault payload must be a struct carrying an integer `faultCode` and a
/// string `faultString`.
fn decode_fault(mut children: Vec<Tree>) -> Result<Response> {
    let value = match children.pop() {
        Some(node) if children.is_empty() => decode_value(node)?,
        _ => {
            return Err(Error::Structure(
                "fault tag must hold a single value".to_owned(),
            ))
        }
    };
    let (code, message) = {
        let members = match value {
            Value::Struct(ref members) => members,
            _ => return Err(Error::Structure("malformed fault struct".to_owned())),
        };
        let code = match find_member(members, "faultCode") {
            Some(&Value::Int(code)) => code,
            _ => {
                return Err(Error::Structure(
                    "malformed fault struct, no integer faultCode".to_owned(),
                ))
            }
        };
        let message = match find_member(members, "faultString") {
            Some(&Value::String(ref message)) => message.clone(),
            _ => {
                return Err(Error::Structure(
                    "malformed fault struct, no string faultString".to_owned(),
                ))
            }
        };
        (code, message)
    };
    Ok(Response::Fault {
        code,
        message,
        raw: Some(value),
    })
}

fn decode_success(children: Vec<Tree>) -> Result<Response> {
    let mut param_children = match children.into_iter().next() {
        Some(Tree::Node(tag, param_children)) if tag == "param" => param_children,
        _ => return Err(Error::Structure("no param tag".to_owned())),
    };
    let value = match param_children.pop() {
        Some(node) if param_children.is_empty() => decode_value(node)?,
        _ => {
            return Err(Error::Structure(
                "param tag must hold a single value".to_owned(),
            ))
        }
    };
    Ok(Response::Success { value })
}

fn find_member<'a>(members: &'a [(String, Value)], name: &str) -> Option<&'a Value> {
    members
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

fn decode_value(tree: Tree) -> Result<Value> {
    match tree {
        Tree::Node(ref name, _) if name != "value" => Err(Error::Structure(format!(
            "need value tag, found `{}`",
            name
        ))),
        Tree::Node(_, children) => decode_value_contents(children),
        Tree::Leaf(_) => Err(Error::Structure("need value tag".to_owned())),
    }
}

/// Dispatches on the name of the single type element inside a `value` tag.
fn decode_value_contents(mut children: Vec<Tree>) -> Result<Value> {
    let type_node = match children.pop() {
        Some(node) if children.is_empty() => node,
        _ => return Err(Error::Structure("need type tag in value tag".to_owned())),
    };
    let (datatype, content) = match type_node {
        Tree::Node(datatype, content) => (datatype, content),
        Tree::Leaf(_) => return Err(Error::Structure("need type tag in value tag".to_owned())),
    };
    match datatype.as_str() {
        "struct" => decode_struct(content),
        "array" => decode_array(content),
        _ => decode_scalar(datatype, content),
    }
}

fn decode_struct(members: Vec<Tree>) -> Result<Value> {
    let mut decoded = Vec::new();
    for member in members {
        if let Some((name, value)) = decode_member(member)? {
            insert_member(&mut decoded, name, value);
        }
    }
    Ok(Value::Struct(decoded))
}

/// Locates the `name` and `value` parts of a member by element name, in
/// either order. A member missing either part is dropped, not an error,
/// matching the leniency of common peers.
fn decode_member(tree: Tree) -> Result<Option<(String, Value)>> {
    let children = match tree {
        Tree::Node(ref key, _) if key != "member" => {
            return Err(Error::Structure(format!(
                "struct may only hold member tags, found `{}`",
                key
            )))
        }
        Tree::Node(_, children) => children,
        Tree::Leaf(_) => {
            return Err(Error::Structure(
                "struct may only hold member tags".to_owned(),
            ))
        }
    };
    let mut name = None;
    let mut value = None;
    for child in children {
        if let Tree::Node(tag, grandchildren) = child {
            match tag.as_str() {
                "name" => name = Some(single_text(grandchildren, "name")?),
                "value" => value = Some(decode_value_contents(grandchildren)?),
                _ => {}
            }
        }
    }
    Ok(match (name, value) {
        (Some(name), Some(value)) if !name.is_empty() => Some((name, value)),
        _ => None,
    })
}

fn decode_array(mut content: Vec<Tree>) -> Result<Value> {
    let items = match content.pop() {
        Some(Tree::Node(ref tag, _)) if !content.is_empty() || tag != "data" => {
            return Err(Error::Structure("need data tag in array tag".to_owned()))
        }
        Some(Tree::Node(_, items)) => items,
        _ => return Err(Error::Structure("need data tag in array tag".to_owned())),
    };
    items
        .into_iter()
        .map(decode_value)
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

fn decode_scalar(datatype: String, content: Vec<Tree>) -> Result<Value> {
    let text = single_text(content, &datatype)?;
    match datatype.as_str() {
        "i4" | "int" => match text.parse() {
            Ok(v) => Ok(Value::Int(v)),
            Err(_) => Err(Error::Parse {
                datatype: "int",
                value: text,
            }),
        },
        "boolean" => Ok(Value::Bool(text == "1")),
        "double" => match text.parse() {
            Ok(v) => Ok(Value::Double(v)),
            Err(_) => Err(Error::Parse {
                datatype: "double",
                value: text,
            }),
        },
        "base64" => match base64::decode(&text) {
            Ok(bytes) => Ok(Value::Base64(bytes)),
            Err(_) => Err(Error::Parse {
                datatype: "base64",
                value: text,
            }),
        },
        "dateTime.iso8601" | "dateTime" | "date" => {
            match NaiveDateTime::parse_from_str(&text, DATE_TIME_FORMAT) {
                Ok(stamp) => Ok(Value::DateTime(stamp)),
                Err(_) => Err(Error::Parse {
                    datatype: "dateTime.iso8601",
                    value: text,
                }),
            }
        }
        "string" => Ok(Value::String(text)),
        _ => Ok(Value::Other(text)),
    }
}

/// Text of an element holding nothing but character data; an absent leaf is
/// the empty string.
fn single_text(mut content: Vec<Tree>, tag: &str) -> Result<String> {
    match content.pop() {
        None => Ok(String::new()),
        Some(Tree::Leaf(text)) if content.is_empty() => Ok(text),
        _ => Err(Error::Structure(format!(
            "tag `{}` must hold just its text",
            tag
        ))),
    }
}

/// Shape of a parsed document: element nodes with their children, leaves
/// for character data.
enum Tree {
    Leaf(String),
    Node(String, Vec<Tree>),
}

impl Tree {
    fn new<R: Read>(body: R) -> Result<Tree> {
        parse_tree(&mut EventReader::new(body))?
            .ok_or_else(|| Error::Structure("document holds no element".to_owned()))
    }
}

enum Node {
    Open(String),
    Data(String),
    Close,
}

fn parse_tree<R: Read>(reader: &mut EventReader<R>) -> Result<Option<Tree>> {
    match next_node(reader)? {
        Node::Close => Ok(None),
        Node::Data(value) => Ok(Some(Tree::Leaf(value))),
        Node::Open(name) => {
            let mut children = Vec::new();
            while let Some(node) = parse_tree(reader)? {
                children.push(node);
            }
            Ok(Some(Tree::Node(name, children)))
        }
    }
}

fn next_node<R: Read>(reader: &mut EventReader<R>) -> Result<Node> {
    match reader.next()? {
        XmlEvent::StartElement { name, .. } => Ok(Node::Open(name.local_name)),
        XmlEvent::Characters(value) => Ok(Node::Data(value)),
        XmlEvent::EndElement { .. } | XmlEvent::EndDocument => Ok(Node::Close),
        _ => next_node(reader),
    }
}
