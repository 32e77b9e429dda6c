use crate::error::Result;
use crate::request::Request;
use crate::value::{Value, DATE_TIME_FORMAT};
use std::io::Write;
use xml::writer::XmlEvent;
use xml::EventWriter;

/// Serializes requests into `methodCall` documents.
pub struct Encoder<W: Write> {
    writer: EventWriter<W>,
}

impl<W: Write> Encoder<W> {
    pub fn new(sink: W) -> Encoder<W> {
        Encoder {
            writer: EventWriter::new(sink),
        }
    }

    /// Writes the whole `methodCall` document for `request`.
    ///
    /// A request without parameters still gets its `params` element, left
    /// empty.
    pub fn write_request(&mut self, request: &Request) -> Result<()> {
        self.writer.write(XmlEvent::start_element("methodCall"))?;
        self.write_text_element("methodName", request.method())?;
        self.writer.write(XmlEvent::start_element("params"))?;
        for param in request.params_iter() {
            self.writer.write(XmlEvent::start_element("param"))?;
            self.write_value(param)?;
            self.writer.write(XmlEvent::end_element())?;
        }
        self.writer.write(XmlEvent::end_element())?;
        self.writer.write(XmlEvent::end_element())?;
        Ok(())
    }

    /// Writes one value, wrapped in its `value` element with exactly one
    /// typed child.
    pub fn write_value(&mut self, value: &Value) -> Result<()> {
        self.writer.write(XmlEvent::start_element("value"))?;
        match *value {
            Value::Bool(v) => self.write_text_element("boolean", if v { "1" } else { "0" })?,
            Value::Int(v) => self.write_text_element("int", &v.to_string())?,
            Value::Double(v) => self.write_text_element("double", &v.to_string())?,
            Value::String(ref v) | Value::Other(ref v) => self.write_text_element("string", v)?,
            Value::DateTime(v) => self.write_text_element(
                "dateTime.iso8601",
                &v.format(DATE_TIME_FORMAT).to_string(),
            )?,
            Value::Base64(ref v) => self.write_text_element("base64", &base64::encode(v))?,
            Value::Array(ref items) => {
                self.writer.write(XmlEvent::start_element("array"))?;
                self.writer.write(XmlEvent::start_element("data"))?;
                for item in items {
                    self.write_value(item)?;
                }
                self.writer.write(XmlEvent::end_element())?;
                self.writer.write(XmlEvent::end_element())?;
            }
            Value::Struct(ref members) => {
                self.writer.write(XmlEvent::start_element("struct"))?;
                for &(ref name, ref member) in members {
                    self.writer.write(XmlEvent::start_element("member"))?;
                    self.write_text_element("name", name)?;
                    self.write_value(member)?;
                    self.writer.write(XmlEvent::end_element())?;
                }
                self.writer.write(XmlEvent::end_element())?;
            }
        }
        self.writer.write(XmlEvent::end_element())?;
        Ok(())
    }

    fn write_text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.writer.write(XmlEvent::start_element(name))?;
        self.writer.write(XmlEvent::characters(text))?;
        self.writer.write(XmlEvent::end_element())?;
        Ok(())
    }
}

/// Serializes `request` into a `methodCall` document held in a string.
pub fn request_to_xml(request: &Request) -> Result<String> {
    let mut sink = Vec::new();
    Encoder::new(&mut sink).write_request(request)?;
    Ok(String::from_utf8(sink)?)
}
