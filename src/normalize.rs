//! XML → `Value` tree normalization.
//!
//! Conventions (xmltodict style):
//! - the document is a one-entry mapping `{root_tag: root_value}`
//! - an element without attributes or children is its text, or `Null` when empty
//! - otherwise a mapping: `@attr` entries, child tags, and `#text` for text content
//! - a child tag seen more than once becomes a sequence, in document order
use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Prefix put in front of attribute names.
    pub attr_prefix: String,
    /// Key holding text content of elements that also have attributes or children.
    pub text_key: String,
    pub trim_text: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            attr_prefix: "@".to_string(),
            text_key: "#text".to_string(),
            trim_text: true,
        }
    }
}

struct Frame {
    tag: String,
    fields: IndexMap<String, Value>,
    text: String,
}

impl Frame {
    fn open(e: &BytesStart<'_>, opts: &NormalizeOptions) -> Result<Self> {
        let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let mut fields = IndexMap::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = format!("{}{}", opts.attr_prefix, String::from_utf8_lossy(attr.key.as_ref()));
            let value = attr.unescape_value()?.into_owned();
            fields.insert(key, Value::string(value));
        }
        Ok(Self { tag, fields, text: String::new() })
    }

    fn close(self, opts: &NormalizeOptions) -> (String, Value) {
        let Frame { tag, mut fields, text } = self;
        let text = if opts.trim_text { text.trim().to_string() } else { text };
        let value = if fields.is_empty() {
            if text.is_empty() { Value::Null } else { Value::string(text) }
        } else {
            if !text.is_empty() {
                fields.insert(opts.text_key.clone(), Value::string(text));
            }
            Value::Mapping(fields)
        };
        (tag, value)
    }
}

fn push_child(fields: &mut IndexMap<String, Value>, tag: String, value: Value) {
    match fields.get_mut(&tag) {
        // element values are never sequences, so an existing one means repeats
        Some(Value::Sequence(xs)) => xs.push(value),
        Some(existing) => {
            let first = std::mem::replace(existing, Value::Null);
            *existing = Value::Sequence(vec![first, value]);
        }
        None => {
            fields.insert(tag, value);
        }
    }
}

struct Builder<'o> {
    opts: &'o NormalizeOptions,
    stack: Vec<Frame>,
    root: Option<(String, Value)>,
}

impl Builder<'_> {
    fn start(&mut self, e: &BytesStart<'_>) -> Result<Frame> {
        let frame = Frame::open(e, self.opts)?;
        if self.stack.is_empty() && self.root.is_some() {
            return Err(Error::MultipleRoots(frame.tag));
        }
        Ok(frame)
    }

    fn finish(&mut self, frame: Frame) {
        let (tag, value) = frame.close(self.opts);
        match self.stack.last_mut() {
            Some(parent) => push_child(&mut parent.fields, tag, value),
            None => self.root = Some((tag, value)),
        }
    }

    fn text(&mut self, chunk: &str) {
        // text outside the root element is ignored
        if let Some(frame) = self.stack.last_mut() {
            frame.text.push_str(chunk);
        }
    }
}

/// Normalize an XML document into `{root_tag: value}`.
pub fn normalize_xml(xml: &str, opts: &NormalizeOptions) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    let mut b = Builder { opts, stack: Vec::new(), root: None };

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let frame = b.start(&e)?;
                b.stack.push(frame);
            }
            Event::Empty(e) => {
                let frame = b.start(&e)?;
                b.finish(frame);
            }
            Event::End(_) => {
                if let Some(frame) = b.stack.pop() {
                    b.finish(frame);
                }
            }
            Event::Text(t) => b.text(&t.unescape()?),
            Event::CData(c) => b.text(&String::from_utf8_lossy(&c.into_inner())),
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = b.stack.pop() {
        return Err(Error::UnclosedElement(open.tag));
    }
    let (tag, value) = b.root.ok_or(Error::NoRootElement)?;
    tracing::debug!(root = %tag, "normalized document");
    Ok(Value::Mapping(IndexMap::from([(tag, value)])))
}

/// Split a normalized document into its root tag and root value.
pub fn split_root(doc: Value) -> Option<(String, Value)> {
    match doc {
        Value::Mapping(m) if m.len() == 1 => m.into_iter().next(),
        _ => None,
    }
}
