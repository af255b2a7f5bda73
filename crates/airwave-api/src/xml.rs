// XML documents as attribute mappings
//
// AirWave's XML API is folded into the nested shape the record types read:
// attributes become `@name` keys, child elements become keys named after
// the element, and repeated children collect into a list in document
// order. A leaf element without attributes collapses to its trimmed text,
// or `null` when empty. Text beside attributes or children is kept under
// `#text`. Namespace prefixes stay part of the name (`amp:amp_ap_list`).

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::error::Error;

/// Key holding an element's text when it also has attributes or children.
pub const TEXT_KEY: &str = "#text";

/// Parse `xml` into its root element name and value.
pub fn parse(xml: &str) -> Result<(String, Value), Error> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Element::open(&start)?),
            Event::Empty(start) => {
                let element = Element::open(&start)?;
                if let Some(root) = close(&mut stack, element) {
                    return Ok(root);
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::Xml("unbalanced end tag".into()))?;
                if let Some(root) = close(&mut stack, element) {
                    return Ok(root);
                }
            }
            Event::Text(text) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => return Err(Error::Xml("incomplete document".into())),
            _ => {}
        }
    }
}

/// Parse `xml` and return the value of its root, which must be named `root`.
pub fn document_body(xml: &str, root: &str) -> Result<Value, Error> {
    let (name, value) = parse(xml)?;
    if name != root {
        let message = format!("expected <{root}> document, found <{name}>");
        return Err(Error::Xml(message));
    }
    Ok(value)
}

/// Attach a finished element to its parent, or hand it back if it is the root.
fn close(stack: &mut [Element], element: Element) -> Option<(String, Value)> {
    let (name, value) = element.finish();
    match stack.last_mut() {
        Some(parent) => {
            parent.append(name, value);
            None
        }
        None => Some((name, value)),
    }
}

struct Element {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self, Error> {
        let name = utf8(start.name().as_ref())?.to_owned();
        let mut attributes = Map::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = utf8(attr.key.as_ref())?;
            let value = attr.unescape_value()?;
            attributes.insert(format!("@{key}"), Value::String(value.into_owned()));
        }
        Ok(Self {
            name,
            attributes,
            children: Map::new(),
            text: String::new(),
        })
    }

    // A second child of the same name turns the entry into a list.
    fn append(&mut self, name: String, value: Value) {
        match self.children.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::Array(list) => list.push(value),
                existing => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
            },
        }
    }

    fn finish(self) -> (String, Value) {
        let text = self.text.trim();
        if self.attributes.is_empty() && self.children.is_empty() {
            let value = if text.is_empty() {
                Value::Null
            } else {
                Value::String(text.to_owned())
            };
            return (self.name, value);
        }

        let mut map = self.attributes;
        map.extend(self.children);
        if !text.is_empty() {
            map.insert(TEXT_KEY.into(), Value::String(text.to_owned()));
        }
        (self.name, Value::Object(map))
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, Error> {
    std::str::from_utf8(bytes).map_err(|e| Error::Xml(e.to_string()))
}
