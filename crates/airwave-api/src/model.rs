// Access point records
//
// AirWave answers with XML; `crate::xml` turns each `<ap>` element into an
// attribute mapping where XML attributes carry an `@` prefix (`@id`,
// `@index`) and child elements become nested values. These types are
// read-only views over that mapping. Nothing here mutates a record.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::xml::document_body;

/// Attribute holding the access point identifier.
pub const ATTR_ID: &str = "@id";
/// Attribute holding the access point LAN MAC address.
pub const ATTR_LAN_MAC: &str = "lan_mac";
/// Attribute holding the radio sub-records.
pub const ATTR_RADIO: &str = "radio";
/// Attribute holding the access point display name.
pub const ATTR_NAME: &str = "name";

const RADIO_TYPE: &str = "radio_type";
const RADIO_INDEX: &str = "@index";
const RADIO_INTERFACE: &str = "radio_interface";

const AP_LIST_ROOT: &str = "amp:amp_ap_list";
const AP_DETAIL_ROOT: &str = "amp:amp_ap_detail";
const AP_ELEMENT: &str = "ap";

// ── GraphRecord ─────────────────────────────────────────────────────

/// One access point, as an ordered attribute mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphRecord(IndexMap<String, Value>);

impl GraphRecord {
    pub fn new(attributes: IndexMap<String, Value>) -> Self {
        Self(attributes)
    }

    /// Build a record from a JSON object. Anything other than an object is rejected.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(Error::InvalidParameter {
                key: "record".into(),
                reason: format!("expected a mapping, got {}", value_kind(&other)),
            }),
        }
    }

    /// Parse an `ap_detail.xml` response into the record of its `<ap>` element.
    pub fn from_ap_detail_xml(xml: &str) -> Result<Self, Error> {
        let ap = ap_elements(xml, AP_DETAIL_ROOT)?
            .ok_or_else(|| Error::missing(AP_ELEMENT))?;
        Self::from_value(ap)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Look up an attribute that must be present.
    pub fn require(&self, key: &str) -> Result<&Value, Error> {
        self.0.get(key).ok_or_else(|| Error::missing(key))
    }

    /// The `@id` attribute.
    pub fn id(&self) -> Result<&Value, Error> {
        self.require(ATTR_ID)
    }

    /// The `lan_mac` attribute.
    pub fn lan_mac(&self) -> Result<&Value, Error> {
        self.require(ATTR_LAN_MAC)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get(ATTR_NAME).and_then(Value::as_str)
    }

    /// Radio sub-records in document order.
    ///
    /// A lone `<radio>` element parses as a mapping rather than a list; it
    /// is yielded as a single entry. Entries that are not mappings are skipped.
    pub fn radios(&self) -> impl Iterator<Item = RadioRecord<'_>> {
        let entries: &[Value] = match self.0.get(ATTR_RADIO) {
            Some(Value::Array(list)) => list,
            Some(single @ Value::Object(_)) => std::slice::from_ref(single),
            _ => &[],
        };
        entries.iter().filter_map(Value::as_object).map(RadioRecord)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a GraphRecord {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for GraphRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ── RadioRecord ─────────────────────────────────────────────────────

/// Borrowed view over one radio sub-record of a [`GraphRecord`].
#[derive(Debug, Clone, Copy)]
pub struct RadioRecord<'a>(&'a Map<String, Value>);

impl<'a> RadioRecord<'a> {
    /// Radio technology token (`bgn`, `aN`, ...). `None` when absent or not a string.
    pub fn radio_type(&self) -> Option<&'a str> {
        self.0.get(RADIO_TYPE).and_then(Value::as_str)
    }

    /// The radio slot index (`@index`).
    pub fn index(&self) -> Result<&'a Value, Error> {
        self.0
            .get(RADIO_INDEX)
            .ok_or_else(|| Error::missing(RADIO_INDEX))
    }

    /// The radio interface index (`radio_interface`).
    pub fn interface(&self) -> Result<&'a Value, Error> {
        self.0
            .get(RADIO_INTERFACE)
            .ok_or_else(|| Error::missing(RADIO_INTERFACE))
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.get(key)
    }
}

// ── ApList ──────────────────────────────────────────────────────────

/// How to find an access point in an [`ApList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApLookup<'a> {
    /// Match on `@id`, compared numerically.
    Id(u64),
    /// Exact match on `name`.
    Name(&'a str),
}

impl From<u64> for ApLookup<'_> {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl<'a> From<&'a str> for ApLookup<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

/// Ordered list of access points, as returned by `ap_list.xml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApList(Vec<GraphRecord>);

impl ApList {
    pub fn new(records: Vec<GraphRecord>) -> Self {
        Self(records)
    }

    /// Parse an `ap_list.xml` response. A lone `<ap>` is a one-element list
    /// and a document without any is empty.
    pub fn from_xml(xml: &str) -> Result<Self, Error> {
        match ap_elements(xml, AP_LIST_ROOT)? {
            None => Ok(Self::default()),
            Some(Value::Array(aps)) => aps.into_iter().map(GraphRecord::from_value).collect(),
            Some(ap) => Ok(Self(vec![GraphRecord::from_value(ap)?])),
        }
    }

    /// First access point matching `lookup`, or `None`.
    pub fn search<'a>(&self, lookup: impl Into<ApLookup<'a>>) -> Option<&GraphRecord> {
        match lookup.into() {
            ApLookup::Id(id) => self
                .0
                .iter()
                .find(|ap| ap.get(ATTR_ID).and_then(numeric_id) == Some(id)),
            ApLookup::Name(name) => self.0.iter().find(|ap| ap.name() == Some(name)),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GraphRecord> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<GraphRecord> for ApList {
    fn from_iter<I: IntoIterator<Item = GraphRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ApList {
    type Item = &'a GraphRecord;
    type IntoIter = std::slice::Iter<'a, GraphRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The `<ap>` content of an AirWave document rooted at `root`.
fn ap_elements(xml: &str, root: &str) -> Result<Option<Value>, Error> {
    match document_body(xml, root)? {
        Value::Object(mut body) => Ok(body.remove(AP_ELEMENT)),
        _ => Ok(None),
    }
}

/// XML hands ids over as strings; JSON fixtures as numbers.
fn numeric_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
