// Graph query parameters
//
// A fresh `GraphParams` is assembled for every URL and thrown away
// afterwards. Keys are kept in a `BTreeMap` so the encoded query string is
// always in lexicographic key order, which keeps generated URLs stable.

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;

use crate::error::Error;
use crate::model::value_kind;

pub const TYPE: &str = "type";
pub const ID: &str = "id";
pub const AP_UID: &str = "ap_uid";
pub const RADIO_INDEX: &str = "radio_index";
pub const RADIO_INTERFACE: &str = "radio_interface";
pub const START: &str = "start";
pub const END: &str = "end";

/// Default graph start: two hours ago.
pub const DEFAULT_START: i64 = -7200;
/// Default graph end: now.
pub const DEFAULT_END: i64 = 0;

/// Escaped in query keys and values: everything but ASCII alphanumerics
/// and `_.-~`.
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

// ── TimeWindow ──────────────────────────────────────────────────────

/// Requested graph window as offsets in seconds relative to now.
///
/// Negative values lie in the past. `None` and `Some(0)` both mean
/// "unset" and are replaced by the builder's defaults, so an explicit
/// zero offset can't be requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl TimeWindow {
    pub fn new(start: Option<i64>, end: Option<i64>) -> Self {
        Self { start, end }
    }

    /// Resolve to concrete `(start, end)` offsets, substituting defaults
    /// for unset values.
    pub fn or_defaults(self, default_start: i64, default_end: i64) -> (i64, i64) {
        let pick = |value: Option<i64>, default| match value {
            Some(v) if v != 0 => v,
            _ => default,
        };
        (pick(self.start, default_start), pick(self.end, default_end))
    }
}

/// Render an offset the way the graph endpoint expects: `-3600` -> `-3600s`.
pub fn format_offset(seconds: i64) -> String {
    format!("{seconds}s")
}

// ── GraphParams ─────────────────────────────────────────────────────

/// Key-sorted query parameters for one graph request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphParams(BTreeMap<&'static str, String>);

impl GraphParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    /// Insert a record attribute value, converting it to its query form.
    pub fn insert_value(&mut self, key: &'static str, value: &Value) -> Result<(), Error> {
        let rendered = param_value(key, value)?;
        self.0.insert(key, rendered);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Form-encode as `key=value&...` in key order. Reserved characters are
    /// percent-escaped (`:` becomes `%3A`, `*` becomes `%2A`), `~` is left
    /// alone and spaces become `+`.
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", quote_plus(k), quote_plus(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn quote_plus(text: &str) -> String {
    let parts: Vec<String> = text.split(' ').map(escape).collect();
    parts.join("+")
}

fn escape(part: &str) -> String {
    utf8_percent_encode(part, QUERY_ESCAPE).to_string()
}

/// Scalars only. Booleans use the capitalised spelling AirWave echoes back.
fn param_value(key: &str, value: &Value) -> Result<String, Error> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(true) => Ok("True".into()),
        Value::Bool(false) => Ok("False".into()),
        other => Err(Error::InvalidParameter {
            key: key.into(),
            reason: format!("cannot encode a {} value", value_kind(other)),
        }),
    }
}
