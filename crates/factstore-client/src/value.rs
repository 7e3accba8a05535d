//! Typed scalar values for quad objects and query results.
//!
//! The wire form mirrors the server's typed-value oneof: externally tagged
//! JSON in snake_case, e.g. `{"str_val": "Steven Spielberg"}` or
//! `{"geo_val": [1, 1, 0, 0, ...]}` for WKB bytes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use factstore_core::Uid;

/// A typed scalar value attached to a quad or returned in a query response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    StrVal(String),
    IntVal(i64),
    DoubleVal(f64),
    BoolVal(bool),
    /// Calendar date, `YYYY-MM-DD` on the wire.
    DateVal(NaiveDate),
    /// Instant with offset, RFC 3339 on the wire.
    DatetimeVal(DateTime<Utc>),
    /// WKB-encoded geometry bytes.
    GeoVal(Vec<u8>),
    /// Node identifier.
    UidVal(u64),
    /// Untyped server default.
    DefaultVal(String),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::StrVal(s) | Value::DefaultVal(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::IntVal(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::DoubleVal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::BoolVal(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::DateVal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::DatetimeVal(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_geo(&self) -> Option<&[u8]> {
        match self {
            Value::GeoVal(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_uid(&self) -> Option<Uid> {
        match self {
            Value::UidVal(raw) => Some(Uid(*raw)),
            // Some query shapes return uids as hex strings.
            Value::StrVal(s) => s.parse().ok(),
            _ => None,
        }
    }
}
