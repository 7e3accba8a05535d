//! Fact-level metadata (facets) and the raw-literal parsing convention.
//!
//! A facet annotates one specific quad, not a node. Facet values arrive as
//! raw literals and are typed by inspection: a double-quoted literal is a
//! string, everything else is tried as bool, integer, float, then datetime.
//! This quoting convention is part of the wire contract and is preserved
//! as-is; callers who want a string facet must supply the quotes themselves
//! (e.g. the raw literal `"Steve"`).

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ClientError;

/// Datetime facets without an offset are read in this format, as UTC.
const NAIVE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A key/value annotation attached to a specific quad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    pub key: String,
    pub value: FacetValue,
}

/// The typed value of a facet, externally tagged on the wire like [`crate::Value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetValue {
    StrVal(String),
    IntVal(i64),
    FloatVal(f64),
    BoolVal(bool),
    DatetimeVal(DateTime<Utc>),
}

impl Facet {
    /// Build a facet from a key and a raw literal.
    ///
    /// Fails if the key contains characters outside `[A-Za-z0-9._-]` or the
    /// literal does not parse as any facet type.
    pub fn new(key: &str, raw: &str) -> Result<Facet, ClientError> {
        if !valid_key(key) {
            return Err(ClientError::Facet(format!(
                "invalid facet key {key:?}: keys are limited to [A-Za-z0-9._-]"
            )));
        }
        Ok(Facet {
            key: key.to_string(),
            value: parse_literal(raw)?,
        })
    }
}

fn valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Type a raw facet literal per the wire convention.
fn parse_literal(raw: &str) -> Result<FacetValue, ClientError> {
    if let Some(stripped) = raw.strip_prefix('"') {
        return match stripped.strip_suffix('"') {
            Some(inner) => Ok(FacetValue::StrVal(inner.to_string())),
            None => Err(ClientError::Facet(format!(
                "unbalanced quotes in facet literal {raw:?}"
            ))),
        };
    }
    if let Ok(b) = raw.parse::<bool>() {
        return Ok(FacetValue::BoolVal(b));
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(FacetValue::IntVal(i));
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Ok(FacetValue::FloatVal(f));
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Ok(FacetValue::DatetimeVal(t.with_timezone(&Utc)));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(raw, NAIVE_DATETIME_FORMAT) {
        return Ok(FacetValue::DatetimeVal(t.and_utc()));
    }
    Err(ClientError::Facet(format!(
        "cannot type facet literal {raw:?}: string facets must be quoted"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn quoted_literal_is_a_string() {
        let facet = Facet::new("alias", r#""Steve""#).unwrap();
        assert_eq!(facet.value, FacetValue::StrVal("Steve".into()));
    }

    #[test]
    fn unbalanced_quote_is_an_error() {
        assert!(Facet::new("alias", r#""Steve"#).is_err());
    }

    #[test]
    fn unquoted_string_is_rejected() {
        let err = Facet::new("alias", "Steve").unwrap_err();
        assert!(err.to_string().contains("must be quoted"));
    }

    #[test]
    fn bool_int_float_literals() {
        assert_eq!(
            Facet::new("close", "true").unwrap().value,
            FacetValue::BoolVal(true)
        );
        assert_eq!(
            Facet::new("weight", "25").unwrap().value,
            FacetValue::IntVal(25)
        );
        assert_eq!(
            Facet::new("score", "2.5").unwrap().value,
            FacetValue::FloatVal(2.5)
        );
    }

    #[test]
    fn datetime_without_offset_reads_as_utc() {
        let facet = Facet::new("since", "2006-01-02T15:04:05").unwrap();
        let expected = Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
        assert_eq!(facet.value, FacetValue::DatetimeVal(expected));
    }

    #[test]
    fn rfc3339_datetime_keeps_its_instant() {
        let facet = Facet::new("since", "2006-01-02T15:04:05+02:00").unwrap();
        let expected = Utc.with_ymd_and_hms(2006, 1, 2, 13, 4, 5).unwrap();
        assert_eq!(facet.value, FacetValue::DatetimeVal(expected));
    }

    #[test]
    fn bad_keys_are_rejected() {
        assert!(Facet::new("", "1").is_err());
        assert!(Facet::new("has space", "1").is_err());
        assert!(Facet::new("pipe|key", "1").is_err());
        assert!(Facet::new("ok-key_1.x", "1").is_ok());
    }
}
