//! Node identity types for the FactStore graph.
//!
//! A node is addressed either by a server-assigned `Uid` or, within a single
//! mutation batch, by a client-side blank-node label requesting assignment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FactstoreError;

/// A server-assigned node identifier.
///
/// Displays in the `0x`-prefixed hex form the query language expects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Uid(pub u64);

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl FromStr for Uid {
    type Err = FactstoreError;

    /// Parse a uid from `0x`-prefixed hex or plain decimal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => s.parse::<u64>(),
        };
        parsed
            .map(Uid)
            .map_err(|_| FactstoreError::InvalidUid(s.to_string()))
    }
}

impl From<u64> for Uid {
    fn from(raw: u64) -> Self {
        Uid(raw)
    }
}

/// Format a blank-node label (`_:label`).
///
/// Blank nodes are temporary labels valid within one mutation batch; the
/// server assigns a `Uid` for each distinct label and reports it back in
/// the response's assigned-uid map under the bare label.
pub fn blank(label: &str) -> String {
    format!("_:{label}")
}
