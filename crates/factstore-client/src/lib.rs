//! FactStore client — typed mutations and queries over the FactStore RPC API.
//!
//! This crate is the single point of access to a FactStore server. It owns
//! the client side of the wire contract: typed scalar values, fact-level
//! facets with their literal-quoting convention, WKB geometry encoding,
//! atomic mutation batches, and the response tree returned by queries.

pub mod client;
pub mod facet;
pub mod geo;
pub mod mutation;
pub mod response;
pub mod value;

pub use client::{Client, ClientConfig, ClientError};
pub use facet::{Facet, FacetValue};
pub use geo::Geometry;
pub use mutation::{NQuad, Op, Request};
pub use response::{Property, Response, ResponseNode};
pub use value::Value;
