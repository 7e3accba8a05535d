//! Quad construction and atomic mutation batches.
//!
//! A quad is one subject–predicate–object fact. The object is either a typed
//! scalar [`Value`] or the identifier of another node (an edge), optionally
//! annotated with facets. Quads accumulate in a [`Request`] tagged SET or
//! DELETE and are submitted to the server as one atomic batch.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::client::ClientError;
use crate::facet::Facet;
use crate::geo::Geometry;
use crate::value::Value;

/// Whether a quad is being inserted or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Set,
    Del,
}

/// A single subject–predicate–object fact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NQuad {
    pub subject: String,
    pub predicate: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_value: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub facets: Vec<Facet>,
}

impl NQuad {
    /// Start a scalar fact; set the object with one of the typed setters.
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>) -> Self {
        NQuad {
            subject: subject.into(),
            predicate: predicate.into(),
            object_id: String::new(),
            object_value: None,
            facets: Vec::new(),
        }
    }

    /// Start an edge fact pointing at another node (uid or blank label).
    pub fn connect(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object_id: impl Into<String>,
    ) -> Self {
        NQuad {
            object_id: object_id.into(),
            ..NQuad::new(subject, predicate)
        }
    }

    pub fn set_str(&mut self, v: impl Into<String>) {
        self.object_value = Some(Value::StrVal(v.into()));
    }

    pub fn set_int(&mut self, v: i64) {
        self.object_value = Some(Value::IntVal(v));
    }

    pub fn set_double(&mut self, v: f64) {
        self.object_value = Some(Value::DoubleVal(v));
    }

    pub fn set_bool(&mut self, v: bool) {
        self.object_value = Some(Value::BoolVal(v));
    }

    pub fn set_date(&mut self, v: NaiveDate) {
        self.object_value = Some(Value::DateVal(v));
    }

    pub fn set_datetime(&mut self, v: DateTime<Utc>) {
        self.object_value = Some(Value::DatetimeVal(v));
    }

    pub fn set_default(&mut self, v: impl Into<String>) {
        self.object_value = Some(Value::DefaultVal(v.into()));
    }

    /// Parse GeoJSON and store the geometry as WKB bytes.
    pub fn set_geo_json(&mut self, geojson: &str) -> Result<(), ClientError> {
        let geometry = Geometry::from_geojson(geojson)?;
        self.object_value = Some(Value::GeoVal(geometry.to_wkb()));
        Ok(())
    }

    /// Attach a facet, typing the raw literal per the facet convention.
    pub fn add_facet(&mut self, key: &str, raw: &str) -> Result<(), ClientError> {
        self.facets.push(Facet::new(key, raw)?);
        Ok(())
    }

    /// A quad must carry exactly one of object id / object value.
    fn validate(&self) -> Result<(), ClientError> {
        match (self.object_id.is_empty(), self.object_value.is_none()) {
            (false, true) | (true, false) => Ok(()),
            (true, true) => Err(ClientError::Value(format!(
                "quad <{} {}> has no object",
                self.subject, self.predicate
            ))),
            (false, false) => Err(ClientError::Value(format!(
                "quad <{} {}> has both an object id and an object value",
                self.subject, self.predicate
            ))),
        }
    }
}

/// The set/delete halves of a mutation batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Mutation {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub set: Vec<NQuad>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub del: Vec<NQuad>,
}

impl Mutation {
    fn is_empty(&self) -> bool {
        self.set.is_empty() && self.del.is_empty()
    }
}

/// One server request: an atomic mutation batch, query text, or both.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Request {
    #[serde(skip_serializing_if = "String::is_empty")]
    query: String,
    #[serde(skip_serializing_if = "Mutation::is_empty")]
    mutation: Mutation,
}

impl Request {
    pub fn new() -> Self {
        Request::default()
    }

    /// Attach query text to run after any mutation in the same request.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Append a validated quad to the SET or DELETE half of the batch.
    pub fn add_mutation(&mut self, quad: NQuad, op: Op) -> Result<(), ClientError> {
        quad.validate()?;
        match op {
            Op::Set => self.mutation.set.push(quad),
            Op::Del => self.mutation.del.push(quad),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.mutation.is_empty()
    }
}
