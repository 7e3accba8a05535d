//! Query responses: assigned uids and the result-node tree.
//!
//! The tree is read-only; callers extract the fields they need and drop it.

use std::collections::HashMap;

use serde::Deserialize;

use factstore_core::Uid;

use crate::value::Value;

/// Reserved property carrying a node's own uid in query results.
const UID_PROPERTY: &str = "_uid_";

/// Server response to a [`crate::Request`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    /// Blank-node label (without the `_:` prefix) to assigned uid.
    #[serde(default)]
    pub assigned_uids: HashMap<String, u64>,
    /// Result roots, one per named query block.
    #[serde(default)]
    pub nodes: Vec<ResponseNode>,
    /// Server-side timing breakdown, when reported.
    #[serde(default)]
    pub latency: Option<Latency>,
}

impl Response {
    /// Uid assigned to a blank-node label in this request's batch.
    pub fn assigned_uid(&self, label: &str) -> Option<Uid> {
        self.assigned_uids.get(label).copied().map(Uid)
    }
}

/// One node in the result tree: named/typed properties plus traversed edges.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseNode {
    /// Predicate (or query block name) this node was reached through.
    #[serde(default)]
    pub attribute: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub children: Vec<ResponseNode>,
}

impl ResponseNode {
    /// Look up a property value by predicate name.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|p| p.prop == name)
            .map(|p| &p.value)
    }

    /// Positional child access.
    pub fn child(&self, index: usize) -> Option<&ResponseNode> {
        self.children.get(index)
    }

    /// Children reached through a given predicate.
    pub fn children_named<'a>(
        &'a self,
        attribute: &'a str,
    ) -> impl Iterator<Item = &'a ResponseNode> {
        self.children.iter().filter(move |c| c.attribute == attribute)
    }

    /// This node's own uid, from the reserved `_uid_` property.
    pub fn uid(&self) -> Option<Uid> {
        self.property(UID_PROPERTY).and_then(Value::as_uid)
    }
}

/// A named, typed property on a result node.
#[derive(Debug, Clone, Deserialize)]
pub struct Property {
    pub prop: String,
    pub value: Value,
}

/// Server-side timing breakdown for one request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Latency {
    #[serde(default)]
    pub parsing: String,
    #[serde(default)]
    pub processing: String,
    #[serde(default)]
    pub encoding: String,
}
