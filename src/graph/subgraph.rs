//! 子图定义
//!
//! Responsible for named views over a subset of the parent graph's nodes and edges.
//! A sub-graph never owns entities; it only holds names and edge keys that must
//! stay resolvable in the parent.

use crate::error::{Error, Result};
use crate::graph::edge::{EdgeKey, EdgeKind};
use crate::types::UserData;
use indexmap::map::Values;
use indexmap::{IndexMap, IndexSet};

/// SubGraph is a named, non-owning view over part of a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SubGraph {
    name: String,
    kind: EdgeKind,
    nodes: IndexSet<String>,
    edges: IndexSet<EdgeKey>,
    user_data: UserData,
}

impl SubGraph {
    pub(crate) fn new(name: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            nodes: IndexSet::new(),
            edges: IndexSet::new(),
            user_data: UserData::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node names referenced by this view, in the order they were added.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Edge keys referenced by this view, in the order they were added.
    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter()
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.nodes.contains(name)
    }

    /// Endpoint order does not matter when the parent graph is undirected.
    pub fn contains_edge(&self, key: &EdgeKey) -> bool {
        self.edges.contains(&*self.kind.canonical(key))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn user_data(&self) -> &UserData {
        &self.user_data
    }

    pub(crate) fn user_data_mut(&mut self) -> &mut UserData {
        &mut self.user_data
    }

    pub(crate) fn insert_node(&mut self, name: &str) -> bool {
        self.nodes.insert(name.to_string())
    }

    pub(crate) fn insert_edge(&mut self, key: EdgeKey) -> bool {
        self.edges.insert(key)
    }

    pub(crate) fn drop_node(&mut self, name: &str) -> bool {
        self.nodes.shift_remove(name)
    }

    pub(crate) fn drop_edge(&mut self, key: &EdgeKey) -> bool {
        self.edges.shift_remove(key)
    }
}

/// SubGraphCollection maintains the registry of sub-graphs defined in a graph.
#[derive(Debug, Clone)]
pub struct SubGraphCollection {
    kind: EdgeKind,
    subgraphs: IndexMap<String, SubGraph>,
}

impl SubGraphCollection {
    /// `kind` is the parent graph's edge identity, shared by every view.
    pub fn new(kind: EdgeKind) -> Self {
        Self {
            kind,
            subgraphs: IndexMap::new(),
        }
    }

    /// Create an empty sub-graph. Fails if the name exists.
    pub(crate) fn add(&mut self, name: &str) -> Result<&mut SubGraph> {
        if self.subgraphs.contains_key(name) {
            return Err(Error::duplicate_subgraph(name));
        }
        let kind = self.kind;
        Ok(self
            .subgraphs
            .entry(name.to_string())
            .or_insert_with(|| SubGraph::new(name, kind)))
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<SubGraph> {
        self.subgraphs.shift_remove(name)
    }

    pub(crate) fn clear(&mut self) {
        self.subgraphs.clear();
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut SubGraph> {
        self.subgraphs.get_mut(name)
    }

    /// Drop a node reference from every sub-graph. Returns how many views held it.
    pub(crate) fn forget_node(&mut self, name: &str) -> usize {
        self.subgraphs
            .values_mut()
            .map(|sg| sg.drop_node(name))
            .filter(|&dropped| dropped)
            .count()
    }

    /// Drop an edge reference from every sub-graph. Returns how many views held it.
    pub(crate) fn forget_edge(&mut self, key: &EdgeKey) -> usize {
        self.subgraphs
            .values_mut()
            .map(|sg| sg.drop_edge(key))
            .filter(|&dropped| dropped)
            .count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.subgraphs.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&SubGraph> {
        self.subgraphs.get(name)
    }

    /// Indexed lookup, `SubGraphNotFound` if absent.
    pub fn subgraph(&self, name: &str) -> Result<&SubGraph> {
        self.subgraphs
            .get(name)
            .ok_or_else(|| Error::SubGraphNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.subgraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subgraphs.is_empty()
    }

    pub fn iter(&self) -> Values<'_, String, SubGraph> {
        self.subgraphs.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.subgraphs.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a SubGraphCollection {
    type Item = &'a SubGraph;
    type IntoIter = Values<'a, String, SubGraph>;

    fn into_iter(self) -> Self::IntoIter {
        self.subgraphs.values()
    }
}
