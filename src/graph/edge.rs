//! 边定义
//!
//! 边的身份由图的有向性决定：有向图为有序点对，无向图为无序点对。

use crate::error::{Error, Result};
use crate::graph::index::IncidenceIndex;
use crate::types::UserData;
use indexmap::map::Values;
use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;

/// 边的身份策略，在图构造时选定且不可更改
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// 有序点对 (source, target)
    Directed,
    /// 无序点对 {a, b}
    Undirected,
}

impl EdgeKind {
    pub fn from_directed(directed: bool) -> Self {
        if directed {
            EdgeKind::Directed
        } else {
            EdgeKind::Undirected
        }
    }

    pub fn is_directed(&self) -> bool {
        matches!(self, EdgeKind::Directed)
    }

    /// 计算端点对的身份键。无向图按名称排序使两种方向得到同一个键。
    pub fn key(&self, source: &str, target: &str) -> EdgeKey {
        match self {
            EdgeKind::Undirected if target < source => {
                EdgeKey(target.to_string(), source.to_string())
            }
            _ => EdgeKey(source.to_string(), target.to_string()),
        }
    }

    /// 把任意策略下得到的键换算成本策略的键。已是规范形式时不分配。
    pub fn canonical<'k>(&self, key: &'k EdgeKey) -> Cow<'k, EdgeKey> {
        match self {
            EdgeKind::Undirected if key.second() < key.first() => {
                Cow::Owned(self.key(key.first(), key.second()))
            }
            _ => Cow::Borrowed(key),
        }
    }
}

/// 边的身份键
///
/// 只能由 [`EdgeKind::key`] 构造，无向图的键总是规范顺序。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(String, String);

impl EdgeKey {
    pub fn first(&self) -> &str {
        &self.0
    }

    pub fn second(&self) -> &str {
        &self.1
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first(), self.second())
    }
}

/// 边
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// 源节点名称
    source: String,
    /// 目标节点名称
    target: String,
    /// 用户数据
    user_data: UserData,
}

impl Edge {
    /// 创建新边
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            user_data: UserData::new(),
        }
    }

    /// 获取源节点名称
    pub fn source(&self) -> &str {
        &self.source
    }

    /// 获取目标节点名称
    pub fn target(&self) -> &str {
        &self.target
    }

    /// 按给定身份策略计算本边的键
    pub fn key(&self, kind: EdgeKind) -> EdgeKey {
        kind.key(&self.source, &self.target)
    }

    /// 边是否关联该节点
    pub fn is_incident_to(&self, name: &str) -> bool {
        self.source == name || self.target == name
    }

    /// 获取另一端的节点名称
    pub fn other(&self, name: &str) -> Option<&str> {
        if self.source == name {
            Some(&self.target)
        } else if self.target == name {
            Some(&self.source)
        } else {
            None
        }
    }

    pub fn user_data(&self) -> &UserData {
        &self.user_data
    }

    pub fn user_data_mut(&mut self) -> &mut UserData {
        &mut self.user_data
    }
}

/// 边集合
///
/// 以身份键去重：重复添加同一身份的边返回已有的边而不会产生副本。
/// 端点校验依赖节点集合，因此插入和删除经由
/// [`Graph::edges_mut`](crate::graph::Graph::edges_mut) 进行。
#[derive(Debug, Clone)]
pub struct EdgeCollection {
    kind: EdgeKind,
    edges: IndexMap<EdgeKey, Edge>,
    index: IncidenceIndex,
}

impl EdgeCollection {
    pub fn new(kind: EdgeKind) -> Self {
        Self {
            kind,
            edges: IndexMap::new(),
            index: IncidenceIndex::new(),
        }
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    /// 插入端点对，已存在时返回已有边。调用方负责端点校验。
    ///
    /// 第二个返回值表示边是否为新插入。
    pub(crate) fn insert(&mut self, source: &str, target: &str) -> (&mut Edge, bool) {
        self.insert_edge(Edge::new(source, target))
    }

    /// 插入边对象；已存在时把用户数据浅拷贝合并进已有边
    pub(crate) fn insert_edge(&mut self, edge: Edge) -> (&mut Edge, bool) {
        let key = edge.key(self.kind);
        if let Some(index) = self.edges.get_index_of(&key) {
            tracing::trace!(edge = %key, "edge already present, merging");
            let existing = &mut self.edges[index];
            existing.user_data.extend_shared(&edge.user_data);
            return (existing, false);
        }
        self.index.add_edge(&key, &edge.source, &edge.target);
        (self.edges.entry(key).or_insert(edge), true)
    }

    /// 不做级联地移除边
    pub(crate) fn take(&mut self, key: &EdgeKey) -> Option<Edge> {
        let edge = self.edges.shift_remove(key)?;
        self.index.remove_edge(key, &edge.source, &edge.target);
        Some(edge)
    }

    pub(crate) fn clear(&mut self) {
        self.edges.clear();
        self.index.clear();
    }

    /// 端点对的身份键
    pub fn key(&self, source: &str, target: &str) -> EdgeKey {
        self.kind.key(source, target)
    }

    pub fn contains(&self, source: &str, target: &str) -> bool {
        self.edges.contains_key(&self.key(source, target))
    }

    /// 按身份键查找；无向图中键的端点顺序无关
    pub fn contains_key(&self, key: &EdgeKey) -> bool {
        self.edges.contains_key(&*self.kind.canonical(key))
    }

    pub fn get(&self, source: &str, target: &str) -> Option<&Edge> {
        self.edges.get(&self.key(source, target))
    }

    pub fn get_by_key(&self, key: &EdgeKey) -> Option<&Edge> {
        self.edges.get(&*self.kind.canonical(key))
    }

    pub(crate) fn get_mut(&mut self, source: &str, target: &str) -> Option<&mut Edge> {
        let key = self.key(source, target);
        self.edges.get_mut(&key)
    }

    /// 按端点索引边，不存在时返回 `EdgeNotFound`
    pub fn edge(&self, source: &str, target: &str) -> Result<&Edge> {
        let key = self.key(source, target);
        self.edges
            .get(&key)
            .ok_or_else(|| Error::EdgeNotFound(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> Values<'_, EdgeKey, Edge> {
        self.edges.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.keys()
    }

    /// 节点的全部关联边
    pub fn incident(&self, name: &str) -> impl Iterator<Item = &Edge> {
        self.index
            .incident(name)
            .into_iter()
            .filter_map(move |key| self.edges.get(&key))
    }

    pub(crate) fn incident_keys(&self, name: &str) -> Vec<EdgeKey> {
        self.index.incident(name)
    }

    pub(crate) fn index(&self) -> &IncidenceIndex {
        &self.index
    }
}

impl<'a> IntoIterator for &'a EdgeCollection {
    type Item = &'a Edge;
    type IntoIter = Values<'a, EdgeKey, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.values()
    }
}
