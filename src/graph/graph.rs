//! 图数据结构
//!
//! 由节点集合、边集合和子图集合组成的可寻址单元

use super::edge::{Edge, EdgeCollection, EdgeKey, EdgeKind};
use super::node::{Node, NodeCollection};
use super::subgraph::{SubGraph, SubGraphCollection};
use crate::algorithm::GraphComparer;
use crate::config::GraphConfig;
use crate::error::{Error, Result};
use crate::types::UserData;
use indexmap::IndexSet;
use std::fmt;

/// 图
///
/// 有向性在构造时确定。每条边的两个端点都必须是本图节点集合中的成员；
/// 删除节点会先移除子图引用和关联边，再移除节点本身。
pub struct Graph {
    /// 图名称（可选）
    pub(crate) name: Option<String>,
    /// 边身份策略
    pub(crate) kind: EdgeKind,
    /// 节点集合
    pub(crate) nodes: NodeCollection,
    /// 边集合
    pub(crate) edges: EdgeCollection,
    /// 子图集合
    pub(crate) subgraphs: SubGraphCollection,
    /// 用户数据
    pub(crate) user_data: UserData,
}

impl Graph {
    /// 创建空图
    pub fn new(directed: bool) -> Self {
        let kind = EdgeKind::from_directed(directed);
        Self {
            name: None,
            kind,
            nodes: NodeCollection::new(),
            edges: EdgeCollection::new(kind),
            subgraphs: SubGraphCollection::new(kind),
            user_data: UserData::new(),
        }
    }

    /// 创建空的有向图
    pub fn directed() -> Self {
        Self::new(true)
    }

    /// 创建空的无向图
    pub fn undirected() -> Self {
        Self::new(false)
    }

    /// 按配置创建图
    pub fn with_config(config: &GraphConfig) -> Self {
        let mut graph = Self::new(config.directed);
        graph.name = config.name.clone();
        graph
    }

    pub fn is_directed(&self) -> bool {
        self.kind.is_directed()
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn nodes(&self) -> &NodeCollection {
        &self.nodes
    }

    pub fn edges(&self) -> &EdgeCollection {
        &self.edges
    }

    pub fn subgraphs(&self) -> &SubGraphCollection {
        &self.subgraphs
    }

    pub fn user_data(&self) -> &UserData {
        &self.user_data
    }

    pub fn user_data_mut(&mut self) -> &mut UserData {
        &mut self.user_data
    }

    /// 节点集合的可变句柄
    pub fn nodes_mut(&mut self) -> NodesMut<'_> {
        NodesMut { graph: self }
    }

    /// 边集合的可变句柄
    pub fn edges_mut(&mut self) -> EdgesMut<'_> {
        EdgesMut { graph: self }
    }

    /// 子图集合的可变句柄
    pub fn subgraphs_mut(&mut self) -> SubGraphsMut<'_> {
        SubGraphsMut { graph: self }
    }

    /// 获取节点数量
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ==================== 邻接查询 ====================

    /// 节点的全部关联边
    pub fn incident_edges(&self, name: &str) -> Result<Vec<&Edge>> {
        self.nodes.node(name)?;
        Ok(self.edges.incident(name).collect())
    }

    /// 获取节点的出度。无向图中等于度数。
    pub fn out_degree(&self, name: &str) -> Result<usize> {
        self.nodes.node(name)?;
        Ok(match self.kind {
            EdgeKind::Directed => self.edges.index().out_degree(name),
            EdgeKind::Undirected => self.edges.incident_keys(name).len(),
        })
    }

    /// 获取节点的入度。无向图中等于度数。
    pub fn in_degree(&self, name: &str) -> Result<usize> {
        self.nodes.node(name)?;
        Ok(match self.kind {
            EdgeKind::Directed => self.edges.index().in_degree(name),
            EdgeKind::Undirected => self.edges.incident_keys(name).len(),
        })
    }

    /// 获取节点的关联边数量（自环计一次）
    pub fn degree(&self, name: &str) -> Result<usize> {
        self.nodes.node(name)?;
        Ok(self.edges.incident_keys(name).len())
    }

    /// 获取后继节点（出边指向的节点）
    pub fn successors(&self, name: &str) -> Result<Vec<&str>> {
        if !self.is_directed() {
            return self.neighbors(name);
        }
        self.nodes.node(name)?;
        Ok(self
            .edges
            .index()
            .outgoing(name)
            .filter_map(|key| self.edges.get_by_key(key))
            .map(Edge::target)
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect())
    }

    /// 获取前驱节点（入边来源的节点）
    pub fn predecessors(&self, name: &str) -> Result<Vec<&str>> {
        if !self.is_directed() {
            return self.neighbors(name);
        }
        self.nodes.node(name)?;
        Ok(self
            .edges
            .index()
            .incoming(name)
            .filter_map(|key| self.edges.get_by_key(key))
            .map(Edge::source)
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect())
    }

    /// 获取邻居节点（不区分方向）
    pub fn neighbors(&self, name: &str) -> Result<Vec<&str>> {
        self.nodes.node(name)?;
        Ok(self
            .edges
            .incident(name)
            .filter_map(|edge| edge.other(name))
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect())
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::directed()
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("name", &self.name)
            .field("directed", &self.is_directed())
            .field("node_count", &self.nodes.len())
            .field("edge_count", &self.edges.len())
            .field("subgraph_count", &self.subgraphs.len())
            .finish()
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        GraphComparer::new().equals(self, other)
    }
}

impl Eq for Graph {}

// ==================== 节点句柄 ====================

/// 节点集合的可变句柄，删除时级联到边和子图
pub struct NodesMut<'g> {
    graph: &'g mut Graph,
}

impl NodesMut<'_> {
    /// 按名称添加节点，名称已存在时返回 `DuplicateName`
    pub fn add(&mut self, name: &str) -> Result<&mut Node> {
        let node = self.graph.nodes.add(name)?;
        tracing::debug!(node = name, "node added");
        Ok(node)
    }

    /// 添加已构造的节点，名称已存在时返回 `DuplicateName`
    pub fn add_node(&mut self, node: Node) -> Result<&mut Node> {
        let node = self.graph.nodes.add_node(node)?;
        tracing::debug!(node = node.name(), "node added");
        Ok(node)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.graph.nodes.contains(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.graph.nodes.get_mut(name)
    }

    /// 获取同名节点，不存在时创建（合并语义）
    pub fn get_or_add(&mut self, name: &str) -> &mut Node {
        let (node, inserted) = self.graph.nodes.get_or_insert(name);
        if inserted {
            tracing::debug!(node = name, "node added");
        }
        node
    }

    /// 按名称索引可变节点，不存在时返回 `NodeNotFound`
    pub fn node_mut(&mut self, name: &str) -> Result<&mut Node> {
        self.graph
            .nodes
            .get_mut(name)
            .ok_or_else(|| Error::NodeNotFound(name.to_string()))
    }

    /// 删除节点及其全部关联边，并从所有子图中移除引用。
    ///
    /// 先收集关联边，再依次清理子图引用、边、节点；整个过程不会失败，
    /// 因此不会留下指向已删除节点的边。
    pub fn remove(&mut self, name: &str) -> bool {
        let graph = &mut *self.graph;
        if !graph.nodes.contains(name) {
            return false;
        }

        let incident = graph.edges.incident_keys(name);
        let mut dropped_refs = 0;
        for key in &incident {
            dropped_refs += graph.subgraphs.forget_edge(key);
        }
        dropped_refs += graph.subgraphs.forget_node(name);

        for key in &incident {
            graph.edges.take(key);
        }
        graph.nodes.take(name);

        tracing::debug!(
            node = name,
            edges = incident.len(),
            subgraph_refs = dropped_refs,
            "node removed"
        );
        true
    }

    /// 清空节点（同时清空边和子图引用，子图本身保留）
    pub fn clear(&mut self) {
        let graph = &mut *self.graph;
        let keys: Vec<EdgeKey> = graph.edges.keys().cloned().collect();
        for key in &keys {
            graph.subgraphs.forget_edge(key);
        }
        let names: Vec<String> = graph.nodes.names().map(str::to_string).collect();
        for name in &names {
            graph.subgraphs.forget_node(name);
        }
        graph.edges.clear();
        graph.nodes.clear();
        tracing::debug!(nodes = names.len(), edges = keys.len(), "nodes cleared");
    }
}

// ==================== 边句柄 ====================

/// 边集合的可变句柄，添加时校验端点
pub struct EdgesMut<'g> {
    graph: &'g mut Graph,
}

impl EdgesMut<'_> {
    fn check_endpoints(&self, source: &str, target: &str) -> Result<()> {
        for name in [source, target] {
            if !self.graph.nodes.contains(name) {
                return Err(Error::NodeNotFound(name.to_string()));
            }
        }
        Ok(())
    }

    /// 添加边；任一端点不存在时返回 `NodeNotFound` 且图不变。
    /// 同一身份的边已存在时返回已有的边。
    pub fn add(&mut self, source: &str, target: &str) -> Result<&mut Edge> {
        self.check_endpoints(source, target)?;
        let (edge, inserted) = self.graph.edges.insert(source, target);
        if inserted {
            tracing::debug!(source, target, "edge added");
        }
        Ok(edge)
    }

    /// 添加已构造的边；已存在时把用户数据合并进已有边
    pub fn add_edge(&mut self, edge: Edge) -> Result<&mut Edge> {
        self.check_endpoints(edge.source(), edge.target())?;
        let (edge, inserted) = self.graph.edges.insert_edge(edge);
        if inserted {
            tracing::debug!(source = edge.source(), target = edge.target(), "edge added");
        }
        Ok(edge)
    }

    pub fn contains(&self, source: &str, target: &str) -> bool {
        self.graph.edges.contains(source, target)
    }

    pub fn get_mut(&mut self, source: &str, target: &str) -> Option<&mut Edge> {
        self.graph.edges.get_mut(source, target)
    }

    /// 按端点索引可变边，不存在时返回 `EdgeNotFound`
    pub fn edge_mut(&mut self, source: &str, target: &str) -> Result<&mut Edge> {
        let key = self.graph.edges.key(source, target);
        self.graph
            .edges
            .get_mut(source, target)
            .ok_or_else(|| Error::EdgeNotFound(key.to_string()))
    }

    /// 删除边，并从所有子图中移除引用
    pub fn remove(&mut self, source: &str, target: &str) -> bool {
        let graph = &mut *self.graph;
        let key = graph.edges.key(source, target);
        if !graph.edges.contains_key(&key) {
            return false;
        }
        let dropped_refs = graph.subgraphs.forget_edge(&key);
        graph.edges.take(&key);
        tracing::debug!(edge = %key, subgraph_refs = dropped_refs, "edge removed");
        true
    }

    /// 清空全部边
    pub fn clear(&mut self) {
        let graph = &mut *self.graph;
        let keys: Vec<EdgeKey> = graph.edges.keys().cloned().collect();
        for key in &keys {
            graph.subgraphs.forget_edge(key);
        }
        graph.edges.clear();
        tracing::debug!(edges = keys.len(), "edges cleared");
    }
}

// ==================== 子图句柄 ====================

/// 子图集合的可变句柄
pub struct SubGraphsMut<'g> {
    graph: &'g mut Graph,
}

impl SubGraphsMut<'_> {
    /// 创建空子图，名称已存在时返回 `DuplicateName`
    pub fn add(&mut self, name: &str) -> Result<SubGraphMut<'_>> {
        let graph = &mut *self.graph;
        let subgraph = graph.subgraphs.add(name)?;
        tracing::debug!(subgraph = name, "subgraph added");
        Ok(SubGraphMut {
            subgraph,
            nodes: &graph.nodes,
            edges: &graph.edges,
        })
    }

    /// 按名称获取子图的可变视图，不存在时返回 `SubGraphNotFound`
    pub fn get(&mut self, name: &str) -> Result<SubGraphMut<'_>> {
        let graph = &mut *self.graph;
        let subgraph = graph
            .subgraphs
            .get_mut(name)
            .ok_or_else(|| Error::SubGraphNotFound(name.to_string()))?;
        Ok(SubGraphMut {
            subgraph,
            nodes: &graph.nodes,
            edges: &graph.edges,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.graph.subgraphs.contains(name)
    }

    /// 删除子图（节点和边保留在父图中）
    pub fn remove(&mut self, name: &str) -> bool {
        let removed = self.graph.subgraphs.remove(name).is_some();
        if removed {
            tracing::debug!(subgraph = name, "subgraph removed");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.graph.subgraphs.clear();
    }
}

/// 单个子图的可变视图；添加的引用必须存在于父图中
pub struct SubGraphMut<'a> {
    subgraph: &'a mut SubGraph,
    nodes: &'a NodeCollection,
    edges: &'a EdgeCollection,
}

impl SubGraphMut<'_> {
    pub fn name(&self) -> &str {
        self.subgraph.name()
    }

    /// 只读视图
    pub fn view(&self) -> &SubGraph {
        &*self.subgraph
    }

    /// 引用父图中的节点；父图不存在该节点时返回 `NotFound`。
    /// 返回引用是否为新加入。
    pub fn add_node(&mut self, name: &str) -> Result<bool> {
        if !self.nodes.contains(name) {
            return Err(Error::NotFound(format!("父图中没有节点 {}", name)));
        }
        Ok(self.subgraph.insert_node(name))
    }

    /// 引用父图中的边；父图不存在该边时返回 `NotFound`。
    pub fn add_edge(&mut self, source: &str, target: &str) -> Result<bool> {
        let key = self.edges.key(source, target);
        if !self.edges.contains_key(&key) {
            return Err(Error::NotFound(format!("父图中没有边 {}", key)));
        }
        Ok(self.subgraph.insert_edge(key))
    }

    pub fn remove_node(&mut self, name: &str) -> bool {
        self.subgraph.drop_node(name)
    }

    pub fn remove_edge(&mut self, source: &str, target: &str) -> bool {
        let key = self.edges.key(source, target);
        self.subgraph.drop_edge(&key)
    }

    pub fn user_data_mut(&mut self) -> &mut UserData {
        self.subgraph.user_data_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PropertyValue;

    fn path_xyz() -> Graph {
        let mut graph = Graph::directed();
        let mut nodes = graph.nodes_mut();
        for name in ["x", "y", "z"] {
            nodes.add(name).unwrap();
        }
        let mut edges = graph.edges_mut();
        edges.add("x", "y").unwrap();
        edges.add("y", "z").unwrap();
        graph
    }

    #[test]
    fn test_graph_basic() {
        let graph = path_xyz();

        assert!(graph.is_directed());
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.edges().contains("x", "y"));
        assert!(!graph.edges().contains("y", "x"));
        assert_eq!(graph.successors("y").unwrap(), vec!["z"]);
        assert_eq!(graph.predecessors("y").unwrap(), vec!["x"]);
        assert_eq!(graph.neighbors("y").unwrap(), vec!["z", "x"]);
    }

    #[test]
    fn test_graph_degrees() {
        let mut graph = path_xyz();
        graph.edges_mut().add("x", "z").unwrap();

        assert_eq!(graph.out_degree("x").unwrap(), 2);
        assert_eq!(graph.in_degree("z").unwrap(), 2);
        assert_eq!(graph.degree("y").unwrap(), 2);
        assert!(matches!(graph.degree("q"), Err(Error::NodeNotFound(_))));
    }

    #[test]
    fn test_remove_node_cascades_edges() {
        let mut graph = path_xyz();

        assert!(graph.nodes_mut().remove("y"));
        assert!(!graph.nodes_mut().remove("y"));

        let names: Vec<&str> = graph.nodes().names().collect();
        assert_eq!(names, vec!["x", "z"]);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.degree("x").unwrap(), 0);
    }

    #[test]
    fn test_add_edge_with_missing_endpoint_leaves_graph_unchanged() {
        let mut graph = path_xyz();

        let err = graph.edges_mut().add("x", "missing").unwrap_err();
        assert_eq!(err, Error::NodeNotFound("missing".to_string()));
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(!graph.nodes().contains("missing"));
    }

    #[test]
    fn test_add_edge_object_with_missing_endpoint_leaves_graph_unchanged() {
        let mut graph = path_xyz();
        let mut edge = Edge::new("ghost", "x");
        edge.user_data_mut().insert("w", 1i64);

        let err = graph.edges_mut().add_edge(edge).unwrap_err();
        assert_eq!(err, Error::NodeNotFound("ghost".to_string()));
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.degree("x").unwrap(), 1);
        assert!(!graph.nodes().contains("ghost"));
    }

    #[test]
    fn test_add_node_object_rejects_duplicate() {
        let mut graph = path_xyz();
        graph
            .nodes_mut()
            .node_mut("x")
            .unwrap()
            .user_data_mut()
            .insert("label", "first");

        let mut node = Node::new("x");
        node.user_data_mut().insert("label", "second");
        let err = graph.nodes_mut().add_node(node).unwrap_err();

        assert!(matches!(err, Error::DuplicateName { ref name, .. } if name == "x"));
        assert_eq!(graph.node_count(), 3);
        assert_eq!(
            graph.nodes().node("x").unwrap().user_data().property("label"),
            Some(PropertyValue::from("first"))
        );
        assert!(graph.nodes_mut().add_node(Node::new("w")).is_ok());
        assert_eq!(graph.node_count(), 4);
    }

    #[test]
    fn test_undirected_node_removal_drops_edges_stored_in_reverse() {
        let mut graph = Graph::undirected();
        for name in ["a", "b", "c"] {
            graph.nodes_mut().add(name).unwrap();
        }
        // 存储方向为 (b, a)，删除 a 时需要从入边一侧找到它
        graph.edges_mut().add("b", "a").unwrap();
        graph.edges_mut().add("b", "c").unwrap();
        graph
            .subgraphs_mut()
            .add("cluster")
            .unwrap()
            .add_edge("a", "b")
            .unwrap();

        assert!(graph.nodes_mut().remove("a"));

        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.edges().contains("a", "b"));
        assert_eq!(graph.degree("b").unwrap(), 1);
        assert_eq!(graph.neighbors("b").unwrap(), vec!["c"]);
        assert_eq!(graph.subgraphs().subgraph("cluster").unwrap().edge_count(), 0);
    }

    #[test]
    fn test_undirected_key_lookups_ignore_endpoint_order() {
        let mut graph = Graph::undirected();
        graph.nodes_mut().add("a").unwrap();
        graph.nodes_mut().add("b").unwrap();
        graph.edges_mut().add("b", "a").unwrap();
        graph
            .subgraphs_mut()
            .add("cluster")
            .unwrap()
            .add_edge("a", "b")
            .unwrap();

        let reversed = EdgeKind::Directed.key("b", "a");
        assert!(graph.edges().contains("b", "a"));
        assert!(graph.edges().contains_key(&reversed));
        assert!(graph.edges().get_by_key(&reversed).is_some());

        let cluster = graph.subgraphs().subgraph("cluster").unwrap();
        assert!(cluster.contains_edge(&reversed));
        assert!(cluster.contains_edge(&graph.edges().key("a", "b")));
    }

    #[test]
    fn test_undirected_edge_identity() {
        let mut graph = Graph::undirected();
        graph.nodes_mut().add("a").unwrap();
        graph.nodes_mut().add("b").unwrap();

        graph
            .edges_mut()
            .add("a", "b")
            .unwrap()
            .user_data_mut()
            .insert("w", 5i64);
        graph.edges_mut().add("b", "a").unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges().edge("b", "a").unwrap().user_data().len(), 1);
        assert_eq!(graph.out_degree("b").unwrap(), 1);
        assert_eq!(graph.successors("b").unwrap(), vec!["a"]);
        assert!(graph.edges_mut().remove("b", "a"));
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_subgraph_references_must_exist_in_parent() {
        let mut graph = path_xyz();
        let mut subgraphs = graph.subgraphs_mut();
        let mut cluster = subgraphs.add("cluster").unwrap();

        assert_eq!(cluster.add_node("x"), Ok(true));
        assert_eq!(cluster.add_node("x"), Ok(false));
        assert!(matches!(cluster.add_node("w"), Err(Error::NotFound(_))));
        assert_eq!(cluster.add_edge("x", "y"), Ok(true));
        assert!(matches!(cluster.add_edge("y", "x"), Err(Error::NotFound(_))));

        assert!(matches!(
            graph.subgraphs_mut().add("cluster"),
            Err(Error::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_node_removal_cascades_into_subgraphs() {
        let mut graph = path_xyz();
        {
            let mut subgraphs = graph.subgraphs_mut();
            let mut cluster = subgraphs.add("cluster").unwrap();
            cluster.add_node("x").unwrap();
            cluster.add_node("y").unwrap();
            cluster.add_edge("x", "y").unwrap();
            cluster.add_edge("y", "z").unwrap();
        }

        graph.nodes_mut().remove("y");

        let cluster = graph.subgraphs().subgraph("cluster").unwrap();
        assert_eq!(cluster.nodes().collect::<Vec<_>>(), vec!["x"]);
        assert_eq!(cluster.edge_count(), 0);
    }

    #[test]
    fn test_edge_removal_cascades_into_subgraphs() {
        let mut graph = path_xyz();
        graph
            .subgraphs_mut()
            .add("cluster")
            .unwrap()
            .add_edge("x", "y")
            .unwrap();

        assert!(graph.edges_mut().remove("x", "y"));
        assert!(!graph.edges_mut().remove("x", "y"));
        assert_eq!(graph.subgraphs().subgraph("cluster").unwrap().edge_count(), 0);
        assert!(graph.nodes().contains("x"));
    }

    #[test]
    fn test_clear_nodes_keeps_subgraphs_empty() {
        let mut graph = path_xyz();
        graph
            .subgraphs_mut()
            .add("cluster")
            .unwrap()
            .add_node("z")
            .unwrap();

        graph.nodes_mut().clear();

        assert!(graph.nodes().is_empty());
        assert!(graph.edges().is_empty());
        assert_eq!(graph.subgraphs().len(), 1);
        assert_eq!(graph.subgraphs().subgraph("cluster").unwrap().node_count(), 0);
    }

    #[test]
    fn test_with_config() {
        let config = GraphConfig::undirected().with_name("roads");
        let graph = Graph::with_config(&config);

        assert!(!graph.is_directed());
        assert_eq!(graph.name(), Some("roads"));
        assert!(Graph::default().is_directed());
    }
}
