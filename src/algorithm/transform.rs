//! 图变换：无向化与转置
//!
//! 两者都构造新图，源图保持不变。新图只复制节点名称和边结构，
//! 不复制用户数据和子图。

use crate::error::{Error, Result};
use crate::graph::{EdgeKind, Graph};

impl Graph {
    /// 构造对应的无向图。
    ///
    /// 有向边 (s, t) 与 (t, s) 合并为同一条无向边 {s, t}。
    #[tracing::instrument(skip_all, fields(nodes = self.node_count(), edges = self.edge_count()))]
    pub fn to_undirected(&self) -> Graph {
        let graph = self.skeleton(EdgeKind::Undirected, false);
        tracing::debug!(edges = graph.edge_count(), "undirected graph built");
        graph
    }

    /// 构造转置图：每条边的源与目标互换。只对有向图有效。
    #[tracing::instrument(skip_all, fields(nodes = self.node_count(), edges = self.edge_count()))]
    pub fn transpose(&self) -> Result<Graph> {
        if !self.is_directed() {
            return Err(Error::InvalidOperation(
                "只有有向图才能求转置".to_string(),
            ));
        }
        Ok(self.skeleton(EdgeKind::Directed, true))
    }

    /// 按给定身份策略复制节点和边结构
    fn skeleton(&self, kind: EdgeKind, reverse: bool) -> Graph {
        let mut graph = Graph::new(kind.is_directed());
        graph.name = self.name.clone();

        // 节点先于边插入，边的端点总能解析
        for node in self.nodes() {
            graph.nodes.get_or_insert(node.name());
        }
        for edge in self.edges() {
            if reverse {
                graph.edges.insert(edge.target(), edge.source());
            } else {
                graph.edges.insert(edge.source(), edge.target());
            }
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directed(nodes: &[&str], edges: &[(&str, &str)]) -> Graph {
        let mut graph = Graph::directed();
        for name in nodes {
            graph.nodes_mut().add(name).unwrap();
        }
        for (source, target) in edges {
            graph.edges_mut().add(source, target).unwrap();
        }
        graph
    }

    #[test]
    fn test_transpose_reverses_edges() {
        let graph = directed(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let transposed = graph.transpose().unwrap();

        assert!(transposed.is_directed());
        assert_eq!(
            transposed.nodes().names().collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
        assert!(transposed.edges().contains("b", "a"));
        assert!(transposed.edges().contains("c", "b"));
        assert!(!transposed.edges().contains("a", "b"));
        assert!(graph.edges().contains("a", "b"));
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        let graph = directed(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "c")]);
        assert_eq!(graph.transpose().unwrap().transpose().unwrap(), graph);
    }

    #[test]
    fn test_transpose_undirected_fails() {
        let graph = Graph::undirected();
        assert!(matches!(
            graph.transpose(),
            Err(Error::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_to_undirected_collapses_antiparallel_edges() {
        let graph = directed(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "a"), ("b", "c")],
        );
        let undirected = graph.to_undirected();

        assert!(!undirected.is_directed());
        assert_eq!(undirected.node_count(), 4);
        assert_eq!(undirected.edge_count(), 2);
        assert!(undirected.edges().contains("c", "b"));
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_transforms_skip_user_data() {
        let mut graph = directed(&["a", "b"], &[("a", "b")]);
        graph.set_name(Some("g".to_string()));
        graph
            .nodes_mut()
            .node_mut("a")
            .unwrap()
            .user_data_mut()
            .insert("k", 1i64);

        let undirected = graph.to_undirected();
        assert_eq!(undirected.name(), Some("g"));
        assert!(undirected.nodes().node("a").unwrap().user_data().is_empty());
    }
}
