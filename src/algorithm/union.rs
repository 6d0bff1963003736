//! 图并集
//!
//! 把另一张图的节点和边并入当前图。边的端点总是通过当前图自己的
//! 节点集合重新解析，当前图不会引用源图中的任何对象。

use crate::error::{Error, Result};
use crate::graph::Graph;

impl Graph {
    /// 两张图是否没有同名节点。
    ///
    /// 遍历较小的节点集合，在较大的集合中探测。
    pub fn is_disjoint_with(&self, other: &Graph) -> bool {
        let (smaller, larger) = if self.node_count() <= other.node_count() {
            (self, other)
        } else {
            (other, self)
        };
        !smaller
            .nodes()
            .names()
            .any(|name| larger.nodes().contains(name))
    }

    /// 把 `other` 的所有节点和边并入当前图。
    ///
    /// 同名节点合并为一个；同一身份的边合并为一条。`include_user_data`
    /// 为真时按引用浅拷贝用户数据，之后对共享值的修改两张图都可见。
    #[tracing::instrument(skip_all, fields(nodes = other.node_count(), edges = other.edge_count()))]
    pub fn union_with(&mut self, other: &Graph, include_user_data: bool) -> Result<()> {
        self.absorb(other, "", include_user_data)
    }

    /// 以 `prefix` 为前缀重命名 `other` 的节点后并入当前图。
    ///
    /// 任一前缀后的名称已在当前图中存在时返回 `DuplicateName`，且当前图保持不变。
    #[tracing::instrument(skip_all, fields(prefix = %prefix, nodes = other.node_count(), edges = other.edge_count()))]
    pub fn disjoint_union_with(
        &mut self,
        other: &Graph,
        prefix: &str,
        include_user_data: bool,
    ) -> Result<()> {
        if let Some(clash) = other
            .nodes()
            .names()
            .map(|name| format!("{}{}", prefix, name))
            .find(|name| self.nodes().contains(name))
        {
            return Err(Error::duplicate_node(&clash));
        }
        self.absorb(other, prefix, include_user_data)
    }

    fn absorb(&mut self, other: &Graph, prefix: &str, include_user_data: bool) -> Result<()> {
        let mut merged_nodes = 0usize;
        let mut nodes = self.nodes_mut();
        for other_node in other.nodes() {
            let name = format!("{}{}", prefix, other_node.name());
            if nodes.contains(&name) {
                merged_nodes += 1;
                tracing::trace!(node = %name, "node already present, merging");
            }
            let node = nodes.get_or_add(&name);
            if include_user_data {
                node.user_data_mut().extend_shared(other_node.user_data());
            }
        }

        let mut edges = self.edges_mut();
        for other_edge in other.edges() {
            let source = format!("{}{}", prefix, other_edge.source());
            let target = format!("{}{}", prefix, other_edge.target());
            let edge = edges.add(&source, &target)?;
            if include_user_data {
                edge.user_data_mut().extend_shared(other_edge.user_data());
            }
        }

        tracing::debug!(
            nodes = self.node_count(),
            edges = self.edge_count(),
            merged_nodes,
            "graph absorbed"
        );
        Ok(())
    }
}
