//! 图结构比较

use crate::error::{Error, Result};
use crate::graph::Graph;

/// 结构比较器
///
/// 两张图相等当且仅当有向性相同、节点名称集合相同、边身份集合相同。
/// 图名称、用户数据和子图不参与比较。
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphComparer;

impl GraphComparer {
    pub fn new() -> Self {
        Self
    }

    pub fn equals(&self, a: &Graph, b: &Graph) -> bool {
        if std::ptr::eq(a, b) {
            return true;
        }
        if a.kind() != b.kind()
            || a.node_count() != b.node_count()
            || a.edge_count() != b.edge_count()
        {
            return false;
        }
        a.nodes().names().all(|name| b.nodes().contains(name))
            && a.edges().keys().all(|key| b.edges().contains_key(key))
    }

    /// 图不支持哈希：总是返回 `UnsupportedOperation`。
    ///
    /// `Graph` 也没有实现 `Hash`，无法放入基于哈希的集合。
    pub fn hash(&self, graph: &Graph) -> Result<u64> {
        Err(Error::UnsupportedOperation(format!(
            "图不支持哈希 (节点 {}, 边 {})",
            graph.node_count(),
            graph.edge_count()
        )))
    }
}
