//! 关联索引
//!
//! 节点名称到关联边的内存索引，用于级联删除、度数和邻居查询

use crate::graph::edge::EdgeKey;
use indexmap::IndexSet;
use std::collections::HashMap;

/// 关联索引
///
/// 按边的存储方向记录：`outgoing[source]` 与 `incoming[target]`。
/// 无向图同样按首次插入时的方向记录，查询关联边时两侧合并。
#[derive(Debug, Clone, Default)]
pub struct IncidenceIndex {
    /// 源节点到出边的映射
    outgoing: HashMap<String, IndexSet<EdgeKey>>,
    /// 目标节点到入边的映射
    incoming: HashMap<String, IndexSet<EdgeKey>>,
}

impl IncidenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加边
    pub fn add_edge(&mut self, key: &EdgeKey, source: &str, target: &str) {
        self.outgoing
            .entry(source.to_string())
            .or_default()
            .insert(key.clone());
        self.incoming
            .entry(target.to_string())
            .or_default()
            .insert(key.clone());
    }

    /// 移除边
    pub fn remove_edge(&mut self, key: &EdgeKey, source: &str, target: &str) {
        if let Some(keys) = self.outgoing.get_mut(source) {
            keys.shift_remove(key);
            if keys.is_empty() {
                self.outgoing.remove(source);
            }
        }
        if let Some(keys) = self.incoming.get_mut(target) {
            keys.shift_remove(key);
            if keys.is_empty() {
                self.incoming.remove(target);
            }
        }
    }

    pub fn clear(&mut self) {
        self.outgoing.clear();
        self.incoming.clear();
    }

    /// 获取节点的出边
    pub fn outgoing(&self, name: &str) -> impl Iterator<Item = &EdgeKey> {
        self.outgoing.get(name).into_iter().flatten()
    }

    /// 获取节点的入边
    pub fn incoming(&self, name: &str) -> impl Iterator<Item = &EdgeKey> {
        self.incoming.get(name).into_iter().flatten()
    }

    /// 获取节点的全部关联边（自环只出现一次）
    pub fn incident(&self, name: &str) -> Vec<EdgeKey> {
        let mut keys: IndexSet<EdgeKey> = self.outgoing(name).cloned().collect();
        keys.extend(self.incoming(name).cloned());
        keys.into_iter().collect()
    }

    pub fn out_degree(&self, name: &str) -> usize {
        self.outgoing.get(name).map_or(0, IndexSet::len)
    }

    pub fn in_degree(&self, name: &str) -> usize {
        self.incoming.get(name).map_or(0, IndexSet::len)
    }
}
