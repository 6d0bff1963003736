//! 节点定义
//!
//! 节点以名称为身份，名称在所属图内唯一。

use crate::error::{Error, Result};
use crate::types::UserData;
use indexmap::map::Values;
use indexmap::IndexMap;

/// 节点
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// 节点名称
    name: String,
    /// 用户数据
    user_data: UserData,
}

impl Node {
    /// 创建新节点
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            user_data: UserData::new(),
        }
    }

    /// 创建带用户数据的节点
    pub fn with_user_data(name: impl Into<String>, user_data: UserData) -> Self {
        Self {
            name: name.into(),
            user_data,
        }
    }

    /// 获取节点名称
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user_data(&self) -> &UserData {
        &self.user_data
    }

    pub fn user_data_mut(&mut self) -> &mut UserData {
        &mut self.user_data
    }
}

/// 节点集合
///
/// 按插入顺序迭代。删除节点会级联到边和子图，因此删除只能经由
/// [`Graph::nodes_mut`](crate::graph::Graph::nodes_mut) 进行。
#[derive(Debug, Clone, Default)]
pub struct NodeCollection {
    nodes: IndexMap<String, Node>,
}

impl NodeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按名称创建并插入节点
    pub(crate) fn add(&mut self, name: &str) -> Result<&mut Node> {
        self.add_node(Node::new(name))
    }

    /// 插入已构造的节点；名称冲突时失败
    pub(crate) fn add_node(&mut self, node: Node) -> Result<&mut Node> {
        if self.nodes.contains_key(node.name()) {
            return Err(Error::duplicate_node(node.name()));
        }
        let entry = self.nodes.entry(node.name.clone());
        Ok(entry.or_insert(node))
    }

    /// 获取同名节点，不存在时创建。返回值的第二项表示是否新建。
    pub(crate) fn get_or_insert(&mut self, name: &str) -> (&mut Node, bool) {
        let inserted = !self.nodes.contains_key(name);
        let node = self
            .nodes
            .entry(name.to_string())
            .or_insert_with(|| Node::new(name));
        (node, inserted)
    }

    /// 不做级联地移除节点
    pub(crate) fn take(&mut self, name: &str) -> Option<Node> {
        self.nodes.shift_remove(name)
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.nodes.get_mut(name)
    }

    /// 按名称索引节点，不存在时返回 `NodeNotFound`
    pub fn node(&self, name: &str) -> Result<&Node> {
        self.nodes
            .get(name)
            .ok_or_else(|| Error::NodeNotFound(name.to_string()))
    }

    /// 节点在插入顺序中的位置
    pub fn position(&self, name: &str) -> Option<usize> {
        self.nodes.get_index_of(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> Values<'_, String, Node> {
        self.nodes.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a NodeCollection {
    type Item = &'a Node;
    type IntoIter = Values<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.values()
    }
}
