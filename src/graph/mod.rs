//! 图核心模块
//!
//! 定义节点、边、子图和图的核心数据结构

mod edge;
mod graph;
mod index;
mod node;
mod subgraph;

pub use edge::{Edge, EdgeCollection, EdgeKey, EdgeKind};
pub use graph::{EdgesMut, Graph, NodesMut, SubGraphMut, SubGraphsMut};
pub use index::IncidenceIndex;
pub use node::{Node, NodeCollection};
pub use subgraph::{SubGraph, SubGraphCollection};
