//! Rivers - 内存图数据结构库
//!
//! 以名称标识节点的有向/无向图，支持：
//! - 节点、边、子图三个集合之间的一致性维护（级联删除、端点校验）
//! - 有向图按有序点对、无向图按无序点对识别边
//! - 整图算法：并集、不相交并集、转置、无向化、结构比较

pub mod algorithm;
pub mod config;
pub mod error;
pub mod graph;
pub mod types;

// 重导出常用类型
pub use algorithm::GraphComparer;
pub use config::GraphConfig;
pub use error::{Error, Result};
pub use graph::{Edge, EdgeKey, EdgeKind, Graph, Node, SubGraph};
pub use types::{KeyPayload, PropertyValue, UserData, UserKey, UserPayload, UserValue};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
