//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{kind} 名称已存在: {name}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("节点不存在: {0}")]
    NodeNotFound(String),

    #[error("边不存在: {0}")]
    EdgeNotFound(String),

    #[error("子图不存在: {0}")]
    SubGraphNotFound(String),

    #[error("未找到: {0}")]
    NotFound(String),

    #[error("无效操作: {0}")]
    InvalidOperation(String),

    #[error("不支持的操作: {0}")]
    UnsupportedOperation(String),

    #[error("配置错误: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn duplicate_node(name: &str) -> Self {
        Error::DuplicateName {
            kind: "节点",
            name: name.to_string(),
        }
    }

    pub(crate) fn duplicate_subgraph(name: &str) -> Self {
        Error::DuplicateName {
            kind: "子图",
            name: name.to_string(),
        }
    }
}
