//! 图构造配置

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 图配置
///
/// 有向性在构造时确定，之后不可更改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// 是否为有向图
    pub directed: bool,
    /// 图名称（可选，不要求唯一）
    pub name: Option<String>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            directed: true,
            name: None,
        }
    }
}

impl GraphConfig {
    pub fn directed() -> Self {
        Self::default()
    }

    pub fn undirected() -> Self {
        Self {
            directed: false,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 从 JSON 解析配置，缺省字段取默认值
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(format!("解析图配置失败: {}", e)))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("序列化图配置失败: {}", e)))
    }
}
