//! 整图算法模块
//!
//! 包含并集、不相交并集、转置、无向化和结构比较。
//! 所有算法只读取源图，结果写入目标图或新构造的图。

mod compare;
mod transform;
mod union;

pub use compare::GraphComparer;
