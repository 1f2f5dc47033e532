//! JSON翻译工具库
//!
//! 提供JSON文件加载、保形树变换（每个字符串叶子经翻译函数替换）和回写功能
//! 模型网关基于 rust-bert 的 MarianMT 翻译管线

pub mod model;
pub mod utils;

// 重新导出主要类型
pub use model::data_core::{AppError, AppState};
pub use model::gateway::{marian_model_name, MarianGateway};
pub use model::shape::{shape_of, string_leaf_count, NodeKind, ShapeNode};
pub use model::transducer::transform;
