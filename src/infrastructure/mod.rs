//! 基础设施层
//!
//! 持有外部资源（文件目录、HTTP 客户端），只暴露"保存/读取作业"的能力

pub mod assignment_store;
pub mod http_store;
pub mod json_file_store;

pub use assignment_store::{AnyStore, AssignmentStore};
pub use http_store::HttpAssignmentStore;
pub use json_file_store::JsonFileStore;
