//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量草稿处理器
//! - 管理应用生命周期（初始化、运行）
//! - 批量加载草稿（Vec<DraftFile>）
//! - 控制并发数量（Semaphore）
//! - 持有存储后端（AnyStore）
//! - 输出全局统计信息
//!
//! ### `draft_processor` - 单个草稿处理器
//! - 驱动一个 AuthoringSession 走完全部步骤
//! - 逐条挂载单词动作
//! - 提交作业，失败写入 warn.txt
//! - 输出单个草稿的统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<DraftFile>)
//!     ↓
//! draft_processor (处理单个 DraftFile)
//!     ↓
//! workflow::AuthoringSession (Title → ... → Review → 提交)
//!     ↓
//! services (能力层：分词 / 动作校验 / 乱序 / warn)
//!     ↓
//! infrastructure (基础设施：AssignmentStore)
//! ```

pub mod batch_processor;
pub mod draft_processor;

// 重新导出主要类型
pub use batch_processor::{App, ProcessingStats};
pub use draft_processor::{process_draft, ActionStats, DraftOutcome};
