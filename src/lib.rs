//! # Reading Assignment
//!
//! 一个用于编辑阅读作业的 Rust 应用程序：老师输入一段英文短文，
//! 为其中的单词配置释义排序、看图选词、填字母练习，然后提交保存。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有存储资源，只暴露能力
//! - `AssignmentStore` - 作业保存/读取接口
//! - `JsonFileStore` / `HttpAssignmentStore` - 本地 JSON 与远端 API 两种实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程顺序
//! - `Tokenizer` - 段落分句分词
//! - `ContentBuilder` - 单词动作校验与挂载
//! - `randomizer` - 释义乱序、单词遮挡
//! - `exercise` - 学生端练习视图与判题
//! - `WarnWriter` - 写 warn.txt 能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份作业"的编辑流程
//! - `AuthoringStep` - Title → Paragraph → Actions → Metadata → Review
//! - `AuthoringSession` - 步骤门槛、草稿状态、提交
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量草稿处理器，管理存储和并发
//! - `orchestrator/draft_processor` - 单个草稿处理器，驱动一次编辑会话
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{AnyStore, AssignmentStore, HttpAssignmentStore, JsonFileStore};
pub use models::{ActionDraft, AssignmentPayload, ContentDocument, DraftFile, WordAction, WordAddress};
pub use orchestrator::{process_draft, App, ProcessingStats};
pub use services::ContentBuilder;
pub use workflow::{AuthoringSession, AuthoringStep, DraftCtx};
