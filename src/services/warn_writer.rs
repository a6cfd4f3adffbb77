//! 警告写入服务 - 业务能力层
//!
//! 只负责"写 warn.txt"能力，不关心流程

use crate::error::{AppResult, FileError};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// 警告写入服务
///
/// 职责：
/// - 将无法完成的草稿写入 warn.txt
/// - 只处理单个草稿的警告
/// - 不关心流程顺序
#[derive(Debug, Clone)]
pub struct WarnWriter {
    warn_file_path: String,
}

impl WarnWriter {
    /// 创建新的警告写入服务
    pub fn new() -> Self {
        Self {
            warn_file_path: "warn.txt".to_string(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    /// 写入警告信息
    ///
    /// # 参数
    /// - `draft_name`: 草稿名称
    /// - `step`: 停留的步骤
    /// - `reason`: 失败原因
    pub async fn write(&self, draft_name: &str, step: &str, reason: &str) -> AppResult<()> {
        debug!("写入警告: 草稿 {} | 步骤 {} | {}", draft_name, step, reason);

        let warn_msg = format!("草稿 {} | 步骤 {} | 原因: {}\n", draft_name, step, reason);

        let write_failed = |e: std::io::Error| FileError::WriteFailed {
            path: self.warn_file_path.clone(),
            source: Box::new(e),
        };

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.warn_file_path)
            .await
            .map_err(write_failed)?;

        file.write_all(warn_msg.as_bytes())
            .await
            .map_err(write_failed)?;

        Ok(())
    }
}

impl Default for WarnWriter {
    fn default() -> Self {
        Self::new()
    }
}
