//! 草稿处理上下文
//!
//! 封装"我正在处理第几份草稿、来自哪个文件"这一信息

use std::fmt::Display;

/// 草稿处理上下文
#[derive(Debug, Clone)]
pub struct DraftCtx {
    /// 草稿索引（从1开始，仅用于日志显示）
    pub draft_index: usize,

    /// 草稿文件名
    pub draft_name: String,
}

impl DraftCtx {
    /// 创建新的草稿上下文
    pub fn new(draft_index: usize, draft_name: String) -> Self {
        Self {
            draft_index,
            draft_name,
        }
    }
}

impl Display for DraftCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[草稿 #{} {}]", self.draft_index, self.draft_name)
    }
}
