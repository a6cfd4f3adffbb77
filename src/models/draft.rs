use serde::{Deserialize, Serialize};

use crate::models::action::ActionDraft;
use crate::models::assignment::AssignmentMetadata;

/// 草稿文件（TOML）
///
/// ```toml
/// title = "The Cat"
/// paragraph = "The cat sat. It was happy!"
///
/// [metadata]
/// tools = ["pencil"]
///
/// [[actions]]
/// address = "s0_w1"
/// type = "define"
/// definition = "a small domesticated carnivorous mammal"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftFile {
    pub title: String,
    pub paragraph: String,
    #[serde(default)]
    pub metadata: AssignmentMetadata,
    #[serde(default)]
    pub actions: Vec<DraftActionEntry>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl DraftFile {
    /// 用于日志显示的名称，优先文件名
    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(|p| std::path::Path::new(p).file_name())
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.title.clone())
    }

    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}

/// 草稿中的一条单词动作
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftActionEntry {
    /// `s{N}_w{M}`，在处理时解析
    pub address: String,
    #[serde(flatten)]
    pub action: ActionDraft,
}
