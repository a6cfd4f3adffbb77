use serde::{Deserialize, Serialize};

use crate::models::content::ContentDocument;

/// 作业元数据，全部可选
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_encouragement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// 提交给持久化服务的作业数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPayload {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: ContentDocument,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_encouragement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl AssignmentPayload {
    pub fn new(title: impl Into<String>, content: ContentDocument, metadata: AssignmentMetadata) -> Self {
        Self {
            title: title.into(),
            description: metadata.description,
            content,
            tools: metadata.tools,
            duration_minutes: metadata.duration_minutes,
            parent_encouragement: metadata.parent_encouragement,
            due_date: metadata.due_date,
        }
    }
}

/// 持久化成功后的回执
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAssignment {
    pub id: String,
}
