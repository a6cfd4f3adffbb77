//! 作业存储接口 - 基础设施层

use std::future::Future;

use crate::config::Config;
use crate::error::{ConfigError, StoreError};
use crate::infrastructure::{HttpAssignmentStore, JsonFileStore};
use crate::models::{AssignmentPayload, StoredAssignment};

/// 作业持久化能力
///
/// 内容文档按原样保存，读取时不会重新分词
pub trait AssignmentStore: Send + Sync {
    /// 保存作业，返回存储端分配的 id
    fn save(
        &self,
        payload: &AssignmentPayload,
    ) -> impl Future<Output = Result<StoredAssignment, StoreError>> + Send;

    /// 按 id 读取作业
    fn load(&self, id: &str) -> impl Future<Output = Result<AssignmentPayload, StoreError>> + Send;
}

/// 根据配置选择的存储后端
#[derive(Debug, Clone)]
pub enum AnyStore {
    File(JsonFileStore),
    Http(HttpAssignmentStore),
}

impl AnyStore {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        match config.store_backend.as_str() {
            "http" => Ok(AnyStore::Http(HttpAssignmentStore::new(config))),
            _ => Ok(AnyStore::File(JsonFileStore::new(&config.output_folder))),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            AnyStore::File(_) => "file",
            AnyStore::Http(_) => "http",
        }
    }
}

impl AssignmentStore for AnyStore {
    async fn save(&self, payload: &AssignmentPayload) -> Result<StoredAssignment, StoreError> {
        match self {
            AnyStore::File(store) => store.save(payload).await,
            AnyStore::Http(store) => store.save(payload).await,
        }
    }

    async fn load(&self, id: &str) -> Result<AssignmentPayload, StoreError> {
        match self {
            AnyStore::File(store) => store.load(id).await,
            AnyStore::Http(store) => store.load(id).await,
        }
    }
}
