//! 作业 API 客户端 - 基础设施层
//!
//! 封装与远端作业服务的交互，只负责保存/读取，不处理流程

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::StoreError;
use crate::infrastructure::AssignmentStore;
use crate::models::{AssignmentPayload, StoredAssignment};

/// 远端作业存储
#[derive(Debug, Clone)]
pub struct HttpAssignmentStore {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpAssignmentStore {
    /// 创建新的作业 API 客户端
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// 检查响应是否成功
    pub fn is_success_response(result: &Value) -> bool {
        result.get("code").and_then(|v| v.as_u64()) == Some(200)
    }

    /// 把非 200 的响应转换为错误
    fn check_response(endpoint: &str, result: &Value) -> Result<(), StoreError> {
        if Self::is_success_response(result) {
            return Ok(());
        }
        Err(StoreError::BadResponse {
            endpoint: endpoint.to_string(),
            code: result.get("code").and_then(|v| v.as_u64()),
            message: result
                .get("message")
                .and_then(|v| v.as_str())
                .map(String::from),
        })
    }

    /// 从响应中取出作业 id，兼容字符串和数字
    fn extract_id(endpoint: &str, result: &Value) -> Result<String, StoreError> {
        match result.pointer("/data/id") {
            Some(Value::String(id)) => Ok(id.clone()),
            Some(Value::Number(id)) => Ok(id.to_string()),
            _ => Err(StoreError::BadResponse {
                endpoint: endpoint.to_string(),
                code: result.get("code").and_then(|v| v.as_u64()),
                message: Some("响应缺少 data.id".to_string()),
            }),
        }
    }
}

impl AssignmentStore for HttpAssignmentStore {
    async fn save(&self, payload: &AssignmentPayload) -> Result<StoredAssignment, StoreError> {
        let endpoint = self.endpoint("assignments");
        debug!("正在提交作业: {}", endpoint);

        let result: Value = self
            .client
            .post(&endpoint)
            .header("token", &self.token)
            .json(payload)
            .send()
            .await?
            .json()
            .await?;

        Self::check_response(&endpoint, &result)?;
        let id = Self::extract_id(&endpoint, &result)?;
        Ok(StoredAssignment { id })
    }

    async fn load(&self, id: &str) -> Result<AssignmentPayload, StoreError> {
        let endpoint = self.endpoint(&format!("assignments/{}", id));
        debug!("正在读取作业: {}", endpoint);

        let mut result: Value = self
            .client
            .get(&endpoint)
            .header("token", &self.token)
            .send()
            .await?
            .json()
            .await?;

        if result.get("code").and_then(|v| v.as_u64()) == Some(404) {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        Self::check_response(&endpoint, &result)?;

        let data = result
            .get_mut("data")
            .map(Value::take)
            .unwrap_or(Value::Null);
        serde_json::from_value(data).map_err(|source| StoreError::Serialization { source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_checks() {
        let endpoint = "http://localhost/assignments";
        assert!(HttpAssignmentStore::is_success_response(&json!({ "code": 200 })));
        assert!(!HttpAssignmentStore::is_success_response(&json!({ "code": 500 })));
        assert!(!HttpAssignmentStore::is_success_response(&json!({})));

        let err = HttpAssignmentStore::check_response(endpoint, &json!({ "code": 401, "message": "token 无效" }))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::BadResponse { code: Some(401), message: Some(ref m), .. } if m == "token 无效"
        ));
    }

    #[test]
    fn test_extract_id() {
        let endpoint = "http://localhost/assignments";
        assert_eq!(
            HttpAssignmentStore::extract_id(endpoint, &json!({ "code": 200, "data": { "id": "abc" } })).unwrap(),
            "abc"
        );
        assert_eq!(
            HttpAssignmentStore::extract_id(endpoint, &json!({ "code": 200, "data": { "id": 42 } })).unwrap(),
            "42"
        );
        assert!(HttpAssignmentStore::extract_id(endpoint, &json!({ "code": 200 })).is_err());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = Config {
            api_base_url: "https://api.example.com/v1/".to_string(),
            ..Config::default()
        };
        let store = HttpAssignmentStore::new(&config);
        assert_eq!(store.endpoint("assignments"), "https://api.example.com/v1/assignments");
    }
}
