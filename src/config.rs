use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的草稿数量
    pub max_concurrent_drafts: usize,
    /// 草稿 TOML 文件存放目录
    pub draft_folder: String,
    /// 作业 JSON 输出目录（file 存储）
    pub output_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 处理失败的草稿记录文件
    pub warn_file: String,
    /// 存储后端：file / http
    pub store_backend: String,
    // --- 作业 API 配置 ---
    pub api_base_url: String,
    pub api_token: String,
    /// 填字母题面的占位符
    pub fill_placeholder: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_drafts: 8,
            draft_folder: "drafts".to_string(),
            output_folder: "assignments".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            warn_file: "warn.txt".to_string(),
            store_backend: "file".to_string(),
            api_base_url: "http://localhost:8080/api".to_string(),
            api_token: String::new(),
            fill_placeholder: '_',
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_drafts: std::env::var("MAX_CONCURRENT_DRAFTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_drafts),
            draft_folder: std::env::var("DRAFT_FOLDER").unwrap_or(default.draft_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            warn_file: std::env::var("WARN_FILE").unwrap_or(default.warn_file),
            store_backend: std::env::var("STORE_BACKEND").unwrap_or(default.store_backend),
            api_base_url: std::env::var("ASSIGNMENT_API_BASE_URL").unwrap_or(default.api_base_url),
            api_token: std::env::var("ASSIGNMENT_API_TOKEN").unwrap_or(default.api_token),
            fill_placeholder: std::env::var("FILL_PLACEHOLDER").ok().and_then(|v| v.parse().ok()).unwrap_or(default.fill_placeholder),
        }
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_drafts == 0 {
            return Err(ConfigError::InvalidValue {
                name: "MAX_CONCURRENT_DRAFTS".to_string(),
                value: "0".to_string(),
                reason: "并发数至少为 1".to_string(),
            });
        }

        match self.store_backend.as_str() {
            "file" => Ok(()),
            "http" if self.api_base_url.trim().is_empty() => Err(ConfigError::InvalidValue {
                name: "ASSIGNMENT_API_BASE_URL".to_string(),
                value: self.api_base_url.clone(),
                reason: "http 存储需要 API 地址".to_string(),
            }),
            "http" => Ok(()),
            other => Err(ConfigError::InvalidValue {
                name: "STORE_BACKEND".to_string(),
                value: other.to_string(),
                reason: "只支持 file 或 http".to_string(),
            }),
        }
    }
}
