use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 阅读内容相关错误（地址、动作校验）
    #[error("内容错误: {0}")]
    Content(#[from] ContentError),
    /// 编辑流程错误
    #[error("流程错误: {0}")]
    Workflow(#[from] WorkflowError),
    /// 持久化存储错误
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 阅读内容错误
///
/// 全部可恢复：出错时文档保持不变
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// 地址在当前文档中不存在
    #[error("单词地址不存在: {address}")]
    AddressNotFound { address: String },
    /// 地址字符串格式不符合 s{N}_w{M}
    #[error("无法解析单词地址: '{raw}'")]
    InvalidAddress { raw: String },
    /// 释义为空
    #[error("释义不能为空")]
    InvalidDefinition,
    /// 图片数量不是 3
    #[error("配图必须正好 3 张，实际 {count} 张")]
    InvalidImageCount { count: usize },
    /// 没有选择要隐藏的字母
    #[error("至少需要选择一个要隐藏的字母")]
    NoLettersSelected,
}

/// 编辑流程错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// 当前步骤的前置条件未满足
    #[error("无法离开步骤 {step}: {reason}")]
    PreconditionUnmet { step: String, reason: String },
    /// 已有提交正在进行
    #[error("已有提交正在进行中，请等待结果")]
    SubmissionInFlight,
    /// 存储端返回失败
    #[error("提交失败: {message}")]
    SubmissionFailed { message: String },
}

/// 持久化存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 网络请求失败
    #[error("请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 服务端返回错误响应
    #[error("服务端返回错误响应 ({endpoint}): code={code:?}, message={message:?}")]
    BadResponse {
        endpoint: String,
        code: Option<u64>,
        message: Option<String>,
    },
    /// 作业不存在
    #[error("作业不存在: {id}")]
    NotFound { id: String },
    /// 序列化失败
    #[error("JSON 序列化失败: {source}")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },
    /// 读取失败
    #[error("读取失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入失败
    #[error("写入失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 配置错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 配置值无效
    #[error("配置项 {name} 的值 '{value}' 无效: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Store(StoreError::Serialization { source: err })
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(), // TOML错误通常不包含路径信息
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err
            .url()
            .map(|url| url.to_string())
            .unwrap_or_default();
        StoreError::RequestFailed {
            endpoint,
            source: Box::new(err),
        }
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建前置条件未满足错误
    pub fn precondition_unmet(step: impl ToString, reason: impl Into<String>) -> Self {
        AppError::Workflow(WorkflowError::PreconditionUnmet {
            step: step.to_string(),
            reason: reason.into(),
        })
    }

    /// 是否为用户可修正的内容输入错误
    pub fn is_content_error(&self) -> bool {
        matches!(self, AppError::Content(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
