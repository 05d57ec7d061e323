use std::fmt;
use std::error::Error as StdError;
use serde::{Serialize, Deserialize};

/// 客户端错误类型
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClientError {
    /// 内部错误
    Internal(String),
    /// 网络错误
    Network(String),
    /// 序列化错误
    Serialization(String),
    /// 配置错误
    Configuration(String),
    /// 调用顺序错误（初始化状态不符）
    InvalidState(String),
    /// 推送后端返回的失败
    Backend { status: u16, message: String },
    /// 超时错误
    Timeout(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ClientError::Network(msg) => write!(f, "Network error: {}", msg),
            ClientError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            ClientError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            ClientError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            ClientError::Backend { status, message } => {
                write!(f, "Backend error: status={}, message={}", status, message)
            }
            ClientError::Timeout(msg) => write!(f, "Timeout error: {}", msg),
        }
    }
}

impl StdError for ClientError {}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<tokio::time::error::Elapsed> for ClientError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        ClientError::Timeout(err.to_string())
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, ClientError>;
