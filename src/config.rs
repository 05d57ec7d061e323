use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// 客户端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// 推送服务分配的应用 ID
    pub app_id: String,
    /// Google 项目号（仅 Android GCM/FCM 推送需要）
    pub google_project_number: Option<String>,
    /// 插件端点 URL（桥接调用的转发目标）
    pub rest_endpoint: String,
    /// REST API Key（可选，随请求以 Basic 方式携带）
    pub rest_api_key: Option<String>,
    /// 单次请求超时时间（秒）
    pub request_timeout_secs: u64,
    /// 日志级别
    pub log_level: String,
    /// 日志格式：json / pretty / compact
    pub log_format: Option<String>,
    /// 日志文件目录（设置后按天滚动写入文件）
    pub log_file: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            google_project_number: None,
            rest_endpoint: "https://onesignal.com/api/v1".to_string(),
            rest_api_key: None,
            request_timeout_secs: 30,
            log_level: "info".to_string(),
            log_format: None,
            log_file: None,
        }
    }
}

impl ClientConfig {
    /// 创建指定应用的配置，其余字段取默认值
    pub fn for_app(app_id: &str) -> Self {
        Self {
            app_id: app_id.to_string(),
            ..Self::default()
        }
    }

    /// 从 TOML 配置文件加载，并应用环境变量覆盖
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("failed to read config file: {}", path.as_ref().display()))?;

        let mut config: ClientConfig =
            toml::from_str(&content).context("failed to parse config file")?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// 环境变量覆盖文件配置
    pub fn apply_env_overrides(&mut self) {
        if let Ok(app_id) = env::var("PUSHBRIDGE_APP_ID") {
            self.app_id = app_id;
        }
        if let Ok(endpoint) = env::var("PUSHBRIDGE_ENDPOINT") {
            self.rest_endpoint = endpoint;
        }
        if let Ok(api_key) = env::var("PUSHBRIDGE_API_KEY") {
            self.rest_api_key = Some(api_key);
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if self.app_id.is_empty() {
            anyhow::bail!("app_id is required");
        }
        Url::parse(&self.rest_endpoint)
            .with_context(|| format!("invalid rest_endpoint: {}", self.rest_endpoint))?;
        Ok(())
    }
}
