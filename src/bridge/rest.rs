use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::json;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info};
use url::Url;
use uuid::Uuid;

use crate::bridge::bridge_trait::NativeBridge;
use crate::bridge::method;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::events::EventBus;
use crate::types::{
    DeviceIds, DisplayType, IosSettings, LogVerbosity, NotificationEvent, OpenedResult, Payload,
};

/// 即发即弃调用队列的容量
const FORWARD_QUEUE_CAPACITY: usize = 256;

/// 跨边界调用信封
///
/// method 字段携带与原生插件逐字相同的方法名，args 为位置参数
#[derive(Debug, Clone, Serialize)]
struct CallEnvelope {
    id: String,
    method: &'static str,
    args: serde_json::Value,
}

impl CallEnvelope {
    fn new(method: &'static str, args: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            method,
            args,
        }
    }
}

/// REST Bridge（唯一的具体桥接实现）
///
/// 职责：
/// - 把每个方法调用封装成 {id, method, args} 信封，HTTP POST 给插件端点
/// - 即发即弃调用进入内存队列，由后台 Worker 排空，调用方不阻塞
/// - 异步单结果调用直接等待响应，后端失败原样返回给调用方
/// - 原生层投递进来的事件经事件总线广播给所有订阅者
pub struct RestBridge {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
    queue: mpsc::Sender<CallEnvelope>,
    events: EventBus,
}

impl RestBridge {
    /// 创建新的 REST Bridge 并启动转发 Worker
    ///
    /// 必须在 tokio 运行时内调用
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.rest_endpoint)
            .map_err(|e| ClientError::Configuration(format!("invalid endpoint: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let (sender, receiver) = mpsc::channel(FORWARD_QUEUE_CAPACITY);
        tokio::spawn(run_forward_worker(
            client.clone(),
            endpoint.clone(),
            config.rest_api_key.clone(),
            receiver,
        ));

        Ok(Self {
            client,
            endpoint,
            api_key: config.rest_api_key.clone(),
            queue: sender,
            events: EventBus::new(),
        })
    }

    /// 即发即弃：入队后立即返回
    fn enqueue(&self, method: &'static str, args: serde_json::Value) -> Result<()> {
        let call = CallEnvelope::new(method, args);
        debug!("[BRIDGE] Queueing call: method={}, id={}", call.method, call.id);
        self.queue
            .try_send(call)
            .map_err(|e| ClientError::Internal(format!("forward queue unavailable: {}", e)))
    }

    /// 异步单结果：直接等待后端响应
    async fn request(&self, method: &'static str, args: serde_json::Value) -> Result<serde_json::Value> {
        let call = CallEnvelope::new(method, args);
        debug!("[BRIDGE] Sending call: method={}, id={}", call.method, call.id);
        forward_call(&self.client, &self.endpoint, self.api_key.as_deref(), &call).await
    }

    /// 原生层投递一条收到的通知，返回送达的订阅者数量
    ///
    /// 宿主运行时的事件入口；事件不做校验，原样广播
    pub fn deliver_received(&self, event: NotificationEvent) -> usize {
        self.events.publish_received(event)
    }

    /// 原生层投递一条通知被打开的结果，返回送达的订阅者数量
    pub fn deliver_opened(&self, result: OpenedResult) -> usize {
        self.events.publish_opened(result)
    }
}

#[async_trait]
impl NativeBridge for RestBridge {
    fn start_init(&self, app_id: &str, google_project_number: Option<&str>) -> Result<()> {
        self.enqueue(method::START_INIT, json!([app_id, google_project_number]))
    }

    fn end_init(&self) -> Result<()> {
        self.enqueue(method::END_INIT, json!([]))
    }

    fn ios_settings(&self, settings: &IosSettings) -> Result<()> {
        self.enqueue(method::IOS_SETTINGS, json!([settings]))
    }

    fn in_focus_displaying(&self, display: DisplayType) -> Result<()> {
        self.enqueue(method::IN_FOCUS_DISPLAYING, json!([display]))
    }

    fn send_tag(&self, key: &str, value: &str) -> Result<()> {
        self.enqueue(method::SEND_TAG, json!([key, value]))
    }

    fn send_tags(&self, tags: &HashMap<String, String>) -> Result<()> {
        self.enqueue(method::SEND_TAGS, json!([tags]))
    }

    fn delete_tag(&self, key: &str) -> Result<()> {
        self.enqueue(method::DELETE_TAG, json!([key]))
    }

    fn delete_tags(&self, keys: &[String]) -> Result<()> {
        self.enqueue(method::DELETE_TAGS, json!([keys]))
    }

    fn register_for_push_notifications(&self) -> Result<()> {
        self.enqueue(method::REGISTER_FOR_PUSH_NOTIFICATIONS, json!([]))
    }

    fn enable_vibrate(&self, enable: bool) -> Result<()> {
        self.enqueue(method::ENABLE_VIBRATE, json!([enable]))
    }

    fn enable_sound(&self, enable: bool) -> Result<()> {
        self.enqueue(method::ENABLE_SOUND, json!([enable]))
    }

    fn set_subscription(&self, enable: bool) -> Result<()> {
        self.enqueue(method::SET_SUBSCRIPTION, json!([enable]))
    }

    fn prompt_location(&self) -> Result<()> {
        self.enqueue(method::PROMPT_LOCATION, json!([]))
    }

    fn sync_hashed_email(&self, email: &str) -> Result<()> {
        self.enqueue(method::SYNC_HASHED_EMAIL, json!([email]))
    }

    fn set_log_level(&self, verbosity: &LogVerbosity) -> Result<()> {
        self.enqueue(method::SET_LOG_LEVEL, json!([verbosity]))
    }

    async fn get_tags(&self) -> Result<HashMap<String, String>> {
        let value = self.request(method::GET_TAGS, json!([])).await?;
        let tags = serde_json::from_value(value)?;
        Ok(tags)
    }

    async fn get_ids(&self) -> Result<DeviceIds> {
        let value = self.request(method::GET_IDS, json!([])).await?;
        let ids = serde_json::from_value(value)?;
        Ok(ids)
    }

    async fn post_notification(&self, payload: &Payload) -> Result<serde_json::Value> {
        self.request(method::POST_NOTIFICATION, json!([payload])).await
    }

    fn subscribe_received(&self) -> broadcast::Receiver<NotificationEvent> {
        self.events.subscribe_received()
    }

    fn subscribe_opened(&self) -> broadcast::Receiver<OpenedResult> {
        self.events.subscribe_opened()
    }
}

/// 转发 Worker
///
/// 职责：
/// - 从内存队列接收调用信封
/// - 逐条 POST 到插件端点
/// - 失败只记录日志，即发即弃调用没有失败通道
async fn run_forward_worker(
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
    mut receiver: mpsc::Receiver<CallEnvelope>,
) {
    info!("[BRIDGE WORKER] Started");

    while let Some(call) = receiver.recv().await {
        match forward_call(&client, &endpoint, api_key.as_deref(), &call).await {
            Ok(_) => {
                debug!(
                    "[BRIDGE WORKER] Call forwarded: method={}, id={}",
                    call.method, call.id
                );
            }
            Err(e) => {
                error!(
                    "[BRIDGE WORKER] Failed to forward call: method={}, id={}, error={}",
                    call.method, call.id, e
                );
            }
        }
    }

    info!("[BRIDGE WORKER] Stopped");
}

async fn forward_call(
    client: &Client,
    endpoint: &Url,
    api_key: Option<&str>,
    call: &CallEnvelope,
) -> Result<serde_json::Value> {
    let mut request = client
        .post(endpoint.clone())
        .header("Content-Type", "application/json")
        .json(call);

    if let Some(key) = api_key {
        request = request.header("Authorization", format!("Basic {}", key));
    }

    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        let body = response.json().await?;
        Ok(body)
    } else {
        let error_text = response.text().await.unwrap_or_default();
        error!(
            "[BRIDGE] Call rejected: method={}, id={}, status={}, error={}",
            call.method, call.id, status, error_text
        );
        Err(ClientError::Backend {
            status: status.as_u16(),
            message: error_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_envelope_carries_verbatim_method_name() {
        let call = CallEnvelope::new(method::SEND_TAG, json!(["key", ""]));
        let value = serde_json::to_value(&call).unwrap();

        assert_eq!(value["method"], "sendTag");
        assert_eq!(value["args"], json!(["key", ""]));
        assert!(value["id"].as_str().is_some());
    }

    #[test]
    fn test_payload_args_serialized_unchanged() {
        let payload = Payload {
            included_segments: Some(vec!["All".to_string()]),
            contents: Some(std::collections::HashMap::from([(
                "en".to_string(),
                "Hello".to_string(),
            )])),
            ..Default::default()
        };
        let call = CallEnvelope::new(method::POST_NOTIFICATION, json!([payload]));
        let value = serde_json::to_value(&call).unwrap();

        assert_eq!(value["args"][0]["included_segments"], json!(["All"]));
        assert_eq!(value["args"][0]["contents"]["en"], "Hello");
    }
}
