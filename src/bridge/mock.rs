use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use tokio::sync::broadcast;
use tracing::info;
use uuid::Uuid;

use crate::bridge::bridge_trait::NativeBridge;
use crate::bridge::method;
use crate::error::{ClientError, Result};
use crate::events::EventBus;
use crate::types::{
    DeviceIds, DisplayType, IosSettings, LogVerbosity, NotificationEvent, OpenedResult, Payload,
};

/// 转发到桥接边界的一次调用记录
#[derive(Debug, Clone)]
pub struct CallRecord {
    /// 原生方法名（与 bridge::method 中的常量逐字相同）
    pub method: &'static str,
    /// 位置参数，按原生方法签名排列
    pub args: serde_json::Value,
}

/// Mock Bridge（测试替身）
///
/// 不跨越任何边界，只记录每次转发的调用，
/// 异步调用返回预置结果，事件由测试合成注入
pub struct MockBridge {
    calls: Mutex<Vec<CallRecord>>,
    tags: Mutex<HashMap<String, String>>,
    ids: Mutex<DeviceIds>,
    ack: Mutex<serde_json::Value>,
    backend_failure: Mutex<Option<(u16, String)>>,
    events: EventBus,
}

impl MockBridge {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            tags: Mutex::new(HashMap::new()),
            ids: Mutex::new(DeviceIds {
                user_id: Uuid::new_v4().to_string(),
                push_token: "mock_push_token".to_string(),
            }),
            ack: Mutex::new(json!({
                "id": Uuid::new_v4().to_string(),
                "recipients": 1,
                "queued_at": chrono::Utc::now().timestamp(),
            })),
            backend_failure: Mutex::new(None),
            events: EventBus::new(),
        }
    }

    fn record(&self, method: &'static str, args: serde_json::Value) {
        info!("[MOCK BRIDGE] Forwarded call: method={}, args={}", method, args);
        self.calls.lock().push(CallRecord { method, args });
    }

    /// 预置 getTags 的返回值
    pub fn set_tags_response(&self, tags: HashMap<String, String>) {
        *self.tags.lock() = tags;
    }

    /// 预置 getIds 的返回值
    pub fn set_ids_response(&self, ids: DeviceIds) {
        *self.ids.lock() = ids;
    }

    /// 预置 postNotification 的确认结果
    pub fn set_ack_response(&self, ack: serde_json::Value) {
        *self.ack.lock() = ack;
    }

    /// 让后续的异步调用都以指定的后端错误失败
    pub fn fail_backend(&self, status: u16, message: &str) {
        *self.backend_failure.lock() = Some((status, message.to_string()));
    }

    /// 全部调用记录
    pub fn recorded_calls(&self) -> Vec<CallRecord> {
        self.calls.lock().clone()
    }

    /// 指定方法的调用记录
    pub fn calls_for(&self, method: &str) -> Vec<CallRecord> {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.method == method)
            .cloned()
            .collect()
    }

    /// 合成一条收到的通知，返回送达的订阅者数量
    pub fn emit_received(&self, event: NotificationEvent) -> usize {
        self.events.publish_received(event)
    }

    /// 合成一条通知被打开的结果，返回送达的订阅者数量
    pub fn emit_opened(&self, result: OpenedResult) -> usize {
        self.events.publish_opened(result)
    }

    fn check_backend(&self) -> Result<()> {
        if let Some((status, message)) = self.backend_failure.lock().clone() {
            return Err(ClientError::Backend { status, message });
        }
        Ok(())
    }
}

impl Default for MockBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NativeBridge for MockBridge {
    fn start_init(&self, app_id: &str, google_project_number: Option<&str>) -> Result<()> {
        self.record(method::START_INIT, json!([app_id, google_project_number]));
        Ok(())
    }

    fn end_init(&self) -> Result<()> {
        self.record(method::END_INIT, json!([]));
        Ok(())
    }

    fn ios_settings(&self, settings: &IosSettings) -> Result<()> {
        self.record(method::IOS_SETTINGS, json!([settings]));
        Ok(())
    }

    fn in_focus_displaying(&self, display: DisplayType) -> Result<()> {
        self.record(method::IN_FOCUS_DISPLAYING, json!([display]));
        Ok(())
    }

    fn send_tag(&self, key: &str, value: &str) -> Result<()> {
        self.record(method::SEND_TAG, json!([key, value]));
        Ok(())
    }

    fn send_tags(&self, tags: &HashMap<String, String>) -> Result<()> {
        self.record(method::SEND_TAGS, json!([tags]));
        Ok(())
    }

    fn delete_tag(&self, key: &str) -> Result<()> {
        self.record(method::DELETE_TAG, json!([key]));
        Ok(())
    }

    fn delete_tags(&self, keys: &[String]) -> Result<()> {
        self.record(method::DELETE_TAGS, json!([keys]));
        Ok(())
    }

    fn register_for_push_notifications(&self) -> Result<()> {
        self.record(method::REGISTER_FOR_PUSH_NOTIFICATIONS, json!([]));
        Ok(())
    }

    fn enable_vibrate(&self, enable: bool) -> Result<()> {
        self.record(method::ENABLE_VIBRATE, json!([enable]));
        Ok(())
    }

    fn enable_sound(&self, enable: bool) -> Result<()> {
        self.record(method::ENABLE_SOUND, json!([enable]));
        Ok(())
    }

    fn set_subscription(&self, enable: bool) -> Result<()> {
        self.record(method::SET_SUBSCRIPTION, json!([enable]));
        Ok(())
    }

    fn prompt_location(&self) -> Result<()> {
        self.record(method::PROMPT_LOCATION, json!([]));
        Ok(())
    }

    fn sync_hashed_email(&self, email: &str) -> Result<()> {
        self.record(method::SYNC_HASHED_EMAIL, json!([email]));
        Ok(())
    }

    fn set_log_level(&self, verbosity: &LogVerbosity) -> Result<()> {
        self.record(method::SET_LOG_LEVEL, json!([verbosity]));
        Ok(())
    }

    async fn get_tags(&self) -> Result<HashMap<String, String>> {
        self.record(method::GET_TAGS, json!([]));
        self.check_backend()?;
        Ok(self.tags.lock().clone())
    }

    async fn get_ids(&self) -> Result<DeviceIds> {
        self.record(method::GET_IDS, json!([]));
        self.check_backend()?;
        Ok(self.ids.lock().clone())
    }

    async fn post_notification(&self, payload: &Payload) -> Result<serde_json::Value> {
        self.record(method::POST_NOTIFICATION, json!([payload]));
        self.check_backend()?;
        Ok(self.ack.lock().clone())
    }

    fn subscribe_received(&self) -> broadcast::Receiver<NotificationEvent> {
        self.events.subscribe_received()
    }

    fn subscribe_opened(&self) -> broadcast::Receiver<OpenedResult> {
        self.events.subscribe_opened()
    }
}
