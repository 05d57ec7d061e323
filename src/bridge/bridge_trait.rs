use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::Result;
use crate::types::{
    DeviceIds, DisplayType, IosSettings, LogVerbosity, NotificationEvent, OpenedResult, Payload,
};

/// Native Bridge Trait（原生桥接接口）
///
/// 每个方法对应原生插件的一个同名方法（见 bridge::method 中的常量），
/// 按三种调用约定分组：
/// - 同步即发即弃：立即转发，不阻塞调用方，返回值无意义
/// - 异步单结果：每次调用相互独立，失败直接返回给调用方，不重试
/// - 事件订阅：返回广播接收端，每个订阅者都收到每一条事件
#[async_trait]
pub trait NativeBridge: Send + Sync {
    /// 对应原生 startInit
    fn start_init(&self, app_id: &str, google_project_number: Option<&str>) -> Result<()>;

    /// 对应原生 endInit
    fn end_init(&self) -> Result<()>;

    /// 对应原生 iOSSettings
    fn ios_settings(&self, settings: &IosSettings) -> Result<()>;

    /// 对应原生 inFocusDisplaying
    fn in_focus_displaying(&self, display: DisplayType) -> Result<()>;

    /// 对应原生 sendTag
    fn send_tag(&self, key: &str, value: &str) -> Result<()>;

    /// 对应原生 sendTags
    fn send_tags(&self, tags: &HashMap<String, String>) -> Result<()>;

    /// 对应原生 deleteTag
    fn delete_tag(&self, key: &str) -> Result<()>;

    /// 对应原生 deleteTags
    fn delete_tags(&self, keys: &[String]) -> Result<()>;

    /// 对应原生 registerForPushNotifications
    fn register_for_push_notifications(&self) -> Result<()>;

    /// 对应原生 enableVibrate
    fn enable_vibrate(&self, enable: bool) -> Result<()>;

    /// 对应原生 enableSound
    fn enable_sound(&self, enable: bool) -> Result<()>;

    /// 对应原生 setSubscription
    fn set_subscription(&self, enable: bool) -> Result<()>;

    /// 对应原生 promptLocation
    fn prompt_location(&self) -> Result<()>;

    /// 对应原生 syncHashedEmail
    fn sync_hashed_email(&self, email: &str) -> Result<()>;

    /// 对应原生 setLogLevel
    fn set_log_level(&self, verbosity: &LogVerbosity) -> Result<()>;

    /// 对应原生 getTags
    async fn get_tags(&self) -> Result<HashMap<String, String>>;

    /// 对应原生 getIds
    async fn get_ids(&self) -> Result<DeviceIds>;

    /// 对应原生 postNotification
    ///
    /// 结果是推送后端返回的确认原文，不做解析
    async fn post_notification(&self, payload: &Payload) -> Result<serde_json::Value>;

    /// 对应原生 handleNotificationReceived
    fn subscribe_received(&self) -> broadcast::Receiver<NotificationEvent>;

    /// 对应原生 handleNotificationOpened
    fn subscribe_opened(&self) -> broadcast::Receiver<OpenedResult>;
}
