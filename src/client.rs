use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::bridge::{NativeBridge, RestBridge};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::events::{EventStream, OpenedStream, ReceivedStream};
use crate::logging::verbosity_filter;
use crate::types::{
    DeviceIds, DisplayType, IosSettings, LogVerbosity, Payload,
};

/// 初始化阶段
///
/// 状态只会单向前进：Idle → Configuring → Ready
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitPhase {
    /// 尚未调用 start_init
    Idle,
    /// start_init 之后、end_init 之前的配置窗口
    Configuring,
    /// end_init 完成，客户端就绪
    Ready,
}

/// Push Client（推送客户端门面）
///
/// 显式构造的客户端对象，持有桥接实现和初始化阶段。
/// 除初始化阶段检查外不做任何语义处理：参数不校验、调用不重试、
/// 并发的异步调用之间没有顺序保证，一切语义由原生层决定
pub struct PushClient {
    bridge: Arc<dyn NativeBridge>,
    phase: RwLock<InitPhase>,
}

impl PushClient {
    /// 使用给定的桥接实现创建客户端
    pub fn new(bridge: Arc<dyn NativeBridge>) -> Self {
        Self {
            bridge,
            phase: RwLock::new(InitPhase::Idle),
        }
    }

    /// 按配置创建使用 REST 桥接的客户端
    ///
    /// 必须在 tokio 运行时内调用
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;
        let bridge = RestBridge::new(config)?;
        Ok(Self::new(Arc::new(bridge)))
    }

    /// 当前初始化阶段
    pub fn phase(&self) -> InitPhase {
        *self.phase.read()
    }

    /// 初始化是否已完成
    pub fn is_ready(&self) -> bool {
        self.phase() == InitPhase::Ready
    }

    fn require_started(&self, op: &str) -> Result<()> {
        if *self.phase.read() == InitPhase::Idle {
            return Err(ClientError::InvalidState(format!(
                "{} called before startInit",
                op
            )));
        }
        Ok(())
    }

    /// 开始初始化，之后进入配置窗口，配置完成后必须调用 end_init
    pub fn start_init(&self, app_id: &str, google_project_number: Option<&str>) -> Result<()> {
        let mut phase = self.phase.write();
        if *phase != InitPhase::Idle {
            return Err(ClientError::InvalidState(
                "startInit called more than once".to_string(),
            ));
        }

        self.bridge.start_init(app_id, google_project_number)?;
        *phase = InitPhase::Configuring;
        info!("[CLIENT] Initialization started: app_id={}", app_id);
        Ok(())
    }

    /// 完成初始化，只允许在 start_init 之后调用一次
    pub fn end_init(&self) -> Result<()> {
        let mut phase = self.phase.write();
        match *phase {
            InitPhase::Idle => Err(ClientError::InvalidState(
                "endInit called before startInit".to_string(),
            )),
            InitPhase::Ready => Err(ClientError::InvalidState(
                "endInit called more than once".to_string(),
            )),
            InitPhase::Configuring => {
                self.bridge.end_init()?;
                *phase = InitPhase::Ready;
                info!("[CLIENT] Initialization complete");
                Ok(())
            }
        }
    }

    /// iOS 初始化设置
    pub fn ios_settings(&self, settings: IosSettings) -> Result<()> {
        self.require_started("iOSSettings")?;
        self.bridge.ios_settings(&settings)
    }

    /// 设置应用在前台时收到通知的展示方式
    pub fn in_focus_displaying(&self, display: DisplayType) -> Result<()> {
        self.require_started("inFocusDisplaying")?;
        self.bridge.in_focus_displaying(display)
    }

    /// 给当前用户打一个标签
    ///
    /// 传空字符串表示删除该 key，与 delete_tag 等价；
    /// 空值原样转发，删除动作由原生层执行
    pub fn send_tag(&self, key: &str, value: &str) -> Result<()> {
        self.require_started("sendTag")?;
        self.bridge.send_tag(key, value)
    }

    /// 批量打标签
    pub fn send_tags(&self, tags: HashMap<String, String>) -> Result<()> {
        self.require_started("sendTags")?;
        self.bridge.send_tags(&tags)
    }

    /// 删除一个标签
    pub fn delete_tag(&self, key: &str) -> Result<()> {
        self.require_started("deleteTag")?;
        self.bridge.delete_tag(key)
    }

    /// 批量删除标签
    pub fn delete_tags(&self, keys: Vec<String>) -> Result<()> {
        self.require_started("deleteTags")?;
        self.bridge.delete_tags(&keys)
    }

    /// 弹出系统推送权限提示（仅 iOS，且 auto_prompt 为 false 时有意义）
    pub fn register_for_push_notifications(&self) -> Result<()> {
        self.require_started("registerForPushNotifications")?;
        self.bridge.register_for_push_notifications()
    }

    /// 开关通知震动（仅 Android/Amazon）
    pub fn enable_vibrate(&self, enable: bool) -> Result<()> {
        self.require_started("enableVibrate")?;
        self.bridge.enable_vibrate(enable)
    }

    /// 开关通知声音（仅 Android/Amazon）
    pub fn enable_sound(&self, enable: bool) -> Result<()> {
        self.require_started("enableSound")?;
        self.bridge.enable_sound(enable)
    }

    /// 设置订阅状态：false 退订全部通知，true 重新订阅
    pub fn set_subscription(&self, enable: bool) -> Result<()> {
        self.require_started("setSubscription")?;
        self.bridge.set_subscription(enable)
    }

    /// 请求定位权限（用于基于位置的推送过滤）
    pub fn prompt_location(&self) -> Result<()> {
        self.require_started("promptLocation")?;
        self.bridge.prompt_location()
    }

    /// 同步散列后的邮箱
    pub fn sync_hashed_email(&self, email: &str) -> Result<()> {
        self.require_started("syncHashedEmail")?;
        self.bridge.sync_hashed_email(email)
    }

    /// 设置原生层日志详细程度，任何阶段都可以调用
    pub fn set_log_level(&self, verbosity: LogVerbosity) -> Result<()> {
        debug!(
            "[CLIENT] Log verbosity {} maps to tracing filter '{}'",
            verbosity.log_level,
            verbosity_filter(verbosity.log_level)
        );
        self.bridge.set_log_level(&verbosity)
    }

    /// 取回当前用户在服务端的全部标签
    pub async fn get_tags(&self) -> Result<HashMap<String, String>> {
        self.require_started("getTags")?;
        self.bridge.get_tags().await
    }

    /// 取回推送服务的用户 ID 和设备推送令牌
    ///
    /// 设备在推送服务注册成功后才会返回
    pub async fn get_ids(&self) -> Result<DeviceIds> {
        self.require_started("getIds")?;
        self.bridge.get_ids().await
    }

    /// 发起一条推送，targeting 和内容字段原样转发
    ///
    /// 结果是推送后端返回的确认原文；失败不重试
    pub async fn post_notification(&self, payload: Payload) -> Result<serde_json::Value> {
        self.require_started("postNotification")?;
        self.bridge.post_notification(&payload).await
    }

    /// 订阅收到的通知，任何阶段都可以订阅
    ///
    /// 每个订阅独立接收全部事件，drop 即取消订阅
    pub fn handle_notification_received(&self) -> ReceivedStream {
        EventStream::new(self.bridge.subscribe_received())
    }

    /// 订阅通知被打开的结果
    pub fn handle_notification_opened(&self) -> OpenedStream {
        EventStream::new(self.bridge.subscribe_opened())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::MockBridge;

    fn client_with_mock() -> (PushClient, Arc<MockBridge>) {
        let bridge = Arc::new(MockBridge::new());
        (PushClient::new(bridge.clone()), bridge)
    }

    #[test]
    fn test_phase_transitions() {
        let (client, _) = client_with_mock();
        assert_eq!(client.phase(), InitPhase::Idle);

        client.start_init("app-id", None).unwrap();
        assert_eq!(client.phase(), InitPhase::Configuring);

        client.end_init().unwrap();
        assert!(client.is_ready());
    }

    #[test]
    fn test_end_init_before_start_init_rejected() {
        let (client, bridge) = client_with_mock();

        let err = client.end_init().unwrap_err();
        assert!(matches!(err, ClientError::InvalidState(_)));
        // 被拒绝的调用不转发
        assert!(bridge.recorded_calls().is_empty());
    }

    #[test]
    fn test_double_init_rejected() {
        let (client, _) = client_with_mock();
        client.start_init("app-id", None).unwrap();

        assert!(matches!(
            client.start_init("app-id", None),
            Err(ClientError::InvalidState(_))
        ));

        client.end_init().unwrap();
        assert!(matches!(client.end_init(), Err(ClientError::InvalidState(_))));
    }

    #[test]
    fn test_tag_before_init_rejected() {
        let (client, bridge) = client_with_mock();

        assert!(matches!(
            client.send_tag("plan", "pro"),
            Err(ClientError::InvalidState(_))
        ));
        assert!(bridge.recorded_calls().is_empty());
    }

    #[test]
    fn test_set_log_level_allowed_before_init() {
        let (client, bridge) = client_with_mock();

        client.set_log_level(LogVerbosity::new(6, 0)).unwrap();
        assert_eq!(bridge.calls_for("setLogLevel").len(), 1);
    }
}
