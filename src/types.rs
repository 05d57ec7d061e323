use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// 锁屏可见性（Android 5+ 锁屏上通知的隐私级别）
///
/// 数值为原生 SDK 的线上常量，禁止重新编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum LockScreenVisibility {
    /// 完全可见（默认）
    Public = 1,
    /// 隐藏内容
    Private = 0,
    /// 完全不显示
    Secret = -1,
}

impl LockScreenVisibility {
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(LockScreenVisibility::Public),
            0 => Some(LockScreenVisibility::Private),
            -1 => Some(LockScreenVisibility::Secret),
            _ => None,
        }
    }
}

impl From<LockScreenVisibility> for i32 {
    fn from(value: LockScreenVisibility) -> Self {
        value.as_i32()
    }
}

impl TryFrom<i32> for LockScreenVisibility {
    type Error = String;

    fn try_from(value: i32) -> std::result::Result<Self, Self::Error> {
        LockScreenVisibility::from_i32(value)
            .ok_or_else(|| format!("invalid lock screen visibility: {}", value))
    }
}

/// 通知的展示方式
///
/// 数值为原生 SDK 的线上常量，禁止重新编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum DisplayType {
    /// 静默通知，或者 in-focus 展示被关闭
    None = 0,
    /// 应用内弹窗（默认）
    InAppAlert = 1,
    /// 系统通知栏
    Notification = 2,
}

impl DisplayType {
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(DisplayType::None),
            1 => Some(DisplayType::InAppAlert),
            2 => Some(DisplayType::Notification),
            _ => None,
        }
    }
}

impl From<DisplayType> for i32 {
    fn from(value: DisplayType) -> Self {
        value.as_i32()
    }
}

impl TryFrom<i32> for DisplayType {
    type Error = String;

    fn try_from(value: i32) -> std::result::Result<Self, Self::Error> {
        DisplayType::from_i32(value).ok_or_else(|| format!("invalid display type: {}", value))
    }
}

/// 通知被打开的方式
///
/// 数值为原生 SDK 的线上常量，禁止重新编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ActionType {
    /// 正常点开通知
    Opened = 0,
    /// 点击了通知上的动作按钮
    ActionTaken = 1,
}

impl ActionType {
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(ActionType::Opened),
            1 => Some(ActionType::ActionTaken),
            _ => None,
        }
    }
}

impl From<ActionType> for i32 {
    fn from(value: ActionType) -> Self {
        value.as_i32()
    }
}

impl TryFrom<i32> for ActionType {
    type Error = String;

    fn try_from(value: i32) -> std::result::Result<Self, Self::Error> {
        ActionType::from_i32(value).ok_or_else(|| format!("invalid action type: {}", value))
    }
}

/// 通知上的动作按钮
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionButton {
    /// 按钮 ID
    pub id: String,
    /// 按钮文字
    pub text: String,
    /// 按钮图标（仅 Android）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// 通知背景图布局（仅 Android，设置了背景图时存在）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundImageLayout {
    /// 背景图 URL 或资源名
    pub image: String,
    /// 标题文字颜色，ARGB 格式
    #[serde(rename = "titleTextColor")]
    pub title_text_color: String,
    /// 正文文字颜色，ARGB 格式
    #[serde(rename = "bodyTextColor")]
    pub body_text_color: String,
}

/// 通知 Payload：内容、投放目标和调度字段的合并形态
///
/// 接收侧字段使用原生 SDK 的 camelCase 线上字段名；
/// 发送侧字段使用推送后端 REST API 的 snake_case 字段名。
/// 两组字段名都是兼容性契约，禁止改名。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// 服务端分配的通知 UUID
    #[serde(rename = "notificationID", default, skip_serializing_if = "String::is_empty")]
    pub notification_id: String,
    /// 标题
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// 正文
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// 随通知下发的自定义附加数据
    #[serde(rename = "additionalData", default, skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<serde_json::Value>,
    /// 小图标资源名（仅 Android）
    #[serde(rename = "smallIcon", default, skip_serializing_if = "Option::is_none")]
    pub small_icon: Option<String>,
    /// 大图标（仅 Android）
    #[serde(rename = "largeIcon", default, skip_serializing_if = "Option::is_none")]
    pub large_icon: Option<String>,
    /// 大图（仅 Android）
    #[serde(rename = "bigPicture", default, skip_serializing_if = "Option::is_none")]
    pub big_picture: Option<String>,
    /// 小图标周围的强调色，ARGB 格式（仅 Android 5+）
    #[serde(rename = "smallIconAccentColor", default, skip_serializing_if = "Option::is_none")]
    pub small_icon_accent_color: Option<String>,
    /// 打开通知时跳转的 URL
    #[serde(rename = "launchUrl", default, skip_serializing_if = "Option::is_none")]
    pub launch_url: Option<String>,
    /// 展示通知时播放的声音资源
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    /// 呼吸灯颜色，ARGB 格式（仅 Android）
    #[serde(rename = "ledColor", default, skip_serializing_if = "Option::is_none")]
    pub led_color: Option<String>,
    /// 锁屏可见性
    #[serde(rename = "lockScreenVisibility", default, skip_serializing_if = "Option::is_none")]
    pub lock_screen_visibility: Option<LockScreenVisibility>,
    /// 同 key 的通知会合并为一条摘要通知（仅 Android）
    #[serde(rename = "groupKey", default, skip_serializing_if = "Option::is_none")]
    pub group_key: Option<String>,
    /// 摘要通知上展示的文字（仅 Android）
    #[serde(rename = "groupMessage", default, skip_serializing_if = "Option::is_none")]
    pub group_message: Option<String>,
    /// 动作按钮列表
    #[serde(rename = "actionButtons", default, skip_serializing_if = "Vec::is_empty")]
    pub action_buttons: Vec<ActionButton>,
    /// 发送通知时使用的 Google 项目号（仅 Android）
    #[serde(rename = "fromProjectNumber", default, skip_serializing_if = "Option::is_none")]
    pub from_project_number: Option<String>,
    /// 背景图布局（仅 Android）
    #[serde(rename = "backgroundImageLayout", default, skip_serializing_if = "Option::is_none")]
    pub background_image_layout: Option<BackgroundImageLayout>,
    /// 优先级
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// 未解析的原始 payload，原样保留用于无损往返
    #[serde(rename = "rawPayload", default, skip_serializing_if = "String::is_empty")]
    pub raw_payload: String,

    // ---- 发送侧字段（仅在发起推送请求时填充）----
    /// 按语言的内容，如 {"en": "Hello"}
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<HashMap<String, String>>,
    /// 按语言的标题
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headings: Option<HashMap<String, String>>,
    /// 目标 Segment 列表
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included_segments: Option<Vec<String>>,
    /// 排除的 Segment 列表
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_segments: Option<Vec<String>>,
    /// 目标设备 ID 列表
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_player_ids: Option<Vec<String>>,
    /// 延迟到指定时间发送
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_after: Option<String>,
    /// 延迟投放选项
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delayed_option: Option<String>,
    /// 每天的投放时刻
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_time_of_day: Option<String>,
    /// 存活时间（秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// 收到的一条通知
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// 收到时应用是否在前台
    #[serde(rename = "isAppInFocus")]
    pub is_app_in_focus: bool,
    /// 是否对用户展示过（静默通知为 false）
    pub shown: bool,
    /// 平台分配的通知 ID（仅 Android）
    #[serde(rename = "androidNotificationId", default, skip_serializing_if = "Option::is_none")]
    pub android_notification_id: Option<i64>,
    /// 通知内容
    pub payload: Payload,
    /// 展示方式
    #[serde(rename = "displayType")]
    pub display_type: DisplayType,
    /// 摘要通知包含的子通知 payload（仅 Android）
    #[serde(rename = "groupedNotifications", default, skip_serializing_if = "Option::is_none")]
    pub grouped_notifications: Option<Vec<Payload>>,
}

impl NotificationEvent {
    /// 构造一条收到的通知事件
    ///
    /// 不变量：displayType 为 None 时 shown 恒为 false
    pub fn received(payload: Payload, display_type: DisplayType, is_app_in_focus: bool) -> Self {
        Self {
            is_app_in_focus,
            shown: display_type != DisplayType::None,
            android_notification_id: None,
            payload,
            display_type,
            grouped_notifications: None,
        }
    }
}

/// 用户打开通知的动作描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenedAction {
    /// 打开方式
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// 被按下的按钮 ID（action_type 为 ActionTaken 时存在）
    #[serde(rename = "actionID", default, skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
}

/// 通知被打开后的完整结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenedResult {
    /// 动作描述
    pub action: OpenedAction,
    /// 被打开的通知
    pub notification: NotificationEvent,
}

/// 设备注册成功后可取回的一对标识
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceIds {
    /// 推送服务的用户 ID（UUID，每设备每应用唯一）
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Google/Apple 分配的推送令牌
    #[serde(rename = "pushToken")]
    pub push_token: String,
}

/// iOS 初始化设置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IosSettings {
    /// 是否自动弹出通知权限提示
    #[serde(rename = "kOSSettingsKeyAutoPrompt")]
    pub auto_prompt: bool,
    /// 带 launch URL 的通知是否在应用内 webview 打开
    #[serde(rename = "kOSSettingsKeyInAppLaunchURL")]
    pub in_app_launch_url: bool,
}

impl Default for IosSettings {
    fn default() -> Self {
        Self {
            auto_prompt: true,
            in_app_launch_url: false,
        }
    }
}

/// 日志详细程度
///
/// 数值范围 0-6：0 = None, 1 = Fatal, 2 = Errors, 3 = Warnings,
/// 4 = Info, 5 = Debug, 6 = Verbose，数值越大输出越多
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogVerbosity {
    /// 控制台日志级别
    #[serde(rename = "logLevel")]
    pub log_level: u8,
    /// 弹窗提示级别
    #[serde(rename = "visualLevel")]
    pub visual_level: u8,
}

impl LogVerbosity {
    pub fn new(log_level: u8, visual_level: u8) -> Self {
        Self {
            log_level,
            visual_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lock_screen_visibility_wire_values() {
        // 线上常量：Public=1, Private=0, Secret=-1
        assert_eq!(serde_json::to_value(LockScreenVisibility::Public).unwrap(), json!(1));
        assert_eq!(serde_json::to_value(LockScreenVisibility::Private).unwrap(), json!(0));
        assert_eq!(serde_json::to_value(LockScreenVisibility::Secret).unwrap(), json!(-1));
    }

    #[test]
    fn test_display_type_wire_values() {
        assert_eq!(serde_json::to_value(DisplayType::None).unwrap(), json!(0));
        assert_eq!(serde_json::to_value(DisplayType::InAppAlert).unwrap(), json!(1));
        assert_eq!(serde_json::to_value(DisplayType::Notification).unwrap(), json!(2));
    }

    #[test]
    fn test_action_type_wire_values() {
        assert_eq!(serde_json::to_value(ActionType::Opened).unwrap(), json!(0));
        assert_eq!(serde_json::to_value(ActionType::ActionTaken).unwrap(), json!(1));
    }

    #[test]
    fn test_enum_round_trip() {
        for value in [-1, 0, 1] {
            let vis: LockScreenVisibility = serde_json::from_value(json!(value)).unwrap();
            assert_eq!(vis.as_i32(), value);
        }
        for value in [0, 1, 2] {
            let display: DisplayType = serde_json::from_value(json!(value)).unwrap();
            assert_eq!(display.as_i32(), value);
        }
    }

    #[test]
    fn test_unknown_enum_value_rejected() {
        assert!(serde_json::from_value::<LockScreenVisibility>(json!(2)).is_err());
        assert!(serde_json::from_value::<DisplayType>(json!(3)).is_err());
        assert!(serde_json::from_value::<ActionType>(json!(-1)).is_err());
    }

    #[test]
    fn test_raw_payload_preserved() {
        let raw = r#"{"custom":{"i":"b2f7f966-d8cc-11e4-bed1-df8f05be55ba"},"alert":"Hello"}"#;
        let payload = Payload {
            notification_id: "b2f7f966-d8cc-11e4-bed1-df8f05be55ba".to_string(),
            title: Some("Hello".to_string()),
            raw_payload: raw.to_string(),
            ..Default::default()
        };

        let json = serde_json::to_string(&payload).unwrap();
        let parsed: Payload = serde_json::from_str(&json).unwrap();

        // 原始字符串必须逐字节保留
        assert_eq!(parsed.raw_payload, raw);
        assert_eq!(parsed, payload);
    }

    #[test]
    fn test_payload_wire_field_names() {
        let payload = Payload {
            notification_id: "id-1".to_string(),
            small_icon: Some("ic_stat".to_string()),
            lock_screen_visibility: Some(LockScreenVisibility::Private),
            included_segments: Some(vec!["All".to_string()]),
            raw_payload: "{}".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&payload).unwrap();
        let obj = value.as_object().unwrap();
        // 接收侧字段是 camelCase，发送侧字段是 snake_case
        assert!(obj.contains_key("notificationID"));
        assert!(obj.contains_key("smallIcon"));
        assert!(obj.contains_key("rawPayload"));
        assert!(obj.contains_key("included_segments"));
        assert_eq!(obj["lockScreenVisibility"], json!(0));
        // 未填充的可选字段不应出现
        assert!(!obj.contains_key("bigPicture"));
        assert!(!obj.contains_key("contents"));
    }

    #[test]
    fn test_notification_event_silent_not_shown() {
        let event = NotificationEvent::received(Payload::default(), DisplayType::None, true);
        assert!(!event.shown);

        let event = NotificationEvent::received(Payload::default(), DisplayType::Notification, false);
        assert!(event.shown);
    }

    #[test]
    fn test_notification_event_deserialize_wire_shape() {
        let wire = json!({
            "isAppInFocus": false,
            "shown": true,
            "androidNotificationId": 1388,
            "displayType": 2,
            "payload": {
                "notificationID": "a5e4f3c2",
                "title": "New message",
                "body": "You have a new message",
                "sound": "default",
                "actionButtons": [{"id": "reply", "text": "Reply"}],
                "rawPayload": "{\"alert\":\"You have a new message\"}"
            }
        });

        let event: NotificationEvent = serde_json::from_value(wire).unwrap();
        assert!(!event.is_app_in_focus);
        assert_eq!(event.display_type, DisplayType::Notification);
        assert_eq!(event.android_notification_id, Some(1388));
        assert_eq!(event.payload.action_buttons.len(), 1);
        assert_eq!(event.payload.action_buttons[0].id, "reply");
    }

    #[test]
    fn test_opened_result_action_wire_names() {
        let result = OpenedResult {
            action: OpenedAction {
                action_type: ActionType::ActionTaken,
                action_id: Some("reply".to_string()),
            },
            notification: NotificationEvent::received(
                Payload::default(),
                DisplayType::Notification,
                false,
            ),
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["action"]["type"], json!(1));
        assert_eq!(value["action"]["actionID"], json!("reply"));
    }

    #[test]
    fn test_ios_settings_wire_names() {
        let value = serde_json::to_value(IosSettings::default()).unwrap();
        assert_eq!(value["kOSSettingsKeyAutoPrompt"], json!(true));
        assert_eq!(value["kOSSettingsKeyInAppLaunchURL"], json!(false));
    }

    #[test]
    fn test_device_ids_wire_names() {
        let ids = DeviceIds {
            user_id: "uuid-user".to_string(),
            push_token: "token-abc".to_string(),
        };
        let value = serde_json::to_value(&ids).unwrap();
        assert_eq!(value["userId"], json!("uuid-user"));
        assert_eq!(value["pushToken"], json!("token-abc"));
    }
}
