//! 原生插件暴露的方法名常量
//!
//! 这些字符串与原生插件的方法名逐字相同，是跨边界调用的兼容性契约，
//! 任何一个都不允许改动。

pub const START_INIT: &str = "startInit";
pub const END_INIT: &str = "endInit";
pub const IOS_SETTINGS: &str = "iOSSettings";
pub const IN_FOCUS_DISPLAYING: &str = "inFocusDisplaying";
pub const SEND_TAG: &str = "sendTag";
pub const SEND_TAGS: &str = "sendTags";
pub const DELETE_TAG: &str = "deleteTag";
pub const DELETE_TAGS: &str = "deleteTags";
pub const GET_TAGS: &str = "getTags";
pub const GET_IDS: &str = "getIds";
pub const REGISTER_FOR_PUSH_NOTIFICATIONS: &str = "registerForPushNotifications";
pub const ENABLE_VIBRATE: &str = "enableVibrate";
pub const ENABLE_SOUND: &str = "enableSound";
pub const SET_SUBSCRIPTION: &str = "setSubscription";
pub const POST_NOTIFICATION: &str = "postNotification";
pub const PROMPT_LOCATION: &str = "promptLocation";
pub const SYNC_HASHED_EMAIL: &str = "syncHashedEmail";
pub const SET_LOG_LEVEL: &str = "setLogLevel";
pub const HANDLE_NOTIFICATION_RECEIVED: &str = "handleNotificationReceived";
pub const HANDLE_NOTIFICATION_OPENED: &str = "handleNotificationOpened";

/// 全部方法名，按原生插件声明顺序
pub const ALL_METHODS: &[&str] = &[
    START_INIT,
    HANDLE_NOTIFICATION_RECEIVED,
    HANDLE_NOTIFICATION_OPENED,
    IOS_SETTINGS,
    END_INIT,
    GET_TAGS,
    GET_IDS,
    SEND_TAG,
    SEND_TAGS,
    DELETE_TAG,
    DELETE_TAGS,
    REGISTER_FOR_PUSH_NOTIFICATIONS,
    ENABLE_VIBRATE,
    ENABLE_SOUND,
    IN_FOCUS_DISPLAYING,
    SET_SUBSCRIPTION,
    POST_NOTIFICATION,
    PROMPT_LOCATION,
    SYNC_HASHED_EMAIL,
    SET_LOG_LEVEL,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_names_frozen() {
        // 方法名与原生插件逐字相同
        assert_eq!(
            ALL_METHODS,
            &[
                "startInit",
                "handleNotificationReceived",
                "handleNotificationOpened",
                "iOSSettings",
                "endInit",
                "getTags",
                "getIds",
                "sendTag",
                "sendTags",
                "deleteTag",
                "deleteTags",
                "registerForPushNotifications",
                "enableVibrate",
                "enableSound",
                "inFocusDisplaying",
                "setSubscription",
                "postNotification",
                "promptLocation",
                "syncHashedEmail",
                "setLogLevel",
            ]
        );
    }
}
