use std::sync::Arc;

use futures::StreamExt;

use pushbridge::{
    ActionType, DisplayType, MockBridge, NotificationEvent, OpenedAction, OpenedResult, Payload,
    PushClient,
};

fn sample_event(id: &str) -> NotificationEvent {
    NotificationEvent::received(
        Payload {
            notification_id: id.to_string(),
            title: Some("Hello".to_string()),
            ..Default::default()
        },
        DisplayType::Notification,
        false,
    )
}

#[tokio::test]
async fn test_received_event_broadcast_to_both_subscribers() {
    let bridge = Arc::new(MockBridge::new());
    let client = PushClient::new(bridge.clone());

    let mut first = client.handle_notification_received();
    let mut second = client.handle_notification_received();

    assert_eq!(bridge.emit_received(sample_event("n1")), 2);

    // 广播语义：两个订阅者都收到同一条事件
    assert_eq!(first.next().await.unwrap().payload.notification_id, "n1");
    assert_eq!(second.next().await.unwrap().payload.notification_id, "n1");
}

#[tokio::test]
async fn test_unsubscribe_one_keeps_other_delivering() {
    let bridge = Arc::new(MockBridge::new());
    let client = PushClient::new(bridge.clone());

    let first = client.handle_notification_received();
    let mut second = client.handle_notification_received();

    drop(first);

    assert_eq!(bridge.emit_received(sample_event("n2")), 1);
    assert_eq!(second.next().await.unwrap().payload.notification_id, "n2");
}

#[tokio::test]
async fn test_subscriber_receives_events_in_order() {
    let bridge = Arc::new(MockBridge::new());
    let client = PushClient::new(bridge.clone());

    let mut stream = client.handle_notification_received();

    bridge.emit_received(sample_event("n1"));
    bridge.emit_received(sample_event("n2"));
    bridge.emit_received(sample_event("n3"));

    assert_eq!(stream.next().await.unwrap().payload.notification_id, "n1");
    assert_eq!(stream.next().await.unwrap().payload.notification_id, "n2");
    assert_eq!(stream.next().await.unwrap().payload.notification_id, "n3");
}

#[tokio::test]
async fn test_opened_result_delivered() {
    let bridge = Arc::new(MockBridge::new());
    let client = PushClient::new(bridge.clone());

    let mut stream = client.handle_notification_opened();

    bridge.emit_opened(OpenedResult {
        action: OpenedAction {
            action_type: ActionType::ActionTaken,
            action_id: Some("reply".to_string()),
        },
        notification: sample_event("n4"),
    });

    let opened = stream.next().await.unwrap();
    assert_eq!(opened.action.action_type, ActionType::ActionTaken);
    assert_eq!(opened.action.action_id.as_deref(), Some("reply"));
    assert_eq!(opened.notification.payload.notification_id, "n4");
}

#[tokio::test]
async fn test_subscribe_allowed_before_init() {
    // 原始用法里事件处理器在 startInit 和 endInit 之间注册，
    // 订阅因此不受初始化阶段限制
    let bridge = Arc::new(MockBridge::new());
    let client = PushClient::new(bridge.clone());

    let mut stream = client.handle_notification_received();
    bridge.emit_received(sample_event("n5"));
    assert_eq!(stream.next().await.unwrap().payload.notification_id, "n5");
}

#[tokio::test]
async fn test_event_emitted_without_subscribers_is_dropped() {
    let bridge = Arc::new(MockBridge::new());
    let client = PushClient::new(bridge.clone());

    assert_eq!(bridge.emit_received(sample_event("n6")), 0);

    // 之后的订阅者看不到历史事件
    let mut stream = client.handle_notification_received();
    bridge.emit_received(sample_event("n7"));
    assert_eq!(stream.next().await.unwrap().payload.notification_id, "n7");
}
