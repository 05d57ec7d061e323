use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tracing::debug;

use crate::types::{NotificationEvent, OpenedResult};

/// 单条事件通道的缓冲容量
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// In-process Event Bus（进程内事件总线）
///
/// 使用 tokio::sync::broadcast 做广播语义：
/// 每个订阅者都收到每一条事件，互不影响
pub struct EventBus {
    received: broadcast::Sender<NotificationEvent>,
    opened: broadcast::Sender<OpenedResult>,
}

impl EventBus {
    /// 创建新的事件总线
    pub fn new() -> Self {
        let (received, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (opened, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { received, opened }
    }

    /// 发布一条收到的通知，返回送达的订阅者数量
    ///
    /// 没有订阅者时事件直接丢弃
    pub fn publish_received(&self, event: NotificationEvent) -> usize {
        self.received.send(event).unwrap_or(0)
    }

    /// 发布一条通知被打开的结果，返回送达的订阅者数量
    pub fn publish_opened(&self, result: OpenedResult) -> usize {
        self.opened.send(result).unwrap_or(0)
    }

    /// 订阅收到的通知
    pub fn subscribe_received(&self) -> broadcast::Receiver<NotificationEvent> {
        self.received.subscribe()
    }

    /// 订阅通知被打开的结果
    pub fn subscribe_opened(&self) -> broadcast::Receiver<OpenedResult> {
        self.opened.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// 事件订阅流
///
/// 惰性、无界、每个订阅独立；drop 即取消订阅。
/// 订阅投递没有失败通道，接收端滞后造成的空洞直接跳过
pub struct EventStream<T> {
    inner: BroadcastStream<T>,
}

impl<T: Clone + Send + 'static> EventStream<T> {
    pub(crate) fn new(receiver: broadcast::Receiver<T>) -> Self {
        Self {
            inner: BroadcastStream::new(receiver),
        }
    }
}

impl<T: Clone + Send + 'static> Stream for EventStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match Pin::new(&mut self.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(item))) => return Poll::Ready(Some(item)),
                Poll::Ready(Some(Err(BroadcastStreamRecvError::Lagged(skipped)))) => {
                    debug!("[EVENT BUS] Subscriber lagged, skipped {} events", skipped);
                    continue;
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// 收到通知的订阅流
pub type ReceivedStream = EventStream<NotificationEvent>;

/// 通知被打开的订阅流
pub type OpenedStream = EventStream<OpenedResult>;
