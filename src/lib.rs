pub mod bridge;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod types;

pub use bridge::{CallRecord, MockBridge, NativeBridge, RestBridge};
pub use client::{InitPhase, PushClient};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use events::{EventBus, OpenedStream, ReceivedStream};
pub use types::{
    ActionButton, ActionType, BackgroundImageLayout, DeviceIds, DisplayType, IosSettings,
    LockScreenVisibility, LogVerbosity, NotificationEvent, OpenedAction, OpenedResult, Payload,
};
