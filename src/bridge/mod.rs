pub mod bridge_trait;
pub mod method;
pub mod mock;
pub mod rest;

pub use bridge_trait::NativeBridge;
pub use mock::{CallRecord, MockBridge};
pub use rest::RestBridge;
