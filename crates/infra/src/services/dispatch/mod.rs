mod inmemory;
mod telegram;

pub use inmemory::InMemoryDispatchGateway;
pub use telegram::TelegramDispatchGateway;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendResult {
    pub success: bool,
}

impl SendResult {
    pub fn ok() -> Self {
        Self { success: true }
    }

    pub fn failed() -> Self {
        Self { success: false }
    }
}

/// The messaging layer. Every call is independent, a failure is reported
/// through the `SendResult` and never as an error.
#[async_trait::async_trait]
pub trait IDispatchGateway: Send + Sync {
    async fn send(&self, address: &str, text: &str) -> SendResult;
}

/// Used when no bot token is configured
pub struct DisabledDispatchGateway {}

#[async_trait::async_trait]
impl IDispatchGateway for DisabledDispatchGateway {
    async fn send(&self, address: &str, _text: &str) -> SendResult {
        warn!(
            "Dispatch is disabled, dropping message to address: {}",
            address
        );
        SendResult::failed()
    }
}
