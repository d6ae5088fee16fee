use super::{IDispatchGateway, SendResult};
use std::{collections::HashSet, sync::Mutex};

/// Records every message instead of sending it. Sends to the addresses
/// in `failing` are reported as failed.
pub struct InMemoryDispatchGateway {
    sent: Mutex<Vec<(String, String)>>,
    failing: Mutex<HashSet<String>>,
}

impl InMemoryDispatchGateway {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
        }
    }

    pub fn fail_for(&self, address: &str) {
        self.failing.lock().unwrap().insert(address.to_string());
    }

    /// The (address, text) pairs that were delivered
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for InMemoryDispatchGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IDispatchGateway for InMemoryDispatchGateway {
    async fn send(&self, address: &str, text: &str) -> SendResult {
        if self.failing.lock().unwrap().contains(address) {
            return SendResult::failed();
        }
        self.sent
            .lock()
            .unwrap()
            .push((address.to_string(), text.to_string()));
        SendResult::ok()
    }
}
