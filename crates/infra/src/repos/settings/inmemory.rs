use super::ISettingsRepo;
use std::{collections::HashMap, sync::Mutex};

pub struct InMemorySettingsRepo {
    settings: Mutex<HashMap<String, String>>,
}

impl InMemorySettingsRepo {
    pub fn new() -> Self {
        Self {
            settings: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISettingsRepo for InMemorySettingsRepo {
    async fn get(&self, key: &str) -> Option<String> {
        self.settings.lock().unwrap().get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.settings
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
