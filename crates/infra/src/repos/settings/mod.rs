mod inmemory;
mod postgres;

pub use inmemory::InMemorySettingsRepo;
pub use postgres::PostgresSettingsRepo;

/// Key of the system wide admin address in the global settings
pub const ADMIN_ADDRESS_KEY: &str = "admin_address";

/// Global key value settings of the operation
#[async_trait::async_trait]
pub trait ISettingsRepo: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}
