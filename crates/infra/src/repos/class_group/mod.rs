mod inmemory;
mod postgres;

pub use inmemory::InMemoryClassGroupRepo;
pub use postgres::PostgresClassGroupRepo;
use tutorhub_scheduler_domain::{ClassGroup, ID};

#[async_trait::async_trait]
pub trait IClassGroupRepo: Send + Sync {
    async fn insert(&self, class_group: &ClassGroup) -> anyhow::Result<()>;
    async fn save(&self, class_group: &ClassGroup) -> anyhow::Result<()>;
    async fn find(&self, class_group_id: &ID) -> Option<ClassGroup>;
    async fn find_by_schools(&self, school_ids: &[ID]) -> anyhow::Result<Vec<ClassGroup>>;
}
