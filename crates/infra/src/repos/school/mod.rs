mod inmemory;
mod postgres;

pub use inmemory::InMemorySchoolRepo;
pub use postgres::PostgresSchoolRepo;
use tutorhub_scheduler_domain::{School, ID};

#[async_trait::async_trait]
pub trait ISchoolRepo: Send + Sync {
    async fn insert(&self, school: &School) -> anyhow::Result<()>;
    async fn save(&self, school: &School) -> anyhow::Result<()>;
    async fn find(&self, school_id: &ID) -> Option<School>;
    async fn find_many(&self, school_ids: &[ID]) -> anyhow::Result<Vec<School>>;
}
