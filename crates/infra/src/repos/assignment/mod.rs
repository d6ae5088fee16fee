mod inmemory;
mod postgres;

pub use inmemory::InMemoryAssignmentRepo;
pub use postgres::PostgresAssignmentRepo;
use tutorhub_scheduler_domain::{Assignment, ID};

#[async_trait::async_trait]
pub trait IAssignmentRepo: Send + Sync {
    async fn insert(&self, assignment: &Assignment) -> anyhow::Result<()>;
    async fn save(&self, assignment: &Assignment) -> anyhow::Result<()>;
    async fn find(&self, assignment_id: &ID) -> Option<Assignment>;
    async fn find_by_school(&self, school_id: &ID) -> anyhow::Result<Vec<Assignment>>;
    async fn find_by_class_group(&self, class_group_id: &ID) -> anyhow::Result<Vec<Assignment>>;
    async fn delete(&self, assignment_id: &ID) -> anyhow::Result<Option<Assignment>>;
}
