mod inmemory;
mod postgres;

pub use inmemory::InMemoryStudentRepo;
pub use postgres::PostgresStudentRepo;
use tutorhub_scheduler_domain::{Student, ID};

#[async_trait::async_trait]
pub trait IStudentRepo: Send + Sync {
    async fn insert(&self, student: &Student) -> anyhow::Result<()>;
    async fn find(&self, student_id: &ID) -> Option<Student>;
    async fn find_by_school(&self, school_id: &ID) -> anyhow::Result<Vec<Student>>;
}
