mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
pub use inmemory::InMemoryAttendanceRepo;
pub use postgres::PostgresAttendanceRepo;
use std::collections::HashSet;
use tutorhub_scheduler_domain::{AttendanceRecord, ID};

#[async_trait::async_trait]
pub trait IAttendanceRepo: Send + Sync {
    async fn insert_many(&self, records: &[AttendanceRecord]) -> anyhow::Result<()>;
    async fn find_by_lesson(&self, lesson_id: &ID) -> anyhow::Result<Vec<AttendanceRecord>>;
    /// The subset of `lesson_ids` that has at least one record
    async fn find_attended_lessons(&self, lesson_ids: &[ID]) -> anyhow::Result<HashSet<ID>>;
    async fn delete_by_lessons(&self, lesson_ids: &[ID]) -> anyhow::Result<DeleteResult>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutorhub_scheduler_domain::AttendanceStatus;

    #[tokio::test]
    async fn attended_lessons() {
        let repo = InMemoryAttendanceRepo::new();
        let attended = ID::default();
        let other = ID::default();
        let records = vec![
            AttendanceRecord::new(&attended, &ID::default(), AttendanceStatus::Present),
            AttendanceRecord::new(&attended, &ID::default(), AttendanceStatus::Absent),
        ];
        repo.insert_many(&records).await.unwrap();

        let protected = repo
            .find_attended_lessons(&[attended.clone(), other.clone()])
            .await
            .unwrap();
        assert_eq!(protected.len(), 1);
        assert!(protected.contains(&attended));
        assert_eq!(repo.find_by_lesson(&attended).await.unwrap().len(), 2);

        let res = repo.delete_by_lessons(&[attended.clone()]).await.unwrap();
        assert_eq!(res.deleted_count, 2);
        assert!(repo
            .find_attended_lessons(&[attended])
            .await
            .unwrap()
            .is_empty());
    }
}
