use super::IAttendanceRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use std::collections::HashSet;
use tutorhub_scheduler_domain::{AttendanceRecord, ID};

pub struct InMemoryAttendanceRepo {
    records: std::sync::Mutex<Vec<AttendanceRecord>>,
}

impl InMemoryAttendanceRepo {
    pub fn new() -> Self {
        Self {
            records: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IAttendanceRepo for InMemoryAttendanceRepo {
    async fn insert_many(&self, records: &[AttendanceRecord]) -> anyhow::Result<()> {
        insert_many(records, &self.records);
        Ok(())
    }

    async fn find_by_lesson(&self, lesson_id: &ID) -> anyhow::Result<Vec<AttendanceRecord>> {
        Ok(find_by(&self.records, |r| r.lesson_id == *lesson_id))
    }

    async fn find_attended_lessons(&self, lesson_ids: &[ID]) -> anyhow::Result<HashSet<ID>> {
        Ok(find_by(&self.records, |r| lesson_ids.contains(&r.lesson_id))
            .into_iter()
            .map(|r| r.lesson_id)
            .collect())
    }

    async fn delete_by_lessons(&self, lesson_ids: &[ID]) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.records, |r| lesson_ids.contains(&r.lesson_id)))
    }
}
