mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
use chrono::NaiveDate;
pub use inmemory::InMemoryLessonRepo;
pub use postgres::PostgresLessonRepo;
use tutorhub_scheduler_domain::{Lesson, LessonPatch, LessonStatus, ID};

/// Filter for `Lesson`s, every field that is set must match.
/// `from` and `to` are both inclusive.
#[derive(Debug, Clone, Default)]
pub struct LessonQuery {
    pub school_id: Option<ID>,
    pub class_group_id: Option<ID>,
    pub teacher_id: Option<ID>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub status: Option<LessonStatus>,
}

impl LessonQuery {
    pub fn matches(&self, lesson: &Lesson) -> bool {
        self.school_id
            .as_ref()
            .map(|id| *id == lesson.school_id)
            .unwrap_or(true)
            && self
                .class_group_id
                .as_ref()
                .map(|id| *id == lesson.class_group_id)
                .unwrap_or(true)
            && self
                .teacher_id
                .as_ref()
                .map(|id| Some(id) == lesson.teacher_id.as_ref())
                .unwrap_or(true)
            && self.from.map(|from| lesson.date >= from).unwrap_or(true)
            && self.to.map(|to| lesson.date <= to).unwrap_or(true)
            && self.status.map(|s| s == lesson.status).unwrap_or(true)
    }
}

#[async_trait::async_trait]
pub trait ILessonRepo: Send + Sync {
    async fn insert_many(&self, lessons: &[Lesson]) -> anyhow::Result<()>;
    async fn find(&self, lesson_id: &ID) -> Option<Lesson>;
    /// Ordered by date and start time
    async fn find_by(&self, query: &LessonQuery) -> anyhow::Result<Vec<Lesson>>;
    /// Returns the updated `Lesson` or `None` if it does not exist
    async fn update(&self, lesson_id: &ID, patch: &LessonPatch) -> anyhow::Result<Option<Lesson>>;
    async fn delete_many(&self, lesson_ids: &[ID]) -> anyhow::Result<DeleteResult>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutorhub_scheduler_domain::LessonKind;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn lesson(class_group_id: &ID, date: NaiveDate) -> Lesson {
        Lesson {
            id: Default::default(),
            school_id: Default::default(),
            class_group_id: class_group_id.clone(),
            teacher_id: None,
            date,
            start_time: "10:00".parse().unwrap(),
            end_time: "11:00".parse().unwrap(),
            status: LessonStatus::Scheduled,
            kind: LessonKind::Regular,
        }
    }

    #[tokio::test]
    async fn query_update_and_delete() {
        let repo = InMemoryLessonRepo::new();
        let group = ID::default();
        let lessons = vec![
            lesson(&group, date(10)),
            lesson(&group, date(3)),
            lesson(&ID::default(), date(5)),
        ];
        repo.insert_many(&lessons).await.unwrap();

        let query = LessonQuery {
            class_group_id: Some(group.clone()),
            from: Some(date(3)),
            ..Default::default()
        };
        let found = repo.find_by(&query).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].date, date(3));

        let patch = LessonPatch {
            date: Some(date(17)),
            status: Some(LessonStatus::Cancelled),
            ..Default::default()
        };
        let updated = repo.update(&lessons[0].id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.date, date(17));
        assert_eq!(updated.status, LessonStatus::Cancelled);
        assert!(repo.update(&ID::default(), &patch).await.unwrap().is_none());

        let query = LessonQuery {
            status: Some(LessonStatus::Scheduled),
            ..Default::default()
        };
        assert_eq!(repo.find_by(&query).await.unwrap().len(), 2);

        let res = repo
            .delete_many(&[lessons[1].id.clone(), lessons[2].id.clone()])
            .await
            .unwrap();
        assert_eq!(res.deleted_count, 2);
        assert!(repo.find(&lessons[1].id).await.is_none());
        assert!(repo.find(&lessons[0].id).await.is_some());
    }
}
