use super::{ILessonRepo, LessonQuery};
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use tutorhub_scheduler_domain::{Lesson, LessonPatch, ID};

pub struct InMemoryLessonRepo {
    lessons: std::sync::Mutex<Vec<Lesson>>,
}

impl InMemoryLessonRepo {
    pub fn new() -> Self {
        Self {
            lessons: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ILessonRepo for InMemoryLessonRepo {
    async fn insert_many(&self, lessons: &[Lesson]) -> anyhow::Result<()> {
        insert_many(lessons, &self.lessons);
        Ok(())
    }

    async fn find(&self, lesson_id: &ID) -> Option<Lesson> {
        find(lesson_id, &self.lessons)
    }

    async fn find_by(&self, query: &LessonQuery) -> anyhow::Result<Vec<Lesson>> {
        let mut lessons = find_by(&self.lessons, |lesson| query.matches(lesson));
        lessons.sort_by_key(|l| (l.date, l.start_time));
        Ok(lessons)
    }

    async fn update(&self, lesson_id: &ID, patch: &LessonPatch) -> anyhow::Result<Option<Lesson>> {
        Ok(update(lesson_id, &self.lessons, |lesson| patch.apply(lesson)))
    }

    async fn delete_many(&self, lesson_ids: &[ID]) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.lessons, |lesson| lesson_ids.contains(&lesson.id)))
    }
}
