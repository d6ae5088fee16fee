use super::IClassGroupRepo;
use crate::repos::shared::inmemory_repo::*;
use tutorhub_scheduler_domain::{ClassGroup, ID};

pub struct InMemoryClassGroupRepo {
    class_groups: std::sync::Mutex<Vec<ClassGroup>>,
}

impl InMemoryClassGroupRepo {
    pub fn new() -> Self {
        Self {
            class_groups: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IClassGroupRepo for InMemoryClassGroupRepo {
    async fn insert(&self, class_group: &ClassGroup) -> anyhow::Result<()> {
        insert(class_group, &self.class_groups);
        Ok(())
    }

    async fn save(&self, class_group: &ClassGroup) -> anyhow::Result<()> {
        save(class_group, &self.class_groups);
        Ok(())
    }

    async fn find(&self, class_group_id: &ID) -> Option<ClassGroup> {
        find(class_group_id, &self.class_groups)
    }

    async fn find_by_schools(&self, school_ids: &[ID]) -> anyhow::Result<Vec<ClassGroup>> {
        Ok(find_by(&self.class_groups, |g| {
            school_ids.contains(&g.school_id)
        }))
    }
}
