use super::ISchoolRepo;
use crate::repos::shared::inmemory_repo::*;
use tutorhub_scheduler_domain::{School, ID};

pub struct InMemorySchoolRepo {
    schools: std::sync::Mutex<Vec<School>>,
}

impl InMemorySchoolRepo {
    pub fn new() -> Self {
        Self {
            schools: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISchoolRepo for InMemorySchoolRepo {
    async fn insert(&self, school: &School) -> anyhow::Result<()> {
        insert(school, &self.schools);
        Ok(())
    }

    async fn save(&self, school: &School) -> anyhow::Result<()> {
        save(school, &self.schools);
        Ok(())
    }

    async fn find(&self, school_id: &ID) -> Option<School> {
        find(school_id, &self.schools)
    }

    async fn find_many(&self, school_ids: &[ID]) -> anyhow::Result<Vec<School>> {
        Ok(find_by(&self.schools, |s| school_ids.contains(&s.id)))
    }
}
