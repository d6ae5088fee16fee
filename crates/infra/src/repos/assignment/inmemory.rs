use super::IAssignmentRepo;
use crate::repos::shared::inmemory_repo::*;
use tutorhub_scheduler_domain::{Assignment, ID};

pub struct InMemoryAssignmentRepo {
    assignments: std::sync::Mutex<Vec<Assignment>>,
}

impl InMemoryAssignmentRepo {
    pub fn new() -> Self {
        Self {
            assignments: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IAssignmentRepo for InMemoryAssignmentRepo {
    async fn insert(&self, assignment: &Assignment) -> anyhow::Result<()> {
        insert(assignment, &self.assignments);
        Ok(())
    }

    async fn save(&self, assignment: &Assignment) -> anyhow::Result<()> {
        save(assignment, &self.assignments);
        Ok(())
    }

    async fn find(&self, assignment_id: &ID) -> Option<Assignment> {
        find(assignment_id, &self.assignments)
    }

    async fn find_by_school(&self, school_id: &ID) -> anyhow::Result<Vec<Assignment>> {
        Ok(find_by(&self.assignments, |a| a.school_id == *school_id))
    }

    async fn find_by_class_group(&self, class_group_id: &ID) -> anyhow::Result<Vec<Assignment>> {
        Ok(find_by(&self.assignments, |a| {
            a.class_group_id == *class_group_id
        }))
    }

    async fn delete(&self, assignment_id: &ID) -> anyhow::Result<Option<Assignment>> {
        Ok(delete(assignment_id, &self.assignments))
    }
}
