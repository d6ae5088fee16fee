use super::IStudentRepo;
use crate::repos::shared::inmemory_repo::*;
use tutorhub_scheduler_domain::{Student, ID};

pub struct InMemoryStudentRepo {
    students: std::sync::Mutex<Vec<Student>>,
}

impl InMemoryStudentRepo {
    pub fn new() -> Self {
        Self {
            students: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IStudentRepo for InMemoryStudentRepo {
    async fn insert(&self, student: &Student) -> anyhow::Result<()> {
        insert(student, &self.students);
        Ok(())
    }

    async fn find(&self, student_id: &ID) -> Option<Student> {
        find(student_id, &self.students)
    }

    async fn find_by_school(&self, school_id: &ID) -> anyhow::Result<Vec<Student>> {
        Ok(find_by(&self.students, |s| s.school_id == *school_id))
    }
}
