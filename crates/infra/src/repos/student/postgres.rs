use super::IStudentRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use tutorhub_scheduler_domain::{Student, ID};

pub struct PostgresStudentRepo {
    pool: PgPool,
}

impl PostgresStudentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct StudentRaw {
    student_uid: Uuid,
    school_uid: Uuid,
    class_group_uid: Option<Uuid>,
    name: String,
    address: Option<String>,
}

impl Into<Student> for StudentRaw {
    fn into(self) -> Student {
        Student {
            id: self.student_uid.into(),
            school_id: self.school_uid.into(),
            class_group_id: self.class_group_uid.map(|id| id.into()),
            name: self.name,
            address: self.address,
        }
    }
}

#[async_trait::async_trait]
impl IStudentRepo for PostgresStudentRepo {
    async fn insert(&self, student: &Student) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO students(student_uid, school_uid, class_group_uid, name, address)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(student.id.inner_ref())
        .bind(student.school_id.inner_ref())
        .bind(student.class_group_id.as_ref().map(|id| *id.inner_ref()))
        .bind(&student.name)
        .bind(&student.address)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, student_id: &ID) -> Option<Student> {
        let student: StudentRaw = match sqlx::query_as::<_, StudentRaw>(
            r#"
            SELECT * FROM students AS s
            WHERE s.student_uid = $1
            "#,
        )
        .bind(student_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(student) => student,
            Err(_) => return None,
        };
        Some(student.into())
    }

    async fn find_by_school(&self, school_id: &ID) -> anyhow::Result<Vec<Student>> {
        let students: Vec<StudentRaw> = sqlx::query_as::<_, StudentRaw>(
            r#"
            SELECT * FROM students AS s
            WHERE s.school_uid = $1
            "#,
        )
        .bind(school_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(students.into_iter().map(|s| s.into()).collect())
    }
}
