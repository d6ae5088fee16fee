use super::IAssignmentRepo;
use chrono::NaiveTime;
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::warn;
use tutorhub_scheduler_domain::{date::weekday_from_number, Assignment, ID};

pub struct PostgresAssignmentRepo {
    pool: PgPool,
}

impl PostgresAssignmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRaw {
    assignment_uid: Uuid,
    teacher_uid: Uuid,
    school_uid: Uuid,
    class_group_uid: Uuid,
    day_of_week: i16,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

impl AssignmentRaw {
    /// Rows with a day of week outside of 1..=7 are dropped
    fn into_assignment(self) -> Option<Assignment> {
        let weekday = match weekday_from_number(self.day_of_week as u32) {
            Some(weekday) => weekday,
            None => {
                warn!(
                    "Assignment {} has an invalid day of week: {}",
                    self.assignment_uid, self.day_of_week
                );
                return None;
            }
        };
        Some(Assignment {
            id: self.assignment_uid.into(),
            teacher_id: self.teacher_uid.into(),
            school_id: self.school_uid.into(),
            class_group_id: self.class_group_uid.into(),
            weekday,
            start_time: self.start_time.into(),
            end_time: self.end_time.into(),
        })
    }
}

#[async_trait::async_trait]
impl IAssignmentRepo for PostgresAssignmentRepo {
    async fn insert(&self, a: &Assignment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO assignments(
                assignment_uid,
                teacher_uid,
                school_uid,
                class_group_uid,
                day_of_week,
                start_time,
                end_time
            )
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(a.id.inner_ref())
        .bind(a.teacher_id.inner_ref())
        .bind(a.school_id.inner_ref())
        .bind(a.class_group_id.inner_ref())
        .bind(a.day_of_week() as i16)
        .bind(a.start_time.as_naive_time())
        .bind(a.end_time.as_naive_time())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, a: &Assignment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE assignments SET
                teacher_uid = $2,
                school_uid = $3,
                class_group_uid = $4,
                day_of_week = $5,
                start_time = $6,
                end_time = $7
            WHERE assignment_uid = $1
            "#,
        )
        .bind(a.id.inner_ref())
        .bind(a.teacher_id.inner_ref())
        .bind(a.school_id.inner_ref())
        .bind(a.class_group_id.inner_ref())
        .bind(a.day_of_week() as i16)
        .bind(a.start_time.as_naive_time())
        .bind(a.end_time.as_naive_time())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, assignment_id: &ID) -> Option<Assignment> {
        let assignment: AssignmentRaw = match sqlx::query_as::<_, AssignmentRaw>(
            r#"
            SELECT * FROM assignments AS a
            WHERE a.assignment_uid = $1
            "#,
        )
        .bind(assignment_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(assignment) => assignment,
            Err(_) => return None,
        };
        assignment.into_assignment()
    }

    async fn find_by_school(&self, school_id: &ID) -> anyhow::Result<Vec<Assignment>> {
        let assignments: Vec<AssignmentRaw> = sqlx::query_as::<_, AssignmentRaw>(
            r#"
            SELECT * FROM assignments AS a
            WHERE a.school_uid = $1
            "#,
        )
        .bind(school_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(assignments
            .into_iter()
            .filter_map(|a| a.into_assignment())
            .collect())
    }

    async fn find_by_class_group(&self, class_group_id: &ID) -> anyhow::Result<Vec<Assignment>> {
        let assignments: Vec<AssignmentRaw> = sqlx::query_as::<_, AssignmentRaw>(
            r#"
            SELECT * FROM assignments AS a
            WHERE a.class_group_uid = $1
            "#,
        )
        .bind(class_group_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(assignments
            .into_iter()
            .filter_map(|a| a.into_assignment())
            .collect())
    }

    async fn delete(&self, assignment_id: &ID) -> anyhow::Result<Option<Assignment>> {
        let assignment: Option<AssignmentRaw> = sqlx::query_as::<_, AssignmentRaw>(
            r#"
            DELETE FROM assignments AS a
            WHERE a.assignment_uid = $1
            RETURNING *
            "#,
        )
        .bind(assignment_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(assignment.and_then(|a| a.into_assignment()))
    }
}
