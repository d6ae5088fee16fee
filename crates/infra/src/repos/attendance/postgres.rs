use super::IAttendanceRepo;
use crate::repos::shared::repo::DeleteResult;
use sqlx::{types::Uuid, FromRow, PgPool, Postgres, QueryBuilder};
use std::collections::HashSet;
use tutorhub_scheduler_domain::{AttendanceRecord, AttendanceStatus, ID};

pub struct PostgresAttendanceRepo {
    pool: PgPool,
}

impl PostgresAttendanceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AttendanceRaw {
    record_uid: Uuid,
    lesson_uid: Uuid,
    student_uid: Uuid,
    status: String,
}

impl Into<AttendanceRecord> for AttendanceRaw {
    fn into(self) -> AttendanceRecord {
        AttendanceRecord {
            id: self.record_uid.into(),
            lesson_id: self.lesson_uid.into(),
            student_id: self.student_uid.into(),
            status: AttendanceStatus::parse(&self.status).unwrap_or(AttendanceStatus::Present),
        }
    }
}

fn to_uuids(ids: &[ID]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.inner_ref()).collect()
}

#[async_trait::async_trait]
impl IAttendanceRepo for PostgresAttendanceRepo {
    async fn insert_many(&self, records: &[AttendanceRecord]) -> anyhow::Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO attendance_records(record_uid, lesson_uid, student_uid, status) ",
        );
        query.push_values(records, |mut row, r| {
            row.push_bind(*r.id.inner_ref())
                .push_bind(*r.lesson_id.inner_ref())
                .push_bind(*r.student_id.inner_ref())
                .push_bind(r.status.as_str());
        });
        query.build().execute(&self.pool).await?;
        Ok(())
    }

    async fn find_by_lesson(&self, lesson_id: &ID) -> anyhow::Result<Vec<AttendanceRecord>> {
        let records: Vec<AttendanceRaw> = sqlx::query_as::<_, AttendanceRaw>(
            r#"
            SELECT * FROM attendance_records AS r
            WHERE r.lesson_uid = $1
            "#,
        )
        .bind(lesson_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    async fn find_attended_lessons(&self, lesson_ids: &[ID]) -> anyhow::Result<HashSet<ID>> {
        let lessons: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT r.lesson_uid FROM attendance_records AS r
            WHERE r.lesson_uid = ANY($1)
            "#,
        )
        .bind(to_uuids(lesson_ids))
        .fetch_all(&self.pool)
        .await?;

        Ok(lessons.into_iter().map(|(id,)| id.into()).collect())
    }

    async fn delete_by_lessons(&self, lesson_ids: &[ID]) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM attendance_records AS r
            WHERE r.lesson_uid = ANY($1)
            "#,
        )
        .bind(to_uuids(lesson_ids))
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
