use super::{ILessonRepo, LessonQuery};
use crate::repos::shared::repo::DeleteResult;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{types::Uuid, FromRow, PgPool, Postgres, QueryBuilder};
use tutorhub_scheduler_domain::{Lesson, LessonKind, LessonPatch, LessonStatus, ID};

// Keeps a single bulk insert below the bind parameter limit of postgres
const INSERT_CHUNK_SIZE: usize = 1000;

pub struct PostgresLessonRepo {
    pool: PgPool,
}

impl PostgresLessonRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LessonRaw {
    lesson_uid: Uuid,
    school_uid: Uuid,
    class_group_uid: Uuid,
    teacher_uid: Option<Uuid>,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    status: String,
    kind: String,
}

impl Into<Lesson> for LessonRaw {
    fn into(self) -> Lesson {
        Lesson {
            id: self.lesson_uid.into(),
            school_id: self.school_uid.into(),
            class_group_id: self.class_group_uid.into(),
            teacher_id: self.teacher_uid.map(|id| id.into()),
            date: self.date,
            start_time: self.start_time.into(),
            end_time: self.end_time.into(),
            status: LessonStatus::parse(&self.status).unwrap_or(LessonStatus::Scheduled),
            kind: LessonKind::parse(&self.kind).unwrap_or(LessonKind::Regular),
        }
    }
}

#[async_trait::async_trait]
impl ILessonRepo for PostgresLessonRepo {
    async fn insert_many(&self, lessons: &[Lesson]) -> anyhow::Result<()> {
        for chunk in lessons.chunks(INSERT_CHUNK_SIZE) {
            let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
                r#"
                INSERT INTO lessons(
                    lesson_uid,
                    school_uid,
                    class_group_uid,
                    teacher_uid,
                    date,
                    start_time,
                    end_time,
                    status,
                    kind
                )
                "#,
            );
            query.push_values(chunk, |mut row, l| {
                row.push_bind(*l.id.inner_ref())
                    .push_bind(*l.school_id.inner_ref())
                    .push_bind(*l.class_group_id.inner_ref())
                    .push_bind(l.teacher_id.as_ref().map(|id| *id.inner_ref()))
                    .push_bind(l.date)
                    .push_bind(l.start_time.as_naive_time())
                    .push_bind(l.end_time.as_naive_time())
                    .push_bind(l.status.as_str())
                    .push_bind(l.kind.as_str());
            });
            query.build().execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn find(&self, lesson_id: &ID) -> Option<Lesson> {
        let lesson: LessonRaw = match sqlx::query_as::<_, LessonRaw>(
            r#"
            SELECT * FROM lessons AS l
            WHERE l.lesson_uid = $1
            "#,
        )
        .bind(lesson_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(lesson) => lesson,
            Err(_) => return None,
        };
        Some(lesson.into())
    }

    async fn find_by(&self, query: &LessonQuery) -> anyhow::Result<Vec<Lesson>> {
        let lessons: Vec<LessonRaw> = sqlx::query_as::<_, LessonRaw>(
            r#"
            SELECT * FROM lessons AS l
            WHERE ($1::uuid IS NULL OR l.school_uid = $1)
            AND ($2::uuid IS NULL OR l.class_group_uid = $2)
            AND ($3::uuid IS NULL OR l.teacher_uid = $3)
            AND ($4::date IS NULL OR l.date >= $4)
            AND ($5::date IS NULL OR l.date <= $5)
            AND ($6::text IS NULL OR l.status = $6)
            ORDER BY l.date, l.start_time
            "#,
        )
        .bind(query.school_id.as_ref().map(|id| *id.inner_ref()))
        .bind(query.class_group_id.as_ref().map(|id| *id.inner_ref()))
        .bind(query.teacher_id.as_ref().map(|id| *id.inner_ref()))
        .bind(query.from)
        .bind(query.to)
        .bind(query.status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;

        Ok(lessons.into_iter().map(|l| l.into()).collect())
    }

    async fn update(&self, lesson_id: &ID, patch: &LessonPatch) -> anyhow::Result<Option<Lesson>> {
        let lesson: Option<LessonRaw> = sqlx::query_as::<_, LessonRaw>(
            r#"
            UPDATE lessons SET
                date = COALESCE($2, date),
                status = COALESCE($3, status),
                teacher_uid = COALESCE($4, teacher_uid)
            WHERE lesson_uid = $1
            RETURNING *
            "#,
        )
        .bind(lesson_id.inner_ref())
        .bind(patch.date)
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.teacher_id.as_ref().map(|id| *id.inner_ref()))
        .fetch_optional(&self.pool)
        .await?;

        Ok(lesson.map(|l| l.into()))
    }

    async fn delete_many(&self, lesson_ids: &[ID]) -> anyhow::Result<DeleteResult> {
        let ids = lesson_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();
        let res = sqlx::query(
            r#"
            DELETE FROM lessons AS l
            WHERE l.lesson_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
