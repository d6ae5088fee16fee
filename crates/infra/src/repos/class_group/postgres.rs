use super::IClassGroupRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use tutorhub_scheduler_domain::{ClassGroup, ID};

pub struct PostgresClassGroupRepo {
    pool: PgPool,
}

impl PostgresClassGroupRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ClassGroupRaw {
    class_group_uid: Uuid,
    school_uid: Uuid,
    name: String,
    schedule: Option<String>,
}

impl Into<ClassGroup> for ClassGroupRaw {
    fn into(self) -> ClassGroup {
        ClassGroup {
            id: self.class_group_uid.into(),
            school_id: self.school_uid.into(),
            name: self.name,
            schedule: self.schedule,
        }
    }
}

#[async_trait::async_trait]
impl IClassGroupRepo for PostgresClassGroupRepo {
    async fn insert(&self, group: &ClassGroup) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO class_groups(class_group_uid, school_uid, name, schedule)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(group.id.inner_ref())
        .bind(group.school_id.inner_ref())
        .bind(&group.name)
        .bind(&group.schedule)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, group: &ClassGroup) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE class_groups SET
                school_uid = $2,
                name = $3,
                schedule = $4
            WHERE class_group_uid = $1
            "#,
        )
        .bind(group.id.inner_ref())
        .bind(group.school_id.inner_ref())
        .bind(&group.name)
        .bind(&group.schedule)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, class_group_id: &ID) -> Option<ClassGroup> {
        let group: ClassGroupRaw = match sqlx::query_as::<_, ClassGroupRaw>(
            r#"
            SELECT * FROM class_groups AS g
            WHERE g.class_group_uid = $1
            "#,
        )
        .bind(class_group_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(group) => group,
            Err(_) => return None,
        };
        Some(group.into())
    }

    async fn find_by_schools(&self, school_ids: &[ID]) -> anyhow::Result<Vec<ClassGroup>> {
        let ids = school_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();
        let groups: Vec<ClassGroupRaw> = sqlx::query_as::<_, ClassGroupRaw>(
            r#"
            SELECT * FROM class_groups AS g
            WHERE g.school_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(groups.into_iter().map(|g| g.into()).collect())
    }
}
