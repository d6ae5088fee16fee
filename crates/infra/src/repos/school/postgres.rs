use super::ISchoolRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use tutorhub_scheduler_domain::{School, SchoolKind, ID};

pub struct PostgresSchoolRepo {
    pool: PgPool,
}

impl PostgresSchoolRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SchoolRaw {
    school_uid: Uuid,
    name: String,
    kind: String,
    principal_address: Option<String>,
}

impl Into<School> for SchoolRaw {
    fn into(self) -> School {
        School {
            id: self.school_uid.into(),
            name: self.name,
            kind: SchoolKind::parse(&self.kind),
            principal_address: self.principal_address,
        }
    }
}

#[async_trait::async_trait]
impl ISchoolRepo for PostgresSchoolRepo {
    async fn insert(&self, school: &School) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO schools(school_uid, name, kind, principal_address)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(school.id.inner_ref())
        .bind(&school.name)
        .bind(school.kind.as_str())
        .bind(&school.principal_address)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, school: &School) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE schools SET
                name = $2,
                kind = $3,
                principal_address = $4
            WHERE school_uid = $1
            "#,
        )
        .bind(school.id.inner_ref())
        .bind(&school.name)
        .bind(school.kind.as_str())
        .bind(&school.principal_address)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, school_id: &ID) -> Option<School> {
        let school: SchoolRaw = match sqlx::query_as::<_, SchoolRaw>(
            r#"
            SELECT * FROM schools AS s
            WHERE s.school_uid = $1
            "#,
        )
        .bind(school_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(school) => school,
            Err(_) => return None,
        };
        Some(school.into())
    }

    async fn find_many(&self, school_ids: &[ID]) -> anyhow::Result<Vec<School>> {
        let ids = school_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();
        let schools: Vec<SchoolRaw> = sqlx::query_as::<_, SchoolRaw>(
            r#"
            SELECT * FROM schools AS s
            WHERE s.school_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(schools.into_iter().map(|s| s.into()).collect())
    }
}
