use super::ISettingsRepo;
use sqlx::PgPool;

pub struct PostgresSettingsRepo {
    pool: PgPool,
}

impl PostgresSettingsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ISettingsRepo for PostgresSettingsRepo {
    async fn get(&self, key: &str) -> Option<String> {
        sqlx::query_as::<_, (String,)>(
            r#"
            SELECT s.value FROM settings AS s
            WHERE s.key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|(value,)| value)
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO settings(key, value)
            VALUES($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
