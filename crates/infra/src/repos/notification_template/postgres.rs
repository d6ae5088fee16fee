use super::INotificationTemplateRepo;
use chrono::{NaiveTime, Weekday};
use sqlx::{types::Uuid, FromRow, PgPool};
use tutorhub_scheduler_domain::{
    date::weekday_from_number, NotificationTemplate, TargetRole, TriggerType, ID,
};

pub struct PostgresNotificationTemplateRepo {
    pool: PgPool,
}

impl PostgresNotificationTemplateRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationTemplateRaw {
    template_uid: Uuid,
    name: String,
    school_uid: Uuid,
    class_group_uid: Option<Uuid>,
    trigger_type: String,
    offset_minutes: i64,
    trigger_time: Option<NaiveTime>,
    days_filter: Option<Vec<i16>>,
    target_roles: Vec<String>,
    is_active: bool,
    message_template: String,
}

impl NotificationTemplateRaw {
    /// Rows with an unknown trigger are dropped, unknown days and roles are ignored
    fn into_template(self) -> Option<NotificationTemplate> {
        let trigger = TriggerType::parse(&self.trigger_type)?;
        Some(NotificationTemplate {
            id: self.template_uid.into(),
            name: self.name,
            school_id: self.school_uid.into(),
            class_group_id: self.class_group_uid.map(|id| id.into()),
            trigger,
            offset_minutes: self.offset_minutes,
            trigger_time: self.trigger_time.map(|t| t.into()),
            days_filter: self.days_filter.map(|days| {
                days.into_iter()
                    .filter_map(|d| weekday_from_number(d as u32))
                    .collect()
            }),
            target_roles: self
                .target_roles
                .iter()
                .filter_map(|r| TargetRole::parse(r))
                .collect(),
            is_active: self.is_active,
            message_template: self.message_template,
        })
    }
}

fn days_to_numbers(days: &Option<Vec<Weekday>>) -> Option<Vec<i16>> {
    days.as_ref().map(|days| {
        days.iter()
            .map(|d| d.number_from_monday() as i16)
            .collect()
    })
}

fn roles_to_strings(roles: &[TargetRole]) -> Vec<String> {
    roles.iter().map(|r| r.as_str().to_string()).collect()
}

#[async_trait::async_trait]
impl INotificationTemplateRepo for PostgresNotificationTemplateRepo {
    async fn insert(&self, t: &NotificationTemplate) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notification_templates(
                template_uid,
                name,
                school_uid,
                class_group_uid,
                trigger_type,
                offset_minutes,
                trigger_time,
                days_filter,
                target_roles,
                is_active,
                message_template
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(t.id.inner_ref())
        .bind(&t.name)
        .bind(t.school_id.inner_ref())
        .bind(t.class_group_id.as_ref().map(|id| *id.inner_ref()))
        .bind(t.trigger.as_str())
        .bind(t.offset_minutes)
        .bind(t.trigger_time.map(|time| time.as_naive_time()))
        .bind(days_to_numbers(&t.days_filter))
        .bind(roles_to_strings(&t.target_roles))
        .bind(t.is_active)
        .bind(&t.message_template)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, t: &NotificationTemplate) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE notification_templates SET
                name = $2,
                school_uid = $3,
                class_group_uid = $4,
                trigger_type = $5,
                offset_minutes = $6,
                trigger_time = $7,
                days_filter = $8,
                target_roles = $9,
                is_active = $10,
                message_template = $11
            WHERE template_uid = $1
            "#,
        )
        .bind(t.id.inner_ref())
        .bind(&t.name)
        .bind(t.school_id.inner_ref())
        .bind(t.class_group_id.as_ref().map(|id| *id.inner_ref()))
        .bind(t.trigger.as_str())
        .bind(t.offset_minutes)
        .bind(t.trigger_time.map(|time| time.as_naive_time()))
        .bind(days_to_numbers(&t.days_filter))
        .bind(roles_to_strings(&t.target_roles))
        .bind(t.is_active)
        .bind(&t.message_template)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, template_id: &ID) -> Option<NotificationTemplate> {
        let template: NotificationTemplateRaw = match sqlx::query_as::<_, NotificationTemplateRaw>(
            r#"
            SELECT * FROM notification_templates AS t
            WHERE t.template_uid = $1
            "#,
        )
        .bind(template_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(template) => template,
            Err(_) => return None,
        };
        template.into_template()
    }

    async fn find_active(&self) -> anyhow::Result<Vec<NotificationTemplate>> {
        let templates: Vec<NotificationTemplateRaw> =
            sqlx::query_as::<_, NotificationTemplateRaw>(
                r#"
                SELECT * FROM notification_templates AS t
                WHERE t.is_active
                "#,
            )
            .fetch_all(&self.pool)
            .await?;

        Ok(templates
            .into_iter()
            .filter_map(|t| t.into_template())
            .collect())
    }

    async fn delete(&self, template_id: &ID) -> anyhow::Result<Option<NotificationTemplate>> {
        let template: Option<NotificationTemplateRaw> =
            sqlx::query_as::<_, NotificationTemplateRaw>(
                r#"
                DELETE FROM notification_templates AS t
                WHERE t.template_uid = $1
                RETURNING *
                "#,
            )
            .bind(template_id.inner_ref())
            .fetch_optional(&self.pool)
            .await?;

        Ok(template.and_then(|t| t.into_template()))
    }
}
