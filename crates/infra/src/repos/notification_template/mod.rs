mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationTemplateRepo;
pub use postgres::PostgresNotificationTemplateRepo;
use tutorhub_scheduler_domain::{NotificationTemplate, ID};

#[async_trait::async_trait]
pub trait INotificationTemplateRepo: Send + Sync {
    async fn insert(&self, template: &NotificationTemplate) -> anyhow::Result<()>;
    async fn save(&self, template: &NotificationTemplate) -> anyhow::Result<()>;
    async fn find(&self, template_id: &ID) -> Option<NotificationTemplate>;
    async fn find_active(&self) -> anyhow::Result<Vec<NotificationTemplate>>;
    async fn delete(&self, template_id: &ID) -> anyhow::Result<Option<NotificationTemplate>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutorhub_scheduler_domain::TriggerType;

    #[tokio::test]
    async fn only_active_templates_are_found() {
        let repo = InMemoryNotificationTemplateRepo::new();
        let school_id = ID::default();
        let active = NotificationTemplate::new(&school_id, "Start", TriggerType::LessonStart, "");
        let mut inactive = NotificationTemplate::new(&school_id, "End", TriggerType::LessonEnd, "");
        inactive.is_active = false;
        repo.insert(&active).await.unwrap();
        repo.insert(&inactive).await.unwrap();

        let found = repo.find_active().await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, active.id);

        inactive.is_active = true;
        repo.save(&inactive).await.unwrap();
        assert_eq!(repo.find_active().await.unwrap().len(), 2);

        assert!(repo.delete(&active.id).await.unwrap().is_some());
        assert!(repo.find(&active.id).await.is_none());
    }
}
