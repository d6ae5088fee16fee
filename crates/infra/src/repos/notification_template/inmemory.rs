use super::INotificationTemplateRepo;
use crate::repos::shared::inmemory_repo::*;
use tutorhub_scheduler_domain::{NotificationTemplate, ID};

pub struct InMemoryNotificationTemplateRepo {
    templates: std::sync::Mutex<Vec<NotificationTemplate>>,
}

impl InMemoryNotificationTemplateRepo {
    pub fn new() -> Self {
        Self {
            templates: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl INotificationTemplateRepo for InMemoryNotificationTemplateRepo {
    async fn insert(&self, template: &NotificationTemplate) -> anyhow::Result<()> {
        insert(template, &self.templates);
        Ok(())
    }

    async fn save(&self, template: &NotificationTemplate) -> anyhow::Result<()> {
        save(template, &self.templates);
        Ok(())
    }

    async fn find(&self, template_id: &ID) -> Option<NotificationTemplate> {
        find(template_id, &self.templates)
    }

    async fn find_active(&self) -> anyhow::Result<Vec<NotificationTemplate>> {
        Ok(find_by(&self.templates, |t| t.is_active))
    }

    async fn delete(&self, template_id: &ID) -> anyhow::Result<Option<NotificationTemplate>> {
        Ok(delete(template_id, &self.templates))
    }
}
