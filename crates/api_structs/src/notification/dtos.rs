use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tutorhub_scheduler_domain::{DueNotification, TargetRole, TriggerType, ID};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DueNotificationDTO {
    pub key: String,
    pub title: String,
    pub message: String,
    pub target_at: NaiveDateTime,
    pub trigger: TriggerType,
    pub target_roles: Vec<TargetRole>,
    pub school_id: ID,
    pub class_group_id: Option<ID>,
    pub lesson_id: Option<ID>,
    pub teacher_id: Option<ID>,
}

impl DueNotificationDTO {
    pub fn new(notification: DueNotification) -> Self {
        Self {
            key: notification.key,
            title: notification.title,
            message: notification.message,
            target_at: notification.target_at,
            trigger: notification.trigger,
            target_roles: notification.target_roles,
            school_id: notification.school_id,
            class_group_id: notification.class_group_id,
            lesson_id: notification.lesson_id,
            teacher_id: notification.teacher_id,
        }
    }
}
