use crate::dtos::DueNotificationDTO;
use serde::{Deserialize, Serialize};
use tutorhub_scheduler_domain::DueNotification;

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueNotificationsResponse {
    pub notifications: Vec<DueNotificationDTO>,
}

impl DueNotificationsResponse {
    pub fn new(notifications: Vec<DueNotification>) -> Self {
        Self {
            notifications: notifications
                .into_iter()
                .map(DueNotificationDTO::new)
                .collect(),
        }
    }
}

#[derive(Deserialize)]
pub struct NotificationPathParams {
    pub key: String,
}

pub mod get_due_notifications {
    use super::*;

    #[derive(Deserialize, Serialize, Default)]
    pub struct QueryParams {
        /// One of student, teacher, manager or admin
        #[serde(default)]
        pub role: Option<String>,
    }

    pub type APIResponse = DueNotificationsResponse;
}

pub mod evaluate_notifications {
    use super::*;

    pub type APIResponse = DueNotificationsResponse;
}

pub mod dismiss_notification {
    use super::*;

    pub type PathParams = NotificationPathParams;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// False if the notification was not visible
        pub dismissed: bool,
    }
}

pub mod dismiss_all_notifications {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub dismissed_count: usize,
    }
}

pub mod clear_dismissals {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
    }
}

pub mod send_notification {
    use super::*;

    pub type PathParams = NotificationPathParams;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub recipient_count: usize,
        pub success_count: usize,
        pub fail_count: usize,
    }
}
