use crate::{
    error::SchedulerError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use futures::future::join_all;
use tracing::{info, warn};
use tutorhub_scheduler_api_structs::send_notification::*;
use tutorhub_scheduler_domain::scheduling::{resolve_recipients, RecipientSources};
use tutorhub_scheduler_infra::{SchedulerContext, ADMIN_ADDRESS_KEY};

fn handle_error(e: UseCaseError) -> SchedulerError {
    match e {
        UseCaseError::StorageError => SchedulerError::InternalError,
        UseCaseError::NotFound(key) => SchedulerError::NotFound(format!(
            "The notification with key: {}, is not due.",
            key
        )),
        UseCaseError::NoEligibleRecipients(key) => SchedulerError::Unprocessable(format!(
            "The notification with key: {}, has no eligible recipients.",
            key
        )),
    }
}

pub async fn send_notification_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let usecase = SendNotificationUseCase {
        key: path.key.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|summary| {
            HttpResponse::Ok().json(APIResponse {
                recipient_count: summary.recipient_count,
                success_count: summary.success_count,
                fail_count: summary.fail_count,
            })
        })
        .map_err(handle_error)
}

/// Sends a due notification to every address of its target roles. Every
/// send is independent and counted.
#[derive(Debug)]
pub struct SendNotificationUseCase {
    pub key: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DispatchSummary {
    pub recipient_count: usize,
    pub success_count: usize,
    pub fail_count: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    NotFound(String),
    NoEligibleRecipients(String),
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendNotificationUseCase {
    type Response = DispatchSummary;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let notification = ctx
            .notifications
            .lock()
            .unwrap()
            .find(&self.key)
            .cloned()
            .ok_or_else(|| UseCaseError::NotFound(self.key.clone()))?;

        let students = ctx
            .repos
            .students
            .find_by_school(&notification.school_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let teacher = match &notification.teacher_id {
            Some(teacher_id) => ctx.repos.users.find(teacher_id).await,
            None => None,
        };
        let school = ctx.repos.schools.find(&notification.school_id).await;
        let admins = ctx
            .repos
            .users
            .find_admins()
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let admin_address = ctx.repos.settings.get(ADMIN_ADDRESS_KEY).await;

        let sources = RecipientSources {
            students: &students,
            teacher: teacher.as_ref(),
            school: school.as_ref(),
            admins: &admins,
            admin_address: admin_address.as_deref(),
        };
        let recipients = resolve_recipients(&notification, &sources);
        if recipients.is_empty() {
            warn!("No recipients for notification {}", notification.key);
            return Err(UseCaseError::NoEligibleRecipients(notification.key));
        }

        let sends = recipients
            .iter()
            .map(|address| ctx.gateway.send(address, &notification.message));
        let results = join_all(sends).await;
        let success_count = results.iter().filter(|r| r.success).count();

        let summary = DispatchSummary {
            recipient_count: recipients.len(),
            success_count,
            fail_count: results.len() - success_count,
        };
        info!(
            "Sent notification {}: {} delivered, {} failed",
            notification.key, summary.success_count, summary.fail_count
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        notification::evaluate_notifications::EvaluateNotificationsUseCase,
        test_utils::{date, datetime, setup, Fixture},
    };
    use tutorhub_scheduler_domain::{
        NotificationTemplate, SchoolKind, Student, TargetRole, TriggerType, User, UserRole,
    };

    async fn due_key(fixture: &mut Fixture, target_roles: Vec<TargetRole>) -> String {
        let lesson = fixture.lesson(date(2025, 3, 3), "10:00", "11:00");
        fixture
            .ctx
            .repos
            .lessons
            .insert_many(&[lesson])
            .await
            .unwrap();
        let mut template = NotificationTemplate::new(
            &fixture.school.id,
            "Starting",
            TriggerType::LessonStart,
            "{class_name} starts at {start_time}",
        );
        template.target_roles = target_roles;
        fixture
            .ctx
            .repos
            .notification_templates
            .insert(&template)
            .await
            .unwrap();

        fixture.set_now(datetime(date(2025, 3, 3), "10:05"));
        let due = execute(EvaluateNotificationsUseCase, &fixture.ctx).await.unwrap();
        due[0].key.clone()
    }

    #[actix_web::test]
    async fn teacher_who_is_admin_gets_one_message() {
        let mut fixture = setup(SchoolKind::Weekly, date(2025, 3, 3)).await;
        let mut teacher = fixture.teacher.clone();
        teacher.roles.push(UserRole::Admin);
        fixture.ctx.repos.users.save(&teacher).await.unwrap();
        let mut admin = User::new("Grace", vec![UserRole::Admin]);
        admin.address = Some(" admin-chat ".into());
        fixture.ctx.repos.users.insert(&admin).await.unwrap();
        fixture.gateway.fail_for("admin-chat");

        let key = due_key(&mut fixture, vec![TargetRole::Teacher, TargetRole::Admin]).await;
        let summary = execute(SendNotificationUseCase { key }, &fixture.ctx)
            .await
            .unwrap();
        assert_eq!(
            summary,
            DispatchSummary {
                recipient_count: 2,
                success_count: 1,
                fail_count: 1,
            }
        );
        assert_eq!(
            fixture.gateway.sent(),
            vec![("teacher-chat".to_string(), "Robotics A starts at 10:00".to_string())]
        );
    }

    #[actix_web::test]
    async fn students_of_the_school_are_reached() {
        let mut fixture = setup(SchoolKind::Weekly, date(2025, 3, 3)).await;
        let mut student = Student::new(&fixture.school.id, Some(&fixture.group.id), "Lin");
        student.address = Some("student-chat".into());
        fixture.ctx.repos.students.insert(&student).await.unwrap();

        let key = due_key(&mut fixture, vec![TargetRole::Student]).await;
        let summary = execute(SendNotificationUseCase { key }, &fixture.ctx)
            .await
            .unwrap();
        assert_eq!(summary.success_count, 1);
    }

    #[actix_web::test]
    async fn empty_fan_out_is_reported() {
        let mut fixture = setup(SchoolKind::Weekly, date(2025, 3, 3)).await;
        let key = due_key(&mut fixture, vec![TargetRole::Manager]).await;
        assert!(matches!(
            execute(SendNotificationUseCase { key }, &fixture.ctx).await,
            Err(UseCaseError::NoEligibleRecipients(_))
        ));
        assert!(matches!(
            execute(
                SendNotificationUseCase {
                    key: "unknown".into()
                },
                &fixture.ctx
            )
            .await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}
