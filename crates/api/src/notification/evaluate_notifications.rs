use crate::{
    error::SchedulerError,
    shared::{
        directory::load_directory,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use chrono::Duration;
use itertools::Itertools;
use tutorhub_scheduler_api_structs::evaluate_notifications::*;
use tutorhub_scheduler_domain::{scheduling::due_notifications, DueNotification};
use tutorhub_scheduler_infra::{LessonQuery, SchedulerContext};

fn handle_error(e: UseCaseError) -> SchedulerError {
    match e {
        UseCaseError::StorageError => SchedulerError::InternalError,
    }
}

pub async fn evaluate_notifications_controller(
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    execute(EvaluateNotificationsUseCase, &ctx)
        .await
        .map(|due| HttpResponse::Ok().json(APIResponse::new(due)))
        .map_err(handle_error)
}

/// Recomputes every due notification from the stored lessons and templates
/// and replaces the due set of the notification board. Returns the
/// notifications that are not dismissed.
#[derive(Debug)]
pub struct EvaluateNotificationsUseCase;

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for EvaluateNotificationsUseCase {
    type Response = Vec<DueNotification>;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.now();
        let today = now.date();

        let templates = ctx
            .repos
            .notification_templates
            .find_active()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        // Lesson end reminders of late lessons can still be due after midnight
        let query = LessonQuery {
            from: Some(today - Duration::days(1)),
            to: Some(today),
            ..Default::default()
        };
        let lessons = ctx
            .repos
            .lessons
            .find_by(&query)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let school_ids = templates
            .iter()
            .map(|t| t.school_id.clone())
            .unique()
            .collect::<Vec<_>>();
        let directory = load_directory(&school_ids, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let due = due_notifications(&templates, &lessons, &directory, now);

        let mut board = ctx.notifications.lock().unwrap();
        board.replace(due);
        Ok(board.visible(None))
    }
}
