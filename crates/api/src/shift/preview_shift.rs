use super::session::{ShiftInputs, ShiftSessions};
use crate::{
    error::SchedulerError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use tutorhub_scheduler_api_structs::{dtos::ShiftPreviewDTO, preview_shift::*, ShiftPreviewResponse};
use tutorhub_scheduler_domain::{
    scheduling::{plan_shift, ShiftPlan, ShiftPreview},
    LessonStatus, ID,
};
use tutorhub_scheduler_infra::{LessonQuery, SchedulerContext};

fn handle_error(e: UseCaseError) -> SchedulerError {
    match e {
        UseCaseError::StorageError => SchedulerError::InternalError,
        UseCaseError::SchoolNotFound(school_id) => SchedulerError::NotFound(format!(
            "The school with id: {}, was not found.",
            school_id
        )),
    }
}

fn to_response(pending: bool, preview: Option<ShiftPreview>) -> ShiftPreviewResponse {
    ShiftPreviewResponse {
        pending,
        preview: preview.map(ShiftPreviewDTO::new),
    }
}

/// Stores the preview inputs of the school and schedules a debounced
/// recomputation. The response holds the last computed preview.
pub async fn preview_shift_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<SchedulerContext>,
    sessions: web::Data<ShiftSessions>,
) -> Result<HttpResponse, SchedulerError> {
    if ctx.repos.schools.find(&path.school_id).await.is_none() {
        return Err(handle_error(UseCaseError::SchoolNotFound(path.school_id.clone())));
    }
    let inputs = ShiftInputs {
        target_date: body.target_date,
        class_group_id: body.class_group_id.clone(),
    };
    sessions.request_preview(&path.school_id, inputs, ctx.get_ref().clone());

    let (pending, preview) = sessions.state(&path.school_id).unwrap_or((true, None));
    Ok(HttpResponse::Accepted().json(to_response(pending, preview)))
}

pub async fn get_shift_preview_controller(
    path: web::Path<PathParams>,
    sessions: web::Data<ShiftSessions>,
) -> Result<HttpResponse, SchedulerError> {
    match sessions.state(&path.school_id) {
        Some((pending, preview)) => Ok(HttpResponse::Ok().json(to_response(pending, preview))),
        None => Err(SchedulerError::NotFound(format!(
            "No shift preview was requested for the school with id: {}",
            path.school_id
        ))),
    }
}

/// Computes what a bulk shift of the scheduled lessons would do. Nothing
/// is written, every execution reads the lessons again.
#[derive(Debug)]
pub struct PreviewShiftUseCase {
    pub school_id: ID,
    pub class_group_id: Option<ID>,
    pub target_date: NaiveDate,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    SchoolNotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for PreviewShiftUseCase {
    type Response = ShiftPlan;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        if ctx.repos.schools.find(&self.school_id).await.is_none() {
            return Err(UseCaseError::SchoolNotFound(self.school_id.clone()));
        }

        let query = LessonQuery {
            school_id: Some(self.school_id.clone()),
            class_group_id: self.class_group_id.clone(),
            status: Some(LessonStatus::Scheduled),
            ..Default::default()
        };
        let lessons = ctx
            .repos
            .lessons
            .find_by(&query)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let lesson_ids = lessons.iter().map(|l| l.id.clone()).collect::<Vec<_>>();
        let protected = ctx
            .repos
            .attendance
            .find_attended_lessons(&lesson_ids)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(plan_shift(lessons, &protected, self.target_date))
    }
}
