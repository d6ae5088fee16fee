use super::sync::sync_assignment_lessons;
use crate::{
    error::SchedulerError,
    lesson::sync_lessons::AssignmentOperation,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use tutorhub_scheduler_api_structs::delete_assignment::*;
use tutorhub_scheduler_domain::{Assignment, ID};
use tutorhub_scheduler_infra::SchedulerContext;

fn handle_error(e: UseCaseError) -> SchedulerError {
    match e {
        UseCaseError::StorageError => SchedulerError::InternalError,
        UseCaseError::LessonSyncFailed(assignment_id) => SchedulerError::Aborted(format!(
            "The assignment with id: {}, was saved but its lessons could not be synchronized.",
            assignment_id
        )),
        UseCaseError::NotFound(assignment_id) => SchedulerError::NotFound(format!(
            "The assignment with id: {}, was not found.",
            assignment_id
        )),
    }
}

pub async fn delete_assignment_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let usecase = DeleteAssignmentUseCase {
        assignment_id: path.assignment_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|assignment| HttpResponse::Ok().json(APIResponse::new(assignment)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct DeleteAssignmentUseCase {
    pub assignment_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    /// The assignment was written, syncing its lessons failed
    LessonSyncFailed(ID),
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteAssignmentUseCase {
    type Response = Assignment;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let assignment = ctx
            .repos
            .assignments
            .delete(&self.assignment_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(self.assignment_id.clone()))?;
        sync_assignment_lessons(&assignment, AssignmentOperation::Deleted, ctx)
            .await
            .map_err(|_| UseCaseError::LessonSyncFailed(assignment.id.clone()))?;

        Ok(assignment)
    }
}
