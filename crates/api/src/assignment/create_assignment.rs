use super::sync::sync_assignment_lessons;
use crate::{
    error::SchedulerError,
    lesson::sync_lessons::AssignmentOperation,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use tutorhub_scheduler_api_structs::create_assignment::*;
use tutorhub_scheduler_domain::{date::weekday_from_number, Assignment, TimeOfDay, ID};
use tutorhub_scheduler_infra::SchedulerContext;

fn handle_error(e: UseCaseError) -> SchedulerError {
    match e {
        UseCaseError::StorageError => SchedulerError::InternalError,
        UseCaseError::LessonSyncFailed(assignment_id) => SchedulerError::Aborted(format!(
            "The assignment with id: {}, was saved but its lessons could not be synchronized.",
            assignment_id
        )),
        UseCaseError::InvalidDayOfWeek(day) => SchedulerError::BadClientData(format!(
            "Invalid day of week: {}, expected a number between 1 (Monday) and 7 (Sunday)",
            day
        )),
        UseCaseError::InvalidTimespan => SchedulerError::BadClientData(
            "The start time of an assignment has to be before its end time".into(),
        ),
        UseCaseError::ClassGroupNotFound(class_group_id) => SchedulerError::NotFound(format!(
            "The class group with id: {}, was not found.",
            class_group_id
        )),
        UseCaseError::TeacherNotFound(teacher_id) => SchedulerError::NotFound(format!(
            "The teacher with id: {}, was not found.",
            teacher_id
        )),
    }
}

pub async fn create_assignment_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let body = body.0;
    let usecase = CreateAssignmentUseCase {
        teacher_id: body.teacher_id,
        class_group_id: body.class_group_id,
        day_of_week: body.day_of_week,
        start_time: body.start_time,
        end_time: body.end_time,
    };

    execute(usecase, &ctx)
        .await
        .map(|assignment| HttpResponse::Created().json(APIResponse::new(assignment)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct CreateAssignmentUseCase {
    pub teacher_id: ID,
    pub class_group_id: ID,
    pub day_of_week: u32,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    /// The assignment was written, syncing its lessons failed
    LessonSyncFailed(ID),
    InvalidDayOfWeek(u32),
    InvalidTimespan,
    ClassGroupNotFound(ID),
    TeacherNotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateAssignmentUseCase {
    type Response = Assignment;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let weekday = weekday_from_number(self.day_of_week)
            .ok_or(UseCaseError::InvalidDayOfWeek(self.day_of_week))?;
        let group = ctx
            .repos
            .class_groups
            .find(&self.class_group_id)
            .await
            .ok_or_else(|| UseCaseError::ClassGroupNotFound(self.class_group_id.clone()))?;
        if ctx.repos.users.find(&self.teacher_id).await.is_none() {
            return Err(UseCaseError::TeacherNotFound(self.teacher_id.clone()));
        }

        let assignment = Assignment::new(
            &self.teacher_id,
            &group.school_id,
            &group.id,
            weekday,
            self.start_time,
            self.end_time,
        );
        if !assignment.is_valid() {
            return Err(UseCaseError::InvalidTimespan);
        }

        ctx.repos
            .assignments
            .insert(&assignment)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        sync_assignment_lessons(&assignment, AssignmentOperation::Created, ctx)
            .await
            .map_err(|_| UseCaseError::LessonSyncFailed(assignment.id.clone()))?;

        Ok(assignment)
    }
}
