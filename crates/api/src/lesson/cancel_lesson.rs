use crate::{
    error::SchedulerError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use tutorhub_scheduler_api_structs::cancel_lesson::*;
use tutorhub_scheduler_domain::{Lesson, LessonPatch, LessonStatus, ID};
use tutorhub_scheduler_infra::SchedulerContext;

fn handle_error(e: UseCaseError) -> SchedulerError {
    match e {
        UseCaseError::StorageError => SchedulerError::InternalError,
        UseCaseError::NotFound(lesson_id) => SchedulerError::NotFound(format!(
            "The lesson with id: {}, was not found.",
            lesson_id
        )),
        UseCaseError::AlreadyCompleted(lesson_id) => SchedulerError::Conflict(format!(
            "The lesson with id: {}, is already completed.",
            lesson_id
        )),
    }
}

pub async fn cancel_lesson_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let usecase = CancelLessonUseCase {
        lesson_id: path.lesson_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|lesson| HttpResponse::Ok().json(APIResponse::new(lesson)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct CancelLessonUseCase {
    pub lesson_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    NotFound(ID),
    AlreadyCompleted(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for CancelLessonUseCase {
    type Response = Lesson;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let lesson = match ctx.repos.lessons.find(&self.lesson_id).await {
            Some(lesson) => lesson,
            None => return Err(UseCaseError::NotFound(self.lesson_id.clone())),
        };
        match lesson.status {
            LessonStatus::Completed => Err(UseCaseError::AlreadyCompleted(lesson.id)),
            LessonStatus::Cancelled => Ok(lesson),
            LessonStatus::Scheduled => {
                let patch = LessonPatch {
                    status: Some(LessonStatus::Cancelled),
                    ..Default::default()
                };
                ctx.repos
                    .lessons
                    .update(&lesson.id, &patch)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?
                    .ok_or(UseCaseError::NotFound(lesson.id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, setup};
    use tutorhub_scheduler_domain::SchoolKind;

    #[actix_web::test]
    async fn cancels_once_and_keeps_completed_lessons() {
        let fixture = setup(SchoolKind::Weekly, date(2025, 3, 3)).await;
        let lesson = fixture.lesson(date(2025, 3, 4), "10:00", "11:00");
        let mut completed = fixture.lesson(date(2025, 3, 3), "10:00", "11:00");
        completed.status = LessonStatus::Completed;
        fixture
            .ctx
            .repos
            .lessons
            .insert_many(&[lesson.clone(), completed.clone()])
            .await
            .unwrap();

        for _ in 0..2 {
            let usecase = CancelLessonUseCase {
                lesson_id: lesson.id.clone(),
            };
            let res = execute(usecase, &fixture.ctx).await.unwrap();
            assert_eq!(res.status, LessonStatus::Cancelled);
        }

        let usecase = CancelLessonUseCase {
            lesson_id: completed.id.clone(),
        };
        assert!(matches!(
            execute(usecase, &fixture.ctx).await,
            Err(UseCaseError::AlreadyCompleted(_))
        ));
    }
}
