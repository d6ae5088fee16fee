use crate::{
    error::SchedulerError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use tutorhub_scheduler_api_structs::record_attendance::*;
use tutorhub_scheduler_domain::{
    AttendanceRecord, AttendanceStatus, Lesson, LessonPatch, LessonStatus, ID,
};
use tutorhub_scheduler_infra::SchedulerContext;

fn handle_error(e: UseCaseError) -> SchedulerError {
    match e {
        UseCaseError::StorageError => SchedulerError::InternalError,
        UseCaseError::NotFound(lesson_id) => SchedulerError::NotFound(format!(
            "The lesson with id: {}, was not found.",
            lesson_id
        )),
        UseCaseError::LessonCancelled(lesson_id) => SchedulerError::Conflict(format!(
            "The lesson with id: {}, is cancelled and can not be attended.",
            lesson_id
        )),
        UseCaseError::EmptyRecords => {
            SchedulerError::BadClientData("At least one attendance record is required".into())
        }
    }
}

pub async fn record_attendance_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let body = body.0;
    let usecase = RecordAttendanceUseCase {
        lesson_id: path.lesson_id.clone(),
        records: body
            .records
            .into_iter()
            .map(|r| (r.student_id, r.status))
            .collect(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.lesson, res.recorded_count)))
        .map_err(handle_error)
}

/// Stores the attendance of a `Lesson` and marks it completed.
/// An attended lesson is never removed by a sync nor moved by a shift.
#[derive(Debug)]
pub struct RecordAttendanceUseCase {
    pub lesson_id: ID,
    pub records: Vec<(ID, AttendanceStatus)>,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub lesson: Lesson,
    pub recorded_count: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    NotFound(ID),
    LessonCancelled(ID),
    EmptyRecords,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RecordAttendanceUseCase {
    type Response = UseCaseResponse;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        if self.records.is_empty() {
            return Err(UseCaseError::EmptyRecords);
        }
        let lesson = match ctx.repos.lessons.find(&self.lesson_id).await {
            Some(lesson) => lesson,
            None => return Err(UseCaseError::NotFound(self.lesson_id.clone())),
        };
        if lesson.status == LessonStatus::Cancelled {
            return Err(UseCaseError::LessonCancelled(lesson.id));
        }

        let records = self
            .records
            .iter()
            .map(|(student_id, status)| AttendanceRecord::new(&lesson.id, student_id, *status))
            .collect::<Vec<_>>();
        ctx.repos
            .attendance
            .insert_many(&records)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let patch = LessonPatch {
            status: Some(LessonStatus::Completed),
            ..Default::default()
        };
        let lesson = ctx
            .repos
            .lessons
            .update(&lesson.id, &patch)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or_else(|| UseCaseError::NotFound(lesson.id.clone()))?;

        Ok(UseCaseResponse {
            lesson,
            recorded_count: records.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, setup};
    use tutorhub_scheduler_domain::SchoolKind;

    #[actix_web::test]
    async fn completes_the_lesson() {
        let fixture = setup(SchoolKind::Weekly, date(2025, 3, 3)).await;
        let lesson = fixture.lesson(date(2025, 3, 3), "10:00", "11:00");
        fixture
            .ctx
            .repos
            .lessons
            .insert_many(&[lesson.clone()])
            .await
            .unwrap();

        let usecase = RecordAttendanceUseCase {
            lesson_id: lesson.id.clone(),
            records: vec![
                (ID::default(), AttendanceStatus::Present),
                (ID::default(), AttendanceStatus::Late),
            ],
        };
        let res = execute(usecase, &fixture.ctx).await.unwrap();
        assert_eq!(res.recorded_count, 2);
        assert_eq!(res.lesson.status, LessonStatus::Completed);

        let records = fixture
            .ctx
            .repos
            .attendance
            .find_by_lesson(&lesson.id)
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
    }

    #[actix_web::test]
    async fn rejects_cancelled_and_missing_lessons() {
        let fixture = setup(SchoolKind::Weekly, date(2025, 3, 3)).await;
        let mut lesson = fixture.lesson(date(2025, 3, 3), "10:00", "11:00");
        lesson.status = LessonStatus::Cancelled;
        fixture
            .ctx
            .repos
            .lessons
            .insert_many(&[lesson.clone()])
            .await
            .unwrap();

        let usecase = RecordAttendanceUseCase {
            lesson_id: lesson.id.clone(),
            records: vec![(ID::default(), AttendanceStatus::Present)],
        };
        assert!(matches!(
            execute(usecase, &fixture.ctx).await,
            Err(UseCaseError::LessonCancelled(_))
        ));

        let usecase = RecordAttendanceUseCase {
            lesson_id: ID::default(),
            records: vec![(ID::default(), AttendanceStatus::Present)],
        };
        assert!(matches!(
            execute(usecase, &fixture.ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}
