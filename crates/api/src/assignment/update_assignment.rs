use super::sync::sync_assignment_lessons;
use crate::{
    error::SchedulerError,
    lesson::sync_lessons::AssignmentOperation,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use tutorhub_scheduler_api_structs::update_assignment::*;
use tutorhub_scheduler_domain::{date::weekday_from_number, Assignment, TimeOfDay, ID};
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
    }
}

pub async fn update_assignment_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let body = body.0;
    let usecase = UpdateAssignmentUseCase {
        assignment_id: path.assignment_id.clone(),
        teacher_id: body.teacher_id,
        class_group_id: body.class_group_id,
        day_of_week: body.day_of_week,
        start_time: body.start_time,
        end_time: body.end_time,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.assignment)))
        .map_err(handle_error)
}

#[derive(Debug, Default)]
pub struct UpdateAssignmentUseCase {
    pub assignment_id: ID,
    pub teacher_id: Option<ID>,
    pub class_group_id: Option<ID>,
    pub day_of_week: Option<u32>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub assignment: Assignment,
    /// The assignment before the update
    pub previous: Assignment,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    /// The assignment was written, syncing its lessons failed
    LessonSyncFailed(ID),
    NotFound(ID),
    InvalidDayOfWeek(u32),
    InvalidTimespan,
    ClassGroupNotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateAssignmentUseCase {
    type Response = UseCaseResponse;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let previous = ctx
            .repos
            .assignments
            .find(&self.assignment_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.assignment_id.clone()))?;
        let mut assignment = previous.clone();

        if let Some(teacher_id) = &self.teacher_id {
            assignment.teacher_id = teacher_id.clone();
        }
        if let Some(class_group_id) = &self.class_group_id {
            let group = ctx
                .repos
                .class_groups
                .find(class_group_id)
                .await
                .ok_or_else(|| UseCaseError::ClassGroupNotFound(class_group_id.clone()))?;
            assignment.class_group_id = group.id;
            assignment.school_id = group.school_id;
        }
        if let Some(day) = self.day_of_week {
            assignment.weekday = weekday_from_number(day).ok_or(UseCaseError::InvalidDayOfWeek(day))?;
        }
        if let Some(start_time) = self.start_time {
            assignment.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            assignment.end_time = end_time;
        }
        if !assignment.is_valid() {
            return Err(UseCaseError::InvalidTimespan);
        }

        ctx.repos
            .assignments
            .save(&assignment)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if previous.class_group_id != assignment.class_group_id {
            sync_assignment_lessons(&previous, AssignmentOperation::Deleted, ctx)
                .await
                .map_err(|_| UseCaseError::LessonSyncFailed(assignment.id.clone()))?;
        }
        sync_assignment_lessons(&assignment, AssignmentOperation::Updated, ctx)
            .await
            .map_err(|_| UseCaseError::LessonSyncFailed(assignment.id.clone()))?;

        Ok(UseCaseResponse {
            assignment,
            previous,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, setup};
    use chrono::Weekday;
    use tutorhub_scheduler_domain::{
        AttendanceRecord, AttendanceStatus, ClassGroup, SchoolKind, User, UserRole,
    };
    use tutorhub_scheduler_infra::LessonQuery;

    #[actix_web::test]
    async fn moving_an_assignment_resyncs_both_class_groups() {
        let fixture = setup(SchoolKind::Weekly, date(2025, 3, 3)).await;
        let other_group = ClassGroup::new(&fixture.school.id, "Robotics B");
        fixture
            .ctx
            .repos
            .class_groups
            .insert(&other_group)
            .await
            .unwrap();
        let assignment = fixture.assign(Weekday::Tue, "10:00", "11:00").await;

        let usecase = UpdateAssignmentUseCase {
            assignment_id: assignment.id.clone(),
            class_group_id: Some(other_group.id.clone()),
            day_of_week: Some(3),
            ..Default::default()
        };
        let res = execute(usecase, &fixture.ctx).await.unwrap();
        assert_eq!(res.previous.class_group_id, fixture.group.id);
        assert_eq!(res.assignment.weekday, Weekday::Wed);

        let lessons = fixture
            .ctx
            .repos
            .lessons
            .find_by(&LessonQuery::default())
            .await
            .unwrap();
        assert!(!lessons.is_empty());
        assert!(lessons
            .iter()
            .all(|l| l.class_group_id == other_group.id && l.weekday() == Weekday::Wed));
    }

    #[actix_web::test]
    async fn rejects_a_reversed_timespan() {
        let fixture = setup(SchoolKind::Weekly, date(2025, 3, 3)).await;
        let assignment = fixture.assign(Weekday::Tue, "10:00", "11:00").await;

        let usecase = UpdateAssignmentUseCase {
            assignment_id: assignment.id.clone(),
            start_time: Some("12:00".parse().unwrap()),
            ..Default::default()
        };
        assert!(matches!(
            execute(usecase, &fixture.ctx).await,
            Err(UseCaseError::InvalidTimespan)
        ));
        let stored = fixture.ctx.repos.assignments.find(&assignment.id).await.unwrap();
        assert_eq!(stored.start_time, assignment.start_time);
    }

    #[actix_web::test]
    async fn a_new_teacher_takes_over_the_future_lessons() {
        let fixture = setup(SchoolKind::Weekly, date(2025, 3, 3)).await;
        let assignment = fixture.assign(Weekday::Tue, "10:00", "11:00").await;
        let lesson = fixture.lesson(date(2025, 3, 4), "10:00", "11:00");
        fixture
            .ctx
            .repos
            .lessons
            .insert_many(&[lesson.clone()])
            .await
            .unwrap();
        let record = AttendanceRecord::new(&lesson.id, &ID::default(), AttendanceStatus::Present);
        fixture
            .ctx
            .repos
            .attendance
            .insert_many(&[record])
            .await
            .unwrap();
        sync_assignment_lessons(&assignment, AssignmentOperation::Created, &fixture.ctx)
            .await
            .unwrap();
        let substitute = User::new("Grace", vec![UserRole::Teacher]);
        fixture.ctx.repos.users.insert(&substitute).await.unwrap();

        let usecase = UpdateAssignmentUseCase {
            assignment_id: assignment.id.clone(),
            teacher_id: Some(substitute.id.clone()),
            ..Default::default()
        };
        execute(usecase, &fixture.ctx).await.unwrap();

        let lessons = fixture
            .ctx
            .repos
            .lessons
            .find_by(&LessonQuery::default())
            .await
            .unwrap();
        assert_eq!(lessons.len(), fixture.ctx.config.materialize_weeks as usize);
        for l in lessons {
            let expected = if l.id == lesson.id {
                &fixture.teacher.id
            } else {
                &substitute.id
            };
            assert_eq!(l.teacher_id.as_ref(), Some(expected));
        }
    }
}
