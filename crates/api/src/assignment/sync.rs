use crate::{
    lesson::sync_lessons::{
        AssignmentOperation, SyncLessonsTrigger, SyncLessonsUseCase, SyncSummary, UseCaseError,
    },
    shared::usecase::execute,
};
use tutorhub_scheduler_domain::Assignment;
use tutorhub_scheduler_infra::SchedulerContext;

/// Syncs the lessons of the class group of `assignment`. The assignment
/// itself is already stored and stays stored if this fails.
pub async fn sync_assignment_lessons(
    assignment: &Assignment,
    operation: AssignmentOperation,
    ctx: &SchedulerContext,
) -> Result<SyncSummary, UseCaseError> {
    let usecase = SyncLessonsUseCase {
        request: SyncLessonsTrigger::AssignmentModified(assignment, operation),
    };
    execute(usecase, ctx).await
}
