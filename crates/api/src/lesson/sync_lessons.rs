use crate::{
    error::SchedulerError,
    shared::{
        directory::load_directory,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use futures::future::join_all;
use tracing::{info, warn};
use tutorhub_scheduler_api_structs::sync_lessons::*;
use tutorhub_scheduler_domain::{
    date::week_start,
    scheduling::{
        find_reassigned_lessons, find_stale_lessons, materialize_lessons, slot_templates, MaterializeOptions,
        ReconcileScope,
    },
    Assignment, Lesson, LessonIndex, LessonPatch, ID,
};
use tutorhub_scheduler_infra::{LessonQuery, SchedulerContext};

fn handle_error(e: UseCaseError) -> SchedulerError {
    match e {
        UseCaseError::StorageError => SchedulerError::InternalError,
        UseCaseError::SchoolNotFound(school_id) => SchedulerError::NotFound(format!(
            "The school with id: {}, was not found.",
            school_id
        )),
        UseCaseError::ClassGroupNotInSchool(class_group_id) => {
            SchedulerError::BadClientData(format!(
                "The class group with id: {}, does not belong to the school.",
                class_group_id
            ))
        }
    }
}

pub async fn sync_lessons_controller(
    path: web::Path<PathParams>,
    body: Option<web::Json<RequestBody>>,
    ctx: web::Data<SchedulerContext>,
) -> Result<HttpResponse, SchedulerError> {
    let body = body.map(|b| b.0).unwrap_or_default();
    let usecase = SyncLessonsUseCase {
        request: SyncLessonsTrigger::OnDemand {
            school_id: path.school_id.clone(),
            class_group_id: body.class_group_id,
            weeks: body.weeks,
            anchor: body.anchor_date,
        },
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.created, res.removed, res.reassigned)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub enum AssignmentOperation {
    Created,
    Updated,
    Deleted,
}

/// Removes the stale future `Lesson`s and materializes the missing ones
#[derive(Debug)]
pub struct SyncLessonsUseCase<'a> {
    pub request: SyncLessonsTrigger<'a>,
}

#[derive(Debug)]
pub enum SyncLessonsTrigger<'a> {
    /// An `Assignment` has been created, updated or deleted. Its class
    /// group is synced with the default horizon.
    AssignmentModified(&'a Assignment, AssignmentOperation),
    /// An operator asked for a sync of a school
    OnDemand {
        school_id: ID,
        class_group_id: Option<ID>,
        weeks: Option<u32>,
        anchor: Option<NaiveDate>,
    },
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    SchoolNotFound(ID),
    ClassGroupNotInSchool(ID),
}

#[derive(Debug, Default)]
pub struct SyncSummary {
    pub created: Vec<Lesson>,
    pub removed: Vec<ID>,
    /// Lessons handed to the current teacher of their assignment
    pub reassigned: Vec<ID>,
}

struct SyncScope {
    school_id: ID,
    class_group_id: Option<ID>,
    weeks: u32,
    anchor: Option<NaiveDate>,
}

impl<'a> SyncLessonsUseCase<'a> {
    async fn scope(&self, ctx: &SchedulerContext) -> Result<Option<SyncScope>, UseCaseError> {
        match &self.request {
            SyncLessonsTrigger::AssignmentModified(assignment, _) => {
                match ctx.repos.class_groups.find(&assignment.class_group_id).await {
                    Some(group) => Ok(Some(SyncScope {
                        school_id: group.school_id,
                        class_group_id: Some(group.id),
                        weeks: ctx.config.materialize_weeks,
                        anchor: None,
                    })),
                    None => {
                        warn!(
                            "Class group {} of assignment {} not found, nothing to sync",
                            assignment.class_group_id, assignment.id
                        );
                        Ok(None)
                    }
                }
            }
            SyncLessonsTrigger::OnDemand {
                school_id,
                class_group_id,
                weeks,
                anchor,
            } => {
                if ctx.repos.schools.find(school_id).await.is_none() {
                    return Err(UseCaseError::SchoolNotFound(school_id.clone()));
                }
                if let Some(class_group_id) = class_group_id {
                    match ctx.repos.class_groups.find(class_group_id).await {
                        Some(group) if group.school_id == *school_id => (),
                        _ => {
                            return Err(UseCaseError::ClassGroupNotInSchool(
                                class_group_id.clone(),
                            ))
                        }
                    }
                }
                Ok(Some(SyncScope {
                    school_id: school_id.clone(),
                    class_group_id: class_group_id.clone(),
                    weeks: weeks.unwrap_or(ctx.config.materialize_weeks),
                    anchor: *anchor,
                }))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl<'a> UseCase for SyncLessonsUseCase<'a> {
    type Response = SyncSummary;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let scope = match self.scope(ctx).await? {
            Some(scope) => scope,
            None => return Ok(SyncSummary::default()),
        };
        let today = ctx.today();
        let threshold = scope.anchor.unwrap_or(today);

        let directory = load_directory(&[scope.school_id.clone()], ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let assignments = match &scope.class_group_id {
            Some(class_group_id) => ctx.repos.assignments.find_by_class_group(class_group_id).await,
            None => ctx.repos.assignments.find_by_school(&scope.school_id).await,
        }
        .map_err(|_| UseCaseError::StorageError)?;

        // Every lesson the materializer could collide with
        let lesson_query = LessonQuery {
            school_id: Some(scope.school_id.clone()),
            class_group_id: scope.class_group_id.clone(),
            from: Some(week_start(threshold)),
            ..Default::default()
        };
        let mut lessons = ctx
            .repos
            .lessons
            .find_by(&lesson_query)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        // Reconcile first so that a stale and a fresh lesson never exist for the same slot
        let lesson_ids = lessons.iter().map(|l| l.id.clone()).collect::<Vec<_>>();
        let protected = ctx
            .repos
            .attendance
            .find_attended_lessons(&lesson_ids)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let reconcile_scope = ReconcileScope {
            threshold,
            class_group_id: scope.class_group_id.clone(),
        };
        let removed = find_stale_lessons(
            &lessons,
            &assignments,
            &protected,
            &directory,
            &reconcile_scope,
        )
        .into_iter()
        .map(|l| l.id.clone())
        .collect::<Vec<_>>();

        if !removed.is_empty() {
            ctx.repos
                .attendance
                .delete_by_lessons(&removed)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            ctx.repos
                .lessons
                .delete_many(&removed)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            lessons.retain(|l| !removed.contains(&l.id));
        }

        let reassignments = find_reassigned_lessons(&lessons, &assignments, &protected, &reconcile_scope);
        let updates = reassignments.iter().map(|(lesson_id, teacher_id)| {
            let patch = LessonPatch {
                teacher_id: Some((*teacher_id).clone()),
                ..Default::default()
            };
            async move { ctx.repos.lessons.update(lesson_id, &patch).await }
        });
        if join_all(updates).await.iter().any(|r| r.is_err()) {
            return Err(UseCaseError::StorageError);
        }
        let reassigned = reassignments
            .into_iter()
            .map(|(lesson_id, _)| lesson_id)
            .collect::<Vec<_>>();

        let mut index = LessonIndex::new(&lessons);
        let options = MaterializeOptions {
            weeks: scope.weeks,
            today,
            anchor: scope.anchor,
        };
        let created = materialize_lessons(&slot_templates(&assignments, &directory), &mut index, &options);
        if !created.is_empty() {
            ctx.repos
                .lessons
                .insert_many(&created)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        info!(
            "Synced lessons of school {}: {} created, {} removed, {} reassigned",
            scope.school_id,
            created.len(),
            removed.len(),
            reassigned.len()
        );
        Ok(SyncSummary {
            created,
            removed,
            reassigned,
        })
    }
}
