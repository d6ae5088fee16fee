use super::{
    preview_shift::PreviewShiftUseCase,
    session::{Confirmation, ShiftSessions},
};
use crate::{
    error::SchedulerError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use futures::future::join_all;
use tracing::{error, info};
use tutorhub_scheduler_api_structs::{
    cancel_shift, confirm_shift::*, dtos::ShiftPreviewDTO,
};
use tutorhub_scheduler_domain::{scheduling::ShiftPreview, LessonPatch, ID};
use tutorhub_scheduler_infra::SchedulerContext;

fn handle_error(e: UseCaseError) -> SchedulerError {
    match e {
        UseCaseError::StorageError => SchedulerError::InternalError,
        UseCaseError::SchoolNotFound(school_id) => SchedulerError::NotFound(format!(
            "The school with id: {}, was not found.",
            school_id
        )),
        UseCaseError::NothingToShift => SchedulerError::Unprocessable(
            "The shift would not move any lesson, pick another target date".into(),
        ),
        UseCaseError::PlanChanged => SchedulerError::Unprocessable(
            "The lessons changed since the shift was confirmed, review the preview and confirm again"
                .into(),
        ),
        UseCaseError::Aborted { applied } => SchedulerError::Aborted(format!(
            "Shifting lessons failed after {} lessons were moved",
            applied
        )),
    }
}

/// The first call confirms the previewed shift, the second call applies it
pub async fn confirm_shift_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<SchedulerContext>,
    sessions: web::Data<ShiftSessions>,
) -> Result<HttpResponse, SchedulerError> {
    let school_id = path.school_id.clone();
    let inputs = sessions.inputs(&school_id).ok_or_else(|| {
        SchedulerError::NotFound(format!(
            "No shift preview was requested for the school with id: {}",
            school_id
        ))
    })?;

    let preview = execute(
        PreviewShiftUseCase {
            school_id: school_id.clone(),
            class_group_id: inputs.class_group_id.clone(),
            target_date: inputs.target_date,
        },
        &ctx,
    )
    .await
    .map_err(|_| SchedulerError::InternalError)?
    .preview;
    if !preview.can_apply() {
        sessions.withdraw_confirmation(&school_id);
        return Err(handle_error(UseCaseError::NothingToShift));
    }

    let confirmed = match sessions.confirm(&school_id, &preview) {
        Confirmation::First => {
            return Ok(HttpResponse::Ok().json(APIResponse {
                status: ShiftConfirmationStatus::AwaitingConfirmation,
                preview: ShiftPreviewDTO::new(preview),
                moved_count: None,
            }))
        }
        Confirmation::Changed => return Err(handle_error(UseCaseError::PlanChanged)),
        Confirmation::Confirmed(confirmed) => confirmed,
    };

    let usecase = ApplyShiftUseCase {
        school_id: school_id.clone(),
        class_group_id: inputs.class_group_id,
        target_date: inputs.target_date,
        confirmed,
    };
    let res = execute(usecase, &ctx).await;
    sessions.close(&school_id);

    res.map(|res| {
        HttpResponse::Ok().json(APIResponse {
            status: ShiftConfirmationStatus::Applied,
            preview: ShiftPreviewDTO::new(res.preview),
            moved_count: Some(res.moved_count),
        })
    })
    .map_err(handle_error)
}

pub async fn cancel_shift_controller(
    path: web::Path<cancel_shift::PathParams>,
    sessions: web::Data<ShiftSessions>,
) -> HttpResponse {
    HttpResponse::Ok().json(cancel_shift::APIResponse {
        cancelled: sessions.close(&path.school_id),
    })
}

/// Moves every unprotected scheduled lesson by the same number of days.
/// The lessons are read again and the shift is only applied if it still
/// equals the `confirmed` preview.
#[derive(Debug)]
pub struct ApplyShiftUseCase {
    pub school_id: ID,
    pub class_group_id: Option<ID>,
    pub target_date: NaiveDate,
    pub confirmed: ShiftPreview,
}

#[derive(Debug)]
pub struct ShiftOutcome {
    pub preview: ShiftPreview,
    pub moved_count: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    SchoolNotFound(ID),
    NothingToShift,
    PlanChanged,
    /// An update failed, the earlier updates are kept
    Aborted { applied: usize },
}

#[async_trait::async_trait(?Send)]
impl UseCase for ApplyShiftUseCase {
    type Response = ShiftOutcome;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &SchedulerContext) -> Result<Self::Response, Self::Errors> {
        let mut preview_usecase = PreviewShiftUseCase {
            school_id: self.school_id.clone(),
            class_group_id: self.class_group_id.clone(),
            target_date: self.target_date,
        };
        let plan = preview_usecase.execute(ctx).await.map_err(|e| match e {
            super::preview_shift::UseCaseError::StorageError => UseCaseError::StorageError,
            super::preview_shift::UseCaseError::SchoolNotFound(id) => UseCaseError::SchoolNotFound(id),
        })?;
        if !plan.preview.can_apply() {
            return Err(UseCaseError::NothingToShift);
        }
        if !plan.preview.same_shift(&self.confirmed) {
            return Err(UseCaseError::PlanChanged);
        }

        let mut applied = 0;
        for batch in plan.moves.chunks(ctx.config.shift_batch_size) {
            let updates = batch.iter().map(|m| {
                let patch = LessonPatch {
                    date: Some(m.to),
                    ..Default::default()
                };
                async move { ctx.repos.lessons.update(&m.lesson_id, &patch).await }
            });
            let results = join_all(updates).await;
            let failed = results.iter().filter(|r| r.is_err()).count();
            applied += results.len() - failed;
            if failed > 0 {
                error!(
                    "Shift of school {} aborted: {} updates failed, {} lessons moved",
                    self.school_id, failed, applied
                );
                return Err(UseCaseError::Aborted { applied });
            }
        }

        info!(
            "Shifted {} lessons of school {} by {} days",
            applied, self.school_id, plan.preview.shift_days
        );
        Ok(ShiftOutcome {
            preview: plan.preview,
            moved_count: applied,
        })
    }
}
