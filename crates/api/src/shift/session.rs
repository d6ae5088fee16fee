use super::preview_shift::PreviewShiftUseCase;
use crate::shared::{debounce::Debouncer, usecase::execute};
use chrono::NaiveDate;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};
use tracing::warn;
use tutorhub_scheduler_domain::{scheduling::ShiftPreview, ID};
use tutorhub_scheduler_infra::SchedulerContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftInputs {
    pub target_date: NaiveDate,
    pub class_group_id: Option<ID>,
}

/// The state of the shift dialog of one school
#[derive(Debug)]
struct ShiftSession {
    inputs: ShiftInputs,
    preview: Option<ShiftPreview>,
    /// A recomputation of `preview` is scheduled
    pending: bool,
    /// The preview the first confirmation was given for
    confirmed: Option<ShiftPreview>,
    debouncer: Debouncer,
}

/// Result of confirming a shift plan
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    /// The plan was confirmed for the first time
    First,
    /// The plan matches the one confirmed first
    Confirmed(ShiftPreview),
    /// The plan moved away from the one confirmed first, the first
    /// confirmation is withdrawn
    Changed,
}

/// Shift sessions of every school, keyed by school id
#[derive(Clone)]
pub struct ShiftSessions {
    sessions: Arc<Mutex<HashMap<ID, ShiftSession>>>,
    debounce: Duration,
}

impl ShiftSessions {
    pub fn new(debounce: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            debounce,
        }
    }

    /// Records the inputs and schedules a debounced preview. New inputs
    /// withdraw a given first confirmation.
    pub fn request_preview(&self, school_id: &ID, inputs: ShiftInputs, ctx: SchedulerContext) {
        let debouncer = {
            let mut sessions = self.sessions.lock().unwrap();
            let session = sessions
                .entry(school_id.clone())
                .or_insert_with(|| ShiftSession {
                    inputs: inputs.clone(),
                    preview: None,
                    pending: false,
                    confirmed: None,
                    debouncer: Debouncer::new(self.debounce),
                });
            if session.inputs != inputs {
                session.inputs = inputs.clone();
                session.confirmed = None;
            }
            session.pending = true;
            session.debouncer.clone()
        };

        let sessions = self.clone();
        let school_id = school_id.clone();
        debouncer.schedule(async move {
            let usecase = PreviewShiftUseCase {
                school_id: school_id.clone(),
                class_group_id: inputs.class_group_id.clone(),
                target_date: inputs.target_date,
            };
            match execute(usecase, &ctx).await {
                Ok(plan) => sessions.store_preview(&school_id, &inputs, plan.preview),
                Err(e) => {
                    warn!("Shift preview of school {} failed: {:?}", school_id, e);
                    sessions.finish_pending(&school_id, &inputs);
                }
            }
        });
    }

    fn store_preview(&self, school_id: &ID, inputs: &ShiftInputs, preview: ShiftPreview) {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(session) = sessions.get_mut(school_id) {
            if session.inputs == *inputs {
                session.preview = Some(preview);
                session.pending = false;
            }
        }
    }

    fn finish_pending(&self, school_id: &ID, inputs: &ShiftInputs) {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(session) = sessions.get_mut(school_id) {
            if session.inputs == *inputs {
                session.pending = false;
            }
        }
    }

    /// Whether a preview is pending and the last computed preview
    pub fn state(&self, school_id: &ID) -> Option<(bool, Option<ShiftPreview>)> {
        let sessions = self.sessions.lock().unwrap();
        sessions
            .get(school_id)
            .map(|s| (s.pending, s.preview.clone()))
    }

    pub fn inputs(&self, school_id: &ID) -> Option<ShiftInputs> {
        let sessions = self.sessions.lock().unwrap();
        sessions.get(school_id).map(|s| s.inputs.clone())
    }

    /// Confirms the freshly computed `preview`. The second confirmation only
    /// holds if the plan still equals the one confirmed first.
    pub fn confirm(&self, school_id: &ID, preview: &ShiftPreview) -> Confirmation {
        let mut sessions = self.sessions.lock().unwrap();
        let session = match sessions.get_mut(school_id) {
            Some(session) => session,
            None => return Confirmation::Changed,
        };
        match session.confirmed.take() {
            None => {
                session.confirmed = Some(preview.clone());
                Confirmation::First
            }
            Some(confirmed) if confirmed.same_shift(preview) => Confirmation::Confirmed(confirmed),
            Some(_) => Confirmation::Changed,
        }
    }

    pub fn withdraw_confirmation(&self, school_id: &ID) {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(session) = sessions.get_mut(school_id) {
            session.confirmed = None;
        }
    }

    /// Ends the session and drops a scheduled preview. Returns false if
    /// there was no session.
    pub fn close(&self, school_id: &ID) -> bool {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.remove(school_id) {
            Some(session) => {
                session.debouncer.cancel();
                true
            }
            None => false,
        }
    }
}
