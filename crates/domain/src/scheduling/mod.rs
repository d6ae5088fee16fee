mod materialize;
mod recipients;
mod reconcile;
mod shift;
mod triggers;

pub use materialize::{materialize_lessons, slot_templates, MaterializeOptions, SlotTemplate};
pub use recipients::{resolve_recipients, RecipientSources};
pub use reconcile::{find_reassigned_lessons, find_stale_lessons, ReconcileScope};
pub use shift::{plan_shift, LessonMove, ShiftPlan, ShiftPreview};
pub use triggers::{
    due_notifications, is_within_window, minutes_since, WINDOW_LEAD_MINUTES,
    WINDOW_TAIL_MINUTES,
};

use crate::{
    school::{event_dates, ClassGroup, School},
    shared::entity::ID,
};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Lookup of the schools and class groups a scheduling run touches
#[derive(Debug, Default)]
pub struct Directory {
    schools: HashMap<ID, School>,
    class_groups: HashMap<ID, ClassGroup>,
}

impl Directory {
    pub fn new(schools: Vec<School>, class_groups: Vec<ClassGroup>) -> Self {
        Self {
            schools: schools.into_iter().map(|s| (s.id.clone(), s)).collect(),
            class_groups: class_groups
                .into_iter()
                .map(|g| (g.id.clone(), g))
                .collect(),
        }
    }

    pub fn school(&self, school_id: &ID) -> Option<&School> {
        self.schools.get(school_id)
    }

    pub fn class_group(&self, class_group_id: &ID) -> Option<&ClassGroup> {
        self.class_groups.get(class_group_id)
    }

    /// The school that owns the class group
    pub fn school_of_group(&self, class_group_id: &ID) -> Option<&School> {
        self.class_group(class_group_id)
            .and_then(|g| self.school(&g.school_id))
    }

    pub fn event_dates(&self, school_id: &ID) -> BTreeSet<NaiveDate> {
        event_dates(
            self.class_groups
                .values()
                .filter(|g| g.school_id == *school_id),
        )
    }
}
