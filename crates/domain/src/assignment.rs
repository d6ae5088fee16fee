use crate::{
    shared::entity::{Entity, ID},
    time_of_day::TimeOfDay,
};
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// An `Assignment` is a recurring weekly teaching slot: a teacher meets a
/// class group every week on `weekday` between `start_time` and `end_time`.
/// `Lesson`s are materialized from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: ID,
    pub teacher_id: ID,
    pub school_id: ID,
    pub class_group_id: ID,
    pub weekday: Weekday,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl Assignment {
    pub fn new(
        teacher_id: &ID,
        school_id: &ID,
        class_group_id: &ID,
        weekday: Weekday,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    ) -> Self {
        Self {
            id: Default::default(),
            teacher_id: teacher_id.clone(),
            school_id: school_id.clone(),
            class_group_id: class_group_id.clone(),
            weekday,
            start_time,
            end_time,
        }
    }

    /// 1 = Monday .. 7 = Sunday
    pub fn day_of_week(&self) -> u32 {
        self.weekday.number_from_monday()
    }

    pub fn is_valid(&self) -> bool {
        self.start_time < self.end_time
    }
}

impl Entity for Assignment {
    fn id(&self) -> &ID {
        &self.id
    }
}
