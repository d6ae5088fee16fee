use serde::{Deserialize, Serialize};
use tutorhub_scheduler_domain::{Assignment, TimeOfDay, ID};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDTO {
    pub id: ID,
    pub teacher_id: ID,
    pub school_id: ID,
    pub class_group_id: ID,
    /// 1 = Monday .. 7 = Sunday
    pub day_of_week: u32,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl AssignmentDTO {
    pub fn new(assignment: Assignment) -> Self {
        Self {
            day_of_week: assignment.day_of_week(),
            id: assignment.id,
            teacher_id: assignment.teacher_id,
            school_id: assignment.school_id,
            class_group_id: assignment.class_group_id,
            start_time: assignment.start_time,
            end_time: assignment.end_time,
        }
    }
}
