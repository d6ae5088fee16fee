use crate::dtos::AssignmentDTO;
use serde::{Deserialize, Serialize};
use tutorhub_scheduler_domain::{Assignment, TimeOfDay, ID};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    pub assignment: AssignmentDTO,
}

impl AssignmentResponse {
    pub fn new(assignment: Assignment) -> Self {
        Self {
            assignment: AssignmentDTO::new(assignment),
        }
    }
}

pub mod create_assignment {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub teacher_id: ID,
        /// The school is the owner of the class group
        pub class_group_id: ID,
        pub day_of_week: u32,
        pub start_time: TimeOfDay,
        pub end_time: TimeOfDay,
    }

    pub type APIResponse = AssignmentResponse;
}

pub mod update_assignment {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub assignment_id: ID,
    }

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub teacher_id: Option<ID>,
        #[serde(default)]
        pub class_group_id: Option<ID>,
        #[serde(default)]
        pub day_of_week: Option<u32>,
        #[serde(default)]
        pub start_time: Option<TimeOfDay>,
        #[serde(default)]
        pub end_time: Option<TimeOfDay>,
    }

    pub type APIResponse = AssignmentResponse;
}

pub mod delete_assignment {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub assignment_id: ID,
    }

    pub type APIResponse = AssignmentResponse;
}
