use crate::dtos::{LessonDTO, ShiftPreviewDTO};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tutorhub_scheduler_domain::{AttendanceStatus, Lesson, ID};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonResponse {
    pub lesson: LessonDTO,
}

impl LessonResponse {
    pub fn new(lesson: Lesson) -> Self {
        Self {
            lesson: LessonDTO::new(lesson),
        }
    }
}

#[derive(Deserialize)]
pub struct SchoolPathParams {
    pub school_id: ID,
}

#[derive(Deserialize)]
pub struct LessonPathParams {
    pub lesson_id: ID,
}

pub mod sync_lessons {
    use super::*;

    pub type PathParams = SchoolPathParams;

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Horizon in whole weeks, the configured default if missing
        #[serde(default)]
        pub weeks: Option<u32>,
        #[serde(default)]
        pub class_group_id: Option<ID>,
        /// Weeks are counted from the week of this date and earlier days
        /// of that week may be filled in
        #[serde(default)]
        pub anchor_date: Option<NaiveDate>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub created: Vec<LessonDTO>,
        pub removed_lesson_ids: Vec<ID>,
        pub reassigned_lesson_ids: Vec<ID>,
    }

    impl APIResponse {
        pub fn new(
            created: Vec<Lesson>,
            removed_lesson_ids: Vec<ID>,
            reassigned_lesson_ids: Vec<ID>,
        ) -> Self {
            Self {
                created: created.into_iter().map(LessonDTO::new).collect(),
                removed_lesson_ids,
                reassigned_lesson_ids,
            }
        }
    }
}

pub mod record_attendance {
    use super::*;

    pub type PathParams = LessonPathParams;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AttendanceEntry {
        pub student_id: ID,
        pub status: AttendanceStatus,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub records: Vec<AttendanceEntry>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub lesson: LessonDTO,
        pub recorded_count: usize,
    }

    impl APIResponse {
        pub fn new(lesson: Lesson, recorded_count: usize) -> Self {
            Self {
                lesson: LessonDTO::new(lesson),
                recorded_count,
            }
        }
    }
}

pub mod cancel_lesson {
    use super::*;

    pub type PathParams = LessonPathParams;

    pub type APIResponse = LessonResponse;
}

/// State of the shift preview of a school as seen by the operator
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftPreviewResponse {
    /// A recomputation is scheduled and `preview` may be outdated
    pub pending: bool,
    pub preview: Option<ShiftPreviewDTO>,
}

pub mod preview_shift {
    use super::*;

    pub type PathParams = SchoolPathParams;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub target_date: NaiveDate,
        #[serde(default)]
        pub class_group_id: Option<ID>,
    }

    pub type APIResponse = ShiftPreviewResponse;
}

pub mod get_shift_preview {
    use super::*;

    pub type PathParams = SchoolPathParams;

    pub type APIResponse = ShiftPreviewResponse;
}

pub mod confirm_shift {
    use super::*;

    pub type PathParams = SchoolPathParams;

    #[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum ShiftConfirmationStatus {
        /// The first confirmation was accepted, confirm again to apply
        AwaitingConfirmation,
        Applied,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub status: ShiftConfirmationStatus,
        pub preview: ShiftPreviewDTO,
        /// Number of lessons moved, only set once applied
        pub moved_count: Option<usize>,
    }
}

pub mod cancel_shift {
    use super::*;

    pub type PathParams = SchoolPathParams;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub cancelled: bool,
    }
}
