use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tutorhub_scheduler_domain::{
    scheduling::ShiftPreview, Lesson, LessonKind, LessonStatus, TimeOfDay, ID,
};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LessonDTO {
    pub id: ID,
    pub school_id: ID,
    pub class_group_id: ID,
    pub teacher_id: Option<ID>,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub status: LessonStatus,
    #[serde(rename = "type")]
    pub kind: LessonKind,
}

impl LessonDTO {
    pub fn new(lesson: Lesson) -> Self {
        Self {
            id: lesson.id,
            school_id: lesson.school_id,
            class_group_id: lesson.class_group_id,
            teacher_id: lesson.teacher_id,
            date: lesson.date,
            start_time: lesson.start_time,
            end_time: lesson.end_time,
            status: lesson.status,
            kind: lesson.kind,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ShiftPreviewDTO {
    pub target_date: NaiveDate,
    pub candidate_count: usize,
    pub current_start: Option<NaiveDate>,
    pub shift_days: i64,
    pub protected_count: usize,
    pub can_apply: bool,
}

impl ShiftPreviewDTO {
    pub fn new(preview: ShiftPreview) -> Self {
        Self {
            can_apply: preview.can_apply(),
            target_date: preview.target_date,
            candidate_count: preview.candidate_count,
            current_start: preview.current_start,
            shift_days: preview.shift_days,
            protected_count: preview.protected_count,
        }
    }
}
