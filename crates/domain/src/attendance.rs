use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Late => "late",
            Self::Excused => "excused",
        }
    }

    pub fn parse(status: &str) -> Option<Self> {
        match status {
            "present" => Some(Self::Present),
            "absent" => Some(Self::Absent),
            "late" => Some(Self::Late),
            "excused" => Some(Self::Excused),
            _ => None,
        }
    }
}

/// Presence of one student at one `Lesson`. A lesson with at least one
/// record is protected from reconciliation and date shifting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: ID,
    pub lesson_id: ID,
    pub student_id: ID,
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    pub fn new(lesson_id: &ID, student_id: &ID, status: AttendanceStatus) -> Self {
        Self {
            id: Default::default(),
            lesson_id: lesson_id.clone(),
            student_id: student_id.clone(),
            status,
        }
    }
}

impl Entity for AttendanceRecord {
    fn id(&self) -> &ID {
        &self.id
    }
}
