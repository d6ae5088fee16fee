use crate::{
    shared::entity::{Entity, ID},
    time_of_day::TimeOfDay,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl LessonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(status: &str) -> Option<Self> {
        match status {
            "scheduled" => Some(Self::Scheduled),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonKind {
    Regular,
    Event,
}

impl LessonKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Event => "event",
        }
    }

    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "regular" => Some(Self::Regular),
            "event" => Some(Self::Event),
            _ => None,
        }
    }
}

/// A `Lesson` is a single materialized calendar occurrence of an `Assignment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: ID,
    pub school_id: ID,
    pub class_group_id: ID,
    pub teacher_id: Option<ID>,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub status: LessonStatus,
    pub kind: LessonKind,
}

impl Lesson {
    pub fn key(&self) -> LessonKey {
        LessonKey {
            class_group_id: self.class_group_id.clone(),
            date: self.date,
            start_time: self.start_time,
        }
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time.as_naive_time())
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.date.and_time(self.end_time.as_naive_time())
    }

    pub fn is_scheduled(&self) -> bool {
        self.status == LessonStatus::Scheduled
    }
}

impl Entity for Lesson {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// The natural key of a `Lesson`, no two materialized lessons share it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LessonKey {
    pub class_group_id: ID,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
}

/// Set of occupied `LessonKey`s, built once per materialization run
#[derive(Debug, Default)]
pub struct LessonIndex {
    keys: HashSet<LessonKey>,
}

impl LessonIndex {
    pub fn new<'a>(lessons: impl IntoIterator<Item = &'a Lesson>) -> Self {
        Self {
            keys: lessons.into_iter().map(|l| l.key()).collect(),
        }
    }

    pub fn contains(&self, key: &LessonKey) -> bool {
        self.keys.contains(key)
    }

    /// Returns false if the key was already occupied
    pub fn insert(&mut self, key: LessonKey) -> bool {
        self.keys.insert(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Partial update of a `Lesson`, `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LessonPatch {
    pub date: Option<NaiveDate>,
    pub status: Option<LessonStatus>,
    pub teacher_id: Option<ID>,
}

impl LessonPatch {
    pub fn apply(&self, lesson: &mut Lesson) {
        if let Some(date) = self.date {
            lesson.date = date;
        }
        if let Some(status) = self.status {
            lesson.status = status;
        }
        if let Some(teacher_id) = &self.teacher_id {
            lesson.teacher_id = Some(teacher_id.clone());
        }
    }
}
