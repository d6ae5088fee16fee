use crate::{
    date,
    shared::entity::{Entity, ID},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a `School` lays out its lessons in the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolKind {
    /// Lessons repeat every week on the `Assignment`s weekday
    #[serde(rename = "school")]
    Weekly,
    /// Every `ClassGroup` meets on the literal date stored in its schedule
    Event,
}

impl SchoolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "school",
            Self::Event => "event",
        }
    }

    pub fn parse(kind: &str) -> Self {
        match kind {
            "event" => Self::Event,
            _ => Self::Weekly,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct School {
    pub id: ID,
    pub name: String,
    pub kind: SchoolKind,
    /// Messaging address of the principal, used for the manager role
    pub principal_address: Option<String>,
}

impl School {
    pub fn new(name: &str, kind: SchoolKind) -> Self {
        Self {
            id: Default::default(),
            name: name.to_string(),
            kind,
            principal_address: None,
        }
    }
}

impl Entity for School {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassGroup {
    pub id: ID,
    pub school_id: ID,
    pub name: String,
    /// For event schools this is the event date formatted as `YYYY-MM-DD`
    pub schedule: Option<String>,
}

impl ClassGroup {
    pub fn new(school_id: &ID, name: &str) -> Self {
        Self {
            id: Default::default(),
            school_id: school_id.clone(),
            name: name.to_string(),
            schedule: None,
        }
    }

    pub fn event_date(&self) -> anyhow::Result<NaiveDate> {
        match &self.schedule {
            Some(schedule) => date::parse_date(schedule.trim()),
            None => Err(anyhow::Error::msg("Class group has no event date")),
        }
    }
}

impl Entity for ClassGroup {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// All the valid event dates of the given class groups of an event school.
pub fn event_dates<'a>(class_groups: impl Iterator<Item = &'a ClassGroup>) -> BTreeSet<NaiveDate> {
    class_groups.filter_map(|g| g.event_date().ok()).collect()
}
