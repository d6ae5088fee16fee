use crate::{
    shared::entity::{Entity, ID},
    time_of_day::TimeOfDay,
};
use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What a `NotificationTemplate` is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    LessonStart,
    LessonEnd,
    FixedTime,
    LastLessonEnd,
}

impl TriggerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LessonStart => "lesson_start",
            Self::LessonEnd => "lesson_end",
            Self::FixedTime => "fixed_time",
            Self::LastLessonEnd => "last_lesson_end",
        }
    }

    pub fn parse(trigger: &str) -> Option<Self> {
        match trigger {
            "lesson_start" => Some(Self::LessonStart),
            "lesson_end" => Some(Self::LessonEnd),
            "fixed_time" => Some(Self::FixedTime),
            "last_lesson_end" => Some(Self::LastLessonEnd),
            _ => None,
        }
    }
}

/// Who a notification fans out to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRole {
    Student,
    Teacher,
    Manager,
    Admin,
}

impl TargetRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    pub fn parse(role: &str) -> Option<Self> {
        match role {
            "student" => Some(Self::Student),
            "teacher" => Some(Self::Teacher),
            "manager" => Some(Self::Manager),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// A reminder configuration. The placeholders `{class_name}` and
/// `{start_time}` in `message_template` are substituted when rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTemplate {
    pub id: ID,
    pub name: String,
    pub school_id: ID,
    /// `None` means every class group of the school
    pub class_group_id: Option<ID>,
    pub trigger: TriggerType,
    /// Signed minutes added to the trigger anchor
    pub offset_minutes: i64,
    /// Only used by `TriggerType::FixedTime`
    pub trigger_time: Option<TimeOfDay>,
    pub days_filter: Option<Vec<Weekday>>,
    pub target_roles: Vec<TargetRole>,
    pub is_active: bool,
    pub message_template: String,
}

impl NotificationTemplate {
    pub fn new(school_id: &ID, name: &str, trigger: TriggerType, message_template: &str) -> Self {
        Self {
            id: Default::default(),
            name: name.to_string(),
            school_id: school_id.clone(),
            class_group_id: None,
            trigger,
            offset_minutes: 0,
            trigger_time: None,
            days_filter: None,
            target_roles: Vec::new(),
            is_active: true,
            message_template: message_template.to_string(),
        }
    }

    /// An absent or empty filter accepts every day
    pub fn runs_on(&self, weekday: Weekday) -> bool {
        match &self.days_filter {
            Some(days) if !days.is_empty() => days.contains(&weekday),
            _ => true,
        }
    }

    pub fn is_scoped_to(&self, school_id: &ID, class_group_id: &ID) -> bool {
        self.school_id == *school_id
            && self
                .class_group_id
                .as_ref()
                .map(|id| id == class_group_id)
                .unwrap_or(true)
    }

    pub fn render(&self, class_name: &str, start_time: &str) -> String {
        self.message_template
            .replace("{class_name}", class_name)
            .replace("{start_time}", start_time)
    }
}

impl Entity for NotificationTemplate {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// A reminder that is currently inside its trigger window. It is derived
/// from the templates and the lesson calendar on every evaluation and is
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueNotification {
    pub key: String,
    pub title: String,
    pub message: String,
    pub target_at: NaiveDateTime,
    pub trigger: TriggerType,
    pub target_roles: Vec<TargetRole>,
    pub school_id: ID,
    pub class_group_id: Option<ID>,
    pub lesson_id: Option<ID>,
    pub teacher_id: Option<ID>,
}

impl DueNotification {
    pub fn targets(&self, role: TargetRole) -> bool {
        self.target_roles.contains(&role)
    }
}

/// The due notifications of the current evaluation together with the
/// keys the operator dismissed during this session.
#[derive(Debug, Default)]
pub struct NotificationBoard {
    due: Vec<DueNotification>,
    dismissed: HashSet<String>,
}

impl NotificationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole due set, dismissed keys are filtered out
    pub fn replace(&mut self, due: Vec<DueNotification>) {
        let dismissed = &self.dismissed;
        self.due = due
            .into_iter()
            .filter(|n| !dismissed.contains(&n.key))
            .collect();
    }

    /// Role filtering is only a projection, it never changes the due set
    pub fn visible(&self, role: Option<TargetRole>) -> Vec<DueNotification> {
        self.due
            .iter()
            .filter(|n| role.map(|r| n.targets(r)).unwrap_or(true))
            .cloned()
            .collect()
    }

    pub fn find(&self, key: &str) -> Option<&DueNotification> {
        self.due.iter().find(|n| n.key == key)
    }

    pub fn dismiss(&mut self, key: &str) -> bool {
        let was_visible = self.due.iter().any(|n| n.key == key);
        self.due.retain(|n| n.key != key);
        self.dismissed.insert(key.to_string());
        was_visible
    }

    /// Dismisses everything currently visible and returns how many
    pub fn dismiss_all(&mut self) -> usize {
        let count = self.due.len();
        for n in self.due.drain(..) {
            self.dismissed.insert(n.key);
        }
        count
    }

    /// Forgets every dismissal, items reappear on the next evaluation
    pub fn clear_dismissals(&mut self) {
        self.dismissed.clear();
    }

    pub fn is_dismissed(&self, key: &str) -> bool {
        self.dismissed.contains(key)
    }

    pub fn len(&self) -> usize {
        self.due.len()
    }

    pub fn is_empty(&self) -> bool {
        self.due.is_empty()
    }
}
