use super::Directory;
use crate::{
    date::format_date,
    lesson::{Lesson, LessonStatus},
    notification::{DueNotification, NotificationTemplate, TriggerType},
};
use chrono::{prelude::*, Duration};
use tracing::warn;

/// A notification shows up this many minutes before its target time
pub const WINDOW_LEAD_MINUTES: i64 = 2;
/// and stays due for this many minutes after it
pub const WINDOW_TAIL_MINUTES: i64 = 60;

/// Whole minutes elapsed since `target`, rounded towards negative infinity
pub fn minutes_since(now: NaiveDateTime, target: NaiveDateTime) -> i64 {
    (now - target).num_seconds().div_euclid(60)
}

pub fn is_within_window(now: NaiveDateTime, target: NaiveDateTime) -> bool {
    let diff = minutes_since(now, target);
    -WINDOW_LEAD_MINUTES <= diff && diff <= WINDOW_TAIL_MINUTES
}

fn title(template: &NotificationTemplate, label: &str) -> String {
    if label.is_empty() {
        template.name.clone()
    } else {
        format!("{} - {}", template.name, label)
    }
}

/// Label of a school wide template: its class group if it names one,
/// otherwise the school itself
fn scope_label(template: &NotificationTemplate, directory: &Directory) -> String {
    match &template.class_group_id {
        Some(class_group_id) => directory
            .class_group(class_group_id)
            .map(|g| g.name.clone())
            .unwrap_or_default(),
        None => directory
            .school(&template.school_id)
            .map(|s| s.name.clone())
            .unwrap_or_default(),
    }
}

fn lesson_anchored(
    template: &NotificationTemplate,
    lessons: &[&Lesson],
    directory: &Directory,
    now: NaiveDateTime,
) -> Vec<DueNotification> {
    let today = now.date();
    let yesterday = today.pred_opt();

    lessons
        .iter()
        // Yesterday is included for late lessons whose window crosses midnight
        .filter(|l| l.date == today || Some(l.date) == yesterday)
        .filter(|l| template.is_scoped_to(&l.school_id, &l.class_group_id))
        .filter(|l| template.runs_on(l.weekday()))
        .filter_map(|l| {
            let anchor = match template.trigger {
                TriggerType::LessonEnd => l.ends_at(),
                _ => l.starts_at(),
            };
            let target_at = anchor + Duration::minutes(template.offset_minutes);
            if !is_within_window(now, target_at) {
                return None;
            }
            let class_name = directory
                .class_group(&l.class_group_id)
                .map(|g| g.name.clone())
                .unwrap_or_default();
            Some(DueNotification {
                key: format!("{}-{}", l.id, template.id),
                title: title(template, &class_name),
                message: template.render(&class_name, &l.start_time.to_string()),
                target_at,
                trigger: template.trigger,
                target_roles: template.target_roles.clone(),
                school_id: l.school_id.clone(),
                class_group_id: Some(l.class_group_id.clone()),
                lesson_id: Some(l.id.clone()),
                teacher_id: l.teacher_id.clone(),
            })
        })
        .collect()
}

fn fixed_time(
    template: &NotificationTemplate,
    directory: &Directory,
    now: NaiveDateTime,
) -> Option<DueNotification> {
    let today = now.date();
    if !template.runs_on(today.weekday()) {
        return None;
    }
    let trigger_time = match template.trigger_time {
        Some(time) => time,
        None => {
            warn!("Fixed time template {} has no trigger time", template.id);
            return None;
        }
    };
    let target_at =
        today.and_time(trigger_time.as_naive_time()) + Duration::minutes(template.offset_minutes);
    if !is_within_window(now, target_at) {
        return None;
    }

    let label = scope_label(template, directory);
    Some(DueNotification {
        key: format!("fixed-{}-{}", template.id, format_date(&today)),
        title: title(template, &label),
        message: template.render(&label, &trigger_time.to_string()),
        target_at,
        trigger: template.trigger,
        target_roles: template.target_roles.clone(),
        school_id: template.school_id.clone(),
        class_group_id: template.class_group_id.clone(),
        lesson_id: None,
        teacher_id: None,
    })
}

fn last_lesson_end(
    template: &NotificationTemplate,
    lessons: &[&Lesson],
    directory: &Directory,
    now: NaiveDateTime,
) -> Option<DueNotification> {
    let today = now.date();
    if !template.runs_on(today.weekday()) {
        return None;
    }
    let last = lessons
        .iter()
        .filter(|l| l.date == today && l.school_id == template.school_id)
        .filter(|l| {
            template
                .class_group_id
                .as_ref()
                .map(|id| *id == l.class_group_id)
                .unwrap_or(true)
        })
        .max_by_key(|l| l.end_time)?;

    let target_at = last.ends_at() + Duration::minutes(template.offset_minutes);
    if !is_within_window(now, target_at) {
        return None;
    }

    let label = scope_label(template, directory);
    Some(DueNotification {
        key: format!("last-{}-{}", template.id, last.id),
        title: title(template, &label),
        message: template.render(&label, &last.start_time.to_string()),
        target_at,
        trigger: template.trigger,
        target_roles: template.target_roles.clone(),
        school_id: template.school_id.clone(),
        class_group_id: template.class_group_id.clone(),
        lesson_id: Some(last.id.clone()),
        teacher_id: last.teacher_id.clone(),
    })
}

/// Computes every notification that is due at `now` from scratch.
/// `lessons` should contain at least the lessons of today and yesterday,
/// others are ignored.
pub fn due_notifications(
    templates: &[NotificationTemplate],
    lessons: &[Lesson],
    directory: &Directory,
    now: NaiveDateTime,
) -> Vec<DueNotification> {
    let live_lessons = lessons
        .iter()
        .filter(|l| l.status != LessonStatus::Cancelled)
        .collect::<Vec<_>>();

    let mut due = Vec::new();
    for template in templates.iter().filter(|t| t.is_active) {
        match template.trigger {
            TriggerType::LessonStart | TriggerType::LessonEnd => {
                due.extend(lesson_anchored(template, &live_lessons, directory, now));
            }
            TriggerType::FixedTime => {
                due.extend(fixed_time(template, directory, now));
            }
            TriggerType::LastLessonEnd => {
                due.extend(last_lesson_end(template, &live_lessons, directory, now));
            }
        }
    }
    due.sort_by(|a, b| a.target_at.cmp(&b.target_at).then_with(|| a.key.cmp(&b.key)));
    due
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        lesson::LessonKind,
        notification::TargetRole,
        school::{ClassGroup, School, SchoolKind},
        shared::entity::ID,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(date: NaiveDate, time: &str) -> NaiveDateTime {
        date.and_time(NaiveTime::parse_from_str(time, "%H:%M").unwrap())
    }

    struct Fixture {
        directory: Directory,
        school: School,
        group: ClassGroup,
    }

    fn fixture() -> Fixture {
        let school = School::new("Main", SchoolKind::Weekly);
        let group = ClassGroup::new(&school.id, "Robotics");
        Fixture {
            directory: Directory::new(vec![school.clone()], vec![group.clone()]),
            school,
            group,
        }
    }

    fn lesson(group: &ClassGroup, date: NaiveDate, start: &str, end: &str) -> Lesson {
        Lesson {
            id: Default::default(),
            school_id: group.school_id.clone(),
            class_group_id: group.id.clone(),
            teacher_id: Some(ID::default()),
            date,
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            status: LessonStatus::Scheduled,
            kind: LessonKind::Regular,
        }
    }

    fn template(school: &School, trigger: TriggerType, offset_minutes: i64) -> NotificationTemplate {
        let mut t = NotificationTemplate::new(
            &school.id,
            "Reminder",
            trigger,
            "{class_name} at {start_time}",
        );
        t.offset_minutes = offset_minutes;
        t.target_roles = vec![TargetRole::Teacher];
        t
    }

    #[test]
    fn lesson_start_window_boundaries() {
        let f = fixture();
        let day = date(2025, 3, 3);
        let lessons = vec![lesson(&f.group, day, "10:00", "11:00")];
        let templates = vec![template(&f.school, TriggerType::LessonStart, -10)];

        let due_at = |time: &str| due_notifications(&templates, &lessons, &f.directory, at(day, time));

        assert!(due_at("09:47").is_empty());
        assert_eq!(due_at("09:48").len(), 1);
        assert_eq!(due_at("10:50").len(), 1);
        assert!(due_at("10:51").is_empty());

        let due = due_at("09:50");
        assert_eq!(due[0].target_at, at(day, "09:50"));
        assert_eq!(due[0].key, format!("{}-{}", lessons[0].id, templates[0].id));
        assert_eq!(due[0].message, "Robotics at 10:00");
        assert_eq!(due[0].teacher_id, lessons[0].teacher_id);
    }

    #[test]
    fn seconds_do_not_round_into_the_window() {
        let target = at(date(2025, 3, 3), "09:50");
        assert!(!is_within_window(target - Duration::seconds(150), target));
        assert!(is_within_window(target - Duration::seconds(120), target));
        assert!(is_within_window(target + Duration::seconds(3659), target));
        assert!(!is_within_window(target + Duration::seconds(3660), target));
    }

    #[test]
    fn lesson_end_uses_end_time_and_covers_yesterday() {
        let f = fixture();
        let yesterday = date(2025, 3, 2);
        let lessons = vec![lesson(&f.group, yesterday, "22:00", "23:50")];
        let templates = vec![template(&f.school, TriggerType::LessonEnd, 30)];

        let due = due_notifications(&templates, &lessons, &f.directory, at(date(2025, 3, 3), "00:30"));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].target_at, at(date(2025, 3, 3), "00:20"));
    }

    #[test]
    fn skips_cancelled_lessons_inactive_templates_and_filtered_days() {
        let f = fixture();
        // Monday
        let day = date(2025, 3, 3);
        let mut cancelled = lesson(&f.group, day, "10:00", "11:00");
        cancelled.status = LessonStatus::Cancelled;
        let lessons = vec![cancelled];
        let templates = vec![template(&f.school, TriggerType::LessonStart, 0)];
        assert!(due_notifications(&templates, &lessons, &f.directory, at(day, "10:00")).is_empty());

        let lessons = vec![lesson(&f.group, day, "10:00", "11:00")];
        let mut inactive = template(&f.school, TriggerType::LessonStart, 0);
        inactive.is_active = false;
        let mut tuesdays = template(&f.school, TriggerType::LessonStart, 0);
        tuesdays.days_filter = Some(vec![Weekday::Tue]);
        let mut other_group = template(&f.school, TriggerType::LessonStart, 0);
        other_group.class_group_id = Some(ID::default());
        let templates = vec![inactive, tuesdays, other_group];
        assert!(due_notifications(&templates, &lessons, &f.directory, at(day, "10:00")).is_empty());
    }

    #[test]
    fn fixed_time_key_resets_daily() {
        let f = fixture();
        let mut t = template(&f.school, TriggerType::FixedTime, 0);
        t.trigger_time = Some("08:00".parse().unwrap());
        let templates = vec![t];

        let monday = due_notifications(&templates, &[], &f.directory, at(date(2025, 3, 3), "08:30"));
        let tuesday = due_notifications(&templates, &[], &f.directory, at(date(2025, 3, 4), "08:30"));
        assert_eq!(monday.len(), 1);
        assert_eq!(tuesday.len(), 1);
        assert_eq!(monday[0].key, format!("fixed-{}-2025-03-03", templates[0].id));
        assert_ne!(monday[0].key, tuesday[0].key);
        // School wide label
        assert_eq!(monday[0].message, "Main at 08:00");

        assert!(due_notifications(&templates, &[], &f.directory, at(date(2025, 3, 3), "09:01")).is_empty());
    }

    #[test]
    fn fixed_time_without_trigger_time_is_skipped() {
        let f = fixture();
        let templates = vec![template(&f.school, TriggerType::FixedTime, 0)];
        assert!(due_notifications(&templates, &[], &f.directory, at(date(2025, 3, 3), "00:00")).is_empty());
    }

    #[test]
    fn last_lesson_end_picks_the_latest_lesson_of_today() {
        let f = fixture();
        let day = date(2025, 3, 3);
        let early = lesson(&f.group, day, "09:00", "10:00");
        let late = lesson(&f.group, day, "15:00", "16:30");
        let mut cancelled = lesson(&f.group, day, "17:00", "18:00");
        cancelled.status = LessonStatus::Cancelled;
        let lessons = vec![late.clone(), early, cancelled];
        let templates = vec![template(&f.school, TriggerType::LastLessonEnd, 15)];

        let due = due_notifications(&templates, &lessons, &f.directory, at(day, "16:45"));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].key, format!("last-{}-{}", templates[0].id, late.id));
        assert_eq!(due[0].target_at, at(day, "16:45"));
        assert_eq!(due[0].lesson_id, Some(late.id.clone()));

        assert!(due_notifications(&templates, &lessons, &f.directory, at(day, "10:15")).is_empty());
    }
}
