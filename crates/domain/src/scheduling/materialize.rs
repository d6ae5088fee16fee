use super::Directory;
use crate::{
    assignment::Assignment,
    date::week_start,
    lesson::{Lesson, LessonIndex, LessonKind, LessonStatus},
    school::SchoolKind,
    shared::entity::ID,
};
use chrono::{prelude::*, Duration};
use tracing::warn;

/// An `Assignment` resolved against the kind of its owning school
#[derive(Debug, Clone)]
pub enum SlotTemplate<'a> {
    Weekly {
        assignment: &'a Assignment,
        school_id: &'a ID,
    },
    Event {
        assignment: &'a Assignment,
        school_id: &'a ID,
        date: NaiveDate,
    },
}

impl<'a> SlotTemplate<'a> {
    pub fn assignment(&self) -> &'a Assignment {
        match self {
            Self::Weekly { assignment, .. } => *assignment,
            Self::Event { assignment, .. } => *assignment,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MaterializeOptions {
    /// Horizon in whole weeks
    pub weeks: u32,
    pub today: NaiveDate,
    /// Weeks are counted from the week of this date instead of today and
    /// dates before today are allowed
    pub anchor: Option<NaiveDate>,
}

impl MaterializeOptions {
    fn allows(&self, date: NaiveDate) -> bool {
        self.anchor.is_some() || date >= self.today
    }
}

/// Pairs every `Assignment` with the scheduling rule of its school.
/// Assignments whose class group or school can not be found, and event
/// class groups without a valid date, are skipped.
pub fn slot_templates<'a>(
    assignments: &'a [Assignment],
    directory: &'a Directory,
) -> Vec<SlotTemplate<'a>> {
    assignments
        .iter()
        .filter_map(|assignment| {
            let group = match directory.class_group(&assignment.class_group_id) {
                Some(group) => group,
                None => {
                    warn!(
                        "Skipping assignment {}: class group {} not found",
                        assignment.id, assignment.class_group_id
                    );
                    return None;
                }
            };
            let school = match directory.school(&group.school_id) {
                Some(school) => school,
                None => {
                    warn!(
                        "Skipping assignment {}: school {} not found",
                        assignment.id, group.school_id
                    );
                    return None;
                }
            };
            if school.id != assignment.school_id {
                warn!(
                    "Assignment {} names school {} but its class group belongs to {}",
                    assignment.id, assignment.school_id, school.id
                );
            }

            match school.kind {
                SchoolKind::Weekly => Some(SlotTemplate::Weekly {
                    assignment,
                    school_id: &group.school_id,
                }),
                SchoolKind::Event => match group.event_date() {
                    Ok(date) => Some(SlotTemplate::Event {
                        assignment,
                        school_id: &group.school_id,
                        date,
                    }),
                    Err(_) => {
                        warn!(
                            "Skipping assignment {}: class group {} has no valid event date: {:?}",
                            assignment.id, group.id, group.schedule
                        );
                        None
                    }
                },
            }
        })
        .collect()
}

fn new_lesson(assignment: &Assignment, school_id: &ID, date: NaiveDate) -> Lesson {
    Lesson {
        id: Default::default(),
        school_id: school_id.clone(),
        class_group_id: assignment.class_group_id.clone(),
        teacher_id: Some(assignment.teacher_id.clone()),
        date,
        start_time: assignment.start_time,
        end_time: assignment.end_time,
        status: LessonStatus::Scheduled,
        kind: LessonKind::Regular,
    }
}

/// Expands the templates into the lessons that do not exist yet. `index`
/// holds the keys of the already stored lessons and is extended with every
/// lesson produced here, so the first template claiming a key wins.
pub fn materialize_lessons(
    templates: &[SlotTemplate],
    index: &mut LessonIndex,
    options: &MaterializeOptions,
) -> Vec<Lesson> {
    if options.weeks == 0 {
        return Vec::new();
    }

    let first_week = week_start(options.anchor.unwrap_or(options.today));
    let mut lessons = Vec::new();
    let mut claim = |lesson: Lesson, lessons: &mut Vec<Lesson>| {
        if options.allows(lesson.date) && index.insert(lesson.key()) {
            lessons.push(lesson);
        }
    };

    for template in templates {
        match template {
            SlotTemplate::Weekly {
                assignment,
                school_id,
            } => {
                let day_offset = assignment.weekday.num_days_from_monday() as i64;
                for week in 0..options.weeks as i64 {
                    let date = first_week + Duration::days(week * 7 + day_offset);
                    claim(new_lesson(assignment, school_id, date), &mut lessons);
                }
            }
            SlotTemplate::Event {
                assignment,
                school_id,
                date,
            } => {
                claim(new_lesson(assignment, school_id, *date), &mut lessons);
            }
        }
    }

    lessons
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::school::{ClassGroup, School};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Fixture {
        directory: Directory,
        weekly_group: ClassGroup,
        event_group: ClassGroup,
        weekly_school: School,
        event_school: School,
    }

    fn fixture() -> Fixture {
        let weekly_school = School::new("Main", SchoolKind::Weekly);
        let event_school = School::new("Camp", SchoolKind::Event);
        let weekly_group = ClassGroup::new(&weekly_school.id, "Robotics");
        let mut event_group = ClassGroup::new(&event_school.id, "Drones");
        event_group.schedule = Some("2025-03-08".into());
        let directory = Directory::new(
            vec![weekly_school.clone(), event_school.clone()],
            vec![weekly_group.clone(), event_group.clone()],
        );
        Fixture {
            directory,
            weekly_group,
            event_group,
            weekly_school,
            event_school,
        }
    }

    fn assignment(school: &School, group: &ClassGroup, weekday: Weekday, start: &str) -> Assignment {
        Assignment::new(
            &ID::default(),
            &school.id,
            &group.id,
            weekday,
            start.parse().unwrap(),
            "12:00".parse().unwrap(),
        )
    }

    #[test]
    fn expands_weekly_assignments_over_the_horizon() {
        let f = fixture();
        let assignments = vec![assignment(&f.weekly_school, &f.weekly_group, Weekday::Wed, "10:00")];
        let templates = slot_templates(&assignments, &f.directory);
        let options = MaterializeOptions {
            weeks: 4,
            // Monday
            today: date(2025, 3, 3),
            anchor: None,
        };
        let lessons = materialize_lessons(&templates, &mut LessonIndex::default(), &options);
        let dates = lessons.iter().map(|l| l.date).collect::<Vec<_>>();
        assert_eq!(
            dates,
            vec![
                date(2025, 3, 5),
                date(2025, 3, 12),
                date(2025, 3, 19),
                date(2025, 3, 26)
            ]
        );
        assert!(lessons
            .iter()
            .all(|l| l.status == LessonStatus::Scheduled && l.kind == LessonKind::Regular));
        assert_eq!(lessons[0].teacher_id, Some(assignments[0].teacher_id.clone()));
    }

    #[test]
    fn skips_days_before_today_without_anchor() {
        let f = fixture();
        let assignments = vec![assignment(&f.weekly_school, &f.weekly_group, Weekday::Mon, "10:00")];
        let templates = slot_templates(&assignments, &f.directory);
        let options = MaterializeOptions {
            weeks: 2,
            // Wednesday
            today: date(2025, 3, 5),
            anchor: None,
        };
        let lessons = materialize_lessons(&templates, &mut LessonIndex::default(), &options);
        assert_eq!(lessons.len(), 1);
        assert_eq!(lessons[0].date, date(2025, 3, 10));
    }

    #[test]
    fn anchor_allows_backfill_in_its_week() {
        let f = fixture();
        let assignments = vec![assignment(&f.weekly_school, &f.weekly_group, Weekday::Mon, "10:00")];
        let templates = slot_templates(&assignments, &f.directory);
        let options = MaterializeOptions {
            weeks: 2,
            today: date(2025, 3, 5),
            anchor: Some(date(2025, 3, 4)),
        };
        let lessons = materialize_lessons(&templates, &mut LessonIndex::default(), &options);
        let dates = lessons.iter().map(|l| l.date).collect::<Vec<_>>();
        assert_eq!(dates, vec![date(2025, 3, 3), date(2025, 3, 10)]);
    }

    #[test]
    fn zero_weeks_is_a_noop() {
        let f = fixture();
        let assignments = vec![
            assignment(&f.weekly_school, &f.weekly_group, Weekday::Mon, "10:00"),
            assignment(&f.event_school, &f.event_group, Weekday::Sat, "10:00"),
        ];
        let templates = slot_templates(&assignments, &f.directory);
        let options = MaterializeOptions {
            weeks: 0,
            today: date(2025, 3, 3),
            anchor: None,
        };
        assert!(materialize_lessons(&templates, &mut LessonIndex::default(), &options).is_empty());
    }

    #[test]
    fn existing_and_duplicate_keys_are_not_created_twice() {
        let f = fixture();
        let assignments = vec![
            assignment(&f.weekly_school, &f.weekly_group, Weekday::Mon, "10:00"),
            // Same slot assigned twice, the first one wins
            assignment(&f.weekly_school, &f.weekly_group, Weekday::Mon, "10:00"),
        ];
        let templates = slot_templates(&assignments, &f.directory);
        let options = MaterializeOptions {
            weeks: 2,
            today: date(2025, 3, 3),
            anchor: None,
        };
        let mut index = LessonIndex::default();
        let first = materialize_lessons(&templates, &mut index, &options);
        assert_eq!(first.len(), 2);
        assert!(first
            .iter()
            .all(|l| l.teacher_id == Some(assignments[0].teacher_id.clone())));

        let mut index = LessonIndex::new(&first);
        let second = materialize_lessons(&templates, &mut index, &options);
        assert!(second.is_empty());
    }

    #[test]
    fn event_schools_use_the_class_group_date() {
        let f = fixture();
        let assignments = vec![assignment(&f.event_school, &f.event_group, Weekday::Sat, "09:00")];
        let templates = slot_templates(&assignments, &f.directory);
        assert!(matches!(templates[0], SlotTemplate::Event { .. }));

        let options = MaterializeOptions {
            weeks: 4,
            today: date(2025, 3, 3),
            anchor: None,
        };
        let lessons = materialize_lessons(&templates, &mut LessonIndex::default(), &options);
        assert_eq!(lessons.len(), 1);
        assert_eq!(lessons[0].date, date(2025, 3, 8));
        assert_eq!(lessons[0].school_id, f.event_school.id);

        // The event already took place
        let options = MaterializeOptions {
            weeks: 4,
            today: date(2025, 3, 9),
            anchor: None,
        };
        assert!(materialize_lessons(&templates, &mut LessonIndex::default(), &options).is_empty());
    }

    #[test]
    fn skips_unknown_groups_and_malformed_event_dates() {
        let mut f = fixture();
        f.event_group.schedule = Some("next saturday".into());
        let directory = Directory::new(
            vec![f.weekly_school.clone(), f.event_school.clone()],
            vec![f.weekly_group.clone(), f.event_group.clone()],
        );
        let orphan_group = ClassGroup::new(&f.weekly_school.id, "Deleted");
        let assignments = vec![
            assignment(&f.event_school, &f.event_group, Weekday::Sat, "09:00"),
            assignment(&f.weekly_school, &orphan_group, Weekday::Mon, "09:00"),
        ];
        assert!(slot_templates(&assignments, &directory).is_empty());
    }
}
