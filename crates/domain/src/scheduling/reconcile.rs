use super::Directory;
use crate::{
    assignment::Assignment,
    lesson::{Lesson, LessonKind},
    school::SchoolKind,
    shared::entity::ID,
};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct ReconcileScope {
    /// Lessons before this date are history and never touched
    pub threshold: NaiveDate,
    /// When set only this class group is reconciled, even if it has no
    /// assignments left. Otherwise every class group with an assignment.
    pub class_group_id: Option<ID>,
}

fn school_kind(lesson: &Lesson, directory: &Directory) -> SchoolKind {
    directory
        .school_of_group(&lesson.class_group_id)
        .or_else(|| directory.school(&lesson.school_id))
        .map(|s| s.kind)
        .unwrap_or(SchoolKind::Weekly)
}

fn matches_assignment(lesson: &Lesson, assignments: &[Assignment]) -> bool {
    assignments.iter().any(|a| {
        a.class_group_id == lesson.class_group_id
            && a.weekday == lesson.weekday()
            && a.start_time == lesson.start_time
    })
}

/// Finds the future lessons that no longer correspond to any assignment.
/// Only `scheduled` lessons of kind `regular` without attendance
/// (`protected`) are ever returned. Lessons of event schools must also lie
/// on one of the event dates of their school.
pub fn find_stale_lessons<'a>(
    lessons: &'a [Lesson],
    assignments: &[Assignment],
    protected: &HashSet<ID>,
    directory: &Directory,
    scope: &ReconcileScope,
) -> Vec<&'a Lesson> {
    let groups_in_scope: HashSet<&ID> = match &scope.class_group_id {
        Some(class_group_id) => vec![class_group_id].into_iter().collect(),
        None => assignments.iter().map(|a| &a.class_group_id).collect(),
    };
    let mut event_dates: HashMap<&ID, BTreeSet<NaiveDate>> = HashMap::new();

    lessons
        .iter()
        .filter(|l| l.date >= scope.threshold)
        .filter(|l| groups_in_scope.contains(&l.class_group_id))
        .filter(|l| l.is_scheduled() && l.kind == LessonKind::Regular)
        .filter(|l| !protected.contains(&l.id))
        .filter(|l| {
            let on_event_date = match school_kind(l, directory) {
                SchoolKind::Weekly => true,
                SchoolKind::Event => event_dates
                    .entry(&l.school_id)
                    .or_insert_with(|| directory.event_dates(&l.school_id))
                    .contains(&l.date),
            };
            !(on_event_date && matches_assignment(l, assignments))
        })
        .collect()
}

/// Future lessons whose matching assignment is now taught by another
/// teacher, paired with that teacher. The same lessons `find_stale_lessons`
/// considers are inspected.
pub fn find_reassigned_lessons<'a>(
    lessons: &[Lesson],
    assignments: &'a [Assignment],
    protected: &HashSet<ID>,
    scope: &ReconcileScope,
) -> Vec<(ID, &'a ID)> {
    lessons
        .iter()
        .filter(|l| l.date >= scope.threshold)
        .filter(|l| l.is_scheduled() && l.kind == LessonKind::Regular)
        .filter(|l| !protected.contains(&l.id))
        .filter_map(|l| {
            assignments
                .iter()
                .find(|a| {
                    a.class_group_id == l.class_group_id
                        && a.weekday == l.weekday()
                        && a.start_time == l.start_time
                })
                .filter(|a| l.teacher_id.as_ref() != Some(&a.teacher_id))
                .map(|a| (l.id.clone(), &a.teacher_id))
        })
        .collect()
}
