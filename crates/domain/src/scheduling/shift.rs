use crate::{lesson::Lesson, shared::entity::ID};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What a bulk shift would do, computed without touching any lesson
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftPreview {
    pub target_date: NaiveDate,
    pub candidate_count: usize,
    /// Earliest date among the candidates
    pub current_start: Option<NaiveDate>,
    pub shift_days: i64,
    pub protected_count: usize,
}

impl ShiftPreview {
    /// A shift of zero days, or of nothing, is never applied
    pub fn can_apply(&self) -> bool {
        self.candidate_count > 0 && self.shift_days != 0
    }

    /// Whether both previews move the same lessons by the same offset
    pub fn same_shift(&self, other: &ShiftPreview) -> bool {
        self.shift_days == other.shift_days
            && self.current_start == other.current_start
            && self.candidate_count == other.candidate_count
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LessonMove {
    pub lesson_id: ID,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct ShiftPlan {
    pub preview: ShiftPreview,
    /// Ordered by the original date
    pub moves: Vec<LessonMove>,
}

/// Plans moving every unprotected lesson by the same number of calendar
/// days so that the earliest one lands on `target_date`. `lessons` are the
/// scheduled lessons in scope, `protected` the ids with attendance.
pub fn plan_shift(lessons: Vec<Lesson>, protected: &HashSet<ID>, target_date: NaiveDate) -> ShiftPlan {
    let (protected_lessons, mut candidates): (Vec<_>, Vec<_>) =
        lessons.into_iter().partition(|l| protected.contains(&l.id));
    candidates.sort_by_key(|l| (l.date, l.start_time));

    let current_start = candidates.first().map(|l| l.date);
    let shift_days = current_start
        .map(|start| (target_date - start).num_days())
        .unwrap_or(0);

    let moves = candidates
        .iter()
        .map(|l| LessonMove {
            lesson_id: l.id.clone(),
            from: l.date,
            to: l.date + Duration::days(shift_days),
        })
        .collect();

    ShiftPlan {
        preview: ShiftPreview {
            target_date,
            candidate_count: candidates.len(),
            current_start,
            shift_days,
            protected_count: protected_lessons.len(),
        },
        moves,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lesson::{LessonKind, LessonStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lesson(date: NaiveDate) -> Lesson {
        Lesson {
            id: Default::default(),
            school_id: Default::default(),
            class_group_id: Default::default(),
            teacher_id: None,
            date,
            start_time: "10:00".parse().unwrap(),
            end_time: "11:00".parse().unwrap(),
            status: LessonStatus::Scheduled,
            kind: LessonKind::Regular,
        }
    }

    #[test]
    fn shifts_every_candidate_by_the_same_offset() {
        let lessons = vec![
            lesson(date(2025, 3, 5)),
            lesson(date(2025, 3, 3)),
            lesson(date(2025, 3, 12)),
        ];
        let plan = plan_shift(lessons, &HashSet::new(), date(2025, 3, 10));

        assert_eq!(plan.preview.current_start, Some(date(2025, 3, 3)));
        assert_eq!(plan.preview.shift_days, 7);
        assert_eq!(plan.preview.candidate_count, 3);
        assert!(plan.preview.can_apply());
        for m in &plan.moves {
            assert_eq!(m.to, m.from + Duration::days(7));
        }
        assert_eq!(plan.moves[0].from, date(2025, 3, 3));
    }

    #[test]
    fn protected_lessons_are_excluded_and_counted() {
        // The attended lesson is the earliest one but must not define the offset
        let attended = lesson(date(2025, 3, 1));
        let lessons = vec![attended.clone(), lesson(date(2025, 3, 3))];
        let protected = vec![attended.id.clone()].into_iter().collect();
        let plan = plan_shift(lessons, &protected, date(2025, 3, 10));

        assert_eq!(plan.preview.protected_count, 1);
        assert_eq!(plan.preview.candidate_count, 1);
        assert_eq!(plan.preview.shift_days, 7);
        assert!(plan.moves.iter().all(|m| m.lesson_id != attended.id));
    }

    #[test]
    fn backwards_shift_is_negative() {
        let plan = plan_shift(vec![lesson(date(2025, 3, 10))], &HashSet::new(), date(2025, 3, 3));
        assert_eq!(plan.preview.shift_days, -7);
        assert_eq!(plan.moves[0].to, date(2025, 3, 3));
    }

    #[test]
    fn zero_shift_and_empty_scope_can_not_be_applied() {
        let plan = plan_shift(vec![lesson(date(2025, 3, 3))], &HashSet::new(), date(2025, 3, 3));
        assert_eq!(plan.preview.shift_days, 0);
        assert!(!plan.preview.can_apply());

        let plan = plan_shift(vec![], &HashSet::new(), date(2025, 3, 3));
        assert_eq!(plan.preview.candidate_count, 0);
        assert_eq!(plan.preview.current_start, None);
        assert!(!plan.preview.can_apply());
    }

    #[test]
    fn an_earlier_lesson_changes_the_shift() {
        let before = plan_shift(vec![lesson(date(2025, 3, 3))], &HashSet::new(), date(2025, 3, 10));
        let same = plan_shift(vec![lesson(date(2025, 3, 3))], &HashSet::new(), date(2025, 3, 10));
        assert!(before.preview.same_shift(&same.preview));

        let after = plan_shift(
            vec![lesson(date(2025, 2, 28)), lesson(date(2025, 3, 3))],
            &HashSet::new(),
            date(2025, 3, 10),
        );
        assert_eq!(after.preview.shift_days, 10);
        assert!(!before.preview.same_shift(&after.preview));
    }
}
