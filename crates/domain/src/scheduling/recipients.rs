use crate::{
    notification::{DueNotification, TargetRole},
    school::School,
    user::{Student, User},
};
use itertools::Itertools;

/// Everything the resolver may pick addresses from. The caller loads
/// the students of the notification's school, the teacher of its lesson
/// and every admin user.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecipientSources<'a> {
    pub students: &'a [Student],
    pub teacher: Option<&'a User>,
    pub school: Option<&'a School>,
    pub admins: &'a [User],
    /// The system wide admin address from the global settings
    pub admin_address: Option<&'a str>,
}

/// Maps the target roles of `notification` to messaging addresses.
/// Addresses are trimmed and every address occurs once, in the order it
/// was first found.
pub fn resolve_recipients(notification: &DueNotification, sources: &RecipientSources) -> Vec<String> {
    let mut addresses: Vec<&str> = Vec::new();

    for role in &notification.target_roles {
        match role {
            TargetRole::Student => addresses.extend(
                sources
                    .students
                    .iter()
                    .filter(|s| s.school_id == notification.school_id)
                    .filter(|s| match &notification.class_group_id {
                        Some(class_group_id) => s.class_group_id.as_ref() == Some(class_group_id),
                        None => true,
                    })
                    .filter_map(|s| s.address.as_deref()),
            ),
            TargetRole::Teacher => {
                // Only the teacher of the originating lesson
                if let Some(teacher) = sources.teacher {
                    if notification.teacher_id.as_ref() == Some(&teacher.id) {
                        addresses.extend(teacher.address.as_deref());
                    }
                }
            }
            TargetRole::Manager => addresses.extend(
                sources
                    .school
                    .filter(|s| s.id == notification.school_id)
                    .and_then(|s| s.principal_address.as_deref()),
            ),
            TargetRole::Admin => {
                addresses.extend(
                    sources
                        .admins
                        .iter()
                        .filter(|u| u.is_admin())
                        .filter_map(|u| u.address.as_deref()),
                );
                addresses.extend(sources.admin_address);
            }
        }
    }

    addresses
        .into_iter()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unique()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        notification::TriggerType,
        school::{ClassGroup, SchoolKind},
        shared::entity::ID,
        user::UserRole,
    };
    use chrono::NaiveDate;

    fn due(school: &School, roles: Vec<TargetRole>) -> DueNotification {
        DueNotification {
            key: "key".into(),
            title: "Reminder".into(),
            message: "Class starts soon".into(),
            target_at: NaiveDate::from_ymd_opt(2025, 3, 3)
                .unwrap()
                .and_hms_opt(9, 50, 0)
                .unwrap(),
            trigger: TriggerType::LessonStart,
            target_roles: roles,
            school_id: school.id.clone(),
            class_group_id: None,
            lesson_id: None,
            teacher_id: None,
        }
    }

    fn with_address(mut user: User, address: &str) -> User {
        user.address = Some(address.into());
        user
    }

    #[test]
    fn teacher_who_is_also_admin_receives_one_message() {
        let school = School::new("Main", SchoolKind::Weekly);
        let teacher = with_address(
            User::new("Ada", vec![UserRole::Teacher, UserRole::Admin]),
            "1001",
        );
        let mut notification = due(&school, vec![TargetRole::Teacher, TargetRole::Admin]);
        notification.teacher_id = Some(teacher.id.clone());

        let admins = vec![teacher.clone()];
        let sources = RecipientSources {
            teacher: Some(&teacher),
            admins: &admins,
            // Same address with stray whitespace
            admin_address: Some(" 1001 "),
            ..Default::default()
        };
        assert_eq!(resolve_recipients(&notification, &sources), vec!["1001".to_string()]);
    }

    #[test]
    fn students_are_limited_to_the_scoped_class_group() {
        let school = School::new("Main", SchoolKind::Weekly);
        let group = ClassGroup::new(&school.id, "Robotics");
        let other = ClassGroup::new(&school.id, "Chess");

        let mut in_group = Student::new(&school.id, Some(&group.id), "Bo");
        in_group.address = Some("2001".into());
        let mut other_group = Student::new(&school.id, Some(&other.id), "Cy");
        other_group.address = Some("2002".into());
        let no_address = Student::new(&school.id, Some(&group.id), "Di");
        let students = vec![in_group, other_group, no_address];

        let mut notification = due(&school, vec![TargetRole::Student]);
        let sources = RecipientSources {
            students: &students,
            ..Default::default()
        };
        assert_eq!(resolve_recipients(&notification, &sources).len(), 2);

        notification.class_group_id = Some(group.id.clone());
        assert_eq!(resolve_recipients(&notification, &sources), vec!["2001".to_string()]);
    }

    #[test]
    fn teacher_role_never_fans_out() {
        let school = School::new("Main", SchoolKind::Weekly);
        let teacher = with_address(User::new("Ada", vec![UserRole::Teacher]), "1001");
        let notification = due(&school, vec![TargetRole::Teacher]);
        let sources = RecipientSources {
            teacher: Some(&teacher),
            ..Default::default()
        };
        // The notification has no lesson teacher
        assert!(resolve_recipients(&notification, &sources).is_empty());

        let mut notification = notification;
        notification.teacher_id = Some(ID::default());
        assert!(resolve_recipients(&notification, &sources).is_empty());
    }

    #[test]
    fn manager_is_the_principal_address() {
        let mut school = School::new("Main", SchoolKind::Weekly);
        let notification = due(&school, vec![TargetRole::Manager]);
        let sources = RecipientSources {
            school: Some(&school),
            ..Default::default()
        };
        assert!(resolve_recipients(&notification, &sources).is_empty());

        school.principal_address = Some("3001".into());
        let sources = RecipientSources {
            school: Some(&school),
            ..Default::default()
        };
        assert_eq!(resolve_recipients(&notification, &sources), vec!["3001".to_string()]);
    }
}
