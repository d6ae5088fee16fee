mod assignment;
mod attendance;
pub mod date;
mod lesson;
mod notification;
mod school;
pub mod scheduling;
mod shared;
mod time_of_day;
mod user;

pub use assignment::Assignment;
pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use lesson::{Lesson, LessonIndex, LessonKey, LessonKind, LessonPatch, LessonStatus};
pub use notification::{
    DueNotification, NotificationBoard, NotificationTemplate, TargetRole, TriggerType,
};
pub use school::{event_dates, ClassGroup, School, SchoolKind};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use time_of_day::{InvalidTimeError, TimeOfDay};
pub use user::{Student, User, UserRole};
