mod assignment;
mod attendance;
mod class_group;
mod lesson;
mod notification_template;
mod school;
mod settings;
mod shared;
mod student;
mod user;

use assignment::{IAssignmentRepo, InMemoryAssignmentRepo, PostgresAssignmentRepo};
use attendance::{IAttendanceRepo, InMemoryAttendanceRepo, PostgresAttendanceRepo};
use class_group::{IClassGroupRepo, InMemoryClassGroupRepo, PostgresClassGroupRepo};
use lesson::{InMemoryLessonRepo, PostgresLessonRepo};
use notification_template::{
    INotificationTemplateRepo, InMemoryNotificationTemplateRepo, PostgresNotificationTemplateRepo,
};
use school::{ISchoolRepo, InMemorySchoolRepo, PostgresSchoolRepo};
use settings::{ISettingsRepo, InMemorySettingsRepo, PostgresSettingsRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use student::{IStudentRepo, InMemoryStudentRepo, PostgresStudentRepo};
use tracing::info;
use user::{IUserRepo, InMemoryUserRepo, PostgresUserRepo};

pub use lesson::{ILessonRepo, LessonQuery};
pub use settings::ADMIN_ADDRESS_KEY;
pub use shared::repo::DeleteResult;

#[derive(Clone)]
pub struct Repos {
    pub assignments: Arc<dyn IAssignmentRepo>,
    pub lessons: Arc<dyn ILessonRepo>,
    pub attendance: Arc<dyn IAttendanceRepo>,
    pub notification_templates: Arc<dyn INotificationTemplateRepo>,
    pub schools: Arc<dyn ISchoolRepo>,
    pub class_groups: Arc<dyn IClassGroupRepo>,
    pub students: Arc<dyn IStudentRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub settings: Arc<dyn ISettingsRepo>,
}

impl Repos {
    pub async fn create_postgres(
        connection_string: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            assignments: Arc::new(PostgresAssignmentRepo::new(pool.clone())),
            lessons: Arc::new(PostgresLessonRepo::new(pool.clone())),
            attendance: Arc::new(PostgresAttendanceRepo::new(pool.clone())),
            notification_templates: Arc::new(PostgresNotificationTemplateRepo::new(pool.clone())),
            schools: Arc::new(PostgresSchoolRepo::new(pool.clone())),
            class_groups: Arc::new(PostgresClassGroupRepo::new(pool.clone())),
            students: Arc::new(PostgresStudentRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            settings: Arc::new(PostgresSettingsRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            assignments: Arc::new(InMemoryAssignmentRepo::new()),
            lessons: Arc::new(InMemoryLessonRepo::new()),
            attendance: Arc::new(InMemoryAttendanceRepo::new()),
            notification_templates: Arc::new(InMemoryNotificationTemplateRepo::new()),
            schools: Arc::new(InMemorySchoolRepo::new()),
            class_groups: Arc::new(InMemoryClassGroupRepo::new()),
            students: Arc::new(InMemoryStudentRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            settings: Arc::new(InMemorySettingsRepo::new()),
        }
    }
}
