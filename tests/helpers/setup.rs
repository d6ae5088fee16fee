use chrono::{NaiveDate, TimeZone, Utc};
use std::sync::Arc;
use tutorhub_scheduler_api::Application;
use tutorhub_scheduler_domain::{ClassGroup, School, SchoolKind, User, UserRole};
use tutorhub_scheduler_infra::{InMemoryDispatchGateway, SchedulerContext, StaticTimeSys};

pub struct TestApp {
    pub ctx: SchedulerContext,
    pub gateway: Arc<InMemoryDispatchGateway>,
    pub address: String,
    pub school: School,
    pub group: ClassGroup,
    pub teacher: User,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }
}

/// Launch the application as a background task on a random port. The
/// clock stands still at `now` in UTC and one school with a class group
/// and a teacher is stored.
pub async fn spawn_app(now: &str) -> TestApp {
    let now = chrono::NaiveDateTime::parse_from_str(now, "%Y-%m-%d %H:%M")
        .expect("Expected a valid test time");

    let mut ctx = SchedulerContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.timezone = chrono_tz::UTC;
    ctx.config.shift_preview_debounce_millis = 10;
    ctx.sys = Arc::new(StaticTimeSys {
        timestamp_millis: Utc.from_utc_datetime(&now).timestamp_millis(),
    });
    let gateway = Arc::new(InMemoryDispatchGateway::new());
    ctx.gateway = gateway.clone();

    let mut school = School::new("Northside", SchoolKind::Weekly);
    school.principal_address = Some("principal-chat".into());
    let group = ClassGroup::new(&school.id, "Robotics A");
    let mut teacher = User::new("Ada", vec![UserRole::Teacher]);
    teacher.address = Some("teacher-chat".into());
    ctx.repos.schools.insert(&school).await.unwrap();
    ctx.repos.class_groups.insert(&group).await.unwrap();
    ctx.repos.users.insert(&teacher).await.unwrap();

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp {
        ctx,
        gateway,
        address,
        school,
        group,
        teacher,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
