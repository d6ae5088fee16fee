use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};
use std::sync::Arc;
use tutorhub_scheduler_domain::{
    Assignment, ClassGroup, Lesson, LessonKind, LessonPatch, LessonStatus, School, SchoolKind, User,
    UserRole, ID,
};
use tutorhub_scheduler_infra::{
    DeleteResult, ILessonRepo, InMemoryDispatchGateway, LessonQuery, SchedulerContext,
    StaticTimeSys,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn datetime(date: NaiveDate, time: &str) -> NaiveDateTime {
    date.and_time(NaiveTime::parse_from_str(time, "%H:%M").unwrap())
}

pub struct Fixture {
    pub ctx: SchedulerContext,
    pub gateway: Arc<InMemoryDispatchGateway>,
    pub school: School,
    pub group: ClassGroup,
    pub teacher: User,
}

impl Fixture {
    /// Moves the clock, the context runs in UTC
    pub fn set_now(&mut self, now: NaiveDateTime) {
        self.ctx.sys = Arc::new(StaticTimeSys {
            timestamp_millis: Utc.from_utc_datetime(&now).timestamp_millis(),
        });
    }

    pub async fn assign(&self, weekday: Weekday, start: &str, end: &str) -> Assignment {
        let assignment = Assignment::new(
            &self.teacher.id,
            &self.school.id,
            &self.group.id,
            weekday,
            start.parse().unwrap(),
            end.parse().unwrap(),
        );
        self.ctx.repos.assignments.insert(&assignment).await.unwrap();
        assignment
    }

    /// A scheduled lesson of the fixture group, not stored
    pub fn lesson(&self, date: NaiveDate, start: &str, end: &str) -> Lesson {
        Lesson {
            id: Default::default(),
            school_id: self.school.id.clone(),
            class_group_id: self.group.id.clone(),
            teacher_id: Some(self.teacher.id.clone()),
            date,
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            status: LessonStatus::Scheduled,
            kind: LessonKind::Regular,
        }
    }
}

/// Lesson store that holds nothing and rejects every write
pub struct BrokenLessonRepo;

#[async_trait::async_trait]
impl ILessonRepo for BrokenLessonRepo {
    async fn insert_many(&self, _lessons: &[Lesson]) -> anyhow::Result<()> {
        Err(anyhow::Error::msg("lesson store is unavailable"))
    }

    async fn find(&self, _lesson_id: &ID) -> Option<Lesson> {
        None
    }

    async fn find_by(&self, _query: &LessonQuery) -> anyhow::Result<Vec<Lesson>> {
        Ok(vec![])
    }

    async fn update(&self, _lesson_id: &ID, _patch: &LessonPatch) -> anyhow::Result<Option<Lesson>> {
        Err(anyhow::Error::msg("lesson store is unavailable"))
    }

    async fn delete_many(&self, _lesson_ids: &[ID]) -> anyhow::Result<DeleteResult> {
        Err(anyhow::Error::msg("lesson store is unavailable"))
    }
}

/// In memory context with one school, one class group and one teacher.
/// The clock is set to 08:00 of `today`.
pub async fn setup(kind: SchoolKind, today: NaiveDate) -> Fixture {
    let mut ctx = SchedulerContext::create_inmemory();
    ctx.config.timezone = chrono_tz::UTC;
    let gateway = Arc::new(InMemoryDispatchGateway::new());
    ctx.gateway = gateway.clone();

    let school = School::new("Northside", kind);
    let group = ClassGroup::new(&school.id, "Robotics A");
    let mut teacher = User::new("Ada", vec![UserRole::Teacher]);
    teacher.address = Some("teacher-chat".into());
    ctx.repos.schools.insert(&school).await.unwrap();
    ctx.repos.class_groups.insert(&group).await.unwrap();
    ctx.repos.users.insert(&teacher).await.unwrap();

    let mut fixture = Fixture {
        ctx,
        gateway,
        school,
        group,
        teacher,
    };
    fixture.set_now(datetime(today, "08:00"));
    fixture
}
