mod config;
mod repos;
mod services;
mod system;

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
pub use config::Config;
pub use repos::{DeleteResult, ILessonRepo, LessonQuery, Repos, ADMIN_ADDRESS_KEY};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::{Arc, Mutex};
pub use system::{ISys, StaticTimeSys};
use system::RealSys;
use tutorhub_scheduler_domain::NotificationBoard;

#[derive(Clone)]
pub struct SchedulerContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub gateway: Arc<dyn IDispatchGateway>,
    /// Due notifications and dismissals of the running process
    pub notifications: Arc<Mutex<NotificationBoard>>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl SchedulerContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let gateway: Arc<dyn IDispatchGateway> = match &config.telegram_bot_token {
            Some(token) => Arc::new(TelegramDispatchGateway::new(token.clone())),
            None => Arc::new(DisabledDispatchGateway {}),
        };
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            gateway,
            notifications: Arc::new(Mutex::new(NotificationBoard::new())),
        }
    }

    /// Context backed by inmemory repositories and a recording gateway
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            gateway: Arc::new(InMemoryDispatchGateway::new()),
            notifications: Arc::new(Mutex::new(NotificationBoard::new())),
        }
    }

    /// The current wall clock time in the configured timezone
    pub fn now(&self) -> NaiveDateTime {
        let now = match Utc.timestamp_millis_opt(self.sys.get_timestamp_millis()) {
            chrono::LocalResult::Single(now) => now,
            _ => Utc::now(),
        };
        now.with_timezone(&self.config.timezone).naive_local()
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> SchedulerContext {
    SchedulerContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_local_to_the_configured_timezone() {
        let mut ctx = SchedulerContext::create_inmemory();
        // 2025-03-03T09:30:00Z
        ctx.sys = Arc::new(StaticTimeSys {
            timestamp_millis: 1740994200000,
        });
        ctx.config.timezone = chrono_tz::UTC;
        assert_eq!(ctx.now().to_string(), "2025-03-03 09:30:00");

        ctx.config.timezone = chrono_tz::Asia::Tokyo;
        assert_eq!(ctx.now().to_string(), "2025-03-03 18:30:00");
        assert_eq!(ctx.today(), NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
    }
}
