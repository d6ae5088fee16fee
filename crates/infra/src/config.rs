use chrono_tz::Tz;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// All dates and times of the calendar are local to this timezone
    pub timezone: Tz,
    /// Default horizon in whole weeks when materializing `Lesson`s
    pub materialize_weeks: u32,
    /// Interval in seconds between two evaluations of the due notifications
    pub notification_poll_interval_secs: u64,
    /// A shift preview is recomputed this long after the last change of
    /// the target date or the class group filter
    pub shift_preview_debounce_millis: u64,
    /// Maximum number of lesson updates in flight while applying a shift
    pub shift_batch_size: usize,
    /// Token of the messaging bot. Without it nothing can be dispatched.
    pub telegram_bot_token: Option<String>,
}

fn parse_env<T: FromStr + ToString>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name,
                    value,
                    default.to_string()
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let timezone = match std::env::var("SCHEDULER_TIMEZONE") {
            Ok(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given SCHEDULER_TIMEZONE: {} is not valid, falling back to UTC.",
                        tz
                    );
                    Tz::UTC
                }
            },
            Err(_) => {
                info!("Did not find SCHEDULER_TIMEZONE environment variable. Using UTC.");
                Tz::UTC
            }
        };
        let telegram_bot_token = match std::env::var("TELEGRAM_BOT_TOKEN") {
            Ok(token) if !token.trim().is_empty() => Some(token),
            _ => {
                info!("Did not find TELEGRAM_BOT_TOKEN environment variable. Dispatch is disabled.");
                None
            }
        };

        Self {
            port: parse_env("PORT", 5000),
            timezone,
            materialize_weeks: parse_env("MATERIALIZE_WEEKS", 4),
            notification_poll_interval_secs: parse_env("NOTIFICATION_POLL_INTERVAL_SECS", 30),
            shift_preview_debounce_millis: parse_env("SHIFT_PREVIEW_DEBOUNCE_MILLIS", 500),
            shift_batch_size: parse_env::<usize>("SHIFT_BATCH_SIZE", 10).max(1),
            telegram_bot_token,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
