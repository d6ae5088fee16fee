use chrono::{NaiveTime, Timelike};
use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Local wall clock time of a lesson, minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay {
    hours: u32,
    minutes: u32,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidTimeError {
    #[error("Time: {0} is malformed, expected HH:MM")]
    Malformed(String),
}

impl TimeOfDay {
    pub fn new(hours: u32, minutes: u32) -> Option<Self> {
        if hours < 24 && minutes < 60 {
            Some(Self { hours, minutes })
        } else {
            None
        }
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        // hours and minutes are range checked on construction
        NaiveTime::from_hms_opt(self.hours, self.minutes, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        Self {
            hours: time.hour(),
            minutes: time.minute(),
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeError;

    /// Accepts `HH:MM` and also `HH:MM:SS` as produced by databases, the
    /// seconds are dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidTimeError::Malformed(s.to_string());
        let parts = s.trim().split(':').collect::<Vec<_>>();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(err());
        }
        if parts[1].len() != 2 || parts[0].is_empty() || parts[0].len() > 2 {
            return Err(err());
        }
        let hours = parts[0].parse::<u32>().map_err(|_| err())?;
        let minutes = parts[1].parse::<u32>().map_err(|_| err())?;
        if let Some(seconds) = parts.get(2) {
            seconds.parse::<u32>().map_err(|_| err())?;
        }
        Self::new(hours, minutes).ok_or_else(err)
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TimeVisitor;

        impl<'de> Visitor<'de> for TimeVisitor {
            type Value = TimeOfDay;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A time of day formatted as HH:MM")
            }

            fn visit_str<E>(self, value: &str) -> Result<TimeOfDay, E>
            where
                E: serde::de::Error,
            {
                value.parse::<TimeOfDay>().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(TimeVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_parses_valid_times() {
        assert_eq!("10:00".parse::<TimeOfDay>(), Ok(TimeOfDay::new(10, 0).unwrap()));
        assert_eq!("9:05".parse::<TimeOfDay>(), Ok(TimeOfDay::new(9, 5).unwrap()));
        assert_eq!(
            "23:59:00".parse::<TimeOfDay>(),
            Ok(TimeOfDay::new(23, 59).unwrap())
        );
    }

    #[test]
    fn it_rejects_invalid_times() {
        for time in &["24:00", "10:60", "10", "10:5", "aa:bb", "", "10:00:00:00"] {
            assert!(time.parse::<TimeOfDay>().is_err(), "{} should be rejected", time);
        }
    }

    #[test]
    fn it_orders_by_hour_then_minute() {
        let early = TimeOfDay::new(9, 59).unwrap();
        let late = TimeOfDay::new(10, 0).unwrap();
        assert!(early < late);
        assert_eq!(late.to_string(), "10:00");
    }
}
