//! Current time and weekday as shown on the dashboard.

use std::fmt::Display;

use chrono::{DateTime, Datelike, Local, TimeZone, Weekday};
use serde::Serialize;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Dutch name of a weekday, lowercase as written in running text
pub fn dutch_weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "maandag",
        Weekday::Tue => "dinsdag",
        Weekday::Wed => "woensdag",
        Weekday::Thu => "donderdag",
        Weekday::Fri => "vrijdag",
        Weekday::Sat => "zaterdag",
        Weekday::Sun => "zondag",
    }
}

/// A formatted clock reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockReading {
    /// `YYYY-MM-DD HH:MM:SS`
    pub time: String,
    pub weekday: &'static str,
}

impl ClockReading {
    pub fn at<Tz>(moment: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            time: moment.format(TIME_FORMAT).to_string(),
            weekday: dutch_weekday(moment.weekday()),
        }
    }

    /// Reading of the local wall clock
    pub fn now() -> Self {
        Self::at(&Local::now())
    }
}
