// --- File: crates/lessongrid_core/src/timegrid.rs ---
//! The fixed time-grid of a booking day.
//!
//! A day's grid is a list of [`SlotLabel`]s generated once per configuration
//! (start hour, end hour, interval) and reused across weeks. Generation is
//! pure; nothing here looks at the clock.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One wall-clock row label of the grid, stored as 24h hour/minute.
///
/// Renders as 12-hour time with AM/PM: noon is "12:00 PM", midnight is
/// "12:00 AM".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotLabel {
    hour: u32,
    minute: u32,
}

impl SlotLabel {
    pub fn new(hour: u32, minute: u32) -> Option<SlotLabel> {
        if hour < 24 && minute < 60 {
            Some(SlotLabel { hour, minute })
        } else {
            None
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// The label as a time of day.
    pub fn time(&self) -> NaiveTime {
        // Invariant from `new`: hour < 24, minute < 60.
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap()
    }

    /// Parses a rendered label back, e.g. "10:15 AM" or "12:00 pm".
    pub fn parse(text: &str) -> Option<SlotLabel> {
        let mut parts = text.split_whitespace();
        let clock = parts.next()?;
        let period = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        let (hour_str, minute_str) = clock.split_once(':')?;
        let hour12: u32 = hour_str.parse().ok()?;
        let minute: u32 = minute_str.parse().ok()?;
        if !(1..=12).contains(&hour12) || minute > 59 {
            return None;
        }

        let hour = match period.to_ascii_uppercase().as_str() {
            "AM" => hour12 % 12,
            "PM" => hour12 % 12 + 12,
            _ => return None,
        };
        SlotLabel::new(hour, minute)
    }
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let period = if self.hour >= 12 { "PM" } else { "AM" };
        let mut hour12 = self.hour % 12;
        if hour12 == 0 {
            hour12 = 12;
        }
        write!(f, "{}:{:02} {}", hour12, self.minute, period)
    }
}

/// Generates the ordered labels covering `[day_start_hour:00, day_end_hour:00)`
/// stepping by `interval_minutes`.
///
/// If the span is not evenly divisible the last label simply falls short of
/// the end boundary; that is a configuration contract, not an error.
pub fn slot_labels(day_start_hour: u32, day_end_hour: u32, interval_minutes: u32) -> Vec<SlotLabel> {
    let mut labels = Vec::new();
    if interval_minutes == 0 || day_start_hour >= day_end_hour || day_end_hour > 24 {
        return labels;
    }

    let end_minutes = day_end_hour * 60;
    let mut minutes = day_start_hour * 60;
    while minutes < end_minutes {
        // minutes < 24 * 60, so the division stays in range for `new`.
        labels.push(SlotLabel {
            hour: minutes / 60,
            minute: minutes % 60,
        });
        minutes += interval_minutes;
    }
    labels
}
