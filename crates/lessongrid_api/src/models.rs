// --- File: crates/lessongrid_api/src/models.rs ---
//! Wire models for the booking server's JSON envelopes.
//!
//! Every response carries a `success` flag and, on failure, an `error`
//! message meant for the user verbatim. Timestamps come as ISO 8601, either
//! RFC 3339 with an offset/`Z` or naive (the server stores naive UTC).

use crate::error::ApiError;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use lessongrid_core::slots::{BookingInterval, BookingStatus};
use serde::{Deserialize, Serialize};

/// One booking of the visible week, as returned by
/// `GET /api/calendar/bookings`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeekBooking {
    pub start_time: String,
    pub end_time: String,
    pub status: BookingStatus,
}

impl WeekBooking {
    /// Converts the wire timestamps into a wall-clock interval of `tz` for
    /// the resolver.
    pub fn interval_in(&self, tz: Tz) -> Result<BookingInterval, ApiError> {
        Ok(BookingInterval {
            start: parse_wire_timestamp(&self.start_time, tz)?,
            end: parse_wire_timestamp(&self.end_time, tz)?,
            status: self.status,
        })
    }
}

/// Accepts RFC 3339 ("2024-06-03T10:00:00Z") or the server's naive ISO
/// ("2024-06-03T10:00:00", implicitly UTC) and yields wall-clock in `tz`.
pub fn parse_wire_timestamp(raw: &str, tz: Tz) -> Result<NaiveDateTime, ApiError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&tz).naive_local());
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|_| ApiError::TimestampError(raw.to_string()))?;
    Ok(naive.and_utc().with_timezone(&tz).naive_local())
}

#[derive(Debug, Deserialize)]
pub struct WeekBookingsResponse {
    pub success: bool,
    #[serde(default)]
    pub bookings: Vec<WeekBooking>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /api/book-slot`.
#[derive(Debug, Clone, Serialize)]
pub struct BookSlotRequest {
    /// RFC 3339 start of the lesson.
    pub start_time: String,
    pub lesson_minutes: i64,
}

impl BookSlotRequest {
    /// Builds the request from a wall-clock selection in `tz`, serialising
    /// the start as UTC with a `Z` suffix the way the server expects.
    pub fn from_selection(start: NaiveDateTime, lesson_minutes: i64, tz: Tz) -> Option<Self> {
        let start_utc: DateTime<Utc> = tz
            .from_local_datetime(&start)
            .single()?
            .with_timezone(&Utc);
        Some(BookSlotRequest {
            start_time: start_utc.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            lesson_minutes,
        })
    }
}

/// Plain `{success, error?}` envelope used by mutations.
#[derive(Debug, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// One row of the student list views (`/api/student/bookings`, `/history`).
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRecord {
    pub id: i64,
    pub start_time: String,
    pub end_time: String,
    pub lesson_minutes: i64,
    pub price_eur: i64,
    pub status: BookingStatus,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct BookingListResponse {
    pub success: bool,
    #[serde(default)]
    pub bookings: Vec<BookingRecord>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One row of the admin approval queue; the booking plus who asked for it.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminBookingRecord {
    #[serde(flatten)]
    pub booking: BookingRecord,
    pub student_name: String,
    pub student_email: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminBookingListResponse {
    pub success: bool,
    #[serde(default)]
    pub bookings: Vec<AdminBookingRecord>,
    #[serde(default)]
    pub error: Option<String>,
}
