// --- File: crates/lessongrid_core/src/slots.rs ---
//! Slot-state resolution: merging booking intervals onto the weekly grid.
//!
//! The resolver is a full recomputation over the visible week. There is no
//! incremental update; the cost is O(cells x bookings), which is fine at
//! ~500 cells and the handful of bookings a week carries.

use crate::timegrid::SlotLabel;
use crate::week::week_dates;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lifecycle status of a server-side booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Denied,
    Cancelled,
}

impl BookingStatus {
    /// Whether a booking in this status occupies grid cells. Denied and
    /// cancelled bookings are invisible to the resolver.
    pub fn blocks_slot(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Accepted)
    }

    /// Badge text for the list views.
    pub fn badge(self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending Approval",
            BookingStatus::Accepted => "Confirmed",
            BookingStatus::Denied => "Denied",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

/// Display status of one grid cell after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Pending,
    Accepted,
}

/// A `[start, end)` lesson reservation as fetched for the visible week.
/// Wall-clock of the configured timezone; conversion from the wire's UTC
/// happens at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookingInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: BookingStatus,
}

/// One cell of the rendered week: identity is the (date, label) pair.
/// Cells are value objects rebuilt on every resolve pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub date: NaiveDate,
    pub label: SlotLabel,
    pub start: NaiveDateTime,
    pub is_past: bool,
    pub status: SlotStatus,
}

impl GridCell {
    /// Past cells stay visible but are never interactive, whatever their
    /// booking status.
    pub fn is_bookable(&self) -> bool {
        !self.is_past
    }
}

/// Resolves the status of one synthetic cell interval against every booking.
///
/// Overlap is strict half-open intersection:
/// `cell_start < booking_end && cell_end > booking_start`. An accepted
/// overlap wins outright; pending only matters if nothing accepted overlaps.
pub fn resolve_slot_status(
    cell_start: NaiveDateTime,
    cell_end: NaiveDateTime,
    bookings: &[BookingInterval],
) -> SlotStatus {
    let mut status = SlotStatus::Available;
    for booking in bookings {
        if !(cell_start < booking.end && cell_end > booking.start) {
            continue;
        }
        match booking.status {
            // Highest priority, nothing can override it.
            BookingStatus::Accepted => return SlotStatus::Accepted,
            BookingStatus::Pending => status = SlotStatus::Pending,
            BookingStatus::Denied | BookingStatus::Cancelled => {}
        }
    }
    status
}

/// Builds and resolves the full date x label grid for one week.
///
/// `now` draws the past boundary; past cells skip booking resolution and
/// keep the neutral status, matching the invariant that "past" is marked
/// independently of booking state.
pub fn resolve_week(
    week_start: NaiveDate,
    labels: &[SlotLabel],
    bookings: &[BookingInterval],
    now: NaiveDateTime,
    slot_minutes: i64,
) -> Vec<GridCell> {
    debug!(
        %week_start,
        bookings = bookings.len(),
        rows = labels.len(),
        "resolving week grid"
    );
    let dates = week_dates(week_start);
    let mut cells = Vec::with_capacity(labels.len() * dates.len());
    for label in labels {
        for date in dates {
            let start = date.and_time(label.time());
            let end = start + Duration::minutes(slot_minutes);
            let is_past = start < now;
            let status = if is_past {
                SlotStatus::Available
            } else {
                resolve_slot_status(start, end, bookings)
            };
            cells.push(GridCell {
                date,
                label: *label,
                start,
                is_past,
                status,
            });
        }
    }
    cells
}
