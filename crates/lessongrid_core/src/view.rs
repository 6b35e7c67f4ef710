// --- File: crates/lessongrid_core/src/view.rs ---
//! Immutable week-view state.
//!
//! One `WeekView` value describes everything the grid renderer needs. Every
//! transition builds a new value; there is no shared mutable view state. The
//! `generation` counter tags fetches with the view they were issued for so a
//! stale response arriving after navigation is discarded instead of coloring
//! the wrong week.

use crate::slots::{resolve_week, BookingInterval, GridCell};
use crate::timegrid::SlotLabel;
use crate::week::{shift_week, week_start_of};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct WeekView {
    week_start: NaiveDate,
    generation: u64,
    bookings: Vec<BookingInterval>,
    cells: Vec<GridCell>,
}

impl WeekView {
    /// A fresh view on the week containing `today`, before any fetch.
    pub fn new(today: NaiveDate) -> WeekView {
        WeekView {
            week_start: week_start_of(today),
            generation: 0,
            bookings: Vec::new(),
            cells: Vec::new(),
        }
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    /// The tag a fetch issued right now must carry to be applied.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn bookings(&self) -> &[BookingInterval] {
        &self.bookings
    }

    /// Pages the view by whole weeks. The booking snapshot and cells are
    /// dropped (they belong to the old week) and the generation moves on,
    /// which invalidates any fetch still in flight.
    pub fn shift(&self, delta_weeks: i64) -> WeekView {
        WeekView {
            week_start: shift_week(self.week_start, delta_weeks),
            generation: self.generation + 1,
            bookings: Vec::new(),
            cells: Vec::new(),
        }
    }

    /// Applies a fetched booking snapshot and resolves the full grid.
    ///
    /// `fetched_for` is the generation the request was issued under; if the
    /// view has navigated since, the response is stale and `None` is
    /// returned so the caller keeps the current state.
    pub fn apply_bookings(
        &self,
        fetched_for: u64,
        bookings: Vec<BookingInterval>,
        labels: &[SlotLabel],
        now: NaiveDateTime,
        slot_minutes: i64,
    ) -> Option<WeekView> {
        if fetched_for != self.generation {
            debug!(
                fetched_for,
                current = self.generation,
                "discarding stale week fetch"
            );
            return None;
        }
        let cells = resolve_week(self.week_start, labels, &bookings, now, slot_minutes);
        Some(WeekView {
            week_start: self.week_start,
            generation: self.generation,
            bookings,
            cells,
        })
    }

    /// Re-resolves the grid from the retained snapshot; the periodic tick
    /// uses this to sweep newly-past cells without refetching.
    pub fn refresh(&self, labels: &[SlotLabel], now: NaiveDateTime, slot_minutes: i64) -> WeekView {
        let cells = resolve_week(self.week_start, labels, &self.bookings, now, slot_minutes);
        WeekView {
            week_start: self.week_start,
            generation: self.generation,
            bookings: self.bookings.clone(),
            cells,
        }
    }

    /// Looks up the resolved cell for a (date, label) identity.
    pub fn cell_at(&self, date: NaiveDate, label: SlotLabel) -> Option<&GridCell> {
        self.cells
            .iter()
            .find(|cell| cell.date == date && cell.label == label)
    }
}
