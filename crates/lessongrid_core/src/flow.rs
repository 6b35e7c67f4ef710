// --- File: crates/lessongrid_core/src/flow.rs ---
//! The booking submission flow.
//!
//! `Idle -> SlotSelected -> Submitting -> {Succeeded, Failed}`, with duration
//! adjustment inside `SlotSelected`. Every transition returns a new value;
//! the caller replaces its state wholesale instead of mutating in place.

use crate::pricing::PriceSchedule;
use crate::slots::GridCell;
use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FlowError {
    #[error("Cannot book a slot in the past")]
    PastSlot,
    #[error("No slot is selected")]
    NoSelection,
    #[error("A submission is already in flight")]
    AlreadySubmitting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookingFlow {
    Idle,
    /// A slot is picked and the duration is being adjusted.
    SlotSelected {
        start: NaiveDateTime,
        duration_minutes: i64,
    },
    /// The create-booking call is in flight.
    Submitting {
        start: NaiveDateTime,
        duration_minutes: i64,
    },
    Succeeded,
    /// The server said no; the selection stays open for retry and the
    /// message is the server's, verbatim.
    Failed {
        start: NaiveDateTime,
        duration_minutes: i64,
        error: String,
    },
}

impl BookingFlow {
    /// Selecting a bookable cell seeds the duration to the schedule minimum.
    pub fn select(&self, cell: &GridCell, schedule: &PriceSchedule) -> Result<BookingFlow, FlowError> {
        if matches!(self, BookingFlow::Submitting { .. }) {
            return Err(FlowError::AlreadySubmitting);
        }
        if !cell.is_bookable() {
            return Err(FlowError::PastSlot);
        }
        Ok(BookingFlow::SlotSelected {
            start: cell.start,
            duration_minutes: schedule.min_minutes,
        })
    }

    /// Moves the duration by `delta_steps` schedule steps, clamped to
    /// `[min, max]`. Clamping is idempotent: clicking past a boundary any
    /// number of times stays at the boundary. Adjusting a failed submission
    /// re-opens it for editing.
    pub fn adjust_duration(&self, delta_steps: i64, schedule: &PriceSchedule) -> BookingFlow {
        match self {
            BookingFlow::SlotSelected {
                start,
                duration_minutes,
            }
            | BookingFlow::Failed {
                start,
                duration_minutes,
                ..
            } => BookingFlow::SlotSelected {
                start: *start,
                duration_minutes: schedule
                    .clamp_duration(duration_minutes + delta_steps * schedule.step_minutes),
            },
            other => other.clone(),
        }
    }

    /// Confirming moves to `Submitting`; the caller then issues the request
    /// and reports back through [`BookingFlow::complete`].
    pub fn begin_submit(&self) -> Result<BookingFlow, FlowError> {
        match self {
            BookingFlow::SlotSelected {
                start,
                duration_minutes,
            }
            | BookingFlow::Failed {
                start,
                duration_minutes,
                ..
            } => Ok(BookingFlow::Submitting {
                start: *start,
                duration_minutes: *duration_minutes,
            }),
            BookingFlow::Submitting { .. } => Err(FlowError::AlreadySubmitting),
            BookingFlow::Idle | BookingFlow::Succeeded => Err(FlowError::NoSelection),
        }
    }

    /// Resolves an in-flight submission. Anything but `Submitting` ignores
    /// the completion (a late callback after cancel must not revive the flow).
    pub fn complete(&self, result: Result<(), String>) -> BookingFlow {
        match (self, result) {
            (BookingFlow::Submitting { .. }, Ok(())) => BookingFlow::Succeeded,
            (
                BookingFlow::Submitting {
                    start,
                    duration_minutes,
                },
                Err(error),
            ) => BookingFlow::Failed {
                start: *start,
                duration_minutes: *duration_minutes,
                error,
            },
            (other, _) => other.clone(),
        }
    }

    /// Cancelling from any pre-submit state discards the selection.
    pub fn cancel(&self) -> BookingFlow {
        match self {
            BookingFlow::Submitting { .. } => self.clone(),
            _ => BookingFlow::Idle,
        }
    }

    /// The current (start, duration) selection, if any.
    pub fn selection(&self) -> Option<(NaiveDateTime, i64)> {
        match self {
            BookingFlow::SlotSelected {
                start,
                duration_minutes,
            }
            | BookingFlow::Submitting {
                start,
                duration_minutes,
            }
            | BookingFlow::Failed {
                start,
                duration_minutes,
                ..
            } => Some((*start, *duration_minutes)),
            BookingFlow::Idle | BookingFlow::Succeeded => None,
        }
    }

    /// Quoted price for the current selection.
    pub fn price_eur(&self, schedule: &PriceSchedule) -> Option<i64> {
        let (_, duration) = self.selection()?;
        schedule.price_eur(duration).ok()
    }
}
