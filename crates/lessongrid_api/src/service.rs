// --- File: crates/lessongrid_api/src/service.rs ---
//! Service abstraction over the booking server.
//!
//! The trait decouples the views and controllers from the concrete HTTP
//! client, so tests can drive them with an in-memory fake.

use crate::error::ApiError;
use crate::models::{AdminBookingRecord, BookSlotRequest, BookingRecord, WeekBooking};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result.
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Operations the booking server offers to this client.
///
/// Everything is asynchronous and non-blocking; callers must not assume any
/// ordering between an in-flight call and later user actions.
pub trait BookingApi: Send + Sync {
    /// Bookings overlapping the week starting at `week_start`.
    fn week_bookings(&self, week_start: DateTime<Utc>) -> BoxFuture<'_, Vec<WeekBooking>, ApiError>;

    /// Create a booking request for a slot.
    fn book_slot(&self, request: BookSlotRequest) -> BoxFuture<'_, (), ApiError>;

    /// The signed-in student's current bookings.
    fn student_bookings(&self) -> BoxFuture<'_, Vec<BookingRecord>, ApiError>;

    /// The signed-in student's past bookings.
    fn student_history(&self) -> BoxFuture<'_, Vec<BookingRecord>, ApiError>;

    /// Student-side cancellation of a pending booking.
    fn cancel_booking(&self, id: i64) -> BoxFuture<'_, (), ApiError>;

    /// The admin approval queue (pending bookings with student details).
    fn pending_bookings(&self) -> BoxFuture<'_, Vec<AdminBookingRecord>, ApiError>;

    fn approve_booking(&self, id: i64) -> BoxFuture<'_, (), ApiError>;

    fn deny_booking(&self, id: i64) -> BoxFuture<'_, (), ApiError>;
}
