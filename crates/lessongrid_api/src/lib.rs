// --- File: crates/lessongrid_api/src/lib.rs ---
// Declare modules within this crate
pub mod client;
pub mod error;
pub mod models;
pub mod service;

pub use client::HttpBookingApi;
pub use error::ApiError;
pub use service::{BookingApi, BoxFuture};
