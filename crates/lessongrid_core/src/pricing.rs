// --- File: crates/lessongrid_core/src/pricing.rs ---
//! Lesson pricing: a base price covering the minimum duration plus a fixed
//! increment per additional full hour.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PricingError {
    /// The schedule only quotes whole-hour lessons above the minimum; the
    /// server rejects anything else, so the client refuses to price it.
    #[error("Lesson length must be a whole number of hours, got {0} minutes")]
    NotHourMultiple(i64),
    #[error("Lesson length must be between {min} and {max} minutes, got {got}")]
    OutOfRange { got: i64, min: i64, max: i64 },
}

/// The base-plus-hourly price rule for lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSchedule {
    /// Euros covering the first `min_minutes`.
    pub base_price_eur: i64,
    /// Euros per full hour beyond the minimum.
    pub price_per_hour_eur: i64,
    pub min_minutes: i64,
    pub max_minutes: i64,
    /// Step the duration buttons move by.
    pub step_minutes: i64,
}

impl Default for PriceSchedule {
    fn default() -> Self {
        // 100 EUR for the first two hours, 50 EUR per extra hour, up to four.
        PriceSchedule {
            base_price_eur: 100,
            price_per_hour_eur: 50,
            min_minutes: 120,
            max_minutes: 240,
            step_minutes: 60,
        }
    }
}

impl PriceSchedule {
    /// Price in whole euros for a lesson of `duration_minutes`.
    ///
    /// Durations below the minimum price as the minimum. Durations above it
    /// must land on a whole hour; fractional hours are rejected rather than
    /// rounded.
    pub fn price_eur(&self, duration_minutes: i64) -> Result<i64, PricingError> {
        if duration_minutes <= self.min_minutes {
            return Ok(self.base_price_eur);
        }
        let extra = duration_minutes - self.min_minutes;
        if extra % 60 != 0 {
            return Err(PricingError::NotHourMultiple(duration_minutes));
        }
        Ok(self.base_price_eur + self.price_per_hour_eur * (extra / 60))
    }

    /// Validates a duration for submission: inside `[min, max]` and on a
    /// step boundary.
    pub fn validate_duration(&self, duration_minutes: i64) -> Result<(), PricingError> {
        if duration_minutes < self.min_minutes || duration_minutes > self.max_minutes {
            return Err(PricingError::OutOfRange {
                got: duration_minutes,
                min: self.min_minutes,
                max: self.max_minutes,
            });
        }
        if (duration_minutes - self.min_minutes) % self.step_minutes != 0 {
            return Err(PricingError::NotHourMultiple(duration_minutes));
        }
        Ok(())
    }

    /// Clamps a duration into `[min, max]`; idempotent at the boundaries.
    pub fn clamp_duration(&self, duration_minutes: i64) -> i64 {
        duration_minutes.clamp(self.min_minutes, self.max_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_hour_prices_are_exact() {
        let schedule = PriceSchedule::default();
        assert_eq!(schedule.price_eur(120), Ok(100));
        assert_eq!(schedule.price_eur(180), Ok(150));
        assert_eq!(schedule.price_eur(240), Ok(200));
    }

    #[test]
    fn below_minimum_clamps_to_base() {
        let schedule = PriceSchedule::default();
        assert_eq!(schedule.price_eur(90), Ok(100));
        assert_eq!(schedule.price_eur(0), Ok(100));
    }

    #[test]
    fn fractional_hours_are_rejected_not_rounded() {
        let schedule = PriceSchedule::default();
        assert_eq!(schedule.price_eur(150), Err(PricingError::NotHourMultiple(150)));
        assert_eq!(schedule.price_eur(121), Err(PricingError::NotHourMultiple(121)));
    }

    #[test]
    fn submission_validation_bounds() {
        let schedule = PriceSchedule::default();
        assert!(schedule.validate_duration(120).is_ok());
        assert!(schedule.validate_duration(240).is_ok());
        assert_eq!(
            schedule.validate_duration(60),
            Err(PricingError::OutOfRange {
                got: 60,
                min: 120,
                max: 240
            })
        );
        assert_eq!(
            schedule.validate_duration(300),
            Err(PricingError::OutOfRange {
                got: 300,
                min: 120,
                max: 240
            })
        );
        assert_eq!(
            schedule.validate_duration(150),
            Err(PricingError::NotHourMultiple(150))
        );
    }

    #[test]
    fn clamp_is_idempotent_at_the_edges() {
        let schedule = PriceSchedule::default();
        assert_eq!(schedule.clamp_duration(60), 120);
        assert_eq!(schedule.clamp_duration(schedule.clamp_duration(60)), 120);
        assert_eq!(schedule.clamp_duration(9000), 240);
        assert_eq!(schedule.clamp_duration(180), 180);
    }
}
