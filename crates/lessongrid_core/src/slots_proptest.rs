// --- File: crates/lessongrid_core/src/slots_proptest.rs ---
#[cfg(test)]
mod tests {
    use crate::slots::{
        resolve_slot_status, resolve_week, BookingInterval, BookingStatus, SlotStatus,
    };
    use crate::timegrid::slot_labels;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use proptest::prelude::*;

    fn base_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    fn minute(offset: i64) -> NaiveDateTime {
        base_day().and_hms_opt(0, 0, 0).unwrap() + Duration::minutes(offset)
    }

    // Strategy: bookings anywhere in the visible week, 15 minutes to 8 hours
    // long, any lifecycle status.
    fn arb_booking() -> impl Strategy<Value = BookingInterval> {
        (
            0i64..(7 * 24 * 60),
            15i64..480,
            prop_oneof![
                Just(BookingStatus::Pending),
                Just(BookingStatus::Accepted),
                Just(BookingStatus::Denied),
                Just(BookingStatus::Cancelled),
            ],
        )
            .prop_map(|(start_offset, len, status)| BookingInterval {
                start: minute(start_offset),
                end: minute(start_offset + len),
                status,
            })
    }

    fn overlaps(cell_start: NaiveDateTime, cell_end: NaiveDateTime, b: &BookingInterval) -> bool {
        cell_start < b.end && cell_end > b.start
    }

    proptest! {
        // The resolved status is exactly the maximum priority among
        // overlapping, blocking bookings.
        #[test]
        fn status_matches_overlap_priority(
            bookings in prop::collection::vec(arb_booking(), 0..12),
            cell_offset in 0i64..(7 * 24 * 60),
        ) {
            let cell_start = minute(cell_offset);
            let cell_end = cell_start + Duration::minutes(15);
            let status = resolve_slot_status(cell_start, cell_end, &bookings);

            let any_accepted = bookings.iter().any(|b| {
                b.status == BookingStatus::Accepted && overlaps(cell_start, cell_end, b)
            });
            let any_pending = bookings.iter().any(|b| {
                b.status == BookingStatus::Pending && overlaps(cell_start, cell_end, b)
            });

            let expected = if any_accepted {
                SlotStatus::Accepted
            } else if any_pending {
                SlotStatus::Pending
            } else {
                SlotStatus::Available
            };
            prop_assert_eq!(status, expected);
        }

        // Non-blocking bookings can never change any cell of the week.
        #[test]
        fn invisible_bookings_change_nothing(
            bookings in prop::collection::vec(arb_booking(), 0..12),
        ) {
            let labels = slot_labels(8, 20, 60);
            let now = minute(-1);
            let blocking: Vec<_> = bookings
                .iter()
                .copied()
                .filter(|b| b.status.blocks_slot())
                .collect();

            let all = resolve_week(base_day(), &labels, &bookings, now, 15);
            let only_blocking = resolve_week(base_day(), &labels, &blocking, now, 15);
            prop_assert_eq!(all, only_blocking);
        }

        // Every cell is resolved exactly once and keyed by (date, label).
        #[test]
        fn grid_shape_is_stable(
            bookings in prop::collection::vec(arb_booking(), 0..6),
            interval in prop_oneof![Just(15u32), Just(30u32), Just(60u32)],
        ) {
            let labels = slot_labels(8, 20, interval);
            let cells = resolve_week(base_day(), &labels, &bookings, minute(0), i64::from(interval));
            prop_assert_eq!(cells.len(), labels.len() * 7);

            let mut identities: Vec<_> = cells
                .iter()
                .map(|cell| (cell.date, cell.label))
                .collect();
            identities.sort();
            identities.dedup();
            prop_assert_eq!(identities.len(), cells.len());
        }
    }
}
