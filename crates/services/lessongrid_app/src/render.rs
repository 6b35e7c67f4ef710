// --- File: crates/services/lessongrid_app/src/render.rs ---
//! Pure rendering of the grid and list views to text.
//!
//! Nothing here touches the terminal; every function returns a `String` so
//! the views can be tested without one. Re-rendering fully replaces previous
//! output, it never patches it.

use chrono::{NaiveDateTime, Timelike};
use lessongrid_api::models::{AdminBookingRecord, BookingRecord};
use lessongrid_api::ApiError;
use lessongrid_core::flow::BookingFlow;
use lessongrid_core::pricing::PriceSchedule;
use lessongrid_core::slots::SlotStatus;
use lessongrid_core::timegrid::SlotLabel;
use lessongrid_core::view::WeekView;
use lessongrid_core::week::{month_year_label, ordinal_day, week_dates, DAY_NAMES};

/// Per-cell marker: available '.', pending 'p', accepted 'a', past 'x'.
fn cell_marker(is_past: bool, status: SlotStatus) -> char {
    if is_past {
        return 'x';
    }
    match status {
        SlotStatus::Available => '.',
        SlotStatus::Pending => 'p',
        SlotStatus::Accepted => 'a',
    }
}

/// The weekly grid: one row per time label, one column per day.
pub fn grid(view: &WeekView, labels: &[SlotLabel]) -> String {
    let mut out = String::new();
    out.push_str(&format!("== {} ==\n", month_year_label(view.week_start())));

    let dates = week_dates(view.week_start());
    out.push_str(&format!("{:>9} ", ""));
    for (name, date) in DAY_NAMES.iter().zip(dates) {
        out.push_str(&format!("{:>9} ", format!("{} {}", &name[..3], ordinal_day(date))));
    }
    out.push('\n');

    for label in labels {
        out.push_str(&format!("{:>9} ", label.to_string()));
        for date in dates {
            let marker = view
                .cell_at(date, *label)
                .map(|cell| cell_marker(cell.is_past, cell.status))
                .unwrap_or(' ');
            out.push_str(&format!("{:>9} ", marker));
        }
        out.push('\n');
    }
    out.push_str("legend: . available   p pending   a accepted   x past\n");
    out
}

/// "10:00 AM" for an arbitrary wall-clock instant.
fn clock(at: NaiveDateTime) -> String {
    // Minutes on the grid are always < 60, so the label constructor holds.
    SlotLabel::new(at.hour(), at.minute()).unwrap().to_string()
}

/// "11:00 AM - 1:00 PM" for a start and a length.
pub fn time_range(start: NaiveDateTime, minutes: i64) -> String {
    let end = start + chrono::Duration::minutes(minutes);
    format!("{} - {}", clock(start), clock(end))
}

/// "2h" style duration, matching the site's buttons.
pub fn duration(minutes: i64) -> String {
    format!("{}h", minutes / 60)
}

/// "Mon, Jun 3, 2024, 10:00 AM".
fn date_line(at: NaiveDateTime) -> String {
    format!("{}, {}", at.format("%a, %b %-d, %Y"), clock(at))
}

/// The booking dialog: current slot, duration and quoted price, or the
/// verbatim server error after a failed submission.
pub fn selection(flow: &BookingFlow, schedule: &PriceSchedule) -> Option<String> {
    let (start, duration_minutes) = flow.selection()?;
    let price = flow
        .price_eur(schedule)
        .map(|price| format!("{price}\u{20ac}"))
        .unwrap_or_else(|| "?".to_string());
    let mut out = format!(
        "booking {} | {} | {} | {}",
        start.format("%a, %b %-d, %Y"),
        time_range(start, duration_minutes),
        duration(duration_minutes),
        price,
    );
    if let BookingFlow::Failed { error, .. } = flow {
        out.push_str(&format!("\n  error: {error}"));
    }
    if matches!(flow, BookingFlow::Submitting { .. }) {
        out.push_str("\n  submitting...");
    }
    Some(out)
}

/// The student's booking list with status badges.
pub fn student_list(title: &str, rows: &[BookingRecord], tz: chrono_tz::Tz) -> String {
    let mut out = format!("== {title} ==\n");
    if rows.is_empty() {
        out.push_str("No bookings yet.\n");
        return out;
    }
    for row in rows {
        let line = match (
            lessongrid_api::models::parse_wire_timestamp(&row.start_time, tz),
            lessongrid_api::models::parse_wire_timestamp(&row.end_time, tz),
        ) {
            (Ok(start), Ok(_end)) => format!(
                "#{} {} | {} | {} | {}\u{20ac} | {}",
                row.id,
                date_line(start),
                time_range(start, row.lesson_minutes),
                duration(row.lesson_minutes),
                row.price_eur,
                row.status.badge(),
            ),
            _ => format!(
                "#{} {} | {} | {}",
                row.id,
                row.start_time,
                duration(row.lesson_minutes),
                row.status.badge()
            ),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// The admin approval queue: who asked, when, for how long, for how much.
pub fn admin_list(rows: &[AdminBookingRecord], tz: chrono_tz::Tz) -> String {
    let mut out = String::from("== Pending booking requests ==\n");
    if rows.is_empty() {
        out.push_str("No pending requests.\n");
        return out;
    }
    for row in rows {
        let when = lessongrid_api::models::parse_wire_timestamp(&row.booking.start_time, tz)
            .map(|start| {
                format!(
                    "{} | {}",
                    date_line(start),
                    time_range(start, row.booking.lesson_minutes)
                )
            })
            .unwrap_or_else(|_| row.booking.start_time.clone());
        out.push_str(&format!(
            "#{} {} <{}> | {} | {} | {}\u{20ac}\n",
            row.booking.id,
            row.student_name,
            row.student_email,
            when,
            duration(row.booking.lesson_minutes),
            row.booking.price_eur,
        ));
    }
    out
}

/// One line for a failed operation, using the taxonomy's user messages.
pub fn error_line(err: &ApiError) -> String {
    format!("error: {}", err.user_message())
}
