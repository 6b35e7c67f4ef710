// --- File: crates/services/lessongrid_app/src/app_test.rs ---
use crate::app::{parse_command, App, Command, Outcome};
use chrono::{DateTime, Duration, Utc};
use lessongrid_api::models::{AdminBookingRecord, BookSlotRequest, BookingRecord, WeekBooking};
use lessongrid_api::{ApiError, BookingApi, BoxFuture};
use lessongrid_config::AppConfig;
use lessongrid_core::timegrid::SlotLabel;
use lessongrid_core::week::week_start_of;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the booking server.
#[derive(Default)]
struct FakeApi {
    week_calls: AtomicUsize,
    week_rows: Mutex<Vec<WeekBooking>>,
    week_error: Mutex<Option<String>>,
    book_slot_error: Mutex<Option<String>>,
    submitted: Mutex<Vec<BookSlotRequest>>,
    student_rows: Mutex<Vec<BookingRecord>>,
    admin_rows: Mutex<Vec<AdminBookingRecord>>,
}

impl BookingApi for FakeApi {
    fn week_bookings(&self, _week_start: DateTime<Utc>) -> BoxFuture<'_, Vec<WeekBooking>, ApiError> {
        self.week_calls.fetch_add(1, Ordering::SeqCst);
        let rows = self.week_rows.lock().unwrap().clone();
        let error = self.week_error.lock().unwrap().clone();
        Box::pin(async move {
            match error {
                Some(message) => Err(ApiError::Rejected(message)),
                None => Ok(rows),
            }
        })
    }

    fn book_slot(&self, request: BookSlotRequest) -> BoxFuture<'_, (), ApiError> {
        self.submitted.lock().unwrap().push(request);
        let error = self.book_slot_error.lock().unwrap().clone();
        Box::pin(async move {
            match error {
                Some(message) => Err(ApiError::Rejected(message)),
                None => Ok(()),
            }
        })
    }

    fn student_bookings(&self) -> BoxFuture<'_, Vec<BookingRecord>, ApiError> {
        let rows = self.student_rows.lock().unwrap().clone();
        Box::pin(async move { Ok(rows) })
    }

    fn student_history(&self) -> BoxFuture<'_, Vec<BookingRecord>, ApiError> {
        Box::pin(async move { Ok(Vec::new()) })
    }

    fn cancel_booking(&self, _id: i64) -> BoxFuture<'_, (), ApiError> {
        Box::pin(async move { Ok(()) })
    }

    fn pending_bookings(&self) -> BoxFuture<'_, Vec<AdminBookingRecord>, ApiError> {
        let rows = self.admin_rows.lock().unwrap().clone();
        Box::pin(async move { Ok(rows) })
    }

    fn approve_booking(&self, _id: i64) -> BoxFuture<'_, (), ApiError> {
        Box::pin(async move { Ok(()) })
    }

    fn deny_booking(&self, _id: i64) -> BoxFuture<'_, (), ApiError> {
        Box::pin(async move { Ok(()) })
    }
}

/// UTC keeps the fakes' naive timestamps aligned with the grid's wall clock.
fn test_config() -> Arc<AppConfig> {
    let mut config = AppConfig::default();
    config.grid.timezone = "UTC".to_string();
    Arc::new(config)
}

fn new_app(api: &Arc<FakeApi>) -> App {
    App::new(test_config(), api.clone()).unwrap()
}

async fn text(app: &mut App, line: &str) -> String {
    match app.handle_line(line).await {
        Outcome::Continue(text) => text,
        Outcome::Quit => panic!("unexpected quit for `{line}`"),
    }
}

/// Monday of next week: every slot there is strictly in the future.
fn next_monday() -> chrono::NaiveDate {
    week_start_of(Utc::now().date_naive()) + Duration::days(7)
}

#[test]
fn commands_parse() {
    assert_eq!(parse_command("next"), Ok(Command::NextWeek));
    assert_eq!(parse_command("p"), Ok(Command::PrevWeek));
    assert_eq!(
        parse_command("book tue 10:15 AM"),
        Ok(Command::Select {
            day: 1,
            label: SlotLabel::parse("10:15 AM").unwrap()
        })
    );
    assert_eq!(parse_command("cancel"), Ok(Command::CancelFlow));
    assert_eq!(parse_command("cancel 7"), Ok(Command::CancelBooking(7)));
    assert_eq!(parse_command("approve 3"), Ok(Command::Approve(3)));
    assert_eq!(parse_command("quit"), Ok(Command::Quit));
    assert!(parse_command("book tu 10:15 AM").is_err());
    assert!(parse_command("book tue").is_err());
    assert!(parse_command("frobnicate").is_err());
}

#[tokio::test]
async fn booking_happy_path_submits_and_rerenders() {
    let api = Arc::new(FakeApi::default());
    let mut app = new_app(&api);

    let grid = text(&mut app, "next").await;
    assert!(grid.contains("8:00 AM"));
    assert!(grid.contains("legend:"));

    let dialog = text(&mut app, "book mon 10:00 AM").await;
    assert!(dialog.contains("2h"), "{dialog}");
    assert!(dialog.contains("100\u{20ac}"), "{dialog}");
    assert!(dialog.contains("10:00 AM - 12:00 PM"), "{dialog}");

    let dialog = text(&mut app, "+").await;
    assert!(dialog.contains("3h"), "{dialog}");
    assert!(dialog.contains("150\u{20ac}"), "{dialog}");

    let fetches_before = api.week_calls.load(Ordering::SeqCst);
    let outcome = text(&mut app, "confirm").await;
    assert!(outcome.contains("Booking request submitted!"), "{outcome}");

    let submitted = api.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].lesson_minutes, 180);
    // Success closes the dialog and refetches the week.
    assert_eq!(api.week_calls.load(Ordering::SeqCst), fetches_before + 1);
}

#[tokio::test]
async fn duration_clamps_at_the_maximum_no_matter_how_many_clicks() {
    let api = Arc::new(FakeApi::default());
    let mut app = new_app(&api);
    text(&mut app, "next").await;
    text(&mut app, "book wed 9:00 AM").await;

    let mut last = String::new();
    for _ in 0..7 {
        last = text(&mut app, "+").await;
    }
    assert!(last.contains("4h"), "{last}");
    assert!(last.contains("200\u{20ac}"), "{last}");

    for _ in 0..9 {
        last = text(&mut app, "-").await;
    }
    assert!(last.contains("2h"), "{last}");
    assert!(last.contains("100\u{20ac}"), "{last}");
}

#[tokio::test]
async fn server_rejection_is_surfaced_verbatim_and_retryable() {
    let api = Arc::new(FakeApi::default());
    *api.book_slot_error.lock().unwrap() = Some("This time slot is already booked".to_string());
    let mut app = new_app(&api);
    text(&mut app, "next").await;
    text(&mut app, "book thu 2:00 PM").await;

    let failed = text(&mut app, "confirm").await;
    assert!(failed.contains("This time slot is already booked"), "{failed}");

    // The selection survives the failure; clearing the fault lets retry pass.
    *api.book_slot_error.lock().unwrap() = None;
    let retried = text(&mut app, "confirm").await;
    assert!(retried.contains("Booking request submitted!"), "{retried}");
    assert_eq!(api.submitted.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn cancel_discards_the_selection() {
    let api = Arc::new(FakeApi::default());
    let mut app = new_app(&api);
    text(&mut app, "next").await;
    text(&mut app, "book fri 11:00 AM").await;
    let out = text(&mut app, "cancel").await;
    assert!(out.contains("discarded"), "{out}");
    let out = text(&mut app, "+").await;
    assert!(out.contains("no slot selected"), "{out}");
    let out = text(&mut app, "confirm").await;
    assert!(out.contains("error"), "{out}");
}

#[tokio::test]
async fn accepted_booking_colours_exactly_its_cells() {
    let monday = next_monday();
    let api = Arc::new(FakeApi::default());
    *api.week_rows.lock().unwrap() = vec![WeekBooking {
        start_time: format!("{monday}T10:00:00"),
        end_time: format!("{monday}T12:00:00"),
        status: lessongrid_core::slots::BookingStatus::Accepted,
    }];
    let mut app = new_app(&api);

    let grid = text(&mut app, "next").await;
    // Markers are padded to the column width, so a bare letter elsewhere in
    // the text cannot collide with this pattern.
    let accepted_cells = grid.matches("        a ").count();
    assert_eq!(accepted_cells, 8, "{grid}");

    // Booking the covered slot is still possible (the server decides
    // conflicts), but the cell reads accepted on the grid.
    let dialog = text(&mut app, "book mon 10:15 AM").await;
    assert!(dialog.contains("10:15 AM"), "{dialog}");
}

#[tokio::test]
async fn past_slot_selection_is_refused() {
    let api = Arc::new(FakeApi::default());
    let mut app = new_app(&api);
    // Last week is entirely in the past.
    text(&mut app, "prev").await;
    let out = text(&mut app, "book mon 10:00 AM").await;
    assert!(out.contains("past"), "{out}");
}

#[tokio::test]
async fn admin_queue_lists_student_and_price() {
    let api = Arc::new(FakeApi::default());
    *api.admin_rows.lock().unwrap() = vec![AdminBookingRecord {
        booking: BookingRecord {
            id: 7,
            start_time: "2024-06-03T10:00:00".to_string(),
            end_time: "2024-06-03T12:00:00".to_string(),
            lesson_minutes: 120,
            price_eur: 100,
            status: lessongrid_core::slots::BookingStatus::Pending,
            created_at: "2024-06-01T09:30:00".to_string(),
        },
        student_name: "Ada Lovelace".to_string(),
        student_email: "ada@example.com".to_string(),
    }];
    let mut app = new_app(&api);

    let queue = text(&mut app, "pending").await;
    assert!(queue.contains("Ada Lovelace"), "{queue}");
    assert!(queue.contains("100\u{20ac}"), "{queue}");
    assert!(queue.contains("#7"), "{queue}");

    let out = text(&mut app, "approve 7").await;
    assert!(out.contains("approved"), "{out}");
}

#[tokio::test]
async fn mutation_notes_a_failed_grid_refresh() {
    let api = Arc::new(FakeApi::default());
    let mut app = new_app(&api);
    text(&mut app, "week").await;

    // The cancel succeeds but the follow-up week fetch does not; the
    // message keeps the success and reports the refresh failure.
    *api.week_error.lock().unwrap() = Some("calendar backend unavailable".to_string());
    let out = text(&mut app, "cancel 9").await;
    assert!(out.contains("Booking #9 cancelled."), "{out}");
    assert!(out.contains("(grid refresh failed)"), "{out}");

    *api.week_error.lock().unwrap() = None;
    let out = text(&mut app, "approve 4").await;
    assert_eq!(out, "Booking #4 approved.");
}

#[tokio::test]
async fn student_list_renders_badges_or_empty_note() {
    let api = Arc::new(FakeApi::default());
    let mut app = new_app(&api);
    let out = text(&mut app, "mine").await;
    assert!(out.contains("No bookings yet."), "{out}");

    *api.student_rows.lock().unwrap() = vec![BookingRecord {
        id: 3,
        start_time: "2024-06-03T10:00:00".to_string(),
        end_time: "2024-06-03T13:00:00".to_string(),
        lesson_minutes: 180,
        price_eur: 150,
        status: lessongrid_core::slots::BookingStatus::Accepted,
        created_at: "2024-06-01T09:30:00".to_string(),
    }];
    let out = text(&mut app, "mine").await;
    assert!(out.contains("Confirmed"), "{out}");
    assert!(out.contains("3h"), "{out}");
    assert!(out.contains("150\u{20ac}"), "{out}");
}
