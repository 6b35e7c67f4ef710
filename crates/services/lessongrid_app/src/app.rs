// --- File: crates/services/lessongrid_app/src/app.rs ---
//! The controller: parses commands, drives the immutable view state and the
//! booking flow, and talks to the booking server through the `BookingApi`
//! seam. All output is returned as text; the event loop in `main` prints it.

use chrono::{NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use lessongrid_api::models::BookSlotRequest;
use lessongrid_api::BookingApi;
use lessongrid_common::{config_error, LessongridError};
use lessongrid_config::AppConfig;
use lessongrid_core::flow::BookingFlow;
use lessongrid_core::pricing::PriceSchedule;
use lessongrid_core::timegrid::{slot_labels, SlotLabel};
use lessongrid_core::view::WeekView;
use lessongrid_core::week::{week_dates, DAY_NAMES};
use std::sync::Arc;
use tracing::{debug, info};

use crate::render;

const HELP: &str = "\
commands:
  week            refresh and show the current week grid
  next / prev     page the grid one week forward / back
  book DAY TIME   pick a slot, e.g. `book tue 10:15 AM`
  + / -           lengthen / shorten the selected lesson by one hour
  confirm         submit the booking request
  cancel          discard the current selection
  cancel ID       cancel one of your bookings, e.g. `cancel 7`
  mine            your bookings        history   your past bookings
  pending         admin approval queue
  approve ID / deny ID
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Week,
    NextWeek,
    PrevWeek,
    Select { day: usize, label: SlotLabel },
    Longer,
    Shorter,
    Confirm,
    CancelFlow,
    Mine,
    History,
    CancelBooking(i64),
    Pending,
    Approve(i64),
    Deny(i64),
    Quit,
}

/// What the event loop does with a handled line.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

fn day_index(word: &str) -> Option<usize> {
    let lower = word.to_ascii_lowercase();
    DAY_NAMES
        .iter()
        .position(|name| name.to_ascii_lowercase().starts_with(&lower) && lower.len() >= 3)
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let usage = |hint: &str| Err(format!("usage: {hint}"));
    match tokens.as_slice() {
        [] => Err("type `help` for commands".to_string()),
        ["help"] | ["?"] => Ok(Command::Help),
        ["week"] | ["w"] => Ok(Command::Week),
        ["next"] | ["n"] => Ok(Command::NextWeek),
        ["prev"] | ["p"] => Ok(Command::PrevWeek),
        ["book", day, time @ ..] if !time.is_empty() => {
            let Some(day) = day_index(day) else {
                return usage("book DAY TIME (DAY like `mon` or `tuesday`)");
            };
            let Some(label) = SlotLabel::parse(&time.join(" ")) else {
                return usage("book DAY TIME (TIME like `10:15 AM`)");
            };
            Ok(Command::Select { day, label })
        }
        ["book", ..] => usage("book DAY TIME, e.g. `book tue 10:15 AM`"),
        ["+"] | ["longer"] => Ok(Command::Longer),
        ["-"] | ["shorter"] => Ok(Command::Shorter),
        ["confirm"] => Ok(Command::Confirm),
        ["cancel"] => Ok(Command::CancelFlow),
        ["cancel", id] => id
            .parse()
            .map(Command::CancelBooking)
            .or_else(|_| usage("cancel ID (a booking number)")),
        ["mine"] | ["bookings"] => Ok(Command::Mine),
        ["history"] => Ok(Command::History),
        ["pending"] | ["admin"] => Ok(Command::Pending),
        ["approve", id] => id
            .parse()
            .map(Command::Approve)
            .or_else(|_| usage("approve ID")),
        ["deny", id] => id.parse().map(Command::Deny).or_else(|_| usage("deny ID")),
        ["quit"] | ["exit"] | ["q"] => Ok(Command::Quit),
        other => Err(format!(
            "unknown command `{}`; type `help`",
            other.join(" ")
        )),
    }
}

pub struct App {
    config: Arc<AppConfig>,
    api: Arc<dyn BookingApi>,
    tz: Tz,
    labels: Vec<SlotLabel>,
    schedule: PriceSchedule,
    view: WeekView,
    flow: BookingFlow,
}

impl App {
    pub fn new(config: Arc<AppConfig>, api: Arc<dyn BookingApi>) -> Result<App, LessongridError> {
        let tz = config.grid.timezone().map_err(config_error)?;
        let labels = slot_labels(
            config.grid.day_start_hour,
            config.grid.day_end_hour,
            config.grid.interval_minutes,
        );
        let schedule = PriceSchedule {
            base_price_eur: config.pricing.base_price_eur,
            price_per_hour_eur: config.pricing.price_per_hour_eur,
            min_minutes: config.pricing.min_duration_minutes,
            max_minutes: config.pricing.max_duration_minutes,
            step_minutes: config.pricing.duration_step_minutes,
        };
        let today = Utc::now().with_timezone(&tz).date_naive();
        Ok(App {
            config,
            api,
            tz,
            labels,
            schedule,
            view: WeekView::new(today),
            flow: BookingFlow::Idle,
        })
    }

    pub fn refresh_interval_secs(&self) -> u64 {
        self.config.refresh_interval_secs
    }

    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }

    fn slot_minutes(&self) -> i64 {
        i64::from(self.config.grid.interval_minutes)
    }

    /// Fetches the visible week's bookings and resolves the grid. Returns an
    /// error line on failure; the view keeps its previous state then.
    pub async fn fetch_week(&mut self) -> Result<(), String> {
        let issued_for = self.view.generation();
        let midnight = self.view.week_start().and_hms_opt(0, 0, 0).unwrap();
        let week_start_utc = match self.tz.from_local_datetime(&midnight).earliest() {
            Some(local) => local.with_timezone(&Utc),
            None => {
                return Err("error: week start does not exist in the configured timezone".into())
            }
        };

        let rows = self
            .api
            .week_bookings(week_start_utc)
            .await
            .map_err(|err| render::error_line(&err))?;
        let mut bookings = Vec::with_capacity(rows.len());
        for row in rows {
            bookings.push(row.interval_in(self.tz).map_err(|err| render::error_line(&err))?);
        }

        if let Some(next) = self.view.apply_bookings(
            issued_for,
            bookings,
            &self.labels,
            self.now(),
            self.slot_minutes(),
        ) {
            self.view = next;
        }
        Ok(())
    }

    fn grid_text(&self) -> String {
        let mut out = render::grid(&self.view, &self.labels);
        if let Some(dialog) = render::selection(&self.flow, &self.schedule) {
            out.push_str(&dialog);
            out.push('\n');
        }
        out
    }

    /// The periodic tick: re-evaluate past flags from the retained snapshot.
    pub fn sweep_past_slots(&mut self) {
        self.view = self.view.refresh(&self.labels, self.now(), self.slot_minutes());
    }

    pub async fn handle_line(&mut self, line: &str) -> Outcome {
        match parse_command(line) {
            Ok(command) => self.handle(command).await,
            Err(message) => Outcome::Continue(message),
        }
    }

    async fn handle(&mut self, command: Command) -> Outcome {
        debug!(?command, "handling command");
        let text = match command {
            Command::Quit => return Outcome::Quit,
            Command::Help => HELP.to_string(),
            Command::Week => match self.fetch_week().await {
                Ok(()) => self.grid_text(),
                Err(line) => line,
            },
            Command::NextWeek => self.shift_week(1).await,
            Command::PrevWeek => self.shift_week(-1).await,
            Command::Select { day, label } => self.select(day, label),
            Command::Longer => self.adjust(1),
            Command::Shorter => self.adjust(-1),
            Command::Confirm => self.confirm().await,
            Command::CancelFlow => {
                self.flow = self.flow.cancel();
                "selection discarded".to_string()
            }
            Command::Mine => match self.api.student_bookings().await {
                Ok(rows) => render::student_list("My bookings", &rows, self.tz),
                Err(err) => render::error_line(&err),
            },
            Command::History => match self.api.student_history().await {
                Ok(rows) => render::student_list("Booking history", &rows, self.tz),
                Err(err) => render::error_line(&err),
            },
            Command::CancelBooking(id) => match self.api.cancel_booking(id).await {
                Ok(()) => {
                    info!(id, "booking cancelled");
                    self.refetch_after(format!("Booking #{id} cancelled.")).await
                }
                Err(err) => render::error_line(&err),
            },
            Command::Pending => match self.api.pending_bookings().await {
                Ok(rows) => render::admin_list(&rows, self.tz),
                Err(err) => render::error_line(&err),
            },
            Command::Approve(id) => match self.api.approve_booking(id).await {
                Ok(()) => {
                    info!(id, "booking approved");
                    self.refetch_after(format!("Booking #{id} approved.")).await
                }
                Err(err) => render::error_line(&err),
            },
            Command::Deny(id) => match self.api.deny_booking(id).await {
                Ok(()) => {
                    info!(id, "booking denied");
                    self.refetch_after(format!("Booking #{id} denied.")).await
                }
                Err(err) => render::error_line(&err),
            },
        };
        Outcome::Continue(text)
    }

    /// A mutation invalidates the visible week; refetch it and note a
    /// failed refresh on the message instead of dropping it.
    async fn refetch_after(&mut self, message: String) -> String {
        match self.fetch_week().await {
            Ok(()) => message,
            Err(_) => format!("{message} (grid refresh failed)"),
        }
    }

    async fn shift_week(&mut self, delta: i64) -> String {
        // Navigation replaces the view first; a fetch still in flight for the
        // old week is now tagged stale and cannot land here.
        self.view = self.view.shift(delta);
        match self.fetch_week().await {
            Ok(()) => self.grid_text(),
            Err(line) => line,
        }
    }

    fn select(&mut self, day: usize, label: SlotLabel) -> String {
        if self.view.cells().is_empty() {
            return "the grid is empty; run `week` first".to_string();
        }
        let date = week_dates(self.view.week_start())[day];
        let Some(cell) = self.view.cell_at(date, label) else {
            // The grid has a fixed set of rows; a time outside it is a user
            // error worth a precise diagnostic, not a silent no-op.
            return format!("no {label} slot on the grid");
        };
        match self.flow.select(cell, &self.schedule) {
            Ok(flow) => {
                self.flow = flow;
                render::selection(&self.flow, &self.schedule)
                    .unwrap_or_else(|| "selected".to_string())
            }
            Err(err) => format!("error: {err}"),
        }
    }

    fn adjust(&mut self, delta_steps: i64) -> String {
        if self.flow.selection().is_none() {
            return "no slot selected; `book DAY TIME` first".to_string();
        }
        self.flow = self.flow.adjust_duration(delta_steps, &self.schedule);
        render::selection(&self.flow, &self.schedule).unwrap_or_else(|| "selected".to_string())
    }

    async fn confirm(&mut self) -> String {
        let submitting = match self.flow.begin_submit() {
            Ok(flow) => flow,
            Err(err) => return format!("error: {err}"),
        };
        self.flow = submitting;
        let Some((start, duration_minutes)) = self.flow.selection() else {
            return "error: nothing to submit".to_string();
        };

        if let Err(err) = self.schedule.validate_duration(duration_minutes) {
            self.flow = self.flow.complete(Err(err.to_string()));
            return render::selection(&self.flow, &self.schedule)
                .unwrap_or_else(|| format!("error: {err}"));
        }

        let Some(request) = BookSlotRequest::from_selection(start, duration_minutes, self.tz)
        else {
            let message = "Selected time does not exist in the configured timezone".to_string();
            self.flow = self.flow.complete(Err(message.clone()));
            return format!("error: {message}");
        };

        let result = self
            .api
            .book_slot(request)
            .await
            .map_err(|err| err.user_message());
        self.flow = self.flow.complete(result);

        match &self.flow {
            BookingFlow::Succeeded => {
                self.flow = BookingFlow::Idle;
                let mut out = String::from(
                    "Booking request submitted! Check your email for an approval notification.\n",
                );
                match self.fetch_week().await {
                    Ok(()) => out.push_str(&self.grid_text()),
                    Err(line) => out.push_str(&line),
                }
                out
            }
            _ => render::selection(&self.flow, &self.schedule)
                .unwrap_or_else(|| "error: submission failed".to_string()),
        }
    }
}
