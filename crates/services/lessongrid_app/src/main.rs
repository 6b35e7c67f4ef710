// --- File: crates/services/lessongrid_app/src/main.rs ---
//! Lessongrid terminal front end.
//!
//! One logical thread: user commands from stdin and network completions
//! interleave on the tokio runtime, plus a fixed-interval tick that sweeps
//! newly-past slots while the grid is on screen.

mod app;
#[cfg(test)]
mod app_test;
mod render;

use app::{App, Outcome};
use lessongrid_api::HttpBookingApi;
use lessongrid_common::logging;
use lessongrid_config::load_config;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::info;

#[tokio::main]
async fn main() {
    let config = Arc::new(load_config().expect("Failed to load config"));
    logging::init();
    info!(base_url = %config.api.base_url, "starting lessongrid");

    let api = Arc::new(
        HttpBookingApi::from_config(&config.api).expect("Failed to create booking API client"),
    );
    let mut app = App::new(config.clone(), api).expect("Failed to initialize app");

    match app.handle_line("week").await {
        Outcome::Continue(text) => println!("{text}"),
        Outcome::Quit => return,
    }
    println!("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tick = tokio::time::interval(Duration::from_secs(app.refresh_interval_secs()));
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tick.tick().await; // the first tick completes immediately

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => match app.handle_line(line.trim()).await {
                        Outcome::Continue(text) => println!("{text}"),
                        Outcome::Quit => break,
                    },
                    Ok(None) => break, // stdin closed
                    Err(err) => {
                        eprintln!("stdin error: {err}");
                        break;
                    }
                }
            }
            _ = tick.tick() => {
                // Same sweep the browser ran once a minute: past flags move,
                // nothing is fetched.
                app.sweep_past_slots();
            }
        }
    }
    info!("bye");
}
