// --- File: crates/lessongrid_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- Booking server ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the booking server, e.g. "http://localhost:5000".
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// --- Grid geometry ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GridConfig {
    /// First displayed hour of the day (24h clock).
    #[serde(default = "default_day_start_hour")]
    pub day_start_hour: u32,
    /// Hour the grid stops before (exclusive).
    #[serde(default = "default_day_end_hour")]
    pub day_end_hour: u32,
    /// Width of one grid row in minutes.
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u32,
    /// IANA timezone the grid's wall-clock is interpreted in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_day_start_hour() -> u32 {
    8
}

fn default_day_end_hour() -> u32 {
    20
}

fn default_interval_minutes() -> u32 {
    15
}

fn default_timezone() -> String {
    "Europe/Berlin".to_string()
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            day_start_hour: default_day_start_hour(),
            day_end_hour: default_day_end_hour(),
            interval_minutes: default_interval_minutes(),
            timezone: default_timezone(),
        }
    }
}

// --- Lesson pricing ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PricingConfig {
    /// Price in euros covering the first `min_duration_minutes`.
    #[serde(default = "default_base_price_eur")]
    pub base_price_eur: i64,
    /// Price in euros per additional full hour.
    #[serde(default = "default_price_per_hour_eur")]
    pub price_per_hour_eur: i64,
    #[serde(default = "default_min_duration_minutes")]
    pub min_duration_minutes: i64,
    #[serde(default = "default_max_duration_minutes")]
    pub max_duration_minutes: i64,
    /// Step the duration buttons move by.
    #[serde(default = "default_duration_step_minutes")]
    pub duration_step_minutes: i64,
}

fn default_base_price_eur() -> i64 {
    100
}

fn default_price_per_hour_eur() -> i64 {
    50
}

fn default_min_duration_minutes() -> i64 {
    120
}

fn default_max_duration_minutes() -> i64 {
    240
}

fn default_duration_step_minutes() -> i64 {
    60
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            base_price_eur: default_base_price_eur(),
            price_per_hour_eur: default_price_per_hour_eur(),
            min_duration_minutes: default_min_duration_minutes(),
            max_duration_minutes: default_max_duration_minutes(),
            duration_step_minutes: default_duration_step_minutes(),
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Seconds between past-slot sweeps while the grid is on screen.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

fn default_refresh_interval_secs() -> u64 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api: ApiConfig::default(),
            grid: GridConfig::default(),
            pricing: PricingConfig::default(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}
