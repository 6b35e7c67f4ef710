// --- File: crates/lessongrid_config/src/lib.rs ---

pub mod models;

pub use models::{ApiConfig, AppConfig, GridConfig, PricingConfig};

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use tracing::debug;

static DOTENV: OnceCell<()> = OnceCell::new();

/// Load `.env` exactly once, before any config or env lookup.
pub fn ensure_dotenv_loaded() {
    DOTENV.get_or_init(|| {
        dotenv::dotenv().ok();
    });
}

/// Loads the application configuration.
///
/// Sources, later ones winning: built-in serde defaults, an optional config
/// file (`LESSONGRID_CONFIG` path override, otherwise `lessongrid.toml` in
/// the working directory), then `LESSONGRID__*` environment variables with
/// `__` as the section separator (e.g. `LESSONGRID__API__BASE_URL`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let config_file =
        std::env::var("LESSONGRID_CONFIG").unwrap_or_else(|_| "lessongrid".to_string());

    let config: AppConfig = Config::builder()
        .add_source(File::with_name(&config_file).required(false))
        .add_source(
            Environment::with_prefix("LESSONGRID")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;

    validate(&config)?;
    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

/// Rejects configurations the grid and pricing math cannot honor.
fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let grid = &config.grid;
    if grid.day_start_hour >= grid.day_end_hour || grid.day_end_hour > 24 {
        return Err(ConfigError::Message(format!(
            "grid hours out of order: start {} end {}",
            grid.day_start_hour, grid.day_end_hour
        )));
    }
    if grid.interval_minutes == 0 {
        return Err(ConfigError::Message(
            "grid.interval_minutes must be positive".to_string(),
        ));
    }
    grid.timezone()?;

    let pricing = &config.pricing;
    if pricing.min_duration_minutes <= 0
        || pricing.min_duration_minutes > pricing.max_duration_minutes
    {
        return Err(ConfigError::Message(format!(
            "pricing duration bounds out of order: min {} max {}",
            pricing.min_duration_minutes, pricing.max_duration_minutes
        )));
    }
    if pricing.duration_step_minutes <= 0 {
        return Err(ConfigError::Message(
            "pricing.duration_step_minutes must be positive".to_string(),
        ));
    }
    Ok(())
}

impl GridConfig {
    /// Parses the configured IANA timezone name.
    pub fn timezone(&self) -> Result<chrono_tz::Tz, ConfigError> {
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|err| ConfigError::Message(format!("invalid grid.timezone: {err}")))
    }
}
