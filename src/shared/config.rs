//! Application configuration. Generator seed, history length, delays, paths.

use crate::domain::DomainError;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_HISTORY_DAYS: u32 = 90;
pub const DEFAULT_TYPING_DELAY_MS: u64 = 900;
pub const DEFAULT_EFFECT_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// PRNG seed for the synthetic dataset. Read from CONTENT_PULSE_SEED.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Days of daily history to generate. Read from CONTENT_PULSE_HISTORY_DAYS.
    #[serde(default)]
    pub history_days: Option<u32>,

    /// Last generated day, `YYYY-MM-DD`. Defaults to today. Read from CONTENT_PULSE_ANCHOR_DATE.
    #[serde(default)]
    pub anchor_date: Option<String>,

    /// Simulated assistant typing delay. Read from CONTENT_PULSE_TYPING_DELAY_MS.
    #[serde(default)]
    pub typing_delay_ms: Option<u64>,

    /// Delay between a reply and its side effects. Read from CONTENT_PULSE_EFFECT_DELAY_MS.
    #[serde(default)]
    pub effect_delay_ms: Option<u64>,

    pub data_dir: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("CONTENT_PULSE_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("CONTENT_PULSE").try_parsing(true));
        c.build()?.try_deserialize()
    }

    pub fn seed_or_default(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// At least one day.
    pub fn history_days_or_default(&self) -> u32 {
        self.history_days.unwrap_or(DEFAULT_HISTORY_DAYS).max(1)
    }

    /// Configured anchor date, or `today` when unset.
    pub fn anchor_date_or(&self, today: NaiveDate) -> Result<NaiveDate, DomainError> {
        match self.anchor_date.as_deref().map(str::trim) {
            None | Some("") => Ok(today),
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| DomainError::InvalidDate(s.to_string())),
        }
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms.unwrap_or(DEFAULT_TYPING_DELAY_MS))
    }

    pub fn effect_delay(&self) -> Duration {
        Duration::from_millis(self.effect_delay_ms.unwrap_or(DEFAULT_EFFECT_DELAY_MS))
    }

    pub fn data_dir_or_default(&self) -> &str {
        self.data_dir.as_deref().unwrap_or("./data")
    }
}
