use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::context::Preferences;
use crate::display::DisplaySettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Fixed seed for message selection; random when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Upper bound for any scheduler timer, one day.
pub const MAX_TIMER_SECS: u64 = 24 * 60 * 60;

/// Timer periods, in seconds. Accessors clamp to `1..=MAX_TIMER_SECS`
/// (zero allowed for delays).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub tick_secs: u64,
    pub greeting_delay_secs: u64,
    pub optimize_interval_secs: u64,
    pub message_display_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            tick_secs: 30,
            greeting_delay_secs: 3,
            optimize_interval_secs: 300,
            message_display_secs: 8,
        }
    }
}

impl SchedulerConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_secs(self.tick_secs.clamp(1, MAX_TIMER_SECS))
    }

    pub fn greeting_delay(&self) -> Duration {
        Duration::from_secs(self.greeting_delay_secs.min(MAX_TIMER_SECS))
    }

    pub fn optimize_interval(&self) -> Duration {
        Duration::from_secs(self.optimize_interval_secs.clamp(1, MAX_TIMER_SECS))
    }

    pub fn message_display(&self) -> Duration {
        Duration::from_secs(self.message_display_secs.min(MAX_TIMER_SECS))
    }
}

impl Config {
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("piper")
        });

        std::fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        let config_path = data_dir.join("config.json");

        if config_path.exists() {
            let config_str =
                std::fs::read_to_string(&config_path).context("Failed to read config.json")?;

            if config_str.trim().is_empty() {
                warn!(path = %config_path.display(), "config file is empty, recreating defaults");
            } else {
                match serde_json::from_str::<Config>(&config_str) {
                    Ok(mut config) => {
                        config.data_dir = data_dir;
                        if config.display.sanitize() {
                            config.save()?;
                        }
                        return Ok(config);
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to parse config.json, recreating defaults");
                    }
                }
            }
        }

        let config = Self::default_config(data_dir);
        config.save()?;
        info!(path = %config_path.display(), "wrote default config");

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let json_str = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(self.config_file(), json_str).context("Failed to write config.json")?;
        Ok(())
    }

    fn default_config(data_dir: PathBuf) -> Self {
        Config {
            data_dir,
            preferences: Preferences::default(),
            display: DisplaySettings::default(),
            scheduler: SchedulerConfig::default(),
            seed: None,
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }

    pub fn identity_file(&self) -> PathBuf {
        self.data_dir.join("user.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BuddyFrequency;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_written() {
        let dir = TempDir::new().unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();

        assert!(config.config_file().exists());
        assert_eq!(config.scheduler, SchedulerConfig::default());
        assert_eq!(config.scheduler.tick(), Duration::from_secs(30));
        assert!(config.preferences.buddy_chat);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_saved_config_is_reloaded() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        config.preferences.buddy_frequency = BuddyFrequency::Low;
        config.scheduler.tick_secs = 5;
        config.seed = Some(99);
        config.display.brightness = 130;
        config.save().unwrap();

        let reloaded = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(reloaded.preferences.buddy_frequency, BuddyFrequency::Low);
        assert_eq!(reloaded.scheduler.tick_secs, 5);
        assert_eq!(reloaded.seed, Some(99));
        assert_eq!(reloaded.display.brightness, 130);
        assert_eq!(reloaded.data_dir, dir.path());
    }

    #[test]
    fn test_timer_values_are_bounded() {
        let timings = SchedulerConfig {
            tick_secs: 0,
            greeting_delay_secs: u64::MAX,
            optimize_interval_secs: u64::MAX,
            message_display_secs: u64::MAX,
        };
        let day = Duration::from_secs(MAX_TIMER_SECS);
        assert_eq!(timings.tick(), Duration::from_secs(1));
        assert_eq!(timings.greeting_delay(), day);
        assert_eq!(timings.optimize_interval(), day);
        assert_eq!(timings.message_display(), day);
    }

    #[test]
    fn test_partial_and_broken_configs_fall_back() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.json"), r#"{"seed": 3}"#).unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.scheduler, SchedulerConfig::default());

        std::fs::write(dir.path().join("config.json"), "not json").unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_out_of_range_display_is_reset_on_load() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.json"),
            r#"{"display":{"brightness":1000,"contrast":5,"font_size":300,"reduced_motion":true,"auto_optimize":true}}"#,
        )
        .unwrap();

        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.display.brightness, 100);
        assert_eq!(config.display.contrast, 100);
        assert_eq!(config.display.font_size, 100);
        assert!(config.display.reduced_motion);

        let saved = std::fs::read_to_string(config.config_file()).unwrap();
        assert!(!saved.contains("1000"));
    }
}
