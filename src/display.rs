use std::fmt;
use std::ops::RangeInclusive;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const BRIGHTNESS_RANGE: RangeInclusive<u32> = 50..=150;
pub const CONTRAST_RANGE: RangeInclusive<u32> = 50..=150;
pub const FONT_SCALE_RANGE: RangeInclusive<u32> = 80..=120;

/// Animation duration forced while reduced motion is on.
pub const REDUCED_MOTION_DURATION: &str = "0.01s";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub brightness: u32,
    pub contrast: u32,
    pub font_size: u32,
    pub reduced_motion: bool,
    pub auto_optimize: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            brightness: 100,
            contrast: 100,
            font_size: 100,
            reduced_motion: false,
            auto_optimize: true,
        }
    }
}

/// Presentation values derived from `DisplaySettings`. The front-end decides
/// how to apply them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayStyle {
    pub filter: String,
    pub font_size: String,
    pub animation_duration: Option<String>,
}

impl fmt::Display for DisplayStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "filter: {}; font-size: {};", self.filter, self.font_size)?;
        if let Some(duration) = &self.animation_duration {
            write!(f, " --animation-duration: {};", duration)?;
        }
        Ok(())
    }
}

impl DisplaySettings {
    pub fn style(&self) -> DisplayStyle {
        DisplayStyle {
            filter: format!("brightness({}%) contrast({}%)", self.brightness, self.contrast),
            font_size: format!("{}%", self.font_size),
            animation_duration: self
                .reduced_motion
                .then(|| REDUCED_MOTION_DURATION.to_string()),
        }
    }

    /// Reset any level outside its range to the default. Returns true if
    /// something was reset.
    pub fn sanitize(&mut self) -> bool {
        let defaults = DisplaySettings::default();
        let mut reset = false;
        if !BRIGHTNESS_RANGE.contains(&self.brightness) {
            warn!(brightness = self.brightness, "stored brightness out of range, using default");
            self.brightness = defaults.brightness;
            reset = true;
        }
        if !CONTRAST_RANGE.contains(&self.contrast) {
            warn!(contrast = self.contrast, "stored contrast out of range, using default");
            self.contrast = defaults.contrast;
            reset = true;
        }
        if !FONT_SCALE_RANGE.contains(&self.font_size) {
            warn!(font_size = self.font_size, "stored font size out of range, using default");
            self.font_size = defaults.font_size;
            reset = true;
        }
        reset
    }

    /// Returns the confirmation text when the level was applied, `None` when
    /// it was out of range and ignored.
    pub fn set_brightness(&mut self, level: u32) -> Option<String> {
        if !BRIGHTNESS_RANGE.contains(&level) {
            debug!(level, "brightness out of range, ignored");
            return None;
        }
        self.brightness = level;
        info!(level, "brightness adjusted");
        Some(format!("Brightness adjusted to {}% for better visibility!", level))
    }

    pub fn set_contrast(&mut self, level: u32) -> Option<String> {
        if !CONTRAST_RANGE.contains(&level) {
            debug!(level, "contrast out of range, ignored");
            return None;
        }
        self.contrast = level;
        info!(level, "contrast adjusted");
        Some(format!("Contrast adjusted to {}% for optimal viewing!", level))
    }

    pub fn set_font_size(&mut self, level: u32) -> Option<String> {
        if !FONT_SCALE_RANGE.contains(&level) {
            debug!(level, "font size out of range, ignored");
            return None;
        }
        self.font_size = level;
        info!(level, "font size adjusted");
        Some(format!("Font size adjusted to {}% for better readability!", level))
    }

    pub fn toggle_reduced_motion(&mut self) -> String {
        self.reduced_motion = !self.reduced_motion;
        info!(reduced_motion = self.reduced_motion, "motion setting toggled");
        if self.reduced_motion {
            "Reduced motion enabled for accessibility!".to_string()
        } else {
            "Full animations restored!".to_string()
        }
    }

    /// Time-of-day and session-length adjustments. Returns every system
    /// message produced along the way, in order; empty when auto-optimize is
    /// off.
    pub fn auto_optimize(&mut self, hour: u32, session: Duration) -> Vec<String> {
        let mut notes = Vec::new();
        if !self.auto_optimize {
            return notes;
        }

        if hour >= 22 || hour <= 6 {
            notes.extend(self.set_brightness(80));
            notes.extend(self.set_contrast(90));
            notes.push("Night mode optimizations applied for comfortable viewing!".to_string());
        } else if (6..=10).contains(&hour) {
            notes.extend(self.set_brightness(110));
            notes.extend(self.set_contrast(105));
            notes.push("Morning brightness boost applied!".to_string());
        }

        if session > Duration::hours(1) {
            notes.extend(self.set_brightness(90));
            notes.push("Extended session detected - reducing eye strain!".to_string());
        }

        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_values_are_ignored() {
        let mut settings = DisplaySettings::default();
        assert!(settings.set_brightness(120).is_some());
        assert!(settings.set_brightness(40).is_none());
        assert!(settings.set_brightness(151).is_none());
        assert_eq!(settings.brightness, 120);

        assert!(settings.set_contrast(49).is_none());
        assert_eq!(settings.contrast, 100);

        assert!(settings.set_font_size(79).is_none());
        assert!(settings.set_font_size(121).is_none());
        assert_eq!(settings.font_size, 100);
    }

    #[test]
    fn test_range_edges_are_accepted() {
        let mut settings = DisplaySettings::default();
        assert!(settings.set_brightness(50).is_some());
        assert!(settings.set_contrast(150).is_some());
        assert!(settings.set_font_size(80).is_some());
        assert!(settings.set_font_size(120).is_some());
        assert_eq!(settings.style().filter, "brightness(50%) contrast(150%)");
        assert_eq!(settings.style().font_size, "120%");
    }

    #[test]
    fn test_sanitize_resets_only_bad_levels() {
        let mut settings = DisplaySettings {
            brightness: 1000,
            contrast: 5,
            font_size: 110,
            reduced_motion: true,
            auto_optimize: false,
        };
        assert!(settings.sanitize());
        assert_eq!(settings.brightness, 100);
        assert_eq!(settings.contrast, 100);
        assert_eq!(settings.font_size, 110);
        assert!(settings.reduced_motion);
        assert!(!settings.sanitize());
    }

    #[test]
    fn test_reduced_motion_toggles_override() {
        let mut settings = DisplaySettings::default();
        assert_eq!(settings.style().animation_duration, None);

        let note = settings.toggle_reduced_motion();
        assert_eq!(note, "Reduced motion enabled for accessibility!");
        assert_eq!(settings.style().animation_duration.as_deref(), Some("0.01s"));

        let note = settings.toggle_reduced_motion();
        assert_eq!(note, "Full animations restored!");
        assert_eq!(settings.style().animation_duration, None);
    }

    #[test]
    fn test_auto_optimize_night() {
        let mut settings = DisplaySettings::default();
        let notes = settings.auto_optimize(23, Duration::minutes(10));
        assert_eq!(settings.brightness, 80);
        assert_eq!(settings.contrast, 90);
        assert_eq!(notes.len(), 3);
        assert_eq!(notes[2], "Night mode optimizations applied for comfortable viewing!");
    }

    #[test]
    fn test_auto_optimize_six_am_counts_as_night() {
        let mut settings = DisplaySettings::default();
        settings.auto_optimize(6, Duration::zero());
        assert_eq!(settings.brightness, 80);
    }

    #[test]
    fn test_auto_optimize_morning_then_long_session() {
        let mut settings = DisplaySettings::default();
        let notes = settings.auto_optimize(9, Duration::minutes(61));
        assert_eq!(settings.brightness, 90);
        assert_eq!(settings.contrast, 105);
        assert_eq!(
            notes.last().map(String::as_str),
            Some("Extended session detected - reducing eye strain!")
        );
    }

    #[test]
    fn test_auto_optimize_afternoon_short_session_is_noop() {
        let mut settings = DisplaySettings::default();
        assert!(settings.auto_optimize(14, Duration::minutes(5)).is_empty());
        assert_eq!(settings, DisplaySettings::default());
    }

    #[test]
    fn test_auto_optimize_disabled() {
        let mut settings = DisplaySettings {
            auto_optimize: false,
            ..DisplaySettings::default()
        };
        assert!(settings.auto_optimize(23, Duration::hours(3)).is_empty());
        assert_eq!(settings.brightness, 100);
    }
}
