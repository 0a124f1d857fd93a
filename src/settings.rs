//! Game settings and preferences
//!
//! Persisted in LocalStorage, separate from the high score board.

use serde::{Deserialize, Serialize};

use crate::platform::storage;
use crate::tuning::Tuning;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Number of background entities for this preset
    pub fn background_pool(&self) -> usize {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 5,
            QualityPreset::High => 8,
        }
    }

    /// Segments used to tessellate background discs
    pub fn disc_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 16,
            QualityPreset::High => 32,
        }
    }

    /// The next preset, wrapping around
    pub fn next(&self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Decorative background entities
    pub background: bool,
    /// Show FPS counter
    pub show_fps: bool,
    /// Reduced motion (no drifting background)
    pub reduced_motion: bool,
    /// High contrast palette
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            background: true,
            show_fps: false,
            reduced_motion: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "skyflap_settings";

    /// Effective background pool size (respects the toggle and reduced motion)
    pub fn background_pool(&self) -> usize {
        if !self.background || self.reduced_motion {
            0
        } else {
            self.quality.background_pool()
        }
    }

    /// Step to the next quality preset and return it
    pub fn cycle_quality(&mut self) -> QualityPreset {
        self.quality = self.quality.next();
        self.quality
    }

    /// Apply the presentation-dependent settings to a tuning
    pub fn apply_to(&self, tuning: &mut Tuning) {
        tuning.background_pool = self.background_pool();
    }

    /// Load settings from LocalStorage, falling back to defaults
    pub fn load() -> Self {
        match storage::load_json(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage
    pub fn save(&self) {
        if storage::save_json(Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_quality_wraps() {
        let mut settings = Settings::default();
        assert_eq!(settings.cycle_quality(), QualityPreset::High);
        assert_eq!(settings.quality.as_str(), "High");
        assert_eq!(settings.background_pool(), 8);
        assert_eq!(settings.cycle_quality(), QualityPreset::Low);
        assert_eq!(settings.background_pool(), 0);
        assert_eq!(settings.quality.disc_segments(), 8);
        assert_eq!(settings.cycle_quality(), QualityPreset::Medium);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_background_pool() {
        assert_eq!(Settings::default().background_pool(), 5);

        let hidden = Settings {
            background: false,
            ..Settings::default()
        };
        assert_eq!(hidden.background_pool(), 0);

        let reduced = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert_eq!(reduced.background_pool(), 0);

        let high = Settings {
            quality: QualityPreset::High,
            ..Settings::default()
        };
        let mut tuning = Tuning::default();
        high.apply_to(&mut tuning);
        assert_eq!(tuning.background_pool, 8);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "high_contrast": true }"#).unwrap();
        assert!(settings.high_contrast);
        assert!(settings.background);
        assert_eq!(settings.quality, QualityPreset::Medium);
    }

    #[test]
    fn test_native_load_is_default() {
        assert_eq!(Settings::load(), Settings::default());
    }
}
