// Indicator configuration loaded from JSON
//
// Every field is optional. Invalid auto-advance values (zero, negative, not
// finite) turn auto-advance off instead of failing the load.

use crate::auto_advance::{AutoAdvanceTimer, EndBehavior};
use crate::style::{BackgroundStyle, Style, Tints};
use embedded_graphics::pixelcolor::BinaryColor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ink color on a binary panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ink {
    Black,
    White,
}

impl From<Ink> for BinaryColor {
    fn from(ink: Ink) -> Self {
        // e-paper pages are cleared to On (white) and drawn in Off (black)
        match ink {
            Ink::Black => BinaryColor::Off,
            Ink::White => BinaryColor::On,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TintConfig {
    pub current: Ink,
    pub others: Ink,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorConfig {
    pub background: BackgroundStyle,
    pub tints: Option<TintConfig>,
    /// Seconds between automatic page advances
    pub auto_advance_secs: Option<f64>,
    pub end_behavior: EndBehavior,
}

impl IndicatorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&contents)?;
        log::debug!("Loaded indicator config from {}", path.display());
        Ok(config)
    }

    /// Auto-advance interval, `None` when disabled or invalid
    pub fn auto_advance(&self) -> Option<Duration> {
        self.auto_advance_secs
            .and_then(AutoAdvanceTimer::interval_from_secs)
    }

    pub fn tints(&self) -> Option<Tints> {
        self.tints
            .map(|tints| Tints::new(tints.current.into(), tints.others.into()))
    }

    pub fn style(&self) -> Style {
        Style {
            background: self.background,
            tints: self.tints(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = IndicatorConfig::from_json("{}").unwrap();
        assert_eq!(config, IndicatorConfig::default());
        assert_eq!(config.style(), Style::default());
        assert_eq!(config.auto_advance(), None);
    }

    #[test]
    fn full_config_parses() {
        let config = IndicatorConfig::from_json(
            r#"{
                "background": "prominent",
                "tints": { "current": "white", "others": "black" },
                "auto_advance_secs": 2.5,
                "end_behavior": "stop"
            }"#,
        )
        .unwrap();

        assert_eq!(config.background, BackgroundStyle::Prominent);
        assert_eq!(
            config.tints(),
            Some(Tints::new(BinaryColor::On, BinaryColor::Off))
        );
        assert_eq!(config.auto_advance(), Some(Duration::from_millis(2500)));
        assert_eq!(config.end_behavior, EndBehavior::Stop);
    }

    #[test]
    fn non_positive_interval_disables_silently() {
        let config = IndicatorConfig::from_json(r#"{ "auto_advance_secs": -1 }"#).unwrap();
        assert_eq!(config.auto_advance(), None);

        let config = IndicatorConfig::from_json(r#"{ "auto_advance_secs": 0 }"#).unwrap();
        assert_eq!(config.auto_advance(), None);
    }

    #[test]
    fn unknown_background_is_rejected() {
        let err = IndicatorConfig::from_json(r#"{ "background": "loud" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(IndicatorConfig::from_json(r#"{ "colour": "red" }"#).is_err());
    }
}
