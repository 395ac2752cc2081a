use embedded_graphics::pixelcolor::BinaryColor;
use serde::{Deserialize, Serialize};

/// Background drawn behind the dots
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundStyle {
    /// Background only while the user is touching the indicator
    #[default]
    Automatic,
    /// Background always shown
    Prominent,
    /// Never any background
    Minimal,
}

impl BackgroundStyle {
    #[must_use]
    pub fn shows_background(self, interacting: bool) -> bool {
        match self {
            Self::Automatic => interacting,
            Self::Prominent => true,
            Self::Minimal => false,
        }
    }
}

/// Dot colors for the current page and for every other page
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tints {
    pub current: BinaryColor,
    pub others: BinaryColor,
}

impl Tints {
    #[must_use]
    pub const fn new(current: BinaryColor, others: BinaryColor) -> Self {
        Self { current, others }
    }

    #[must_use]
    pub fn for_page(&self, selected: bool) -> BinaryColor {
        if selected { self.current } else { self.others }
    }
}

/// Per-indicator styling. Unset tints fall back to the rendering
/// backend's palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub background: BackgroundStyle,
    pub tints: Option<Tints>,
}

impl Style {
    #[must_use]
    pub fn with_background_style(mut self, background: BackgroundStyle) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_tints(mut self, current: BinaryColor, others: BinaryColor) -> Self {
        self.tints = Some(Tints::new(current, others));
        self
    }
}
