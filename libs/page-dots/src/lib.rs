//! Page indicator ("dots") widget for embedded-graphics displays
//!
//! The indicator mirrors a host-owned page selection and drives it from tap
//! and drag gestures or a timed auto-advance. Pages can carry custom icons in
//! place of the default dots.

pub mod auto_advance;
pub mod config;
pub mod fonts;
pub mod gesture;
pub mod icons;
pub mod indicator;
pub mod layout;
pub mod render;
pub mod selection;
pub mod style;

// Re-export commonly used types
pub use auto_advance::{AutoAdvanceTimer, EndBehavior, TimerState};
pub use config::{ConfigError, IndicatorConfig};
pub use gesture::TouchEvent;
pub use icons::{GlyphIcon, Icon, IconMap, ImageIcon, NoIcon};
pub use indicator::PageIndicator;
pub use render::{DrawTargetBackend, Frame, NullBackend, Palette, RenderBackend};
pub use selection::{FnBinding, SelectionBinding, SelectionController, SharedSelection};
pub use style::{BackgroundStyle, Style, Tints};
