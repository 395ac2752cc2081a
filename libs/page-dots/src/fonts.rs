// Font definitions for page indicator icons and captions

// Proportional font for captions drawn next to the indicator
pub use u8g2_fonts::fonts::u8g2_font_helvR10_tf as FONT_CAPTION;

// Iconic fonts usable as per-page glyph icons
// Streamline fonts start at '0' (0x30):
// '0' (0x30 / 48) = double key icon
// '1' (0x31 / 49) = single key icon
pub use u8g2_fonts::fonts::u8g2_font_streamline_interface_essential_key_lock_t as ICON_KEY;

// Warning triangle icons, first glyph at '0' (0x30)
pub use u8g2_fonts::fonts::u8g2_font_streamline_interface_essential_circle_triangle_t as ICON_WARNING;
