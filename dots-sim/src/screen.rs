use crate::framebuffer::Framebuffer;
use embedded_graphics::{
    Drawable,
    geometry::Dimensions,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, Point, Size},
};
use embedded_layout::prelude::*;
use page_dots::layout::{self, DotLayout};
use page_dots::{Icon, PageIndicator, SelectionBinding, fonts};
use std::convert::Infallible;
use u8g2_fonts::{
    FontRenderer,
    types::{FontColor, HorizontalAlignment, VerticalPosition},
};

/// Space above the indicator for the caption
const CAPTION_HEIGHT: u32 = 16;
const MARGIN: u32 = 6;
const MIN_WIDTH: u32 = 96;

/// Display big enough for the caption and an indicator of `total` pages
pub fn display_size(total: usize) -> Size {
    let natural = layout::natural_size(total);
    Size::new(
        natural.width.saturating_add(2 * MARGIN).max(MIN_WIDTH),
        natural.height.saturating_add(CAPTION_HEIGHT + 2 * MARGIN),
    )
}

/// Center the indicator horizontally, one margin above the bottom edge
pub fn place<B, I>(indicator: PageIndicator<B, I>, display: &Framebuffer) -> PageIndicator<B, I> {
    indicator
        .align_to(&display.bounding_box(), horizontal::Center, vertical::Bottom)
        .translate(Point::new(0, -MARGIN.cast_signed()))
}

/// Center of a page's dot in display coordinates
pub fn dot_center<B, I>(indicator: &PageIndicator<B, I>, page: usize) -> Option<Point>
where
    B: SelectionBinding,
{
    (page < indicator.total()).then(|| {
        DotLayout::new(indicator.bounds(), indicator.total())
            .dot_bounds(page)
            .center()
    })
}

fn caption<B: SelectionBinding, I>(indicator: &PageIndicator<B, I>) -> String {
    match indicator.total() {
        0 => "No pages".to_string(),
        total => format!("Page {} of {total}", indicator.selection() + 1),
    }
}

pub fn draw<B, I>(display: &mut Framebuffer, indicator: &PageIndicator<B, I>) -> Result<(), Infallible>
where
    B: SelectionBinding,
    I: Icon,
{
    display.clear(BinaryColor::On)?;

    let font = FontRenderer::new::<fonts::FONT_CAPTION>();
    let center_x = display.bounding_box().center().x;
    let baseline = (MARGIN + CAPTION_HEIGHT).cast_signed() - 4;
    match font.render_aligned(
        caption(indicator).as_str(),
        Point::new(center_x, baseline),
        VerticalPosition::Baseline,
        HorizontalAlignment::Center,
        FontColor::Transparent(BinaryColor::Off),
        display,
    ) {
        Ok(_) => {}
        Err(u8g2_fonts::Error::DisplayError(e)) => return Err(e),
        Err(_) => log::warn!("Caption could not be rendered"),
    }

    indicator.draw(display)
}
