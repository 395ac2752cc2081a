//! Render description and backends
//!
//! `Frame` is a plain description of what the indicator looks like right
//! now. Backends turn it into pixels (or nothing).

use crate::icons::{Glyph, Icon};
use crate::layout::DOT_DIAMETER;
use crate::style::Tints;
use core::convert::Infallible;
use embedded_graphics::{
    Drawable,
    draw_target::DrawTargetExt,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, Primitive, Size},
    primitives::{Circle, PrimitiveStyle, Rectangle, RoundedRectangle},
};

/// Corner radius of the background pill
const BACKGROUND_CORNER_RADIUS: u32 = 8;

/// One page's dot or icon
#[derive(Debug)]
pub struct DotFrame<'a, I> {
    pub page: usize,
    pub bounds: Rectangle,
    pub selected: bool,
    pub glyph: Glyph<'a, I>,
}

/// Everything needed to draw the indicator once
#[derive(Debug)]
pub struct Frame<'a, I> {
    pub bounds: Rectangle,
    /// Background area, present when the style shows it right now
    pub background: Option<Rectangle>,
    /// Tint overrides; `None` uses the backend palette
    pub tints: Option<Tints>,
    /// Empty when the indicator has no pages
    pub dots: Vec<DotFrame<'a, I>>,
}

impl<I> Frame<'_, I> {
    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    pub fn selected_page(&self) -> Option<usize> {
        self.dots.iter().find(|dot| dot.selected).map(|dot| dot.page)
    }
}

/// Default colors of a rendering backend
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: BinaryColor,
    /// Dot tints over the bare display
    pub tints: Tints,
    /// Dot tints over the background pill
    pub tints_on_background: Tints,
}

impl Palette {
    /// Black ink on a white panel, the way the e-paper pages are drawn
    pub const EPAPER: Self = Self {
        background: BinaryColor::Off,
        tints: Tints::new(BinaryColor::Off, BinaryColor::Off),
        tints_on_background: Tints::new(BinaryColor::On, BinaryColor::On),
    };

    /// Tints for a frame, honoring overrides
    #[must_use]
    pub fn resolve<I>(&self, frame: &Frame<'_, I>) -> Tints {
        frame.tints.unwrap_or(if frame.background.is_some() {
            self.tints_on_background
        } else {
            self.tints
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::EPAPER
    }
}

/// Turns a frame into whatever the platform displays
pub trait RenderBackend<I> {
    type Output;
    type Error;

    fn render(&mut self, frame: &Frame<'_, I>) -> Result<Self::Output, Self::Error>;
}

/// Backend for hosts with nothing to draw on
#[derive(Clone, Copy, Debug, Default)]
pub struct NullBackend;

impl<I> RenderBackend<I> for NullBackend {
    type Output = ();
    type Error = Infallible;

    fn render(&mut self, _frame: &Frame<'_, I>) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Draws frames onto any binary `DrawTarget`
#[derive(Debug)]
pub struct DrawTargetBackend<'d, D> {
    display: &'d mut D,
    palette: Palette,
}

impl<'d, D> DrawTargetBackend<'d, D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    pub fn new(display: &'d mut D) -> Self {
        Self::with_palette(display, Palette::default())
    }

    pub fn with_palette(display: &'d mut D, palette: Palette) -> Self {
        Self { display, palette }
    }
}

impl<I, D> RenderBackend<I> for DrawTargetBackend<'_, D>
where
    I: Icon,
    D: DrawTarget<Color = BinaryColor>,
{
    type Output = ();
    type Error = D::Error;

    fn render(&mut self, frame: &Frame<'_, I>) -> Result<(), D::Error> {
        if frame.is_empty() {
            return Ok(());
        }

        let palette = self.palette;
        // icons may be larger than a dot cell; nothing leaves the bounds
        let display = &mut self.display.clipped(&frame.bounds);

        if let Some(area) = frame.background {
            RoundedRectangle::with_equal_corners(
                area,
                Size::new(BACKGROUND_CORNER_RADIUS, BACKGROUND_CORNER_RADIUS),
            )
            .into_styled(PrimitiveStyle::with_fill(palette.background))
            .draw(display)?;
        }

        let tints = palette.resolve(frame);
        for dot in &frame.dots {
            let tint = tints.for_page(dot.selected);
            match dot.glyph {
                Glyph::Icon(icon) => icon.draw_centered(dot.bounds.center(), tint, display)?,
                Glyph::Dot { filled } => {
                    let style = if filled {
                        PrimitiveStyle::with_fill(tint)
                    } else {
                        PrimitiveStyle::with_stroke(tint, 1)
                    };
                    Circle::new(dot.bounds.top_left, DOT_DIAMETER)
                        .into_styled(style)
                        .draw(display)?;
                }
            }
        }

        Ok(())
    }
}
