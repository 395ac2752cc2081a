//! Per-page custom icons
//!
//! Icons are resolved once, when the indicator is built. A page with no icon
//! for a given state is drawn with the default dot for that state.

use embedded_graphics::{
    Drawable,
    image::{Image, ImageDrawable},
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Point},
};
use std::collections::BTreeMap;
use std::fmt;
use u8g2_fonts::{
    Font, FontRenderer,
    types::{FontColor, HorizontalAlignment, VerticalPosition},
};

/// Something that can stand in for a dot
pub trait Icon {
    /// Draw the icon centered on `center`. `tint` is the color the dot
    /// would have had; icons may ignore it.
    fn draw_centered<D>(
        &self,
        center: Point,
        tint: BinaryColor,
        display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>;
}

/// Icon type of indicators built without icons
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoIcon {}

impl Icon for NoIcon {
    fn draw_centered<D>(
        &self,
        _center: Point,
        _tint: BinaryColor,
        _display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        match *self {}
    }
}

/// Image icon (e.g. a `tinybmp::Bmp` or an `ImageRaw`), drawn with its own
/// colors
#[derive(Clone, Copy, Debug)]
pub struct ImageIcon<T>(pub T);

impl<T> Icon for ImageIcon<T>
where
    T: ImageDrawable<Color = BinaryColor>,
{
    fn draw_centered<D>(
        &self,
        center: Point,
        _tint: BinaryColor,
        display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        Image::new(&self.0, center - self.0.size() / 2).draw(display)
    }
}

/// Single glyph from a u8g2 font, drawn in the dot's tint
pub struct GlyphIcon {
    font: FontRenderer,
    glyph: char,
}

impl GlyphIcon {
    #[must_use]
    pub fn new<F: Font>(glyph: char) -> Self {
        Self {
            font: FontRenderer::new::<F>(),
            glyph,
        }
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }
}

impl fmt::Debug for GlyphIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphIcon")
            .field("glyph", &self.glyph)
            .finish_non_exhaustive()
    }
}

impl Icon for GlyphIcon {
    fn draw_centered<D>(
        &self,
        center: Point,
        tint: BinaryColor,
        display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let mut buf = [0u8; 4];
        let text: &str = self.glyph.encode_utf8(&mut buf);

        match self.font.render_aligned(
            text,
            center,
            VerticalPosition::Center,
            HorizontalAlignment::Center,
            FontColor::Transparent(tint),
            display,
        ) {
            Ok(_) => Ok(()),
            Err(u8g2_fonts::Error::DisplayError(e)) => Err(e),
            Err(_) => {
                log::warn!("Icon glyph {:?} not drawable with this font", self.glyph);
                Ok(())
            }
        }
    }
}

/// What to draw for one page in one state
#[derive(Debug, PartialEq, Eq)]
pub enum Glyph<'a, I> {
    Icon(&'a I),
    /// Default dot, filled for the selected page and outlined otherwise
    Dot { filled: bool },
}

// Manual impls: a derive would require `I: Clone`
impl<I> Clone for Glyph<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Glyph<'_, I> {}

/// Icons for one page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconPair<I> {
    pub selected: Option<I>,
    pub unselected: Option<I>,
}

/// Page index to icon pair, immutable once built.
///
/// Only pages with at least one icon have an entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconMap<I> {
    pages: BTreeMap<usize, IconPair<I>>,
}

impl<I> Default for IconMap<I> {
    fn default() -> Self {
        Self {
            pages: BTreeMap::new(),
        }
    }
}

impl<I> IconMap<I> {
    /// Resolve icons for pages `0..total`.
    ///
    /// `icon_for(page, is_selected)` is called exactly twice per page,
    /// selected state first. It may yield any number of icons; only the
    /// first is kept.
    pub fn build<F, T>(total: usize, mut icon_for: F) -> Self
    where
        F: FnMut(usize, bool) -> T,
        T: IntoIterator<Item = I>,
    {
        let mut pages = BTreeMap::new();
        for page in 0..total {
            let selected = icon_for(page, true).into_iter().next();
            let unselected = icon_for(page, false).into_iter().next();
            if selected.is_some() || unselected.is_some() {
                pages.insert(
                    page,
                    IconPair {
                        selected,
                        unselected,
                    },
                );
            }
        }

        log::debug!("Resolved icons for {} of {total} pages", pages.len());
        Self { pages }
    }

    /// `true` when no page overrides the default dots
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, page: usize) -> Option<&IconPair<I>> {
        self.pages.get(&page)
    }

    pub fn glyph(&self, page: usize, selected: bool) -> Glyph<'_, I> {
        let icon = self.pages.get(&page).and_then(|pair| {
            if selected {
                pair.selected.as_ref()
            } else {
                pair.unselected.as_ref()
            }
        });

        match icon {
            Some(icon) => Glyph::Icon(icon),
            None => Glyph::Dot { filled: selected },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_icons_means_default_dots() {
        let map: IconMap<&str> = IconMap::build(3, |_, _| None);

        assert!(map.is_empty());
        for page in 0..3 {
            assert_eq!(map.glyph(page, true), Glyph::Dot { filled: true });
            assert_eq!(map.glyph(page, false), Glyph::Dot { filled: false });
        }
    }

    #[test]
    fn callback_runs_twice_per_page_selected_first() {
        let mut calls = Vec::new();
        let _map: IconMap<()> = IconMap::build(2, |page, selected| {
            calls.push((page, selected));
            None
        });

        assert_eq!(calls, [(0, true), (0, false), (1, true), (1, false)]);
    }

    #[test]
    fn only_first_icon_is_kept() {
        let map = IconMap::build(1, |_, selected| {
            if selected {
                vec!["star", "moon"]
            } else {
                vec![]
            }
        });

        assert_eq!(map.glyph(0, true), Glyph::Icon(&"star"));
        assert_eq!(map.glyph(0, false), Glyph::Dot { filled: false });
    }

    #[test]
    fn pages_without_icons_have_no_entry() {
        let map = IconMap::build(4, |page, _| (page == 2).then_some("flag"));

        assert!(map.get(0).is_none());
        assert_eq!(
            map.get(2),
            Some(&IconPair {
                selected: Some("flag"),
                unselected: Some("flag"),
            })
        );
        assert_eq!(map.glyph(3, true), Glyph::Dot { filled: true });
    }

    #[test]
    fn lookups_past_the_end_fall_back() {
        let map = IconMap::build(1, |_, _| Some(1u8));
        assert_eq!(map.glyph(5, true), Glyph::Dot { filled: true });
    }
}
