//! Dot geometry inside the indicator bounds
//!
//! Dots sit on a single row, centered in the bounds. Each page owns a cell
//! one `PAGE_WIDTH` wide around its dot; hit testing and drag distances both
//! use that pitch.

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::{ContainsPoint, Rectangle},
};

/// Diameter of a default dot
pub const DOT_DIAMETER: u32 = 8;
/// Gap between neighbouring dots
pub const DOT_SPACING: u32 = 8;
/// Horizontal distance per page, for both hit testing and dragging
pub const PAGE_WIDTH: i32 = (DOT_DIAMETER + DOT_SPACING).cast_signed();
/// Padding between the dots and the background edge
pub const BACKGROUND_PADDING: u32 = 4;

/// Size of an indicator that exactly fits `total` dots plus background
#[must_use]
pub fn natural_size(total: usize) -> Size {
    let row = row_width(total);
    Size::new(
        row.saturating_add(2 * BACKGROUND_PADDING),
        DOT_DIAMETER + 2 * BACKGROUND_PADDING,
    )
}

fn row_width(total: usize) -> u32 {
    let total = u32::try_from(total).unwrap_or(u32::MAX);
    if total == 0 {
        return 0;
    }
    total
        .saturating_mul(DOT_DIAMETER + DOT_SPACING)
        .saturating_sub(DOT_SPACING)
}

fn page_to_i32(page: usize) -> i32 {
    i32::try_from(page).unwrap_or(i32::MAX)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DotLayout {
    bounds: Rectangle,
    total: usize,
}

impl DotLayout {
    #[must_use]
    pub fn new(bounds: Rectangle, total: usize) -> Self {
        Self { bounds, total }
    }

    /// Top-left corner of the first dot
    fn origin(&self) -> Point {
        let Size { width, height } = self.bounds.size;
        let row = row_width(self.total).cast_signed();
        self.bounds.top_left
            + Point::new(
                (width.cast_signed() - row) / 2,
                (height.cast_signed() - DOT_DIAMETER.cast_signed()) / 2,
            )
    }

    #[must_use]
    pub fn dot_bounds(&self, page: usize) -> Rectangle {
        let x = page_to_i32(page).saturating_mul(PAGE_WIDTH);
        Rectangle::new(
            self.origin() + Point::new(x, 0),
            Size::new(DOT_DIAMETER, DOT_DIAMETER),
        )
    }

    /// Smallest rectangle enclosing every dot
    #[must_use]
    pub fn row_bounds(&self) -> Rectangle {
        Rectangle::new(
            self.origin(),
            Size::new(row_width(self.total), DOT_DIAMETER),
        )
    }

    #[must_use]
    pub fn background_bounds(&self) -> Rectangle {
        let padding = BACKGROUND_PADDING.cast_signed();
        let row = self.row_bounds();
        Rectangle::new(
            row.top_left - Point::new(padding, padding),
            row.size + Size::new(2 * BACKGROUND_PADDING, 2 * BACKGROUND_PADDING),
        )
    }

    /// Page whose cell contains `point`, if the point is inside the bounds.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        if self.total == 0 || !self.bounds.contains(point) {
            return None;
        }

        let half_gap = (DOT_SPACING / 2).cast_signed();
        let offset = point.x - self.origin().x + half_gap;
        if offset < 0 {
            return None;
        }

        let page = usize::try_from(offset / PAGE_WIDTH).ok()?;
        (page < self.total).then_some(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(total: usize) -> DotLayout {
        DotLayout::new(
            Rectangle::new(Point::zero(), natural_size(total)),
            total,
        )
    }

    #[test]
    fn natural_size_fits_row_and_padding() {
        // 3 dots: 3 * 8 + 2 * 8 = 40, plus 2 * 4 padding
        assert_eq!(natural_size(3), Size::new(48, 16));
        assert_eq!(natural_size(0), Size::new(8, 16));
    }

    #[test]
    fn dots_are_one_page_width_apart() {
        let layout = layout(3);
        assert_eq!(layout.dot_bounds(0).top_left, Point::new(4, 4));
        assert_eq!(layout.dot_bounds(1).top_left, Point::new(20, 4));
        assert_eq!(layout.dot_bounds(2).top_left, Point::new(36, 4));
    }

    #[test]
    fn background_wraps_row_with_padding() {
        let layout = layout(3);
        assert_eq!(
            layout.background_bounds(),
            Rectangle::new(Point::zero(), Size::new(48, 16))
        );
    }

    #[test]
    fn hit_test_picks_nearest_cell() {
        let layout = layout(3);
        assert_eq!(layout.hit_test(layout.dot_bounds(0).center()), Some(0));
        assert_eq!(layout.hit_test(layout.dot_bounds(2).center()), Some(2));
        // halfway into the gap after dot 0 belongs to dot 1
        assert_eq!(layout.hit_test(Point::new(16, 8)), Some(1));
        assert_eq!(layout.hit_test(Point::new(15, 8)), Some(0));
    }

    #[test]
    fn hit_test_outside_bounds_misses() {
        let layout = layout(3);
        assert_eq!(layout.hit_test(Point::new(-1, 8)), None);
        assert_eq!(layout.hit_test(Point::new(10, 40)), None);
    }

    #[test]
    fn hit_test_with_no_pages_misses() {
        let layout = layout(0);
        assert_eq!(layout.hit_test(Point::new(4, 8)), None);
    }

    #[test]
    fn row_is_centered_in_wide_bounds() {
        let layout = DotLayout::new(Rectangle::new(Point::zero(), Size::new(100, 20)), 2);
        // row of 24px leaves 38px on each side
        assert_eq!(layout.row_bounds().top_left, Point::new(38, 6));
    }
}
