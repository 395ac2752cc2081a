use embedded_graphics::{
    geometry::Dimensions,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Pixel, PointsIter, Size},
    primitives::Rectangle,
};
use std::convert::Infallible;

pub trait AsFillByte {
    fn as_byte(&self) -> u8;
}

impl AsFillByte for BinaryColor {
    fn as_byte(&self) -> u8 {
        if self.is_on() { 0xFF } else { 0x00 }
    }
}

/// 1-bit packed framebuffer, laid out like the e-paper panel's RAM
/// (MSB first, rows padded to whole bytes).
pub struct Framebuffer {
    buffer: Box<[u8]>,
    width: u32,
    height: u32,
}

impl Framebuffer {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width.div_ceil(8) * height) as usize;
        Self {
            buffer: vec![BinaryColor::On.as_byte(); size].into_boxed_slice(),
            width,
            height,
        }
    }

    fn row_pitch_bytes(&self) -> u32 {
        self.width.div_ceil(8)
    }

    fn locate(&self, x: u32, y: u32) -> (usize, u8) {
        let index = (y * self.row_pitch_bytes() + x / 8) as usize;
        let bit = 7 - (x % 8);
        (index, 1 << bit)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let (index, mask) = self.locate(x, y);
        Some(BinaryColor::from(self.buffer[index] & mask != 0))
    }

    /// Render as text, `#` for ink (Off) and `.` for paper (On)
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let ink = self.pixel(x, y).is_some_and(BinaryColor::is_off);
                out.push(if ink { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(coord.x), u32::try_from(coord.y)) else {
                continue;
            };
            if x >= self.width || y >= self.height {
                continue;
            }

            let (index, mask) = self.locate(x, y);
            if color.is_on() {
                self.buffer[index] |= mask;
            } else {
                self.buffer[index] &= !mask;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped_area = area.intersection(&self.bounding_box());

        if clipped_area.is_zero_sized() {
            return Ok(());
        }

        self.draw_iter(clipped_area.points().map(|p| Pixel(p, color)))
    }

    fn clear(&mut self, color: BinaryColor) -> Result<(), Self::Error> {
        self.buffer.fill(color.as_byte());
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
