//! RAM framebuffer with per-pixel change detection.
//!
//! Painting can target this buffer instead of a slow SPI panel. After a
//! paint pass only the rectangular region containing changed pixels is
//! flushed to the real display in a single `fill_contiguous` call. It also
//! doubles as a headless display for tests.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

/// Bounding box of pixels that have changed since the last flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DirtyRect {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyRect {
    /// Expand the dirty region to include the given pixel coordinate.
    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn to_rectangle(self) -> Rectangle {
        Rectangle::new(
            Point::new(self.min_x as i32, self.min_y as i32),
            Size::new(
                (self.max_x - self.min_x + 1) as u32,
                (self.max_y - self.min_y + 1) as u32,
            ),
        )
    }
}

/// Heap-allocated `DrawTarget<Color = Rgb565>` of any size.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb565>,
    dirty: Option<DirtyRect>,
}

impl FrameBuffer {
    /// Allocate a new framebuffer filled with black pixels.
    pub fn new(size: Size) -> Self {
        let width = size.width as usize;
        let height = size.height as usize;
        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK; width * height],
            dirty: None,
        }
    }

    /// Reallocate to `size`, discarding the contents.
    pub fn resize(&mut self, size: Size) {
        *self = Self::new(size);
    }

    /// Read back a pixel; `None` outside the buffer.
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as usize, point.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Bounding box of the pixels changed since the last flush.
    pub fn dirty_area(&self) -> Option<Rectangle> {
        self.dirty.map(DirtyRect::to_rectangle)
    }

    /// Write a single pixel, expanding the dirty rect only if the color changed.
    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        let idx = y * self.width + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.dirty {
                Some(rect) => rect.expand(x, y),
                None => self.dirty = Some(DirtyRect::from_point(x, y)),
            }
        }
    }

    /// Flush the dirty region to a hardware display, then reset the dirty state.
    ///
    /// If nothing changed, this is a no-op.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(rect) = self.dirty.take() else {
            return Ok(());
        };

        let area = rect.to_rectangle();
        debug!(
            "Flushing {}x{} dirty region at ({}, {})",
            area.size.width, area.size.height, rect.min_x, rect.min_y
        );

        let pixels = &self.pixels;
        let stride = self.width;
        let width = area.size.width as usize;
        let pixel_iter = (rect.min_y..=rect.max_y).flat_map(move |y| {
            let row_start = y * stride + rect.min_x;
            pixels[row_start..row_start + width].iter().copied()
        });

        display.fill_contiguous(&area, pixel_iter)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0
                && coord.y >= 0
                && (coord.x as usize) < self.width
                && (coord.y as usize) < self.height
            {
                self.set_pixel(coord.x as usize, coord.y as usize, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        for y in area.top_left.y..=bottom_right.y {
            for x in area.top_left.x..=bottom_right.x {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        for y in 0..self.height {
            for x in 0..self.width {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::Drawable;

    #[test]
    fn test_dirty_area_tracks_changes_only() {
        let mut fb = FrameBuffer::new(Size::new(20, 10));
        assert_eq!(fb.dirty_area(), None);

        // Writing the existing color is not a change
        fb.fill_solid(&Rectangle::new(Point::zero(), Size::new(5, 5)), Rgb565::BLACK)
            .unwrap();
        assert_eq!(fb.dirty_area(), None);

        fb.fill_solid(&Rectangle::new(Point::new(2, 3), Size::new(4, 2)), Rgb565::RED)
            .unwrap();
        Pixel(Point::new(10, 1), Rgb565::GREEN).draw(&mut fb).unwrap();
        assert_eq!(
            fb.dirty_area(),
            Some(Rectangle::new(Point::new(2, 1), Size::new(9, 4)))
        );
        assert_eq!(fb.pixel(Point::new(3, 4)), Some(Rgb565::RED));
        assert_eq!(fb.pixel(Point::new(30, 4)), None);
    }

    #[test]
    fn test_fill_solid_is_clipped_to_buffer() {
        let mut fb = FrameBuffer::new(Size::new(4, 4));
        fb.fill_solid(&Rectangle::new(Point::new(-2, 2), Size::new(10, 10)), Rgb565::BLUE)
            .unwrap();
        assert_eq!(fb.pixel(Point::new(0, 2)), Some(Rgb565::BLUE));
        assert_eq!(fb.pixel(Point::new(3, 3)), Some(Rgb565::BLUE));
        assert_eq!(fb.pixel(Point::new(0, 1)), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_flush_copies_dirty_region() {
        let mut fb = FrameBuffer::new(Size::new(8, 8));
        let mut display = FrameBuffer::new(Size::new(8, 8));
        fb.fill_solid(&Rectangle::new(Point::new(1, 1), Size::new(2, 2)), Rgb565::WHITE)
            .unwrap();
        fb.flush(&mut display).unwrap();
        assert_eq!(fb.dirty_area(), None);
        assert_eq!(display.pixel(Point::new(2, 2)), Some(Rgb565::WHITE));
        assert_eq!(display.pixel(Point::new(3, 3)), Some(Rgb565::BLACK));
    }
}
