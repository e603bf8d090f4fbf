//! System icon strip
//!
//! System icons are [`SYSTEM_ICON_SIZE`] square frames laid out left to
//! right in a single 1 bpp image. Frame `i` occupies the source rectangle
//! `(i * SYSTEM_ICON_SIZE, 0, SYSTEM_ICON_SIZE, SYSTEM_ICON_SIZE)`.

use core::convert::Infallible;

use embedded_graphics::Drawable;
use embedded_graphics::draw_target::{DrawTarget, DrawTargetExt};
use embedded_graphics::geometry::{OriginDimensions, Point, Size};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::{Circle, Line, Primitive, PrimitiveStyle, Rectangle, Triangle};
use embedded_graphics::Pixel;

use super::image::{Image, ImageFormat};
use crate::geometry::Rectangle as UiRectangle;

/// Width and height of a system icon in pixels
pub const SYSTEM_ICON_SIZE: i32 = 16;

pub const ICON_HOME: i32 = 0;
pub const ICON_SETTINGS: i32 = 1;
pub const ICON_BACK: i32 = 2;
pub const ICON_FORWARD: i32 = 3;
pub const ICON_ALERT: i32 = 4;
pub const ICON_ERROR: i32 = 5;
pub const ICON_INFO: i32 = 6;
pub const ICON_OK: i32 = 7;
pub const ICON_CANCEL: i32 = 8;
pub const ICON_SAVE: i32 = 9;
pub const ICON_PLAY: i32 = 10;
pub const ICON_PAUSE: i32 = 11;
pub const ICON_STOP: i32 = 12;
pub const ICON_RECORD: i32 = 13;

/// Highest valid system icon index
pub const MAX_ICON: i32 = ICON_RECORD;

/// Source rectangle of icon frame `index` inside the strip.
pub const fn icon_source(index: i32) -> UiRectangle {
    UiRectangle::new(
        index * SYSTEM_ICON_SIZE,
        0,
        SYSTEM_ICON_SIZE,
        SYSTEM_ICON_SIZE,
    )
}

/// `DrawTarget` over a mono [`Image`], used to render the built-in strip.
struct MonoCanvas<'a> {
    image: &'a mut Image,
}

impl OriginDimensions for MonoCanvas<'_> {
    fn size(&self) -> Size {
        Size::new(self.image.width() as u32, self.image.height() as u32)
    }
}

impl DrawTarget for MonoCanvas<'_> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.image.set_mono(coord.x, coord.y, color.is_on());
        }
        Ok(())
    }
}

/// Render the built-in icon strip (frames `0..=MAX_ICON`).
pub(crate) fn system_icon_strip() -> Image {
    let count = (MAX_ICON + 1) as u16;
    let side = SYSTEM_ICON_SIZE as u16;
    let mut strip = Image::blank(count * side, side, ImageFormat::Mono);
    let mut canvas = MonoCanvas { image: &mut strip };

    for index in 0..=MAX_ICON {
        let mut frame = canvas.translated(Point::new(index * SYSTEM_ICON_SIZE, 0));
        match draw_icon(index, &mut frame) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }
    strip
}

fn draw_icon<D>(index: i32, target: &mut D) -> Result<(), Infallible>
where
    D: DrawTarget<Color = BinaryColor, Error = Infallible>,
{
    let fill = PrimitiveStyle::with_fill(BinaryColor::On);
    let thin = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
    let thick = PrimitiveStyle::with_stroke(BinaryColor::On, 2);

    match index {
        ICON_HOME => {
            Triangle::new(Point::new(1, 8), Point::new(8, 1), Point::new(15, 8))
                .into_styled(fill)
                .draw(target)?;
            Rectangle::new(Point::new(3, 8), Size::new(10, 7))
                .into_styled(fill)
                .draw(target)?;
        }
        ICON_SETTINGS => {
            Circle::new(Point::new(2, 2), 12)
                .into_styled(thick)
                .draw(target)?;
            Circle::new(Point::new(6, 6), 4)
                .into_styled(fill)
                .draw(target)?;
        }
        ICON_BACK => {
            Triangle::new(Point::new(3, 8), Point::new(11, 2), Point::new(11, 14))
                .into_styled(fill)
                .draw(target)?;
        }
        ICON_FORWARD => {
            Triangle::new(Point::new(12, 8), Point::new(4, 2), Point::new(4, 14))
                .into_styled(fill)
                .draw(target)?;
        }
        ICON_ALERT => {
            Triangle::new(Point::new(8, 1), Point::new(1, 14), Point::new(15, 14))
                .into_styled(thin)
                .draw(target)?;
            Line::new(Point::new(8, 5), Point::new(8, 10))
                .into_styled(thin)
                .draw(target)?;
            Pixel(Point::new(8, 12), BinaryColor::On).draw(target)?;
        }
        ICON_ERROR => {
            Circle::new(Point::new(1, 1), 14)
                .into_styled(thin)
                .draw(target)?;
            Line::new(Point::new(5, 5), Point::new(10, 10))
                .into_styled(thin)
                .draw(target)?;
            Line::new(Point::new(10, 5), Point::new(5, 10))
                .into_styled(thin)
                .draw(target)?;
        }
        ICON_INFO => {
            Circle::new(Point::new(1, 1), 14)
                .into_styled(thin)
                .draw(target)?;
            Rectangle::new(Point::new(7, 4), Size::new(2, 2))
                .into_styled(fill)
                .draw(target)?;
            Rectangle::new(Point::new(7, 7), Size::new(2, 5))
                .into_styled(fill)
                .draw(target)?;
        }
        ICON_OK => {
            Line::new(Point::new(2, 8), Point::new(6, 12))
                .into_styled(thick)
                .draw(target)?;
            Line::new(Point::new(6, 12), Point::new(13, 3))
                .into_styled(thick)
                .draw(target)?;
        }
        ICON_CANCEL => {
            Line::new(Point::new(3, 3), Point::new(12, 12))
                .into_styled(thick)
                .draw(target)?;
            Line::new(Point::new(12, 3), Point::new(3, 12))
                .into_styled(thick)
                .draw(target)?;
        }
        ICON_SAVE => {
            Rectangle::new(Point::new(1, 1), Size::new(14, 14))
                .into_styled(thin)
                .draw(target)?;
            Rectangle::new(Point::new(4, 1), Size::new(8, 5))
                .into_styled(fill)
                .draw(target)?;
            Rectangle::new(Point::new(3, 9), Size::new(10, 5))
                .into_styled(thin)
                .draw(target)?;
        }
        ICON_PLAY => {
            Triangle::new(Point::new(4, 2), Point::new(4, 13), Point::new(13, 8))
                .into_styled(fill)
                .draw(target)?;
        }
        ICON_PAUSE => {
            Rectangle::new(Point::new(3, 2), Size::new(4, 12))
                .into_styled(fill)
                .draw(target)?;
            Rectangle::new(Point::new(9, 2), Size::new(4, 12))
                .into_styled(fill)
                .draw(target)?;
        }
        ICON_STOP => {
            Rectangle::new(Point::new(3, 3), Size::new(10, 10))
                .into_styled(fill)
                .draw(target)?;
        }
        ICON_RECORD => {
            Circle::new(Point::new(3, 3), 10)
                .into_styled(fill)
                .draw(target)?;
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_layout() {
        let strip = system_icon_strip();
        assert_eq!(strip.width() as i32, (MAX_ICON + 1) * SYSTEM_ICON_SIZE);
        assert_eq!(strip.height() as i32, SYSTEM_ICON_SIZE);
        assert_eq!(strip.format(), ImageFormat::Mono);
    }

    #[test]
    fn test_every_frame_has_ink_inside_its_cell() {
        let strip = system_icon_strip();
        for index in 0..=MAX_ICON {
            let src = icon_source(index);
            let mut ink = 0;
            for y in src.y..src.y + src.height {
                for x in src.x..src.x + src.width {
                    if strip.is_set(x, y) {
                        ink += 1;
                    }
                }
            }
            assert!(ink > 0, "icon {} is blank", index);
        }
    }

    #[test]
    fn test_icon_source_rect() {
        assert_eq!(icon_source(0), UiRectangle::new(0, 0, 16, 16));
        assert_eq!(icon_source(ICON_PAUSE), UiRectangle::new(176, 0, 16, 16));
    }
}
