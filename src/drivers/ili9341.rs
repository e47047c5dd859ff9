//! ILI9341 TFT controller in portrait 240x320, RGB565 over a [`DisplayBus`].

use embedded_graphics::{
    pixelcolor::{IntoStorage, Rgb565},
    prelude::*,
    primitives::Rectangle,
};

use crate::platform::{DelayOps, DisplayBus};

pub const WIDTH: u16 = 240;
pub const HEIGHT: u16 = 320;

mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const PASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const PIXFMT: u8 = 0x3A;
}

/// Column mirror + BGR order: portrait with the origin top-left.
const MADCTL_PORTRAIT: u8 = 0x48;
const PIXFMT_16BPP: u8 = 0x55;
const RESET_SETTLE_MS: u32 = 120;
/// Pixels per solid-fill burst.
const FILL_CHUNK: usize = 32;

pub struct Ili9341<B> {
    bus: B,
}

impl<B> Ili9341<B>
where
    B: DisplayBus,
{
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn init<D: DelayOps>(&mut self, delay: &D) -> Result<(), B::Error> {
        self.bus.command(cmd::SWRESET, &[])?;
        delay.delay_ms(RESET_SETTLE_MS);
        self.bus.command(cmd::SLPOUT, &[])?;
        delay.delay_ms(RESET_SETTLE_MS);
        self.bus.command(cmd::PIXFMT, &[PIXFMT_16BPP])?;
        self.bus.command(cmd::MADCTL, &[MADCTL_PORTRAIT])?;
        self.bus.command(cmd::DISPON, &[])
    }

    /// Opens an inclusive window and starts a memory write into it.
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), B::Error> {
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();
        self.bus.command(cmd::CASET, &[x0h, x0l, x1h, x1l])?;
        self.bus.command(cmd::PASET, &[y0h, y0l, y1h, y1l])?;
        self.bus.command(cmd::RAMWR, &[])
    }

    fn write_repeated(&mut self, color: Rgb565, count: u32) -> Result<(), B::Error> {
        let [hi, lo] = color.into_storage().to_be_bytes();
        let mut chunk = [0u8; FILL_CHUNK * 2];
        for pair in chunk.chunks_exact_mut(2) {
            pair[0] = hi;
            pair[1] = lo;
        }

        let mut remaining = count as usize;
        while remaining > 0 {
            let pixels = remaining.min(FILL_CHUNK);
            self.bus.write_data(&chunk[..pixels * 2])?;
            remaining -= pixels;
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn bus(&self) -> &B {
        &self.bus
    }
}

impl<B> OriginDimensions for Ili9341<B> {
    fn size(&self) -> Size {
        Size::new(u32::from(WIDTH), u32::from(HEIGHT))
    }
}

impl<B> DrawTarget for Ili9341<B>
where
    B: DisplayBus,
{
    type Color = Rgb565;
    type Error = B::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if !bounds.contains(point) {
                continue;
            }
            let (x, y) = (point.x as u16, point.y as u16);
            self.set_window(x, y, x, y)?;
            self.write_repeated(color, 1)?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        self.set_window(
            area.top_left.x as u16,
            area.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
        )?;
        self.write_repeated(color, area.size.width * area.size.height)
    }
}
