//! FT6x06-family capacitive panel controller, polled over I2C.

use log::warn;

use crate::{control::types::RawTouchSample, platform::I2cOps};

pub const DEFAULT_ADDR: u8 = 0x38;

const REG_TD_STATUS: u8 = 0x02;
const REG_CHIP_ID: u8 = 0xA3;
const MAX_POINTS: u8 = 2;
/// Status, XH, XL, YH, YL, weight.
const POINT_FRAME_LEN: usize = 6;

#[derive(Debug, PartialEq, Eq)]
pub enum TouchReadError<E> {
    Bus(E),
    InvalidPointCount(u8),
}

impl<E> From<E> for TouchReadError<E> {
    fn from(value: E) -> Self {
        Self::Bus(value)
    }
}

/// Decodes the status byte and the first touch point. Coordinates are 12 bits.
pub fn decode_frame<E>(frame: &[u8; POINT_FRAME_LEN]) -> Result<RawTouchSample, TouchReadError<E>> {
    let points = frame[0] & 0x0F;
    if points > MAX_POINTS {
        return Err(TouchReadError::InvalidPointCount(points));
    }
    if points == 0 {
        return Ok(RawTouchSample::released());
    }

    let x = (u16::from(frame[1] & 0x0F) << 8) | u16::from(frame[2]);
    let y = (u16::from(frame[3] & 0x0F) << 8) | u16::from(frame[4]);
    Ok(RawTouchSample::touched(x, y, u16::from(frame[5])))
}

pub struct TouchPanel<I2C> {
    i2c: I2C,
    addr: u8,
    failing: bool,
}

impl<I2C> TouchPanel<I2C>
where
    I2C: I2cOps,
{
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDR)
    }

    pub fn with_address(i2c: I2C, addr: u8) -> Self {
        Self {
            i2c,
            addr,
            failing: false,
        }
    }

    pub fn chip_id(&mut self) -> Result<u8, TouchReadError<I2C::Error>> {
        let mut id = [0u8; 1];
        self.i2c.write_read(self.addr, &[REG_CHIP_ID], &mut id)?;
        Ok(id[0])
    }

    pub fn read_sample(&mut self) -> Result<RawTouchSample, TouchReadError<I2C::Error>> {
        let mut frame = [0u8; POINT_FRAME_LEN];
        self.i2c.write_read(self.addr, &[REG_TD_STATUS], &mut frame)?;
        decode_frame(&frame)
    }

    /// Read for the control loop: any failure counts as "no touch". Logged once per failure streak.
    pub fn poll(&mut self) -> RawTouchSample {
        match self.read_sample() {
            Ok(sample) => {
                self.failing = false;
                sample
            }
            Err(err) => {
                if !self.failing {
                    match err {
                        TouchReadError::Bus(_) => warn!("touch: bus error"),
                        TouchReadError::InvalidPointCount(n) => {
                            warn!("touch: invalid point count {}", n)
                        }
                    }
                }
                self.failing = true;
                RawTouchSample::released()
            }
        }
    }
}
