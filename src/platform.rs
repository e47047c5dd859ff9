#[cfg(feature = "esp-hal-runtime")]
use esp_hal::{
    gpio::Output,
    i2c::master::{Error as I2cError, I2c},
    spi::{master::Spi, Error as SpiError},
    time::{Duration, Instant},
    Blocking,
};

pub trait DelayOps {
    fn delay_ms(&self, millis: u32);
}

pub trait I2cOps {
    type Error;

    fn write_read(&mut self, addr: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error>;
}

/// Command/data link of a MIPI-DBI style panel controller (4-wire SPI with a D/C line).
pub trait DisplayBus {
    type Error;

    /// Sends `cmd` with D/C low, then `params` with D/C high.
    fn command(&mut self, cmd: u8, params: &[u8]) -> Result<(), Self::Error>;
    /// Continues the data phase of the last command.
    fn write_data(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

#[cfg(feature = "esp-hal-runtime")]
pub struct HalI2c<'d> {
    bus: I2c<'d, Blocking>,
}

#[cfg(feature = "esp-hal-runtime")]
impl<'d> HalI2c<'d> {
    pub fn new(bus: I2c<'d, Blocking>) -> Self {
        Self { bus }
    }
}

#[cfg(feature = "esp-hal-runtime")]
impl I2cOps for HalI2c<'_> {
    type Error = I2cError;

    fn write_read(&mut self, addr: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.write_read(addr, bytes, buffer)
    }
}

/// SPI panel link. Chip select is held low for the whole command and its parameters.
#[cfg(feature = "esp-hal-runtime")]
pub struct HalDisplayBus<'d> {
    spi: Spi<'d, Blocking>,
    dc: Output<'d>,
    cs: Output<'d>,
}

#[cfg(feature = "esp-hal-runtime")]
impl<'d> HalDisplayBus<'d> {
    pub fn new(spi: Spi<'d, Blocking>, dc: Output<'d>, mut cs: Output<'d>) -> Self {
        cs.set_high();
        Self { spi, dc, cs }
    }
}

#[cfg(feature = "esp-hal-runtime")]
impl DisplayBus for HalDisplayBus<'_> {
    type Error = SpiError;

    fn command(&mut self, cmd: u8, params: &[u8]) -> Result<(), Self::Error> {
        self.cs.set_low();
        self.dc.set_low();
        let sent = self.spi.write(&[cmd]).and_then(|()| {
            self.dc.set_high();
            if params.is_empty() {
                Ok(())
            } else {
                self.spi.write(params)
            }
        });
        self.cs.set_high();
        sent
    }

    fn write_data(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.cs.set_low();
        self.dc.set_high();
        let sent = self.spi.write(bytes);
        self.cs.set_high();
        sent
    }
}

/// Spins on the system timer. Fine for the single-task control loop, which has nothing else to run.
#[cfg(feature = "esp-hal-runtime")]
#[derive(Clone, Copy, Default)]
pub struct BusyDelay;

#[cfg(feature = "esp-hal-runtime")]
impl BusyDelay {
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(feature = "esp-hal-runtime")]
impl DelayOps for BusyDelay {
    fn delay_ms(&self, millis: u32) {
        let duration = Duration::from_millis(millis as u64);
        let start = Instant::now();
        while start.elapsed() < duration {}
    }
}
