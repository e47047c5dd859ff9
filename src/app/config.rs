pub(crate) const I2C_FREQ_KHZ: u32 = 400;
pub(crate) const I2C_TIMEOUT_MS: u64 = 20;

pub(crate) const USB_VID: u16 = 0x16c0;
pub(crate) const USB_PID: u16 = 0x27da;
pub(crate) const USB_MANUFACTURER: &str = "touchmouse";
pub(crate) const USB_PRODUCT: &str = "Touch Pad Mouse";
pub(crate) const USB_SERIAL: &str = "TM0001";
pub(crate) const USB_POLL_MS: u8 = 10;
/// Endpoint FIFO memory handed to the OTG driver, in words.
pub(crate) const USB_EP_MEMORY_WORDS: usize = 1024;

pub(crate) const DISPLAY_SPI_MHZ: u32 = 40;
pub(crate) const DISPLAY_RESET_PULSE_MS: u32 = 10;
