pub mod ft6x06;
#[cfg(feature = "graphics")]
pub mod ili9341;
