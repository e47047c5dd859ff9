#![cfg_attr(not(test), no_std)]

pub mod control;
pub mod drivers;
pub mod platform;
#[cfg(feature = "graphics")]
pub mod ui;

pub use control::{
    config::{active_config, ControlConfig},
    io::{ControlIo, Indicator},
    report::PointerReport,
    types::RawTouchSample,
    ControlLoop, CycleOutcome,
};
