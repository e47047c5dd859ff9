/// What happens to the dwell counter when the touch leaves the toggle zone before the threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DwellPolicy {
    /// Leaving the zone (or lifting the finger) clears the counter.
    ResetOnExit,
    /// The counter survives zone exits and only clears on a mode flip.
    Banked,
}

#[derive(Clone, Copy, Debug)]
pub struct DebounceConfig {
    pub settle_ms: u32,
    pub echo_sentinel_x: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct MotionConfig {
    pub dead_zone: u16,
    pub modulus_x: u16,
    pub modulus_y: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct PadConfig {
    pub step: i8,
    pub dwell_threshold: u32,
    pub dwell_policy: DwellPolicy,
}

#[derive(Clone, Copy, Debug)]
pub struct ReportConfig {
    pub interval_ms: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct ControlConfig {
    pub debounce: DebounceConfig,
    pub motion: MotionConfig,
    pub pad: PadConfig,
    pub report: ReportConfig,
}

include!(concat!(env!("OUT_DIR"), "/control_config.rs"));

pub fn active_config() -> &'static ControlConfig {
    &CONTROL_CONFIG
}
