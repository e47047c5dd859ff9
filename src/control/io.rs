use super::{report::PointerReport, types::RawTouchSample};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indicator {
    /// Blinks on taps, lit while the user button is held.
    Activity,
    /// Lit while the report sink is connected.
    Connected,
}

/// Everything the control loop needs from the board. All calls are made from the loop itself.
pub trait ControlIo {
    /// Non-blocking read of the panel controller.
    fn poll_touch(&mut self) -> RawTouchSample;

    fn sink_connected(&mut self) -> bool;

    /// Fire-and-forget; the sink gives no acknowledgement.
    fn send_report(&mut self, report: &PointerReport);

    /// Blocks the whole loop.
    fn sleep_ms(&mut self, millis: u32);

    fn button_pressed(&mut self) -> bool;

    fn set_indicator(&mut self, _indicator: Indicator, _on: bool) {}

    fn toggle_indicator(&mut self, _indicator: Indicator) {}
}
