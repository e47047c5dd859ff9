use log::debug;

use super::{config::ReportConfig, io::ControlIo, motion::MotionDelta};

/// Value a button field carries while held. The sink maps any non-zero value to its bit.
pub const BUTTON_PRESSED: u8 = 0x01;
pub const BUTTON_RELEASED: u8 = 0x00;

pub const BOOT_REPORT_LEN: usize = 4;

/// One relative pointer report. Built fresh for every dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerReport {
    pub dx: i8,
    pub dy: i8,
    pub wheel: i8,
    pub left_button: u8,
    pub right_button: u8,
    pub middle_button: u8,
}

impl PointerReport {
    pub const fn released() -> Self {
        Self {
            dx: 0,
            dy: 0,
            wheel: 0,
            left_button: BUTTON_RELEASED,
            right_button: BUTTON_RELEASED,
            middle_button: BUTTON_RELEASED,
        }
    }

    fn with_latch(motion: MotionDelta, left_pressed: bool) -> Self {
        Self {
            dx: motion.dx,
            dy: motion.dy,
            wheel: motion.wheel,
            left_button: if left_pressed {
                BUTTON_PRESSED
            } else {
                BUTTON_RELEASED
            },
            right_button: BUTTON_RELEASED,
            middle_button: BUTTON_RELEASED,
        }
    }

    /// Button bitfield: bit 0 left, bit 1 right, bit 2 middle.
    pub fn buttons(&self) -> u8 {
        u8::from(self.left_button != BUTTON_RELEASED)
            | u8::from(self.right_button != BUTTON_RELEASED) << 1
            | u8::from(self.middle_button != BUTTON_RELEASED) << 2
    }

    /// HID boot-protocol mouse layout.
    pub fn to_boot_bytes(&self) -> [u8; BOOT_REPORT_LEN] {
        [
            self.buttons(),
            self.dx as u8,
            self.dy as u8,
            self.wheel as u8,
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEdge {
    Pressed,
    Released,
}

/// Edge detector for the physical user button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonLatch {
    pressed: bool,
}

impl ButtonLatch {
    pub fn update(&mut self, raw_pressed: bool) -> Option<ButtonEdge> {
        match (self.pressed, raw_pressed) {
            (false, true) => {
                self.pressed = true;
                Some(ButtonEdge::Pressed)
            }
            (true, false) => {
                self.pressed = false;
                Some(ButtonEdge::Released)
            }
            _ => None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

/// Picks the single report of a cycle.
///
/// A button edge wins and carries no motion. Otherwise `motion` (present only while a touch is
/// confirmed) is reported with the latched button state, so holding the button while dragging
/// keeps the left button down.
pub fn assemble_report(
    edge: Option<ButtonEdge>,
    latch: &ButtonLatch,
    motion: Option<MotionDelta>,
) -> Option<PointerReport> {
    match edge {
        Some(ButtonEdge::Pressed) => Some(PointerReport::with_latch(MotionDelta::default(), true)),
        Some(ButtonEdge::Released) => Some(PointerReport::released()),
        None => motion.map(|motion| PointerReport::with_latch(motion, latch.is_pressed())),
    }
}

/// Sends `report` and holds the loop for the inter-report gap. Disconnected sinks get nothing and
/// cost no delay.
pub fn dispatch<IO: ControlIo + ?Sized>(
    io: &mut IO,
    connected: bool,
    report: &PointerReport,
    config: &ReportConfig,
) -> bool {
    if !connected {
        return false;
    }
    debug!(
        "report: dx={} dy={} buttons={:#04x}",
        report.dx,
        report.dy,
        report.buttons()
    );
    io.send_report(report);
    io.sleep_ms(config.interval_ms);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{
        config::active_config,
        testing::{IoCall, ScriptedIo},
    };

    #[test]
    fn latch_reports_edges_only() {
        let mut latch = ButtonLatch::default();
        assert_eq!(latch.update(false), None);
        assert_eq!(latch.update(true), Some(ButtonEdge::Pressed));
        assert_eq!(latch.update(true), None);
        assert!(latch.is_pressed());
        assert_eq!(latch.update(false), Some(ButtonEdge::Released));
        assert_eq!(latch.update(false), None);
    }

    #[test]
    fn press_edge_overrides_motion() {
        let mut latch = ButtonLatch::default();
        let edge = latch.update(true);
        let report = assemble_report(edge, &latch, Some(MotionDelta::new(20, -5)))
            .expect("edge always reports");
        assert_eq!(report.left_button, BUTTON_PRESSED);
        assert_eq!((report.dx, report.dy, report.wheel), (0, 0, 0));
    }

    #[test]
    fn release_edge_releases_every_button() {
        let mut latch = ButtonLatch::default();
        let _ = latch.update(true);
        let edge = latch.update(false);
        let report = assemble_report(edge, &latch, None).expect("edge always reports");
        assert_eq!(report, PointerReport::released());
    }

    #[test]
    fn held_button_rides_along_with_motion() {
        let mut latch = ButtonLatch::default();
        let _ = latch.update(true);
        let edge = latch.update(true);
        let report = assemble_report(edge, &latch, Some(MotionDelta::new(4, 7)))
            .expect("motion reports");
        assert_eq!(report.left_button, BUTTON_PRESSED);
        assert_eq!((report.dx, report.dy), (4, 7));
    }

    #[test]
    fn nothing_to_report_without_edge_or_touch() {
        assert_eq!(assemble_report(None, &ButtonLatch::default(), None), None);
    }

    #[test]
    fn boot_bytes_pack_buttons_and_signed_deltas() {
        let report = PointerReport {
            dx: -10,
            dy: 3,
            wheel: 0,
            left_button: BUTTON_PRESSED,
            right_button: BUTTON_RELEASED,
            middle_button: 0x09,
        };
        assert_eq!(report.to_boot_bytes(), [0b101, 0xF6, 0x03, 0x00]);
    }

    #[test]
    fn dispatch_sends_then_waits_the_report_interval() {
        let mut io = ScriptedIo::connected();
        let report = PointerReport::released();
        assert!(dispatch(&mut io, true, &report, &active_config().report));
        assert_eq!(io.calls, std::vec![IoCall::Send(report), IoCall::Sleep(10)]);
    }

    #[test]
    fn dispatch_is_a_no_op_when_disconnected() {
        let mut io = ScriptedIo::default();
        assert!(!dispatch(
            &mut io,
            false,
            &PointerReport::released(),
            &active_config().report
        ));
        assert!(io.calls.is_empty());
    }
}
