use core::fmt::Write;

use heapless::String;

use super::{
    report::PointerReport,
    types::{PositionPair, RawTouchSample},
};

pub const DIAGNOSTIC_LINES: usize = 5;
pub type DiagnosticLine = String<32>;

/// Low 16 bits as `0xHHHH`; negative values show their two's complement.
pub fn format_hex_word(value: i32) -> String<6> {
    let mut out = String::<6>::new();
    let _ = write!(&mut out, "0x{:04X}", (value as u32) & 0xFFFF);
    out
}

/// What the status screen shows after a cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticSnapshot {
    pub sample: RawTouchSample,
    pub report: PointerReport,
    pub positions: PositionPair,
    pub enabled: bool,
}

impl DiagnosticSnapshot {
    pub fn lines(&self) -> [DiagnosticLine; DIAGNOSTIC_LINES] {
        [
            triple(
                ("X", i32::from(self.sample.x)),
                ("Y", i32::from(self.sample.y)),
                ("Z", i32::from(self.sample.z)),
            ),
            triple(
                ("X", i32::from(self.report.dx)),
                ("Y", i32::from(self.report.dy)),
                ("W", i32::from(self.report.wheel)),
            ),
            triple(
                ("L", i32::from(self.report.left_button)),
                ("R", i32::from(self.report.right_button)),
                ("M", i32::from(self.report.middle_button)),
            ),
            pair(
                ("currX", self.positions.current.x),
                ("prevX", self.positions.previous.x),
            ),
            pair(
                ("currY", self.positions.current.y),
                ("prevY", self.positions.previous.y),
            ),
        ]
    }
}

fn triple(a: (&str, i32), b: (&str, i32), c: (&str, i32)) -> DiagnosticLine {
    let mut out = DiagnosticLine::new();
    let _ = write!(
        &mut out,
        "{}: {} {}: {} {}: {}",
        a.0,
        format_hex_word(a.1),
        b.0,
        format_hex_word(b.1),
        c.0,
        format_hex_word(c.1)
    );
    out
}

fn pair(a: (&str, u16), b: (&str, u16)) -> DiagnosticLine {
    let mut out = DiagnosticLine::new();
    let _ = write!(
        &mut out,
        "{}: {} {}: {}",
        a.0,
        format_hex_word(i32::from(a.1)),
        b.0,
        format_hex_word(i32::from(b.1))
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{report::BUTTON_PRESSED, types::TouchPoint};

    #[test]
    fn hex_word_is_fixed_width_uppercase() {
        assert_eq!(format_hex_word(0).as_str(), "0x0000");
        assert_eq!(format_hex_word(0xEF).as_str(), "0x00EF");
        assert_eq!(format_hex_word(0x13F).as_str(), "0x013F");
        assert_eq!(format_hex_word(0xABCD).as_str(), "0xABCD");
    }

    #[test]
    fn hex_word_keeps_low_sixteen_bits() {
        assert_eq!(format_hex_word(-10).as_str(), "0xFFF6");
        assert_eq!(format_hex_word(0x1_2345).as_str(), "0x2345");
    }

    #[test]
    fn snapshot_renders_status_lines() {
        let snapshot = DiagnosticSnapshot {
            sample: RawTouchSample::touched(0x78, 0xE6, 0x21),
            report: PointerReport {
                dx: -10,
                dy: 0,
                wheel: 0,
                left_button: BUTTON_PRESSED,
                right_button: 0,
                middle_button: 0,
            },
            positions: PositionPair {
                previous: TouchPoint::new(0x70, 0xE0),
                current: TouchPoint::new(0x78, 0xE6),
            },
            enabled: true,
        };

        let lines = snapshot.lines();
        assert_eq!(lines[0].as_str(), "X: 0x0078 Y: 0x00E6 Z: 0x0021");
        assert_eq!(lines[1].as_str(), "X: 0xFFF6 Y: 0x0000 W: 0x0000");
        assert_eq!(lines[2].as_str(), "L: 0x0001 R: 0x0000 M: 0x0000");
        assert_eq!(lines[3].as_str(), "currX: 0x0078 prevX: 0x0070");
        assert_eq!(lines[4].as_str(), "currY: 0x00E6 prevY: 0x00E0");
    }
}
