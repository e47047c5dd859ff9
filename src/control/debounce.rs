use log::debug;

use super::{
    config::DebounceConfig,
    io::ControlIo,
    types::{ConfirmedTouch, PositionPair, RawTouchSample},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebounceOutcome {
    /// The first read saw no contact; nothing was waited for.
    Idle,
    /// Contact vanished during the settle wait.
    Tap,
    /// Both reads saw contact. `echo` is set when the confirming read was the panel's edge echo.
    Touching { touch: ConfirmedTouch, echo: bool },
}

impl DebounceOutcome {
    pub fn is_touching(&self) -> bool {
        matches!(self, Self::Touching { .. })
    }

    pub fn confirmed(&self) -> ConfirmedTouch {
        match *self {
            Self::Touching { touch, .. } => touch,
            Self::Idle | Self::Tap => ConfirmedTouch::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceReading {
    pub outcome: DebounceOutcome,
    /// Last raw read of the cycle, for diagnostics.
    pub last_sample: RawTouchSample,
}

/// The panel reports x at its last column when it echoes a contact that already ended.
pub fn is_edge_echo(sample: &RawTouchSample, config: &DebounceConfig) -> bool {
    sample.x == config.echo_sentinel_x
}

/// Reads the panel, and on contact waits `settle_ms` and reads again.
///
/// The position pair only moves when the second read confirms the contact: `previous` takes the
/// first read, `current` the second. An echo read leaves both untouched.
pub fn debounce_touch<IO: ControlIo + ?Sized>(
    io: &mut IO,
    positions: &mut PositionPair,
    config: &DebounceConfig,
) -> DebounceReading {
    let first = io.poll_touch();
    if !first.detected {
        return DebounceReading {
            outcome: DebounceOutcome::Idle,
            last_sample: first,
        };
    }

    io.sleep_ms(config.settle_ms);
    let second = io.poll_touch();
    if !second.detected {
        debug!("touch: tap x={} y={}", first.x, first.y);
        return DebounceReading {
            outcome: DebounceOutcome::Tap,
            last_sample: second,
        };
    }

    let echo = is_edge_echo(&second, config);
    if echo {
        debug!("touch: edge echo ignored y={}", second.y);
    } else {
        positions.previous = first.point();
        positions.current = second.point();
    }

    DebounceReading {
        outcome: DebounceOutcome::Touching {
            touch: ConfirmedTouch {
                x: positions.current.x,
                y: positions.current.y,
                detected: true,
            },
            echo,
        },
        last_sample: second,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{
        config::active_config,
        testing::{IoCall, ScriptedIo},
        types::TouchPoint,
    };

    fn config() -> DebounceConfig {
        active_config().debounce
    }

    #[test]
    fn no_contact_reads_once_without_waiting() {
        let mut io = ScriptedIo::default();
        let mut positions = PositionPair::default();

        let reading = debounce_touch(&mut io, &mut positions, &config());

        assert_eq!(reading.outcome, DebounceOutcome::Idle);
        assert_eq!(io.calls, std::vec![IoCall::Poll]);
        assert_eq!(positions, PositionPair::default());
    }

    #[test]
    fn contact_lost_during_settle_is_a_tap_and_keeps_positions() {
        let mut io = ScriptedIo::default();
        io.push(RawTouchSample::touched(10, 20, 5))
            .push(RawTouchSample::released());
        let mut positions = PositionPair {
            previous: TouchPoint::new(1, 2),
            current: TouchPoint::new(3, 4),
        };
        let before = positions;

        let reading = debounce_touch(&mut io, &mut positions, &config());

        assert_eq!(reading.outcome, DebounceOutcome::Tap);
        assert!(!reading.outcome.confirmed().detected);
        assert_eq!(positions, before);
        assert_eq!(
            io.calls,
            std::vec![IoCall::Poll, IoCall::Sleep(8), IoCall::Poll]
        );
    }

    #[test]
    fn second_contact_confirms_and_shifts_positions() {
        let mut io = ScriptedIo::default();
        io.push(RawTouchSample::touched(10, 20, 5))
            .push(RawTouchSample::touched(12, 22, 6));
        let mut positions = PositionPair::default();

        let reading = debounce_touch(&mut io, &mut positions, &config());

        assert!(reading.outcome.is_touching());
        assert_eq!(positions.previous, TouchPoint::new(10, 20));
        assert_eq!(positions.current, TouchPoint::new(12, 22));
        assert_eq!(
            reading.outcome.confirmed(),
            ConfirmedTouch {
                x: 12,
                y: 22,
                detected: true
            }
        );
        assert_eq!(reading.last_sample.z, 6);
    }

    #[test]
    fn edge_echo_keeps_previous_positions() {
        let mut io = ScriptedIo::default();
        io.push(RawTouchSample::touched(100, 150, 5))
            .push(RawTouchSample::touched(0xEF, 151, 5));
        let mut positions = PositionPair {
            previous: TouchPoint::new(40, 50),
            current: TouchPoint::new(42, 53),
        };
        let before = positions;

        let reading = debounce_touch(&mut io, &mut positions, &config());

        assert_eq!(positions, before);
        match reading.outcome {
            DebounceOutcome::Touching { touch, echo } => {
                assert!(echo);
                assert_eq!(touch.point(), TouchPoint::new(42, 53));
            }
            other => panic!("expected touching, got {other:?}"),
        }
    }

    #[test]
    fn echo_value_on_first_read_is_not_filtered() {
        let mut io = ScriptedIo::default();
        io.push(RawTouchSample::touched(0xEF, 150, 5))
            .push(RawTouchSample::touched(230, 150, 5));
        let mut positions = PositionPair::default();

        debounce_touch(&mut io, &mut positions, &config());

        assert_eq!(positions.previous, TouchPoint::new(0xEF, 150));
        assert_eq!(positions.current, TouchPoint::new(230, 150));
    }
}
