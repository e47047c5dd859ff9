use std::{collections::VecDeque, vec::Vec};

use super::{
    io::{ControlIo, Indicator},
    report::PointerReport,
    types::RawTouchSample,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum IoCall {
    Poll,
    Sleep(u32),
    Send(PointerReport),
}

/// Replays queued panel reads; an empty queue reads as "no touch".
#[derive(Default)]
pub(crate) struct ScriptedIo {
    pub(crate) samples: VecDeque<RawTouchSample>,
    pub(crate) connected: bool,
    pub(crate) button: bool,
    pub(crate) calls: Vec<IoCall>,
    pub(crate) indicators: Vec<(Indicator, Option<bool>)>,
}

impl ScriptedIo {
    pub(crate) fn connected() -> Self {
        Self {
            connected: true,
            ..Self::default()
        }
    }

    pub(crate) fn push(&mut self, sample: RawTouchSample) -> &mut Self {
        self.samples.push_back(sample);
        self
    }

    /// Queues a confirmed touch: the same spot on both reads.
    pub(crate) fn push_hold(&mut self, x: u16, y: u16) -> &mut Self {
        self.push(RawTouchSample::touched(x, y, 0x20));
        self.push(RawTouchSample::touched(x, y, 0x20))
    }

    pub(crate) fn sent(&self) -> Vec<PointerReport> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                IoCall::Send(report) => Some(*report),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn sleeps(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                IoCall::Sleep(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn polls(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, IoCall::Poll))
            .count()
    }
}

impl ControlIo for ScriptedIo {
    fn poll_touch(&mut self) -> RawTouchSample {
        self.calls.push(IoCall::Poll);
        self.samples
            .pop_front()
            .unwrap_or_else(RawTouchSample::released)
    }

    fn sink_connected(&mut self) -> bool {
        self.connected
    }

    fn send_report(&mut self, report: &PointerReport) {
        self.calls.push(IoCall::Send(*report));
    }

    fn sleep_ms(&mut self, millis: u32) {
        self.calls.push(IoCall::Sleep(millis));
    }

    fn button_pressed(&mut self) -> bool {
        self.button
    }

    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        self.indicators.push((indicator, Some(on)));
    }

    fn toggle_indicator(&mut self, indicator: Indicator) {
        self.indicators.push((indicator, None));
    }
}
