//! Touch-to-pointer control core: one synchronous cycle per loop iteration.

pub mod config;
pub mod debounce;
pub mod diagnostics;
pub mod io;
pub mod mode;
pub mod motion;
pub mod pad;
pub mod report;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

use log::info;

use self::{
    config::{active_config, ControlConfig},
    debounce::{debounce_touch, DebounceOutcome},
    diagnostics::DiagnosticSnapshot,
    io::{ControlIo, Indicator},
    mode::{ModeChange, ModeController, ModeState},
    motion::translate,
    pad::{hit_test, pad_motion, PadAction, Zone, PAD_ZONES},
    report::{assemble_report, dispatch, ButtonEdge, ButtonLatch, PointerReport},
    types::{PositionPair, RawTouchSample},
};

/// State that outlives a cycle. Each field is written by exactly one component.
pub struct ControlCoreState {
    pub positions: PositionPair,
    pub mode: ModeController,
    pub latch: ButtonLatch,
    pub connected: bool,
    pub last_sample: RawTouchSample,
    pub last_report: PointerReport,
}

impl ControlCoreState {
    pub fn new(config: &ControlConfig) -> Self {
        Self {
            positions: PositionPair::default(),
            mode: ModeController::new(&config.pad),
            latch: ButtonLatch::default(),
            connected: false,
            last_sample: RawTouchSample::released(),
            last_report: PointerReport::released(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleOutcome {
    pub touch: DebounceOutcome,
    /// Zone under the confirmed touch, computed whatever the mode.
    pub pad_action: Option<PadAction>,
    pub mode_change: Option<ModeChange>,
    /// Report built this cycle, sent or not.
    pub report: Option<PointerReport>,
    pub dispatched: bool,
}

pub struct ControlLoop {
    config: ControlConfig,
    zones: &'static [Zone],
    state: ControlCoreState,
}

impl Default for ControlLoop {
    fn default() -> Self {
        Self::new(*active_config())
    }
}

impl ControlLoop {
    pub fn new(config: ControlConfig) -> Self {
        Self::with_zones(config, &PAD_ZONES)
    }

    pub fn with_zones(config: ControlConfig, zones: &'static [Zone]) -> Self {
        Self {
            state: ControlCoreState::new(&config),
            config,
            zones,
        }
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn state(&self) -> &ControlCoreState {
        &self.state
    }

    pub fn mode_state(&self) -> ModeState {
        self.state.mode.state()
    }

    pub fn diagnostics(&self) -> DiagnosticSnapshot {
        DiagnosticSnapshot {
            sample: self.state.last_sample,
            report: self.state.last_report,
            positions: self.state.positions,
            enabled: self.state.mode.is_enabled(),
        }
    }

    /// Runs cycles forever.
    pub fn run<IO: ControlIo>(&mut self, io: &mut IO) -> ! {
        self.run_observed(io, |_, _| {})
    }

    /// Like [`ControlLoop::run`], handing every outcome and the resulting diagnostics to `observer`.
    pub fn run_observed<IO, F>(&mut self, io: &mut IO, mut observer: F) -> !
    where
        IO: ControlIo,
        F: FnMut(&CycleOutcome, &DiagnosticSnapshot),
    {
        loop {
            let outcome = self.run_cycle(io);
            observer(&outcome, &self.diagnostics());
        }
    }

    /// One iteration: debounce, latch, motion and pad, dwell, then at most one report.
    ///
    /// The mode in force at the start of the cycle decides which motion source is reported; a
    /// flip caused by this cycle's dwell applies from the next cycle on.
    pub fn run_cycle<IO: ControlIo + ?Sized>(&mut self, io: &mut IO) -> CycleOutcome {
        let reading = debounce_touch(io, &mut self.state.positions, &self.config.debounce);
        self.state.last_sample = reading.last_sample;
        if matches!(reading.outcome, DebounceOutcome::Tap) {
            io.toggle_indicator(Indicator::Activity);
        }

        let connected = io.sink_connected();
        if connected != self.state.connected {
            info!(
                "sink: {}",
                if connected {
                    "connected"
                } else {
                    "disconnected"
                }
            );
            self.state.connected = connected;
        }
        io.set_indicator(Indicator::Connected, connected);

        let edge = self.state.latch.update(io.button_pressed());
        match edge {
            Some(ButtonEdge::Pressed) => io.set_indicator(Indicator::Activity, true),
            Some(ButtonEdge::Released) => io.set_indicator(Indicator::Activity, false),
            None => {}
        }

        let touching = reading.outcome.is_touching();
        let pad_action = if touching {
            hit_test(self.zones, reading.outcome.confirmed().point())
        } else {
            None
        };

        let pad_enabled = self.state.mode.is_enabled();
        let mode_change = self
            .state
            .mode
            .observe(matches!(pad_action, Some(PadAction::ToggleMode)));

        let motion = touching.then(|| {
            if pad_enabled {
                pad_motion(pad_action, self.config.pad.step)
            } else {
                translate(&self.state.positions, &self.config.motion)
            }
        });

        let report = assemble_report(edge, &self.state.latch, motion);
        let dispatched = match report {
            Some(report) => {
                self.state.last_report = report;
                dispatch(io, connected, &report, &self.config.report)
            }
            None => false,
        };

        CycleOutcome {
            touch: reading.outcome,
            pad_action,
            mode_change,
            report,
            dispatched,
        }
    }
}
