use log::info;
use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::config::{DwellPolicy, PadConfig};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModeState {
    pub enabled: bool,
    pub dwell_count: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeChange {
    Enabled,
    Disabled,
}

impl ModeChange {
    pub fn enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

#[derive(Clone, Copy, Debug)]
enum ModeEvent {
    Dwell { in_toggle_zone: bool },
}

#[derive(Clone, Copy, Debug, Default)]
struct DispatchContext {
    change: Option<ModeChange>,
}

/// Gates the virtual pad. Starts disabled; dwelling `dwell_threshold` cycles in the toggle zone
/// flips it.
pub struct ModeController {
    machine: statig::blocking::StateMachine<ModeHsm>,
}

impl ModeController {
    pub fn new(config: &PadConfig) -> Self {
        Self {
            machine: ModeHsm::new(config.dwell_threshold, config.dwell_policy).state_machine(),
        }
    }

    /// Feeds one control cycle. Call it every cycle, touching or not: a cycle without contact
    /// counts as being outside the toggle zone.
    pub fn observe(&mut self, in_toggle_zone: bool) -> Option<ModeChange> {
        let mut context = DispatchContext::default();
        self.machine
            .handle_with_context(&ModeEvent::Dwell { in_toggle_zone }, &mut context);
        if let Some(change) = context.change {
            info!("mode: pad {}", if change.enabled() { "enabled" } else { "disabled" });
        }
        context.change
    }

    pub fn is_enabled(&self) -> bool {
        self.machine.inner().enabled
    }

    pub fn state(&self) -> ModeState {
        let hsm = self.machine.inner();
        ModeState {
            enabled: hsm.enabled,
            dwell_count: hsm.dwell_count,
        }
    }
}

struct ModeHsm {
    enabled: bool,
    dwell_count: u32,
    threshold: u32,
    policy: DwellPolicy,
}

impl ModeHsm {
    fn new(threshold: u32, policy: DwellPolicy) -> Self {
        Self {
            enabled: false,
            dwell_count: 0,
            threshold: threshold.max(1),
            policy,
        }
    }

    /// Returns true when the dwell reached the threshold; the counter is cleared in that case.
    fn register_dwell(&mut self, in_toggle_zone: bool) -> bool {
        if !in_toggle_zone {
            if matches!(self.policy, DwellPolicy::ResetOnExit) {
                self.dwell_count = 0;
            }
            return false;
        }

        self.dwell_count = self.dwell_count.saturating_add(1);
        if self.dwell_count >= self.threshold {
            self.dwell_count = 0;
            return true;
        }
        false
    }
}

#[state_machine(initial = "State::disabled()")]
impl ModeHsm {
    #[state]
    fn disabled(&mut self, context: &mut DispatchContext, event: &ModeEvent) -> Outcome<State> {
        match event {
            ModeEvent::Dwell { in_toggle_zone } => {
                if self.register_dwell(*in_toggle_zone) {
                    self.enabled = true;
                    context.change = Some(ModeChange::Enabled);
                    Transition(State::enabled())
                } else {
                    Handled
                }
            }
        }
    }

    #[state]
    fn enabled(&mut self, context: &mut DispatchContext, event: &ModeEvent) -> Outcome<State> {
        match event {
            ModeEvent::Dwell { in_toggle_zone } => {
                if self.register_dwell(*in_toggle_zone) {
                    self.enabled = false;
                    context.change = Some(ModeChange::Disabled);
                    Transition(State::disabled())
                } else {
                    Handled
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
