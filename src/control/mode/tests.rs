use super::*;

fn controller(policy: DwellPolicy) -> ModeController {
    ModeController::new(&PadConfig {
        step: 10,
        dwell_threshold: 100,
        dwell_policy: policy,
    })
}

fn dwell(controller: &mut ModeController, cycles: u32) -> std::vec::Vec<ModeChange> {
    (0..cycles).filter_map(|_| controller.observe(true)).collect()
}

#[test]
fn starts_disabled_with_empty_dwell() {
    let controller = controller(DwellPolicy::ResetOnExit);
    assert_eq!(controller.state(), ModeState::default());
    assert!(!controller.is_enabled());
}

#[test]
fn ninety_nine_cycles_do_not_toggle() {
    for policy in [DwellPolicy::ResetOnExit, DwellPolicy::Banked] {
        let mut controller = controller(policy);
        assert!(dwell(&mut controller, 99).is_empty());
        assert_eq!(
            controller.state(),
            ModeState {
                enabled: false,
                dwell_count: 99
            }
        );
    }
}

#[test]
fn hundredth_cycle_flips_once_and_clears_dwell() {
    for policy in [DwellPolicy::ResetOnExit, DwellPolicy::Banked] {
        let mut controller = controller(policy);
        let _ = dwell(&mut controller, 99);
        assert_eq!(controller.observe(true), Some(ModeChange::Enabled));
        assert_eq!(
            controller.state(),
            ModeState {
                enabled: true,
                dwell_count: 0
            }
        );
        assert_eq!(controller.observe(true), None);
        assert_eq!(controller.state().dwell_count, 1);
    }
}

#[test]
fn continued_dwell_flips_back() {
    let mut controller = controller(DwellPolicy::ResetOnExit);
    assert_eq!(dwell(&mut controller, 200), std::vec![ModeChange::Enabled, ModeChange::Disabled]);
    assert!(!controller.is_enabled());
    assert_eq!(controller.state().dwell_count, 0);
}

#[test]
fn leaving_zone_resets_dwell_under_reset_on_exit() {
    let mut controller = controller(DwellPolicy::ResetOnExit);
    let _ = dwell(&mut controller, 60);
    assert_eq!(controller.observe(false), None);
    assert_eq!(controller.state().dwell_count, 0);
    assert!(dwell(&mut controller, 60).is_empty());
    assert!(!controller.is_enabled());
}

#[test]
fn leaving_zone_keeps_dwell_under_banked() {
    let mut controller = controller(DwellPolicy::Banked);
    let _ = dwell(&mut controller, 60);
    assert_eq!(controller.observe(false), None);
    assert_eq!(controller.state().dwell_count, 60);
    assert_eq!(dwell(&mut controller, 40), std::vec![ModeChange::Enabled]);
}

#[test]
fn zero_threshold_is_clamped_to_one_cycle() {
    let mut controller = ModeController::new(&PadConfig {
        step: 10,
        dwell_threshold: 0,
        dwell_policy: DwellPolicy::ResetOnExit,
    });
    assert_eq!(controller.observe(true), Some(ModeChange::Enabled));
}
