use super::{config::MotionConfig, types::PositionPair};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionDelta {
    pub dx: i8,
    pub dy: i8,
    pub wheel: i8,
}

impl MotionDelta {
    pub const fn new(dx: i8, dy: i8) -> Self {
        Self { dx, dy, wheel: 0 }
    }
}

/// Relative displacement between the confirmed positions. No scroll support: `wheel` stays 0.
pub fn translate(positions: &PositionPair, config: &MotionConfig) -> MotionDelta {
    MotionDelta::new(
        axis_delta(
            positions.current.x,
            positions.previous.x,
            config.dead_zone,
            config.modulus_x,
        ),
        axis_delta(
            positions.current.y,
            positions.previous.y,
            config.dead_zone,
            config.modulus_y,
        ),
    )
}

// Truncating remainder, then narrowed with wrap-around into the signed report byte.
fn axis_delta(current: u16, previous: u16, dead_zone: u16, modulus: u16) -> i8 {
    let delta = i32::from(current) - i32::from(previous);
    if delta.unsigned_abs() <= u32::from(dead_zone) || modulus == 0 {
        return 0;
    }
    (delta % i32::from(modulus)) as i8
}
