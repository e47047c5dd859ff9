use super::{motion::MotionDelta, types::TouchPoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PadAction {
    MoveLeft,
    MoveUp,
    MoveRight,
    MoveDown,
    ToggleMode,
}

impl PadAction {
    /// Unit step of a directional zone; `None` for the toggle zone.
    pub fn step(self, step: i8) -> Option<MotionDelta> {
        match self {
            Self::MoveLeft => Some(MotionDelta::new(step.saturating_neg(), 0)),
            Self::MoveUp => Some(MotionDelta::new(0, step.saturating_neg())),
            Self::MoveRight => Some(MotionDelta::new(step, 0)),
            Self::MoveDown => Some(MotionDelta::new(0, step)),
            Self::ToggleMode => None,
        }
    }
}

/// Screen-space rectangle, origin top-left. Both edges are inside: a 60 px zone spans 61 columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Zone {
    pub x0: u16,
    pub y0: u16,
    pub width: u16,
    pub height: u16,
    pub action: PadAction,
}

impl Zone {
    pub const fn new(x0: u16, y0: u16, width: u16, height: u16, action: PadAction) -> Self {
        Self {
            x0,
            y0,
            width,
            height,
            action,
        }
    }

    pub fn contains(&self, point: TouchPoint) -> bool {
        let x = u32::from(point.x);
        let y = u32::from(point.y);
        let x0 = u32::from(self.x0);
        let y0 = u32::from(self.y0);
        x >= x0 && x <= x0 + u32::from(self.width) && y >= y0 && y <= y0 + u32::from(self.height)
    }
}

/// Reference layout for the 240x320 panel. Order matters, see [`hit_test`].
pub const PAD_ZONES: [Zone; 5] = [
    Zone::new(0, 200, 60, 60, PadAction::MoveLeft),
    Zone::new(90, 140, 60, 60, PadAction::MoveUp),
    Zone::new(180, 200, 60, 60, PadAction::MoveRight),
    Zone::new(90, 260, 60, 60, PadAction::MoveDown),
    Zone::new(105, 215, 30, 30, PadAction::ToggleMode),
];

/// Checks every zone; when zones overlap, the last match in slice order wins.
pub fn hit_test(zones: &[Zone], point: TouchPoint) -> Option<PadAction> {
    zones
        .iter()
        .rev()
        .find(|zone| zone.contains(point))
        .map(|zone| zone.action)
}

/// Motion a pad cycle reports: the zone step, or nothing when no directional zone is hit.
pub fn pad_motion(action: Option<PadAction>, step: i8) -> MotionDelta {
    action
        .and_then(|action| action.step(step))
        .unwrap_or_default()
}
