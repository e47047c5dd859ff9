#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// One read of the panel controller. `z` is the pressure channel and only feeds diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawTouchSample {
    pub x: u16,
    pub y: u16,
    pub z: u16,
    pub detected: bool,
}

impl RawTouchSample {
    pub const fn touched(x: u16, y: u16, z: u16) -> Self {
        Self {
            x,
            y,
            z,
            detected: true,
        }
    }

    pub const fn released() -> Self {
        Self {
            x: 0,
            y: 0,
            z: 0,
            detected: false,
        }
    }

    pub const fn point(&self) -> TouchPoint {
        TouchPoint::new(self.x, self.y)
    }
}

/// Result of the two-sample confirmation. `detected` is only ever true when both reads saw contact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfirmedTouch {
    pub x: u16,
    pub y: u16,
    pub detected: bool,
}

impl ConfirmedTouch {
    pub const fn point(&self) -> TouchPoint {
        TouchPoint::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PositionPair {
    pub previous: TouchPoint,
    pub current: TouchPoint,
}
