//! Pad overlay and status text for the 240x320 panel.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};
use u8g2_fonts::{
    fonts,
    types::{FontColor, HorizontalAlignment, VerticalPosition},
    FontRenderer,
};

use crate::control::{
    diagnostics::DiagnosticSnapshot,
    pad::{PadAction, Zone, PAD_ZONES},
    CycleOutcome,
};

const LABEL_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_helvB12_tf>();
const STATUS_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_6x10_tf>();

pub const STATUS_LEFT_X: i32 = 4;
pub const STATUS_TOP_Y: i32 = 10;
pub const STATUS_LINE_HEIGHT: i32 = 14;
/// Band cleared before the status lines are redrawn. Stays above the pad zones.
pub const STATUS_AREA: Rectangle = Rectangle::new(Point::new(0, 0), Size::new(240, 76));

const DISABLED_FILL: Rgb565 = Rgb565::RED;
const ENABLED_FILL: Rgb565 = Rgb565::GREEN;
const TEXT_COLOR: Rgb565 = Rgb565::WHITE;

pub fn zone_label(action: PadAction) -> &'static str {
    match action {
        PadAction::MoveLeft => "<",
        PadAction::MoveUp => "^",
        PadAction::MoveRight => ">",
        PadAction::MoveDown => "v",
        PadAction::ToggleMode => "X",
    }
}

pub fn zone_rect(zone: &Zone) -> Rectangle {
    Rectangle::new(
        Point::new(i32::from(zone.x0), i32::from(zone.y0)),
        Size::new(u32::from(zone.width), u32::from(zone.height)),
    )
}

/// Paints the pad zones. Call it again after every mode transition.
pub fn draw_pad<T>(target: &mut T, enabled: bool) -> Result<(), T::Error>
where
    T: DrawTarget<Color = Rgb565>,
{
    let fill = if enabled { ENABLED_FILL } else { DISABLED_FILL };
    for zone in PAD_ZONES.iter() {
        let rect = zone_rect(zone);
        rect.into_styled(PrimitiveStyle::with_fill(fill))
            .draw(target)?;
        let _ = LABEL_FONT.render_aligned(
            zone_label(zone.action),
            rect.center(),
            VerticalPosition::Center,
            HorizontalAlignment::Center,
            FontColor::Transparent(TEXT_COLOR),
            target,
        );
    }
    Ok(())
}

pub fn draw_diagnostics<T>(target: &mut T, snapshot: &DiagnosticSnapshot) -> Result<(), T::Error>
where
    T: DrawTarget<Color = Rgb565>,
{
    STATUS_AREA
        .into_styled(PrimitiveStyle::with_fill(Rgb565::BLACK))
        .draw(target)?;

    let lines = snapshot.lines();
    for (index, line) in lines.iter().enumerate() {
        let _ = STATUS_FONT.render_aligned(
            line.as_str(),
            Point::new(
                STATUS_LEFT_X,
                STATUS_TOP_Y + index as i32 * STATUS_LINE_HEIGHT,
            ),
            VerticalPosition::Center,
            HorizontalAlignment::Left,
            FontColor::Transparent(TEXT_COLOR),
            target,
        );
    }
    Ok(())
}

/// Keeps the screen in step with the control loop without repainting every cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct PadScreen {
    was_touching: bool,
}

impl PadScreen {
    /// Paints the pad in its start-up (disabled) state and a blank status area.
    pub fn start<T>(&mut self, target: &mut T) -> Result<(), T::Error>
    where
        T: DrawTarget<Color = Rgb565>,
    {
        target.clear(Rgb565::BLACK)?;
        draw_pad(target, false)?;
        draw_diagnostics(target, &DiagnosticSnapshot::default())
    }

    /// Tracks finger lifts. The status lines are due on a mode flip or when the finger lifts.
    pub fn status_due(&mut self, outcome: &CycleOutcome) -> bool {
        let touching = outcome.touch.is_touching();
        let lifted = self.was_touching && !touching;
        self.was_touching = touching;
        outcome.mode_change.is_some() || lifted
    }

    /// Repaints the pad on a mode flip and the status lines when `status_due` said so.
    pub fn repaint<T>(
        &self,
        target: &mut T,
        outcome: &CycleOutcome,
        snapshot: &DiagnosticSnapshot,
        status_due: bool,
    ) -> Result<(), T::Error>
    where
        T: DrawTarget<Color = Rgb565>,
    {
        if let Some(change) = outcome.mode_change {
            draw_pad(target, change.enabled())?;
        }
        if status_due {
            draw_diagnostics(target, snapshot)?;
        }
        Ok(())
    }
}
