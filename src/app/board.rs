use esp_hal::gpio::{Input, Level, Output};
use touchmouse::{
    drivers::ft6x06::TouchPanel,
    platform::{BusyDelay, DelayOps, HalI2c},
    ControlIo, Indicator, PointerReport, RawTouchSample,
};
use usb_device::bus::UsbBus;

use super::usb::UsbMouse;

pub(crate) struct Board<'a, B: UsbBus> {
    pub(crate) touch: TouchPanel<HalI2c<'static>>,
    pub(crate) usb: UsbMouse<'a, B>,
    /// Active low.
    pub(crate) button: Input<'static>,
    pub(crate) activity_led: Output<'static>,
    pub(crate) connected_led: Output<'static>,
    pub(crate) delay: BusyDelay,
}

impl<B: UsbBus> Board<'_, B> {
    fn led(&mut self, indicator: Indicator) -> &mut Output<'static> {
        match indicator {
            Indicator::Activity => &mut self.activity_led,
            Indicator::Connected => &mut self.connected_led,
        }
    }
}

impl<B: UsbBus> ControlIo for Board<'_, B> {
    fn poll_touch(&mut self) -> RawTouchSample {
        self.usb.poll();
        self.touch.poll()
    }

    fn sink_connected(&mut self) -> bool {
        self.usb.poll();
        self.usb.configured()
    }

    fn send_report(&mut self, report: &PointerReport) {
        self.usb.send(report);
    }

    // Sliced so the USB stack keeps getting polled while the loop waits.
    fn sleep_ms(&mut self, millis: u32) {
        for _ in 0..millis {
            self.delay.delay_ms(1);
            self.usb.poll();
        }
    }

    fn button_pressed(&mut self) -> bool {
        self.button.is_low()
    }

    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        self.led(indicator).set_level(Level::from(on));
    }

    fn toggle_indicator(&mut self, indicator: Indicator) {
        self.led(indicator).toggle();
    }
}
