use touchmouse::PointerReport;
use usb_device::{
    bus::{UsbBus, UsbBusAllocator},
    device::{StringDescriptors, UsbDevice, UsbDeviceBuilder, UsbDeviceState, UsbVidPid},
};
use usbd_hid::{
    descriptor::{MouseReport, SerializedDescriptor},
    hid_class::HIDClass,
};

use super::config::{USB_MANUFACTURER, USB_PID, USB_POLL_MS, USB_PRODUCT, USB_SERIAL, USB_VID};

/// HID mouse on the OTG port. `poll` has to run at least every few milliseconds or the host drops
/// the device.
pub(crate) struct UsbMouse<'a, B: UsbBus> {
    device: UsbDevice<'a, B>,
    hid: HIDClass<'a, B>,
}

impl<'a, B: UsbBus> UsbMouse<'a, B> {
    pub(crate) fn new(bus: &'a UsbBusAllocator<B>) -> Self {
        let hid = HIDClass::new(bus, MouseReport::desc(), USB_POLL_MS);
        let device = UsbDeviceBuilder::new(bus, UsbVidPid(USB_VID, USB_PID))
            .strings(&[StringDescriptors::default()
                .manufacturer(USB_MANUFACTURER)
                .product(USB_PRODUCT)
                .serial_number(USB_SERIAL)])
            .expect("failed to set USB strings")
            .device_class(0)
            .build();
        Self { device, hid }
    }

    pub(crate) fn poll(&mut self) {
        let _ = self.device.poll(&mut [&mut self.hid]);
    }

    pub(crate) fn configured(&self) -> bool {
        self.device.state() == UsbDeviceState::Configured
    }

    pub(crate) fn send(&mut self, report: &PointerReport) {
        let [buttons, x, y, wheel] = report.to_boot_bytes();
        let mouse = MouseReport {
            buttons,
            x: x as i8,
            y: y as i8,
            wheel: wheel as i8,
            pan: 0,
        };
        if self.hid.push_input(&mouse).is_err() {
            log::debug!("usb: report dropped");
        }
    }
}
