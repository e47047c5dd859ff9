mod board;
mod config;
mod usb;

use core::ptr::addr_of_mut;

use esp_hal::{
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    i2c::master::{Config as I2cConfig, I2c, SoftwareTimeout},
    otg_fs::{Usb, UsbBus},
    spi::{
        master::{Config as SpiConfig, Spi},
        Mode as SpiMode,
    },
    time::{Duration, Rate},
};
use log::{info, warn, LevelFilter};
use touchmouse::{
    control::diagnostics::DiagnosticSnapshot,
    drivers::{ft6x06::TouchPanel, ili9341::Ili9341},
    platform::{BusyDelay, DelayOps, HalDisplayBus, HalI2c},
    ui::PadScreen,
    ControlLoop,
};
use usb_device::bus::UsbBusAllocator;

use self::{
    board::Board,
    config::{
        DISPLAY_RESET_PULSE_MS, DISPLAY_SPI_MHZ, I2C_FREQ_KHZ, I2C_TIMEOUT_MS,
        USB_EP_MEMORY_WORDS,
    },
    usb::UsbMouse,
};

static mut EP_MEMORY: [u32; USB_EP_MEMORY_WORDS] = [0; USB_EP_MEMORY_WORDS];

pub(crate) fn run() -> ! {
    esp_println::logger::init_logger(LevelFilter::Info);
    let peripherals = esp_hal::init(esp_hal::Config::default());

    let i2c_cfg = I2cConfig::default()
        .with_frequency(Rate::from_khz(I2C_FREQ_KHZ))
        .with_software_timeout(SoftwareTimeout::Transaction(Duration::from_millis(
            I2C_TIMEOUT_MS,
        )));
    let i2c = I2c::new(peripherals.I2C0, i2c_cfg)
        .expect("failed to init I2C0")
        .with_sda(peripherals.GPIO8)
        .with_scl(peripherals.GPIO9);
    let mut touch = TouchPanel::new(HalI2c::new(i2c));
    match touch.chip_id() {
        Ok(id) => info!("touch: controller id={:#04x}", id),
        Err(_) => warn!("touch: controller not answering, polling anyway"),
    }

    let delay = BusyDelay::new();
    let spi_cfg = SpiConfig::default()
        .with_frequency(Rate::from_mhz(DISPLAY_SPI_MHZ))
        .with_mode(SpiMode::_0);
    let spi = Spi::new(peripherals.SPI2, spi_cfg)
        .expect("failed to init SPI2 for the panel")
        .with_sck(peripherals.GPIO12)
        .with_mosi(peripherals.GPIO11);
    let dc = Output::new(peripherals.GPIO13, Level::Low, OutputConfig::default());
    let cs = Output::new(peripherals.GPIO10, Level::High, OutputConfig::default());
    let mut panel_reset = Output::new(peripherals.GPIO14, Level::Low, OutputConfig::default());
    let _backlight = Output::new(peripherals.GPIO21, Level::High, OutputConfig::default());
    delay.delay_ms(DISPLAY_RESET_PULSE_MS);
    panel_reset.set_high();

    let mut screen = PadScreen::default();
    let mut display = Some(Ili9341::new(HalDisplayBus::new(spi, dc, cs)));
    if let Some(panel) = display.as_mut() {
        if panel.init(&delay).and_then(|()| screen.start(panel)).is_err() {
            warn!("display: bring-up failed, running headless");
            display = None;
        }
    }

    let button = Input::new(peripherals.GPIO0, InputConfig::default().with_pull(Pull::Up));
    let activity_led = Output::new(peripherals.GPIO4, Level::Low, OutputConfig::default());
    let connected_led = Output::new(peripherals.GPIO5, Level::Low, OutputConfig::default());

    let usb = Usb::new(peripherals.USB0, peripherals.GPIO20, peripherals.GPIO19);
    // SAFETY: `run` is entered once and never returns, so this is the only reference.
    let ep_memory = unsafe { &mut *addr_of_mut!(EP_MEMORY) };
    let bus = UsbBusAllocator::new(UsbBus::new(usb, ep_memory));

    let mut board = Board {
        touch,
        usb: UsbMouse::new(&bus),
        button,
        activity_led,
        connected_led,
        delay,
    };

    let mut control = ControlLoop::default();
    let config = control.config();
    info!(
        "control: settle={}ms interval={}ms dwell={} step={}",
        config.debounce.settle_ms,
        config.report.interval_ms,
        config.pad.dwell_threshold,
        config.pad.step
    );

    control.run_observed(&mut board, |outcome, snapshot| {
        let status_due = screen.status_due(outcome);
        if let Some(panel) = display.as_mut() {
            if screen.repaint(panel, outcome, snapshot, status_due).is_err() {
                warn!("display: write failed, running headless");
                display = None;
            }
        }
        // Only on status updates; a dump per cycle would stall the loop on UART.
        if status_due {
            dump_diagnostics(snapshot);
        }
    });
}

fn dump_diagnostics(snapshot: &DiagnosticSnapshot) {
    for line in snapshot.lines().iter() {
        esp_println::println!("{}", line.as_str());
    }
    esp_println::println!("pad: {}", if snapshot.enabled { "on" } else { "off" });
}
