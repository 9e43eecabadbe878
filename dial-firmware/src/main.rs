//! Dial - Smartwatch Firmware
//!
//! Main firmware binary for RP2040 boards with a round GC9A01 panel and a
//! CST816S touch controller. Startup brings up the peripherals from the
//! loaded configuration, shows a splash and hands everything to the UI
//! task.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_rp::pwm::Pwm;
use embassy_rp::spi::Spi;
use embassy_time::{Delay, Timer};
use embedded_alloc::LlffHeap as Heap;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use dial_core::config::WatchConfig;
use dial_core::context::WatchContext;
use dial_core::traits::{Backlight, Clock};
use dial_drivers::backlight::PwmBacklight;
use dial_drivers::touch::{Cst816s, Cst816sConfig};
use dial_hal::{I2cConfig, Mode, SpiConfig};
use dial_hal_rp2040::bus::{i2c_config, spi_config};
use dial_hal_rp2040::flash::Rp2040FlashStorage;
use dial_hal_rp2040::pwm::backlight_config;

use crate::clock::EmbassyClock;
use crate::config::loader::{log_config_summary, parse_toml};
use crate::config::{load_preferences, ConfigPersistence};
use crate::display::{draw_splash, init_panel, PanelPins, WatchBacklight};
use crate::tasks::UiResources;

mod board;
mod channels;
mod clock;
mod config;
mod display;
mod tasks;

// postcard is built with alloc support, which needs an allocator
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 4KB
const HEAP_SIZE: usize = 4 * 1024;

/// Embedded default configuration (compiled into firmware)
/// Edit watch.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../watch.toml");

/// mipidsi command buffer size
const DISPLAY_BUFFER_SIZE: usize = 512;

bind_interrupts!(struct Irqs {
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
});

// Static cell for the panel command buffer (must live forever)
static DISPLAY_BUF: StaticCell<[u8; DISPLAY_BUFFER_SIZE]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Dial firmware starting...");

    // Initialize heap allocator
    init_heap();

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Configuration: flash override, then embedded watch.toml, then defaults
    let mut persistence = ConfigPersistence::new(Rp2040FlashStorage::new(p.FLASH, p.DMA_CH0));
    let config = match persistence.load().await {
        Ok(config) => {
            info!("Loaded configuration from flash");
            config
        }
        Err(_) => {
            info!("No valid configuration in flash, using embedded defaults");
            create_default_config()
        }
    };
    board::check_wiring(&config.display);

    let prefs = load_preferences(persistence.storage(), config.default_preferences()).await;
    let storage = persistence.into_storage();

    let hw = &config.display;

    // Panel on SPI1
    let mode = Mode::from_index(hw.bus.spi_mode).unwrap_or(Mode::Mode0);
    let bus = SpiConfig::new(mode, hw.bus.freq_write, hw.bus.freq_read);
    let spi = Spi::new_blocking(p.SPI1, p.PIN_10, p.PIN_11, p.PIN_12, spi_config(&bus));
    let pins = PanelPins {
        cs: Output::new(p.PIN_9, Level::High),
        dc: Output::new(p.PIN_8, Level::Low),
        rst: Output::new(p.PIN_13, Level::High),
    };
    let buffer = DISPLAY_BUF.init([0; DISPLAY_BUFFER_SIZE]);
    let mut display = match init_panel(spi, pins, &hw.panel, prefs.rotation(), buffer) {
        Ok(display) => display,
        Err(e) => defmt::panic!("Display unavailable: {:?}", e),
    };
    info!("Panel initialized");

    // Backlight on PWM slice 4, channel B
    let sys_hz = embassy_rp::clocks::clk_sys_freq();
    let pwm = Pwm::new_output_b(
        p.PWM_SLICE4,
        p.PIN_25,
        backlight_config(sys_hz, hw.light.freq),
    );
    let (_, channel_b) = pwm.split();
    let Some(output) = channel_b else {
        defmt::panic!("Backlight PWM channel unavailable");
    };
    let mut backlight = match PwmBacklight::new(output, hw.light.invert) {
        Ok(backlight) => WatchBacklight::new(backlight),
        Err(e) => defmt::panic!("Backlight PWM rejected: {:?}", Debug2Format(&e)),
    };

    // Touch on I2C1
    let i2c = I2c::new_async(
        p.I2C1,
        p.PIN_7,
        p.PIN_6,
        Irqs,
        i2c_config(&I2cConfig::with_frequency(hw.touch.freq)),
    );
    let mut touch = Cst816s::new(
        i2c,
        Output::new(p.PIN_22, Level::High),
        Cst816sConfig::from_hw(&hw.touch, &hw.panel),
    );
    match touch.init(&mut Delay).await {
        Ok(id) => info!("CST816S ready, chip id {=u8:#x}", id),
        // Polls keep failing and read as "released"; the watch still runs
        Err(e) => error!("Touch init failed: {:?}", Debug2Format(&e)),
    }
    touch.set_rotation(prefs.rotation());

    // Splash
    if let Err(e) = draw_splash(&mut display, hw.panel.width, hw.panel.height) {
        warn!("Splash draw failed: {:?}", Debug2Format(&e));
    }
    backlight.set_brightness(config.ui.splash_brightness);
    Timer::after_millis(u64::from(config.ui.splash_ms)).await;
    backlight.set_brightness(prefs.brightness);

    let context = WatchContext::new(EmbassyClock.now_ms(), &prefs)
        .with_brightness_step(config.ui.brightness_step)
        .with_width(hw.panel.width);

    let resources = UiResources {
        context,
        display,
        touch,
        backlight,
        config,
    };

    // Spawn tasks
    spawner.spawn(tasks::ui_task(resources)).unwrap();
    spawner.spawn(tasks::prefs_task(storage, prefs)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}

/// Create the embedded default configuration
///
/// Parses the watch.toml file that was embedded at compile time. The
/// built-in board defaults are the last resort.
fn create_default_config() -> WatchConfig {
    match parse_toml(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            log_config_summary(&config);
            config
        }
        Err(e) => {
            // build.rs validates watch.toml, so this means a parser mismatch
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using built-in board defaults");
            WatchConfig::new()
        }
    }
}
