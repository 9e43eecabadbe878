//! GC9A01 panel bring-up
//!
//! The panel sits on SPI1 behind an exclusive chip select; `mipidsi`
//! drives the controller. The PanelConfig flags (inversion, colour order,
//! size, offsets) are applied at init.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::interface::SpiInterface;
use mipidsi::models::GC9A01;
use mipidsi::options::{ColorInversion, ColorOrder, Orientation, Rotation};
use mipidsi::{Builder, Display};

use dial_core::config::PanelConfig;
use dial_core::prefs::ROTATION_COUNT;

/// Blocking SPI bus the panel is wired to
pub type PanelSpi = Spi<'static, SPI1, Blocking>;

/// The initialised panel
pub type WatchDisplay = Display<
    SpiInterface<'static, ExclusiveDevice<PanelSpi, Output<'static>, NoDelay>, Output<'static>>,
    GC9A01,
    Output<'static>,
>;

/// Control pins besides the SPI bus
pub struct PanelPins {
    /// Chip select (active low)
    pub cs: Output<'static>,
    /// Data/command select
    pub dc: Output<'static>,
    /// Hardware reset
    pub rst: Output<'static>,
}

/// Panel bring-up failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Controller init sequence failed
    Init,
    /// Orientation command failed
    Orientation,
}

/// Reset and initialise the panel
///
/// `rotation` is the user rotation in quarter turns; the mounting
/// rotation from the config is added to it.
pub fn init_panel(
    spi: PanelSpi,
    pins: PanelPins,
    config: &PanelConfig,
    rotation: u8,
    buffer: &'static mut [u8],
) -> Result<WatchDisplay, PanelError> {
    let PanelPins { cs, dc, rst } = pins;

    let spi_device = ExclusiveDevice::new(spi, cs, NoDelay).unwrap_or_else(|e| match e {});
    let di = SpiInterface::new(spi_device, dc, buffer);

    let inversion = if config.invert {
        ColorInversion::Inverted
    } else {
        ColorInversion::Normal
    };
    let order = if config.bgr {
        ColorOrder::Bgr
    } else {
        ColorOrder::Rgb
    };

    let mut delay = Delay;
    Builder::new(GC9A01, di)
        .display_size(config.width, config.height)
        .display_offset(config.offset_x, config.offset_y)
        .orientation(orientation(config, rotation))
        .invert_colors(inversion)
        .color_order(order)
        .reset_pin(rst)
        .init(&mut delay)
        .map_err(|e| {
            error!("Panel init failed: {:?}", Debug2Format(&e));
            PanelError::Init
        })
}

/// Apply a new user rotation
pub fn set_rotation(
    display: &mut WatchDisplay,
    config: &PanelConfig,
    rotation: u8,
) -> Result<(), PanelError> {
    display
        .set_orientation(orientation(config, rotation))
        .map_err(|_| PanelError::Orientation)
}

fn orientation(config: &PanelConfig, rotation: u8) -> Orientation {
    let quarter_turns = config.offset_rotation.wrapping_add(rotation) % ROTATION_COUNT;
    let rotation = match quarter_turns {
        0 => Rotation::Deg0,
        1 => Rotation::Deg90,
        2 => Rotation::Deg180,
        _ => Rotation::Deg270,
    };
    Orientation::new().rotate(rotation)
}
