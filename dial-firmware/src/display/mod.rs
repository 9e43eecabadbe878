//! GC9A01 panel setup, screen drawing and backlight

pub mod backlight;
pub mod panel;
pub mod renderer;

pub use backlight::WatchBacklight;
pub use panel::{init_panel, set_rotation, PanelError, PanelPins, PanelSpi, WatchDisplay};
pub use renderer::{draw_screen, draw_splash};
