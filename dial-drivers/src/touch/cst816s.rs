//! CST816S capacitive touch controller
//!
//! Single-finger controller with on-chip gesture detection, found on most
//! round 240x240 display modules.
//!
//! # I2C Protocol
//!
//! Registers are read by writing the start address and reading back a
//! block. One poll reads six bytes from 0x01:
//! - Gesture ID
//! - Finger count (0 or 1)
//! - X high nibble, X low byte
//! - Y high nibble, Y low byte
//!
//! The gesture register keeps its value after the finger lifts, and swipes
//! are often only reported once the finger is gone. The driver reports
//! such a gesture once, as a touch at the last position.

use dial_core::config::{PanelConfig, TouchConfig};
use dial_core::traits::{Gesture, TouchInput, TouchPoint};
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

/// CST816S register addresses
pub mod reg {
    /// Detected gesture
    pub const GESTURE_ID: u8 = 0x01;
    /// Number of fingers on the panel
    pub const FINGER_NUM: u8 = 0x02;
    /// X position high nibble
    pub const XPOS_H: u8 = 0x03;
    /// Chip identification
    pub const CHIP_ID: u8 = 0xA7;
    /// Automatic low-power mode (non-zero disables it)
    pub const DIS_AUTO_SLEEP: u8 = 0xFE;
}

/// Factory 7-bit address
pub const DEFAULT_ADDRESS: u8 = 0x15;

/// Chip IDs reported by CST816S variants
pub const CHIP_IDS: [u8; 3] = [0xB4, 0xB5, 0xB6];

/// Reset pulse length in ms
const RESET_LOW_MS: u32 = 10;

/// Boot time after reset in ms
const RESET_BOOT_MS: u32 = 50;

/// Bytes read per poll, starting at `reg::GESTURE_ID`
const REPORT_LEN: usize = 6;

/// Touch driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError<E> {
    /// I2C transfer failed
    Bus(E),
    /// Reset pin could not be driven
    Reset,
    /// Device answered with an unexpected chip ID
    UnknownChip(u8),
}

impl<E> From<E> for TouchError<E> {
    fn from(e: E) -> Self {
        TouchError::Bus(e)
    }
}

/// CST816S driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cst816sConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Raw coordinate range
    pub x_min: u16,
    pub x_max: u16,
    pub y_min: u16,
    pub y_max: u16,
    /// Panel size the coordinates are scaled to
    pub width: u16,
    pub height: u16,
    /// Touch panel mounting rotation in quarter turns
    pub offset_rotation: u8,
}

impl Default for Cst816sConfig {
    fn default() -> Self {
        Self::from_hw(&TouchConfig::default(), &PanelConfig::default())
    }
}

impl Cst816sConfig {
    /// Build from the board description
    pub fn from_hw(touch: &TouchConfig, panel: &PanelConfig) -> Self {
        Self {
            address: touch.address,
            x_min: touch.x_min,
            x_max: touch.x_max,
            y_min: touch.y_min,
            y_max: touch.y_max,
            width: panel.width,
            height: panel.height,
            offset_rotation: touch.offset_rotation,
        }
    }
}

/// Decoded register block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawReport {
    pub gesture: Gesture,
    pub fingers: u8,
    pub x: u16,
    pub y: u16,
}

impl RawReport {
    /// Decode the six bytes read from `reg::GESTURE_ID`
    pub fn decode(buf: &[u8; REPORT_LEN]) -> Self {
        Self {
            gesture: gesture_from_id(buf[0]),
            fingers: buf[1] & 0x0F,
            x: (u16::from(buf[2] & 0x0F) << 8) | u16::from(buf[3]),
            y: (u16::from(buf[4] & 0x0F) << 8) | u16::from(buf[5]),
        }
    }
}

/// Map a gesture register value
pub fn gesture_from_id(id: u8) -> Gesture {
    match id {
        0x01 => Gesture::SwipeUp,
        0x02 => Gesture::SwipeDown,
        0x03 => Gesture::SwipeLeft,
        0x04 => Gesture::SwipeRight,
        0x05 => Gesture::Click,
        0x0B => Gesture::DoubleClick,
        0x0C => Gesture::LongPress,
        _ => Gesture::None,
    }
}

/// Turn a swipe direction by quarter turns clockwise
pub fn rotate_gesture(gesture: Gesture, quarter_turns: u8) -> Gesture {
    let mut gesture = gesture;
    for _ in 0..quarter_turns % 4 {
        gesture = match gesture {
            Gesture::SwipeUp => Gesture::SwipeRight,
            Gesture::SwipeRight => Gesture::SwipeDown,
            Gesture::SwipeDown => Gesture::SwipeLeft,
            Gesture::SwipeLeft => Gesture::SwipeUp,
            other => other,
        };
    }
    gesture
}

/// CST816S touch controller
pub struct Cst816s<I2C, RST> {
    i2c: I2C,
    rst: RST,
    config: Cst816sConfig,
    /// User rotation in quarter turns, added to the mounting rotation
    rotation: u8,
    /// Gesture reported last, cleared when the register reads none
    last_gesture: Gesture,
}

impl<I2C, RST> Cst816s<I2C, RST>
where
    I2C: I2c,
    RST: OutputPin,
{
    /// Create a new driver
    ///
    /// Call [`Cst816s::init`] before polling.
    pub fn new(i2c: I2C, rst: RST, config: Cst816sConfig) -> Self {
        Self {
            i2c,
            rst,
            config,
            rotation: 0,
            last_gesture: Gesture::None,
        }
    }

    /// Reset the chip, check its ID and keep it awake for polling
    ///
    /// Returns the chip ID.
    pub async fn init(&mut self, delay: &mut impl DelayNs) -> Result<u8, TouchError<I2C::Error>> {
        self.rst.set_low().map_err(|_| TouchError::Reset)?;
        delay.delay_ms(RESET_LOW_MS).await;
        self.rst.set_high().map_err(|_| TouchError::Reset)?;
        delay.delay_ms(RESET_BOOT_MS).await;

        let id = self.read_register(reg::CHIP_ID).await?;
        if !CHIP_IDS.contains(&id) {
            return Err(TouchError::UnknownChip(id));
        }

        self.i2c
            .write(self.config.address, &[reg::DIS_AUTO_SLEEP, 0x01])
            .await?;
        self.last_gesture = Gesture::None;
        Ok(id)
    }

    /// Set the user rotation in quarter turns
    pub fn set_rotation(&mut self, rotation: u8) {
        self.rotation = rotation % 4;
    }

    /// Get the user rotation
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Poll the controller
    ///
    /// Returns the touch in panel coordinates while a finger is down, a
    /// single report for a gesture that completed after lift-off, and
    /// `None` otherwise.
    pub async fn read(&mut self) -> Result<Option<TouchPoint>, TouchError<I2C::Error>> {
        let mut buf = [0u8; REPORT_LEN];
        self.i2c
            .write_read(self.config.address, &[reg::GESTURE_ID], &mut buf)
            .await?;
        let report = RawReport::decode(&buf);

        if report.gesture == Gesture::None {
            self.last_gesture = Gesture::None;
        }

        let released_gesture =
            report.gesture != Gesture::None && report.gesture != self.last_gesture;
        if report.fingers == 0 && !released_gesture {
            return Ok(None);
        }

        self.last_gesture = report.gesture;
        Ok(Some(self.transform(&report)))
    }

    /// Scale raw coordinates to the panel and apply rotation
    fn transform(&self, report: &RawReport) -> TouchPoint {
        let cfg = &self.config;
        let x = scale(report.x, cfg.x_min, cfg.x_max, cfg.width);
        let y = scale(report.y, cfg.y_min, cfg.y_max, cfg.height);
        let turns = (cfg.offset_rotation + self.rotation) % 4;

        let w = cfg.width.saturating_sub(1);
        let h = cfg.height.saturating_sub(1);
        let (x, y) = match turns {
            1 => (w.saturating_sub(y), x),
            2 => (w.saturating_sub(x), h.saturating_sub(y)),
            3 => (y, h.saturating_sub(x)),
            _ => (x, y),
        };

        TouchPoint::new(x, y).with_gesture(rotate_gesture(report.gesture, turns))
    }

    async fn read_register(&mut self, register: u8) -> Result<u8, TouchError<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.config.address, &[register], &mut buf)
            .await?;
        Ok(buf[0])
    }

    /// Release the bus and reset pin
    pub fn release(self) -> (I2C, RST) {
        (self.i2c, self.rst)
    }
}

/// Map `raw` from `min..max` onto `0..size`, clamped to the panel
fn scale(raw: u16, min: u16, max: u16, size: u16) -> u16 {
    let span = u32::from(max.saturating_sub(min)).max(1);
    let offset = u32::from(raw.saturating_sub(min));
    let scaled = offset * u32::from(size) / span;
    let limit = u32::from(size.saturating_sub(1));
    scaled.min(limit) as u16
}

impl<I2C, RST> TouchInput for Cst816s<I2C, RST>
where
    I2C: I2c,
    RST: OutputPin,
{
    type Error = TouchError<I2C::Error>;

    async fn read_touch(&mut self) -> Result<Option<TouchPoint>, Self::Error> {
        self.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embassy_futures::block_on;
    use embedded_hal::i2c::{ErrorKind, Operation};

    /// Register file behind a fake I2C bus
    struct MockI2c {
        regs: [u8; 256],
        pointer: u8,
        fail: bool,
    }

    impl MockI2c {
        fn new() -> Self {
            let mut regs = [0u8; 256];
            regs[reg::CHIP_ID as usize] = 0xB5;
            Self {
                regs,
                pointer: 0,
                fail: false,
            }
        }

        fn set_report(&mut self, gesture: u8, fingers: u8, x: u16, y: u16) {
            self.regs[1] = gesture;
            self.regs[2] = fingers;
            self.regs[3] = (x >> 8) as u8 | 0x40;
            self.regs[4] = x as u8;
            self.regs[5] = (y >> 8) as u8;
            self.regs[6] = y as u8;
        }
    }

    impl embedded_hal_async::i2c::ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl I2c for MockI2c {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), ErrorKind> {
            if self.fail || address != DEFAULT_ADDRESS {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        if let Some((first, rest)) = bytes.split_first() {
                            self.pointer = *first;
                            for (i, b) in rest.iter().enumerate() {
                                self.regs[usize::from(*first) + i] = *b;
                            }
                        }
                    }
                    Operation::Read(buf) => {
                        let start = usize::from(self.pointer);
                        buf.copy_from_slice(&self.regs[start..start + buf.len()]);
                    }
                }
            }
            Ok(())
        }
    }

    /// Mock reset pin recording its transitions
    struct MockPin {
        toggles: u8,
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            self.toggles += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            self.toggles += 1;
            Ok(())
        }
    }

    struct MockDelay {
        total_ms: u32,
    }

    impl DelayNs for MockDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.total_ms += ns / 1_000_000;
        }
    }

    fn driver() -> Cst816s<MockI2c, MockPin> {
        Cst816s::new(
            MockI2c::new(),
            MockPin {
                toggles: 0,
                high: false,
            },
            Cst816sConfig::default(),
        )
    }

    #[test]
    fn test_decode_report() {
        let report = RawReport::decode(&[0x05, 0x01, 0x4F, 0x20, 0x01, 0x02]);
        assert_eq!(report.gesture, Gesture::Click);
        assert_eq!(report.fingers, 1);
        assert_eq!(report.x, 0xF20);
        assert_eq!(report.y, 0x102);
    }

    #[test]
    fn test_gesture_ids() {
        assert_eq!(gesture_from_id(0x00), Gesture::None);
        assert_eq!(gesture_from_id(0x01), Gesture::SwipeUp);
        assert_eq!(gesture_from_id(0x04), Gesture::SwipeRight);
        assert_eq!(gesture_from_id(0x0B), Gesture::DoubleClick);
        assert_eq!(gesture_from_id(0x0C), Gesture::LongPress);
        assert_eq!(gesture_from_id(0x7F), Gesture::None);
    }

    #[test]
    fn test_rotate_gesture() {
        assert_eq!(rotate_gesture(Gesture::SwipeUp, 1), Gesture::SwipeRight);
        assert_eq!(rotate_gesture(Gesture::SwipeLeft, 2), Gesture::SwipeRight);
        assert_eq!(rotate_gesture(Gesture::SwipeDown, 4), Gesture::SwipeDown);
        assert_eq!(rotate_gesture(Gesture::Click, 3), Gesture::Click);
    }

    #[test]
    fn test_scale() {
        assert_eq!(scale(0, 0, 240, 240), 0);
        assert_eq!(scale(120, 0, 240, 240), 120);
        assert_eq!(scale(400, 0, 240, 240), 239);
        assert_eq!(scale(50, 0, 100, 240), 120);
        // Degenerate range does not divide by zero
        assert_eq!(scale(10, 5, 5, 240), 239);
    }

    #[test]
    fn test_init_resets_and_checks_id() {
        block_on(async {
            let mut touch = driver();
            let mut delay = MockDelay { total_ms: 0 };
            assert_eq!(touch.init(&mut delay).await, Ok(0xB5));
            assert_eq!(delay.total_ms, 60);
            assert_eq!(touch.i2c.regs[reg::DIS_AUTO_SLEEP as usize], 0x01);
            let (_, pin) = touch.release();
            assert!(pin.high);
            assert_eq!(pin.toggles, 2);
        });
    }

    #[test]
    fn test_init_unknown_chip() {
        block_on(async {
            let mut touch = driver();
            touch.i2c.regs[reg::CHIP_ID as usize] = 0x20;
            let mut delay = MockDelay { total_ms: 0 };
            assert_eq!(
                touch.init(&mut delay).await,
                Err(TouchError::UnknownChip(0x20))
            );
        });
    }

    #[test]
    fn test_read_pressed_and_released() {
        block_on(async {
            let mut touch = driver();
            touch.i2c.set_report(0x00, 1, 30, 200);
            assert_eq!(touch.read().await, Ok(Some(TouchPoint::new(30, 200))));

            touch.i2c.set_report(0x00, 0, 30, 200);
            assert_eq!(touch.read().await, Ok(None));
        });
    }

    #[test]
    fn test_gesture_after_lift_reported_once() {
        block_on(async {
            let mut touch = driver();
            touch.i2c.set_report(0x03, 0, 10, 120);
            let point = touch.read().await.unwrap().unwrap();
            assert_eq!(point.gesture, Gesture::SwipeLeft);

            // Register still latched
            assert_eq!(touch.read().await, Ok(None));

            // Cleared, then the same swipe again
            touch.i2c.set_report(0x00, 0, 10, 120);
            assert_eq!(touch.read().await, Ok(None));
            touch.i2c.set_report(0x03, 0, 10, 120);
            assert!(touch.read().await.unwrap().is_some());
        });
    }

    #[test]
    fn test_rotation_applied() {
        block_on(async {
            let mut touch = driver();
            touch.set_rotation(1);
            touch.i2c.set_report(0x01, 1, 10, 20);
            let point = touch.read().await.unwrap().unwrap();
            assert_eq!((point.x, point.y), (219, 10));
            assert_eq!(point.gesture, Gesture::SwipeRight);

            touch.set_rotation(6);
            assert_eq!(touch.rotation(), 2);
            touch.i2c.set_report(0x00, 1, 10, 20);
            let point = touch.read().await.unwrap().unwrap();
            assert_eq!((point.x, point.y), (229, 219));
        });
    }

    #[test]
    fn test_bus_error() {
        block_on(async {
            let mut touch = driver();
            touch.i2c.fail = true;
            assert_eq!(touch.read().await, Err(TouchError::Bus(ErrorKind::Other)));
        });
    }

    #[test]
    fn test_read_through_trait() {
        async fn poll<T: TouchInput>(t: &mut T) -> bool {
            matches!(t.read_touch().await, Ok(Some(_)))
        }

        block_on(async {
            let mut touch = driver();
            touch.i2c.set_report(0x05, 1, 120, 120);
            assert!(poll(&mut touch).await);
        });
    }
}
