//! Inter-task communication channels
//!
//! The UI task owns all watch state; the only thing it hands to another
//! task is a preferences snapshot to persist.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use dial_core::prefs::Preferences;

/// Latest preferences to write to flash (updated by the UI task)
///
/// A newer snapshot replaces one that has not been saved yet.
pub static PREFS_SAVE: Signal<CriticalSectionRawMutex, Preferences> = Signal::new();
