//! # Preference Persistence and Sync Boundary
//!
//! Display preferences arrive from an external configuration channel as raw
//! key/value pairs and leave this module as typed [`SettingsUpdate`] values
//! folded into [`FaceFlags`]. Validation happens here, at the boundary: an
//! unknown key or an out-of-range value is silently dropped rather than
//! applied, and updates delivered during the first few ticks after startup
//! are ignored outright (the channel tends to replay a stale initial sync,
//! which would make the face flicker through old preferences).
//!
//! Flags are persisted as a small JSON file: loaded once at startup with
//! permissive defaults when absent or corrupt, written back at shutdown.

use crate::FaceFlags;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Ticks after startup during which channel updates are ignored.
/// Anti-flicker guard against the channel replaying a stale initial sync.
pub const STARTUP_GRACE_TICKS: u32 = 5;

/// Default flags file location
const SETTINGS_PATH: &str = "hexface-settings.json";

/// Validation failures at the settings channel boundary.
///
/// These are never fatal; the sync layer drops the offending update and
/// keeps the committed flags unchanged.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    /// Key does not name a known preference
    #[error("unknown setting key: {0}")]
    UnknownKey(u32),

    /// Value is not a boolean 0/1
    #[error("value {value} out of range for {key:?}")]
    OutOfRange { key: SettingKey, value: i32 },
}

/// Closed enumeration of the preference flags the channel may address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingKey {
    LowPower,
    Vibrate,
    Ghost,
    ExtraGhost,
    HourlyChime,
}

impl SettingKey {
    /// Wire key numbering of the configuration channel
    fn from_wire(key: u32) -> Option<Self> {
        match key {
            1 => Some(SettingKey::LowPower),
            2 => Some(SettingKey::Vibrate),
            3 => Some(SettingKey::Ghost),
            4 => Some(SettingKey::ExtraGhost),
            5 => Some(SettingKey::HourlyChime),
            _ => None,
        }
    }
}

/// One validated preference change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub key: SettingKey,
    pub enabled: bool,
}

impl SettingsUpdate {
    /// Validate a raw key/value pair from the channel.
    pub fn parse(key: u32, value: i32) -> Result<Self, SettingsError> {
        let key = SettingKey::from_wire(key).ok_or(SettingsError::UnknownKey(key))?;
        match value {
            0 => Ok(SettingsUpdate {
                key,
                enabled: false,
            }),
            1 => Ok(SettingsUpdate { key, enabled: true }),
            _ => Err(SettingsError::OutOfRange { key, value }),
        }
    }
}

/// Holds the committed flags and enforces the startup grace window.
///
/// The host calls [`note_tick`](SettingsSync::note_tick) once per render tick
/// and feeds channel traffic through [`apply_raw`](SettingsSync::apply_raw);
/// the render pass only ever reads [`flags`](SettingsSync::flags), so updates
/// commit strictly between passes.
#[derive(Debug)]
pub struct SettingsSync {
    flags: FaceFlags,
    ticks_seen: u32,
}

impl SettingsSync {
    pub fn new(flags: FaceFlags) -> Self {
        SettingsSync {
            flags,
            ticks_seen: 0,
        }
    }

    /// Record one elapsed render tick.
    pub fn note_tick(&mut self) {
        self.ticks_seen = self.ticks_seen.saturating_add(1);
    }

    /// Currently committed flags.
    pub fn flags(&self) -> FaceFlags {
        self.flags
    }

    /// Validate and fold in a raw channel update. Invalid updates and
    /// updates inside the startup grace window are silently dropped.
    /// Returns true when the update was applied.
    pub fn apply_raw(&mut self, key: u32, value: i32) -> bool {
        match SettingsUpdate::parse(key, value) {
            Ok(update) => self.apply(update),
            Err(_) => false,
        }
    }

    /// Fold in a validated update, still subject to the grace window.
    pub fn apply(&mut self, update: SettingsUpdate) -> bool {
        if self.ticks_seen < STARTUP_GRACE_TICKS {
            return false;
        }
        let flags = &mut self.flags;
        match update.key {
            SettingKey::LowPower => flags.low_power = update.enabled,
            SettingKey::Vibrate => flags.vibrate = update.enabled,
            SettingKey::Ghost => flags.ghost = update.enabled,
            SettingKey::ExtraGhost => flags.extra_ghost = update.enabled,
            SettingKey::HourlyChime => flags.hourly_chime = update.enabled,
        }
        true
    }
}

/// Load persisted flags, falling back to defaults when the file is missing
/// or unreadable.
pub fn load_flags() -> FaceFlags {
    load_flags_from_path(SETTINGS_PATH)
}

/// Load persisted flags from a specific path.
pub fn load_flags_from_path<P: AsRef<Path>>(path: P) -> FaceFlags {
    match fs::read(path) {
        Ok(data) => serde_json::from_slice(&data).unwrap_or_default(),
        Err(_) => FaceFlags::default(),
    }
}

/// Persist flags for the next startup.
pub fn save_flags(flags: &FaceFlags) -> io::Result<()> {
    save_flags_to_path(flags, SETTINGS_PATH)
}

/// Persist flags to a specific path.
pub fn save_flags_to_path<P: AsRef<Path>>(flags: &FaceFlags, path: P) -> io::Result<()> {
    let data = serde_json::to_vec(flags)?;
    fs::write(path, data)?;
    Ok(())
}
