//! # Hexface Core Library
//!
//! This library renders a hexadecimal digital watchface onto a fixed-size
//! 144×168 monochrome pixel surface, refreshed once per second. Hours and
//! minutes are drawn as large hex glyphs, day/month indicators as small hex
//! glyphs, seconds and battery level as counted tick bars.
//!
//! ## Design Philosophy
//!
//! ### Pure layout, injected effects
//! - **Layout is a pure function**: every tick, glyph positions are recomputed
//!   from scratch out of the snapshot's numeric fields by proportional
//!   interpolation along fixed horizontal tracks. Nothing is cached between
//!   ticks.
//! - **Smear randomness is injected**: the only stateful collaborator of the
//!   render pass is a pseudo-random source, passed in at construction so tests
//!   can seed it deterministically and assert exact corruption counts.
//! - **Drawing goes through a sink**: all pixel output is issued against the
//!   [`surface::SurfaceSink`] trait. The host decides whether that sink is a
//!   real display driver, an [`embedded_graphics`] draw target, or the
//!   in-memory [`surface::FrameBuffer`] used for terminal preview and tests.
//!
//! ### The smear
//! The face's signature effect is "smearing": each glyph is repeated to the
//! left of its primary position in a decaying trail, with every repetition
//! overlaid by a growing number of randomly placed white pixels. The effect
//! imitates grayscale motion blur on slow panels; see [`smear`] for the exact
//! stepping and corruption rules.
//!
//! ## Data Flow
//! 1. **Tick**: the host resolves wall clock + battery + connectivity into one
//!    [`RenderSnapshot`]
//! 2. **Layout**: [`layout::glyph_tracks`] maps the snapshot onto glyph tracks
//! 3. **Draw**: [`renderer::Watchface::render_tick`] issues primary and ghost
//!    draws plus the tick bars, and reports non-visual effects (haptic pulses)
//!    back to the host
//!
//! ## Core Types
//!
//! The library exports two value types shared by every module:
//! - [`RenderSnapshot`]: one tick's complete, immutable input
//! - [`FaceFlags`]: the persisted boolean display preferences

use chrono::{DateTime, Datelike, Local, Timelike};
use serde::{Deserialize, Serialize};

// Module declarations
pub mod config;
pub mod layout;
pub mod renderer;
pub mod settings;
pub mod smear;
pub mod surface;

/// Persisted boolean display preferences.
///
/// Flags are toggled by an external configuration channel (see
/// [`settings::SettingsSync`]) and loaded/stored across restarts. During a
/// render pass they are read-only; the settings collaborator only commits
/// updates between passes.
///
/// Defaults are permissive: everything on except low-power mode.
///
/// # Example
/// ```
/// use hexface_lib::FaceFlags;
///
/// let flags = FaceFlags::default();
/// assert!(flags.ghost && flags.extra_ghost);
/// assert!(!flags.low_power);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceFlags {
    /// Skip the per-second tick bar to reduce refresh work
    pub low_power: bool,
    /// Allow haptic pulses on connectivity loss
    pub vibrate: bool,
    /// Smear the large glyphs (hours, minutes)
    pub ghost: bool,
    /// Smear the small glyphs (weekday, day, month)
    pub extra_ghost: bool,
    /// Request a haptic pulse at each hour boundary
    pub hourly_chime: bool,
}

impl Default for FaceFlags {
    fn default() -> Self {
        FaceFlags {
            low_power: false,
            vibrate: true,
            ghost: true,
            extra_ghost: true,
            hourly_chime: true,
        }
    }
}

/// One tick's complete, immutable input to the rendering core.
///
/// All numeric fields are expected to stay within their documented ranges;
/// the producer (the host's tick source) is responsible for that. The core
/// never validates them but tolerates boundary values (`minute = 59`,
/// `day_of_month = 31`) without panicking.
///
/// # Example
/// ```
/// use hexface_lib::{FaceFlags, RenderSnapshot};
///
/// let snap = RenderSnapshot {
///     hour: 23,
///     minute: 59,
///     second: 10,
///     day_of_week: 4,
///     day_of_month: 31,
///     month: 11,
///     battery_percent: 100,
///     is_charging: false,
///     is_connected: true,
///     flags: FaceFlags::default(),
/// };
/// assert_eq!(snap.hour, 23);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderSnapshot {
    /// Hour of day, 0..=23
    pub hour: u8,
    /// Minute of hour, 0..=59
    pub minute: u8,
    /// Second of minute, 0..=59
    pub second: u8,
    /// Day of week, 0 (Sunday)..=6
    pub day_of_week: u8,
    /// Day of month, 1..=31
    pub day_of_month: u8,
    /// Zero-based month, 0..=11
    pub month: u8,
    /// Battery charge, 0..=100
    pub battery_percent: u8,
    /// True while on the charger
    pub is_charging: bool,
    /// True while the phone link is up
    pub is_connected: bool,
    /// Display preferences, committed between ticks
    pub flags: FaceFlags,
}

impl RenderSnapshot {
    /// Build a snapshot from a local wall-clock instant plus the host's
    /// battery and connectivity readings.
    ///
    /// Weekday numbering follows the `tm_wday` convention (0 = Sunday) and
    /// months are zero-based, matching what the layout tracks expect.
    pub fn from_local(
        now: DateTime<Local>,
        battery_percent: u8,
        is_charging: bool,
        is_connected: bool,
        flags: FaceFlags,
    ) -> Self {
        RenderSnapshot {
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second() as u8,
            day_of_week: now.weekday().num_days_from_sunday() as u8,
            day_of_month: now.day() as u8,
            month: now.month0() as u8,
            battery_percent,
            is_charging,
            is_connected,
            flags,
        }
    }
}
