//! # Layout Engine
//!
//! Maps a snapshot's numeric fields to pixel positions along the configured
//! horizontal tracks. Positioning is proportional interpolation with the
//! result truncated toward zero; the truncation is deliberate and must not be
//! replaced with rounding, or the face drifts a pixel from the reference
//! layout at several values.
//!
//! Everything here is a pure function of snapshot + config. The track table
//! is rebuilt from scratch on every tick; six tracks make that a small
//! constant cost.

use crate::config::FaceConfig;
use crate::surface::SizeClass;
use crate::RenderSnapshot;

/// Geometry of one rendered quantity for a single tick: the primary glyph
/// position, the glyph digits to draw there, and the box/advance metrics the
/// smear loop steps with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphTrack {
    /// Hex digits drawn at the primary position; single-digit tracks only
    /// use `glyphs[0]`
    pub glyphs: [u8; 2],
    /// 1 or 2 glyphs drawn as a unit that ghosts together
    pub digit_count: u8,
    /// Primary glyph origin
    pub x: i32,
    pub y: i32,
    /// Glyph box metrics for this track's size class
    pub width: i32,
    pub height: i32,
    pub spacing: i32,
    pub size: SizeClass,
}

impl GlyphTrack {
    /// Leftward advance per ghost step: one glyph box plus gap, doubled for
    /// a two-digit pair that ghosts as a unit.
    pub fn step(&self) -> i32 {
        (self.width + self.spacing) * i32::from(self.digit_count)
    }
}

/// Proportional position along a track: `start + floor(value / max * length)`.
///
/// Division is floating-point, truncated toward zero.
pub fn position(value: i32, value_max: i32, track_start: i32, track_len: i32) -> i32 {
    track_start + ((value as f32 / value_max as f32) * track_len as f32) as i32
}

/// Split a value into high/low hexadecimal nibbles. The face displays time
/// and date in base 16, not base 10.
pub fn hex_digits(value: u8) -> (u8, u8) {
    (value / 16, value % 16)
}

/// Reduce a 24-hour value to its 12-hour display glyph. Positioning keeps
/// using the unreduced 24-hour value; the two are deliberately different
/// quantities.
pub fn hour_glyph(hour: u8) -> u8 {
    hour % 12
}

/// Build the per-tick track table from a snapshot.
///
/// Month and weekday glyph indices are offset by +1 before lookup; index 0
/// is reserved in the small glyph set. Day-of-month digits are plain nibbles
/// but its position interpolates `day - 1` over a 30-day range.
pub fn glyph_tracks(snap: &RenderSnapshot, config: &FaceConfig) -> [GlyphTrack; 5] {
    let large = config.glyphs.large;
    let small = config.glyphs.small;
    let tracks = &config.tracks;

    let (minute_high, minute_low) = hex_digits(snap.minute);
    let (day_high, day_low) = hex_digits(snap.day_of_month);

    let hour = GlyphTrack {
        glyphs: [hour_glyph(snap.hour), 0],
        digit_count: 1,
        x: position(
            i32::from(snap.hour),
            23,
            tracks.hour.start,
            tracks.hour.length,
        ),
        y: tracks.hour.y,
        width: large.width,
        height: large.height,
        spacing: large.spacing,
        size: SizeClass::Large,
    };

    let minute = GlyphTrack {
        glyphs: [minute_high, minute_low],
        digit_count: 2,
        x: position(
            i32::from(snap.minute),
            60,
            tracks.minute.start,
            tracks.minute.length,
        ),
        y: tracks.minute.y,
        width: large.width,
        height: large.height,
        spacing: large.spacing,
        size: SizeClass::Large,
    };

    let weekday = GlyphTrack {
        glyphs: [snap.day_of_week + 1, 0],
        digit_count: 1,
        x: position(
            i32::from(snap.day_of_week),
            6,
            tracks.weekday.start,
            tracks.weekday.length,
        ),
        y: tracks.weekday.y,
        width: small.width,
        height: small.height,
        spacing: small.spacing,
        size: SizeClass::Small,
    };

    let day = GlyphTrack {
        glyphs: [day_high, day_low],
        digit_count: 2,
        x: position(
            i32::from(snap.day_of_month) - 1,
            30,
            tracks.day.start,
            tracks.day.length,
        ),
        y: tracks.day.y,
        width: small.width,
        height: small.height,
        spacing: small.spacing,
        size: SizeClass::Small,
    };

    let month = GlyphTrack {
        glyphs: [snap.month + 1, 0],
        digit_count: 1,
        x: position(
            i32::from(snap.month),
            11,
            tracks.month.start,
            tracks.month.length,
        ),
        y: tracks.month.y,
        width: small.width,
        height: small.height,
        spacing: small.spacing,
        size: SizeClass::Small,
    };

    [hour, minute, weekday, day, month]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FaceFlags;

    fn snapshot(hour: u8, minute: u8) -> RenderSnapshot {
        RenderSnapshot {
            hour,
            minute,
            second: 0,
            day_of_week: 3,
            day_of_month: 15,
            month: 6,
            battery_percent: 80,
            is_charging: false,
            is_connected: true,
            flags: FaceFlags::default(),
        }
    }

    #[test]
    fn test_position_truncates_toward_zero() {
        // 2 + 23/23 * 110 = 112 exactly
        assert_eq!(position(23, 23, 2, 110), 112);
        // 59/60 * 78 = 76.7 -> 76, + 2
        assert_eq!(position(59, 60, 2, 78), 78);
        // 1/23 * 110 = 4.78 -> 4, + 2
        assert_eq!(position(1, 23, 2, 110), 6);
        assert_eq!(position(0, 23, 2, 110), 2);
    }

    #[test]
    fn test_position_monotone_in_hour() {
        let mut last = i32::MIN;
        for hour in 0..=23 {
            let x = position(hour, 23, 2, 110);
            assert!(x >= last, "position regressed at hour {hour}");
            last = x;
        }
    }

    #[test]
    fn test_hex_digit_split_identity() {
        for value in 0..=59u8 {
            let (high, low) = hex_digits(value);
            assert!(high <= 15 && low <= 15);
            assert_eq!(high * 16 + low, value);
        }
        assert_eq!(hex_digits(59), (3, 11)); // 0x3B
        assert_eq!(hex_digits(31), (1, 15)); // 0x1F
    }

    #[test]
    fn test_hour_glyph_is_independent_of_position() {
        assert_eq!(hour_glyph(0), 0);
        assert_eq!(hour_glyph(11), 11);
        assert_eq!(hour_glyph(12), 0);
        assert_eq!(hour_glyph(23), 11);
        // 13:00 and 01:00 share a glyph but not a position
        let config = FaceConfig::default();
        let one = glyph_tracks(&snapshot(1, 0), &config)[0];
        let thirteen = glyph_tracks(&snapshot(13, 0), &config)[0];
        assert_eq!(one.glyphs[0], thirteen.glyphs[0]);
        assert!(thirteen.x > one.x);
    }

    #[test]
    fn test_small_glyph_index_offset() {
        let config = FaceConfig::default();
        let snap = snapshot(10, 30);
        let tracks = glyph_tracks(&snap, &config);
        // weekday 3 -> glyph 4, month 6 -> glyph 7
        assert_eq!(tracks[2].glyphs[0], 4);
        assert_eq!(tracks[4].glyphs[0], 7);
        // day-of-month digits are NOT offset: 15 = 0x0F
        assert_eq!(tracks[3].glyphs, [0, 15]);
    }

    #[test]
    fn test_day_position_uses_zero_based_domain() {
        let config = FaceConfig::default();
        let mut snap = snapshot(0, 0);
        snap.day_of_month = 1;
        assert_eq!(glyph_tracks(&snap, &config)[3].x, 2);
        snap.day_of_month = 31;
        // (31-1)/30 * 114 = 114
        assert_eq!(glyph_tracks(&snap, &config)[3].x, 116);
    }

    #[test]
    fn test_track_step_doubles_for_pairs() {
        let config = FaceConfig::default();
        let tracks = glyph_tracks(&snapshot(12, 34), &config);
        assert_eq!(tracks[0].step(), 32); // hour: 30 + 2
        assert_eq!(tracks[1].step(), 64); // minute pair: 2 * (30 + 2)
        assert_eq!(tracks[2].step(), 14); // weekday: 12 + 2
        assert_eq!(tracks[3].step(), 28); // day pair: 2 * (12 + 2)
    }

    #[test]
    fn test_layout_is_pure() {
        let config = FaceConfig::default();
        let snap = snapshot(23, 59);
        assert_eq!(glyph_tracks(&snap, &config), glyph_tracks(&snap, &config));
    }
}
