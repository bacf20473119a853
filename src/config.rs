//! # Face Geometry Configuration
//!
//! This module handles loading and parsing configuration from the
//! face-config.toml file. It carries everything about the face that is a
//! tuning constant rather than an invariant: canvas size, per-track layout
//! geometry, glyph metrics, tick-bar placement, and the smear pixel budget.
//!
//! The defaults reproduce the reference 144×168 layout exactly; a config file
//! only needs to exist when a face variant wants different tracks or a
//! different corruption density.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration loaded from face-config.toml
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FaceConfig {
    /// Display canvas dimensions
    pub canvas: CanvasConfig,
    /// Glyph metrics for both size classes
    pub glyphs: GlyphConfig,
    /// Horizontal track table, one entry per rendered quantity
    pub tracks: TrackTable,
    /// Seconds/battery tick bars, separator and charging icon placement
    pub bars: BarConfig,
    /// Smear tuning
    pub smear: SmearConfig,
}

/// Display canvas dimensions in pixels
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CanvasConfig {
    pub width: i32,
    pub height: i32,
}

/// Metrics for one glyph size class
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct GlyphMetrics {
    /// Glyph bitmap width in pixels
    pub width: i32,
    /// Glyph bitmap height in pixels
    pub height: i32,
    /// Horizontal gap between adjacent glyphs of a pair and between ghost
    /// copies
    pub spacing: i32,
}

/// Glyph metrics for the large (time) and small (date) glyph sets
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GlyphConfig {
    pub large: GlyphMetrics,
    pub small: GlyphMetrics,
}

/// One horizontal track: the pixel range a quantity's primary glyph position
/// is interpolated over, and the row it is drawn on
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct TrackConfig {
    /// Leftmost primary x position (value = 0)
    pub start: i32,
    /// Pixel length of the interpolation range
    pub length: i32,
    /// Top y coordinate of glyphs on this track
    pub y: i32,
}

/// The five glyph tracks of the reference layout
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TrackTable {
    pub hour: TrackConfig,
    pub minute: TrackConfig,
    pub weekday: TrackConfig,
    pub day: TrackConfig,
    pub month: TrackConfig,
}

/// Placement of the non-glyph elements: seconds bar, battery bar, the
/// connectivity separator and the charging icon
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BarConfig {
    /// First seconds segment x position
    pub seconds_x: i32,
    /// Seconds segment top y
    pub seconds_top: i32,
    /// Seconds segment bottom y
    pub seconds_bottom: i32,
    /// Horizontal advance per seconds segment
    pub seconds_step: i32,
    /// First battery segment x position
    pub battery_x: i32,
    /// Battery segment top y
    pub battery_top: i32,
    /// Battery segment bottom y
    pub battery_bottom: i32,
    /// Horizontal advance per battery segment
    pub battery_step: i32,
    /// Segment count at 100% charge
    pub battery_ticks: i32,
    /// Separator square position and side length
    pub separator_x: i32,
    pub separator_y: i32,
    pub separator_size: i32,
    /// Charging icon origin (replaces the battery bar while charging)
    pub charging_x: i32,
    pub charging_y: i32,
}

/// Smear tuning constants
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SmearConfig {
    /// White pixels overlaid per glyph box at ghost step 1; step `n` gets
    /// `pixel_budget * n`
    pub pixel_budget: u32,
}

impl Default for FaceConfig {
    fn default() -> Self {
        FaceConfig {
            canvas: CanvasConfig {
                width: 144,
                height: 168,
            },
            glyphs: GlyphConfig {
                large: GlyphMetrics {
                    width: 30,
                    height: 45,
                    spacing: 2,
                },
                small: GlyphMetrics {
                    width: 12,
                    height: 18,
                    spacing: 2,
                },
            },
            tracks: TrackTable {
                hour: TrackConfig {
                    start: 2,
                    length: 110,
                    y: 2,
                },
                minute: TrackConfig {
                    start: 2,
                    length: 78,
                    y: 49,
                },
                weekday: TrackConfig {
                    start: 2,
                    length: 128,
                    y: 107,
                },
                day: TrackConfig {
                    start: 2,
                    length: 114,
                    y: 127,
                },
                month: TrackConfig {
                    start: 2,
                    length: 128,
                    y: 147,
                },
            },
            bars: BarConfig {
                seconds_x: 2,
                seconds_top: 97,
                seconds_bottom: 105,
                seconds_step: 2,
                battery_x: 128,
                battery_top: 99,
                battery_bottom: 103,
                battery_step: 2,
                battery_ticks: 7,
                separator_x: 123,
                separator_y: 100,
                separator_size: 3,
                charging_x: 128,
                charging_y: 99,
            },
            smear: SmearConfig { pixel_budget: 300 },
        }
    }
}

impl FaceConfig {
    /// Load configuration from face-config.toml
    /// Falls back to the reference layout if the file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path("face-config.toml")
    }

    /// Load configuration from specified path
    /// Falls back to the reference layout if the file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<FaceConfig>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Invalid config file format: {}", e);
                    eprintln!("Using reference face layout");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save current configuration to face-config.toml
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write("face-config.toml", contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_layout() {
        let config = FaceConfig::default();
        assert_eq!(config.canvas.width, 144);
        assert_eq!(config.canvas.height, 168);
        assert_eq!(config.glyphs.large.width, 30);
        assert_eq!(config.glyphs.large.height, 45);
        assert_eq!(config.glyphs.small.width, 12);
        assert_eq!(config.tracks.hour.length, 110);
        assert_eq!(config.tracks.minute.length, 78);
        assert_eq!(config.tracks.day.length, 114);
        assert_eq!(config.smear.pixel_budget, 300);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = FaceConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: FaceConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.tracks.month.y, config.tracks.month.y);
        assert_eq!(parsed.bars.battery_x, config.bars.battery_x);
        assert_eq!(parsed.smear.pixel_budget, config.smear.pixel_budget);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = FaceConfig::load_from_path("/nonexistent/path");
        // Should fall back to the reference layout
        assert_eq!(config.tracks.hour.start, 2);
    }
}
