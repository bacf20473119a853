//! # Watchface Render Pass
//!
//! One [`Watchface`] instance is constructed at startup and driven once per
//! tick: the host hands it a snapshot and a sink, it lays out the glyph
//! tracks, runs the smear over each, draws the seconds and battery bars and
//! the connectivity separator, and reports any non-visual effects back as
//! [`TickEffects`] for the host to act on.
//!
//! The pass is single-threaded and synchronous; it always runs to completion
//! before the next tick is delivered. The only state carried across ticks is
//! the injected random source and the edge detectors for the hourly chime and
//! the connectivity drop.

use crate::config::FaceConfig;
use crate::surface::{SizeClass, SurfaceSink};
use crate::{layout, smear, RenderSnapshot};
use rand::Rng;

/// Non-visual effects requested by a render pass.
///
/// The core has no haptic access of its own; the host owns the actuator and
/// fires pulses after the pass returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickEffects {
    /// Request the hour-boundary chime pulse
    pub chime_pulse: bool,
    /// Request a short pulse for a lost phone link
    pub disconnect_pulse: bool,
}

/// Render context constructed once at startup: face geometry, the injected
/// random source and the cross-tick edge state.
pub struct Watchface<R: Rng> {
    config: FaceConfig,
    rng: R,
    last_chime_hour: Option<u8>,
    was_connected: Option<bool>,
}

impl<R: Rng> Watchface<R> {
    pub fn new(config: FaceConfig, rng: R) -> Self {
        Watchface {
            config,
            rng,
            last_chime_hour: None,
            was_connected: None,
        }
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    /// Render one complete frame for `snap` into `sink`.
    pub fn render_tick<S: SurfaceSink>(
        &mut self,
        snap: &RenderSnapshot,
        sink: &mut S,
    ) -> TickEffects {
        let tracks = layout::glyph_tracks(snap, &self.config);
        for track in &tracks {
            let enabled = match track.size {
                SizeClass::Large => snap.flags.ghost,
                SizeClass::Small => snap.flags.extra_ghost,
            };
            smear::render_track(
                sink,
                &mut self.rng,
                track,
                self.config.smear.pixel_budget,
                enabled,
            );
        }

        if !snap.flags.low_power {
            self.draw_seconds_bar(snap, sink);
        }
        self.draw_battery(snap, sink);

        if snap.is_connected {
            let bars = &self.config.bars;
            sink.fill_rect(
                bars.separator_x,
                bars.separator_y,
                bars.separator_size,
                bars.separator_size,
            );
        }

        self.effects(snap)
    }

    /// One vertical segment per elapsed second of the current minute.
    fn draw_seconds_bar<S: SurfaceSink>(&self, snap: &RenderSnapshot, sink: &mut S) {
        let bars = &self.config.bars;
        let mut x = bars.seconds_x;
        for _ in 0..snap.second.min(59) {
            sink.draw_line(x, bars.seconds_top, x, bars.seconds_bottom);
            x += bars.seconds_step;
        }
    }

    /// Battery tick marks, or the charging icon while on the charger. The
    /// icon alternates between its two variants every other second.
    fn draw_battery<S: SurfaceSink>(&self, snap: &RenderSnapshot, sink: &mut S) {
        let bars = &self.config.bars;
        if snap.is_charging {
            sink.draw_charging_icon(snap.second % 2, bars.charging_x, bars.charging_y);
            return;
        }
        let segments = ((f32::from(snap.battery_percent) / 100.0) * bars.battery_ticks as f32) as i32;
        let mut x = bars.battery_x;
        for _ in 0..segments {
            sink.draw_line(x, bars.battery_top, x, bars.battery_bottom);
            x += bars.battery_step;
        }
    }

    /// Edge-detect the hourly chime and the connectivity drop.
    ///
    /// The chime must fire once per hour boundary even if the host redelivers
    /// a tick at `:00:00`, so the last chimed hour is remembered rather than
    /// re-testing the raw second.
    fn effects(&mut self, snap: &RenderSnapshot) -> TickEffects {
        let mut effects = TickEffects::default();

        if snap.flags.hourly_chime
            && snap.minute == 0
            && snap.second == 0
            && self.last_chime_hour != Some(snap.hour)
        {
            self.last_chime_hour = Some(snap.hour);
            effects.chime_pulse = true;
        }

        if snap.flags.vibrate && self.was_connected == Some(true) && !snap.is_connected {
            effects.disconnect_pulse = true;
        }
        self.was_connected = Some(snap.is_connected);

        effects
    }
}
