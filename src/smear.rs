//! # Smear Renderer
//!
//! Draws a track's primary glyph (or glyph pair) and then a decaying trail of
//! ghost copies to its left, each copy overlaid with randomly placed white
//! pixels. Corruption density grows linearly with ghost distance: step `n`
//! gets `pixel_budget * n` pixels per glyph box, positions drawn uniformly
//! and independently, duplicates allowed.
//!
//! Ghost stepping moves strictly left by one whole unit per step, a unit
//! being `width + spacing` for single glyphs and twice that for a pair that
//! ghosts together. The trail continues while the ghost origin stays right of
//! `-step`, so a copy still partially on-canvas is always drawn; offscreen
//! overshoot is the sink's problem, not ours.

use crate::layout::GlyphTrack;
use crate::surface::{StrokeColor, SurfaceSink};
use rand::Rng;

/// Draw one track: the primary glyphs, then the ghost trail when `enabled`.
///
/// Disabling the class gate skips the whole state machine; the primary is
/// always drawn. A degenerate step (zero or negative glyph box) produces
/// zero ghost steps rather than looping.
pub fn render_track<S, R>(
    sink: &mut S,
    rng: &mut R,
    track: &GlyphTrack,
    pixel_budget: u32,
    enabled: bool,
) where
    S: SurfaceSink,
    R: Rng,
{
    draw_unit(sink, track, track.x);

    if !enabled {
        return;
    }
    let step = track.step();
    if step <= 0 {
        return;
    }

    let mut ghost = 0u32;
    let mut x = track.x - step;
    while x > -step {
        ghost += 1;
        draw_unit(sink, track, x);
        corrupt(sink, rng, x, track.y, track.width, track.height, pixel_budget * ghost);
        if track.digit_count == 2 {
            corrupt(
                sink,
                rng,
                x + track.width + track.spacing,
                track.y,
                track.width,
                track.height,
                pixel_budget * ghost,
            );
        }
        x -= step;
    }
}

/// Draw the track's glyph or glyph pair with its origin at `x`.
fn draw_unit<S: SurfaceSink>(sink: &mut S, track: &GlyphTrack, x: i32) {
    sink.draw_glyph(
        track.glyphs[0],
        track.size,
        x,
        track.y,
        track.width,
        track.height,
    );
    if track.digit_count == 2 {
        sink.draw_glyph(
            track.glyphs[1],
            track.size,
            x + track.width + track.spacing,
            track.y,
            track.width,
            track.height,
        );
    }
}

/// Overlay `pixels` white pixels uniformly over one w×h glyph box.
fn corrupt<S, R>(sink: &mut S, rng: &mut R, x: i32, y: i32, w: i32, h: i32, pixels: u32)
where
    S: SurfaceSink,
    R: Rng,
{
    if w <= 0 || h <= 0 {
        return;
    }
    sink.set_stroke(StrokeColor::White);
    for _ in 0..pixels {
        let dx = rng.gen_range(0..w);
        let dy = rng.gen_range(0..h);
        sink.draw_pixel(x + dx, y + dy);
    }
    sink.set_stroke(StrokeColor::Black);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface, SizeClass};
    use rand::{rngs::StdRng, SeedableRng};

    fn large_single(x: i32) -> GlyphTrack {
        GlyphTrack {
            glyphs: [11, 0],
            digit_count: 1,
            x,
            y: 2,
            width: 30,
            height: 45,
            spacing: 2,
            size: SizeClass::Large,
        }
    }

    fn large_pair(x: i32) -> GlyphTrack {
        GlyphTrack {
            glyphs: [3, 11],
            digit_count: 2,
            x,
            y: 49,
            width: 30,
            height: 45,
            spacing: 2,
            size: SizeClass::Large,
        }
    }

    fn ghost_count(rec: &RecordingSurface, track: &GlyphTrack) -> usize {
        // Every unit draws `digit_count` glyphs; subtract the primary unit
        rec.glyphs().len() / track.digit_count as usize - 1
    }

    #[test]
    fn test_ghost_trail_stops_at_threshold() {
        // Primary at 112, step 32: ghosts at 80, 48, 16, -16; -48 fails > -32
        let mut rec = RecordingSurface::new();
        let mut rng = StdRng::seed_from_u64(7);
        let track = large_single(112);
        render_track(&mut rec, &mut rng, &track, 0, true);
        assert_eq!(ghost_count(&rec, &track), 4);

        let xs: Vec<i32> = rec
            .glyphs()
            .iter()
            .map(|op| match op {
                DrawOp::Glyph { x, .. } => *x,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(xs, vec![112, 80, 48, 16, -16]);
    }

    #[test]
    fn test_minimum_position_still_ghosts_once() {
        // Primary at 2: first ghost lands at -30, which is > -32
        let mut rec = RecordingSurface::new();
        let mut rng = StdRng::seed_from_u64(7);
        let track = large_single(2);
        render_track(&mut rec, &mut rng, &track, 0, true);
        assert_eq!(ghost_count(&rec, &track), 1);
    }

    #[test]
    fn test_pair_steps_by_double_unit() {
        // Primary at 78, step 64: ghosts at 14, -50; -114 fails > -64
        let mut rec = RecordingSurface::new();
        let mut rng = StdRng::seed_from_u64(7);
        let track = large_pair(78);
        render_track(&mut rec, &mut rng, &track, 0, true);
        assert_eq!(ghost_count(&rec, &track), 2);

        // Both digits of each unit are drawn, 32 px apart
        let glyphs = rec.glyphs();
        assert_eq!(glyphs.len(), 6);
        assert_eq!(
            glyphs[1],
            DrawOp::Glyph {
                glyph: 11,
                size: SizeClass::Large,
                x: 110,
                y: 49
            }
        );
    }

    #[test]
    fn test_corruption_count_grows_linearly() {
        // Single glyph, primary at 112 -> 4 ghost steps; budget 10 gives
        // 10 + 20 + 30 + 40 pixels
        let mut rec = RecordingSurface::new();
        let mut rng = StdRng::seed_from_u64(42);
        render_track(&mut rec, &mut rng, &large_single(112), 10, true);
        assert_eq!(rec.pixel_count(), 100);

        // A pair corrupts both boxes per step: 2 ghosts of a pair at
        // budget 10 gives 2 * (10 + 20)
        let mut rec = RecordingSurface::new();
        let mut rng = StdRng::seed_from_u64(42);
        render_track(&mut rec, &mut rng, &large_pair(78), 10, true);
        assert_eq!(rec.pixel_count(), 60);
    }

    #[test]
    fn test_corruption_confined_to_glyph_boxes() {
        let mut rec = RecordingSurface::new();
        let mut rng = StdRng::seed_from_u64(1);
        let track = large_single(112);
        render_track(&mut rec, &mut rng, &track, 50, true);

        let ghost_xs = [80, 48, 16, -16];
        for op in &rec.ops {
            if let DrawOp::Pixel { x, y } = op {
                assert!(
                    ghost_xs
                        .iter()
                        .any(|gx| (*gx..gx + track.width).contains(x)),
                    "pixel x {x} outside every ghost box"
                );
                assert!((track.y..track.y + track.height).contains(y));
            }
        }
    }

    #[test]
    fn test_disabled_gate_draws_primary_only() {
        let mut rec = RecordingSurface::new();
        let mut rng = StdRng::seed_from_u64(7);
        let track = large_single(112);
        render_track(&mut rec, &mut rng, &track, 300, false);
        assert_eq!(rec.glyphs().len(), 1);
        assert_eq!(rec.pixel_count(), 0);
    }

    #[test]
    fn test_degenerate_geometry_yields_no_ghosts() {
        let mut rng = StdRng::seed_from_u64(7);

        let mut zero_width = large_single(112);
        zero_width.width = 0;
        zero_width.spacing = 0;
        let mut rec = RecordingSurface::new();
        render_track(&mut rec, &mut rng, &zero_width, 300, true);
        assert_eq!(rec.glyphs().len(), 1);
        assert_eq!(rec.pixel_count(), 0);

        let mut negative = large_single(112);
        negative.width = -4;
        negative.spacing = 2;
        let mut rec = RecordingSurface::new();
        render_track(&mut rec, &mut rng, &negative, 300, true);
        assert_eq!(rec.glyphs().len(), 1);
        assert_eq!(rec.pixel_count(), 0);
    }

    #[test]
    fn test_stroke_restored_after_corruption() {
        let mut rec = RecordingSurface::new();
        let mut rng = StdRng::seed_from_u64(7);
        render_track(&mut rec, &mut rng, &large_single(40), 5, true);
        assert_eq!(rec.ops.last(), Some(&DrawOp::Stroke(StrokeColor::Black)));
    }
}
