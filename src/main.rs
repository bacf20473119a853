//! # Hexface Application Entry Point
//!
//! Desktop harness for the watchface core: renders the face into an
//! in-memory frame buffer and previews it on the terminal. On the watch the
//! host event loop owns the tick source, battery service and haptics; here a
//! wall-clock loop stands in for all three so the rendering core can be
//! exercised end to end without hardware.


use anyhow::Result;
use chrono::Local;
use rand::{rngs::StdRng, SeedableRng};
use std::{env, thread, time::Duration};

use hexface_lib::{
    config::FaceConfig,
    renderer::Watchface,
    settings::{self, SettingsSync},
    surface::FrameBuffer,
    RenderSnapshot,
};

/// Battery readings a desktop has no source for; the watch host supplies
/// real values through its battery service.
const STUB_BATTERY_PERCENT: u8 = 100;
const STUB_IS_CHARGING: bool = false;
const STUB_IS_CONNECTED: bool = true;

/// Main application entry point.
fn main() -> Result<()> {
    // Development mode: render one frame to stdout and exit
    let single_frame = env::args().any(|arg| arg == "--stdout");

    let config = FaceConfig::load();
    let (width, height) = (config.canvas.width, config.canvas.height);

    // Persisted preferences; written back at shutdown
    let mut sync = SettingsSync::new(settings::load_flags());

    // Process-wide smear randomness, seeded once from the wall clock
    let rng = StdRng::seed_from_u64(Local::now().timestamp() as u64);
    let mut face = Watchface::new(config, rng);

    if single_frame {
        let mut frame = FrameBuffer::new(width, height);
        let snap = current_snapshot(&sync);
        face.render_tick(&snap, &mut frame);
        print!("{}", frame.render_ascii());
        return Ok(());
    }

    // Live terminal clock: one frame per second for a demo minute
    let mut frame = FrameBuffer::new(width, height);
    for _ in 0..60 {
        sync.note_tick();
        let snap = current_snapshot(&sync);

        frame.clear();
        let effects = face.render_tick(&snap, &mut frame);

        // Clear screen, home cursor, frame, then the effect markers the
        // watch host would turn into haptic pulses
        print!("\x1b[2J\x1b[H{}", frame.render_ascii());
        if effects.chime_pulse {
            println!("* chime *");
        }
        if effects.disconnect_pulse {
            println!("* link lost *");
        }

        thread::sleep(Duration::from_secs(1));
    }

    if let Err(e) = settings::save_flags(&sync.flags()) {
        eprintln!("Warning: could not persist settings: {}", e);
    }

    Ok(())
}

/// Resolve the current wall clock plus the stub battery/link readings into
/// one immutable snapshot.
fn current_snapshot(sync: &SettingsSync) -> RenderSnapshot {
    RenderSnapshot::from_local(
        Local::now(),
        STUB_BATTERY_PERCENT,
        STUB_IS_CHARGING,
        STUB_IS_CONNECTED,
        sync.flags(),
    )
}
