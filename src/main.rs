//! Gesture Arcade entry point
//!
//! Loads settings, picks a frame source and runs the fixed-rate loop until
//! quit, the end of a replayed trace, or `max_ticks`.

use std::time::{SystemTime, UNIX_EPOCH};

use gesture_arcade::assets::AssetCatalog;
use gesture_arcade::platform::{FrameClock, open_source};
use gesture_arcade::session::{Session, StepOutcome};
use gesture_arcade::sim::GameEvent;
use gesture_arcade::Settings;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Gesture Arcade starting...");

    let settings = Settings::from_args_or_env(std::env::args().nth(1));
    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let source = open_source(settings.trace.as_deref());

    let mut session = Session::new(seed, settings.start_game, settings.max_effects(), source);
    let mut assets = AssetCatalog::resolve(&settings.asset_dir, session.kind());
    let mut clock = FrameClock::new(settings.frame_rate_for(session.kind()));
    log::info!(
        "Seed {}, quality {}, {} placeholder assets",
        seed,
        settings.quality.as_str(),
        assets.placeholder_count()
    );

    let mut ticks = 0u64;
    loop {
        match session.step(clock.now_ms()) {
            StepOutcome::Ticked { snapshot, events } => {
                ticks += 1;
                if settings.log_snapshots {
                    match serde_json::to_string(&snapshot) {
                        Ok(json) => log::debug!("{}", json),
                        Err(e) => log::warn!("Snapshot serialization failed: {}", e),
                    }
                }
                if events.iter().any(|e| matches!(e, GameEvent::LaunchGame(_))) {
                    assets = AssetCatalog::resolve(&settings.asset_dir, session.kind());
                    clock.set_frame_rate(settings.frame_rate_for(session.kind()));
                    log::info!(
                        "Now playing {} ({} placeholder assets)",
                        session.kind().as_str(),
                        assets.placeholder_count()
                    );
                }
            }
            StepOutcome::Skipped => {}
            StepOutcome::Quit => break,
        }

        if settings.max_ticks.is_some_and(|max| ticks >= max) {
            log::info!("Reached {} ticks", ticks);
            break;
        }
        clock.wait();
    }

    log::info!(
        "Stopped after {} ticks ({} dropped frames)",
        ticks,
        session.dropped_frames()
    );
    Ok(())
}
