//! Logger setup.
//!
//! Records go through the `log` facade and are written to stderr by a `fern` dispatcher as
//! `[time LEVEL target] message`.

use std::sync::atomic::{AtomicBool, Ordering};

use log::LevelFilter;

use crate::error::Result;

static INITIALISED: AtomicBool = AtomicBool::new(false);

/// Parses a level name, falling back to `Info` for anything unrecognised.
pub fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Picks the level from `RUST_LOG` when it holds a plain level name, otherwise from the settings
/// value.
///
/// The second value is the `RUST_LOG` text that was ignored because it is not a level name
/// (for example `target=level` filters).
pub fn resolve_level<'a>(
    configured: &str,
    env: Option<&'a str>,
) -> (LevelFilter, Option<&'a str>) {
    match env.map(str::trim).filter(|level| !level.is_empty()) {
        Some(level) => match level.parse() {
            Ok(filter) => (filter, None),
            Err(_) => (parse_level(configured), Some(level)),
        },
        None => (parse_level(configured), None),
    }
}

/// Installs the global logger. Later calls are no-ops.
pub fn init(configured_level: &str) -> Result<()> {
    if INITIALISED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let env = std::env::var("RUST_LOG").ok();
    let (level, ignored) = resolve_level(configured_level, env.as_deref());

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // SDL and image decoders are noisy at trace level.
        .level_for("sdl2", LevelFilter::Warn)
        .level_for("image", LevelFilter::Warn)
        .chain(std::io::stderr())
        .apply()?;

    if let Some(ignored) = ignored {
        log::warn!("RUST_LOG={ignored:?} is not a level name, using {level}");
    }
    log::debug!("logging initialised at {level}");
    Ok(())
}
