use std::path::PathBuf;

use crate::{
    abs::App,
    clock::FrameClock,
    error::Result,
    input::{FrameAction, InputState},
    scene::QuadScene,
    settings::Settings,
};

mod abs;
mod clock;
mod error;
mod input;
mod logging;
mod quad;
mod scene;
mod settings;

fn main() {
    if let Err(e) = run() {
        // Settings errors happen before the logger is installed.
        if log::max_level() == log::LevelFilter::Off {
            eprintln!("error: {e}");
        } else {
            log::error!("{e}");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let candidates = settings::search_paths();
    let (mut settings, source) = Settings::load(explicit.as_deref(), &candidates)?;
    logging::init(&settings.log_level)?;

    match &source {
        Some(path) => {
            log::info!("using settings from {}", path.display());
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                settings.resolve_relative_to(dir);
            }
        }
        None => log::info!("no settings file found, using defaults"),
    }

    let mut app = App::new(&settings.window)?;
    let mut scene = QuadScene::new(&app.gl, &settings)?;
    let mut input = InputState::default();
    let mut clock = FrameClock::new();

    'running: loop {
        let time = clock.tick();

        input.begin_frame();
        for event in app.event_pump.poll_iter() {
            input.handle_event(&event);
        }
        for action in input.actions() {
            match action {
                FrameAction::Quit => break 'running,
                FrameAction::Resize(width, height) => {
                    log::debug!("window resized to {width}x{height}");
                    app.fit_viewport();
                }
                FrameAction::ToggleWireframe => scene.toggle_wireframe(),
            }
        }

        scene.render(&time);
        app.swap_buffers();
    }

    log::info!("shutting down");
    // GPU resources go before the context that owns them.
    drop(scene);
    drop(app);
    Ok(())
}
