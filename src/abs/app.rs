//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2 window and the OpenGL
//! context the renderer draws into.

use std::sync::Arc;

use glow::HasContext;

use crate::{
    error::{Error, Result},
    settings::WindowSettings,
};

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
///
/// Field order matters: the GL context must outlive every GPU resource, and SDL must outlive the
/// window, so resources created from [`App::gl`] should be dropped before the [`App`]. The
/// underscored fields are only held so they are released in that order.
pub struct App {
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
    _gl_context: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    _video_subsystem: sdl2::VideoSubsystem,
    _sdl: sdl2::Sdl,
}

impl App {
    /// Creates the window and a current OpenGL 3.3 core-profile context.
    pub fn new(settings: &WindowSettings) -> Result<Self> {
        let sdl = sdl2::init().map_err(Error::Sdl)?;
        let video_subsystem = sdl.video().map_err(Error::Sdl)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        #[cfg(target_os = "macos")]
        gl_attr.set_context_flags().forward_compatible().set();

        let window = video_subsystem
            .window(&settings.title, settings.width, settings.height)
            .opengl()
            .resizable()
            .position_centered()
            .build()
            .map_err(|e| Error::Window(e.to_string()))?;

        let gl_context = window.gl_create_context().map_err(Error::Window)?;
        window.gl_make_current(&gl_context).map_err(Error::Window)?;

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };

        let interval = if settings.vsync {
            sdl2::video::SwapInterval::VSync
        } else {
            sdl2::video::SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
            log::warn!("could not set swap interval: {e}");
        }

        let (width, height) = window.drawable_size();
        unsafe {
            gl.viewport(0, 0, width as i32, height as i32);
            log::info!(
                "OpenGL {} on {}",
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER)
            );
        }

        let event_pump = sdl.event_pump().map_err(Error::Sdl)?;

        Ok(Self {
            gl: Arc::new(gl),
            event_pump,
            _gl_context: gl_context,
            window,
            _video_subsystem: video_subsystem,
            _sdl: sdl,
        })
    }

    /// Resizes the viewport to match the window's framebuffer.
    pub fn fit_viewport(&self) {
        let (width, height) = self.window.drawable_size();
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
        log::debug!("viewport resized to {width}x{height}");
    }

    /// Presents the back buffer.
    pub fn swap_buffers(&self) {
        self.window.gl_swap_window();
    }
}
