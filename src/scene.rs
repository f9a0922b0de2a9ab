//! The textured quad and everything needed to draw it each frame.

use std::sync::Arc;

use glow::HasContext;

use crate::{
    abs::{Filter, Mesh, ShaderProgram, Texture, TextureOptions, checkerboard},
    clock::FrameTime,
    error::Result,
    quad::{QUAD_INDICES, QUAD_VERTICES},
    settings::Settings,
};

/// Texture unit the quad's sampler reads from.
const TEXTURE_UNIT: u32 = 0;

/// Size of the substitute texture used when the configured one cannot be loaded.
const FALLBACK_SIZE: u32 = 64;

/// Owns the GPU resources of the quad. They are released when the scene is dropped.
pub struct QuadScene {
    gl: Arc<glow::Context>,
    program: ShaderProgram,
    texture: Texture,
    mesh: Mesh,
    clear_colour: [f32; 4],
    wireframe: bool,
}

impl QuadScene {
    /// Compiles the shaders, loads the texture and uploads the quad.
    ///
    /// Shader errors are fatal. A texture that fails to load is replaced with a checkerboard so
    /// the quad still renders.
    pub fn new(gl: &Arc<glow::Context>, settings: &Settings) -> Result<Self> {
        let program =
            ShaderProgram::from_files(gl, &settings.vertex_shader, &settings.fragment_shader)?;
        let texture = load_texture_or_fallback(gl, settings)?;
        let mesh = Mesh::new(gl, &QUAD_VERTICES, &QUAD_INDICES, glow::TRIANGLES)?;

        program.use_program();
        program.set_uniform("u_texture", TEXTURE_UNIT as i32);

        let mut scene = Self {
            gl: Arc::clone(gl),
            program,
            texture,
            mesh,
            clear_colour: settings.clear_colour,
            wireframe: false,
        };
        scene.set_wireframe(settings.wireframe);
        Ok(scene)
    }

    /// Switches between filled and outlined polygons.
    pub fn set_wireframe(&mut self, enabled: bool) {
        self.wireframe = enabled;
        unsafe {
            self.gl
                .polygon_mode(glow::FRONT_AND_BACK, polygon_mode(enabled));
        }
        log::debug!("polygon mode set, wireframe = {enabled}");
    }

    pub fn toggle_wireframe(&mut self) {
        self.set_wireframe(!self.wireframe);
        log::info!("wireframe {}", if self.wireframe { "on" } else { "off" });
    }

    /// Clears the frame and draws the quad.
    pub fn render(&self, time: &FrameTime) {
        let [r, g, b, a] = self.clear_colour;
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }

        self.texture.bind(TEXTURE_UNIT);
        self.program.use_program();
        self.program.set_uniform("u_time", time.elapsed);
        self.mesh.draw();
    }
}

/// GL polygon rasterisation mode for the wireframe flag.
fn polygon_mode(wireframe: bool) -> u32 {
    if wireframe { glow::LINE } else { glow::FILL }
}

fn load_texture_or_fallback(gl: &Arc<glow::Context>, settings: &Settings) -> Result<Texture> {
    match Texture::from_file(gl, &settings.texture, &settings.texture_options) {
        Ok(texture) => {
            log::info!(
                "loaded texture {} ({}x{})",
                settings.texture.display(),
                texture.width(),
                texture.height()
            );
            Ok(texture)
        }
        Err(e) => {
            log::error!("failed to load texture: {e}");
            let data = checkerboard(
                FALLBACK_SIZE,
                FALLBACK_SIZE,
                8,
                [255, 0, 255, 255],
                [20, 20, 20, 255],
            );
            let options = TextureOptions {
                min_filter: Filter::Nearest,
                mag_filter: Filter::Nearest,
                mipmaps: false,
                ..settings.texture_options
            };
            Texture::new_from_data(gl, FALLBACK_SIZE, FALLBACK_SIZE, &data, &options)
        }
    }
}
