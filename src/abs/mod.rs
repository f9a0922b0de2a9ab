//! Thin wrappers over the windowing library and OpenGL objects: the application window, shader
//! programs, meshes and textures.

pub mod app;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use app::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
