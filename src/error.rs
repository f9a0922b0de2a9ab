//! Error types shared by every part of the program.

use std::path::PathBuf;

use crate::abs::ShaderStage;

/// Everything that can go wrong while setting up or running the renderer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("failed to create window: {0}")]
    Window(String),

    #[error("OpenGL error: {0}")]
    Gl(String),

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("shader program failed to link: {0}")]
    ShaderLink(String),

    #[error("texture data is {len} bytes, a {width}x{height} RGBA image needs {expected:?}")]
    TextureSize {
        width: u32,
        height: u32,
        len: usize,
        /// `None` when the dimensions overflow or exceed what GL can address.
        expected: Option<usize>,
    },

    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not decode image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid settings in {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("logger already initialised: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl Error {
    /// Wraps an I/O error together with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = Error::io(
            "shaders/missing.vert",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("shaders/missing.vert"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_compile_error_names_stage() {
        let err = Error::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "0:1: syntax error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "fragment shader failed to compile: 0:1: syntax error"
        );
    }
}
