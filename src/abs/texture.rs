//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU texture,
//! and [`TextureOptions`] describing how it is sampled.

use std::{path::Path, sync::Arc};

use glow::HasContext;
use image::{DynamicImage, GenericImageView};

use crate::error::{Error, Result};

/// Texture coordinate wrapping along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wrap {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
}

impl Wrap {
    pub fn gl_enum(self) -> i32 {
        (match self {
            Wrap::Repeat => glow::REPEAT,
            Wrap::MirroredRepeat => glow::MIRRORED_REPEAT,
            Wrap::ClampToEdge => glow::CLAMP_TO_EDGE,
        }) as i32
    }
}

/// Minification or magnification filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapLinear,
}

impl Filter {
    pub fn gl_enum(self) -> i32 {
        (match self {
            Filter::Nearest => glow::NEAREST,
            Filter::Linear => glow::LINEAR,
            Filter::NearestMipmapNearest => glow::NEAREST_MIPMAP_NEAREST,
            Filter::LinearMipmapLinear => glow::LINEAR_MIPMAP_LINEAR,
        }) as i32
    }

    /// Whether the filter samples from the mipmap chain.
    pub fn uses_mipmaps(self) -> bool {
        matches!(
            self,
            Filter::NearestMipmapNearest | Filter::LinearMipmapLinear
        )
    }
}

/// Sampling state applied when a texture is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextureOptions {
    /// Horizontal wrapping.
    pub wrap_s: Wrap,
    /// Vertical wrapping.
    pub wrap_t: Wrap,
    pub min_filter: Filter,
    pub mag_filter: Filter,
    pub mipmaps: bool,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            wrap_s: Wrap::Repeat,
            wrap_t: Wrap::MirroredRepeat,
            min_filter: Filter::LinearMipmapLinear,
            mag_filter: Filter::Linear,
            mipmaps: true,
        }
    }
}

impl TextureOptions {
    /// Returns the minification filter actually applied.
    ///
    /// A mipmapped filter without a generated mipmap chain leaves the texture incomplete, so it
    /// is downgraded to its base level counterpart.
    pub fn effective_min_filter(&self) -> Filter {
        match self.min_filter {
            filter if self.mipmaps || !filter.uses_mipmaps() => filter,
            Filter::NearestMipmapNearest => Filter::Nearest,
            _ => Filter::Linear,
        }
    }
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
}

impl Texture {
    /// Creates a new texture from the given [`image::DynamicImage`].
    pub fn new(
        gl: &Arc<glow::Context>,
        image: &DynamicImage,
        options: &TextureOptions,
    ) -> Result<Self> {
        let (width, height) = image.dimensions();
        let data = image.to_rgba8().into_raw();
        Self::new_from_data(gl, width, height, &data, options)
    }

    /// Creates a new texture from the given raw RGBA data.
    ///
    /// `data` must hold exactly `width * height` RGBA pixels.
    pub fn new_from_data(
        gl: &Arc<glow::Context>,
        width: u32,
        height: u32,
        data: &[u8],
        options: &TextureOptions,
    ) -> Result<Self> {
        check_rgba_len(width, height, data.len())?;
        unsafe {
            let texture = gl.create_texture().map_err(Error::Gl)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                options.wrap_s.gl_enum(),
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                options.wrap_t.gl_enum(),
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                options.effective_min_filter().gl_enum(),
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                options.mag_filter.gl_enum(),
            );
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data)),
            );
            if options.mipmaps {
                gl.generate_mipmap(glow::TEXTURE_2D);
            }
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width,
                height,
            })
        }
    }

    /// Decodes an image file and uploads it.
    ///
    /// Rows are flipped so that texture coordinate (0, 0) is the bottom-left of the image.
    pub fn from_file(
        gl: &Arc<glow::Context>,
        path: impl AsRef<Path>,
        options: &TextureOptions,
    ) -> Result<Self> {
        let image = load_image(path.as_ref())?;
        Self::new(gl, &image, options)
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}

/// Verifies that `len` bytes are exactly one `width` x `height` RGBA8 image.
///
/// Dimensions GL cannot address as `i32` are rejected too.
pub fn check_rgba_len(width: u32, height: u32, len: usize) -> Result<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4));
    let addressable = i32::try_from(width).is_ok() && i32::try_from(height).is_ok();
    if addressable && expected == Some(len) {
        Ok(())
    } else {
        Err(Error::TextureSize {
            width,
            height,
            len,
            expected: expected.filter(|_| addressable),
        })
    }
}

/// Opens and decodes an image, flipped vertically for OpenGL.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let image = image::open(path).map_err(|source| match source {
        image::ImageError::IoError(e) => Error::io(path, e),
        source => Error::Image {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(image.flipv())
}

/// Builds an RGBA checkerboard of `cell`-pixel squares alternating between `a` and `b`.
///
/// The top-left cell uses `a`.
pub fn checkerboard(width: u32, height: u32, cell: u32, a: [u8; 4], b: [u8; 4]) -> Vec<u8> {
    let cell = cell.max(1);
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let colour = if (x / cell + y / cell) % 2 == 0 { a } else { b };
            data.extend_from_slice(&colour);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const MAGENTA: [u8; 4] = [255, 0, 255, 255];

    fn pixel(data: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [data[i], data[i + 1], data[i + 2], data[i + 3]]
    }

    #[test]
    fn test_default_options_match_quad_sampling() {
        let options = TextureOptions::default();
        assert_eq!(options.wrap_s.gl_enum(), glow::REPEAT as i32);
        assert_eq!(options.wrap_t.gl_enum(), glow::MIRRORED_REPEAT as i32);
        assert_eq!(
            options.effective_min_filter().gl_enum(),
            glow::LINEAR_MIPMAP_LINEAR as i32
        );
        assert_eq!(options.mag_filter.gl_enum(), glow::LINEAR as i32);
    }

    #[test]
    fn test_mipmap_filter_downgraded_without_mipmaps() {
        let options = TextureOptions {
            mipmaps: false,
            ..Default::default()
        };
        assert_eq!(options.effective_min_filter(), Filter::Linear);

        let options = TextureOptions {
            min_filter: Filter::NearestMipmapNearest,
            mipmaps: false,
            ..Default::default()
        };
        assert_eq!(options.effective_min_filter(), Filter::Nearest);
        assert!(!options.effective_min_filter().uses_mipmaps());
    }

    #[test]
    fn test_rgba_len_must_match_dimensions() {
        assert!(check_rgba_len(64, 64, 64 * 64 * 4).is_ok());
        assert!(check_rgba_len(0, 0, 0).is_ok());

        match check_rgba_len(64, 64, 4) {
            Err(Error::TextureSize { len, expected, .. }) => {
                assert_eq!(len, 4);
                assert_eq!(expected, Some(16384));
            }
            other => panic!("expected a size error, got {:?}", other),
        }
        assert!(check_rgba_len(2, 2, 17).is_err());
    }

    #[test]
    fn test_rgba_len_rejects_unaddressable_sizes() {
        let err = check_rgba_len(u32::MAX, u32::MAX, 0).unwrap_err();
        assert!(matches!(err, Error::TextureSize { expected: None, .. }));
    }

    #[test]
    fn test_checkerboard_matches_rgba_len() {
        let data = checkerboard(64, 32, 8, WHITE, MAGENTA);
        assert!(check_rgba_len(64, 32, data.len()).is_ok());
    }

    #[test]
    fn test_checkerboard_layout() {
        let data = checkerboard(4, 4, 2, WHITE, MAGENTA);
        assert_eq!(data.len(), 4 * 4 * 4);
        assert_eq!(pixel(&data, 4, 0, 0), WHITE);
        assert_eq!(pixel(&data, 4, 1, 1), WHITE);
        assert_eq!(pixel(&data, 4, 2, 0), MAGENTA);
        assert_eq!(pixel(&data, 4, 0, 2), MAGENTA);
        assert_eq!(pixel(&data, 4, 3, 3), WHITE);
    }

    #[test]
    fn test_checkerboard_zero_cell_is_per_pixel() {
        let data = checkerboard(2, 1, 0, WHITE, MAGENTA);
        assert_eq!(pixel(&data, 2, 0, 0), WHITE);
        assert_eq!(pixel(&data, 2, 1, 0), MAGENTA);
    }

    #[test]
    fn test_load_image_flips_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stripe.png");
        let mut img = image::RgbaImage::new(1, 2);
        img.put_pixel(0, 0, image::Rgba(WHITE));
        img.put_pixel(0, 1, image::Rgba(MAGENTA));
        img.save(&path).unwrap();

        let loaded = load_image(&path).unwrap().to_rgba8();
        assert_eq!(loaded.get_pixel(0, 0).0, MAGENTA);
        assert_eq!(loaded.get_pixel(0, 1).0, WHITE);
    }

    #[test]
    fn test_shipped_texture_decodes() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("textures/metalbox_full.png");
        let image = load_image(&path).unwrap();
        assert_eq!(image.dimensions(), (128, 128));
    }

    #[test]
    fn test_load_image_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(&dir.path().join("metalbox.png")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_load_image_garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, Error::Image { .. }));
    }
}
