//! Render pass and output buffer.
//!
//! Every pixel gets exactly one primary ray through its center. Pixels are
//! independent, so rows are handed to rayon with no synchronization beyond
//! the shared read-only scene; the sequential schedule gives bit-identical
//! output.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use bytemuck::{Pod, Zeroable};
use rayon::prelude::*;
use thiserror::Error;

use crate::{Color, Scene};

/// Errors that can occur while rendering or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image buffer is {actual_width}x{actual_height} but the scene renders {expected_width}x{expected_height}")]
    ResolutionMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Linear RGBA pixel. Color channels are unbounded radiance; alpha is 1.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Opaque pixel from a color.
    pub fn opaque(color: Color) -> Self {
        Self {
            r: color.x,
            g: color.y,
            b: color.z,
            a: 1.0,
        }
    }

    pub fn rgb(&self) -> Color {
        Color::new(self.r, self.g, self.b)
    }
}

/// How the render pass is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// Rows in parallel on the rayon thread pool
    #[default]
    Parallel,
    /// One row after another on the calling thread
    Sequential,
}

/// Timing and ray counts for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    pub elapsed: Duration,
    /// Primary, shadow and reflected rays cast
    pub rays: u64,
}

impl RenderStats {
    /// Millions of rays per second.
    pub fn mrays_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.rays as f64 / 1_000_000.0 / secs
        } else {
            0.0
        }
    }
}

/// Render output, row-major, row 0 at the bottom of the image.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgba>,
}

impl ImageBuffer {
    /// Create a new buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::default(); width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Rgba {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, pixel: Rgba) {
        let index = self.index(x, y);
        self.pixels[index] = pixel;
    }

    /// Raw little-endian f32 RGBA data, for handing to a texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Display-mapped 8-bit image with the first row at the top.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(color_to_rgba8(self.get(x, self.height - 1 - y)))
        })
    }

    /// Write the image as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        self.to_rgba_image()
            .save_with_format(path, image::ImageFormat::Png)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Clamp a pixel to [0, 1] and quantize to 8 bits. No gamma is applied:
/// the buffer is shown as-is, like the texture it would be uploaded to.
pub fn color_to_rgba8(pixel: Rgba) -> [u8; 4] {
    let quantize = |v: f32| (255.0 * v.clamp(0.0, 1.0)) as u8;
    [
        quantize(pixel.r),
        quantize(pixel.g),
        quantize(pixel.b),
        quantize(pixel.a),
    ]
}

/// Radiance of pixel (x, y): one ray through the pixel center.
pub fn render_pixel(scene: &Scene, x: u32, y: u32) -> Rgba {
    let mut rays = 0;
    render_pixel_counted(scene, x, y, &mut rays)
}

fn render_pixel_counted(scene: &Scene, x: u32, y: u32, rays: &mut u64) -> Rgba {
    let ray = scene.camera().get_ray(x, y, scene.config());
    Rgba::opaque(scene.trace_counted(&ray, 0, rays))
}

fn render_row(scene: &Scene, y: u32, row: &mut [Rgba]) -> u64 {
    let mut rays = 0;
    for (x, pixel) in row.iter_mut().enumerate() {
        *pixel = render_pixel_counted(scene, x as u32, y, &mut rays);
    }
    rays
}

/// Render the scene at its configured resolution on the thread pool.
pub fn render(scene: &Scene) -> ImageBuffer {
    let config = scene.config();
    let mut image = ImageBuffer::new(config.width, config.height);
    render_rows(scene, &mut image, Schedule::Parallel);
    image
}

/// Render into an existing buffer whose size must match the scene's
/// render settings.
pub fn render_into(
    scene: &Scene,
    image: &mut ImageBuffer,
    schedule: Schedule,
) -> RenderResult<RenderStats> {
    let config = scene.config();
    if image.width != config.width || image.height != config.height {
        return Err(RenderError::ResolutionMismatch {
            expected_width: config.width,
            expected_height: config.height,
            actual_width: image.width,
            actual_height: image.height,
        });
    }

    Ok(render_rows(scene, image, schedule))
}

/// Fill a buffer already sized to the scene's resolution.
fn render_rows(scene: &Scene, image: &mut ImageBuffer, schedule: Schedule) -> RenderStats {
    log::info!(
        "Rendering {}x{} ({:?}, max depth {})",
        image.width,
        image.height,
        schedule,
        scene.config().max_depth
    );

    let start = Instant::now();
    let width = image.width as usize;

    let rays = match schedule {
        Schedule::Parallel => {
            let total = AtomicU64::new(0);
            image
                .pixels
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| {
                    let rays = render_row(scene, y as u32, row);
                    total.fetch_add(rays, Ordering::Relaxed);
                });
            total.into_inner()
        }
        Schedule::Sequential => image
            .pixels
            .chunks_mut(width)
            .enumerate()
            .map(|(y, row)| render_row(scene, y as u32, row))
            .sum(),
    };

    let stats = RenderStats {
        elapsed: start.elapsed(),
        rays,
    };

    log::info!(
        "Rendered in {:.2?}: {:.2}M rays, {:.2}M rays/s",
        stats.elapsed,
        stats.rays as f64 / 1_000_000.0,
        stats.mrays_per_second()
    );

    stats
}
