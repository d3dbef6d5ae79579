//! Image buffers and the drawing primitives decorations are painted with.
//!
//! Widgets draw into a mutable [`RgbaImage`] and then freeze it into an
//! [`ImageBuffer`], a shared, immutable handle. Cloning a handle acquires a
//! reference, dropping it releases one; the scene backend holds its own
//! clone for as long as a node displays the image.

use std::sync::Arc;

pub use image::{Rgba, RgbaImage};

use casement_core::Size;

use crate::style::Fill;

/// A reference-counted, immutable RGBA image.
#[derive(Clone, PartialEq)]
pub struct ImageBuffer(Arc<RgbaImage>);

impl ImageBuffer {
    pub fn new(image: RgbaImage) -> Self {
        Self(Arc::new(image))
    }

    /// A fully transparent image.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::new(RgbaImage::new(width, height))
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.0.width() as i32, self.0.height() as i32)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.0
    }

    /// Number of live handles to this image.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Whether two handles refer to the same image.
    pub fn ptr_eq(&self, other: &ImageBuffer) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width() && y < self.height()).then(|| to_argb(*self.0.get_pixel(x, y)))
    }
}

impl From<RgbaImage> for ImageBuffer {
    fn from(image: RgbaImage) -> Self {
        Self::new(image)
    }
}

impl std::fmt::Debug for ImageBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageBuffer")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

static_assertions::assert_impl_all!(ImageBuffer: Send, Sync);

// ============================================================================
// Color helpers
// ============================================================================

pub fn from_argb(argb: u32) -> Rgba<u8> {
    let [a, r, g, b] = argb.to_be_bytes();
    Rgba([r, g, b, a])
}

pub fn to_argb(pixel: Rgba<u8>) -> u32 {
    let [r, g, b, a] = pixel.0;
    u32::from_be_bytes([a, r, g, b])
}

fn lerp_channel(from: u8, to: u8, t: f32) -> u8 {
    (from as f32 + (to as f32 - from as f32) * t).round().clamp(0.0, 255.0) as u8
}

fn lerp(from: u32, to: u32, t: f32) -> Rgba<u8> {
    let (from, to) = (from_argb(from), from_argb(to));
    Rgba(std::array::from_fn(|i| lerp_channel(from.0[i], to.0[i], t)))
}

/// Blend `color` over `pixel` at the given opacity.
fn blend(pixel: &mut Rgba<u8>, color: Rgba<u8>, opacity: f32) {
    for i in 0..3 {
        pixel.0[i] = lerp_channel(pixel.0[i], color.0[i], opacity);
    }
}

// ============================================================================
// Primitives
// ============================================================================

/// Paint the whole image with `fill`.
pub fn fill(image: &mut RgbaImage, fill: &Fill) {
    let (width, height) = image.dimensions();
    let t = |position: u32, extent: u32| {
        if extent > 1 { position as f32 / (extent - 1) as f32 } else { 0.0 }
    };
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        *pixel = match *fill {
            Fill::Solid { color } => from_argb(color),
            Fill::HGradient { from, to } => lerp(from, to, t(x, width)),
            Fill::VGradient { from, to } => lerp(from, to, t(y, height)),
        };
    }
}

/// Copy a `width` x `height` area of `src` at `(src_x, src_y)` into `dest` at
/// `(dest_x, dest_y)`. Parts falling outside either image are skipped.
#[allow(clippy::too_many_arguments)]
pub fn copy_area(
    dest: &mut RgbaImage,
    dest_x: i32,
    dest_y: i32,
    src: &RgbaImage,
    src_x: i32,
    src_y: i32,
    width: i32,
    height: i32,
) {
    for dy in 0..height.max(0) {
        for dx in 0..width.max(0) {
            let (sx, sy) = (src_x + dx, src_y + dy);
            let (tx, ty) = (dest_x + dx, dest_y + dy);
            if !in_image(src, sx, sy) || !in_image(dest, tx, ty) {
                continue;
            }
            let pixel = *src.get_pixel(sx as u32, sy as u32);
            dest.put_pixel(tx as u32, ty as u32, pixel);
        }
    }
}

fn in_image(image: &RgbaImage, x: i32, y: i32) -> bool {
    x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height()
}

/// A new image holding a copy of one area of `src`.
pub fn crop(src: &RgbaImage, x: i32, y: i32, width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    copy_area(&mut image, 0, 0, src, x, y, width as i32, height as i32);
    image
}

/// Shade the outer `bezel_width` pixels of the image.
///
/// A raised bezel lights the top and left edges and darkens the bottom and
/// right ones; a sunken bezel does the opposite.
pub fn bezel(image: &mut RgbaImage, bezel_width: i32, raised: bool) {
    let (width, height) = (image.width() as i32, image.height() as i32);
    let light = Rgba([255, 255, 255, 255]);
    let dark = Rgba([0, 0, 0, 255]);
    let (top_left, bottom_right) = if raised { (light, dark) } else { (dark, light) };

    for y in 0..height {
        for x in 0..width {
            let from_top_left = x.min(y);
            let from_bottom_right = (width - 1 - x).min(height - 1 - y);
            let pixel = image.get_pixel_mut(x as u32, y as u32);
            if from_top_left < bezel_width && from_top_left <= from_bottom_right {
                blend(pixel, top_left, 0.6);
            } else if from_bottom_right < bezel_width {
                blend(pixel, bottom_right, 0.4);
            }
        }
    }
}

/// A horizontal bar across the lower middle of the image.
pub fn minimize_icon(image: &mut RgbaImage, color: u32) {
    let (width, height) = (image.width() as i32, image.height() as i32);
    let inset = width / 4;
    let thickness = (height / 10).max(1);
    let top = height - height / 3 - thickness;
    for y in top..top + thickness {
        for x in inset..width - inset {
            if in_image(image, x, y) {
                image.put_pixel(x as u32, y as u32, from_argb(color));
            }
        }
    }
}

/// A diagonal cross in the middle of the image.
pub fn close_icon(image: &mut RgbaImage, color: u32) {
    let (width, height) = (image.width() as i32, image.height() as i32);
    let size = width.min(height);
    let inset = size / 4;
    let thickness = (size / 10).max(1);
    for i in inset..size - inset {
        for t in 0..thickness {
            for (x, y) in [(i + t, i), (size - 1 - i - t, i)] {
                if in_image(image, x, y) {
                    image.put_pixel(x as u32, y as u32, from_argb(color));
                }
            }
        }
    }
}
