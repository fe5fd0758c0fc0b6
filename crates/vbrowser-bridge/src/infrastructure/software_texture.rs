//! CPU-side texture and display surface.
//!
//! [`SoftwareTexture`] keeps the bound image and an RGBA canvas in memory and
//! does nearest-neighbour scaling on the CPU.  It backs the replay binary and
//! is the reference for what a GPU-backed [`FrameTarget`] has to do: bind
//! once, then redraw into a fixed-size canvas and flag the upload.

use std::sync::Arc;

use tracing::trace;
use vbrowser_core::{FrameSize, FrameTarget, SurfaceDimensions, SurfaceTransform};

use crate::application::session_bridge::DisplaySurface;
use crate::domain::config::MAX_TEXTURE_SIDE;

/// Bytes per RGBA pixel.
const BPP: usize = 4;

/// Byte length of a `width` x `height` RGBA buffer, or `None` on overflow.
fn rgba_len(width: u32, height: u32) -> Option<usize> {
    (width as usize).checked_mul(height as usize)?.checked_mul(BPP)
}

/// An immutable RGBA8 image.  Cloning shares the pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl RgbaImage {
    /// Wraps a row-major RGBA buffer.  Returns `None` if the buffer length
    /// does not match `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if Some(pixels.len()) != rgba_len(width, height) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// An image filled with a single colour.  Returns `None` if a side
    /// exceeds [`MAX_TEXTURE_SIDE`].
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Option<Self> {
        if width > MAX_TEXTURE_SIDE || height > MAX_TEXTURE_SIDE {
            return None;
        }
        let pixels: Vec<u8> = rgba.iter().copied().cycle().take(rgba_len(width, height)?).collect();
        Some(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    pub fn size(&self) -> FrameSize {
        FrameSize::new(self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        read_pixel(&self.pixels, self.width, self.height, x, y)
    }
}

fn read_pixel(buf: &[u8], width: u32, height: u32, x: u32, y: u32) -> Option<[u8; 4]> {
    if x >= width || y >= height {
        return None;
    }
    let i = (y as usize)
        .checked_mul(width as usize)?
        .checked_add(x as usize)?
        .checked_mul(BPP)?;
    buf.get(i..i.checked_add(BPP)?)?.try_into().ok()
}

/// In-memory texture with a fixed-size RGBA canvas.
#[derive(Debug)]
pub struct SoftwareTexture {
    image: Option<(RgbaImage, FrameSize)>,
    canvas: Vec<u8>,
    canvas_size: FrameSize,
    flip_y: bool,
    needs_update: bool,
}

impl SoftwareTexture {
    /// A texture whose canvas is `canvas_size`, cleared to transparent black.
    ///
    /// Each canvas side is clamped to [`MAX_TEXTURE_SIDE`].
    pub fn new(canvas_size: FrameSize) -> Self {
        let canvas_size = FrameSize::new(
            canvas_size.width.min(MAX_TEXTURE_SIDE),
            canvas_size.height.min(MAX_TEXTURE_SIDE),
        );
        Self {
            image: None,
            canvas: vec![0; rgba_len(canvas_size.width, canvas_size.height).unwrap_or(0)],
            canvas_size,
            flip_y: false,
            needs_update: false,
        }
    }

    /// The directly bound image and the size it was bound with.
    pub fn image(&self) -> Option<(&RgbaImage, FrameSize)> {
        self.image.as_ref().map(|(img, size)| (img, *size))
    }

    pub fn canvas_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        read_pixel(&self.canvas, self.canvas_size.width, self.canvas_size.height, x, y)
    }

    pub fn flip_y(&self) -> bool {
        self.flip_y
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Called by the renderer after uploading; returns whether an upload was due.
    pub fn take_needs_update(&mut self) -> bool {
        std::mem::take(&mut self.needs_update)
    }
}

impl FrameTarget for SoftwareTexture {
    type Image = RgbaImage;

    fn bind(&mut self, image: RgbaImage, size: FrameSize) {
        self.image = Some((image, size));
    }

    fn canvas_size(&self) -> FrameSize {
        self.canvas_size
    }

    fn draw_scaled(&mut self, image: &RgbaImage, src: FrameSize, dst: FrameSize) {
        if src.is_empty() || dst.is_empty() {
            trace!(?src, ?dst, "empty draw skipped");
            return;
        }
        let dst_w = dst.width.min(self.canvas_size.width);
        let dst_h = dst.height.min(self.canvas_size.height);
        let stride = self.canvas_size.width as usize;

        for dy in 0..dst_h {
            let sy = (u64::from(dy) * u64::from(src.height) / u64::from(dst.height)) as u32;
            for dx in 0..dst_w {
                let sx = (u64::from(dx) * u64::from(src.width) / u64::from(dst.width)) as u32;
                // Declared source sizes larger than the image leave those
                // canvas pixels untouched.
                if let Some(px) = image.pixel(sx, sy) {
                    let i = (dy as usize * stride + dx as usize) * BPP;
                    if let Some(dst) = self.canvas.get_mut(i..i + BPP) {
                        dst.copy_from_slice(&px);
                    }
                }
            }
        }
    }

    fn set_flip_y(&mut self, flip: bool) {
        self.flip_y = flip;
    }

    fn mark_needs_update(&mut self) {
        self.needs_update = true;
    }
}

/// A display surface backed by a [`SoftwareTexture`] sized to the viewport.
#[derive(Debug)]
pub struct SoftwareSurface {
    transform: SurfaceTransform,
    dims: SurfaceDimensions,
    texture: SoftwareTexture,
}

impl SoftwareSurface {
    pub fn new(dims: SurfaceDimensions, transform: SurfaceTransform) -> Self {
        Self {
            transform,
            dims,
            texture: SoftwareTexture::new(FrameSize::new(dims.width, dims.height)),
        }
    }

    pub fn set_transform(&mut self, transform: SurfaceTransform) {
        self.transform = transform;
    }

    pub fn texture(&self) -> &SoftwareTexture {
        &self.texture
    }
}

impl DisplaySurface for SoftwareSurface {
    type Texture = SoftwareTexture;

    fn world_transform(&self) -> SurfaceTransform {
        self.transform
    }

    fn dimensions(&self) -> SurfaceDimensions {
        self.dims
    }

    fn texture_mut(&mut self) -> &mut SoftwareTexture {
        &mut self.texture
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use vbrowser_core::{FramePresenter, FrameSample};

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    #[test]
    fn test_from_raw_checks_length() {
        assert!(RgbaImage::from_raw(2, 2, vec![0; 16]).is_some());
        assert!(RgbaImage::from_raw(2, 2, vec![0; 15]).is_none());
    }

    #[test]
    fn test_solid_image_pixels() {
        let img = RgbaImage::solid(3, 2, RED).unwrap();
        assert_eq!(img.pixel(2, 1), Some(RED));
        assert_eq!(img.pixel(3, 0), None);
    }

    #[test]
    fn test_oversized_dimensions_do_not_allocate() {
        assert!(RgbaImage::solid(u32::MAX, u32::MAX, RED).is_none());
        assert!(RgbaImage::solid(MAX_TEXTURE_SIDE + 1, 1, RED).is_none());
        assert!(RgbaImage::from_raw(u32::MAX, u32::MAX, Vec::new()).is_none());
    }

    #[test]
    fn test_canvas_sides_are_clamped() {
        let tex = SoftwareTexture::new(FrameSize::new(u32::MAX, 2));
        assert_eq!(tex.canvas_size(), FrameSize::new(MAX_TEXTURE_SIDE, 2));
        assert_eq!(tex.canvas_pixel(MAX_TEXTURE_SIDE - 1, 1), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_draw_scaled_upsamples_to_canvas() {
        // Arrange: 2x1 image, left red, right blue; canvas 4x2.
        let mut pixels = Vec::new();
        pixels.extend_from_slice(&RED);
        pixels.extend_from_slice(&BLUE);
        let img = RgbaImage::from_raw(2, 1, pixels).unwrap();
        let mut tex = SoftwareTexture::new(FrameSize::new(4, 2));

        // Act
        tex.draw_scaled(&img, img.size(), tex.canvas_size());

        // Assert
        for y in 0..2 {
            assert_eq!(tex.canvas_pixel(0, y), Some(RED));
            assert_eq!(tex.canvas_pixel(1, y), Some(RED));
            assert_eq!(tex.canvas_pixel(2, y), Some(BLUE));
            assert_eq!(tex.canvas_pixel(3, y), Some(BLUE));
        }
    }

    #[test]
    fn test_draw_scaled_downsamples() {
        let img = RgbaImage::solid(100, 50, BLUE).unwrap();
        let mut tex = SoftwareTexture::new(FrameSize::new(10, 10));
        tex.draw_scaled(&img, img.size(), tex.canvas_size());
        assert_eq!(tex.canvas_pixel(9, 9), Some(BLUE));
    }

    #[test]
    fn test_empty_draw_leaves_canvas_untouched() {
        let img = RgbaImage::solid(0, 0, RED).unwrap();
        let mut tex = SoftwareTexture::new(FrameSize::new(2, 2));
        tex.draw_scaled(&img, FrameSize::new(0, 0), tex.canvas_size());
        assert_eq!(tex.canvas_pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_presenter_drives_software_texture() {
        let mut presenter = FramePresenter::new();
        let mut tex = SoftwareTexture::new(FrameSize::new(8, 8));

        presenter.present(
            FrameSample::Bitmap {
                image: RgbaImage::solid(4, 4, RED).unwrap(),
                width: 4,
                height: 4,
            },
            &mut tex,
        );
        assert!(tex.take_needs_update());
        assert!(!tex.needs_update());
        assert_eq!(tex.image().map(|(_, size)| size), Some(FrameSize::new(4, 4)));
        assert!(!tex.flip_y());

        presenter.present(
            FrameSample::VideoFrame {
                element: RgbaImage::solid(16, 16, BLUE).unwrap(),
                intrinsic_width: 16,
                intrinsic_height: 16,
            },
            &mut tex,
        );
        assert!(tex.needs_update());
        assert!(tex.flip_y());
        assert_eq!(tex.canvas_pixel(7, 7), Some(BLUE));
        // The bound image is still the first frame.
        assert_eq!(tex.image().map(|(img, _)| img.pixel(0, 0)), Some(Some(RED)));
    }
}
