use crate::error::{AtlasBakeError, Result};
use serde::{Deserialize, Serialize};

/// Axis-aligned block with inclusive edges and cached extents.
///
/// `width` and `height` are derived (`right - left + 1`, `bottom - top + 1`)
/// and kept alongside the edges; constructors reject degenerate blocks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub width: u32,
    pub height: u32,
}

impl Block {
    /// Block from a top-left origin and a non-zero extent.
    pub fn from_extent(left: u32, top: u32, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "degenerate block extent {}x{}",
            width,
            height
        );
        Self {
            left,
            top,
            right: left + width - 1,
            bottom: top + height - 1,
            width,
            height,
        }
    }

    /// Block from inclusive edges.
    pub fn from_edges(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        assert!(
            right >= left && bottom >= top,
            "degenerate block edges ({},{})..({},{})",
            left,
            top,
            right,
            bottom
        );
        Self {
            left,
            top,
            right,
            bottom,
            width: right - left + 1,
            height: bottom - top + 1,
        }
    }

    /// True if `other` lies fully inside `self` (inclusive edges).
    pub fn contains(&self, other: &Block) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// True if the two blocks share at least one pixel.
    pub fn intersects(&self, other: &Block) -> bool {
        !(other.left > self.right
            || other.right < self.left
            || other.top > self.bottom
            || other.bottom < self.top)
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// A decoded source raster queued for packing.
///
/// `x`/`y` hold the assigned atlas position and are meaningful only after a
/// packing run.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub key: String,
    pub pixels: Vec<u8>,
    pub bpp: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SourceImage {
    /// Wrap a raw pixel buffer. The buffer length must be exactly
    /// `width * height * bpp`, and `bpp` must be 1..=4 (8-bit channels).
    pub fn new(
        key: impl Into<String>,
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        bpp: u32,
    ) -> Result<Self> {
        let key = key.into();
        if width == 0 || height == 0 {
            return Err(AtlasBakeError::InvalidDimensions { width, height });
        }
        if !(1..=4).contains(&bpp) {
            return Err(AtlasBakeError::UnsupportedBpp(bpp));
        }
        let expected = width as usize * height as usize * bpp as usize;
        if pixels.len() != expected {
            return Err(AtlasBakeError::InvalidInput(format!(
                "pixel buffer for '{}' is {} bytes, expected {}",
                key,
                pixels.len(),
                expected
            )));
        }
        Ok(Self {
            key,
            pixels,
            bpp,
            x: 0,
            y: 0,
            width,
            height,
        })
    }

    /// Build from a decoded image, normalizing deep formats down to 8-bit
    /// channels and keeping the native channel count.
    pub fn from_dynamic(key: impl Into<String>, image: &image::DynamicImage) -> Result<Self> {
        use image::DynamicImage as D;
        let owned;
        let image = match image {
            D::ImageLuma8(_) | D::ImageLumaA8(_) | D::ImageRgb8(_) | D::ImageRgba8(_) => image,
            D::ImageLuma16(_) => {
                owned = D::ImageLuma8(image.to_luma8());
                &owned
            }
            D::ImageLumaA16(_) => {
                owned = D::ImageLumaA8(image.to_luma_alpha8());
                &owned
            }
            D::ImageRgb16(_) | D::ImageRgb32F(_) => {
                owned = D::ImageRgb8(image.to_rgb8());
                &owned
            }
            _ => {
                owned = D::ImageRgba8(image.to_rgba8());
                &owned
            }
        };
        let bpp = image.color().bytes_per_pixel() as u32;
        Self::new(key, image.as_bytes().to_vec(), image.width(), image.height(), bpp)
    }
}

/// A placed source within the finished atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    pub key: String,
    pub x: u32,
    pub y: u32,
    /// `x / atlasWidth` as a 32-bit float.
    pub u: f32,
    /// `y / atlasHeight` as a 32-bit float.
    pub v: f32,
    pub width: u32,
    pub height: u32,
}

/// Statistics about a packing run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackStats {
    /// Number of sources placed (and present in the metadata).
    pub num_placed: usize,
    /// Number of sources dropped because the atlas could not grow and the
    /// cache had nothing left to evict.
    pub num_dropped: usize,
    /// Final atlas area in pixels.
    pub atlas_area: u64,
    /// Sum of placed source areas.
    pub used_area: u64,
    /// `used_area / atlas_area` (0.0 to 1.0). Higher is better.
    pub occupancy: f64,
}

impl PackStats {
    /// Human-readable one-line summary.
    pub fn summary(&self) -> String {
        format!(
            "Placed: {}, Dropped: {}, Occupancy: {:.2}%, Atlas Area: {} px², Used Area: {} px²",
            self.num_placed,
            self.num_dropped,
            self.occupancy * 100.0,
            self.atlas_area,
            self.used_area,
        )
    }
}
