//! End-to-end packing: validate, sort, pack, render, report.

use tracing::{info, instrument};

use crate::compositing::Canvas;
use crate::config::PackerConfig;
use crate::error::{AtlasBakeError, Result};
use crate::lru::LruCache;
use crate::model::{PackStats, Placement, SourceImage};
use crate::packer::{pack, sort_images};

/// Finished atlas page plus its placement records.
pub struct PackOutput {
    /// Tightly packed pixel rows, `width * bpp` bytes per row.
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub bpp: u32,
    /// Placements in cache order (most recent first); this is the order the
    /// metadata sidecar is written in.
    pub placements: Vec<Placement>,
    pub stats: PackStats,
}

#[instrument(skip_all)]
/// Packs `images` into a single atlas page and composites the result.
///
/// All inputs must share bytes-per-pixel; a mismatch is fatal. Free regions
/// of the page keep the diagnostic fill from the packing pass. Images that
/// could not be placed are absent from the placement list.
pub fn pack_images(mut images: Vec<SourceImage>, cfg: &PackerConfig) -> Result<PackOutput> {
    cfg.validate()?;
    if images.is_empty() {
        return Err(AtlasBakeError::Empty);
    }
    let bpp = images[0].bpp;
    for image in &images {
        if image.bpp != bpp {
            return Err(AtlasBakeError::BppMismatch {
                key: image.key.clone(),
                expected: bpp,
                found: image.bpp,
            });
        }
    }

    sort_images(&mut images);

    // The working canvas spans the cap; free-block fills land here during
    // traversal. It is cropped to the packed extent before the blit pass.
    let mut canvas = Canvas::new(cfg.max_width, cfg.max_height, bpp);
    let mut cache = LruCache::with_capacity(images.len());
    let (_tree, report) = pack(&mut images, &mut cache, &mut canvas, cfg);

    canvas.crop_to(report.atlas_width, report.atlas_height);
    for (_, index) in cache.iter() {
        let image = &images[index];
        canvas.blit_rows(&image.pixels, image.width, image.height, image.x, image.y);
    }

    let atlas_width = report.atlas_width as f32;
    let atlas_height = report.atlas_height as f32;
    let mut placements = Vec::with_capacity(cache.len());
    for (_, index) in cache.iter() {
        let image = &images[index];
        placements.push(Placement {
            key: image.key.clone(),
            x: image.x,
            y: image.y,
            u: image.x as f32 / atlas_width,
            v: image.y as f32 / atlas_height,
            width: image.width,
            height: image.height,
        });
    }

    let atlas_area = report.atlas_width as u64 * report.atlas_height as u64;
    let used_area: u64 = placements
        .iter()
        .map(|p| p.width as u64 * p.height as u64)
        .sum();
    let stats = PackStats {
        num_placed: placements.len(),
        num_dropped: report.dropped.len(),
        atlas_area,
        used_area,
        occupancy: if atlas_area > 0 {
            used_area as f64 / atlas_area as f64
        } else {
            0.0
        },
    };
    info!(
        width = report.atlas_width,
        height = report.atlas_height,
        placed = stats.num_placed,
        dropped = stats.num_dropped,
        "atlas packed"
    );

    Ok(PackOutput {
        pixels: canvas.into_pixels(),
        width: report.atlas_width,
        height: report.atlas_height,
        bpp,
        placements,
        stats,
    })
}
