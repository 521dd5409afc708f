//! Greedy first-fit packing over the partition tree.

use tracing::{debug, warn};

use crate::compositing::Canvas;
use crate::config::PackerConfig;
use crate::lru::LruCache;
use crate::model::{Block, SourceImage};
use crate::tree::{NodeId, PartitionTree};

/// Which aggregate side dominates the input set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LongerSide {
    Vertical,
    Horizontal,
}

fn longer_side(images: &[SourceImage]) -> LongerSide {
    let mut max_width = 0;
    let mut max_height = 0;
    for image in images {
        max_width = max_width.max(image.width);
        max_height = max_height.max(image.height);
    }
    if max_width > max_height {
        LongerSide::Horizontal
    } else {
        LongerSide::Vertical
    }
}

/// Stable sort by the dominating aggregate side, longest first. Width
/// descending when the widest input strictly out-measures the tallest,
/// height descending otherwise.
pub fn sort_images(images: &mut [SourceImage]) {
    match longer_side(images) {
        LongerSide::Horizontal => images.sort_by(|a, b| b.width.cmp(&a.width)),
        LongerSide::Vertical => images.sort_by(|a, b| b.height.cmp(&a.height)),
    }
}

/// Outcome of a packing run.
#[derive(Debug)]
pub struct PackReport {
    /// Final atlas width, clamped to the cap.
    pub atlas_width: u32,
    /// Final atlas height, clamped to the cap.
    pub atlas_height: u32,
    /// Indices of images that could not be placed.
    pub dropped: Vec<usize>,
}

/// Pack `images` (already sorted) into a tree seeded from the first image's
/// extent. For each image: search the tree; on failure grow the root along
/// its shorter prospective extent; when growth would exceed the cap, evict
/// the least-recent placement and retry. Assigned positions are written back
/// into the images; placements are recorded in `cache`.
///
/// The tree-node arena is sized at `1 + 6n`; a run that out-splits the
/// reservation fails loudly.
pub fn pack(
    images: &mut [SourceImage],
    cache: &mut LruCache,
    canvas: &mut Canvas,
    cfg: &PackerConfig,
) -> (PartitionTree, PackReport) {
    assert!(!images.is_empty(), "pack requires at least one image");

    let max_width = cfg.max_width;
    let max_height = cfg.max_height;
    let seed = Block::from_extent(0, 0, images[0].width, images[0].height);
    let mut tree = PartitionTree::new(1 + 6 * images.len(), seed);
    let mut dropped = Vec::new();

    let mut index = 0;
    while index < images.len() {
        let mut path: Vec<NodeId> = Vec::new();
        let (width, height) = (images[index].width, images[index].height);

        if let Some(leaf) = tree.traverse(canvas, width, height, &mut path) {
            let block = tree.node(leaf).block;
            images[index].x = block.left;
            images[index].y = block.top;
            let root = tree.root_block();
            cache.insert(&mut tree, leaf, index, root.width, root.height);
            index += 1;
            continue;
        }

        let root = tree.root_block();
        let grown_v = root.height + height;
        let grown_h = root.width + width;
        // Cap pairing preserved from the reference packer unless the
        // corrected variant is enabled.
        let (v_cap, h_cap) = if cfg.corrected_growth_caps {
            (max_height, max_width)
        } else {
            (max_width, max_height)
        };
        if grown_v < grown_h && grown_v <= v_cap {
            debug!(height, root_height = root.height, "expanding root vertically");
            tree.expand_vertically(height);
        } else if grown_v >= grown_h && grown_h <= h_cap {
            debug!(width, root_width = root.width, "expanding root horizontally");
            tree.expand_horizontally(width);
        } else if cache.evict(&mut tree).is_some() {
            // The recorded descent path is discarded; freed ancestors are
            // not re-merged. The freed leaf is picked up on the retry pass.
            path.clear();
        } else {
            warn!(
                key = %images[index].key,
                width,
                height,
                "dropping image: atlas cannot grow and nothing to evict"
            );
            dropped.push(index);
            index += 1;
        }
    }

    let root = tree.root_block();
    let atlas_width = root.width.min(max_width);
    let atlas_height = root.height.min(max_height);
    cache.set_atlas_extent(atlas_width, atlas_height);

    (
        tree,
        PackReport {
            atlas_width,
            atlas_height,
            dropped,
        },
    )
}
