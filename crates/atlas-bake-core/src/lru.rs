//! Recency-ordered record of placements.
//!
//! A circular doubly-linked list threaded through a slot arena with a
//! dedicated sentinel, plus a hash lookup from source-image index to list
//! slot. `sentinel.next` is the most recent entry, `sentinel.prev` the least
//! recent. The list doubles as the ordered output for metadata
//! serialization.

use std::collections::HashMap;

use crate::arena::Arena;
use crate::model::SourceImage;
use crate::tree::{NodeId, PartitionTree, Split};

/// Index handle into the LRU arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LruId(u32);

/// One cached placement: a tree leaf and the source image occupying it.
#[derive(Debug)]
pub struct LruNode {
    pub leaf: NodeId,
    pub image: usize,
    prev: LruId,
    next: LruId,
}

pub struct LruCache {
    arena: Arena<LruNode>,
    sentinel: LruId,
    lookup: HashMap<usize, LruId>,
    atlas_width: u32,
    atlas_height: u32,
    len: usize,
}

impl LruCache {
    /// Reserve room for `image_count` entries plus the sentinel.
    pub fn with_capacity(image_count: usize) -> Self {
        let mut arena = Arena::with_capacity(image_count + 1);
        let sentinel = LruId(arena.push(LruNode {
            leaf: NodeId::NONE,
            image: usize::MAX,
            prev: LruId(0),
            next: LruId(0),
        }));
        Self {
            arena,
            sentinel,
            lookup: HashMap::new(),
            atlas_width: 0,
            atlas_height: 0,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Atlas extent tracked alongside insertions.
    pub fn atlas_extent(&self) -> (u32, u32) {
        (self.atlas_width, self.atlas_height)
    }

    pub fn set_atlas_extent(&mut self, width: u32, height: u32) {
        self.atlas_width = width;
        self.atlas_height = height;
    }

    fn link_front(&mut self, id: LruId) {
        let sentinel = self.sentinel;
        let old_first = self.arena.at(sentinel.0).next;
        {
            let node = self.arena.at_mut(id.0);
            node.prev = sentinel;
            node.next = old_first;
        }
        self.arena.at_mut(sentinel.0).next = id;
        self.arena.at_mut(old_first.0).prev = id;
    }

    fn unlink(&mut self, id: LruId) {
        let (prev, next) = {
            let node = self.arena.at(id.0);
            (node.prev, node.next)
        };
        self.arena.at_mut(prev.0).next = next;
        self.arena.at_mut(next.0).prev = prev;
    }

    /// Record a placement. An image already present moves to the front;
    /// a new entry is pushed at the front, its leaf marked used, and the
    /// current atlas extent recorded.
    pub fn insert(
        &mut self,
        tree: &mut PartitionTree,
        leaf: NodeId,
        image: usize,
        atlas_width: u32,
        atlas_height: u32,
    ) {
        if let Some(&id) = self.lookup.get(&image) {
            self.unlink(id);
            self.link_front(id);
        } else {
            let id = LruId(self.arena.push(LruNode {
                leaf,
                image,
                prev: self.sentinel,
                next: self.sentinel,
            }));
            tree.node_mut(leaf).is_used = true;
            self.link_front(id);
            self.len += 1;
            self.atlas_width = atlas_width;
            self.atlas_height = atlas_height;
            self.lookup.insert(image, id);
        }
    }

    /// Drop the least-recent entry. Its leaf becomes free again (split
    /// cleared); sibling blocks are not re-merged. The abandoned arena slot
    /// is retained for the rest of the run.
    pub fn evict(&mut self, tree: &mut PartitionTree) -> Option<(NodeId, usize)> {
        if self.len == 0 {
            return None;
        }
        let tail = self.arena.at(self.sentinel.0).prev;
        let (leaf, image) = {
            let node = self.arena.at(tail.0);
            (node.leaf, node.image)
        };
        if self.lookup.remove(&image).is_none() {
            return None;
        }
        {
            let node = tree.node_mut(leaf);
            node.is_used = false;
            node.split = Split::None;
        }
        self.unlink(tail);
        self.len -= 1;
        Some((leaf, image))
    }

    /// Targeted removal. Additionally demotes the leaf's node back to a
    /// plain leaf by dropping its children.
    pub fn remove(&mut self, tree: &mut PartitionTree, image: usize) -> bool {
        let Some(id) = self.lookup.remove(&image) else {
            return false;
        };
        let leaf = self.arena.at(id.0).leaf;
        {
            let node = tree.node_mut(leaf);
            node.is_used = false;
            node.split = Split::None;
            node.left = NodeId::NONE;
            node.right = NodeId::NONE;
        }
        self.unlink(id);
        self.len -= 1;
        true
    }

    /// Walk the list once and remove the first entry whose placed origin
    /// lies outside `(max_width, max_height)`, adjusting the tracked extent.
    /// Stops after the first removal.
    pub fn contract(
        &mut self,
        tree: &mut PartitionTree,
        images: &[SourceImage],
        max_width: u32,
        max_height: u32,
    ) {
        let mut id = self.arena.at(self.sentinel.0).next;
        while id != self.sentinel {
            let (image, next) = {
                let node = self.arena.at(id.0);
                (node.image, node.next)
            };
            let img = &images[image];
            if img.x >= max_width || img.y >= max_height {
                if img.x >= max_width {
                    self.atlas_width = self.atlas_width.saturating_sub(img.width);
                }
                if img.y >= max_height {
                    self.atlas_height = self.atlas_height.saturating_sub(img.height);
                }
                self.remove(tree, image);
                break;
            }
            id = next;
        }
    }

    /// Pop every entry, reset the sentinel links and the tracked extent.
    pub fn clear(&mut self) {
        while self.arena.len() > 1 {
            self.arena.pop();
        }
        self.lookup.clear();
        self.len = 0;
        self.atlas_width = 0;
        self.atlas_height = 0;
        let sentinel = self.sentinel;
        let node = self.arena.at_mut(sentinel.0);
        node.prev = sentinel;
        node.next = sentinel;
    }

    /// Entries from most- to least-recent.
    pub fn iter(&self) -> LruIter<'_> {
        LruIter {
            cache: self,
            id: self.arena.at(self.sentinel.0).next,
        }
    }
}

pub struct LruIter<'a> {
    cache: &'a LruCache,
    id: LruId,
}

impl Iterator for LruIter<'_> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.id == self.cache.sentinel {
            return None;
        }
        let node = self.cache.arena.at(self.id.0);
        self.id = node.next;
        Some((node.leaf, node.image))
    }
}
