//! Arena-backed BSP tree. Children are indices into `nodes`; the root is index 0.

use rand_chacha::ChaCha8Rng;

use crate::mapgen::seed::{roll_chance, roll_range};
use crate::mapgen::tuning::BspTuning;
use crate::types::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cut {
    /// Split the height; children are stacked top and bottom.
    Rows,
    /// Split the width; children sit left and right.
    Columns,
}

#[derive(Clone, Debug)]
pub(super) struct BspNode {
    pub(super) area: Rect,
    pub(super) room: Option<Rect>,
    pub(super) children: Option<(usize, usize)>,
}

#[derive(Clone, Debug)]
pub(super) struct BspTree {
    nodes: Vec<BspNode>,
}

impl BspTree {
    pub(super) fn split(width: usize, height: usize, min_leaf: usize, rng: &mut ChaCha8Rng) -> Self {
        let root = BspNode { area: Rect::new(0, 0, width, height), room: None, children: None };
        let mut tree = Self { nodes: vec![root] };
        let mut pending = vec![0_usize];

        while let Some(index) = pending.pop() {
            let area = tree.nodes[index].area;
            let Some(cut) = choose_cut(area, min_leaf, rng) else {
                continue;
            };
            let (first, second) = match cut {
                Cut::Rows => {
                    let offset = roll_range(rng, min_leaf, area.h - min_leaf);
                    (
                        Rect::new(area.x, area.y, area.w, offset),
                        Rect::new(area.x, area.y + offset, area.w, area.h - offset),
                    )
                }
                Cut::Columns => {
                    let offset = roll_range(rng, min_leaf, area.w - min_leaf);
                    (
                        Rect::new(area.x, area.y, offset, area.h),
                        Rect::new(area.x + offset, area.y, area.w - offset, area.h),
                    )
                }
            };

            let left = tree.push(first);
            let right = tree.push(second);
            tree.nodes[index].children = Some((left, right));
            // Right is pushed first so the left subtree is split first.
            pending.push(right);
            pending.push(left);
        }

        tree
    }

    fn push(&mut self, area: Rect) -> usize {
        self.nodes.push(BspNode { area, room: None, children: None });
        self.nodes.len() - 1
    }

    pub(super) fn place_rooms(&mut self, tuning: &BspTuning, rng: &mut ChaCha8Rng) {
        for index in self.preorder() {
            if self.nodes[index].children.is_some() {
                continue;
            }
            let area = self.nodes[index].area;
            self.nodes[index].room = Some(room_in_leaf(area, tuning, rng));
        }
    }

    /// Node indices in pre-order (node, left subtree, right subtree).
    fn preorder(&self) -> Vec<usize> {
        self.preorder_from(0)
    }

    fn preorder_from(&self, start: usize) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![start];
        while let Some(index) = stack.pop() {
            order.push(index);
            if let Some((left, right)) = self.nodes[index].children {
                stack.push(right);
                stack.push(left);
            }
        }
        order
    }

    pub(super) fn rooms(&self) -> Vec<Rect> {
        self.preorder().into_iter().filter_map(|index| self.nodes[index].room).collect()
    }

    /// First room found by pre-order search below `index`.
    fn first_room(&self, index: usize) -> Option<Rect> {
        self.preorder_from(index).into_iter().find_map(|node| self.nodes[node].room)
    }

    /// One representative room pair per internal node, children before parents.
    pub(super) fn sibling_links(&self) -> Vec<(Rect, Rect)> {
        self.preorder()
            .into_iter()
            .rev()
            .filter_map(|index| {
                let (left, right) = self.nodes[index].children?;
                Some((self.first_room(left)?, self.first_room(right)?))
            })
            .collect()
    }

    #[cfg(test)]
    pub(super) fn nodes(&self) -> &[BspNode] {
        &self.nodes
    }

    #[cfg(test)]
    pub(super) fn depth(&self) -> usize {
        fn depth_of(tree: &BspTree, index: usize) -> usize {
            match tree.nodes[index].children {
                Some((left, right)) => 1 + depth_of(tree, left).max(depth_of(tree, right)),
                None => 0,
            }
        }
        depth_of(self, 0)
    }
}

fn choose_cut(area: Rect, min_leaf: usize, rng: &mut ChaCha8Rng) -> Option<Cut> {
    let limit = min_leaf * 2;
    let can_cut_columns = area.w >= limit;
    let can_cut_rows = area.h >= limit;
    match (can_cut_rows, can_cut_columns) {
        (false, false) => None,
        (true, false) => Some(Cut::Rows),
        (false, true) => Some(Cut::Columns),
        (true, true) => Some(if area.h > area.w {
            Cut::Rows
        } else if area.w > area.h {
            Cut::Columns
        } else if roll_chance(rng, 0.5) {
            Cut::Rows
        } else {
            Cut::Columns
        }),
    }
}

/// Picks a room inside `leaf` that keeps `room_padding` clear on every side.
/// Leaves too small for the padding still get a room of at least 1×1.
fn room_in_leaf(leaf: Rect, tuning: &BspTuning, rng: &mut ChaCha8Rng) -> Rect {
    let w = roll_extent(leaf.w, tuning, rng);
    let h = roll_extent(leaf.h, tuning, rng);
    let x = leaf.x + roll_offset(leaf.w, w, tuning.room_padding, rng);
    let y = leaf.y + roll_offset(leaf.h, h, tuning.room_padding, rng);
    Rect::new(x, y, w, h)
}

fn roll_extent(extent: usize, tuning: &BspTuning, rng: &mut ChaCha8Rng) -> usize {
    let max_extent = extent.saturating_sub(2 * tuning.room_padding).max(1);
    roll_range(rng, tuning.min_room.clamp(1, max_extent), max_extent)
}

fn roll_offset(extent: usize, size: usize, padding: usize, rng: &mut ChaCha8Rng) -> usize {
    let max_offset = extent.saturating_sub(size + padding);
    roll_range(rng, padding.min(max_offset), max_offset)
}
