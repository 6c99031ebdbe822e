//! Boolean cave map: random fill, smoothing passes, and region pruning.

use rand_chacha::ChaCha8Rng;

use crate::grid::TileGrid;
use crate::mapgen::seed::roll_chance;
use crate::types::{Pos, Rect, TileKind};

/// `true` marks an open cell. The outermost ring is always wall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct CaveMap {
    width: usize,
    height: usize,
    open: Vec<bool>,
}

impl CaveMap {
    pub(super) fn random_fill(width: usize, height: usize, open_chance: f64, rng: &mut ChaCha8Rng) -> Self {
        let mut map = Self { width, height, open: vec![false; width * height] };
        for y in 0..height {
            for x in 0..width {
                if !map.is_border(x, y) {
                    map.open[y * width + x] = roll_chance(rng, open_chance);
                }
            }
        }
        map
    }

    #[cfg(test)]
    pub(super) fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        let open = rows.iter().flat_map(|row| row.bytes().map(|cell| cell == b'.')).collect();
        Self { width, height, open }
    }

    pub(super) fn width(&self) -> usize {
        self.width
    }

    pub(super) fn height(&self) -> usize {
        self.height
    }

    fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 >= self.width || y + 1 >= self.height
    }

    pub(super) fn is_open(&self, pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 {
            return false;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        x < self.width && y < self.height && self.open[y * self.width + x]
    }

    /// Everything inside the solid border.
    pub(super) fn interior(&self) -> Rect {
        Rect::new(1, 1, self.width.saturating_sub(2), self.height.saturating_sub(2))
    }

    pub(super) fn open_count(&self) -> usize {
        self.open.iter().filter(|open| **open).count()
    }

    fn wall_neighbors(&self, x: usize, y: usize) -> usize {
        let center = Pos::new(x as i32, y as i32);
        let mut walls = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if (dx, dy) != (0, 0) && !self.is_open(center.offset(dx, dy)) {
                    walls += 1;
                }
            }
        }
        walls
    }

    /// One automata pass. All cells read the previous generation.
    pub(super) fn smooth(&mut self, wall_threshold: usize) {
        let mut next = vec![false; self.open.len()];
        for y in 0..self.height {
            for x in 0..self.width {
                if !self.is_border(x, y) {
                    next[y * self.width + x] = self.wall_neighbors(x, y) < wall_threshold;
                }
            }
        }
        self.open = next;
    }

    /// Labels 4-connected open regions in raster order of their first cell.
    /// Returns per-cell labels and the size of each region.
    fn label_regions(&self) -> (Vec<Option<usize>>, Vec<usize>) {
        let mut labels = vec![None; self.open.len()];
        let mut sizes = Vec::new();
        let mut stack = Vec::new();

        for start in 0..self.open.len() {
            if !self.open[start] || labels[start].is_some() {
                continue;
            }
            let label = sizes.len();
            let mut size = 0;
            labels[start] = Some(label);
            stack.push(start);
            while let Some(index) = stack.pop() {
                size += 1;
                let pos = Pos::new((index % self.width) as i32, (index / self.width) as i32);
                for next in pos.cardinal_neighbors() {
                    if !self.is_open(next) {
                        continue;
                    }
                    let next_index = next.y as usize * self.width + next.x as usize;
                    if labels[next_index].is_none() {
                        labels[next_index] = Some(label);
                        stack.push(next_index);
                    }
                }
            }
            sizes.push(size);
        }
        (labels, sizes)
    }

    /// Walls off every region except the largest. The earliest region wins ties.
    /// Returns how many regions existed before pruning.
    pub(super) fn keep_largest_region(&mut self) -> usize {
        let (labels, sizes) = self.label_regions();
        let mut largest = 0;
        for (label, size) in sizes.iter().enumerate() {
            if *size > sizes[largest] {
                largest = label;
            }
        }
        for (open, label) in self.open.iter_mut().zip(labels) {
            if label.is_some_and(|label| label != largest) {
                *open = false;
            }
        }
        sizes.len()
    }

    /// Opens a 3x3 chamber at the grid center, for caves that closed up entirely.
    pub(super) fn open_center_chamber(&mut self) {
        let center = Pos::new((self.width / 2) as i32, (self.height / 2) as i32);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let pos = center.offset(dx, dy);
                let (x, y) = (pos.x as usize, pos.y as usize);
                if pos.x >= 0 && pos.y >= 0 && x < self.width && y < self.height && !self.is_border(x, y) {
                    self.open[y * self.width + x] = true;
                }
            }
        }
    }

    pub(super) fn to_grid(&self) -> TileGrid {
        let mut tiles = TileGrid::filled(self.width, self.height, TileKind::Wall);
        for pos in tiles.positions() {
            if self.is_open(pos) {
                tiles.set_kind(pos, TileKind::Floor);
            }
        }
        tiles
    }
}
