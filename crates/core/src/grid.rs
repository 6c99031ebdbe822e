//! Fixed-size tile storage shared by generators, movement, and field of view.

use serde::Serialize;

use crate::types::{Pos, TileKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Tile {
    pub kind: TileKind,
    pub visible: bool,
    pub explored: bool,
}

impl Tile {
    pub fn new(kind: TileKind) -> Self {
        Self { kind, visible: false, explored: false }
    }
}

/// Row-major `height × width` tile array. Dimensions never change after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn filled(width: usize, height: usize, kind: TileKind) -> Self {
        Self { width, height, tiles: vec![Tile::new(kind); width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Out-of-bounds positions read as `Wall`.
    pub fn kind_at(&self, pos: Pos) -> TileKind {
        self.tile(pos).map_or(TileKind::Wall, |tile| tile.kind)
    }

    pub fn tile(&self, pos: Pos) -> Option<&Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(&self.tiles[self.index(pos)])
    }

    pub fn set_kind(&mut self, pos: Pos, kind: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx].kind = kind;
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.kind_at(pos) != TileKind::Wall
    }

    pub fn set_visible(&mut self, pos: Pos) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx].visible = true;
        self.tiles[idx].explored = true;
    }

    pub fn clear_visible(&mut self) {
        for tile in &mut self.tiles {
            tile.visible = false;
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let width = self.width;
        let height = self.height;
        (0..height).flat_map(move |y| (0..width).map(move |x| Pos { y: y as i32, x: x as i32 }))
    }

    /// First tile of `kind` in raster order.
    pub fn find_kind(&self, kind: TileKind) -> Option<Pos> {
        self.positions().find(|&pos| self.kind_at(pos) == kind)
    }

    pub fn count_kind(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|tile| tile.kind == kind).count()
    }

    pub(crate) fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

/// Shared walkability predicate used by movement collision and by the generators.
pub fn is_walkable(tiles: &TileGrid, tile_x: i32, tile_y: i32) -> bool {
    tiles.is_walkable(Pos { y: tile_y, x: tile_x })
}
