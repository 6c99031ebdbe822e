use serde::Serialize;

/// Edge length of one tile in world units.
pub const TILE_SIZE: f32 = 32.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Cardinal neighbors in north, south, west, east order.
    pub fn cardinal_neighbors(self) -> [Pos; 4] {
        [
            Pos { y: self.y - 1, x: self.x },
            Pos { y: self.y + 1, x: self.x },
            Pos { y: self.y, x: self.x - 1 },
            Pos { y: self.y, x: self.x + 1 },
        ]
    }

    pub fn offset(self, dx: i32, dy: i32) -> Pos {
        Pos { y: self.y + dy, x: self.x + dx }
    }

    pub fn from_world(point: WorldPoint) -> Pos {
        Pos { y: (point.y / TILE_SIZE).floor() as i32, x: (point.x / TILE_SIZE).floor() as i32 }
    }

    pub fn world_center(self) -> WorldPoint {
        WorldPoint {
            x: self.x as f32 * TILE_SIZE + TILE_SIZE / 2.0,
            y: self.y as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TileKind {
    Wall,
    Floor,
    Corridor,
    Door,
    StairsDown,
    StairsUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TrapKind {
    Arrow,
    Pit,
    SleepGas,
}

/// Axis-aligned rectangle in tile units. Used for BSP rooms and cave caverns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(self) -> usize {
        self.x + self.w.max(1) - 1
    }

    pub fn bottom(self) -> usize {
        self.y + self.h.max(1) - 1
    }

    pub fn center(self) -> Pos {
        Pos { y: (self.y + self.h / 2) as i32, x: (self.x + self.w / 2) as i32 }
    }

    /// Manhattan distance between exact centers, in half tiles.
    pub fn center_distance(self, other: Rect) -> usize {
        let ax = 2 * self.x + self.w;
        let ay = 2 * self.y + self.h;
        let bx = 2 * other.x + other.w;
        let by = 2 * other.y + other.h;
        ax.abs_diff(bx) + ay.abs_diff(by)
    }

    pub fn contains(self, pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 {
            return false;
        }
        let px = pos.x as usize;
        let py = pos.y as usize;
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    pub fn positions(self) -> impl Iterator<Item = Pos> {
        (self.y..self.y + self.h).flat_map(move |y| {
            (self.x..self.x + self.w).map(move |x| Pos { y: y as i32, x: x as i32 })
        })
    }
}
