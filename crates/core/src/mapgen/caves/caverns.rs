//! Cavern sampling and tile picking on a pruned cave map.

use crate::types::{Pos, Rect};

use super::automata::CaveMap;

/// Splits the interior into `cell`-sized squares and keeps those with at least
/// `min_open` open tiles. Squares along the far edges are clipped.
pub(super) fn find_caverns(map: &CaveMap, cell: usize, min_open: usize) -> Vec<Rect> {
    let cell = cell.max(1);
    let (width, height) = (map.width(), map.height());
    let mut caverns = Vec::new();

    let mut gy = 0;
    while gy * cell + 1 < height {
        let mut gx = 0;
        while gx * cell + 1 < width {
            let x0 = (gx * cell).max(1);
            let y0 = (gy * cell).max(1);
            let x1 = ((gx + 1) * cell - 1).min(width.saturating_sub(2));
            let y1 = ((gy + 1) * cell - 1).min(height.saturating_sub(2));
            gx += 1;
            if x1 < x0 || y1 < y0 {
                continue;
            }
            let rect = Rect::new(x0, y0, x1 - x0 + 1, y1 - y0 + 1);
            if rect.positions().filter(|&pos| map.is_open(pos)).count() >= min_open {
                caverns.push(rect);
            }
        }
        gy += 1;
    }
    caverns
}

/// A 3x3 cavern anchored on the first open tile, preferring tiles two in from the edge.
pub(super) fn fallback_cavern(map: &CaveMap) -> Option<Rect> {
    let interior = map.interior();
    let anchor = first_open(map, 2).or_else(|| first_open(map, 1))?;
    let x = anchor.x as usize;
    let y = anchor.y as usize;
    let w = 3.min(interior.x + interior.w - x);
    let h = 3.min(interior.y + interior.h - y);
    Some(Rect::new(x, y, w, h))
}

fn first_open(map: &CaveMap, inset: usize) -> Option<Pos> {
    let (width, height) = (map.width(), map.height());
    (inset..height.saturating_sub(inset))
        .flat_map(|y| (inset..width.saturating_sub(inset)).map(move |x| Pos::new(x as i32, y as i32)))
        .find(|&pos| map.is_open(pos))
}

/// The open tile in `area` with the most open cardinal neighbors. First wins ties.
pub(super) fn best_open_tile(map: &CaveMap, area: Rect) -> Option<Pos> {
    let mut best = None;
    let mut best_score = 0;
    for pos in area.positions() {
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x + 1 >= map.width() || y + 1 >= map.height() || !map.is_open(pos) {
            continue;
        }
        let score = 1 + pos.cardinal_neighbors().into_iter().filter(|&next| map.is_open(next)).count();
        if score > best_score {
            best_score = score;
            best = Some(pos);
        }
    }
    best
}

/// A rect centered exactly on `tile` with up to `margin` tiles on each side,
/// shrunk symmetrically to stay inside the border.
pub(super) fn spawn_rect(map: &CaveMap, tile: Pos, margin: usize) -> Rect {
    let x = tile.x.max(1) as usize;
    let y = tile.y.max(1) as usize;
    let half_w = margin.min(x - 1).min(map.width().saturating_sub(2).saturating_sub(x));
    let half_h = margin.min(y - 1).min(map.height().saturating_sub(2).saturating_sub(y));
    Rect::new(x - half_w, y - half_h, 2 * half_w + 1, 2 * half_h + 1)
}

/// Keeps `candidate` when it is at least `min_separation` from `start`; otherwise
/// the open tile strictly farther from `start` than the candidate, if any.
pub(super) fn separated_stairs_tile(map: &CaveMap, start: Pos, candidate: Pos, min_separation: u32) -> Pos {
    let mut best = candidate;
    let mut best_distance = candidate.manhattan(start);
    if best_distance >= min_separation {
        return candidate;
    }
    for pos in map.interior().positions() {
        if pos == start || !map.is_open(pos) {
            continue;
        }
        let distance = pos.manhattan(start);
        if distance > best_distance {
            best_distance = distance;
            best = pos;
        }
    }
    best
}
