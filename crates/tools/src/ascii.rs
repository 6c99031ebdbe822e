//! Plain-text rendering of a generated floor.

use dungeon_core::{MapGeneratorResult, Pos, TileKind};

pub fn tile_glyph(kind: TileKind) -> char {
    match kind {
        TileKind::Wall => '#',
        TileKind::Floor => '.',
        TileKind::Corridor => ',',
        TileKind::Door => '+',
        TileKind::StairsDown => '>',
        TileKind::StairsUp => '<',
    }
}

/// One line per row. Traps draw as `^` and the spawn as `@`, which wins over both.
pub fn render(layout: &MapGeneratorResult) -> String {
    let tiles = &layout.tiles;
    let mut out = String::with_capacity((tiles.width() + 1) * tiles.height());
    for y in 0..tiles.height() {
        for x in 0..tiles.width() {
            let pos = Pos::new(x as i32, y as i32);
            let glyph = if pos == layout.start_tile {
                '@'
            } else if layout.traps.index_at(pos).is_some() {
                '^'
            } else {
                tile_glyph(tiles.kind_at(pos))
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use dungeon_core::{BranchId, generate_floor};

    use super::*;

    #[test]
    fn rendered_map_has_one_line_per_row_and_one_spawn() {
        let layout = generate_floor(12, BranchId::Main, 1);
        let text = render(&layout);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), layout.height);
        assert!(lines.iter().all(|line| line.chars().count() == layout.width));
        assert_eq!(text.matches('@').count(), 1);
        assert_eq!(text.matches('>').count(), layout.stairs.len());
        assert_eq!(text.matches('^').count(), layout.traps.len());
    }
}
