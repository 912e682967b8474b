//! Piece catalog: spawn layouts, colors, and movement/rotation candidates.
//!
//! Pieces are plain values: four absolute board coordinates plus a kind tag.
//! All transform methods are pure. They return a *candidate* coordinate set
//! and never mutate the piece or consult board occupancy. Validation and
//! commitment are the engine's job.
//!
//! Rotation infers the current orientation from the geometric relationship
//! between specific cells (no stored rotation state) and applies a per-kind
//! delta table to reach the next orientation in the cycle. The raw result may
//! leave the board; a greedy single-axis nudge shifts the whole candidate
//! back inside bounds one unit at a time. The nudge looks at bounds only, so
//! a rotation into occupied cells is rejected later by the engine.

use crate::config::GameConfig;
use crate::core::rng::SimpleRng;
use crate::types::{Coordinate, PieceKind};

/// Display color assigned to a piece at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceColor {
    pub fill: &'static str,
    pub border: &'static str,
}

/// Palette pieces draw from, uniformly at random.
pub const PALETTE: [PieceColor; 8] = [
    PieceColor { fill: "red", border: "darkred" },
    PieceColor { fill: "orange", border: "black" },
    PieceColor { fill: "yellow", border: "black" },
    PieceColor { fill: "lime", border: "darkgreen" },
    PieceColor { fill: "cyan", border: "darkblue" },
    PieceColor { fill: "blue", border: "darkblue" },
    PieceColor { fill: "magenta", border: "indigo" },
    PieceColor { fill: "indigo", border: "black" },
];

/// Per-cell offsets applied to a piece's current coordinates to reach the
/// next orientation in its rotation cycle.
type Deltas = [(i32, i32); 4];

/// A game piece: exactly four cells, a color, and the lock-delay flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    kind: PieceKind,
    cells: [Coordinate; 4],
    color: PieceColor,
    locking: bool,
    // Board bounds, captured at creation for the rotation nudge.
    cols: i32,
    rows: i32,
}

impl Piece {
    /// Create a piece of the given kind in its canonical spawn layout,
    /// horizontally centered for the configured board width.
    pub fn new(kind: PieceKind, config: &GameConfig, rng: &mut SimpleRng) -> Self {
        let o = config.spawn_offset();
        let c = |x: i32, y: i32| Coordinate::new(x, y);

        let cells = match kind {
            // 0 1
            // 2 3
            PieceKind::Block => [c(o, 0), c(o + 1, 0), c(o, 1), c(o + 1, 1)],
            // 0 1 2 3
            PieceKind::Line => [c(o - 1, 0), c(o, 0), c(o + 1, 0), c(o + 2, 0)],
            // 0 1
            //   2 3
            PieceKind::Z => [c(o - 1, 0), c(o, 0), c(o, 1), c(o + 1, 1)],
            //   0 1
            // 2 3
            PieceKind::ZInv => [c(o, 0), c(o + 1, 0), c(o - 1, 1), c(o, 1)],
            // 0 1 2
            //   3
            PieceKind::T => [c(o - 1, 0), c(o, 0), c(o + 1, 0), c(o, 1)],
            // 0 1 2
            // 3
            PieceKind::L => [c(o - 1, 0), c(o, 0), c(o + 1, 0), c(o - 1, 1)],
            // 0 1 2
            //     3
            PieceKind::LInv => [c(o - 1, 0), c(o, 0), c(o + 1, 0), c(o + 1, 1)],
        };

        let color = PALETTE[rng.next_range(PALETTE.len() as u32) as usize];

        Self {
            kind,
            cells,
            color,
            locking: false,
            cols: config.cols as i32,
            rows: config.rows as i32,
        }
    }

    /// Create a piece of a uniformly random kind (each 1/7).
    pub fn random(config: &GameConfig, rng: &mut SimpleRng) -> Self {
        let kind = PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize];
        Self::new(kind, config, rng)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn cells(&self) -> &[Coordinate; 4] {
        &self.cells
    }

    pub fn color(&self) -> PieceColor {
        self.color
    }

    pub fn locking(&self) -> bool {
        self.locking
    }

    pub(crate) fn set_locking(&mut self, locking: bool) {
        self.locking = locking;
    }

    /// Commit a validated candidate as the piece's position.
    pub(crate) fn set_cells(&mut self, cells: [Coordinate; 4]) {
        self.cells = cells;
    }

    /// Candidate for a one-column move to the left.
    pub fn left_transform(&self) -> [Coordinate; 4] {
        self.shifted(-1, 0)
    }

    /// Candidate for a one-column move to the right.
    pub fn right_transform(&self) -> [Coordinate; 4] {
        self.shifted(1, 0)
    }

    /// Candidate for a one-row descent.
    pub fn down_transform(&self) -> [Coordinate; 4] {
        self.shifted(0, 1)
    }

    fn shifted(&self, dx: i32, dy: i32) -> [Coordinate; 4] {
        self.cells
            .map(|c| Coordinate::new(c.x + dx, c.y + dy))
    }

    /// Candidate for the next orientation in this piece's rotation cycle.
    ///
    /// BLOCK has no distinct orientation and returns its current cells.
    /// LINE, Z and Z_INV alternate between two orientations; T, L and L_INV
    /// cycle through four. The result is nudged into bounds but may still
    /// overlap occupied cells.
    pub fn rotate_transform(&self) -> [Coordinate; 4] {
        let deltas = match self.kind {
            PieceKind::Block => return self.cells,
            PieceKind::Line => self.line_deltas(),
            PieceKind::Z => self.z_deltas(),
            PieceKind::ZInv => self.z_inv_deltas(),
            PieceKind::T => self.t_deltas(),
            PieceKind::L => self.l_deltas(),
            PieceKind::LInv => self.l_inv_deltas(),
        };

        let mut candidate = self.cells;
        for (cell, (dx, dy)) in candidate.iter_mut().zip(deltas) {
            cell.x += dx;
            cell.y += dy;
        }
        fit_in_bounds(candidate, self.cols, self.rows)
    }

    /// LINE alternates horizontal/vertical; cells 0..3 stay ordered along
    /// the bar, pivoting around cell 3.
    fn line_deltas(&self) -> Deltas {
        if self.cells[0].y == self.cells[1].y {
            // Horizontal, stand the bar up.
            [(1, -3), (0, -2), (-1, -1), (-2, 0)]
        } else {
            [(-1, 3), (0, 2), (1, 1), (2, 0)]
        }
    }

    fn z_deltas(&self) -> Deltas {
        if self.cells[0].y == self.cells[1].y {
            [(1, -1), (0, 0), (-1, -1), (-2, 0)]
        } else {
            [(-1, 1), (0, 0), (1, 1), (2, 0)]
        }
    }

    fn z_inv_deltas(&self) -> Deltas {
        if self.cells[0].y == self.cells[1].y {
            [(-1, -1), (-2, 0), (1, -1), (0, 0)]
        } else {
            [(1, 1), (2, 0), (-1, 1), (0, 0)]
        }
    }

    /// T orientation is read off the stem (cell 3) relative to the bar
    /// center (cell 1).
    fn t_deltas(&self) -> Deltas {
        let (bar, stem) = (self.cells[1], self.cells[3]);
        if bar.x == stem.x {
            if bar.y < stem.y {
                // Stem points down: 0 -> 90.
                [(2, 0), (1, 1), (0, 2), (0, 0)]
            } else {
                // Stem points up: 180 -> 270.
                [(-2, 0), (-1, -1), (0, -2), (0, 0)]
            }
        } else if bar.x > stem.x {
            // Stem points left: 90 -> 180.
            [(0, 2), (-1, 1), (-2, 0), (0, 0)]
        } else {
            // Stem points right: 270 -> 0.
            [(0, -2), (1, -1), (2, 0), (0, 0)]
        }
    }

    /// L orientation is read off the foot (cell 3) relative to the bar
    /// end it hangs from (cell 0).
    fn l_deltas(&self) -> Deltas {
        let (end, foot) = (self.cells[0], self.cells[3]);
        if end.x == foot.x {
            if end.y < foot.y {
                [(2, 0), (1, 1), (0, 2), (1, -1)]
            } else {
                [(-2, 0), (-1, -1), (0, -2), (-1, 1)]
            }
        } else if end.x > foot.x {
            [(0, 2), (-1, 1), (-2, 0), (1, 1)]
        } else {
            [(0, -2), (1, -1), (2, 0), (-1, -1)]
        }
    }

    /// L_INV orientation is read off the foot (cell 3) relative to the bar
    /// end it hangs from (cell 2).
    fn l_inv_deltas(&self) -> Deltas {
        let (end, foot) = (self.cells[2], self.cells[3]);
        if end.y == foot.y {
            if end.x > foot.x {
                [(0, 2), (-1, 1), (-2, 0), (-1, -1)]
            } else {
                [(0, -2), (1, -1), (2, 0), (1, 1)]
            }
        } else if end.y < foot.y {
            [(2, 0), (1, 1), (0, 2), (-1, 1)]
        } else {
            [(-2, 0), (-1, -1), (0, -2), (1, -1)]
        }
    }
}

/// Greedy single-axis bounds correction.
///
/// Shifts the whole candidate one unit at a time until every coordinate is
/// inside [0, cols) x [0, rows). The first offending coordinate in index
/// order picks the axis: x-underflow before x-overflow before y-underflow
/// before y-overflow. Occupancy is deliberately not considered.
fn fit_in_bounds(mut cells: [Coordinate; 4], cols: i32, rows: i32) -> [Coordinate; 4] {
    loop {
        let mut shift = None;
        for cell in &cells {
            if cell.x < 0 {
                shift = Some((1, 0));
            } else if cell.x >= cols {
                shift = Some((-1, 0));
            } else if cell.y < 0 {
                shift = Some((0, 1));
            } else if cell.y >= rows {
                shift = Some((0, -1));
            }
            if shift.is_some() {
                break;
            }
        }

        match shift {
            Some((dx, dy)) => {
                for cell in &mut cells {
                    cell.x += dx;
                    cell.y += dy;
                }
            }
            None => return cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(kind: PieceKind) -> Piece {
        let config = GameConfig::default();
        let mut rng = SimpleRng::new(1);
        Piece::new(kind, &config, &mut rng)
    }

    fn sorted(mut cells: [Coordinate; 4]) -> [Coordinate; 4] {
        cells.sort_by_key(|c| (c.y, c.x));
        cells
    }

    #[test]
    fn spawn_layouts_have_four_distinct_in_bounds_cells() {
        for kind in PieceKind::ALL {
            let p = piece(kind);
            let cells = p.cells();
            for (i, a) in cells.iter().enumerate() {
                assert!(a.x >= 0 && a.x < 10, "{kind:?} x in bounds");
                assert!(a.y >= 0 && a.y < 20, "{kind:?} y in bounds");
                for b in &cells[i + 1..] {
                    assert_ne!(a, b, "{kind:?} cells must be distinct");
                }
            }
        }
    }

    #[test]
    fn spawn_is_centered() {
        // Offset 4 on the default 10-wide board.
        let p = piece(PieceKind::Block);
        assert_eq!(
            *p.cells(),
            [
                Coordinate::new(4, 0),
                Coordinate::new(5, 0),
                Coordinate::new(4, 1),
                Coordinate::new(5, 1),
            ]
        );
    }

    #[test]
    fn shift_transforms_do_not_mutate() {
        let p = piece(PieceKind::T);
        let before = *p.cells();

        let left = p.left_transform();
        let right = p.right_transform();
        let down = p.down_transform();

        assert_eq!(*p.cells(), before);
        for i in 0..4 {
            assert_eq!(left[i].x, before[i].x - 1);
            assert_eq!(left[i].y, before[i].y);
            assert_eq!(right[i].x, before[i].x + 1);
            assert_eq!(down[i].y, before[i].y + 1);
        }
    }

    #[test]
    fn block_rotation_is_identity() {
        let p = piece(PieceKind::Block);
        assert_eq!(p.rotate_transform(), *p.cells());
    }

    #[test]
    fn two_state_pieces_return_after_two_rotations() {
        for kind in [PieceKind::Line, PieceKind::Z, PieceKind::ZInv] {
            let mut p = piece(kind);
            // Drop to mid-board so the bounds nudge stays out of the way.
            for _ in 0..8 {
                p.set_cells(p.down_transform());
            }
            let start = sorted(*p.cells());

            let once = p.rotate_transform();
            assert_ne!(sorted(once), start, "{kind:?} first rotation changes layout");
            p.set_cells(once);

            let twice = p.rotate_transform();
            p.set_cells(twice);
            assert_eq!(sorted(twice), start, "{kind:?} returns after two rotations");
        }
    }

    #[test]
    fn four_state_pieces_return_after_four_rotations() {
        for kind in [PieceKind::T, PieceKind::L, PieceKind::LInv] {
            let mut p = piece(kind);
            for _ in 0..8 {
                p.set_cells(p.down_transform());
            }
            let start = sorted(*p.cells());

            let mut layouts = vec![start];
            for _ in 0..4 {
                let next = p.rotate_transform();
                p.set_cells(next);
                layouts.push(sorted(next));
            }

            assert_eq!(layouts[4], start, "{kind:?} returns after four rotations");
            // The three intermediate layouts are all distinct from spawn.
            for mid in &layouts[1..4] {
                assert_ne!(*mid, start, "{kind:?} intermediate layouts differ");
            }
        }
    }

    #[test]
    fn rotation_keeps_four_distinct_cells() {
        for kind in PieceKind::ALL {
            let mut p = piece(kind);
            for _ in 0..6 {
                p.set_cells(p.down_transform());
            }
            for _ in 0..4 {
                let next = p.rotate_transform();
                for (i, a) in next.iter().enumerate() {
                    for b in &next[i + 1..] {
                        assert_ne!(a, b, "{kind:?} rotation produced overlap");
                    }
                }
                p.set_cells(next);
            }
        }
    }

    #[test]
    fn line_against_left_wall_rotates_in_bounds() {
        let mut p = piece(PieceKind::Line);
        // Stand the bar up, then push it to the left wall.
        p.set_cells(p.rotate_transform());
        while p.cells().iter().all(|c| c.x > 0) {
            p.set_cells(p.left_transform());
        }
        assert!(p.cells().iter().any(|c| c.x == 0));

        let horizontal = p.rotate_transform();
        assert!(
            horizontal.iter().all(|c| c.x >= 0 && c.x < 10),
            "nudge keeps rotation in bounds: {horizontal:?}"
        );
    }

    #[test]
    fn rotation_at_floor_stays_above_floor() {
        for kind in PieceKind::ALL {
            let mut p = piece(kind);
            // Push the piece to the bottom edge.
            while p.cells().iter().all(|c| c.y < 19) {
                p.set_cells(p.down_transform());
            }
            let candidate = p.rotate_transform();
            assert!(
                candidate.iter().all(|c| c.y >= 0 && c.y < 20),
                "{kind:?} rotation at floor out of bounds: {candidate:?}"
            );
        }
    }

    #[test]
    fn fit_in_bounds_prefers_x_correction_first() {
        let cells = [
            Coordinate::new(-1, -1),
            Coordinate::new(0, 0),
            Coordinate::new(1, 1),
            Coordinate::new(2, 2),
        ];
        let fitted = fit_in_bounds(cells, 10, 20);
        assert_eq!(fitted[0], Coordinate::new(0, 0));
        assert_eq!(fitted[3], Coordinate::new(3, 3));
    }

    #[test]
    fn colors_come_from_palette() {
        let config = GameConfig::default();
        let mut rng = SimpleRng::new(42);
        for _ in 0..50 {
            let p = Piece::random(&config, &mut rng);
            assert!(PALETTE.contains(&p.color()));
        }
    }

    #[test]
    fn random_pieces_cover_all_kinds() {
        let config = GameConfig::default();
        let mut rng = SimpleRng::new(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(Piece::random(&config, &mut rng).kind());
        }
        assert_eq!(seen.len(), 7);
    }
}
