//! The toroidal occupancy grid.
//!
//! There are no walls: stepping off one edge lands on the opposite one.
//! Every coordinate that enters the grid goes through
//! [`Grid::normalize`] first, so a [`Position`] is always in range.

use lightcycle_protocol::{Direction, PlayerId};

/// A cell coordinate that is known to lie on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A `width × height` torus of cells, each empty or owned by a player.
///
/// Trails and heads are not distinguished: any owned cell blocks movement.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major, `y * width + x`.
    cells: Vec<Option<PlayerId>>,
}

impl Grid {
    /// Allocates an empty grid. Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Self {
        let width = width as usize;
        let height = height as usize;
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Wraps arbitrary coordinates onto the torus.
    ///
    /// ```rust
    /// use lightcycle_game::{Grid, Position};
    ///
    /// let grid = Grid::new(20, 10);
    /// assert_eq!(grid.normalize(-1, 0), Position::new(19, 0));
    /// assert_eq!(grid.normalize(20, 10), Position::new(0, 0));
    /// ```
    pub fn normalize(&self, x: i64, y: i64) -> Position {
        Position {
            x: x.rem_euclid(self.width as i64) as usize,
            y: y.rem_euclid(self.height as i64) as usize,
        }
    }

    /// The cell `(dx, dy)` away from `from`, wrapped.
    pub fn offset(&self, from: Position, dx: i64, dy: i64) -> Position {
        self.normalize(from.x as i64 + dx, from.y as i64 + dy)
    }

    /// The cell one step from `from` in `dir`, wrapped.
    pub fn step(&self, from: Position, dir: Direction) -> Position {
        let (dx, dy) = dir.offset();
        self.offset(from, dx, dy)
    }

    /// The four orthogonal neighbors of `pos`, in [`Direction::ALL`] order.
    pub fn neighbors(&self, pos: Position) -> [Position; 4] {
        Direction::ALL.map(|dir| self.step(pos, dir))
    }

    /// Flat index of `pos`, usable for per-cell side tables.
    pub fn index(&self, pos: Position) -> usize {
        pos.y * self.width + pos.x
    }

    /// The owner of `pos`, if any.
    pub fn get(&self, pos: Position) -> Option<PlayerId> {
        self.cells[self.index(pos)]
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// Marks `pos` as owned by `id`.
    pub fn set(&mut self, pos: Position, id: PlayerId) {
        let idx = self.index(pos);
        self.cells[idx] = Some(id);
    }

    /// Empties every cell owned by `id`. Returns how many were cleared.
    pub fn clear_player(&mut self, id: PlayerId) -> usize {
        let mut cleared = 0;
        for cell in self.cells.iter_mut().filter(|c| **c == Some(id)) {
            *cell = None;
            cleared += 1;
        }
        cleared
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_wraps_both_axes() {
        let grid = Grid::new(20, 10);
        assert_eq!(grid.normalize(-1, 0), Position::new(19, 0));
        assert_eq!(grid.normalize(20, 10), Position::new(0, 0));
        assert_eq!(grid.normalize(-21, -11), Position::new(19, 9));
        assert_eq!(grid.normalize(5, 5), Position::new(5, 5));
    }

    #[test]
    fn test_step_wraps() {
        let grid = Grid::new(4, 3);
        let corner = Position::new(0, 0);
        assert_eq!(grid.step(corner, Direction::Up), Position::new(0, 2));
        assert_eq!(grid.step(corner, Direction::Left), Position::new(3, 0));
        assert_eq!(grid.step(corner, Direction::Down), Position::new(0, 1));
        assert_eq!(grid.step(corner, Direction::Right), Position::new(1, 0));
    }

    #[test]
    fn test_neighbors_order() {
        let grid = Grid::new(5, 5);
        let n = grid.neighbors(Position::new(2, 2));
        assert_eq!(
            n,
            [
                Position::new(2, 1),
                Position::new(2, 3),
                Position::new(1, 2),
                Position::new(3, 2),
            ]
        );
    }

    #[test]
    fn test_set_and_clear_player() {
        let mut grid = Grid::new(3, 3);
        grid.set(Position::new(0, 0), PlayerId(1));
        grid.set(Position::new(1, 0), PlayerId(1));
        grid.set(Position::new(2, 2), PlayerId(2));
        assert_eq!(grid.occupied(), 3);

        assert_eq!(grid.clear_player(PlayerId(1)), 2);
        assert!(!grid.is_occupied(Position::new(0, 0)));
        assert!(!grid.is_occupied(Position::new(1, 0)));
        assert_eq!(grid.get(Position::new(2, 2)), Some(PlayerId(2)));
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(7, 3);
        assert_eq!(grid.len(), 21);
        assert_eq!(grid.occupied(), 0);
    }
}
