//! Depth-bounded flood fill.
//!
//! [`calc_area`] estimates how much room there is around a cell by walking
//! outwards depth-first, never further than `depth` steps along the current
//! path. It is an estimate, not a shortest-path count: once a cell has been
//! reached it is never entered again in the same call tree, even if a
//! shorter path would have reached it with more budget left. Because of
//! that the result depends on [`FLOOD_ORDER`] and is not monotonic in
//! `depth`.

use lightcycle_game::{Grid, Position};
use lightcycle_protocol::Direction;

/// Default search depth used when scoring moves.
pub const AREA_DEPTH: u32 = 10;

/// Order in which neighbors are expanded. Part of the result.
pub const FLOOD_ORDER: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Down,
    Direction::Up,
];

/// Cells already counted by one flood-fill call tree.
#[derive(Debug, Clone)]
pub struct Visited {
    seen: Vec<bool>,
}

impl Visited {
    /// An empty set sized for `grid`.
    pub fn new(grid: &Grid) -> Self {
        Self {
            seen: vec![false; grid.len()],
        }
    }

    /// Marks `pos`. Returns `false` if it was already marked.
    pub fn insert(&mut self, grid: &Grid, pos: Position) -> bool {
        let idx = grid.index(pos);
        !std::mem::replace(&mut self.seen[idx], true)
    }

    pub fn contains(&self, grid: &Grid, pos: Position) -> bool {
        self.seen[grid.index(pos)]
    }
}

/// Counts the free cells reachable from `pos` within `depth` steps.
///
/// Returns 0 when `depth` is 0, when `pos` is occupied, or when `pos` is
/// already in `visited`. Otherwise marks `pos` and returns 1 plus the area
/// of each neighbor at `depth - 1`, sharing `visited`.
pub fn calc_area(grid: &Grid, pos: Position, depth: u32, visited: &mut Visited) -> u32 {
    if depth == 0 || grid.is_occupied(pos) || !visited.insert(grid, pos) {
        return 0;
    }

    1 + FLOOD_ORDER
        .iter()
        .map(|&dir| calc_area(grid, grid.step(pos, dir), depth - 1, visited))
        .sum::<u32>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightcycle_protocol::PlayerId;

    fn area(grid: &Grid, x: usize, y: usize, depth: u32) -> u32 {
        calc_area(grid, Position::new(x, y), depth, &mut Visited::new(grid))
    }

    #[test]
    fn test_depth_zero_is_empty() {
        let grid = Grid::new(5, 5);
        assert_eq!(area(&grid, 2, 2, 0), 0);
    }

    #[test]
    fn test_occupied_start_is_empty() {
        let mut grid = Grid::new(5, 5);
        grid.set(Position::new(2, 2), PlayerId(1));
        assert_eq!(area(&grid, 2, 2, AREA_DEPTH), 0);
    }

    #[test]
    fn test_enclosed_cell_has_area_one() {
        let mut grid = Grid::new(5, 5);
        let center = Position::new(2, 2);
        for n in grid.neighbors(center) {
            grid.set(n, PlayerId(1));
        }
        assert_eq!(area(&grid, 2, 2, AREA_DEPTH), 1);
    }

    #[test]
    fn test_visited_start_is_empty() {
        let grid = Grid::new(5, 5);
        let mut visited = Visited::new(&grid);
        assert!(visited.insert(&grid, Position::new(2, 2)));
        assert!(!visited.insert(&grid, Position::new(2, 2)));
        assert!(visited.contains(&grid, Position::new(2, 2)));
        assert_eq!(calc_area(&grid, Position::new(2, 2), 5, &mut visited), 0);
    }

    #[test]
    fn test_open_grid_small_depths() {
        let grid = Grid::new(21, 21);
        assert_eq!(area(&grid, 10, 10, 1), 1);
        // Center plus its four neighbors.
        assert_eq!(area(&grid, 10, 10, 2), 5);
        assert_eq!(area(&grid, 10, 10, 3), 13);
    }

    #[test]
    fn test_open_grid_values_per_depth() {
        // Depth-first with a shared visited set: a cell claimed by a long
        // path is lost to shorter ones, so deeper isn't always larger.
        let grid = Grid::new(21, 21);
        let expected = [0, 1, 5, 13, 21, 41, 31, 61, 61, 107, 86];
        for (depth, want) in expected.into_iter().enumerate() {
            assert_eq!(area(&grid, 10, 10, depth as u32), want, "depth {depth}");
        }
    }

    #[test]
    fn test_open_grid_bounded_by_diamond() {
        let grid = Grid::new(21, 21);
        for k in 1..=AREA_DEPTH {
            let diamond = 2 * k * k - 2 * k + 1;
            assert!(area(&grid, 10, 10, k) <= diamond);
        }
    }

    #[test]
    fn test_result_independent_of_start_on_open_torus() {
        let grid = Grid::new(21, 21);
        assert_eq!(area(&grid, 0, 0, AREA_DEPTH), area(&grid, 10, 10, AREA_DEPTH));
    }

    #[test]
    fn test_corridor_wraps_around() {
        // A single free row on a 10x3 torus is a ring of 10 cells.
        let mut grid = Grid::new(10, 3);
        for x in 0..10 {
            grid.set(Position::new(x, 0), PlayerId(1));
            grid.set(Position::new(x, 2), PlayerId(1));
        }
        assert_eq!(area(&grid, 0, 1, 4), 7);
        assert_eq!(area(&grid, 0, 1, AREA_DEPTH), 10);
    }
}
