//! The reference bot: move towards the most open space.
//!
//! Every tick, each of the four moves gets an *opportunity* score:
//!
//! 1. A move onto an occupied cell scores 0. It is never taken while any
//!    other move scores higher.
//! 2. Otherwise the target cell is treated as taken and a flood fill is run
//!    from each of its neighbors, each with its own visited set. The base
//!    score is the largest of the four areas.
//! 3. The base is scaled by a few modifiers (see the `*_FACTOR` constants).
//!
//! The highest score wins; ties go to the first move in
//! [`Direction::ALL`] order.

use std::fmt;

use lightcycle_game::{Action, Bot, GameState, Grid, Position};
use lightcycle_protocol::Direction;
use tracing::{debug, info, warn};

use crate::flood::{AREA_DEPTH, FLOOD_ORDER, Visited, calc_area};

/// Applied when the cell past the target, in the direction of travel, is
/// occupied. Currently has no effect.
pub const GAP_CLOSING_FACTOR: f64 = 1.0;

/// Applied when another player's head is next to the target.
pub const OPPONENT_NEAR_FACTOR: f64 = 0.1;

/// Applied when the move continues in the previous direction.
pub const MOMENTUM_FACTOR: f64 = 1.2;

/// Scores for all four moves, in [`Direction::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opportunities([(Direction, f64); 4]);

impl Opportunities {
    /// Scores every move from our current position.
    ///
    /// Returns `None` until the grid exists and our own position is known.
    pub fn evaluate(state: &GameState) -> Option<Self> {
        let grid = state.grid()?;
        let head = state.self_position()?;
        Some(Self(
            Direction::ALL.map(|dir| (dir, opportunity(state, grid, head, dir))),
        ))
    }

    /// The score of a single move.
    pub fn get(&self, dir: Direction) -> f64 {
        self.0
            .iter()
            .find(|(d, _)| *d == dir)
            .map_or(0.0, |(_, score)| *score)
    }

    /// The move with the strictly highest score; earlier moves win ties.
    pub fn best(&self) -> Direction {
        let mut best = self.0[0];
        for candidate in &self.0[1..] {
            if candidate.1 > best.1 {
                best = *candidate;
            }
        }
        best.0
    }
}

impl fmt::Display for Opportunities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (dir, score)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{dir}={score:.2}")?;
        }
        Ok(())
    }
}

/// Scores moving from `head` in `dir`.
pub fn opportunity(
    state: &GameState,
    grid: &Grid,
    head: Position,
    dir: Direction,
) -> f64 {
    let target = grid.step(head, dir);
    if grid.is_occupied(target) {
        return 0.0;
    }

    // Each neighbor gets a fresh visited set with the target already in it,
    // which blocks the target exactly like an occupied cell would. Cells
    // reachable from several neighbors are counted by each of them.
    let base = FLOOD_ORDER
        .iter()
        .map(|&n| {
            let mut visited = Visited::new(grid);
            visited.insert(grid, target);
            calc_area(grid, grid.step(target, n), AREA_DEPTH, &mut visited)
        })
        .max()
        .unwrap_or(0);

    let mut modifier = 1.0;
    if grid.is_occupied(grid.step(target, dir)) {
        modifier *= GAP_CLOSING_FACTOR;
    }
    let neighbors = grid.neighbors(target);
    if let Some(player) = state
        .opponents()
        .find(|p| p.position().is_some_and(|pos| neighbors.contains(&pos)))
    {
        debug!(%dir, near = player.name(), "player near target");
        modifier *= OPPONENT_NEAR_FACTOR;
    }
    if dir == state.last_direction() {
        modifier *= MOMENTUM_FACTOR;
    }

    f64::from(base) * modifier
}

/// Flood-fill bot that keeps moving towards open space.
#[derive(Debug, Clone, Copy, Default)]
pub struct Snail;

impl Snail {
    pub fn new() -> Self {
        Self
    }
}

impl Bot for Snail {
    fn on_tick(&mut self, state: &GameState) -> Action {
        let Some(opportunities) = Opportunities::evaluate(state) else {
            let dir = state.last_direction();
            warn!(%dir, "own position unknown, keeping direction");
            return Action::Move(dir);
        };

        debug!(%opportunities, "opportunities");
        let dir = opportunities.best();
        info!(%dir, "moving");
        Action::Move(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightcycle_protocol::PlayerId;

    const ME: PlayerId = PlayerId(1);

    /// A started game with us placed at `(x, y)`.
    fn state_at(width: u32, height: u32, x: i64, y: i64) -> GameState {
        let mut state = GameState::new("me");
        state.start_game(width, height);
        state.register_player(ME, "me");
        state.place_player(ME, x, y).unwrap();
        state
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_equal_areas_momentum_wins() {
        let state = state_at(3, 3, 1, 1);
        let opps = Opportunities::evaluate(&state).unwrap();

        assert!(approx(opps.get(Direction::Up), 7.0 * MOMENTUM_FACTOR));
        for dir in [Direction::Down, Direction::Left, Direction::Right] {
            assert!(approx(opps.get(dir), 7.0));
            assert!(opps.get(Direction::Up) > opps.get(dir));
        }
        assert_eq!(opps.best(), Direction::Up);
    }

    #[test]
    fn test_momentum_follows_last_direction() {
        let mut state = state_at(3, 3, 1, 1);
        state.set_last_direction(Direction::Left);
        let opps = Opportunities::evaluate(&state).unwrap();
        assert_eq!(opps.best(), Direction::Left);
    }

    #[test]
    fn test_occupied_target_scores_zero() {
        let mut state = state_at(21, 21, 10, 10);
        state.register_player(PlayerId(2), "wall");
        for y in 0..21 {
            state.place_player(PlayerId(2), 11, y).unwrap();
        }
        state.set_last_direction(Direction::Right);

        let opps = Opportunities::evaluate(&state).unwrap();
        assert_eq!(opps.get(Direction::Right), 0.0);
        assert_ne!(opps.best(), Direction::Right);
    }

    #[test]
    fn test_opponent_near_target_is_penalised() {
        let mut state = state_at(21, 21, 10, 10);
        state.register_player(PlayerId(2), "rival");
        state.place_player(PlayerId(2), 12, 10).unwrap();
        state.set_last_direction(Direction::Right);

        let opps = Opportunities::evaluate(&state).unwrap();
        let right = opps.get(Direction::Right);
        assert!(right > 0.0);
        assert!(right < opps.get(Direction::Up));
        assert!(right < opps.get(Direction::Left));
        assert_ne!(opps.best(), Direction::Right);
    }

    #[test]
    fn test_self_is_not_an_opponent() {
        // We are always next to our own target; that must not count.
        let state = state_at(21, 21, 10, 10);
        let opps = Opportunities::evaluate(&state).unwrap();
        assert!(opps.get(Direction::Down) > 10.0);
    }

    #[test]
    fn test_gap_closing_is_inert() {
        // Moving up from (10, 2) lands on (10, 1); the cell beyond it is a
        // trail cell at (10, 0) whose owner has moved far away. The score
        // must be plain area times momentum.
        let mut state = state_at(21, 21, 10, 2);
        state.register_player(PlayerId(2), "rival");
        state.place_player(PlayerId(2), 10, 0).unwrap();
        state.place_player(PlayerId(2), 0, 15).unwrap();
        let grid = state.grid().unwrap();
        let head = state.self_position().unwrap();
        let target = Position::new(10, 1);

        let base = grid
            .neighbors(target)
            .iter()
            .map(|&n| {
                let mut visited = Visited::new(grid);
                visited.insert(grid, target);
                calc_area(grid, n, AREA_DEPTH, &mut visited)
            })
            .max()
            .unwrap();

        let score = opportunity(&state, grid, head, Direction::Up);
        assert!(approx(score, f64::from(base) * MOMENTUM_FACTOR));
    }

    #[test]
    fn test_ties_go_to_first_direction() {
        let opps = Opportunities([
            (Direction::Up, 3.0),
            (Direction::Down, 5.0),
            (Direction::Left, 5.0),
            (Direction::Right, 1.0),
        ]);
        assert_eq!(opps.best(), Direction::Down);

        let all_zero = Opportunities(Direction::ALL.map(|d| (d, 0.0)));
        assert_eq!(all_zero.best(), Direction::Up);
    }

    #[test]
    fn test_display() {
        let opps = Opportunities(Direction::ALL.map(|d| (d, 1.5)));
        assert_eq!(
            opps.to_string(),
            "up=1.50, down=1.50, left=1.50, right=1.50"
        );
    }

    #[test]
    fn test_snail_moves_on_tick() {
        let state = state_at(3, 3, 1, 1);
        assert_eq!(Snail.on_tick(&state), Action::Move(Direction::Up));
    }

    #[test]
    fn test_snail_keeps_direction_when_unplaced() {
        let mut state = GameState::new("me");
        state.start_game(5, 5);
        state.set_last_direction(Direction::Right);
        assert_eq!(Snail.on_tick(&state), Action::Move(Direction::Right));
    }
}
