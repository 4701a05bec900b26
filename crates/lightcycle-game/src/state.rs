//! The client-side model of a match.
//!
//! `GameState` is owned by exactly one client loop and mutated only by it.
//! It starts empty at connect time, gets its grid from the `game` message,
//! and is thrown away when the match ends.

use std::collections::HashMap;

use lightcycle_protocol::{Direction, PlayerId};
use tracing::{debug, info};

use crate::{GameError, Grid, Player, Position};

/// Everything the client knows about the current match.
#[derive(Debug, Clone)]
pub struct GameState {
    /// The name we joined with; used to recognise ourselves.
    own_name: String,
    /// `None` until the `game` message arrives.
    grid: Option<Grid>,
    players: HashMap<PlayerId, Player>,
    self_id: Option<PlayerId>,
    self_position: Option<Position>,
    last_direction: Direction,
    joined: bool,
}

impl GameState {
    /// Creates an empty state for a client joining as `own_name`.
    pub fn new(own_name: impl Into<String>) -> Self {
        Self {
            own_name: own_name.into(),
            grid: None,
            players: HashMap::new(),
            self_id: None,
            self_position: None,
            last_direction: Direction::default(),
            joined: false,
        }
    }

    // -- Lifecycle --

    /// Allocates an empty `width × height` grid and marks us joined.
    pub fn start_game(&mut self, width: u32, height: u32) {
        self.grid = Some(Grid::new(width, height));
        self.joined = true;
        info!(width, height, "game started");
    }

    /// Marks the match as over. The run loop stops once this is called.
    pub fn finish(&mut self) {
        self.joined = false;
    }

    /// `true` between `game` and `win`/`lose`.
    pub fn is_joined(&self) -> bool {
        self.joined
    }

    // -- Players --

    /// Inserts or renames a player.
    ///
    /// The first player whose name matches ours becomes "self". Later
    /// matches never reassign it. Returns `true` if `id` is us.
    pub fn register_player(&mut self, id: PlayerId, name: &str) -> bool {
        match self.players.get_mut(&id) {
            Some(player) => player.rename(name),
            None => {
                self.players.insert(id, Player::new(id, name));
            }
        }

        if self.self_id.is_none() && name == self.own_name {
            self.self_id = Some(id);
            info!(%id, name, "identified self");
        } else {
            debug!(%id, name, "player registered");
        }
        self.self_id == Some(id)
    }

    /// Records a `pos` event: wraps `(x, y)`, moves the player's head there
    /// and marks the cell as theirs.
    ///
    /// # Errors
    /// [`GameError::NotStarted`] before the grid exists and
    /// [`GameError::MissingPlayer`] for an id that was never registered.
    pub fn place_player(
        &mut self,
        id: PlayerId,
        x: i64,
        y: i64,
    ) -> Result<Position, GameError> {
        let grid = self.grid.as_mut().ok_or(GameError::NotStarted)?;
        let player = self
            .players
            .get_mut(&id)
            .ok_or(GameError::MissingPlayer(id))?;

        let pos = grid.normalize(x, y);
        player.place(pos);
        grid.set(pos, id);

        if self.self_id == Some(id) {
            self.self_position = Some(pos);
        }
        Ok(pos)
    }

    /// Empties every cell owned by `id`, leaving the player registered.
    ///
    /// Returns how many cells were cleared.
    pub fn clear_trail(&mut self, id: PlayerId) -> Result<usize, GameError> {
        if !self.players.contains_key(&id) {
            return Err(GameError::MissingPlayer(id));
        }
        Ok(self.grid.as_mut().map_or(0, |grid| grid.clear_player(id)))
    }

    /// Drops a player from the registry and clears its trail.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<Player, GameError> {
        self.clear_trail(id)?;
        self.players.remove(&id).ok_or(GameError::MissingPlayer(id))
    }

    /// Looks up a registered player.
    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players.get(&id).ok_or(GameError::MissingPlayer(id))
    }

    /// All registered players, in no particular order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Placed players other than us.
    pub fn opponents(&self) -> impl Iterator<Item = &Player> {
        let me = self.self_id;
        self.players
            .values()
            .filter(move |p| Some(p.id()) != me && p.position().is_some())
    }

    // -- Self --

    pub fn own_name(&self) -> &str {
        &self.own_name
    }

    pub fn self_id(&self) -> Option<PlayerId> {
        self.self_id
    }

    pub fn self_position(&self) -> Option<Position> {
        self.self_position
    }

    /// The direction of the last move we sent.
    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    pub fn set_last_direction(&mut self, dir: Direction) {
        self.last_direction = dir;
    }

    // -- Grid --

    /// The grid, once the game has started.
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }
}
