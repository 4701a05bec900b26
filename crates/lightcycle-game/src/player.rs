//! Players as the client sees them.

use lightcycle_protocol::PlayerId;

use crate::Position;

/// Where a player is, as far as we know.
///
/// A player is introduced by `player` without a position and only gets one
/// with its first `pos`. Anything that needs a cell has to go through
/// [`Placement::Placed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Known by id and name, no `pos` seen yet.
    Unplaced,
    /// Head position from the latest `pos`.
    Placed(Position),
}

/// A player registered with the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    placement: Placement,
}

impl Player {
    /// A freshly introduced, not yet placed player.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            placement: Placement::Unplaced,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// The head position, if the player has been placed.
    pub fn position(&self) -> Option<Position> {
        match self.placement {
            Placement::Placed(pos) => Some(pos),
            Placement::Unplaced => None,
        }
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn place(&mut self, pos: Position) {
        self.placement = Placement::Placed(pos);
    }
}
