//! Plays the Snail bot against an empty board, acting as the server.

use lightcycle_game::{Action, Bot, GameState};
use lightcycle_protocol::{Direction, PlayerId};
use lightcycle_strategy::{Opportunities, Snail};

const ME: PlayerId = PlayerId(7);

fn new_game(width: u32, height: u32) -> GameState {
    let mut state = GameState::new("snail");
    state.start_game(width, height);
    state.register_player(ME, "snail");
    state.place_player(ME, 0, 0).unwrap();
    state
}

/// Applies one tick: asks the bot, then moves its head like the server would.
/// Returns `false` once the bot crashed into something.
fn tick(bot: &mut Snail, state: &mut GameState) -> bool {
    let scores = Opportunities::evaluate(state).unwrap();
    let Action::Move(dir) = bot.on_tick(state) else {
        panic!("snail must always move");
    };
    state.set_last_direction(dir);

    let grid = state.grid().unwrap();
    let next = grid.step(state.self_position().unwrap(), dir);

    if grid.is_occupied(next) {
        // Only allowed when every move scored zero and the tie-break had
        // nothing better than the first direction.
        let any_positive = Direction::ALL.iter().any(|&d| scores.get(d) > 0.0);
        assert!(!any_positive, "moved {dir} into a wall: {scores}");
        return false;
    }
    state.place_player(ME, next.x as i64, next.y as i64).unwrap();
    true
}

#[test]
fn test_only_crashes_when_every_move_scores_zero() {
    let mut bot = Snail::new();
    let mut state = new_game(8, 8);

    for _ in 0..64 {
        if !tick(&mut bot, &mut state) {
            break;
        }
    }
    assert!(state.grid().unwrap().occupied() > 1);
}

#[test]
fn test_first_move_on_empty_board_keeps_heading() {
    let mut bot = Snail::new();
    let state = new_game(30, 30);
    assert_eq!(bot.on_tick(&state), Action::Move(Direction::Up));
}

#[test]
fn test_survives_a_long_open_run() {
    let mut bot = Snail::new();
    let mut state = new_game(40, 40);

    for n in 0..30 {
        assert!(tick(&mut bot, &mut state), "crashed on tick {n}");
    }
    assert_eq!(state.grid().unwrap().occupied(), 31);
}
