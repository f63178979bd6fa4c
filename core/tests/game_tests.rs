// SPDX-License-Identifier: MIT OR Apache-2.0

use std::cell::RefCell;
use std::rc::Rc;

use goban_core::{
    Board, Color, Game, GameConfig, GameError, GameEvent, GamePhase, MoveKind, Pos,
};

fn p(x: i32, y: i32) -> Pos {
    Pos::new(x, y)
}

fn standard_game() -> Game {
    Game::new(Board::rectangular((19, 19)).unwrap(), GameConfig::default())
}

#[test]
fn a_new_game_starts_with_black_to_play() {
    let game = standard_game();
    assert_eq!(game.phase(), GamePhase::Play);
    assert_eq!(game.next_player(), Color::Black);
    assert!(game.last_move().is_none());
    assert_eq!(game.handicap(), 0);
}

#[test]
fn playing_a_move_places_a_stone_and_passes_the_turn() {
    let mut game = standard_game();
    game.play_move(p(3, 3), Color::Black).unwrap();

    let stone = game.board().get_point(p(3, 3)).unwrap().unwrap();
    assert_eq!(stone.owner, Color::Black);
    assert_eq!(game.next_player(), Color::White);
    assert_eq!(game.last_move().unwrap().position(), Some(p(3, 3)));
}

#[test]
fn moving_out_of_turn_is_refused() {
    let mut game = standard_game();
    assert_eq!(
        game.play_move(p(3, 3), Color::White),
        Err(GameError::NotYourTurn(Color::White))
    );
    // Nothing was placed
    assert!(game.board().is_empty(p(3, 3)).unwrap());
}

#[test]
fn two_passes_end_play_but_not_the_game() {
    let mut game = standard_game();
    game.play_move(p(0, 0), Color::Black).unwrap();
    game.play_move(p(5, 5), Color::White).unwrap();

    game.pass_turn().unwrap();
    assert_eq!(game.phase(), GamePhase::Play);
    game.pass_turn().unwrap();
    assert_eq!(game.phase(), GamePhase::MarkDead);

    // Play is locked until the marking is confirmed
    assert_eq!(
        game.play_move(p(9, 9), Color::Black),
        Err(GameError::WrongPhase(GamePhase::MarkDead))
    );
    assert_eq!(
        game.pass_turn(),
        Err(GameError::WrongPhase(GamePhase::MarkDead))
    );
}

#[test]
fn marking_and_confirming_scores_the_game() {
    let mut game = standard_game();
    game.play_move(p(0, 0), Color::Black).unwrap();
    game.play_move(p(5, 5), Color::White).unwrap();
    game.pass_turn().unwrap();
    game.pass_turn().unwrap();

    game.toggle_dead(p(0, 0)).unwrap();
    game.confirm_dead(Color::Black).unwrap();
    assert_eq!(game.phase(), GamePhase::MarkDead);
    game.confirm_dead(Color::White).unwrap();

    assert_eq!(game.phase(), GamePhase::GameOver);
    // The dead black stone leaves one big white region: every point but
    // white's own stone
    assert_eq!(game.player(Color::White).score, 360.0);
    assert_eq!(game.player(Color::Black).score, 0.0);
    assert_eq!(game.winner(), Some(Color::White));

    assert_eq!(game.play_move(p(9, 9), Color::Black), Err(GameError::GameOver));
    assert_eq!(game.pass_turn(), Err(GameError::GameOver));
    assert_eq!(game.toggle_dead(p(0, 0)), Err(GameError::GameOver));
}

#[test]
fn confirming_twice_for_the_same_player_does_not_score() {
    let mut game = standard_game();
    game.pass_turn().unwrap();
    game.pass_turn().unwrap();

    game.confirm_dead(Color::Black).unwrap();
    game.confirm_dead(Color::Black).unwrap();
    assert_eq!(game.phase(), GamePhase::MarkDead);
}

#[test]
fn toggling_withdraws_earlier_confirmations() {
    let mut game = standard_game();
    game.play_move(p(0, 0), Color::Black).unwrap();
    game.play_move(p(5, 5), Color::White).unwrap();
    game.pass_turn().unwrap();
    game.pass_turn().unwrap();

    game.confirm_dead(Color::Black).unwrap();
    game.toggle_dead(p(0, 0)).unwrap();

    // Black's confirmation is gone, so white's alone does not end the game
    game.confirm_dead(Color::White).unwrap();
    assert_eq!(game.phase(), GamePhase::MarkDead);
    game.confirm_dead(Color::Black).unwrap();
    assert_eq!(game.phase(), GamePhase::GameOver);
}

#[test]
fn empty_board_scores_as_jigo() {
    let mut game = standard_game();
    game.pass_turn().unwrap();
    game.pass_turn().unwrap();
    game.confirm_dead(Color::Black).unwrap();
    game.confirm_dead(Color::White).unwrap();

    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.player(Color::Black).score, 0.0);
    assert_eq!(game.player(Color::White).score, 0.0);
    assert_eq!(game.winner(), None);
}

#[test]
fn resignation_hands_the_win_to_the_opponent() {
    let mut game = standard_game();
    game.play_move(p(3, 3), Color::Black).unwrap();

    // White is to move and resigns
    game.resign().unwrap();
    assert_eq!(game.winner(), Some(Color::Black));
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert!(matches!(game.last_move().unwrap().kind, MoveKind::Resign));
    assert_eq!(game.play_move(p(4, 4), Color::Black), Err(GameError::GameOver));
}

#[test]
fn custom_handicap_lets_black_open_with_free_stones() {
    let mut game = Game::new(
        Board::rectangular((19, 19)).unwrap(),
        GameConfig {
            custom_handicap: 2,
            ..GameConfig::default()
        },
    );
    assert_eq!(game.phase(), GamePhase::PlaceHandicap);
    assert_eq!(game.remaining_handicap(), 2);

    game.play_move(p(5, 5), Color::Black).unwrap();
    // Handicap stones do not pass the turn
    assert_eq!(game.next_player(), Color::Black);
    assert_eq!(game.remaining_handicap(), 1);

    game.play_move(p(7, 7), Color::Black).unwrap();
    assert_eq!(game.phase(), GamePhase::Play);
    assert_eq!(game.next_player(), Color::White);
    assert_eq!(game.remaining_handicap(), 0);

    game.play_move(p(15, 15), Color::White).unwrap();
    assert_eq!(game.next_player(), Color::Black);
}

#[test]
fn handicap_shortfall_rolls_over_to_free_placement() {
    // A 9x9 board only has five star points; the other two become free
    let game = Game::new(
        Board::rectangular((9, 9)).unwrap(),
        GameConfig {
            fixed_handicap: 7,
            ..GameConfig::default()
        },
    );
    assert_eq!(game.phase(), GamePhase::PlaceHandicap);
    assert_eq!(game.handicap(), 7);
    assert_eq!(game.remaining_handicap(), 2);
    assert_eq!(game.next_player(), Color::Black);
}

#[test]
fn passing_is_not_allowed_during_handicap_placement() {
    let mut game = Game::new(
        Board::rectangular((19, 19)).unwrap(),
        GameConfig {
            custom_handicap: 1,
            ..GameConfig::default()
        },
    );
    assert_eq!(
        game.pass_turn(),
        Err(GameError::WrongPhase(GamePhase::PlaceHandicap))
    );
    // Resigning early is still possible
    game.resign().unwrap();
    assert_eq!(game.winner(), Some(Color::White));
}

#[test]
fn observers_see_every_state_change_in_order() {
    let events: Rc<RefCell<Vec<GameEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let mut game = standard_game();
    let sink = Rc::clone(&events);
    game.register_observer(Box::new(move |event: &GameEvent| {
        sink.borrow_mut().push(event.clone());
    }));

    game.play_move(p(0, 0), Color::Black).unwrap();
    game.play_move(p(5, 5), Color::White).unwrap();
    game.pass_turn().unwrap();
    game.pass_turn().unwrap();
    game.toggle_dead(p(0, 0)).unwrap();
    game.confirm_dead(Color::Black).unwrap();
    game.confirm_dead(Color::White).unwrap();

    let seen = events.borrow();
    assert_eq!(seen.len(), 8);
    assert!(matches!(seen[0], GameEvent::MoveMade { mv } if mv.position() == Some(p(0, 0))));
    assert!(matches!(seen[2], GameEvent::MoveMade { mv } if mv.is_pass()));
    assert!(matches!(seen[4], GameEvent::DeadStonesToggled { pos } if pos == p(0, 0)));
    assert!(matches!(
        seen[5],
        GameEvent::DeadStonesConfirmed {
            player: Color::Black
        }
    ));
    assert!(matches!(
        seen[7],
        GameEvent::GameFinished {
            winner: Some(Color::White),
            ..
        }
    ));
}

#[test]
fn rejected_moves_emit_no_events() {
    let events: Rc<RefCell<Vec<GameEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let mut game = standard_game();
    let sink = Rc::clone(&events);
    game.register_observer(Box::new(move |event: &GameEvent| {
        sink.borrow_mut().push(event.clone());
    }));

    assert!(game.play_move(p(0, 0), Color::White).is_err());
    assert!(game.play_move(p(99, 99), Color::Black).is_err());
    assert!(events.borrow().is_empty());
}
