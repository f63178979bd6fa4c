// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game lifecycle for a two player game of go.
//!
//! The [`Game`] owns the live board, the move history and one board
//! snapshot per committed placement (for superko checking), and walks the
//! phase machine `PlaceHandicap -> Play -> MarkDead -> GameOver`. All
//! mutation goes through [`Game::play_move`], [`Game::pass_turn`],
//! [`Game::resign`], [`Game::toggle_dead`], [`Game::confirm_dead`] and
//! [`Game::score`]; each successful call notifies registered observers.
//! Once the phase reaches `GameOver` the game is terminally immutable.

use crate::board::{Board, BoardError};
use crate::events::{GameEvent, GameObserver, Observers};
use crate::rules::{AgaRules, InvalidMove, Ruleset};
use crate::{Color, Move, Pos};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Discrete phase of the game lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Custom handicap stones are still being placed
    PlaceHandicap,
    /// Normal alternating play
    Play,
    /// Both players passed; dead stones are being marked and confirmed
    MarkDead,
    /// Terminal: scored, resigned, or otherwise finished
    GameOver,
}

/// Per-player record: identity, captures and final score.
///
/// Player identity is the color tag; two distinct players never compare
/// equal by value.
#[derive(Debug, Clone)]
pub struct Player {
    /// The player's color
    pub color: Color,
    /// Display name
    pub name: String,
    /// Stones this player has captured
    pub captures: usize,
    /// Final score, written when the game is scored
    pub score: f32,
}

impl Player {
    /// A fresh player record with no captures and no score
    pub fn new(color: Color, name: String) -> Self {
        Self {
            color,
            name,
            captures: 0,
            score: 0.0,
        }
    }
}

/// Configuration for a new game
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Handicap stones placed on the star points before play
    pub fixed_handicap: usize,
    /// Handicap stones the black player places freely before play
    pub custom_handicap: usize,
    /// Compensation points added to white's final score
    pub komi: f32,
    /// Black's display name
    pub black_name: String,
    /// White's display name
    pub white_name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_handicap: 0,
            custom_handicap: 0,
            komi: 0.0,
            black_name: "Black".to_owned(),
            white_name: "White".to_owned(),
        }
    }
}

/// Errors raised for caller misuse, as opposed to move-legality violations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A player tried to move out of turn
    #[error("it is not {0}'s turn")]
    NotYourTurn(Color),
    /// The game has already ended
    #[error("the game is over")]
    GameOver,
    /// The operation is not valid in the current phase
    #[error("operation not allowed while {0:?}")]
    WrongPhase(GamePhase),
    /// The move broke the rules; the game state is unchanged
    #[error(transparent)]
    Illegal(#[from] InvalidMove),
    /// A board invariant was violated
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// A two player game of go
pub struct Game {
    board: Board,
    ruleset: Box<dyn Ruleset>,
    /// Every move played, in order
    moves: Vec<Move>,
    /// One structural board snapshot per committed placement
    history: Vec<Board>,
    black: Player,
    white: Player,
    next_player: Color,
    handicap: usize,
    remaining_handicap: usize,
    komi: f32,
    winner: Option<Color>,
    phase: GamePhase,
    confirmed_dead: BTreeSet<Color>,
    observers: Observers,
}

impl Game {
    /// Start a game under the default [`AgaRules`]
    pub fn new(board: Board, config: GameConfig) -> Self {
        Self::with_ruleset(board, config, Box::new(AgaRules::default()))
    }

    /// Start a game under an explicit ruleset.
    ///
    /// Fixed handicap is placed immediately through the ruleset; any
    /// shortfall (more stones requested than the board has star points)
    /// rolls over into custom handicap, which black then places as the
    /// opening `PlaceHandicap` phase. When there was any handicap at all,
    /// white takes the first normal turn.
    pub fn with_ruleset(mut board: Board, config: GameConfig, ruleset: Box<dyn Ruleset>) -> Self {
        let handicap = config.fixed_handicap + config.custom_handicap;
        let mut custom = config.custom_handicap;

        if config.fixed_handicap > 0 {
            let placed = ruleset.place_handicap(&mut board, config.fixed_handicap, Color::Black);
            if placed < config.fixed_handicap {
                custom += config.fixed_handicap - placed;
            }
        }

        let phase = if custom > 0 {
            GamePhase::PlaceHandicap
        } else {
            GamePhase::Play
        };
        let next_player = if handicap > 0 && custom == 0 {
            Color::White
        } else {
            Color::Black
        };

        Self {
            board,
            ruleset,
            moves: Vec::new(),
            history: Vec::new(),
            black: Player::new(Color::Black, config.black_name),
            white: Player::new(Color::White, config.white_name),
            next_player,
            handicap,
            remaining_handicap: custom,
            komi: config.komi,
            winner: None,
            phase,
            confirmed_dead: BTreeSet::new(),
            observers: Observers::default(),
        }
    }

    /// Play a stone for `player` at `pos`.
    ///
    /// Validation happens transactionally in the ruleset: on failure the
    /// live board, history and turn order are untouched and the error
    /// carries every violation found.
    pub fn play_move(&mut self, pos: Pos, player: Color) -> Result<(), GameError> {
        match self.phase {
            GamePhase::GameOver => return Err(GameError::GameOver),
            GamePhase::MarkDead => return Err(GameError::WrongPhase(self.phase)),
            GamePhase::PlaceHandicap | GamePhase::Play => {}
        }
        if player != self.next_player {
            return Err(GameError::NotYourTurn(player));
        }

        let outcome = self
            .ruleset
            .check_move(&self.board, &self.history, pos, player)?;

        // Commit: the validated board becomes the live board
        self.board = outcome.board;
        self.player_mut(player).captures += outcome.captures;
        let mv = Move::place(player, pos);
        self.moves.push(mv);
        self.history.push(self.board.clone());

        if self.phase == GamePhase::PlaceHandicap {
            // Handicap stones do not toggle the turn
            self.remaining_handicap -= 1;
            if self.remaining_handicap == 0 {
                tracing::info!("handicap placement complete");
                self.phase = GamePhase::Play;
                self.next_player = Color::White;
            }
        } else {
            self.change_player();
        }

        self.observers.notify(&GameEvent::MoveMade { mv });
        Ok(())
    }

    /// Pass the turn. Two consecutive passes by the two players move the
    /// game into the `MarkDead` phase (not straight to `GameOver`).
    pub fn pass_turn(&mut self) -> Result<(), GameError> {
        match self.phase {
            GamePhase::GameOver => return Err(GameError::GameOver),
            GamePhase::Play => {}
            other => return Err(GameError::WrongPhase(other)),
        }

        let mv = Move::pass(self.next_player);
        self.moves.push(mv);
        self.change_player();

        if self.ruleset.is_game_over(&self.moves) {
            tracing::info!("both players passed, marking dead stones");
            self.enter_mark_dead();
        }

        self.observers.notify(&GameEvent::MoveMade { mv });
        Ok(())
    }

    /// Resign for the player whose turn it is. The other player wins and
    /// the game goes straight to `GameOver`, skipping dead-stone marking.
    pub fn resign(&mut self) -> Result<(), GameError> {
        match self.phase {
            GamePhase::GameOver => return Err(GameError::GameOver),
            GamePhase::MarkDead => return Err(GameError::WrongPhase(self.phase)),
            GamePhase::PlaceHandicap | GamePhase::Play => {}
        }

        let mv = Move::resign(self.next_player);
        self.moves.push(mv);
        self.winner = Some(self.next_player.opposite());
        self.phase = GamePhase::GameOver;

        self.observers.notify(&GameEvent::MoveMade { mv });
        Ok(())
    }

    /// Toggle dead-stone marking at `pos` during the `MarkDead` phase.
    /// Any earlier confirmations are withdrawn.
    pub fn toggle_dead(&mut self, pos: Pos) -> Result<(), GameError> {
        self.require_mark_dead()?;
        self.confirmed_dead.clear();
        self.board.toggle_dead(pos)?;
        self.observers.notify(&GameEvent::DeadStonesToggled { pos });
        Ok(())
    }

    /// Record that `player` agrees with the current dead-stone marking.
    /// Once both players have confirmed, the game is scored.
    pub fn confirm_dead(&mut self, player: Color) -> Result<(), GameError> {
        self.require_mark_dead()?;
        self.confirmed_dead.insert(player);
        self.observers
            .notify(&GameEvent::DeadStonesConfirmed { player });

        if self.confirmed_dead.len() == 2 {
            self.score()?;
        }
        Ok(())
    }

    /// Score the finished position: mark territory, tally each player,
    /// decide the winner by strict comparison (a tie is jigo, no winner)
    /// and end the game.
    pub fn score(&mut self) -> Result<(), GameError> {
        self.require_mark_dead()?;

        self.ruleset
            .score(&mut self.board, &mut self.black, &mut self.white, self.komi);

        self.winner = if self.black.score > self.white.score {
            Some(Color::Black)
        } else if self.white.score > self.black.score {
            Some(Color::White)
        } else {
            None
        };
        self.phase = GamePhase::GameOver;
        tracing::info!(
            black = self.black.score,
            white = self.white.score,
            "game scored"
        );

        self.observers.notify(&GameEvent::GameFinished {
            black_score: self.black.score,
            white_score: self.white.score,
            winner: self.winner,
        });
        Ok(())
    }

    /// Register an observer for subsequent state changes
    pub fn register_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.register(observer);
    }

    /// The last move played, if any
    pub fn last_move(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// The current phase
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The player to move
    pub fn next_player(&self) -> Color {
        self.next_player
    }

    /// The winner, once decided
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// The live board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// All moves played so far
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Black and white player records
    pub fn players(&self) -> (&Player, &Player) {
        (&self.black, &self.white)
    }

    /// The record for one player
    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::Black => &self.black,
            Color::White => &self.white,
        }
    }

    /// Komi given to white
    pub fn komi(&self) -> f32 {
        self.komi
    }

    /// Total handicap configured for this game
    pub fn handicap(&self) -> usize {
        self.handicap
    }

    /// Custom handicap stones still to be placed
    pub fn remaining_handicap(&self) -> usize {
        self.remaining_handicap
    }

    fn player_mut(&mut self, color: Color) -> &mut Player {
        match color {
            Color::Black => &mut self.black,
            Color::White => &mut self.white,
        }
    }

    fn change_player(&mut self) {
        self.next_player = self.next_player.opposite();
    }

    fn enter_mark_dead(&mut self) {
        self.phase = GamePhase::MarkDead;
        self.confirmed_dead.clear();
        // Territory must be marked before toggling so that a player's
        // territory can bridge between their dead shapes
        self.board.mark_territory();
    }

    fn require_mark_dead(&self) -> Result<(), GameError> {
        match self.phase {
            GamePhase::MarkDead => Ok(()),
            GamePhase::GameOver => Err(GameError::GameOver),
            other => Err(GameError::WrongPhase(other)),
        }
    }
}
