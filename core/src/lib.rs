// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goban Core - Go Rules Engine
//!
//! This crate provides the core game functionality including:
//! - Generic grid abstraction with rectangular and folded (toroidal) topologies
//! - Go board representation: stones, liberties, territory, dead-stone marking
//! - Rule validation: occupied/suicide/superko checks, handicap, scoring
//! - Game lifecycle state machine with typed event notification
//!
//! Rendering, user input, persistence formats, network play and engine
//! players are external collaborators that drive this crate through
//! [`game::Game`] and observe it through [`events::GameEvent`].

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod events;
pub mod game;
pub mod grid;
pub mod group;
pub mod rules;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use board::{Board, BoardError, Liveness, Stone};
pub use events::{GameEvent, GameObserver};
pub use game::{Game, GameConfig, GameError, GamePhase, Player};
pub use grid::{Grid, GridError, Side};
pub use group::Group;
pub use rules::{AgaRules, ErrorPolicy, InvalidMove, RuleViolation, Ruleset};

/// Player color in a Go game (Black or White)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Black player (traditionally goes first)
    Black,
    /// White player
    White,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// A position on the grid.
///
/// Coordinates are signed so that folded and irregular topologies can place
/// points anywhere; they convey relative position only, not scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    /// X coordinate (column)
    pub x: i32,
    /// Y coordinate (row)
    pub y: i32,
}

impl Pos {
    /// Create a new position
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Pos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Traditional column letters skip 'I'
        const LETTERS: &[u8] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";
        if (0..LETTERS.len() as i32).contains(&self.x) && self.y >= 0 {
            write!(f, "{}{}", LETTERS[self.x as usize] as char, self.y + 1)
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

/// What a move does: place a stone, pass, or resign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Place a stone at the specified position
    Place(Pos),
    /// Pass the turn
    Pass,
    /// Resign the game
    Resign,
}

/// A move in the game: who moved and what they did.
///
/// Moves are immutable once created and appended to the game's move history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// The player who made the move
    pub player: Color,
    /// What the move does
    pub kind: MoveKind,
}

impl Move {
    /// A stone placement
    pub fn place(player: Color, pos: Pos) -> Self {
        Self {
            player,
            kind: MoveKind::Place(pos),
        }
    }

    /// A pass
    pub fn pass(player: Color) -> Self {
        Self {
            player,
            kind: MoveKind::Pass,
        }
    }

    /// A resignation
    pub fn resign(player: Color) -> Self {
        Self {
            player,
            kind: MoveKind::Resign,
        }
    }

    /// The board position, if this move placed a stone
    pub fn position(&self) -> Option<Pos> {
        match self.kind {
            MoveKind::Place(pos) => Some(pos),
            _ => None,
        }
    }

    /// Whether this move is a pass
    pub fn is_pass(&self) -> bool {
        matches!(self.kind, MoveKind::Pass)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveKind::Place(pos) => write!(f, "{} {}", self.player, pos),
            MoveKind::Pass => write!(f, "{} pass", self.player),
            MoveKind::Resign => write!(f, "{} resign", self.player),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_display_uses_go_coordinates() {
        let mv = Move::place(Color::Black, Pos::new(0, 6));
        assert_eq!(mv.to_string(), "black A7");
        // Column 'I' is skipped
        let mv = Move::place(Color::White, Pos::new(8, 0));
        assert_eq!(mv.to_string(), "white J1");
    }

    #[test]
    fn opposite_color() {
        assert_eq!(Color::Black.opposite(), Color::White);
        assert_eq!(Color::White.opposite(), Color::Black);
    }
}
