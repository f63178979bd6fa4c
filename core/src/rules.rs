// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rulesets: move legality, handicap placement and scoring.
//!
//! A [`Ruleset`] validates moves transactionally: the candidate move is
//! applied to a copy of the live board, captures are resolved, then suicide
//! and positional-superko checks run on the result. On success the caller
//! receives the post-move board to commit; on failure the live board was
//! never touched. Captures are resolved *before* the suicide check - a move
//! with no liberties of its own is legal when it first captures an opposing
//! group that frees one.

use crate::board::{Board, BoardError};
use crate::game::Player;
use crate::group::Group;
use crate::{Color, Move, Pos};
use thiserror::Error;

/// One reason a move is illegal
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    /// Board-level failure: occupied or nonexistent point
    #[error(transparent)]
    Board(#[from] BoardError),
    /// The moving player's own group would end with zero liberties
    #[error("suicide: the group at {0} would have no liberties")]
    Suicide(Pos),
    /// The move recreates a board position seen earlier in the game
    #[error("ko: playing at {0} would repeat an earlier position")]
    Ko(Pos),
}

/// An illegal move, carrying every violation found.
///
/// Under [`ErrorPolicy::FailFast`] there is exactly one violation; under
/// [`ErrorPolicy::Accumulate`] all simultaneous violations are reported.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("illegal move: {}", .violations.iter().map(|v| v.to_string()).collect::<Vec<_>>().join("; "))]
pub struct InvalidMove {
    /// The violations, in check order
    pub violations: Vec<RuleViolation>,
}

/// Whether rule checking stops at the first violation or reports them all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first violation
    FailFast,
    /// Collect every violation before failing (better for interactive use)
    #[default]
    Accumulate,
}

/// The result of a legal move, ready to be committed
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    /// The board after the stone is placed and captures are removed
    pub board: Board,
    /// How many opposing stones the move captured
    pub captures: usize,
}

/// A ruleset validates moves, detects the end of the game, places fixed
/// handicap and scores the finished position.
///
/// Concrete rulesets are chosen once at game construction.
pub trait Ruleset {
    /// Check `player` playing at `pos` against `board` and the game's
    /// board history, returning the post-move board on success.
    fn check_move(
        &self,
        board: &Board,
        history: &[Board],
        pos: Pos,
        player: Color,
    ) -> Result<MoveOutcome, InvalidMove>;

    /// Whether the move list ends the game
    fn is_game_over(&self, moves: &[Move]) -> bool;

    /// Place up to `stones` fixed-handicap stones for `player` on the
    /// standard star points, returning how many were actually placed.
    /// Callers convert any shortfall into free placement.
    fn place_handicap(&self, board: &mut Board, stones: usize, player: Color) -> usize;

    /// Mark territory and write each player's final score
    fn score(&self, board: &mut Board, black: &mut Player, white: &mut Player, komi: f32);
}

// Canonical handicap points in placement order, 0-indexed:
// opposing corners first, then the remaining sides, centre last.
const NINE_STAR_POINTS: [(i32, i32); 5] = [(2, 6), (6, 2), (2, 2), (6, 6), (4, 4)];
const THIRTEEN_STAR_POINTS: [(i32, i32); 9] = [
    (3, 3),
    (9, 9),
    (3, 9),
    (9, 3),
    (6, 6),
    (3, 6),
    (9, 6),
    (6, 3),
    (6, 9),
];
const NINETEEN_STAR_POINTS: [(i32, i32); 9] = [
    (3, 3),
    (15, 15),
    (3, 15),
    (15, 3),
    (9, 9),
    (3, 9),
    (15, 9),
    (9, 3),
    (9, 15),
];

/// American Go Association rules: positional superko, suicide forbidden,
/// Japanese-style territory scoring.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgaRules {
    policy: ErrorPolicy,
}

impl AgaRules {
    /// A ruleset with the given error-reporting policy
    pub fn new(policy: ErrorPolicy) -> Self {
        Self { policy }
    }
}

impl Ruleset for AgaRules {
    fn check_move(
        &self,
        board: &Board,
        history: &[Board],
        pos: Pos,
        player: Color,
    ) -> Result<MoveOutcome, InvalidMove> {
        let mut violations = Vec::new();
        let mut test = board.clone();

        // Occupied/nonexistent leaves nothing further to check
        if let Err(e) = test.place_stone(pos, player) {
            return Err(InvalidMove {
                violations: vec![e.into()],
            });
        }

        let captures = test
            .remove_dead_stones(pos, player)
            .map_err(|e| InvalidMove {
                violations: vec![e.into()],
            })?;

        // Suicide is judged on the post-capture board
        let own_group = Group::at(&test, pos).map_err(|e| InvalidMove {
            violations: vec![e.into()],
        })?;
        if own_group.liberties == 0 {
            tracing::debug!(at = %pos, "suicide rejected");
            violations.push(RuleViolation::Suicide(pos));
            if self.policy == ErrorPolicy::FailFast {
                return Err(InvalidMove { violations });
            }
        }

        // Positional superko: no earlier position may ever recur
        if history.iter().any(|past| *past == test) {
            tracing::debug!(at = %pos, "superko violation");
            violations.push(RuleViolation::Ko(pos));
            if self.policy == ErrorPolicy::FailFast {
                return Err(InvalidMove { violations });
            }
        }

        if violations.is_empty() {
            Ok(MoveOutcome {
                board: test,
                captures,
            })
        } else {
            Err(InvalidMove { violations })
        }
    }

    fn is_game_over(&self, moves: &[Move]) -> bool {
        // Two consecutive passes by the two different players
        match moves {
            [.., a, b] => a.is_pass() && b.is_pass() && a.player != b.player,
            _ => false,
        }
    }

    fn place_handicap(&self, board: &mut Board, stones: usize, player: Color) -> usize {
        let stars: &[(i32, i32)] = match board.size() {
            (0, 0, 8, 8) => &NINE_STAR_POINTS,
            (0, 0, 12, 12) => &THIRTEEN_STAR_POINTS,
            (0, 0, 18, 18) => &NINETEEN_STAR_POINTS,
            // Fixed handicap only exists for the standard square sizes
            _ => return 0,
        };

        let mut placed = 0;
        for &(x, y) in stars.iter().take(stones) {
            if board.place_stone(Pos::new(x, y), player).is_ok() {
                placed += 1;
            }
        }
        placed
    }

    fn score(&self, board: &mut Board, black: &mut Player, white: &mut Player, komi: f32) {
        board.mark_territory();
        black.score = board.count_territory(Color::Black) as f32 + black.captures as f32;
        // Komi compensates white once, at the end
        white.score = board.count_territory(Color::White) as f32 + white.captures as f32 + komi;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_over_needs_passes_from_both_players() {
        let rules = AgaRules::default();
        let b = Color::Black;
        let w = Color::White;
        assert!(!rules.is_game_over(&[]));
        assert!(!rules.is_game_over(&[Move::pass(b)]));
        // Same player passing twice in a row is not the end
        assert!(!rules.is_game_over(&[Move::pass(b), Move::pass(b)]));
        assert!(rules.is_game_over(&[Move::pass(b), Move::pass(w)]));
        assert!(rules.is_game_over(&[Move::pass(w), Move::pass(b)]));
        // A stone between the passes resets the sequence
        assert!(!rules.is_game_over(&[
            Move::pass(b),
            Move::place(w, Pos::new(0, 0)),
            Move::pass(b),
        ]));
    }

    #[test]
    fn handicap_shortfall_is_reported() {
        let rules = AgaRules::default();
        let mut board = Board::rectangular((9, 9)).unwrap();
        // 9x9 has five star points; asking for seven places only five
        assert_eq!(rules.place_handicap(&mut board, 7, Color::Black), 5);
        // Non-standard sizes have no star points at all
        let mut odd = Board::rectangular((10, 10)).unwrap();
        assert_eq!(rules.place_handicap(&mut odd, 2, Color::Black), 0);
    }
}
