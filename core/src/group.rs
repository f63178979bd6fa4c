// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connected groups of stones and their liberties.

use crate::board::{Board, BoardError};
use crate::{Color, Pos};
use std::collections::BTreeSet;

/// A maximal connected set of same-owner stones, with its liberty count.
///
/// Groups are ephemeral values computed per query, never stored: the board
/// does not keep them up to date. Liberties are counted exactly, with each
/// empty point counted once no matter how many group stones touch it;
/// capture and suicide logic only ever consume zero-vs-nonzero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Positions of the stones in the group
    pub stones: BTreeSet<Pos>,
    /// The player owning the group, or `None` for the empty group
    pub owner: Option<Color>,
    /// Number of distinct empty points adjacent to the group
    pub liberties: usize,
}

impl Group {
    /// Compute the group seeded at `position`.
    ///
    /// An empty seed yields the empty group with no owner and no
    /// liberties. Traversal uses an explicit stack and visited sets, so
    /// folded boards with cycles and pathologically long chains are fine.
    pub fn at(board: &Board, position: Pos) -> Result<Self, BoardError> {
        let owner = match board.get_point(position)? {
            Some(stone) => stone.owner,
            None => {
                return Ok(Self {
                    stones: BTreeSet::new(),
                    owner: None,
                    liberties: 0,
                })
            }
        };

        let mut stones = BTreeSet::from([position]);
        let mut liberties: BTreeSet<Pos> = BTreeSet::new();
        let mut stack = vec![position];

        while let Some(p) = stack.pop() {
            for &n in board.neighbours(p)? {
                if stones.contains(&n) {
                    continue;
                }
                if board.is_empty(n)? {
                    liberties.insert(n);
                } else if board.get_point(n)?.map(|s| s.owner) == Some(owner) {
                    stones.insert(n);
                    stack.push(n);
                }
            }
        }

        Ok(Self {
            stones,
            owner: Some(owner),
            liberties: liberties.len(),
        })
    }

    /// Number of stones in the group
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    /// Whether the group contains no stones
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }
}
