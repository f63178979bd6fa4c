// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation: stone placement, capture, territory and dead-stone
//! marking on top of a [`Grid`].
//!
//! The board does no rule checking of its own - legality (suicide, ko, turn
//! order) is the business of the `rules` and `game` modules. Each point is
//! either empty or holds a [`Stone`] with an owner and a [`Liveness`]. Dead
//! stones are a scoring annotation: they stay on the grid, unlike captured
//! stones, which are removed entirely, and they count as empty space when
//! territory is marked so that their points score for the surrounding
//! player.

use crate::grid::Grid;
use crate::group::Group;
use crate::{Color, Pos};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Whether a stone is in play or marked dead for scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// A live stone
    Live,
    /// A stone agreed to be dead, left on the board for scoring
    Dead,
}

/// A stone on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stone {
    /// The player who placed the stone
    pub owner: Color,
    /// Live or marked dead
    pub liveness: Liveness,
}

impl Stone {
    /// A freshly placed live stone
    pub fn live(owner: Color) -> Self {
        Self {
            owner,
            liveness: Liveness::Live,
        }
    }
}

/// The value of one board point
pub type Point = Option<Stone>;

/// Errors from invalid board operations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// The coordinate is not a point of this board
    #[error("point {0} does not exist on this board")]
    NonExistentPoint(Pos),
    /// Tried to place a stone on an occupied point
    #[error("point {0} is already occupied")]
    Occupied(Pos),
    /// Tried to remove a stone from an empty point
    #[error("no stone to remove at {0}")]
    EmptyPoint(Pos),
    /// The requested board dimensions are out of range
    #[error("invalid board size {0}x{1}: each dimension must be 3 to 50")]
    BadSize(i32, i32),
}

/// A Go board over an arbitrary grid topology.
///
/// Equality compares the underlying grids only (point values and
/// connections), which is exactly the comparison superko detection needs;
/// the territory map is a derived cache and takes no part in it.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid<Point>,
    territory: BTreeMap<Pos, Color>,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
    }
}

impl Eq for Board {}

impl Board {
    /// Wrap an existing grid as an empty board
    pub fn new(grid: Grid<Point>) -> Self {
        Self {
            grid,
            territory: BTreeMap::new(),
        }
    }

    /// A plain rectangular board. Each dimension must be between 3 and 50.
    pub fn rectangular((width, height): (i32, i32)) -> Result<Self, BoardError> {
        if !(3..=50).contains(&width) || !(3..=50).contains(&height) {
            return Err(BoardError::BadSize(width, height));
        }
        Ok(Self::new(Grid::rectangular(width, height, None)))
    }

    /// The underlying grid, for read-only callers such as renderers
    pub fn grid(&self) -> &Grid<Point> {
        &self.grid
    }

    /// Iterate over all valid board coordinates
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.grid.positions()
    }

    /// Bounding box `(xmin, ymin, xmax, ymax)` of the board's points
    pub fn size(&self) -> (i32, i32, i32, i32) {
        self.grid.size()
    }

    /// Get the stone at a point, if any. Dead stones are returned as-is.
    pub fn get_point(&self, pos: Pos) -> Result<Point, BoardError> {
        self.grid
            .get_point(pos)
            .copied()
            .map_err(|_| BoardError::NonExistentPoint(pos))
    }

    /// Whether a point is free for play.
    ///
    /// A point holding a dead stone counts as empty: dead stones only exist
    /// once play has ended, and treating them as empty is what lets
    /// [`Board::mark_territory`] score their points for the surrounding
    /// player.
    pub fn is_empty(&self, pos: Pos) -> Result<bool, BoardError> {
        Ok(self
            .get_point(pos)?
            .map_or(true, |s| s.liveness == Liveness::Dead))
    }

    /// The neighbouring positions of a point
    pub fn neighbours(&self, pos: Pos) -> Result<&[Pos], BoardError> {
        self.grid
            .neighbours(pos)
            .map_err(|_| BoardError::NonExistentPoint(pos))
    }

    /// Place a live stone for `player`. Fails if the point is occupied or
    /// does not exist. Invalidates the territory map.
    pub fn place_stone(&mut self, pos: Pos, player: Color) -> Result<(), BoardError> {
        if !self.is_empty(pos)? {
            return Err(BoardError::Occupied(pos));
        }
        self.grid
            .set_point(pos, Some(Stone::live(player)))
            .map_err(|_| BoardError::NonExistentPoint(pos))?;
        self.territory.clear();
        Ok(())
    }

    /// Remove a stone from the board (captures only; dead-stone marking
    /// never removes stones). Invalidates the territory map.
    pub fn remove_stone(&mut self, pos: Pos) -> Result<(), BoardError> {
        if self.is_empty(pos)? {
            return Err(BoardError::EmptyPoint(pos));
        }
        self.grid
            .set_point(pos, None)
            .map_err(|_| BoardError::NonExistentPoint(pos))?;
        self.territory.clear();
        Ok(())
    }

    /// The group of stones at a position
    pub fn group(&self, pos: Pos) -> Result<Group, BoardError> {
        Group::at(self, pos)
    }

    /// Remove any opposing stones captured by a stone `player` just played
    /// at `pos`, returning how many were taken.
    ///
    /// Each adjacent opposing group is examined at most once even when
    /// several neighbours belong to the same group. Removal order cannot
    /// matter: taking one captured group never creates liberties for
    /// another group already found to be captured by the same move.
    pub fn remove_dead_stones(&mut self, pos: Pos, player: Color) -> Result<usize, BoardError> {
        let mut captures = 0;
        let mut already_checked: BTreeSet<Pos> = BTreeSet::new();

        for n in self.neighbours(pos)?.to_vec() {
            if already_checked.contains(&n) {
                continue;
            }
            match self.get_point(n)? {
                Some(stone) if stone.owner != player && stone.liveness == Liveness::Live => {}
                _ => continue,
            }

            let group = Group::at(self, n)?;
            already_checked.extend(group.stones.iter().copied());

            if group.liberties == 0 {
                tracing::debug!(at = %n, size = group.stones.len(), "capturing group");
                captures += group.stones.len();
                for &p in &group.stones {
                    self.remove_stone(p)?;
                }
            }
        }
        Ok(captures)
    }

    /// The owner of the territory at `pos`, or `None` if neutral/unmarked
    pub fn get_territory(&self, pos: Pos) -> Option<Color> {
        self.territory.get(&pos).copied()
    }

    /// Mark or clear the territory owner of a single point
    pub fn set_territory(&mut self, pos: Pos, owner: Option<Color>) {
        match owner {
            Some(player) => {
                self.territory.insert(pos, player);
            }
            None => {
                self.territory.remove(&pos);
            }
        }
    }

    /// Points of territory currently marked for `player`
    pub fn count_territory(&self, player: Color) -> usize {
        self.territory.values().filter(|&&c| c == player).count()
    }

    /// Find empty regions surrounded by a single player and mark them as
    /// that player's territory.
    ///
    /// A region belongs to a player only if every stone bordering it
    /// belongs to that one player; a region bordering two owners, or no
    /// stones at all, is neutral. Dead stones count as part of the region,
    /// not as a border. Regions are flooded with an explicit queue so deep
    /// or cyclic (folded) boards cannot overflow the stack.
    pub fn mark_territory(&mut self) {
        self.territory.clear();
        let mut done: BTreeSet<Pos> = BTreeSet::new();
        let positions: Vec<Pos> = self.grid.positions().collect();

        for pos in positions {
            if !self.empty_for_territory(pos) || !done.insert(pos) {
                continue;
            }

            let mut region = vec![pos];
            let mut queue = vec![pos];
            let mut owner: Option<Color> = None;
            let mut neutral = false;

            while let Some(p) = queue.pop() {
                let neighbours = match self.grid.neighbours(p) {
                    Ok(ns) => ns.to_vec(),
                    Err(_) => continue,
                };
                for n in neighbours {
                    match self.border_owner(n) {
                        Some(player) => {
                            if owner.is_some() && owner != Some(player) {
                                neutral = true;
                            }
                            owner = Some(player);
                        }
                        None => {
                            if done.insert(n) {
                                region.push(n);
                                queue.push(n);
                            }
                        }
                    }
                }
            }

            if !neutral {
                if let Some(player) = owner {
                    for p in region {
                        self.territory.insert(p, player);
                    }
                }
            }
        }
    }

    /// Toggle whether the group at `position` is marked dead.
    ///
    /// Assumes territory has been marked beforehand. Because dead stones in
    /// a player's own territory would make no sense, groups separated only
    /// by that player's territory are treated as linked: the flip floods
    /// outward through same-owner stones and through points marked as the
    /// owner's territory, so one call flips every visually connected dead
    /// shape. No-op on an empty point.
    pub fn toggle_dead(&mut self, position: Pos) -> Result<(), BoardError> {
        let stone = match self.get_point(position)? {
            Some(stone) => stone,
            None => return Ok(()),
        };
        let player = stone.owner;
        let flipped = match stone.liveness {
            Liveness::Live => Liveness::Dead,
            Liveness::Dead => Liveness::Live,
        };

        self.set_liveness(position, player, flipped)?;

        let mut stack = self.neighbours(position)?.to_vec();
        let mut checked: BTreeSet<Pos> = BTreeSet::new();
        checked.insert(position);

        while let Some(next) = stack.pop() {
            if !checked.insert(next) {
                continue;
            }
            match self.get_point(next)? {
                // Empty space borders the group; the player's own
                // territory bridges to the next shape
                None => {
                    if self.get_territory(next) == Some(player) {
                        stack.extend(self.neighbours(next)?.to_vec());
                    }
                }
                Some(s) if s.owner == player => {
                    stack.extend(self.neighbours(next)?.to_vec());
                    self.set_liveness(next, player, flipped)?;
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Rewrite a stone's liveness without touching the territory cache
    fn set_liveness(&mut self, pos: Pos, owner: Color, liveness: Liveness) -> Result<(), BoardError> {
        self.grid
            .set_point(pos, Some(Stone { owner, liveness }))
            .map_err(|_| BoardError::NonExistentPoint(pos))
    }

    /// Territory-marking view of a point: empty or dead stone
    fn empty_for_territory(&self, pos: Pos) -> bool {
        matches!(
            self.grid.get_point(pos),
            Ok(point) if point.map_or(true, |s| s.liveness == Liveness::Dead)
        )
    }

    /// Owner of a live stone at `pos`, if there is one
    fn border_owner(&self, pos: Pos) -> Option<Color> {
        match self.grid.get_point(pos) {
            Ok(Some(stone)) if stone.liveness == Liveness::Live => Some(stone.owner),
            _ => None,
        }
    }
}
