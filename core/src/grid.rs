// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic grid: an arrangement of points with lines connecting them.
//!
//! No game logic lives here. A [`Grid`] is built from a *lattice* (base
//! coordinate set), a *basis* (per-lattice-point offsets) and *connection
//! templates* (relative offsets defining edges). Folded variants join named
//! sides to each other, optionally reversed, which yields cylindrical,
//! toroidal and Möbius boards. Coordinates are integers and convey relative
//! position only.

use crate::Pos;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from raw grid lookups
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The coordinate is not a point of this grid
    #[error("no point at {0} on this grid")]
    OutOfBounds(Pos),
}

/// A named side of a rectangular grid, used to specify folds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    North,
    East,
    South,
    West,
}

/// A collection of connected points, each holding a value of type `T`.
///
/// Adjacency is symmetric by construction: if A connects to B then B
/// connects to A. Equality compares point values and connections only, not
/// the lattice the grid was built from.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    points: BTreeMap<Pos, T>,
    connections: BTreeMap<Pos, Vec<Pos>>,
    bounds: (i32, i32, i32, i32),
}

impl<T: PartialEq> PartialEq for Grid<T> {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points && self.connections == other.connections
    }
}

impl<T: PartialEq> Eq for Grid<T> {}

impl<T: Clone> Grid<T> {
    /// Build a grid by superimposing `basis` onto every lattice point, then
    /// instantiating every connection template at every lattice point.
    ///
    /// An edge is added only when both of its endpoints exist as grid
    /// points; edges reaching outside the point set are silently dropped,
    /// which tolerates lattices that are sparse at the boundary.
    pub fn from_lattice(
        lattice: &[Pos],
        basis: &[(i32, i32)],
        connections: &[((i32, i32), (i32, i32))],
        default_value: T,
    ) -> Self {
        let mut points = BTreeMap::new();
        let mut conns: BTreeMap<Pos, Vec<Pos>> = BTreeMap::new();
        let (mut xmin, mut ymin, mut xmax, mut ymax) = (i32::MAX, i32::MAX, i32::MIN, i32::MIN);

        for l in lattice {
            for &(bx, by) in basis {
                let p = Pos::new(l.x + bx, l.y + by);
                points.insert(p, default_value.clone());
                conns.entry(p).or_default();
                xmin = xmin.min(p.x);
                ymin = ymin.min(p.y);
                xmax = xmax.max(p.x);
                ymax = ymax.max(p.y);
            }
        }

        for l in lattice {
            for &((cx1, cy1), (cx2, cy2)) in connections {
                let a = Pos::new(l.x + cx1, l.y + cy1);
                let b = Pos::new(l.x + cx2, l.y + cy2);
                if points.contains_key(&a) && points.contains_key(&b) {
                    if let Some(v) = conns.get_mut(&a) {
                        v.push(b);
                    }
                    if let Some(v) = conns.get_mut(&b) {
                        v.push(a);
                    }
                }
            }
        }

        let bounds = if points.is_empty() {
            (0, 0, -1, -1)
        } else {
            (xmin, ymin, xmax, ymax)
        };

        Self {
            points,
            connections: conns,
            bounds,
        }
    }

    /// A plain rectangular grid with orthogonal connections
    pub fn rectangular(width: i32, height: i32, default_value: T) -> Self {
        Self::rectangular_with_aspect(width, height, 1, default_value)
    }

    /// A rectangular grid with a horizontal spacing multiplier.
    ///
    /// The aspect ratio should be a natural number (horizontal spacing >=
    /// vertical spacing); it stretches column coordinates without changing
    /// the connectivity.
    pub fn rectangular_with_aspect(
        width: i32,
        height: i32,
        aspect_ratio: i32,
        default_value: T,
    ) -> Self {
        let aspect_ratio = aspect_ratio.max(1);
        let lattice = rectangular_lattice(width, height, aspect_ratio);
        let basis = [(0, 0)];
        let connections = [((0, 0), (aspect_ratio, 0)), ((0, 0), (0, 1))];
        Self::from_lattice(&lattice, &basis, &connections, default_value)
    }

    /// A rectangular grid whose sides wrap onto each other.
    ///
    /// Each entry in `joins` connects two named sides point-for-point; each
    /// entry in `reverse_joins` does the same with one side reversed (a
    /// twist), so east-west plus north-south joins give a torus, and a
    /// reverse join gives a Möbius strip. Sides of unequal length are
    /// zipped up to the shorter one.
    pub fn folded(
        width: i32,
        height: i32,
        joins: &[(Side, Side)],
        reverse_joins: &[(Side, Side)],
        default_value: T,
    ) -> Self {
        let mut grid = Self::rectangular(width, height, default_value);
        let aspect_ratio = 1;

        for &(a, b) in joins {
            let side_a = side_coords(a, width, height, aspect_ratio);
            let side_b = side_coords(b, width, height, aspect_ratio);
            for (p, q) in side_a.into_iter().zip(side_b) {
                grid.add_edge(p, q);
            }
        }

        for &(a, b) in reverse_joins {
            let side_a = side_coords(a, width, height, aspect_ratio);
            let side_b = side_coords(b, width, height, aspect_ratio);
            for (p, q) in side_a.into_iter().zip(side_b.into_iter().rev()) {
                grid.add_edge(p, q);
            }
        }

        grid
    }

    fn add_edge(&mut self, a: Pos, b: Pos) {
        // A point folded onto itself would be its own neighbour
        if a == b {
            return;
        }
        if let Some(v) = self.connections.get_mut(&a) {
            v.push(b);
        }
        if let Some(v) = self.connections.get_mut(&b) {
            v.push(a);
        }
    }
}

impl<T> Grid<T> {
    /// Get the value of a point
    pub fn get_point(&self, pos: Pos) -> Result<&T, GridError> {
        self.points.get(&pos).ok_or(GridError::OutOfBounds(pos))
    }

    /// Set the value of a point
    pub fn set_point(&mut self, pos: Pos, value: T) -> Result<(), GridError> {
        match self.points.get_mut(&pos) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(GridError::OutOfBounds(pos)),
        }
    }

    /// The precomputed adjacency list of a point, in insertion order
    pub fn neighbours(&self, pos: Pos) -> Result<&[Pos], GridError> {
        self.connections
            .get(&pos)
            .map(Vec::as_slice)
            .ok_or(GridError::OutOfBounds(pos))
    }

    /// Whether the coordinate is a point of this grid
    pub fn contains(&self, pos: Pos) -> bool {
        self.points.contains_key(&pos)
    }

    /// Iterate over all point coordinates
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.points.keys().copied()
    }

    /// Iterate over all points and their values
    pub fn points(&self) -> impl Iterator<Item = (Pos, &T)> {
        self.points.iter().map(|(p, v)| (*p, v))
    }

    /// Number of points in the grid
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the grid has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box `(xmin, ymin, xmax, ymax)` of the points actually
    /// present. For irregular shapes the box may cover coordinates that
    /// are not points.
    pub fn size(&self) -> (i32, i32, i32, i32) {
        self.bounds
    }
}

/// Lattice of points arranged in a rectangle, columns stretched by
/// `aspect_ratio`
fn rectangular_lattice(width: i32, height: i32, aspect_ratio: i32) -> Vec<Pos> {
    let mut points = Vec::with_capacity((width.max(0) * height.max(0)) as usize);
    for i in 0..width {
        for j in 0..height {
            points.push(Pos::new(i * aspect_ratio, j));
        }
    }
    points
}

/// The coordinates making up one side of a rectangular grid
fn side_coords(side: Side, width: i32, height: i32, aspect_ratio: i32) -> Vec<Pos> {
    match side {
        Side::West => (0..height).map(|y| Pos::new(0, y)).collect(),
        Side::East => (0..height)
            .map(|y| Pos::new((width - 1) * aspect_ratio, y))
            .collect(),
        Side::North => (0..width).map(|x| Pos::new(x * aspect_ratio, 0)).collect(),
        Side::South => (0..width)
            .map(|x| Pos::new(x * aspect_ratio, height - 1))
            .collect(),
    }
}
