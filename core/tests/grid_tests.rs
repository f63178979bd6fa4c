// SPDX-License-Identifier: MIT OR Apache-2.0

use goban_core::{Grid, GridError, Pos, Side};

fn p(x: i32, y: i32) -> Pos {
    Pos::new(x, y)
}

type TestGrid = Grid<Option<u8>>;

#[test]
fn rectangular_grid_connectivity() {
    let grid: TestGrid = Grid::rectangular(5, 5, None);
    assert_eq!(grid.len(), 25);

    // Corner, side and interior points have 2, 3 and 4 neighbours
    assert_eq!(grid.neighbours(p(0, 0)).unwrap().len(), 2);
    assert_eq!(grid.neighbours(p(2, 0)).unwrap().len(), 3);
    assert_eq!(grid.neighbours(p(2, 2)).unwrap().len(), 4);

    let mid = grid.neighbours(p(2, 2)).unwrap();
    for n in [p(1, 2), p(3, 2), p(2, 1), p(2, 3)] {
        assert!(mid.contains(&n));
    }
}

#[test]
fn out_of_bounds_lookups_fail() {
    let mut grid: TestGrid = Grid::rectangular(5, 5, None);
    assert_eq!(grid.get_point(p(5, 0)), Err(GridError::OutOfBounds(p(5, 0))));
    assert_eq!(
        grid.set_point(p(-1, 2), Some(1)),
        Err(GridError::OutOfBounds(p(-1, 2)))
    );
    assert!(grid.neighbours(p(0, 5)).is_err());
}

#[test]
fn equality_compares_points_and_connections_only() {
    let a: TestGrid = Grid::rectangular(4, 4, None);
    let b: TestGrid = Grid::rectangular(4, 4, None);
    assert_eq!(a, b);

    let mut c = b.clone();
    c.set_point(p(1, 1), Some(7)).unwrap();
    assert_ne!(a, c);

    // A fold changes connections, so an otherwise identical grid differs
    let folded: TestGrid = Grid::folded(4, 4, &[(Side::East, Side::West)], &[], None);
    assert_ne!(a, folded);
}

#[test]
fn aspect_ratio_stretches_columns() {
    let grid: TestGrid = Grid::rectangular_with_aspect(3, 3, 2, None);
    assert_eq!(grid.size(), (0, 0, 4, 2));
    let ns = grid.neighbours(p(0, 0)).unwrap();
    assert!(ns.contains(&p(2, 0)));
    assert!(ns.contains(&p(0, 1)));
}

#[test]
fn cylinder_adds_seam_edges() {
    let grid: TestGrid = Grid::folded(5, 5, &[(Side::East, Side::West)], &[], None);
    // Seam columns gain one edge each; rows are unchanged
    assert_eq!(grid.neighbours(p(0, 0)).unwrap().len(), 3);
    assert_eq!(grid.neighbours(p(4, 2)).unwrap().len(), 4);
    assert!(grid.neighbours(p(0, 2)).unwrap().contains(&p(4, 2)));
    assert_eq!(grid.neighbours(p(2, 2)).unwrap().len(), 4);
}

#[test]
fn torus_has_no_edge_of_the_world() {
    let grid: TestGrid = Grid::folded(
        5,
        5,
        &[(Side::East, Side::West), (Side::North, Side::South)],
        &[],
        None,
    );
    for pos in grid.positions().collect::<Vec<_>>() {
        assert_eq!(
            grid.neighbours(pos).unwrap().len(),
            4,
            "point {pos} should have four neighbours on a torus"
        );
    }
    let corner = grid.neighbours(p(0, 0)).unwrap();
    assert!(corner.contains(&p(4, 0)));
    assert!(corner.contains(&p(0, 4)));
}

#[test]
fn moebius_twist_reverses_the_joined_side() {
    let grid: TestGrid = Grid::folded(5, 4, &[], &[(Side::West, Side::East)], None);
    // The west column zips against the east column reversed
    assert!(grid.neighbours(p(0, 0)).unwrap().contains(&p(4, 3)));
    assert!(grid.neighbours(p(0, 3)).unwrap().contains(&p(4, 0)));
    assert!(!grid.neighbours(p(0, 0)).unwrap().contains(&p(4, 0)));
}

#[test]
fn folded_adjacency_stays_symmetric() {
    let grid: TestGrid = Grid::folded(
        6,
        6,
        &[(Side::East, Side::West)],
        &[(Side::North, Side::South)],
        None,
    );
    for pos in grid.positions().collect::<Vec<_>>() {
        for &n in grid.neighbours(pos).unwrap() {
            assert!(grid.neighbours(n).unwrap().contains(&pos));
        }
    }
}

#[test]
fn lattice_with_basis_builds_composite_cells() {
    // Two-point basis repeated along a row, chained by two edge templates
    let lattice = [p(0, 0), p(2, 0)];
    let basis = [(0, 0), (1, 0)];
    let connections = [((0, 0), (1, 0)), ((1, 0), (2, 0))];
    let grid: TestGrid = Grid::from_lattice(&lattice, &basis, &connections, None);

    assert_eq!(grid.len(), 4);
    // Interior points chain left and right; the final edge template at the
    // last lattice point reaches a nonexistent point and is dropped
    assert_eq!(grid.neighbours(p(1, 0)).unwrap().len(), 2);
    assert_eq!(grid.neighbours(p(3, 0)).unwrap().len(), 1);
}
