//! Piece expansion.
//!
//! `path` hands `construct_piece` a single starting `PotentialPiece`; this
//! module grows it, one attached neighbor at a time, until it reaches
//! `min_size` voxels. Growth never touches an anchor, and never claims a
//! voxel whose removal-direction extrusion would sweep one up either.

use crate::error::Result;
use crate::geometry::{Position, ALL};
use crate::grid::Grid;
use crate::passage::Seed;
use crate::path::{add_upward_voxels, PotentialPiece};

/// Grows `piece` in place until it holds at least `min_size` voxels or no
/// further attachment is possible.
///
/// `first_piece` selects which label an attachable neighbor may carry: any
/// existing label for piece 1 (there is no "previous piece" to respect yet),
/// or exactly `1` (still unassigned) for every piece after that.
pub fn expand(
    grid: &Grid,
    seed: &Seed,
    piece: PotentialPiece,
    base_anchors: &[Position],
    min_size: usize,
    first_piece: bool,
) -> Result<Vec<Position>> {
    let mut voxels = piece.voxels.clone();

    let mut anchors = base_anchors.to_vec();
    anchors.push(blocker_column_anchor(grid, piece.blocking_voxel, seed));

    while voxels.len() < min_size {
        let candidates = attachment_candidates(grid, &voxels, &anchors, seed.removal_dir, first_piece);
        if candidates.is_empty() {
            break;
        }

        let mut expansion = None;
        for &candidate in &candidates {
            let probe = PotentialPiece {
                voxels: vec![candidate],
                blocking_voxel: piece.blocking_voxel,
            };
            if let Some(extruded) = add_upward_voxels(grid, &probe, seed.removal_dir, &anchors) {
                expansion = Some(extruded);
                break;
            }
        }

        let Some(expansion) = expansion else {
            break;
        };
        for v in expansion.voxels {
            if !voxels.contains(&v) {
                voxels.push(v);
            }
        }
    }

    Ok(voxels)
}

/// Walks from `blocking_voxel` along `seed.normal_dir` until leaving the
/// existing region; the last existing cell found protects the column above
/// the blocker from being cannibalized by this expansion.
fn blocker_column_anchor(grid: &Grid, blocking_voxel: Position, seed: &Seed) -> Position {
    let mut cur = blocking_voxel;
    let mut last_existing = blocking_voxel;
    loop {
        let next = cur.step(seed.normal_dir);
        if !grid.exists(next) {
            break;
        }
        last_existing = next;
        cur = next;
    }
    last_existing
}

/// Every neighbor of a piece voxel that exists, carries an attachable label,
/// is not already in the piece, is not an anchor, and is not collinear with
/// any anchor along `removal_dir` (such a voxel sits directly in an anchor's
/// removal column and would destabilize it if carved away). Enumerated
/// deterministically: outer loop over piece voxels in insertion order, inner
/// loop over the fixed six-direction list.
fn attachment_candidates(
    grid: &Grid,
    piece: &[Position],
    anchors: &[Position],
    removal_dir: crate::geometry::Direction,
    first_piece: bool,
) -> Vec<Position> {
    let mut candidates = Vec::new();
    for &v in piece {
        for d in ALL {
            let n = v.step(d);
            if !grid.exists(n) {
                continue;
            }
            let attachable_label = if first_piece { true } else { grid.get(n) == 1 };
            if !attachable_label {
                continue;
            }
            if piece.contains(&n) || candidates.contains(&n) || anchors.contains(&n) {
                continue;
            }
            let pins_an_anchor = anchors
                .iter()
                .any(|&a| a.collinear_with(n, removal_dir) || n.collinear_with(a, removal_dir));
            if pins_an_anchor {
                continue;
            }
            candidates.push(n);
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction::*;

    fn solid_cube(n: usize) -> Grid {
        let mut grid = Grid::new(n, n, n);
        for p in grid.all_positions().collect::<Vec<_>>() {
            grid.set(p, 1).unwrap();
        }
        grid
    }

    fn seed_piece(pos: Position, blocking_voxel: Position) -> PotentialPiece {
        PotentialPiece {
            voxels: vec![pos],
            blocking_voxel,
        }
    }

    #[test]
    fn expand_always_includes_the_seed() {
        let grid = solid_cube(3);
        let seed = Seed {
            pos: Position::new(0, 2, 1),
            removal_dir: Yp,
            normal_dir: Xn,
        };
        let piece = seed_piece(seed.pos, seed.pos);
        let result = expand(&grid, &seed, piece, &[], 1, true).unwrap();
        assert!(result.contains(&seed.pos));
    }

    #[test]
    fn expand_stops_once_min_size_reached() {
        let grid = solid_cube(3);
        let seed = Seed {
            pos: Position::new(0, 2, 1),
            removal_dir: Yp,
            normal_dir: Xn,
        };
        let piece = seed_piece(seed.pos, seed.pos);
        let result = expand(&grid, &seed, piece, &[], 2, true).unwrap();
        assert!(result.len() >= 2);
    }

    #[test]
    fn expand_never_absorbs_an_anchor() {
        let grid = solid_cube(3);
        let seed = Seed {
            pos: Position::new(0, 2, 1),
            removal_dir: Yp,
            normal_dir: Xn,
        };
        let anchor = Position::new(1, 2, 1);
        let piece = seed_piece(seed.pos, seed.pos);
        let result = expand(&grid, &seed, piece, &[anchor], 100, true).unwrap();
        assert!(!result.contains(&anchor));
    }

    #[test]
    fn subsequent_piece_variant_only_attaches_unassigned_voxels() {
        let mut grid = solid_cube(3);
        grid.set(Position::new(1, 2, 1), 2).unwrap();
        let seed = Seed {
            pos: Position::new(0, 2, 1),
            removal_dir: Yp,
            normal_dir: Xn,
        };
        let piece = seed_piece(seed.pos, seed.pos);
        let result = expand(&grid, &seed, piece, &[], 100, false).unwrap();
        assert!(!result.contains(&Position::new(1, 2, 1)));
    }
}
