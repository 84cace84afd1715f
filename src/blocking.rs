//! Blocking-pair search.
//!
//! A *blocking pair* is a voxel adjacent to the growing piece's seed along
//! the seed's own normal axis, paired with the voxel immediately beyond it:
//! the far voxel (the "blocker") pins the near one (the "blockee") in place
//! along `normal_dir`, which is exactly what later lets `path` carve a route
//! that frees the blockee by routing around the blocker instead of through it.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::accessibility::accessibility;
use crate::error::Result;
use crate::geometry::Position;
use crate::grid::Grid;
use crate::passage::Seed;

/// Maximum number of pairs `find_blocking_pairs` will emit. The search space
/// around a seed is small in practice; this is a backstop against pathological
/// inputs rather than a tuned limit.
const MAX_PAIRS: usize = 50;

/// The number of most-inaccessible pairs `inaccessible_pairs` keeps.
const MAX_INACCESSIBLE: usize = 10;

/// A blockee/blocker pair discovered while exploring outward from a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientedPair {
    pub blockee: Position,
    pub blocker: Position,
}

/// Breadth-first search outward from `seed.pos`, following every existing
/// voxel, emitting a pair whenever a visited voxel `pos` has an existing,
/// non-anchor voxel at `other = pos.step(seed.normal_dir.opposite())`: `pos`
/// becomes the pair's `blocker`, `other` its `blockee`.
///
/// `restrict_unassigned` is set for pieces after the first: both `pos` and
/// `other` must still carry label `1` (unclaimed by any earlier piece).
/// Anchors (`anchors`) are never reported as blockees, since absorbing one
/// would destabilize the residual solid.
pub fn find_blocking_pairs(
    grid: &Grid,
    seed: &Seed,
    anchors: &[Position],
    restrict_unassigned: bool,
) -> Vec<OrientedPair> {
    let blockee_dir = seed.normal_dir.opposite();
    let mut visited: FxHashSet<Position> = FxHashSet::default();
    let mut queue: VecDeque<Position> = VecDeque::new();
    let mut pairs = Vec::new();

    visited.insert(seed.pos);
    queue.push_back(seed.pos);

    while let Some(pos) = queue.pop_front() {
        if pairs.len() >= MAX_PAIRS {
            break;
        }

        let other = pos.step(blockee_dir);
        if grid.exists(other) && !anchors.contains(&other) {
            let eligible = !restrict_unassigned || (grid.get(pos) == 1 && grid.get(other) == 1);
            if eligible {
                pairs.push(OrientedPair {
                    blocker: pos,
                    blockee: other,
                });
            }
        }

        for d in crate::geometry::ALL {
            let next = pos.step(d);
            if grid.exists(next) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    pairs
}

/// Scores every pair by the accessibility of its blockee (fixed depth from
/// `grid::ACCESSIBILITY_DEPTH`) and keeps the `MAX_INACCESSIBLE` lowest —
/// the most deeply buried candidates, which are the ones most worth routing
/// a path around rather than leaving for later.
pub fn inaccessible_pairs(grid: &Grid, pairs: &[OrientedPair]) -> Result<Vec<OrientedPair>> {
    let mut scored = Vec::with_capacity(pairs.len());
    for &pair in pairs {
        let score = accessibility(grid, pair.blockee, crate::grid::ACCESSIBILITY_DEPTH)?;
        scored.push((score, pair));
    }
    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
    scored.truncate(MAX_INACCESSIBLE);
    Ok(scored.into_iter().map(|(_, pair)| pair).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction::*;
    use crate::geometry::Position;

    fn solid_cube(n: usize) -> Grid {
        let mut grid = Grid::new(n, n, n);
        for p in grid.all_positions().collect::<Vec<_>>() {
            grid.set(p, 1).unwrap();
        }
        grid
    }

    #[test]
    fn finds_pair_behind_seed_along_normal_direction() {
        let grid = solid_cube(3);
        let seed = Seed {
            pos: Position::new(0, 2, 1),
            removal_dir: Yp,
            normal_dir: Xn,
        };
        let pairs = find_blocking_pairs(&grid, &seed, &[], false);
        assert!(pairs
            .iter()
            .any(|pair| pair.blocker == seed.pos && pair.blockee == Position::new(1, 2, 1)));
    }

    #[test]
    fn anchors_are_never_reported_as_blockees() {
        let grid = solid_cube(3);
        let seed = Seed {
            pos: Position::new(0, 2, 1),
            removal_dir: Yp,
            normal_dir: Xn,
        };
        let anchors = vec![Position::new(1, 2, 1)];
        let pairs = find_blocking_pairs(&grid, &seed, &anchors, false);
        assert!(!pairs.iter().any(|pair| pair.blockee == Position::new(1, 2, 1)));
    }

    #[test]
    fn restrict_unassigned_excludes_already_claimed_voxels() {
        let mut grid = solid_cube(3);
        grid.set(Position::new(1, 2, 1), 2).unwrap();
        let seed = Seed {
            pos: Position::new(0, 2, 1),
            removal_dir: Yp,
            normal_dir: Xn,
        };
        let pairs = find_blocking_pairs(&grid, &seed, &[], true);
        assert!(!pairs.iter().any(|pair| pair.blockee == Position::new(1, 2, 1)));
    }

    #[test]
    fn search_is_capped_at_max_pairs() {
        let grid = solid_cube(5);
        let seed = Seed {
            pos: Position::new(0, 4, 2),
            removal_dir: Yp,
            normal_dir: Xn,
        };
        let pairs = find_blocking_pairs(&grid, &seed, &[], false);
        assert!(pairs.len() <= MAX_PAIRS);
    }

    #[test]
    fn inaccessible_pairs_sorts_ascending_and_truncates() {
        let grid = solid_cube(3);
        let seed = Seed {
            pos: Position::new(0, 2, 1),
            removal_dir: Yp,
            normal_dir: Xn,
        };
        let pairs = find_blocking_pairs(&grid, &seed, &[], false);
        let ranked = inaccessible_pairs(&grid, &pairs).unwrap();
        assert!(ranked.len() <= MAX_INACCESSIBLE);
        let scores: Vec<f64> = ranked
            .iter()
            .map(|pair| accessibility(&grid, pair.blockee, crate::grid::ACCESSIBILITY_DEPTH).unwrap())
            .collect();
        for window in scores.windows(2) {
            assert!(window[0] <= window[1]);
        }
    }
}
