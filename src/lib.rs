//! Interlocking voxel-puzzle decomposition.
//!
//! Given a solid voxel shape, greedily carves it into pieces that can be
//! disassembled one at a time by sliding each along a single axis: pick a
//! seed on the shape's surface, find the voxels pinning its neighborhood in
//! place, carve a path that frees them, and grow the resulting piece to a
//! minimum size. Repeat until few enough voxels remain to call the last
//! piece whole.

pub mod accessibility;
pub mod blocking;
pub mod error;
pub mod expand;
pub mod geometry;
pub mod grid;
pub mod passage;
pub mod path;
pub mod persistence;
pub mod seed;
pub mod solver;
