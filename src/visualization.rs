//! 3D visualization of a decomposed grid using kiss3d.
//!
//! There is exactly one labeled grid to show, and the "explosion" animation
//! moves each piece along its own removal-direction vector, staggered by
//! start time, rather than a generic centroid offset.

use kiss3d::prelude::*;

use interlock::grid::Grid;
use interlock::passage::movable_direction;

/// Visual properties the renderer contract assigns to a piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceVisual {
    pub rgb: (f32, f32, f32),
    pub movement_unit_vector: (f32, f32, f32),
    pub movement_start_time: f32,
}

const PALETTE: [(f32, f32, f32); 6] = [
    (0.9, 0.2, 0.2),
    (0.2, 0.8, 0.2),
    (0.2, 0.2, 0.9),
    (0.9, 0.9, 0.2),
    (0.9, 0.2, 0.9),
    (0.2, 0.9, 0.9),
];

/// `piece_id == 1` (the special first-out piece) animates last, at
/// `(max_piece_id - 1) * 15.0`; pieces `2..max_piece_id` animate in order
/// starting at `0.0`; the final piece (`max_piece_id`) has no motion.
pub fn properties_for_piece(grid: &Grid, piece_id: u32, max_piece_id: u32) -> PieceVisual {
    let rgb = PALETTE[(piece_id as usize) % PALETTE.len()];
    if piece_id == max_piece_id {
        return PieceVisual {
            rgb,
            movement_unit_vector: (0.0, 0.0, 0.0),
            movement_start_time: 0.0,
        };
    }
    let movement_start_time = if piece_id == 1 {
        (max_piece_id - 1) as f32 * 15.0
    } else {
        (piece_id.saturating_sub(2)) as f32 * 15.0
    };
    let dir = movable_direction(grid, piece_id);
    PieceVisual {
        rgb,
        movement_unit_vector: dir.unit_vector(),
        movement_start_time,
    }
}

struct RenderedCube {
    node: SceneNode3d,
    base_position: Vec3,
    piece_id: u32,
}

fn build_scene(scene: &mut SceneNode3d, grid: &Grid, max_piece_id: u32) -> Vec<RenderedCube> {
    const CUBE_SIZE: f32 = 0.9;
    let (max_x, max_y, max_z) = grid.dimensions();
    let center = (
        -(max_x as f32 - 1.0) / 2.0,
        -(max_y as f32 - 1.0) / 2.0,
        -(max_z as f32 - 1.0) / 2.0,
    );

    let mut cubes = Vec::new();
    for p in grid.all_positions() {
        let label = grid.get(p);
        if label == 0 {
            continue;
        }
        let visual = properties_for_piece(grid, label, max_piece_id);
        let base_position = Vec3::new(
            p.x as f32 + center.0,
            p.y as f32 + center.1,
            p.z as f32 + center.2,
        );
        let (r, g, b) = visual.rgb;
        let node = scene
            .add_cube(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE)
            .set_color(Color::new(r, g, b, 1.0))
            .set_position(base_position);
        cubes.push(RenderedCube {
            node,
            base_position,
            piece_id: label,
        });
    }
    cubes
}

/// Opens an interactive viewer for a single decomposed grid.
pub fn display(grid: &Grid) {
    pollster::block_on(display_async(grid));
}

async fn display_async(grid: &Grid) {
    let max_piece_id = grid.max_label();
    if max_piece_id == 0 {
        println!("Nothing to display: grid is empty");
        return;
    }

    let (max_x, _, _) = grid.dimensions();
    let mut window = Window::new("Interlock - [R] reset, close to exit").await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(max_x as f32 * 2.5);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(5.0, 5.0, 5.0));

    let mut cubes = build_scene(&mut scene, grid, max_piece_id);
    let directions: Vec<(u32, (f32, f32, f32), f32)> = (1..=max_piece_id)
        .map(|id| {
            let visual = properties_for_piece(grid, id, max_piece_id);
            (id, visual.movement_unit_vector, visual.movement_start_time)
        })
        .collect();

    let mut elapsed: f32 = 0.0;
    const TICK: f32 = 1.0 / 60.0;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if key == Key::R && action == Action::Press {
                    elapsed = 0.0;
                }
            }
        }

        elapsed += TICK;
        for cube in &mut cubes {
            let (_, (dx, dy, dz), start_time) = directions
                .iter()
                .find(|(id, _, _)| *id == cube.piece_id)
                .copied()
                .unwrap_or((cube.piece_id, (0.0, 0.0, 0.0), 0.0));
            let progress = (elapsed - start_time).max(0.0) * 0.3;
            cube.node.set_position(
                cube.base_position + Vec3::new(dx, dy, dz) * progress,
            );
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
