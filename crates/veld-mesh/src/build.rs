use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use rand::Rng;

use veld_blocks::{Block, Flora, MaterialKey};
use veld_chunk::{ChunkBuf, ChunkStore};
use veld_geom::{Euler, Vec3};
use veld_world::World;

use crate::batch::{BatchAllocator, FaceInstance};
use crate::face::Face;

/// Water tops sink by 1/8 unit so the surface reads as a meniscus.
const MENISCUS_DROP: f32 = 0.125;
/// Lily pads float just above the water surface plane.
const LILY_DROP: f32 = 0.62;
/// Loose flora shifts by a sixteenth-block step per lateral axis.
const JITTER_STEP: f32 = 1.0 / 16.0;

/// Emits every visible face of one completed chunk into `out`, resolving
/// boundary neighbors through the store. The rng drives mesh-time decoration
/// only (flora jitter, lily orientation); use `World::mesh_rng` for
/// reproducible output.
pub fn mesh_chunk<R: Rng>(
    buf: &ChunkBuf,
    store: &ChunkStore,
    world: &World,
    rng: &mut R,
    out: &mut BatchAllocator,
) {
    let bx = buf.base_x();
    let bz = buf.base_z();
    for x in 0..buf.sx {
        for z in 0..buf.sz {
            for y in 0..buf.sy {
                let block = buf.get_local(x, y, z);
                if block.is_air() {
                    continue;
                }
                let (wx, wy, wz) = (bx + x as i32, y as i32, bz + z as i32);
                let center = Vec3::new(wx as f32, wy as f32, wz as f32);
                match block {
                    Block::Flora(flora) => emit_flora(flora, center, rng, out),
                    Block::Water => emit_water_top(buf, store, world, wx, wy, wz, center, out),
                    solid => emit_cube(solid, buf, store, world, wx, wy, wz, center, out),
                }
            }
        }
    }
    log::debug!(
        "meshed chunk ({}, {}): {} instances in {} batches so far",
        buf.coord.cx,
        buf.coord.cz,
        out.total_instances(),
        out.batch_count(),
    );
}

/// A face of an opaque block is visible when the cell it looks into holds
/// air, flora, or water — water deliberately does not occlude its neighbors.
fn emit_cube(
    block: Block,
    buf: &ChunkBuf,
    store: &ChunkStore,
    world: &World,
    wx: i32,
    wy: i32,
    wz: i32,
    center: Vec3,
    out: &mut BatchAllocator,
) {
    for face in Face::ALL {
        let (dx, dy, dz) = face.delta();
        let neighbor = neighbor_block(buf, store, world, wx + dx, wy + dy, wz + dz);
        if neighbor.occludes() {
            continue;
        }
        let Some(material) = block.material_for(face.role()) else {
            continue;
        };
        out.push(FaceInstance {
            position: center + face.normal() * 0.5,
            rotation: face.rotation(),
            material,
        });
    }
}

/// Water renders as its top surface only, dropped by the meniscus offset,
/// and only when open to air or flora — never under another water cell.
fn emit_water_top(
    buf: &ChunkBuf,
    store: &ChunkStore,
    world: &World,
    wx: i32,
    wy: i32,
    wz: i32,
    center: Vec3,
    out: &mut BatchAllocator,
) {
    let above = neighbor_block(buf, store, world, wx, wy + 1, wz);
    if !(above.is_air() || above.is_flora()) {
        return;
    }
    let face = Face::PosY;
    let mut position = center + face.normal() * 0.5;
    position.y -= MENISCUS_DROP;
    out.push(FaceInstance {
        position,
        rotation: face.rotation(),
        material: MaterialKey::Water,
    });
}

fn emit_flora<R: Rng>(flora: Flora, center: Vec3, rng: &mut R, out: &mut BatchAllocator) {
    let material = MaterialKey::Flora(flora);
    if flora.is_lily_pad() {
        // Horizontal plane with a random quarter-turn so pads don't align.
        let quarter_turns = rng.gen_range(1..=3);
        out.push(FaceInstance {
            position: Vec3::new(center.x, center.y - LILY_DROP, center.z),
            rotation: Euler::new(-FRAC_PI_2, 0.0, quarter_turns as f32 * FRAC_PI_2),
            material,
        });
        return;
    }

    let (jx, jz) = if flora.jitters() {
        (
            rng.gen_range(-1i32..=1) as f32 * JITTER_STEP,
            rng.gen_range(-1i32..=1) as f32 * JITTER_STEP,
        )
    } else {
        (0.0, 0.0)
    };
    let position = Vec3::new(center.x + jx, center.y, center.z + jz);
    // Two crossed vertical planes through the block center.
    for yaw in [-FRAC_PI_4, FRAC_PI_4] {
        out.push(FaceInstance {
            position,
            rotation: Euler::yaw(yaw),
            material,
        });
    }
}

/// Resolves the block at a world cell seen from `buf`: in-chunk directly,
/// across lateral borders through the store. Vertical out-of-range and
/// chunks missing from the store read as air — unlike the shoreline pass,
/// which treats an absent chunk as "no water".
fn neighbor_block(
    buf: &ChunkBuf,
    store: &ChunkStore,
    world: &World,
    wx: i32,
    wy: i32,
    wz: i32,
) -> Block {
    if wy < 0 || wy >= buf.sy as i32 {
        return Block::Air;
    }
    if let Some(b) = buf.get_world(wx, wy, wz) {
        return b;
    }
    store
        .get(world.chunk_coord_at(wx, wz))
        .and_then(|c| c.get_world(wx, wy, wz))
        .unwrap_or(Block::Air)
}
