use veld_blocks::Block;
use veld_world::{ChunkCoord, World};

use crate::store::ChunkStore;
use crate::vegetation::grow_vegetation;
use crate::ChunkBuf;

/// Generates the chunk at `coord` if the store doesn't hold it yet. All
/// three passes run on a private buffer; the chunk is published only once
/// complete, so consumers never observe a partially generated chunk.
pub fn ensure_chunk(world: &World, store: &mut ChunkStore, coord: ChunkCoord) {
    if store.get(coord).is_some() {
        return;
    }
    let mut buf = base_fill(world, coord);
    convert_shoreline(world, store, &mut buf);
    let mut rng = world.vegetation_rng(coord);
    grow_vegetation(world, &mut buf, &mut rng);
    store.insert(buf);
}

/// Pass 1: stone, dirt, water and air from the column profile. Pure — no
/// randomness, no neighbor reads.
pub fn base_fill(world: &World, coord: ChunkCoord) -> ChunkBuf {
    let sx = world.chunk_size();
    let sz = world.chunk_size();
    let sy = world.world_height();
    let water_level = world.water_level();
    let (bx, bz) = world.chunk_origin(coord);

    let mut buf = ChunkBuf::filled(coord, sx, sy, sz, Block::Air);
    for z in 0..sz {
        for x in 0..sx {
            let profile = world.column_profile(bx + x as i32, bz + z as i32);
            for y in 0..sy {
                let yi = y as i32;
                let block = if yi < profile.stone_top {
                    Block::Stone
                } else if yi < profile.dirt_top {
                    Block::Dirt
                } else if yi < water_level {
                    Block::Water
                } else {
                    continue;
                };
                buf.set_local(x, y, z, block);
            }
        }
    }
    buf
}

const NEIGHBORS_6: [(i32, i32, i32); 6] = [
    (-1, 0, 0),
    (1, 0, 0),
    (0, 0, -1),
    (0, 0, 1),
    (0, -1, 0),
    (0, 1, 0),
];

/// Pass 2: dirt touching water becomes sand. Single-hop by construction:
/// this pass never produces water, so converting in place cannot cascade.
pub fn convert_shoreline(world: &World, store: &ChunkStore, buf: &mut ChunkBuf) {
    let (bx, bz) = world.chunk_origin(buf.coord);
    for z in 0..buf.sz {
        for x in 0..buf.sx {
            for y in 0..buf.sy {
                if buf.get_local(x, y, z) != Block::Dirt {
                    continue;
                }
                let (wx, wy, wz) = (bx + x as i32, y as i32, bz + z as i32);
                let wet = NEIGHBORS_6
                    .iter()
                    .any(|&(dx, dy, dz)| water_at(world, store, buf, wx + dx, wy + dy, wz + dz));
                if wet {
                    buf.set_local(x, y, z, Block::Sand);
                }
            }
        }
    }
}

// An ungenerated neighbor chunk contributes no water: conversion never
// invents cross-boundary water. The mesher makes the opposite call for
// absent chunks (treats them as air).
fn water_at(world: &World, store: &ChunkStore, buf: &ChunkBuf, wx: i32, wy: i32, wz: i32) -> bool {
    if wy < 0 || wy >= buf.sy as i32 {
        return false;
    }
    if let Some(b) = buf.get_world(wx, wy, wz) {
        return b.is_water();
    }
    store
        .get(world.chunk_coord_at(wx, wz))
        .and_then(|c| c.get_world(wx, wy, wz))
        .is_some_and(Block::is_water)
}
