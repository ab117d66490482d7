use rand::Rng;
use veld_blocks::{BLOSSOM_VARIETIES, Block, Flora};
use veld_world::World;

use crate::ChunkBuf;

/// Pass 3: surface cover (grass, flora, sugar cane, ice, lily pads) followed
/// by tree placement. All randomness comes from the injected generator.
pub fn grow_vegetation<R: Rng>(world: &World, buf: &mut ChunkBuf, rng: &mut R) {
    surface_cover(world, buf, rng);
    plant_trees(world, buf, rng);
}

fn surface_cover<R: Rng>(world: &World, buf: &mut ChunkBuf, rng: &mut R) {
    let flora = &world.config().flora;
    for z in 0..buf.sz {
        for x in 0..buf.sx {
            for y in (0..buf.sy).rev() {
                match buf.get_local(x, y, z) {
                    Block::Dirt => {
                        if exposed_above(buf, x, y, z) {
                            buf.set_local(x, y, z, Block::Grass);
                            let r = rng.gen_range(0.0f32..1.0);
                            let planted = if r < flora.blossom {
                                Some(Flora::Blossom(rng.gen_range(1..=BLOSSOM_VARIETIES)))
                            } else if r < flora.blossom + flora.tall_grass {
                                Some(Flora::TallGrass)
                            } else if r > 1.0 - flora.glow_berries {
                                Some(Flora::GlowBerries)
                            } else {
                                None
                            };
                            if let Some(f) = planted {
                                set_above(buf, x, y, z, Block::Flora(f));
                            }
                        }
                        break;
                    }
                    Block::Sand => {
                        // Sand does not end the scan: a water surface deeper
                        // in the column still gets its own treatment.
                        if rng.gen_range(0.0f32..1.0) < flora.sugar_cane
                            && exposed_above(buf, x, y, z)
                        {
                            let height = rng.gen_range(1..=3usize);
                            for h in 1..=height {
                                if y + h < buf.sy {
                                    buf.set_local(x, y + h, z, Block::Flora(Flora::SugarCane));
                                }
                            }
                        }
                    }
                    Block::Water => {
                        if exposed_above(buf, x, y, z) {
                            let r = rng.gen_range(0.0f32..1.0);
                            if r < flora.ice {
                                buf.set_local(x, y, z, Block::Ice);
                            } else if r > 1.0 - flora.lily {
                                set_above(buf, x, y, z, Block::Flora(Flora::LilyPad));
                            }
                        }
                        break;
                    }
                    _ => {}
                }
            }
        }
    }
}

#[inline]
fn exposed_above(buf: &ChunkBuf, x: usize, y: usize, z: usize) -> bool {
    y + 1 >= buf.sy || buf.get_local(x, y + 1, z).is_air()
}

#[inline]
fn set_above(buf: &mut ChunkBuf, x: usize, y: usize, z: usize, b: Block) {
    if y + 1 < buf.sy {
        buf.set_local(x, y + 1, z, b);
    }
}

/// Crown layer radii, bottom to top. Radius-2 layers are a square minus its
/// diagonal corners; the radius-1 cap is a diamond.
const CROWN_RADII: [i32; 3] = [2, 2, 1];

/// Margin keeping trunk and crown strictly inside the chunk.
const QUADRANT_INSET: usize = 2;

fn plant_trees<R: Rng>(world: &World, buf: &mut ChunkBuf, rng: &mut R) {
    let trees = &world.config().trees;
    let half_x = buf.sx / 2;
    let half_z = buf.sz / 2;
    for qx in 0..2usize {
        for qz in 0..2usize {
            if rng.gen_range(0.0f32..1.0) >= trees.per_quadrant {
                continue;
            }
            let x0 = qx * half_x + QUADRANT_INSET;
            let x1 = ((qx + 1) * half_x).saturating_sub(QUADRANT_INSET);
            let z0 = qz * half_z + QUADRANT_INSET;
            let z1 = ((qz + 1) * half_z).saturating_sub(QUADRANT_INSET);
            'quadrant: for x in x0..x1 {
                for z in z0..z1 {
                    if let Some(y) = top_grass(buf, x, z) {
                        place_tree(world, buf, x, z, y, rng);
                        break 'quadrant;
                    }
                }
            }
        }
    }
}

fn top_grass(buf: &ChunkBuf, x: usize, z: usize) -> Option<usize> {
    (0..buf.sy).rev().find(|&y| {
        buf.get_local(x, y, z) == Block::Grass
            && y + 1 < buf.sy
            && buf.get_local(x, y + 1, z).is_air()
    })
}

fn place_tree<R: Rng>(world: &World, buf: &mut ChunkBuf, x: usize, z: usize, y: usize, rng: &mut R) {
    let trees = &world.config().trees;
    let trunk = rng.gen_range(trees.trunk_min..=trees.trunk_max) as usize;
    for h in 1..=trunk {
        if y + h < buf.sy {
            buf.set_local(x, y + h, z, Block::Log);
        }
    }

    let crown_base = y + trunk;
    for (layer, &radius) in CROWN_RADII.iter().enumerate() {
        let ly = crown_base + layer;
        if ly >= buf.sy {
            continue;
        }
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                let keep = if radius == 2 {
                    !(dx.abs() == 2 && dz.abs() == 2)
                } else {
                    dx.abs() + dz.abs() <= radius
                };
                if !keep {
                    continue;
                }
                let lx = x as i32 + dx;
                let lz = z as i32 + dz;
                if lx < 0 || lx >= buf.sx as i32 || lz < 0 || lz >= buf.sz as i32 {
                    continue;
                }
                let (lx, lz) = (lx as usize, lz as usize);
                // Leaves fill air only; trunk and surface blocks stay put.
                if buf.get_local(lx, ly, lz).is_air() {
                    buf.set_local(lx, ly, lz, Block::Leaves);
                }
            }
        }
    }
}
