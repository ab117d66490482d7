use veld_chunk::{ChunkStore, ensure_chunk};
use veld_mesh::{BatchAllocator, mesh_chunk};
use veld_world::{ChunkCoord, World};

/// Result of one full world build: the immutable chunk grid and the face
/// batches a renderer would upload.
pub struct WorldBuild {
    pub store: ChunkStore,
    pub batches: BatchAllocator,
}

/// Runs the full generation + meshing sweep over the configured chunk
/// rectangle, centered on the origin. Generation completes for every chunk
/// before meshing starts, so the mesher always sees finished neighbors
/// inside the world bounds.
pub fn build_world(world: &World) -> WorldBuild {
    let n = world.world_size_chunks() as i32;
    let lo = -(n / 2);
    let hi = lo + n;

    let mut store = ChunkStore::new();
    for cx in lo..hi {
        for cz in lo..hi {
            ensure_chunk(world, &mut store, ChunkCoord::new(cx, cz));
        }
    }
    log::info!("generated {} chunks ({n}x{n})", store.len());

    let mut batches = BatchAllocator::new(world.config().batching.capacity);
    for cx in lo..hi {
        for cz in lo..hi {
            let coord = ChunkCoord::new(cx, cz);
            if let Some(buf) = store.get(coord) {
                let mut rng = world.mesh_rng(coord);
                mesh_chunk(buf, &store, world, &mut rng, &mut batches);
            }
        }
    }
    log::info!(
        "meshed {} face instances into {} batches",
        batches.total_instances(),
        batches.batch_count(),
    );

    WorldBuild { store, batches }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veld_world::WorldConfig;

    fn small_world() -> World {
        let mut cfg = WorldConfig::default();
        cfg.size.world_size = 2;
        World::new(cfg, 1337).expect("valid test config")
    }

    #[test]
    fn sweep_covers_the_configured_rectangle() {
        let w = small_world();
        let out = build_world(&w);
        assert_eq!(out.store.len(), 4);
        for cx in -1..1 {
            for cz in -1..1 {
                assert!(out.store.get(ChunkCoord::new(cx, cz)).is_some());
            }
        }
        assert!(out.batches.total_instances() > 0);
    }

    #[test]
    fn no_batch_exceeds_the_configured_capacity() {
        let w = small_world();
        let out = build_world(&w);
        let cap = w.config().batching.capacity;
        for batch in out.batches.batches() {
            assert!(batch.len() <= cap);
        }
    }

    #[test]
    fn full_build_is_deterministic() {
        let w = small_world();
        let a = build_world(&w);
        let b = build_world(&w);
        assert_eq!(a.batches.total_instances(), b.batches.total_instances());
        assert_eq!(a.batches.batch_count(), b.batches.batch_count());
        for (material, runs) in a.batches.by_material() {
            let other = b.batches.batches_for(material);
            assert_eq!(runs.len(), other.len(), "{material:?}");
            for (x, y) in runs.iter().zip(other) {
                assert_eq!(x.instances(), y.instances(), "{material:?}");
            }
        }
    }
}
