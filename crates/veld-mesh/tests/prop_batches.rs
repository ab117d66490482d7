use proptest::prelude::*;
use veld_blocks::MaterialKey;
use veld_geom::{Euler, Vec3};
use veld_mesh::{BatchAllocator, FaceInstance};

fn instance(material: MaterialKey, i: usize) -> FaceInstance {
    FaceInstance {
        position: Vec3::new(i as f32, 0.0, 0.0),
        rotation: Euler::IDENTITY,
        material,
    }
}

proptest! {
    // N appends under one key always produce ceil(N / capacity) batches,
    // none over capacity, with insertion order preserved across the runs.
    #[test]
    fn split_counts_and_order(capacity in 1usize..64, n in 0usize..512) {
        let mut alloc = BatchAllocator::new(capacity);
        for i in 0..n {
            alloc.push(instance(MaterialKey::Stone, i));
        }
        let runs = alloc.batches_for(MaterialKey::Stone);
        prop_assert_eq!(runs.len(), n.div_ceil(capacity));
        prop_assert_eq!(alloc.total_instances(), n);

        let mut next = 0usize;
        for (ri, run) in runs.iter().enumerate() {
            prop_assert!(run.len() <= capacity);
            // every batch except the last is exactly full
            if ri + 1 < runs.len() {
                prop_assert_eq!(run.len(), capacity);
            }
            for inst in run.instances() {
                prop_assert_eq!(inst.position.x, next as f32);
                next += 1;
            }
        }
        prop_assert_eq!(next, n);
    }

    // Interleaving materials never mixes a batch
    #[test]
    fn interleaved_materials_stay_homogeneous(capacity in 1usize..16, n in 0usize..256) {
        let mut alloc = BatchAllocator::new(capacity);
        for i in 0..n {
            let material = if i % 2 == 0 { MaterialKey::Dirt } else { MaterialKey::Leaves };
            alloc.push(instance(material, i));
        }
        for batch in alloc.batches() {
            for inst in batch.instances() {
                prop_assert_eq!(inst.material, batch.material());
            }
        }
        let dirt: usize = alloc.batches_for(MaterialKey::Dirt).iter().map(|b| b.len()).sum();
        let leaves: usize = alloc.batches_for(MaterialKey::Leaves).iter().map(|b| b.len()).sum();
        prop_assert_eq!(dirt, n.div_ceil(2));
        prop_assert_eq!(leaves, n / 2);
    }
}
