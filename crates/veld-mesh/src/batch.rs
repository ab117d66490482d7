use std::collections::HashMap;

use veld_blocks::MaterialKey;
use veld_geom::{Euler, Vec3};

/// One exposed quad of one block: the transform an instanced renderer needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceInstance {
    pub position: Vec3,
    pub rotation: Euler,
    pub material: MaterialKey,
}

/// Capacity-bounded run of face instances sharing one material — the unit of
/// GPU draw submission.
#[derive(Clone, Debug)]
pub struct Batch {
    material: MaterialKey,
    instances: Vec<FaceInstance>,
    dirty: bool,
}

impl Batch {
    fn with_capacity(material: MaterialKey, capacity: usize) -> Self {
        Self {
            material,
            instances: Vec::with_capacity(capacity),
            dirty: false,
        }
    }

    #[inline]
    pub fn material(&self) -> MaterialKey {
        self.material
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    #[inline]
    pub fn instances(&self) -> &[FaceInstance] {
        &self.instances
    }

    /// Set when instances were appended since the renderer last uploaded
    /// this batch.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The renderer acknowledges an upload.
    #[inline]
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

/// Packs face instances into fixed-capacity batches per material key,
/// splitting into additional batches on overflow. Appending never fails;
/// the batch count per key is unbounded.
pub struct BatchAllocator {
    capacity: usize,
    batches: HashMap<MaterialKey, Vec<Batch>>,
}

impl BatchAllocator {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "batch capacity must be positive");
        Self {
            capacity,
            batches: HashMap::new(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends to the last open batch for the instance's material, opening a
    /// new batch when none exists or the last one is full.
    pub fn push(&mut self, instance: FaceInstance) {
        let runs = self.batches.entry(instance.material).or_default();
        let needs_new = runs
            .last()
            .is_none_or(|b| b.instances.len() >= self.capacity);
        if needs_new {
            runs.push(Batch::with_capacity(instance.material, self.capacity));
        }
        let open = runs.last_mut().expect("an open batch was just ensured");
        open.instances.push(instance);
        open.dirty = true;
    }

    /// All batches for one material, oldest first.
    pub fn batches_for(&self, material: MaterialKey) -> &[Batch] {
        self.batches.get(&material).map_or(&[], Vec::as_slice)
    }

    pub fn by_material(&self) -> impl Iterator<Item = (MaterialKey, &[Batch])> {
        self.batches.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn batches(&self) -> impl Iterator<Item = &Batch> {
        self.batches.values().flatten()
    }

    pub fn batch_count(&self) -> usize {
        self.batches.values().map(Vec::len).sum()
    }

    pub fn total_instances(&self) -> usize {
        self.batches().map(Batch::len).sum()
    }

    /// Clears every dirty flag once the renderer has re-uploaded.
    pub fn mark_all_clean(&mut self) {
        for batch in self.batches.values_mut().flatten() {
            batch.mark_clean();
        }
    }
}
