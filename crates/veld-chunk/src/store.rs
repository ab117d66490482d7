use hashbrown::HashMap;
use veld_world::ChunkCoord;

use crate::ChunkBuf;

/// Sparse map from chunk coordinate to its generated chunk. Entries are
/// write-once and immutable afterwards; an absent coordinate is a valid,
/// queryable state meaning "not yet generated".
#[derive(Default)]
pub struct ChunkStore {
    chunks: HashMap<ChunkCoord, ChunkBuf>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, coord: ChunkCoord) -> Option<&ChunkBuf> {
        self.chunks.get(&coord)
    }

    /// Publishes a finished chunk. The first write for a coordinate wins;
    /// re-publishing is a pipeline bug and is ignored in release builds.
    pub fn insert(&mut self, buf: ChunkBuf) {
        debug_assert!(
            !self.chunks.contains_key(&buf.coord),
            "chunk {:?} published twice",
            buf.coord
        );
        self.chunks.entry(buf.coord).or_insert(buf);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChunkCoord, &ChunkBuf)> {
        self.chunks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veld_blocks::Block;

    #[test]
    fn absent_coordinate_reads_as_none() {
        let store = ChunkStore::new();
        assert!(store.get(ChunkCoord::new(0, 0)).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn first_write_wins() {
        let mut store = ChunkStore::new();
        let coord = ChunkCoord::new(1, -1);
        let mut first = ChunkBuf::filled(coord, 2, 2, 2, Block::Air);
        first.set_local(0, 0, 0, Block::Stone);
        store.insert(first);

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(coord).and_then(|c| c.get_world(2, 0, -2)),
            Some(Block::Stone)
        );
    }
}
