use proptest::prelude::*;
use veld_blocks::Block;
use veld_chunk::ChunkBuf;
use veld_world::ChunkCoord;

fn dim() -> impl Strategy<Value = usize> {
    1usize..=8
}

fn small_i32() -> impl Strategy<Value = i32> {
    -1_000i32..=1_000
}

fn block_for(i: usize) -> Block {
    match i % 4 {
        0 => Block::Air,
        1 => Block::Stone,
        2 => Block::Dirt,
        _ => Block::Water,
    }
}

proptest! {
    // idx maps each (x,y,z) within bounds to a unique in-range index
    #[test]
    fn idx_is_unique_and_in_range(cx in small_i32(), cz in small_i32(), sx in dim(), sy in dim(), sz in dim()) {
        let expect = sx * sy * sz;
        let buf = ChunkBuf::filled(ChunkCoord::new(cx, cz), sx, sy, sz, Block::Air);

        let mut seen = vec![false; expect];
        for y in 0..sy { for z in 0..sz { for x in 0..sx {
            let i = buf.idx(x, y, z);
            prop_assert!(i < expect);
            prop_assert!(!seen[i]);
            seen[i] = true;
        }}}
        prop_assert!(seen.into_iter().all(|b| b));
    }

    // set_local followed by get_local round-trips every cell
    #[test]
    fn set_get_roundtrip(cx in small_i32(), cz in small_i32(), sx in dim(), sy in dim(), sz in dim()) {
        let mut buf = ChunkBuf::filled(ChunkCoord::new(cx, cz), sx, sy, sz, Block::Air);
        for y in 0..sy { for z in 0..sz { for x in 0..sx {
            buf.set_local(x, y, z, block_for(buf.idx(x, y, z)));
        }}}
        for y in 0..sy { for z in 0..sz { for x in 0..sx {
            prop_assert_eq!(buf.get_local(x, y, z), block_for(buf.idx(x, y, z)));
        }}}
    }

    // contains_world matches the world-space bounds and agrees with get_world
    #[test]
    fn contains_world_and_get_world_agree(cx in small_i32(), cz in small_i32(), sx in dim(), sy in dim(), sz in dim()) {
        let buf = ChunkBuf::filled(ChunkCoord::new(cx, cz), sx, sy, sz, Block::Stone);
        let x0 = cx * sx as i32;
        let z0 = cz * sz as i32;

        let candidates = [
            (x0, 0, z0),
            (x0 + sx as i32 - 1, sy as i32 - 1, z0 + sz as i32 - 1),
            (x0 - 1, 0, z0),
            (x0 + sx as i32, 0, z0),
            (x0, -1, z0),
            (x0, sy as i32, z0),
            (x0, 0, z0 - 1),
            (x0, 0, z0 + sz as i32),
        ];

        for (wx, wy, wz) in candidates {
            let inside = wy >= 0
                && wy < sy as i32
                && wx >= x0
                && wx < x0 + sx as i32
                && wz >= z0
                && wz < z0 + sz as i32;
            prop_assert_eq!(buf.contains_world(wx, wy, wz), inside);
            prop_assert_eq!(buf.get_world(wx, wy, wz).is_some(), inside);
        }
    }

    // from_blocks_local pads short vectors and truncates long ones
    #[test]
    fn from_blocks_local_normalizes_length(sx in dim(), sy in dim(), sz in dim(), extra in 0usize..16) {
        let expect = sx * sy * sz;
        let shorter = ChunkBuf::from_blocks_local(
            ChunkCoord::new(0, 0), sx, sy, sz,
            vec![Block::Stone; expect.saturating_sub(extra)],
        );
        prop_assert!(shorter.has_non_air() || expect <= extra);

        let longer = ChunkBuf::from_blocks_local(
            ChunkCoord::new(0, 0), sx, sy, sz,
            vec![Block::Stone; expect + extra],
        );
        for y in 0..sy { for z in 0..sz { for x in 0..sx {
            prop_assert_eq!(longer.get_local(x, y, z), Block::Stone);
        }}}
    }
}
