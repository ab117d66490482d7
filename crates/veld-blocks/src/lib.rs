//! Fixed block palette and material keys for the terrain pipeline and mesher.
#![forbid(unsafe_code)]

/// Number of numbered blossom textures available to the vegetation pass.
pub const BLOSSOM_VARIETIES: u8 = 7;

/// Plant-like blocks rendered as thin planes instead of cubes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flora {
    /// Numbered flower varieties, `1..=BLOSSOM_VARIETIES`.
    Blossom(u8),
    TallGrass,
    GlowBerries,
    SugarCane,
    LilyPad,
}

impl Flora {
    /// Lily pads render as a single horizontal plane; everything else is a
    /// crossed pair of vertical planes.
    #[inline]
    pub fn is_lily_pad(self) -> bool {
        matches!(self, Flora::LilyPad)
    }

    /// Sugar cane stacks stay centered on the block; loose flora gets a small
    /// lateral jitter so fields don't read as a grid.
    #[inline]
    pub fn jitters(self) -> bool {
        !matches!(self, Flora::SugarCane | Flora::LilyPad)
    }
}

/// One cell of a column. The palette is closed: terrain generation never
/// produces a block outside this enum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Block {
    #[default]
    Air,
    Stone,
    Dirt,
    Grass,
    Sand,
    Water,
    Ice,
    Log,
    Leaves,
    Flora(Flora),
}

impl Block {
    #[inline]
    pub fn is_air(self) -> bool {
        matches!(self, Block::Air)
    }

    #[inline]
    pub fn is_water(self) -> bool {
        matches!(self, Block::Water)
    }

    #[inline]
    pub fn is_flora(self) -> bool {
        matches!(self, Block::Flora(_))
    }

    /// Cube-rendered blocks: everything except air, water and flora.
    #[inline]
    pub fn is_solid(self) -> bool {
        !matches!(self, Block::Air | Block::Water | Block::Flora(_))
    }

    /// Whether this block hides an adjacent block's face. Water is
    /// deliberately non-occluding (see the mesher's water asymmetry).
    #[inline]
    pub fn occludes(self) -> bool {
        self.is_solid()
    }

    /// Material for one face of this block, or `None` for air.
    /// Grass is the only block with a distinct top texture.
    pub fn material_for(self, role: FaceRole) -> Option<MaterialKey> {
        Some(match self {
            Block::Air => return None,
            Block::Stone => MaterialKey::Stone,
            Block::Dirt => MaterialKey::Dirt,
            Block::Grass => match role {
                FaceRole::Top => MaterialKey::GrassTop,
                FaceRole::Bottom | FaceRole::Side => MaterialKey::GrassSide,
            },
            Block::Sand => MaterialKey::Sand,
            Block::Water => MaterialKey::Water,
            Block::Ice => MaterialKey::Ice,
            Block::Log => MaterialKey::Log,
            Block::Leaves => MaterialKey::Leaves,
            Block::Flora(f) => MaterialKey::Flora(f),
        })
    }
}

/// Classifies a face for material lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceRole {
    Top,
    Bottom,
    Side,
}

/// Identifier selecting which texture/shader a face instance is drawn with.
/// Batches are homogeneous per key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialKey {
    Stone,
    Dirt,
    GrassTop,
    GrassSide,
    Sand,
    Water,
    Ice,
    Log,
    Leaves,
    Flora(Flora),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grass_splits_top_and_side() {
        assert_eq!(
            Block::Grass.material_for(FaceRole::Top),
            Some(MaterialKey::GrassTop)
        );
        assert_eq!(
            Block::Grass.material_for(FaceRole::Side),
            Some(MaterialKey::GrassSide)
        );
        assert_eq!(
            Block::Grass.material_for(FaceRole::Bottom),
            Some(MaterialKey::GrassSide)
        );
    }

    #[test]
    fn air_has_no_material() {
        assert_eq!(Block::Air.material_for(FaceRole::Top), None);
    }

    #[test]
    fn occlusion_excludes_water_and_flora() {
        assert!(Block::Stone.occludes());
        assert!(Block::Ice.occludes());
        assert!(Block::Leaves.occludes());
        assert!(!Block::Water.occludes());
        assert!(!Block::Flora(Flora::TallGrass).occludes());
        assert!(!Block::Air.occludes());
    }

    #[test]
    fn flora_render_shape() {
        assert!(Flora::LilyPad.is_lily_pad());
        assert!(!Flora::SugarCane.is_lily_pad());
        assert!(Flora::TallGrass.jitters());
        assert!(Flora::Blossom(3).jitters());
        assert!(!Flora::SugarCane.jitters());
        assert!(!Flora::LilyPad.jitters());
    }
}
