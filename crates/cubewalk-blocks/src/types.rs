use serde::{Deserialize, Serialize};

/// The closed set of voxel materials. `Air` is the empty sentinel returned for
/// every out-of-bounds query.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoxelType {
    #[default]
    Air = 0,
    Grass = 1,
    Dirt = 2,
    Stone = 3,
    Sand = 4,
    Planks = 5,
}

impl VoxelType {
    pub const ALL: [VoxelType; 6] = [
        VoxelType::Air,
        VoxelType::Grass,
        VoxelType::Dirt,
        VoxelType::Stone,
        VoxelType::Sand,
        VoxelType::Planks,
    ];

    /// Every non-Air type.
    pub const SOLIDS: [VoxelType; 5] = [
        VoxelType::Grass,
        VoxelType::Dirt,
        VoxelType::Stone,
        VoxelType::Sand,
        VoxelType::Planks,
    ];

    /// Materials used below the surface layer by layered terrain.
    pub const UNDERGROUND: [VoxelType; 3] = [VoxelType::Dirt, VoxelType::Stone, VoxelType::Sand];

    #[inline]
    pub const fn is_air(self) -> bool {
        matches!(self, VoxelType::Air)
    }

    #[inline]
    pub const fn is_solid(self) -> bool {
        !self.is_air()
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn from_u8(v: u8) -> Option<VoxelType> {
        match v {
            0 => Some(VoxelType::Air),
            1 => Some(VoxelType::Grass),
            2 => Some(VoxelType::Dirt),
            3 => Some(VoxelType::Stone),
            4 => Some(VoxelType::Sand),
            5 => Some(VoxelType::Planks),
            _ => None,
        }
    }

    /// Slot of this type's cube-net block in the atlas sheet (one slot per type, in
    /// declaration order).
    #[inline]
    pub const fn net_slot(self) -> u32 {
        self as u32
    }

    pub const fn name(self) -> &'static str {
        match self {
            VoxelType::Air => "air",
            VoxelType::Grass => "grass",
            VoxelType::Dirt => "dirt",
            VoxelType::Stone => "stone",
            VoxelType::Sand => "sand",
            VoxelType::Planks => "planks",
        }
    }

    pub fn from_name(name: &str) -> Option<VoxelType> {
        VoxelType::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl std::fmt::Display for VoxelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u8_roundtrip_covers_all() {
        for t in VoxelType::ALL {
            assert_eq!(VoxelType::from_u8(t.as_u8()), Some(t));
            assert_eq!(VoxelType::from_name(t.name()), Some(t));
        }
        assert_eq!(VoxelType::from_u8(VoxelType::ALL.len() as u8), None);
    }

    #[test]
    fn only_air_is_empty() {
        assert!(VoxelType::Air.is_air());
        assert!(VoxelType::SOLIDS.iter().all(|t| t.is_solid()));
        assert_eq!(VoxelType::default(), VoxelType::Air);
    }
}
