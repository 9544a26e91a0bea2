use cubewalk_blocks::VoxelType;
use cubewalk_chunk::{TerrainParams, TerrainStrategy, VoxelGrid};
use cubewalk_geom::IVec3;
use proptest::prelude::*;

fn dim() -> impl Strategy<Value = usize> {
    1usize..=8
}

fn voxel_type() -> impl Strategy<Value = VoxelType> {
    (0u8..VoxelType::ALL.len() as u8).prop_map(|v| VoxelType::from_u8(v).unwrap())
}

proptest! {
    // idx maps each (x,y,z) within bounds to unique in-range indices
    #[test]
    fn idx_is_unique_and_in_range(sx in dim(), sy in dim(), sz in dim()) {
        let grid = VoxelGrid::new(sx, sy, sz);
        let expect = sx * sy * sz;
        prop_assert_eq!(grid.len(), expect);

        let mut seen = vec![false; expect];
        for z in 0..sz { for y in 0..sy { for x in 0..sx {
            let i = grid.idx(x, y, z);
            prop_assert!(i < expect);
            prop_assert!(!seen[i]);
            seen[i] = true;
        }}}
        prop_assert!(seen.into_iter().all(|b| b));
    }

    // x varies fastest, then y, then z
    #[test]
    fn idx_layout_is_x_then_y_then_z(sx in dim(), sy in dim(), sz in dim()) {
        let grid = VoxelGrid::new(sx, sy, sz);
        for z in 0..sz { for y in 0..sy { for x in 0..sx {
            prop_assert_eq!(grid.idx(x, y, z), x + y * sx + z * sx * sy);
        }}}
    }

    // set followed by get returns the stored value, Air included
    #[test]
    fn set_get_roundtrip(sx in dim(), sy in dim(), sz in dim(), t in voxel_type(), seed in any::<u64>()) {
        let mut grid = VoxelGrid::new(sx, sy, sz);
        let x = (seed % sx as u64) as i32;
        let y = ((seed >> 8) % sy as u64) as i32;
        let z = ((seed >> 16) % sz as u64) as i32;
        grid.unmark_changed();
        grid.set(x, y, z, t);
        prop_assert_eq!(grid.get(x, y, z), t);
        prop_assert!(grid.changed());
    }

    // Out-of-range reads are Air and out-of-range writes change nothing
    #[test]
    fn out_of_range_is_air_and_noop(sx in dim(), sy in dim(), sz in dim(),
                                    dx in 0i32..4, dy in 0i32..4, dz in 0i32..4, t in voxel_type()) {
        let mut grid = VoxelGrid::from_voxels(sx, sy, sz, vec![VoxelType::Stone; sx * sy * sz]);
        grid.unmark_changed();
        let rev = grid.revision();
        let outside = [
            (-1 - dx, 0, 0),
            (0, -1 - dy, 0),
            (0, 0, -1 - dz),
            (sx as i32 + dx, 0, 0),
            (0, sy as i32 + dy, 0),
            (0, 0, sz as i32 + dz),
        ];
        for (x, y, z) in outside {
            prop_assert_eq!(grid.get(x, y, z), VoxelType::Air);
            grid.set(x, y, z, t);
        }
        prop_assert!(!grid.changed());
        prop_assert_eq!(grid.revision(), rev);
        prop_assert!(grid.voxels().iter().all(|v| *v == VoxelType::Stone));
    }

    // from_voxels resizes or preserves to exact length
    #[test]
    fn from_voxels_resizes(sx in dim(), sy in dim(), sz in dim()) {
        let expect = sx * sy * sz;
        let ok = VoxelGrid::from_voxels(sx, sy, sz, vec![VoxelType::Dirt; expect]);
        prop_assert_eq!(ok.len(), expect);
        let short = VoxelGrid::from_voxels(sx, sy, sz, vec![VoxelType::Dirt; expect.saturating_sub(1)]);
        prop_assert_eq!(short.len(), expect);
        prop_assert_eq!(short.get_local(sx - 1, sy - 1, sz - 1), VoxelType::Air);
    }

    // Terrain generation is a pure function of seed, origin and strategy
    #[test]
    fn terrain_is_deterministic(seed in any::<u64>(), ox in -4i32..4, oz in -4i32..4) {
        let origin = IVec3::new(ox * 8, 0, oz * 8);
        for strategy in [TerrainStrategy::Random, TerrainStrategy::default()] {
            let mut a = VoxelGrid::new(8, 8, 8);
            let mut b = VoxelGrid::new(8, 8, 8);
            a.generate_terrain(origin, seed, &strategy);
            b.generate_terrain(origin, seed, &strategy);
            prop_assert_eq!(a.voxels(), b.voxels());
        }
    }
}

#[test]
fn acknowledge_only_clears_matching_revision() {
    let mut grid = VoxelGrid::new(4, 4, 4);
    let seen = grid.revision();
    grid.set(1, 1, 1, VoxelType::Stone);
    assert!(!grid.acknowledge(seen));
    assert!(grid.changed());

    let seen = grid.revision();
    assert!(grid.acknowledge(seen));
    assert!(!grid.changed());
}

#[test]
fn layered_terrain_has_surface_on_top_of_every_column() {
    let params = TerrainParams {
        base_height: 8,
        amplitude: 3.0,
        ..TerrainParams::default()
    };
    let mut grid = VoxelGrid::new(16, 16, 16);
    grid.generate_terrain(IVec3::ZERO, 42, &TerrainStrategy::Layered(params));
    for z in 0..16 {
        for x in 0..16 {
            let top = (0..16)
                .rev()
                .find(|&y| grid.get(x, y, z).is_solid())
                .expect("column has ground");
            assert_eq!(grid.get(x, top, z), VoxelType::Grass);
            for y in 0..top {
                let v = grid.get(x, y, z);
                assert!(VoxelType::UNDERGROUND.contains(&v), "unexpected {v:?} at {x},{y},{z}");
            }
        }
    }
}

#[test]
fn flat_terrain_layers() {
    let mut grid = VoxelGrid::new(4, 8, 4);
    grid.generate_terrain(IVec3::ZERO, 0, &TerrainStrategy::Flat { thickness: 3 });
    assert_eq!(grid.get(2, 0, 2), VoxelType::Dirt);
    assert_eq!(grid.get(2, 1, 2), VoxelType::Dirt);
    assert_eq!(grid.get(2, 2, 2), VoxelType::Grass);
    assert_eq!(grid.get(2, 3, 2), VoxelType::Air);
    assert!(grid.changed());
}
