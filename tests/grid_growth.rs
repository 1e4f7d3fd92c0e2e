//! Grid Growth and Addressability Tests
//!
//! Exercises the public grid stack end to end:
//! - Symmetric addressability around the origin up to the hard bound
//! - Content preservation across arbitrary growth sequences
//! - Deterministic iteration for identical write histories
//!
//! Run with: `cargo test --test grid_growth`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vyoma_map::core::{Point3, VoxelCoord};
use vyoma_map::grid::VoxelMap;

// ============================================================================
// Addressability
// ============================================================================

#[test]
fn test_reads_across_the_addressable_range_stay_default() {
    let map: VoxelMap<u32> = VoxelMap::new(1.0);

    for k in [0, 1, 63, 64, 1000, 8191, 8192] {
        assert_eq!(map.get(VoxelCoord::splat(k)), None);
        assert_eq!(map.get(VoxelCoord::splat(-k)), None);
    }
    // Reads never allocate or grow.
    assert_eq!(map.iter().count(), 0);
}

#[test]
fn test_writes_are_recoverable_across_the_addressable_range() {
    let mut map: VoxelMap<u32> = VoxelMap::new(1.0);

    let coords = [
        VoxelCoord::splat(0),
        VoxelCoord::splat(63),
        VoxelCoord::splat(-64),
        VoxelCoord::splat(1000),
        VoxelCoord::splat(-1000),
        VoxelCoord::splat(8191),
        VoxelCoord::splat(-8192),
    ];
    for (i, coord) in coords.into_iter().enumerate() {
        *map.get_mut(coord) = i as u32 + 1;
    }

    for (i, coord) in coords.into_iter().enumerate() {
        assert_eq!(map.get(coord), Some(&(i as u32 + 1)), "lost {:?}", coord);
    }
}

#[test]
#[should_panic(expected = "cannot grow")]
fn test_write_beyond_the_hard_bound_is_fatal() {
    let mut map: VoxelMap<u32> = VoxelMap::new(1.0);
    *map.get_mut(VoxelCoord::new(8192, 0, 0)) = 1;
}

// ============================================================================
// Growth
// ============================================================================

#[test]
fn test_random_write_history_survives_growth() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut map: VoxelMap<u32> = VoxelMap::new(1.0);
    let mut written: Vec<(VoxelCoord, u32)> = Vec::new();

    // Interleave near-origin writes with far jumps that force doubling.
    for i in 0..500 {
        let range = if i % 50 == 49 { 4000 } else { 60 };
        let coord = VoxelCoord::new(
            rng.gen_range(-range..=range),
            rng.gen_range(-range..=range),
            rng.gen_range(-range..=range),
        );
        let value = i as u32 + 1;
        *map.get_mut(coord) = value;
        written.retain(|(c, _)| *c != coord);
        written.push((coord, value));
    }

    for (coord, value) in &written {
        assert_eq!(map.get(*coord), Some(value), "lost {:?}", coord);
    }

    // Iteration yields exactly the written cells, once each.
    let mut iterated: Vec<(VoxelCoord, u32)> = map.iter().map(|(c, v)| (c, *v)).collect();
    let mut expected = written.clone();
    iterated.sort_by_key(|(c, _)| (c.z, c.y, c.x));
    expected.sort_by_key(|(c, _)| (c.z, c.y, c.x));
    assert_eq!(iterated, expected);
}

// ============================================================================
// Iteration determinism
// ============================================================================

#[test]
fn test_identical_histories_iterate_identically() {
    let build = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut map: VoxelMap<u32> = VoxelMap::new(0.5);
        for i in 0..200 {
            let p = Point3::new(
                rng.gen_range(-30.0..30.0),
                rng.gen_range(-30.0..30.0),
                rng.gen_range(-30.0..30.0),
            );
            let index = map.cell_index(p);
            *map.get_mut(index) = i + 1;
        }
        map
    };

    let a: Vec<(VoxelCoord, u32)> = build(11).iter().map(|(c, v)| (c, *v)).collect();
    let b: Vec<(VoxelCoord, u32)> = build(11).iter().map(|(c, v)| (c, *v)).collect();

    assert!(!a.is_empty());
    assert_eq!(a, b);
}
