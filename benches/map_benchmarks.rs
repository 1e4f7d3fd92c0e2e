//! Cloud Map Benchmarks
//!
//! Benchmarks for the hot paths of the mapping loop:
//! - Scan insertion with in-place voxel downsampling
//! - Surround-cloud retrieval
//! - Standalone voxel-grid filtering
//!
//! Run with: `cargo bench`
//! View HTML reports in: `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::f32::consts::TAU;
use vyoma_map::core::{PointCloud3, Rigid3};
use vyoma_map::map::{CloudFilter, CloudMap, VoxelGridFilter};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Create a synthetic lidar sweep: rings of points around the origin with
/// radius modulated to mimic room structure, spread over 16 beam heights.
fn create_scan_cloud(n_points: usize) -> PointCloud3 {
    let mut cloud = PointCloud3::with_capacity(n_points);
    for i in 0..n_points {
        let angle = (i as f32 / n_points as f32) * TAU * 16.0;
        let ring = (i % 16) as f32 - 8.0;
        let radius = 18.0 + 5.0 * (3.0 * angle).sin();
        cloud.push(
            radius * angle.cos(),
            radius * angle.sin(),
            ring * 0.4 + radius * 0.02,
        );
    }
    cloud
}

fn populated_map(scan: &PointCloud3, resolution: f32, leaf: f32) -> CloudMap {
    let mut map = CloudMap::new(resolution);
    map.insert_scan(scan, &VoxelGridFilter::new(leaf));
    map
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_insert_scan(c: &mut Criterion) {
    let scan = create_scan_cloud(5_000);
    let filter = VoxelGridFilter::new(0.4);

    c.bench_function("insert_scan_5k", |b| {
        b.iter(|| {
            let mut map = CloudMap::new(3.0);
            map.insert_scan(black_box(&scan), &filter);
            map.occupied_cells()
        })
    });
}

fn bench_insert_into_populated_map(c: &mut Criterion) {
    let scan = create_scan_cloud(5_000);
    let filter = VoxelGridFilter::new(0.4);

    c.bench_function("insert_scan_5k_warm", |b| {
        b.iter_with_setup(
            || populated_map(&scan, 3.0, 0.4),
            |mut map| {
                map.insert_scan(black_box(&scan), &filter);
                map
            },
        )
    });
}

fn bench_surrounded_cloud(c: &mut Criterion) {
    let scan = create_scan_cloud(5_000);
    let map = populated_map(&scan, 3.0, 0.4);
    let query = create_scan_cloud(2_000);
    let pose = Rigid3::identity();

    c.bench_function("surrounded_cloud_2k", |b| {
        b.iter(|| map.surrounded_cloud(black_box(&query), &pose).len())
    });
}

fn bench_voxel_filter(c: &mut Criterion) {
    let scan = create_scan_cloud(10_000);
    let filter = VoxelGridFilter::new(0.2);

    c.bench_function("voxel_filter_10k", |b| {
        b.iter_with_setup(
            || scan.clone(),
            |mut cloud| {
                filter.apply(&mut cloud);
                cloud.len()
            },
        )
    });
}

criterion_group!(
    benches,
    bench_insert_scan,
    bench_insert_into_populated_map,
    bench_surrounded_cloud,
    bench_voxel_filter
);
criterion_main!(benches);
