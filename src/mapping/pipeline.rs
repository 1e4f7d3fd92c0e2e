//! Mapping thread: consumes odometry frames and maintains the voxel maps.
//!
//! One producer (the odometry front end) hands frames to one consumer (the
//! mapping thread) over a bounded channel. The consumer keeps two
//! [`CloudMap`]s, one for corner features and one for surf features,
//! retrieves their surround clouds for scan matching, and folds the
//! refined scan back into both maps.
//!
//! In real-time mode the consumer drains any backlog and processes only
//! the newest frame, logging a warning for each frame it skips.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::frame::OdometryFrame;
use super::matcher::ScanMatcher;
use crate::config::MappingConfig;
use crate::core::Rigid3;
use crate::error::VyomaError;
use crate::map::{CloudFilter, CloudMap, VoxelGridFilter};

/// Poll interval for the shutdown flag while the queue is idle.
const RECV_TIMEOUT: Duration = Duration::from_millis(50);

/// Snapshot of the mapping thread's progress.
#[derive(Clone, Debug, Default)]
pub struct MappingState {
    /// Latest refined scan-to-map pose.
    pub pose: Rigid3,
    /// Frames folded into the map so far.
    pub frames_processed: u64,
    /// Frames skipped to keep up in real-time mode.
    pub frames_dropped: u64,
    /// Occupied voxels in the corner map.
    pub corner_cells: usize,
    /// Occupied voxels in the surf map.
    pub surf_cells: usize,
}

/// Shared handle to the mapping thread's state.
pub type SharedMappingState = Arc<RwLock<MappingState>>;

/// Handle to a running mapping thread.
///
/// Dropping the handle without calling
/// [`shutdown`](MappingThread::shutdown) detaches the thread; it exits
/// once the channel disconnects.
pub struct MappingThread {
    frame_tx: Sender<OdometryFrame>,
    state: SharedMappingState,
    running: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl MappingThread {
    /// Spawn the mapping thread.
    pub fn spawn<M>(config: MappingConfig, matcher: M) -> Result<MappingThread, VyomaError>
    where
        M: ScanMatcher + Send + 'static,
    {
        config.validate()?;
        let (frame_tx, frame_rx) = bounded(config.queue_capacity);
        let state: SharedMappingState = Arc::new(RwLock::new(MappingState::default()));
        let running = Arc::new(AtomicBool::new(true));

        let handle = thread::Builder::new()
            .name("mapping".into())
            .spawn({
                let state = Arc::clone(&state);
                let running = Arc::clone(&running);
                move || run_loop(config, matcher, frame_rx, state, running)
            })
            .expect("failed to spawn mapping thread");

        Ok(MappingThread {
            frame_tx,
            state,
            running,
            handle,
        })
    }

    /// Hand an odometry frame to the mapping thread.
    ///
    /// Blocks while the handoff queue is full; fails only if the thread
    /// has already exited.
    pub fn submit(&self, frame: OdometryFrame) -> Result<(), VyomaError> {
        self.frame_tx
            .send(frame)
            .map_err(|_| VyomaError::PipelineStopped)
    }

    /// Snapshot of the thread's current state.
    pub fn state(&self) -> MappingState {
        self.state.read().clone()
    }

    /// Shared handle for observers that want to poll without going through
    /// this handle.
    pub fn state_handle(&self) -> SharedMappingState {
        Arc::clone(&self.state)
    }

    /// Stop the thread after it drains the frames already queued, and
    /// return the final state.
    pub fn shutdown(self) -> MappingState {
        let MappingThread {
            frame_tx,
            state,
            running,
            handle,
        } = self;
        running.store(false, Ordering::SeqCst);
        drop(frame_tx);
        if handle.join().is_err() {
            log::error!("mapping thread panicked");
        }
        let snapshot = state.read().clone();
        snapshot
    }
}

fn run_loop<M: ScanMatcher>(
    config: MappingConfig,
    matcher: M,
    frame_rx: Receiver<OdometryFrame>,
    state: SharedMappingState,
    running: Arc<AtomicBool>,
) {
    log::info!(
        "mapping thread starting: grid resolution {} m, corner/surf leaves {} / {} m",
        config.grid_resolution,
        config.corner_leaf_size,
        config.surf_leaf_size
    );

    let mut corner_map = CloudMap::new(config.grid_resolution);
    let mut surf_map = CloudMap::new(config.grid_resolution);
    let corner_filter = VoxelGridFilter::new(config.corner_leaf_size);
    let surf_filter = VoxelGridFilter::new(config.surf_leaf_size);

    // Correction from the odometry frame to the map frame; refined by
    // every matched scan.
    let mut pose_odom_to_map = Rigid3::identity();

    loop {
        let mut frame = match frame_rx.recv_timeout(RECV_TIMEOUT) {
            Ok(frame) => frame,
            Err(RecvTimeoutError::Timeout) => {
                if running.load(Ordering::SeqCst) {
                    continue;
                }
                break;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        };

        if config.real_time {
            let mut dropped = 0u64;
            while let Ok(newer) = frame_rx.try_recv() {
                dropped += 1;
                frame = newer;
            }
            if dropped > 0 {
                log::warn!("dropped {} lidar frame(s) in mapping to keep up", dropped);
                state.write().frames_dropped += dropped;
            }
        }

        let started = Instant::now();
        let timestamp_us = frame.timestamp_us;

        // Project the odometry estimate into the map frame.
        let mut pose = pose_odom_to_map.compose(&frame.odom_pose);

        let corner_from_map = corner_map.surrounded_cloud(&frame.cloud_corner, &pose);
        let surf_from_map = surf_map.surrounded_cloud(&frame.cloud_surf, &pose);

        let mut corner_stack = frame.cloud_corner;
        corner_filter.apply(&mut corner_stack);
        let mut surf_stack = frame.cloud_surf;
        surf_filter.apply(&mut surf_stack);

        if corner_from_map.len() > config.min_corner_points
            && surf_from_map.len() > config.min_surf_points
        {
            matcher.refine(
                &corner_from_map,
                &surf_from_map,
                &corner_stack,
                &surf_stack,
                &mut pose,
            );
        } else {
            log::warn!(
                "map corner and surf points not enough for matching (corner={}, surf={})",
                corner_from_map.len(),
                surf_from_map.len()
            );
        }

        // Fold the refinement back into the odometry-to-map correction.
        pose_odom_to_map = pose.compose(&frame.odom_pose.inverse());

        corner_map.insert_scan(&corner_stack.transform(&pose.to_f32()), &corner_filter);
        surf_map.insert_scan(&surf_stack.transform(&pose.to_f32()), &surf_filter);

        {
            let mut state = state.write();
            state.pose = pose;
            state.frames_processed += 1;
            state.corner_cells = corner_map.occupied_cells();
            state.surf_cells = surf_map.occupied_cells();
        }

        log::debug!(
            "frame {}: mapped in {:.1} ms (corner cells={}, surf cells={})",
            timestamp_us,
            started.elapsed().as_secs_f64() * 1e3,
            corner_map.occupied_cells(),
            surf_map.occupied_cells()
        );
    }

    log::info!(
        "mapping thread finished after {} frames",
        state.read().frames_processed
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PointCloud3, Vec3d};
    use crate::mapping::matcher::PassthroughMatcher;

    fn feature_frame(timestamp_us: u64, offset: f32) -> OdometryFrame {
        let mut corner = PointCloud3::new();
        let mut surf = PointCloud3::new();
        for i in 0..20 {
            let t = i as f32 * 0.35;
            corner.push(offset + t, 0.0, 1.0);
            surf.push(offset + t, 2.0, 0.0);
        }
        OdometryFrame::new(
            timestamp_us,
            Rigid3::from_translation(Vec3d::new(offset as f64, 0.0, 0.0)),
            corner,
            surf,
        )
    }

    #[test]
    fn test_pipeline_processes_all_frames_offline() {
        let config = MappingConfig {
            real_time: false,
            ..Default::default()
        };
        let pipeline = MappingThread::spawn(config, PassthroughMatcher).unwrap();

        for i in 0..3 {
            pipeline
                .submit(feature_frame(1_000 * i as u64, i as f32 * 0.1))
                .unwrap();
        }
        let state = pipeline.shutdown();

        assert_eq!(state.frames_processed, 3);
        assert_eq!(state.frames_dropped, 0);
        assert!(state.corner_cells > 0);
        assert!(state.surf_cells > 0);
    }

    #[test]
    fn test_pipeline_pose_follows_odometry_with_passthrough_matcher() {
        let config = MappingConfig {
            real_time: false,
            ..Default::default()
        };
        let pipeline = MappingThread::spawn(config, PassthroughMatcher).unwrap();

        pipeline.submit(feature_frame(0, 0.0)).unwrap();
        pipeline.submit(feature_frame(1_000, 0.5)).unwrap();
        let state = pipeline.shutdown();

        // With a passthrough matcher the map pose equals the odometry pose.
        assert!((state.pose.translation.x - 0.5).abs() < 1e-9);
        assert_eq!(state.frames_processed, 2);
    }

    #[test]
    fn test_submit_after_shutdown_fails() {
        let pipeline =
            MappingThread::spawn(MappingConfig::default(), PassthroughMatcher).unwrap();
        let tx = pipeline.frame_tx.clone();
        pipeline.shutdown();

        assert!(tx.send(OdometryFrame::default()).is_err());
    }

    #[test]
    fn test_invalid_config_is_rejected_at_spawn() {
        let config = MappingConfig {
            grid_resolution: -1.0,
            ..Default::default()
        };
        assert!(MappingThread::spawn(config, PassthroughMatcher).is_err());
    }
}
