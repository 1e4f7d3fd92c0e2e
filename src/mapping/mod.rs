//! Mapping thread driver and its collaborator seams.

mod frame;
mod matcher;
mod pipeline;

pub use frame::OdometryFrame;
pub use matcher::{PassthroughMatcher, ScanMatcher};
pub use pipeline::{MappingState, MappingThread, SharedMappingState};
