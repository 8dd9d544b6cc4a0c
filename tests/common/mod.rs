mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from roofscan for tests
pub use roofscan::{
    BuildingDetection, BuildingDetector, Contour, DetectError, DetectionMode, DetectorParams,
    OrientedRect,
};
