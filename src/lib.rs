pub mod detection;
pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod render;

pub use models::{BuildingDetection, Contour, OrientedRect};
pub use detection::{BuildingDetector, DetectionMode, DetectorParams};
pub use error::DetectError;
pub use io::load_image;
pub use pipeline::{
    Pipeline, PipelineData, PipelineStep, PipelineContext,
    BoundingBox, MetadataValue, DebugConfig
};

#[cfg(feature = "gui")]
pub mod viewer;
