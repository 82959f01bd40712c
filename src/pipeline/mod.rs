//! # Clip Pipeline
//!
//! Everything between the video source and the extractor: selecting which
//! videos to process, picking a stream candidate, building extraction jobs,
//! and driving the batch with per-item failure isolation.

pub mod driver;
pub mod job;
pub mod quality;
pub mod selector;

pub use driver::{ClipPipeline, RunReport};
pub use job::build_job;
pub use quality::QualityPolicy;
pub use selector::{select, ProcessingQueue};
