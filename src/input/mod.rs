//! Input processing module
//! Turns resume files into decoded text for the extraction pipeline

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use file_detector::FileType;
pub use manager::{InputManager, SourceDocument};
