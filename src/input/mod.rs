//! Input processing module
//! Handles file detection, text extraction and job posting loading

pub mod file_detector;
pub mod job;
pub mod manager;
pub mod text_extractor;

pub use job::JobPosting;
pub use manager::InputManager;
