//! Resume screener library
//!
//! Scores a plain-text resume against a job posting: weighted skill and
//! TF-IDF similarity match, ATS friendliness heuristics, and up to five
//! improvement suggestions.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod llm;
pub mod output;

pub use error::{Result, ScreenerError};
pub use config::Config;
pub use processing::analyzer::{analyze, AnalysisEngine, AnalysisResult, AtsReport, SkillMatchResult};
