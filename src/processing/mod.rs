//! Resume scoring: normalization, skill matching, similarity, ATS heuristics

pub mod text_processor;
pub mod skill_matcher;
pub mod similarity;
pub mod ats_analyzer;
pub mod analyzer;
