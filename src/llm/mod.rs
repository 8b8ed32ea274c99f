//! External text generation for improvement suggestions

pub mod client;
pub mod prompts;
pub mod suggestions;
