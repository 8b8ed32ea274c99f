//! Report formatting

pub mod formatter;
pub mod report;
