//! Job postings: a description plus the ordered list of required skills

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use crate::processing::analyzer::JobRequirement;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl JobPosting {
    pub fn new(description: String, skills: Vec<String>) -> Self {
        Self {
            title: None,
            description,
            skills,
        }
    }

    /// Parse a `.toml` or `.json` posting
    pub fn parse(content: &str, file_type: FileType) -> Result<Self> {
        let posting: JobPosting = match file_type {
            FileType::Toml => toml::from_str(content).map_err(|e| {
                ScreenerError::InvalidInput(format!("Invalid job posting: {}", e))
            })?,
            FileType::Json => serde_json::from_str(content)?,
            other => {
                return Err(ScreenerError::UnsupportedFormat(format!(
                    "{:?} is not a job posting format",
                    other
                )))
            }
        };

        Ok(posting.with_clean_skills())
    }

    pub async fn from_file(path: &Path) -> Result<Self> {
        let file_type = FileType::from_path(path);
        if !file_type.is_posting() {
            return Err(ScreenerError::UnsupportedFormat(format!(
                "Job posting must be .toml or .json: {}",
                path.display()
            )));
        }

        let content = tokio::fs::read_to_string(path).await?;
        Self::parse(&content, file_type)
    }

    fn with_clean_skills(mut self) -> Self {
        self.skills = self
            .skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        self
    }

    pub fn requirement(&self) -> JobRequirement {
        JobRequirement {
            description: self.description.clone(),
            required_skills: self.skills.clone(),
        }
    }
}

/// Split a comma-separated skill list, keeping order and duplicates
pub fn parse_skill_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
