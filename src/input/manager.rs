//! Input manager for resumes and job postings

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use crate::input::job::{parse_skill_list, JobPosting};
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Largest accepted input file
pub const MAX_INPUT_BYTES: u64 = 5 * 1024 * 1024;

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Extract plain text from a PDF, DOCX, text or Markdown file
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        let file_type = FileType::from_path(path);
        if !file_type.is_document() {
            return Err(ScreenerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            )));
        }

        Self::check_size(path).await?;

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Docx => {
                info!("Extracting text from DOCX: {}", path.display());
                DocxExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            _ => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
        };

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    /// Load a job posting file, or a description file plus a comma-separated skill list.
    /// Skills given on the command line replace those in a posting file.
    pub async fn load_job(&mut self, path: &Path, skills: Option<&str>) -> Result<JobPosting> {
        let override_skills = skills.map(parse_skill_list);

        if FileType::from_path(path).is_posting() {
            Self::check_size(path).await?;
            let mut posting = JobPosting::from_file(path).await?;
            if let Some(skills) = override_skills {
                posting.skills = skills;
            }
            return Ok(posting);
        }

        let description = self.extract_text(path).await?;
        let skills = override_skills.unwrap_or_else(|| {
            warn!("No required skills given for {}; skills match will be 0%", path.display());
            Vec::new()
        });

        Ok(JobPosting::new(description, skills))
    }

    async fn check_size(path: &Path) -> Result<()> {
        let metadata = tokio::fs::metadata(path).await.map_err(|_| {
            ScreenerError::InvalidInput(format!("File does not exist: {}", path.display()))
        })?;

        if metadata.len() > MAX_INPUT_BYTES {
            return Err(ScreenerError::InvalidInput(format!(
                "File exceeds {} bytes: {}",
                MAX_INPUT_BYTES,
                path.display()
            )));
        }

        Ok(())
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
