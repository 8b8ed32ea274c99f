//! File type detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
    Markdown,
    /// Structured job posting
    Toml,
    /// Structured job posting
    Json,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            "toml" => FileType::Toml,
            "json" => FileType::Json,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(FileType::Unknown, Self::from_extension)
    }

    /// Whether free text can be extracted from this type
    pub fn is_document(self) -> bool {
        matches!(
            self,
            FileType::Pdf | FileType::Docx | FileType::Text | FileType::Markdown
        )
    }

    pub fn is_posting(self) -> bool {
        matches!(self, FileType::Toml | FileType::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection() {
        assert_eq!(FileType::from_path(Path::new("cv.PDF")), FileType::Pdf);
        assert_eq!(FileType::from_path(Path::new("cv.markdown")), FileType::Markdown);
        assert_eq!(FileType::from_path(Path::new("job.json")), FileType::Json);
        assert_eq!(FileType::from_path(Path::new("cv.docx")), FileType::Docx);
        assert_eq!(FileType::from_path(Path::new("cv.doc")), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new("README")), FileType::Unknown);
    }

    #[test]
    fn test_categories() {
        assert!(FileType::Text.is_document());
        assert!(FileType::Docx.is_document());
        assert!(!FileType::Toml.is_document());
        assert!(FileType::Toml.is_posting());
        assert!(!FileType::Unknown.is_posting());
    }
}
