//! Input manager for loading resumes and job descriptions

use crate::error::{RankerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::Path;
use tokio::fs;

/// A resume as uploaded: its display name and raw PDF bytes
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    fn content_key(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.bytes.hash(&mut hasher);
        hasher.finish()
    }
}

/// Loads inputs and memoizes PDF text by content hash. The cache lives as
/// long as the manager and is never evicted.
pub struct InputManager {
    cache: HashMap<u64, String>,
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

    /// Read a resume from disk. Only PDF files are accepted.
    pub async fn load_resume(&self, path: &Path) -> Result<ResumeFile> {
        if !path.exists() {
            return Err(RankerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        if FileType::from_path(path) != FileType::Pdf {
            return Err(RankerError::UnsupportedFormat(format!(
                "Resumes must be PDF files: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(ResumeFile::new(filename, bytes))
    }

    /// Extract the resume's text, reusing an earlier result for identical bytes
    pub fn extract_text(&mut self, file: &ResumeFile) -> Result<String> {
        let key = file.content_key();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&key) {
                info!("Using cached text for: {}", file.filename);
                return Ok(cached_text.clone());
            }
        }

        info!("Extracting text from PDF: {}", file.filename);
        let text = PdfExtractor.extract(&file.bytes).map_err(|e| match e {
            RankerError::PdfExtraction(msg) => {
                RankerError::PdfExtraction(format!("{}: {}", file.filename, msg))
            }
            other => other,
        })?;
        debug!("Extracted {} characters from {}", text.len(), file.filename);

        if self.enable_cache {
            self.cache.insert(key, text.clone());
        }

        Ok(text)
    }

    /// Read a job description from a plain-text or markdown file
    pub async fn read_job_description(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(RankerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;
        match FileType::from_path(path) {
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(&bytes)
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(&bytes)
            }
            FileType::Pdf | FileType::Unknown => Err(RankerError::UnsupportedFormat(format!(
                "Job descriptions must be .txt or .md files: {}",
                path.display()
            ))),
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_bytes_share_a_key() {
        let a = ResumeFile::new("a.pdf", b"same".to_vec());
        let b = ResumeFile::new("b.pdf", b"same".to_vec());
        let c = ResumeFile::new("a.pdf", b"different".to_vec());
        assert_eq!(a.content_key(), b.content_key());
        assert_ne!(a.content_key(), c.content_key());
    }

    #[test]
    fn test_failed_extraction_is_not_cached() {
        let mut manager = InputManager::new();
        let file = ResumeFile::new("broken.pdf", b"not a pdf".to_vec());

        let err = manager.extract_text(&file).unwrap_err();
        assert!(err.to_string().contains("broken.pdf"));
        assert_eq!(manager.cache_size(), 0);
    }
}
