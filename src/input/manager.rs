//! Input manager for handling different file types

use crate::error::{PortfolioError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;

/// Decoded text plus the file name it came from. The name is diagnostic
/// only and never reaches the extracted profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub source_name: String,
    pub file_type: FileType,
    pub text: String,
}

pub struct InputManager {
    cache: HashMap<String, String>,
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

    pub async fn read_document(&mut self, path: &Path) -> Result<SourceDocument> {
        let file_type = self.detect_file_type(path)?;
        let text = self.extract_text(path).await?;

        if text.trim().is_empty() {
            warn!("No text could be decoded from {}", path.display());
        }

        Ok(SourceDocument {
            source_name: source_name(path),
            file_type,
            text,
        })
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(PortfolioError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match self.detect_file_type(path)? {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(PortfolioError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        FileType::from_path(path).ok_or_else(|| {
            PortfolioError::InvalidInput(format!("File has no extension: {}", path.display()))
        })
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

/// File name component of `path`, used in logs and output file names.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_and_caches_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Jane_Smith.txt");
        std::fs::write(&path, "Jane Smith\nSenior Backend Engineer").unwrap();

        let mut manager = InputManager::new();
        let document = manager.read_document(&path).await.unwrap();

        assert_eq!(document.source_name, "Jane_Smith.txt");
        assert_eq!(document.file_type, FileType::Text);
        assert_eq!(document.text, "Jane Smith\nSenior Backend Engineer");
        assert_eq!(manager.cache_size(), 1);

        manager.clear_cache();
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_missing_and_unsupported_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = InputManager::new().with_cache(false);

        let missing = manager.extract_text(&dir.path().join("gone.txt")).await;
        assert!(matches!(missing, Err(PortfolioError::InvalidInput(_))));

        let docx = dir.path().join("resume.docx");
        std::fs::write(&docx, "binary").unwrap();
        let unsupported = manager.extract_text(&docx).await;
        assert!(matches!(unsupported, Err(PortfolioError::UnsupportedFormat(_))));

        let bare = dir.path().join("resume");
        std::fs::write(&bare, "text").unwrap();
        let no_extension = manager.extract_text(&bare).await;
        assert!(matches!(no_extension, Err(PortfolioError::InvalidInput(_))));
    }
}
