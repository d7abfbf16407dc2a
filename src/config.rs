//! Configuration management for the resume portfolio generator

use crate::error::{PortfolioError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

/// Tunable constants used by the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Leading characters searched for the candidate's name
    pub name_window_chars: usize,
    /// Leading characters searched for the job title
    pub title_window_chars: usize,
    /// Minimum content length for a section match to count
    pub min_section_chars: usize,
    pub summary_min_chars: usize,
    pub summary_max_chars: usize,
    pub max_experience_entries: usize,
    pub max_project_entries: usize,
    /// Characters after a project's title line scanned for technologies
    pub project_tech_window_chars: usize,
    pub fallback_title: String,
    pub fallback_email: String,
    /// Owner used when synthesizing a repository link for a project
    pub placeholder_repo_owner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            name_window_chars: 500,
            title_window_chars: 800,
            min_section_chars: 10,
            summary_min_chars: 30,
            summary_max_chars: 2000,
            max_experience_entries: 5,
            max_project_entries: 5,
            project_tech_window_chars: 200,
            fallback_title: "Software Engineer".to_string(),
            fallback_email: "user@example.com".to_string(),
            placeholder_repo_owner: "username".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
            pretty_json: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults there on first use.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| PortfolioError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| PortfolioError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-portfolio")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extraction_constants() {
        let config = ExtractionConfig::default();
        assert_eq!(config.name_window_chars, 500);
        assert_eq!(config.title_window_chars, 800);
        assert_eq!(config.max_experience_entries, 5);
        assert_eq!(config.fallback_title, "Software Engineer");
        assert_eq!(config.fallback_email, "user@example.com");
    }

    #[test]
    fn test_toml_roundtrip_keeps_values() {
        let mut config = Config::default();
        config.extraction.max_project_entries = 3;
        config.output.format = OutputFormat::Markdown;

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_extraction_table_uses_defaults() {
        let text = r#"
[extraction]
max_experience_entries = 2

[output]
format = "Json"
detailed = true
color_output = false
pretty_json = false
"#;
        let parsed: Config = toml::from_str(text).unwrap();
        assert_eq!(parsed.extraction.max_experience_entries, 2);
        assert_eq!(parsed.extraction.name_window_chars, 500);
        assert_eq!(parsed.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_load_from_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config, Config::default());
    }
}
