//! Error handling for the resume portfolio generator

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, PortfolioError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for PortfolioError {
    fn from(err: anyhow::Error) -> Self {
        PortfolioError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PortfolioError::UnsupportedFormat("resume.xyz".to_string());
        assert_eq!(err.to_string(), "File format not supported: resume.xyz");

        let err: PortfolioError = anyhow::anyhow!("bad flag").into();
        assert!(matches!(err, PortfolioError::InvalidInput(_)));
    }
}
