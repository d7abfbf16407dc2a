//! Resume portfolio library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{PortfolioError, Result};
pub use processing::parser::{extract_profile, ResumeParser};
pub use processing::profile::ResumeProfile;
