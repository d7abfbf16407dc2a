//! Resume text extraction pipeline

pub mod education;
pub mod experience;
pub mod fields;
pub mod normalizer;
pub mod parser;
pub mod profile;
pub mod projects;
pub mod sections;
pub mod skills;

pub use skills::categorize_skill;
