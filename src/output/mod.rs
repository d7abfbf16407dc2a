//! Output rendering module

pub mod formatter;

pub use formatter::{OutputFormatter, ProfileRenderer};
