//! Process-level plumbing: configuration files and logging.

pub mod config;
pub mod logger;
