//! `rukun-desktop`
//!
//! **Responsibility:** process edge for the registry.
//!
//! This crate provides:
//! - Configuration resolved from the environment
//! - A headless text rendering of each view, for terminals and scripts

pub mod config;
pub mod report;

pub use config::{ConfigError, DesktopConfig};
pub use report::render;
