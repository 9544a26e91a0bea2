//! Headless voxel sandbox: configuration and the scripted demo session.
#![forbid(unsafe_code)]

pub mod config;
pub mod demo;

pub use config::{AppConfig, ConfigError};
pub use demo::{Demo, DemoError, DemoSummary, TickStats, run};
