//! Core engine infrastructure
//!
//! Houses the unified configuration types used by the engine and its
//! applications.

pub mod config;

pub use config::{AssetConfig, EngineConfig, LoggingConfig, TimingConfig, WindowConfig};
