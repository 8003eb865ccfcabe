//! Opsboard Core: shared types, traits, and errors.
//!
//! This crate provides the foundational types used across all Opsboard crates.
//! It has no internal Opsboard dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`traits`]: Configuration abstraction and output format

#![doc = include_str!("../README.md")]

pub mod error;
pub mod traits;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use traits::{ConfigProvider, OutputFormat};
