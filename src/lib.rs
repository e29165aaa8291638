//! Discharge Assistant — clinical notes in, drafted discharge summary out.
//!
//! The binary entry point is `src/main.rs`; the library exposes everything
//! for integration tests.

pub mod bootstrap;
pub mod core;
pub mod llm;
pub mod roi;
pub mod scenarios;
pub mod summary;
pub mod web;

pub use bootstrap::logger;
pub use core::{config, error};
