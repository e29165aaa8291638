//! Bootstrap layer — runs before the HTTP surface starts.
//!
//! - **logger** — tracing-subscriber initialisation.

pub mod logger;
