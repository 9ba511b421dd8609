//! Learning Navigator Backend
//!
//! Goal-driven learning path recommendations with:
//! - Goal set management
//! - Learning path recommendation from a fixed catalog
//! - Per-path progress tracking
//! - Durable profile storage and an activity timeline

pub mod api;
pub mod config;
pub mod navigator;

pub use config::*;
pub use navigator::*;
