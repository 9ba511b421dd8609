//! Navigator Module - Core of the Learning Navigator
//!
//! Turns a set of learning goals into recommended learning paths and tracks
//! progress on each of them.
//!
//! Architecture:
//! - Goals: ordered, deduplicated goal set editing
//! - Recommender: goal set → prefix of the fixed path catalog
//! - Progress: per-path NotStarted → InProgress → Completed state machine
//! - Profile: durable user profile behind a key-value store
//! - Dashboard: orchestrates a signed-in session

pub mod activity;
pub mod catalog;
pub mod dashboard;
pub mod goals;
pub mod notify;
pub mod profile;
pub mod progress;
pub mod recommender;
pub mod storage;
pub mod types;

pub use activity::*;
pub use catalog::*;
pub use dashboard::*;
pub use goals::*;
pub use notify::*;
pub use profile::*;
pub use progress::*;
pub use recommender::*;
pub use storage::*;
pub use types::*;
