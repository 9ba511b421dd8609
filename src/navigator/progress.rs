//! Path Progress Tracker
//!
//! Per-path state machine: NotStarted → InProgress → Completed.
//!
//! RULES:
//! - Progress never decreases and never leaves [0, 100]
//! - Progress 100 implies started
//! - Completed is terminal; only regenerating the path list replaces an instance
//! - The tracker reports transitions, it never touches the profile

use super::types::LearningPathTemplate;
use serde::Serialize;
use thiserror::Error;

pub const MAX_PROGRESS: u8 = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressError {
    #[error("Learning path already started")]
    AlreadyStarted,

    #[error("Learning path has not been started")]
    NotStarted,
}

/// Lifecycle state derived from (started, progress)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathState {
    NotStarted,
    /// Includes the started-at-0% sub-state
    InProgress,
    Completed,
}

/// The single action a path card offers in its current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathAction {
    Start,
    Continue,
    /// Rendered disabled
    Completed,
}

/// Outcome of a successful tracker call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transition {
    Started,
    Advanced { from: u8, to: u8 },
    /// Progress reached 100; callers credit the profile on this one
    Completed { from: u8 },
    Unchanged,
}

/// A recommended path plus the user's per-session progress on it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningPathInstance {
    #[serde(flatten)]
    template: LearningPathTemplate,
    progress: u8,
    started: bool,
}

impl LearningPathInstance {
    /// Fresh instance: not started, 0%
    pub fn new(template: LearningPathTemplate) -> Self {
        Self {
            template,
            progress: 0,
            started: false,
        }
    }

    pub fn template(&self) -> &LearningPathTemplate {
        &self.template
    }

    pub fn title(&self) -> &str {
        &self.template.title
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn state(&self) -> PathState {
        if !self.started {
            PathState::NotStarted
        } else if self.progress >= MAX_PROGRESS {
            PathState::Completed
        } else {
            PathState::InProgress
        }
    }

    pub fn action(&self) -> PathAction {
        match self.state() {
            PathState::NotStarted => PathAction::Start,
            PathState::InProgress => PathAction::Continue,
            PathState::Completed => PathAction::Completed,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state() == PathState::Completed
    }

    /// NotStarted → InProgress (at 0%)
    pub fn start(&mut self) -> Result<Transition, ProgressError> {
        if self.started {
            return Err(ProgressError::AlreadyStarted);
        }
        self.started = true;
        Ok(Transition::Started)
    }

    /// Add `delta` percentage points, clamped to 100.
    /// Advancing a completed path is a no-op.
    pub fn advance(&mut self, delta: u32) -> Result<Transition, ProgressError> {
        if !self.started {
            return Err(ProgressError::NotStarted);
        }
        if self.is_completed() || delta == 0 {
            return Ok(Transition::Unchanged);
        }

        let from = self.progress;
        let to = u32::from(from)
            .saturating_add(delta)
            .min(u32::from(MAX_PROGRESS)) as u8;
        self.progress = to;

        if to == MAX_PROGRESS {
            Ok(Transition::Completed { from })
        } else {
            Ok(Transition::Advanced { from, to })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::catalog::default_catalog;

    fn instance() -> LearningPathInstance {
        LearningPathInstance::new(default_catalog().remove(0))
    }

    #[test]
    fn test_new_instance_is_not_started() {
        let path = instance();
        assert_eq!(path.progress(), 0);
        assert!(!path.is_started());
        assert_eq!(path.state(), PathState::NotStarted);
        assert_eq!(path.action(), PathAction::Start);
    }

    #[test]
    fn test_start_enters_in_progress_at_zero() {
        let mut path = instance();
        assert_eq!(path.start(), Ok(Transition::Started));
        assert_eq!(path.progress(), 0);
        assert_eq!(path.state(), PathState::InProgress);
        assert_eq!(path.action(), PathAction::Continue);
        assert_eq!(path.start(), Err(ProgressError::AlreadyStarted));
    }

    #[test]
    fn test_advance_requires_start() {
        let mut path = instance();
        assert_eq!(path.advance(10), Err(ProgressError::NotStarted));
        assert_eq!(path.progress(), 0);
    }

    #[test]
    fn test_advance_accumulates_and_clamps() {
        let mut path = instance();
        path.start().unwrap();
        assert_eq!(path.advance(40), Ok(Transition::Advanced { from: 0, to: 40 }));
        assert_eq!(path.advance(0), Ok(Transition::Unchanged));
        assert_eq!(path.advance(u32::MAX), Ok(Transition::Completed { from: 40 }));
        assert_eq!(path.progress(), 100);
    }

    #[test]
    fn test_completed_is_terminal() {
        let mut path = instance();
        path.start().unwrap();
        assert_eq!(path.advance(100), Ok(Transition::Completed { from: 0 }));
        assert!(path.is_completed());
        assert_eq!(path.action(), PathAction::Completed);

        assert_eq!(path.advance(25), Ok(Transition::Unchanged));
        assert_eq!(path.progress(), 100);
        assert_eq!(path.start(), Err(ProgressError::AlreadyStarted));
        assert_eq!(path.state(), PathState::Completed);
    }

    #[test]
    fn test_serializes_template_fields_inline() {
        let value = serde_json::to_value(instance()).unwrap();
        assert_eq!(value["title"], "Frontend Development Mastery");
        assert_eq!(value["progress"], 0);
        assert_eq!(value["started"], false);
    }
}
