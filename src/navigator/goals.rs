//! Goal Set Manager
//!
//! Keeps the ordered, deduplicated list of learning goals the user is editing.
//! Every operation returns a new set; callers own persistence.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Popular goals offered next to the free-text input
pub const SUGGESTED_GOALS: [&str; 8] = [
    "Learn React and modern frontend development",
    "Master Python for data science",
    "Build full-stack web applications",
    "Understand machine learning fundamentals",
    "Develop mobile apps with React Native",
    "Learn cloud computing and DevOps",
    "Master database design and management",
    "Build AI-powered applications",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GoalSetError {
    #[error("Goal at position {0} is empty")]
    Empty(usize),

    #[error("Duplicate goal: {0}")]
    Duplicate(String),
}

/// Ordered sequence of trimmed, non-empty, unique goal strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct GoalSet {
    goals: Vec<String>,
}

impl GoalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set by feeding every raw entry through [`GoalSet::add`].
    /// Blank and repeated entries are dropped rather than rejected.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .fold(Self::new(), |set, goal| set.add(goal.as_ref()))
    }

    /// Append a trimmed goal. Empty or already-present goals leave the set unchanged.
    pub fn add(&self, raw: &str) -> GoalSet {
        let goal = raw.trim();
        if goal.is_empty() || self.contains(goal) {
            return self.clone();
        }
        let mut goals = self.goals.clone();
        goals.push(goal.to_string());
        GoalSet { goals }
    }

    /// Remove the first exact match; no-op if absent.
    pub fn remove(&self, goal: &str) -> GoalSet {
        let mut goals = self.goals.clone();
        if let Some(pos) = goals.iter().position(|g| g == goal) {
            goals.remove(pos);
        }
        GoalSet { goals }
    }

    /// Case-sensitive exact match
    pub fn contains(&self, goal: &str) -> bool {
        self.goals.iter().any(|g| g == goal)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.goals.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.goals
    }
}

impl TryFrom<Vec<String>> for GoalSet {
    type Error = GoalSetError;

    /// Strict conversion used when decoding a stored profile.
    fn try_from(raw: Vec<String>) -> Result<Self, Self::Error> {
        let mut set = GoalSet::new();
        for (i, goal) in raw.iter().enumerate() {
            let trimmed = goal.trim();
            if trimmed.is_empty() {
                return Err(GoalSetError::Empty(i));
            }
            if set.contains(trimmed) {
                return Err(GoalSetError::Duplicate(trimmed.to_string()));
            }
            set.goals.push(trimmed.to_string());
        }
        Ok(set)
    }
}

impl From<GoalSet> for Vec<String> {
    fn from(set: GoalSet) -> Self {
        set.goals
    }
}
