//! Navigator Types
//!
//! Core data structures shared by the goal manager, the recommender,
//! the progress tracker and the profile store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::goals::GoalSet;

// ============================================================
// USER PROFILE
// ============================================================

/// The durable record of a user's identity, goals and aggregate stats.
///
/// Field names match the persisted `learningUser` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub learning_goals: GoalSet,
    #[serde(default)]
    pub completed_paths: u32,
    #[serde(default)]
    pub total_hours: f64,
}

impl UserProfile {
    /// Profile handed out by the sign-in collaborator for a brand new account.
    pub fn new_account(name: &str, email: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.trim().to_string(),
            name: name.trim().to_string(),
            learning_goals: GoalSet::new(),
            completed_paths: 0,
            total_hours: 0.0,
        }
    }

    /// A decoded profile is only usable if its stats are sane.
    pub fn is_valid(&self) -> bool {
        self.total_hours.is_finite() && self.total_hours >= 0.0
    }
}

// ============================================================
// LEARNING PATH TEMPLATE
// ============================================================

/// Difficulty badge of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// An immutable catalog entry a learning path is derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPathTemplate {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    /// Human-readable duration, e.g. "12 weeks"
    pub duration: String,
    /// Same duration as a number, used for hour accounting
    pub estimated_weeks: u32,
    pub modules: u32,
    /// Ordered skill tags
    pub skills: Vec<String>,
    /// Accent identifier used by the card renderer
    pub color: String,
}

impl LearningPathTemplate {
    pub fn new(title: &str, description: &str, difficulty: Difficulty) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            difficulty,
            duration: String::new(),
            estimated_weeks: 0,
            modules: 0,
            skills: Vec::new(),
            color: String::new(),
        }
    }

    pub fn with_weeks(mut self, weeks: u32) -> Self {
        self.estimated_weeks = weeks;
        self.duration = format!("{} weeks", weeks);
        self
    }

    pub fn with_modules(mut self, modules: u32) -> Self {
        self.modules = modules;
        self
    }

    pub fn with_skills(mut self, skills: &[&str]) -> Self {
        self.skills = skills.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    /// Hours credited to the profile when a path built from this template completes.
    pub fn estimated_hours(&self, hours_per_week: u32) -> f64 {
        f64::from(self.estimated_weeks) * f64::from(hours_per_week)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_defaults() {
        let profile = UserProfile::new_account("  Ada ", "ada@example.com");
        assert_eq!(profile.name, "Ada");
        assert!(profile.learning_goals.is_empty());
        assert_eq!(profile.completed_paths, 0);
        assert_eq!(profile.total_hours, 0.0);
        assert!(!profile.id.is_empty());
    }

    #[test]
    fn test_profile_uses_persisted_field_names() {
        let profile = UserProfile::new_account("Ada", "ada@example.com");
        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("learningGoals").is_some());
        assert!(value.get("completedPaths").is_some());
        assert!(value.get("totalHours").is_some());
    }

    #[test]
    fn test_template_duration_label() {
        let template = LearningPathTemplate::new("T", "D", Difficulty::Beginner).with_weeks(8);
        assert_eq!(template.duration, "8 weeks");
        assert_eq!(template.estimated_hours(10), 80.0);
    }
}
