//! Path Recommendation Engine
//!
//! Turns a goal set into an ordered list of fresh learning path instances.
//!
//! RULES:
//! - Recommendation is pure: same goal count and catalog, same output
//! - Selection depends only on how many goals there are, not on their text
//! - The result is always a prefix of the catalog, in catalog order
//! - More goals never yields fewer paths
//! - An empty catalog yields an empty result, not an error

use super::goals::GoalSet;
use super::progress::LearningPathInstance;
use super::types::LearningPathTemplate;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Number of paths recommended for `goal_count` goals: one more than the
/// goal count, capped by the catalog.
pub fn selection_count(goal_count: usize, catalog_len: usize) -> usize {
    goal_count.saturating_add(1).min(catalog_len)
}

/// Select the first `selection_count` templates and wrap each in a fresh instance.
pub fn recommend(goals: &GoalSet, catalog: &[LearningPathTemplate]) -> Vec<LearningPathInstance> {
    let k = selection_count(goals.len(), catalog.len());
    catalog
        .iter()
        .take(k)
        .cloned()
        .map(LearningPathInstance::new)
        .collect()
}

// ============================================================
// RECOMMENDATION RUN
// ============================================================

/// Metadata about a recommendation run
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationMetadata {
    pub goal_count: usize,
    pub catalog_size: usize,
    pub selected: usize,
    pub generated_at: DateTime<Utc>,
    pub generation_duration_ms: u64,
}

/// Paths produced by one run, plus how they were produced
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub paths: Vec<LearningPathInstance>,
    pub metadata: RecommendationMetadata,
}

/// Owns the catalog the dashboard recommends from
#[derive(Debug, Clone)]
pub struct PathRecommender {
    catalog: Vec<LearningPathTemplate>,
}

impl PathRecommender {
    pub fn new(catalog: Vec<LearningPathTemplate>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &[LearningPathTemplate] {
        &self.catalog
    }

    /// Run the engine and record metadata about the run
    pub fn generate(&self, goals: &GoalSet) -> Recommendation {
        let start_time = std::time::Instant::now();
        let paths = recommend(goals, &self.catalog);

        log::debug!(
            "Recommended {} of {} paths for {} goals",
            paths.len(),
            self.catalog.len(),
            goals.len()
        );

        Recommendation {
            metadata: RecommendationMetadata {
                goal_count: goals.len(),
                catalog_size: self.catalog.len(),
                selected: paths.len(),
                generated_at: Utc::now(),
                generation_duration_ms: start_time.elapsed().as_millis() as u64,
            },
            paths,
        }
    }
}

impl Default for PathRecommender {
    fn default() -> Self {
        Self::new(super::catalog::default_catalog())
    }
}
