//! Dashboard Controller
//!
//! Orchestrates one signed-in session: owns the current profile, the current
//! path instances and the generation state, and drives the recommender,
//! the progress tracker and the profile store.
//!
//! RULES:
//! - Submitting an empty goal set never triggers generation
//! - Only one generation may be pending; re-submission is ignored meanwhile
//! - A generation commits only if its ticket is still the pending one
//! - Committing replaces the path list, it never merges into it
//! - Opening a session with stored goals and no paths generates immediately

use super::activity::{ActivityEvent, ActivityKind, ActivityLog};
use super::goals::GoalSet;
use super::notify::NotificationSink;
use super::profile::ProfileStore;
use super::progress::{LearningPathInstance, ProgressError, Transition};
use super::recommender::{PathRecommender, Recommendation};
use super::storage::StoreError;
use super::types::UserProfile;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("No signed-in profile")]
    NoSession,

    #[error("Learning path {0} not found")]
    PathNotFound(usize),

    #[error(transparent)]
    Progress(#[from] ProgressError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Controller tunables
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Simulated latency between submission and recommendations being ready
    pub generation_delay: Duration,
    /// Hours credited per catalog week when a path completes
    pub hours_per_week: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            generation_delay: Duration::from_secs(2),
            hours_per_week: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardStatus {
    Idle,
    Generating,
}

/// Why a submission was dropped without generating anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    EmptyGoals,
    AlreadyGenerating,
}

/// Handle for one pending generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    seq: u64,
    goals: GoalSet,
}

impl GenerationTicket {
    pub fn goals(&self) -> &GoalSet {
        &self.goals
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationStart {
    Pending(GenerationTicket),
    Ignored(IgnoreReason),
}

/// Result of a goal submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Submission {
    Generated { count: usize },
    Ignored { reason: IgnoreReason },
    /// Finished after its ticket stopped being the pending one
    Discarded,
}

/// Aggregate numbers shown above the path cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub goals_set: usize,
    pub completed_paths: u32,
    pub learning_hours: f64,
    /// Mean progress over the current paths, 0 when there are none
    pub overall_progress: u8,
}

pub const GENERATED_TITLE: &str = "Learning paths generated!";

fn generated_description(count: usize) -> String {
    format!(
        "Created {} personalized learning paths based on your goals.",
        count
    )
}

pub struct Dashboard {
    profiles: ProfileStore,
    recommender: PathRecommender,
    activity: Arc<ActivityLog>,
    notifier: Arc<dyn NotificationSink>,
    config: DashboardConfig,
    profile: Option<UserProfile>,
    paths: Vec<LearningPathInstance>,
    status: DashboardStatus,
    next_seq: u64,
    pending: Option<u64>,
}

impl Dashboard {
    pub fn new(
        profiles: ProfileStore,
        recommender: PathRecommender,
        activity: Arc<ActivityLog>,
        notifier: Arc<dyn NotificationSink>,
        config: DashboardConfig,
    ) -> Self {
        Self {
            profiles,
            recommender,
            activity,
            notifier,
            config,
            profile: None,
            paths: Vec::new(),
            status: DashboardStatus::Idle,
            next_seq: 0,
            pending: None,
        }
    }

    // ============================================================
    // SESSION
    // ============================================================

    /// Restore the stored session, if any. A corrupt stored profile
    /// behaves exactly like no profile.
    pub fn open(&mut self) -> Result<Option<&UserProfile>, DashboardError> {
        self.profile = self.profiles.load()?;
        self.reset_generation();
        self.paths.clear();
        self.reconcile();
        Ok(self.profile.as_ref())
    }

    /// Accept a profile from the sign-in collaborator and make it durable
    pub fn sign_in(&mut self, profile: UserProfile) -> Result<&UserProfile, DashboardError> {
        self.profiles.save(&profile)?;
        self.record(ActivityEvent::new(
            &profile.id,
            ActivityKind::SignedIn,
            &format!("Signed in as {}", profile.email),
        ));
        log::info!("Signed in {}", profile.email);

        self.profile = Some(profile);
        self.reset_generation();
        self.paths.clear();
        self.reconcile();
        self.profile.as_ref().ok_or(DashboardError::NoSession)
    }

    /// Delete the stored profile and drop all session state
    pub fn sign_out(&mut self) -> Result<(), DashboardError> {
        self.profiles.clear()?;
        if let Some(profile) = self.profile.take() {
            self.record(ActivityEvent::new(&profile.id, ActivityKind::SignedOut, "Signed out"));
            log::info!("Signed out {}", profile.email);
        }
        self.reset_generation();
        self.paths.clear();
        Ok(())
    }

    /// Generate paths straight away for stored goals that have none yet
    fn reconcile(&mut self) {
        let Some(profile) = &self.profile else {
            return;
        };
        if !profile.learning_goals.is_empty() && self.paths.is_empty() {
            self.paths = self.recommender.generate(&profile.learning_goals).paths;
            log::debug!(
                "Restored {} learning paths from {} stored goals",
                self.paths.len(),
                profile.learning_goals.len()
            );
        }
    }

    fn reset_generation(&mut self) {
        self.pending = None;
        self.status = DashboardStatus::Idle;
    }

    // ============================================================
    // GENERATION
    // ============================================================

    /// First half of a submission: validate and mark the dashboard as generating.
    pub fn begin_generation(&mut self, goals: GoalSet) -> Result<GenerationStart, DashboardError> {
        if self.profile.is_none() {
            return Err(DashboardError::NoSession);
        }
        if goals.is_empty() {
            return Ok(GenerationStart::Ignored(IgnoreReason::EmptyGoals));
        }
        if self.status == DashboardStatus::Generating {
            return Ok(GenerationStart::Ignored(IgnoreReason::AlreadyGenerating));
        }

        self.next_seq += 1;
        self.pending = Some(self.next_seq);
        self.status = DashboardStatus::Generating;
        log::info!("Generating learning paths for {} goals", goals.len());

        Ok(GenerationStart::Pending(GenerationTicket {
            seq: self.next_seq,
            goals,
        }))
    }

    /// Second half of a submission: persist the goals, replace the paths, notify.
    pub fn commit_generation(
        &mut self,
        ticket: GenerationTicket,
        recommendation: Recommendation,
    ) -> Result<Submission, DashboardError> {
        if self.pending != Some(ticket.seq) {
            log::debug!("Discarding stale generation #{}", ticket.seq);
            return Ok(Submission::Discarded);
        }
        self.reset_generation();

        // Goals must be durable before the new paths become visible
        let profile = self.profile.as_ref().ok_or(DashboardError::NoSession)?;
        let count = recommendation.paths.len();
        let updated = self.profiles.update_goals(profile, ticket.goals)?;
        self.paths = recommendation.paths;

        self.record(ActivityEvent::new(
            &updated.id,
            ActivityKind::GoalsUpdated,
            &format!("Updated learning goals ({} goals)", updated.learning_goals.len()),
        )
        .with_metadata(serde_json::json!({ "goals": updated.learning_goals })));
        self.record(ActivityEvent::new(
            &updated.id,
            ActivityKind::PathsGenerated,
            &format!("Generated {} learning paths", count),
        )
        .with_metadata(serde_json::json!({
            "count": count,
            "generation_duration_ms": recommendation.metadata.generation_duration_ms,
        })));
        self.profile = Some(updated);

        self.notifier
            .notify(GENERATED_TITLE, &generated_description(count));
        log::info!("Committed generation #{} with {} paths", ticket.seq, count);

        Ok(Submission::Generated { count })
    }

    /// Submit goals end to end, including the simulated generation latency.
    pub async fn submit_goals(&mut self, goals: GoalSet) -> Result<Submission, DashboardError> {
        let ticket = match self.begin_generation(goals)? {
            GenerationStart::Pending(ticket) => ticket,
            GenerationStart::Ignored(reason) => return Ok(Submission::Ignored { reason }),
        };

        if !self.config.generation_delay.is_zero() {
            tokio::time::sleep(self.config.generation_delay).await;
        }

        let recommendation = self.recommender.generate(ticket.goals());
        self.commit_generation(ticket, recommendation)
    }

    // ============================================================
    // PROGRESS
    // ============================================================

    pub fn start_path(&mut self, index: usize) -> Result<Transition, DashboardError> {
        let user_id = self.profile.as_ref().ok_or(DashboardError::NoSession)?.id.clone();
        let path = self
            .paths
            .get_mut(index)
            .ok_or(DashboardError::PathNotFound(index))?;

        let transition = path.start()?;
        let title = path.title().to_string();
        self.record(ActivityEvent::new(
            &user_id,
            ActivityKind::PathStarted,
            &format!("Started: {}", title),
        ));
        Ok(transition)
    }

    /// Advance a path; completing it credits the profile.
    ///
    /// The new progress is only kept once the credit is persisted, so a failed
    /// save leaves the path advanceable again.
    pub fn advance_path(&mut self, index: usize, delta: u32) -> Result<Transition, DashboardError> {
        let profile = self.profile.as_ref().ok_or(DashboardError::NoSession)?;
        let current = self
            .paths
            .get(index)
            .ok_or(DashboardError::PathNotFound(index))?;

        let mut advanced = current.clone();
        let transition = advanced.advance(delta)?;
        if let Transition::Completed { .. } = transition {
            let hours = advanced.template().estimated_hours(self.config.hours_per_week);
            let title = advanced.title().to_string();
            let updated = self.profiles.record_completion(profile, hours)?;

            self.record(ActivityEvent::new(
                &updated.id,
                ActivityKind::PathCompleted,
                &format!("Completed: {}", title),
            )
            .with_metadata(serde_json::json!({ "hours": hours })));
            log::info!("Completed learning path '{}' (+{} hours)", title, hours);
            self.profile = Some(updated);
        }
        self.paths[index] = advanced;
        Ok(transition)
    }

    // ============================================================
    // VIEW
    // ============================================================

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn paths(&self) -> &[LearningPathInstance] {
        &self.paths
    }

    pub fn status(&self) -> DashboardStatus {
        self.status
    }

    pub fn is_generating(&self) -> bool {
        self.status == DashboardStatus::Generating
    }

    pub fn recommender(&self) -> &PathRecommender {
        &self.recommender
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn stats(&self) -> Option<DashboardStats> {
        let profile = self.profile.as_ref()?;
        let overall_progress = if self.paths.is_empty() {
            0
        } else {
            let total: u32 = self.paths.iter().map(|p| u32::from(p.progress())).sum();
            (total / self.paths.len() as u32) as u8
        };
        Some(DashboardStats {
            goals_set: profile.learning_goals.len(),
            completed_paths: profile.completed_paths,
            learning_hours: profile.total_hours,
            overall_progress,
        })
    }

    fn record(&self, event: ActivityEvent) {
        if let Err(e) = self.activity.record(&event) {
            log::warn!("Failed to record activity '{}': {}", event.description, e);
        }
    }
}
