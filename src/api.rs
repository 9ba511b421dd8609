//! Web API Module
//!
//! Exposes RESTful endpoints for the Learning Navigator frontend.
//! All endpoints return JSON. Sign-in is a stub: it trusts the submitted identity.

use crate::config::NavigatorConfig;
use crate::navigator::{
    activity::ActivityLog,
    dashboard::{Dashboard, DashboardError, GenerationStart, Submission},
    goals::{GoalSet, SUGGESTED_GOALS},
    notify::{LogSink, NotificationSink},
    profile::ProfileStore,
    progress::{LearningPathInstance, PathAction, PathState},
    recommender::PathRecommender,
    storage::{KeyValueStore, MemoryKv, SqliteKv},
    types::UserProfile,
};
use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

// ============================================================
// APPLICATION STATE
// ============================================================

/// Shared application state
pub struct AppState {
    pub dashboard: Mutex<Dashboard>,
    pub activity: Arc<ActivityLog>,
}

impl AppState {
    /// Build state from configuration and restore any stored session
    pub fn new(config: &NavigatorConfig) -> Result<Self, DashboardError> {
        let kv: Arc<dyn KeyValueStore>;
        let activity;
        if config.in_memory() {
            kv = Arc::new(MemoryKv::new());
            activity = ActivityLog::in_memory()?;
        } else {
            let path = config.db_file();
            kv = Arc::new(SqliteKv::open(&path)?);
            activity = ActivityLog::open(&path)?;
        }
        Self::with_parts(kv, Arc::new(activity), Arc::new(LogSink), config)
    }

    pub fn with_parts(
        kv: Arc<dyn KeyValueStore>,
        activity: Arc<ActivityLog>,
        notifier: Arc<dyn NotificationSink>,
        config: &NavigatorConfig,
    ) -> Result<Self, DashboardError> {
        let mut dashboard = Dashboard::new(
            ProfileStore::new(kv),
            PathRecommender::default(),
            activity.clone(),
            notifier,
            config.dashboard(),
        );
        if let Some(profile) = dashboard.open()? {
            log::info!("Restored session for {}", profile.email);
        }
        Ok(Self {
            dashboard: Mutex::new(dashboard),
            activity,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Dashboard>, HttpResponse> {
        self.dashboard.lock().map_err(|_| {
            HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Dashboard state poisoned"))
        })
    }
}

// ============================================================
// API REQUEST/RESPONSE TYPES
// ============================================================

#[derive(Deserialize)]
pub struct SignInRequest {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct SubmitGoalsRequest {
    pub goals: Vec<String>,
}

/// `?days=N` limits the timeline to the last N days
#[derive(Deserialize)]
pub struct ActivityQuery {
    pub days: Option<i64>,
}

#[derive(Deserialize)]
pub struct AdvanceRequest {
    pub delta: u32,
}

/// A path card: the instance plus its derived state and action
#[derive(Serialize)]
pub struct PathView<'a> {
    pub index: usize,
    pub state: PathState,
    pub action: PathAction,
    #[serde(flatten)]
    pub path: &'a LearningPathInstance,
}

fn path_views(paths: &[LearningPathInstance]) -> Vec<PathView<'_>> {
    paths
        .iter()
        .enumerate()
        .map(|(index, path)| PathView {
            index,
            state: path.state(),
            action: path.action(),
            path,
        })
        .collect()
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: &str) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.to_string()),
        }
    }
}

fn error_response(e: &DashboardError) -> HttpResponse {
    let body = ApiResponse::<()>::error(&e.to_string());
    match e {
        DashboardError::NoSession => HttpResponse::Unauthorized().json(body),
        DashboardError::PathNotFound(_) => HttpResponse::NotFound().json(body),
        DashboardError::Progress(_) => HttpResponse::BadRequest().json(body),
        DashboardError::Store(_) => {
            log::error!("Store failure: {}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

// ============================================================
// API HANDLERS
// ============================================================

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "Learning Navigator API",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Sign in, reusing the stored profile when the email matches
async fn sign_in(data: web::Data<Arc<AppState>>, req: web::Json<SignInRequest>) -> impl Responder {
    if req.name.trim().is_empty() || req.email.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("Name and email are required"));
    }

    let mut dashboard = match data.lock() {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    let profile = match dashboard.profile() {
        Some(existing) if existing.email == req.email.trim() => existing.clone(),
        _ => UserProfile::new_account(&req.name, &req.email),
    };

    match dashboard.sign_in(profile) {
        Ok(profile) => HttpResponse::Ok().json(ApiResponse::success(profile.clone())),
        Err(e) => error_response(&e),
    }
}

/// Sign out and delete the stored profile
async fn sign_out(data: web::Data<Arc<AppState>>) -> impl Responder {
    let mut dashboard = match data.lock() {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    match dashboard.sign_out() {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success("Signed out")),
        Err(e) => error_response(&e),
    }
}

/// Current profile with dashboard stats
async fn get_profile(data: web::Data<Arc<AppState>>) -> impl Responder {
    let dashboard = match data.lock() {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    match (dashboard.profile(), dashboard.stats()) {
        (Some(profile), Some(stats)) => HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({
            "profile": profile,
            "stats": stats,
            "status": dashboard.status(),
        }))),
        _ => error_response(&DashboardError::NoSession),
    }
}

/// The learning path catalog
async fn get_catalog(data: web::Data<Arc<AppState>>) -> impl Responder {
    let dashboard = match data.lock() {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(ApiResponse::success(dashboard.recommender().catalog()))
}

/// Popular goals offered next to the goal input
async fn get_goal_suggestions() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success(SUGGESTED_GOALS))
}

/// Submit goals and generate learning paths.
///
/// The simulated latency runs with the state lock released, so other
/// requests see the dashboard as generating meanwhile.
async fn submit_goals(
    data: web::Data<Arc<AppState>>,
    req: web::Json<SubmitGoalsRequest>,
) -> impl Responder {
    let goals = GoalSet::from_raw(&req.goals);

    let (ticket, recommender, delay) = {
        let mut dashboard = match data.lock() {
            Ok(d) => d,
            Err(resp) => return resp,
        };
        match dashboard.begin_generation(goals) {
            Ok(GenerationStart::Pending(ticket)) => (
                ticket,
                dashboard.recommender().clone(),
                dashboard.config().generation_delay,
            ),
            Ok(GenerationStart::Ignored(reason)) => {
                return HttpResponse::Ok().json(ApiResponse::success(Submission::Ignored { reason }))
            }
            Err(e) => return error_response(&e),
        }
    };

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    let recommendation = recommender.generate(ticket.goals());

    let mut dashboard = match data.lock() {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    match dashboard.commit_generation(ticket, recommendation) {
        Ok(submission) => HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({
            "submission": submission,
            "paths": path_views(dashboard.paths()),
        }))),
        Err(e) => error_response(&e),
    }
}

/// Current learning paths
async fn get_paths(data: web::Data<Arc<AppState>>) -> impl Responder {
    let dashboard = match data.lock() {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    if dashboard.profile().is_none() {
        return error_response(&DashboardError::NoSession);
    }
    HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({
        "status": dashboard.status(),
        "paths": path_views(dashboard.paths()),
    })))
}

/// Start a learning path
async fn start_path(data: web::Data<Arc<AppState>>, path: web::Path<usize>) -> impl Responder {
    let index = path.into_inner();
    let mut dashboard = match data.lock() {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    match dashboard.start_path(index) {
        Ok(transition) => HttpResponse::Ok().json(ApiResponse::success(transition)),
        Err(e) => error_response(&e),
    }
}

/// Advance progress on a learning path
async fn advance_path(
    data: web::Data<Arc<AppState>>,
    path: web::Path<usize>,
    req: web::Json<AdvanceRequest>,
) -> impl Responder {
    let index = path.into_inner();
    let mut dashboard = match data.lock() {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    match dashboard.advance_path(index, req.delta) {
        Ok(transition) => HttpResponse::Ok().json(ApiResponse::success(transition)),
        Err(e) => error_response(&e),
    }
}

/// Activity timeline of the signed-in user
async fn get_activity(
    data: web::Data<Arc<AppState>>,
    query: web::Query<ActivityQuery>,
) -> impl Responder {
    if matches!(query.days, Some(days) if days < 0) {
        return HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("days must not be negative"));
    }

    let user_id = {
        let dashboard = match data.lock() {
            Ok(d) => d,
            Err(resp) => return resp,
        };
        match dashboard.profile() {
            Some(profile) => profile.id.clone(),
            None => return error_response(&DashboardError::NoSession),
        }
    };

    let events = match query.days {
        Some(days) => data.activity.recent(&user_id, days),
        None => data.activity.timeline(&user_id),
    };
    match events {
        Ok(events) => HttpResponse::Ok().json(ApiResponse::success(events)),
        Err(e) => error_response(&DashboardError::Store(e)),
    }
}

// ============================================================
// SERVER CONFIGURATION
// ============================================================

/// Register all routes; shared by the server and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/api/session", web::post().to(sign_in))
        .route("/api/session", web::delete().to(sign_out))
        .route("/api/profile", web::get().to(get_profile))
        .route("/api/catalog", web::get().to(get_catalog))
        .route("/api/goals/suggestions", web::get().to(get_goal_suggestions))
        .route("/api/goals", web::post().to(submit_goals))
        .route("/api/paths", web::get().to(get_paths))
        .route("/api/paths/{index}/start", web::post().to(start_path))
        .route("/api/paths/{index}/advance", web::post().to(advance_path))
        .route("/api/activity", web::get().to(get_activity));
}

/// Configure and run the API server
pub async fn run_server(config: NavigatorConfig) -> std::io::Result<()> {
    let state = Arc::new(AppState::new(&config).map_err(std::io::Error::other)?);

    log::info!(
        "Learning Navigator API starting at http://{}:{}",
        config.host,
        config.port
    );
    log::info!("Storage: {}", config.db_path);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
