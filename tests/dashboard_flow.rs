use learning_navigator::{
    recommend, ActivityLog, Dashboard, DashboardConfig, GoalSet, KeyValueStore,
    PathRecommender, PathState, ProfileStore, RecordingSink, SqliteKv, Submission,
    Transition, UserProfile, default_catalog, PROFILE_KEY,
};
use std::sync::Arc;
use std::time::Duration;

fn dashboard_over(kv: Arc<dyn KeyValueStore>) -> (Dashboard, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let dashboard = Dashboard::new(
        ProfileStore::new(kv),
        PathRecommender::default(),
        Arc::new(ActivityLog::in_memory().unwrap()),
        sink.clone(),
        DashboardConfig {
            generation_delay: Duration::ZERO,
            hours_per_week: 10,
        },
    );
    (dashboard, sink)
}

#[test]
fn test_scenario_a_empty_store_has_no_profile() {
    let store = ProfileStore::new(Arc::new(SqliteKv::in_memory().unwrap()));
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn test_scenario_b_one_goal_two_paths() {
    let goals = GoalSet::new().add("Learn React");
    let paths = recommend(&goals, &default_catalog());

    let titles: Vec<&str> = paths.iter().map(|p| p.title()).collect();
    assert_eq!(
        titles,
        vec!["Frontend Development Mastery", "AI & Machine Learning Fundamentals"]
    );
    assert!(paths.iter().all(|p| p.progress() == 0));
}

#[test]
fn test_scenario_c_four_goals_whole_catalog() {
    let goals = GoalSet::from_raw(["A", "B", "C", "D"]);
    let catalog = default_catalog();
    let paths = recommend(&goals, &catalog);

    assert_eq!(paths.len(), catalog.len());
    for (path, template) in paths.iter().zip(&catalog) {
        assert_eq!(path.template(), template);
    }
}

#[test]
fn test_scenario_d_start_and_complete() {
    let mut path = recommend(&GoalSet::new(), &default_catalog()).remove(0);
    path.start().unwrap();
    assert_eq!(path.advance(100), Ok(Transition::Completed { from: 0 }));
    assert_eq!(path.state(), PathState::Completed);
    assert_eq!(path.advance(1), Ok(Transition::Unchanged));
    assert_eq!(path.progress(), 100);
}

#[test]
fn test_scenario_e_clear_after_save() {
    let store = ProfileStore::new(Arc::new(SqliteKv::in_memory().unwrap()));
    let mut profile = UserProfile::new_account("Ada", "ada@example.com");
    profile.learning_goals = GoalSet::from_raw(["A", "B"]);

    store.save(&profile).unwrap();
    assert_eq!(store.load().unwrap(), Some(profile));
    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[actix_rt::test]
async fn test_session_survives_restart_on_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("navigator.db");

    {
        let (mut dashboard, sink) = dashboard_over(Arc::new(SqliteKv::open(&path).unwrap()));
        dashboard
            .sign_in(UserProfile::new_account("Ada", "ada@example.com"))
            .unwrap();
        let outcome = dashboard
            .submit_goals(GoalSet::from_raw(["Learn React", "Learn SQL"]))
            .await
            .unwrap();
        assert_eq!(outcome, Submission::Generated { count: 3 });
        assert_eq!(sink.received().len(), 1);
    }

    // A fresh process restores the paths from the stored goals without a submission
    let (mut dashboard, sink) = dashboard_over(Arc::new(SqliteKv::open(&path).unwrap()));
    let profile = dashboard.open().unwrap().cloned().unwrap();
    assert_eq!(profile.learning_goals.len(), 2);
    assert_eq!(dashboard.paths().len(), 3);
    assert!(sink.received().is_empty());
}

#[test]
fn test_corrupt_profile_routes_to_sign_in() {
    let kv = Arc::new(SqliteKv::in_memory().unwrap());
    kv.set(PROFILE_KEY, "definitely not json").unwrap();

    let (mut dashboard, _) = dashboard_over(kv.clone());
    assert!(dashboard.open().unwrap().is_none());
    assert_eq!(kv.get(PROFILE_KEY).unwrap(), None);
}
