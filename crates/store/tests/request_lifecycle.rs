//! Request matching engine tests: creation through project submission,
//! the accept/reject/reassign state machine, and the query helpers.

use assert_matches::assert_matches;
use buildmatch_core::error::CoreError;
use buildmatch_store::models::project::CreateProject;
use buildmatch_store::models::status::{ProjectStatus, RequestStatus};
use buildmatch_store::models::user::{RegisterUser, User};
use buildmatch_store::repositories::{DashboardRepo, ProjectRepo, RequestRepo, UserRepo};
use buildmatch_store::{Store, StoreConfig};

fn open_store(dir: &tempfile::TempDir) -> Store {
    Store::open(&StoreConfig::new(dir.path().join("store"))).unwrap()
}

fn register_client(store: &mut Store, name: &str) -> User {
    UserRepo::register(
        store,
        &RegisterUser {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password: "secret123".to_string(),
            role: "client".to_string(),
            ..Default::default()
        },
    )
    .unwrap()
}

fn register_engineer(store: &mut Store, name: &str) -> User {
    UserRepo::register(
        store,
        &RegisterUser {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password: "secret123".to_string(),
            role: "engineer".to_string(),
            experience: "5".to_string(),
            ..Default::default()
        },
    )
    .unwrap()
}

fn dream_house(engineer_id: i64) -> CreateProject {
    CreateProject {
        project_name: "Dream House".to_string(),
        project_type: "residential".to_string(),
        building_size: "2500".to_string(),
        budget: "350000".to_string(),
        timeline: "12 months".to_string(),
        selected_engineer: Some(engineer_id.to_string()),
        ..Default::default()
    }
}

#[test]
fn submitting_a_project_creates_a_pending_request() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let client = register_client(&mut store, "amira");
    let engineer = register_engineer(&mut store, "omar");

    let (project, request) =
        ProjectRepo::create(&mut store, client.id, &dream_house(engineer.id)).unwrap();

    assert_eq!(project.status, ProjectStatus::Pending);
    assert_eq!(project.assigned_engineer, Some(engineer.id));
    assert_eq!(project.building_size, 2500);
    assert_eq!(project.budget, 350_000);

    assert_eq!(request.project_id, project.id);
    assert_eq!(request.engineer_id, engineer.id);
    assert_eq!(request.client_id, client.id);
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.message, "New project request: Dream House");

    let listed = ProjectRepo::list_for_client(&store, client.id).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, project.id);
}

#[test]
fn numeric_specs_coerce_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let client = register_client(&mut store, "amira");
    let engineer = register_engineer(&mut store, "omar");

    let mut input = dream_house(engineer.id);
    input.building_size = "large".to_string();
    input.floors_count = String::new();
    input.budget = "12.5".to_string();

    let (project, _) = ProjectRepo::create(&mut store, client.id, &input).unwrap();
    assert_eq!(project.building_size, 0);
    assert_eq!(project.floors_count, 1);
    assert_eq!(project.budget, 0);
}

#[test]
fn project_without_selected_engineer_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let client = register_client(&mut store, "amira");

    let mut input = dream_house(0);
    input.selected_engineer = None;
    assert_matches!(
        ProjectRepo::create(&mut store, client.id, &input),
        Err(CoreError::Validation(_))
    );

    input.selected_engineer = Some("  ".to_string());
    assert_matches!(
        ProjectRepo::create(&mut store, client.id, &input),
        Err(CoreError::Validation(_))
    );

    assert!(ProjectRepo::list_for_client(&store, client.id)
        .unwrap()
        .is_empty());
}

#[test]
fn unknown_engineer_aborts_without_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let client = register_client(&mut store, "amira");

    let result = ProjectRepo::create(&mut store, client.id, &dream_house(424242));
    assert_matches!(result, Err(CoreError::NotFound { entity: "engineer", .. }));

    // The failed lookup never reached the document.
    assert!(ProjectRepo::list_for_client(&store, client.id)
        .unwrap()
        .is_empty());
    assert!(store.document().project_requests.is_empty());
}

#[test]
fn reject_then_reassign_runs_the_full_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let client = register_client(&mut store, "amira");
    let e1 = register_engineer(&mut store, "omar");
    let e2 = register_engineer(&mut store, "sami");

    let (project, request) =
        ProjectRepo::create(&mut store, client.id, &dream_house(e1.id)).unwrap();

    let rejected = RequestRepo::reject(&mut store, request.id).unwrap();
    assert_eq!(rejected.status, RequestStatus::Rejected);
    assert!(rejected.rejected_at.is_some());

    let reassigned = RequestRepo::reassign(&mut store, request.id, e2.id).unwrap();
    assert_eq!(reassigned.status, RequestStatus::Pending);
    assert_eq!(reassigned.engineer_id, e2.id);
    assert_eq!(reassigned.engineer_name, "sami");
    assert_eq!(reassigned.rejected_by.as_deref(), Some("omar"));
    assert!(reassigned.rejected_at.is_none());

    // The project/client snapshot is untouched by reassignment.
    assert_eq!(reassigned.project_id, project.id);
    assert_eq!(reassigned.client_id, client.id);
    assert_eq!(reassigned.project_name, "Dream House");
}

#[test]
fn accept_stamps_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let client = register_client(&mut store, "amira");
    let engineer = register_engineer(&mut store, "omar");
    let (_, request) = ProjectRepo::create(&mut store, client.id, &dream_house(engineer.id)).unwrap();

    let first = RequestRepo::accept(&mut store, request.id).unwrap();
    assert_eq!(first.status, RequestStatus::Accepted);
    let stamp = first.accepted_at.expect("acceptedAt stamped");

    // A second accept is a no-op: same state, same timestamp.
    let second = RequestRepo::accept(&mut store, request.id).unwrap();
    assert_eq!(second.status, RequestStatus::Accepted);
    assert_eq!(second.accepted_at, Some(stamp));
}

#[test]
fn accepting_a_rejected_request_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let client = register_client(&mut store, "amira");
    let engineer = register_engineer(&mut store, "omar");
    let (_, request) = ProjectRepo::create(&mut store, client.id, &dream_house(engineer.id)).unwrap();

    RequestRepo::reject(&mut store, request.id).unwrap();
    assert_matches!(
        RequestRepo::accept(&mut store, request.id),
        Err(CoreError::Conflict(_))
    );
}

#[test]
fn at_most_one_accepted_request_per_project() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let client = register_client(&mut store, "amira");
    let e1 = register_engineer(&mut store, "omar");
    let e2 = register_engineer(&mut store, "sami");

    let (project, first) =
        ProjectRepo::create(&mut store, client.id, &dream_house(e1.id)).unwrap();
    let second =
        RequestRepo::create_for_project(&mut store, client.id, project.id, e2.id, None).unwrap();

    RequestRepo::accept(&mut store, first.id).unwrap();
    assert_matches!(
        RequestRepo::accept(&mut store, second.id),
        Err(CoreError::Conflict(_))
    );
}

#[test]
fn reject_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let client = register_client(&mut store, "amira");
    let engineer = register_engineer(&mut store, "omar");
    let (_, request) = ProjectRepo::create(&mut store, client.id, &dream_house(engineer.id)).unwrap();

    let first = RequestRepo::reject(&mut store, request.id).unwrap();
    let stamp = first.rejected_at.expect("rejectedAt stamped");
    let second = RequestRepo::reject(&mut store, request.id).unwrap();
    assert_eq!(second.rejected_at, Some(stamp));
}

#[test]
fn reassign_to_the_rejecting_engineer_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let client = register_client(&mut store, "amira");
    let engineer = register_engineer(&mut store, "omar");
    let (_, request) = ProjectRepo::create(&mut store, client.id, &dream_house(engineer.id)).unwrap();
    RequestRepo::reject(&mut store, request.id).unwrap();

    assert_matches!(
        RequestRepo::reassign(&mut store, request.id, engineer.id),
        Err(CoreError::Validation(_))
    );
}

#[test]
fn rejecting_an_accepted_request_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let client = register_client(&mut store, "amira");
    let engineer = register_engineer(&mut store, "omar");
    let (_, request) = ProjectRepo::create(&mut store, client.id, &dream_house(engineer.id)).unwrap();

    RequestRepo::accept(&mut store, request.id).unwrap();
    assert_matches!(
        RequestRepo::reject(&mut store, request.id),
        Err(CoreError::Conflict(_))
    );
}

#[test]
fn reassign_requires_a_rejected_request() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let client = register_client(&mut store, "amira");
    let e1 = register_engineer(&mut store, "omar");
    let e2 = register_engineer(&mut store, "sami");
    let (_, request) = ProjectRepo::create(&mut store, client.id, &dream_house(e1.id)).unwrap();

    // Still pending: not reassignable.
    assert_matches!(
        RequestRepo::reassign(&mut store, request.id, e2.id),
        Err(CoreError::Conflict(_))
    );
}

#[test]
fn reassign_to_unknown_engineer_leaves_request_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let client = register_client(&mut store, "amira");
    let engineer = register_engineer(&mut store, "omar");
    let (_, request) = ProjectRepo::create(&mut store, client.id, &dream_house(engineer.id)).unwrap();
    RequestRepo::reject(&mut store, request.id).unwrap();

    assert_matches!(
        RequestRepo::reassign(&mut store, request.id, 424242),
        Err(CoreError::NotFound { entity: "engineer", .. })
    );
    let current = RequestRepo::find(&store, request.id).unwrap();
    assert_eq!(current.status, RequestStatus::Rejected);
    assert_eq!(current.engineer_id, engineer.id);
}

#[test]
fn unknown_request_ids_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);

    assert_matches!(
        RequestRepo::accept(&mut store, 7),
        Err(CoreError::NotFound { entity: "request", .. })
    );
    assert_matches!(
        RequestRepo::reject(&mut store, 7),
        Err(CoreError::NotFound { entity: "request", .. })
    );
    assert_matches!(
        RequestRepo::reassign(&mut store, 7, 8),
        Err(CoreError::NotFound { entity: "request", .. })
    );
}

#[test]
fn query_helpers_scan_the_global_collection() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let client = register_client(&mut store, "amira");
    let e1 = register_engineer(&mut store, "omar");
    let e2 = register_engineer(&mut store, "sami");

    let (p1, r1) = ProjectRepo::create(&mut store, client.id, &dream_house(e1.id)).unwrap();
    let mut second = dream_house(e2.id);
    second.project_name = "Office Block".to_string();
    let (_p2, r2) = ProjectRepo::create(&mut store, client.id, &second).unwrap();

    assert_eq!(RequestRepo::for_client(&store, client.id).len(), 2);
    assert_eq!(RequestRepo::for_engineer(&store, e1.id).len(), 1);
    assert_eq!(RequestRepo::pending_count_for_engineer(&store, e2.id), 1);

    assert!(!RequestRepo::has_accepted(&store, p1.id, client.id));
    RequestRepo::accept(&mut store, r1.id).unwrap();
    assert!(RequestRepo::has_accepted(&store, p1.id, client.id));
    assert_eq!(
        RequestRepo::accepted_request_id(&store, p1.id, client.id),
        Some(r1.id)
    );

    RequestRepo::reject(&mut store, r2.id).unwrap();
    let rejected = RequestRepo::list_rejected(&store);
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].id, r2.id);
}

#[test]
fn admin_overview_counts_users_and_requests() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let client = register_client(&mut store, "amira");
    let e1 = register_engineer(&mut store, "omar");
    let e2 = register_engineer(&mut store, "sami");

    let (_, r1) = ProjectRepo::create(&mut store, client.id, &dream_house(e1.id)).unwrap();
    let mut second = dream_house(e2.id);
    second.project_name = "Office Block".to_string();
    let (_, r2) = ProjectRepo::create(&mut store, client.id, &second).unwrap();
    RequestRepo::accept(&mut store, r1.id).unwrap();
    RequestRepo::reject(&mut store, r2.id).unwrap();

    let overview = DashboardRepo::overview(&store);
    assert_eq!(overview.total_engineers, 2);
    assert_eq!(overview.total_clients, 1);
    assert_eq!(overview.total_registered_users, 3);
    assert_eq!(overview.accepted_projects, 1);
    assert_eq!(overview.pending_requests, 0);
    assert_eq!(overview.rejected_projects, 1);
}
