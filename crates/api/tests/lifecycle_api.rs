//! End-to-end lifecycle tests: request intake, conversion, proposal,
//! approval, updates, and change requests.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_empty, post_json, seed_admin, seed_client};
use sqlx::PgPool;

/// Walk the whole happy path a new commission takes: request, convert,
/// propose, approve, milestones, update with milestone completion.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_full_commission_lifecycle(pool: PgPool) {
    let (client_id, client_token) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;

    // Client submits a request.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/requests",
        &client_token,
        serde_json::json!({
            "title": "Fence installation for family compound",
            "description": "Perimeter fence around the plot in Thies",
            "budget_range": "$2000-$3000",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let request = body_json(response).await;
    assert_eq!(request["status"], "pending");
    let request_id = request["id"].as_i64().unwrap();

    // The client is notified that the request was received.
    let app = common::build_test_app(pool.clone());
    let notifications = body_json(get(app, "/api/v1/notifications", &client_token).await).await;
    assert_eq!(notifications[0]["title"], "Project Request Received");
    assert_eq!(notifications[0]["type"], "info");

    // Admin converts the request into a draft project.
    let app = common::build_test_app(pool.clone());
    let response = post_empty(
        app,
        &format!("/api/v1/requests/{request_id}/convert"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let project = body_json(response).await;
    assert_eq!(project["status"], "draft");
    assert_eq!(project["client_id"], client_id);
    assert_eq!(project["title"], "Fence installation for family compound");
    let project_id = project["id"].as_i64().unwrap();

    // Admin publishes the proposal.
    let app = common::build_test_app(pool.clone());
    let response = post_empty(
        app,
        &format!("/api/v1/projects/{project_id}/submit-proposal"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "proposal_ready");

    // The client is asked to review.
    let app = common::build_test_app(pool.clone());
    let notifications = body_json(get(app, "/api/v1/notifications", &client_token).await).await;
    assert_eq!(notifications[0]["title"], "Proposal Ready for Review");
    assert_eq!(notifications[0]["type"], "action_required");

    // Client approves; work starts and start_date is stamped.
    let app = common::build_test_app(pool.clone());
    let response = post_empty(
        app,
        &format!("/api/v1/projects/{project_id}/approve"),
        &client_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let approved = body_json(response).await;
    assert_eq!(approved["status"], "in_progress");
    assert!(approved["start_date"].is_string());

    // Admin lays out four milestones.
    for title in ["Survey", "Posts", "Panels", "Gate"] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            &format!("/api/v1/projects/{project_id}/milestones"),
            &admin_token,
            serde_json::json!({ "title": title }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Fresh project: progress is 0.
    let app = common::build_test_app(pool.clone());
    let detail = body_json(get(app, &format!("/api/v1/projects/{project_id}"), &client_token).await)
        .await;
    assert_eq!(detail["progress"], 0);
    assert_eq!(detail["milestones"].as_array().unwrap().len(), 4);
    let first_milestone_id = detail["milestones"][0]["id"].as_i64().unwrap();

    // Staff post an update completing the first milestone.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/updates"),
        &admin_token,
        serde_json::json!({
            "content": "Survey finished, marking out post holes tomorrow",
            "milestone_id": first_milestone_id,
            "milestone_status": "completed",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // 1 of 4 milestones completed: progress is 25.
    let app = common::build_test_app(pool.clone());
    let detail = body_json(get(app, &format!("/api/v1/projects/{project_id}"), &client_token).await)
        .await;
    assert_eq!(detail["progress"], 25);

    // The client was notified about the staff update.
    let app = common::build_test_app(pool);
    let notifications = body_json(get(app, "/api/v1/notifications", &client_token).await).await;
    assert_eq!(notifications[0]["title"], "New Project Update");
    let message = notifications[0]["message"].as_str().unwrap();
    assert!(message.contains("Survey finished"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_convert_twice_returns_409(pool: PgPool) {
    let (_, client_token) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone());
    let request = body_json(
        post_json(
            app,
            "/api/v1/requests",
            &client_token,
            serde_json::json!({"title": "Well", "description": "Borehole well"}),
        )
        .await,
    )
    .await;
    let request_id = request["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let first = post_empty(
        app,
        &format!("/api/v1/requests/{request_id}/convert"),
        &admin_token,
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let second = post_empty(
        app,
        &format!("/api/v1/requests/{request_id}/convert"),
        &admin_token,
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    // Exactly one project exists for the request's client.
    let app = common::build_test_app(pool);
    let projects = body_json(get(app, "/api/v1/projects", &client_token).await).await;
    assert_eq!(projects.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reject_request_is_terminal(pool: PgPool) {
    let (_, client_token) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone());
    let request = body_json(
        post_json(
            app,
            "/api/v1/requests",
            &client_token,
            serde_json::json!({"title": "Shed", "description": "Tool shed"}),
        )
        .await,
    )
    .await;
    let request_id = request["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let rejected = post_empty(
        app,
        &format!("/api/v1/requests/{request_id}/reject"),
        &admin_token,
    )
    .await;
    assert_eq!(rejected.status(), StatusCode::NO_CONTENT);

    // Converting a rejected request is a conflict.
    let app = common::build_test_app(pool);
    let converted = post_empty(
        app,
        &format!("/api/v1/requests/{request_id}/convert"),
        &admin_token,
    )
    .await;
    assert_eq!(converted.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_approve_by_non_owner_returns_401_without_mutation(pool: PgPool) {
    let (_, client_token) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;
    let (_, other_token) = common::seed_user(&pool, "client", "other@example.com").await;

    let project_id = seed_proposal_ready_project(&pool, &client_token, &admin_token).await;

    // A different client cannot approve.
    let app = common::build_test_app(pool.clone());
    let response = post_empty(
        app,
        &format!("/api/v1/projects/{project_id}/approve"),
        &other_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Neither can the admin: approval belongs to the owning client.
    let app = common::build_test_app(pool.clone());
    let response = post_empty(
        app,
        &format!("/api/v1/projects/{project_id}/approve"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Status is untouched.
    let app = common::build_test_app(pool);
    let detail = body_json(get(app, &format!("/api/v1/projects/{project_id}"), &admin_token).await)
        .await;
    assert_eq!(detail["status"], "proposal_ready");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_approve_already_in_progress_is_noop(pool: PgPool) {
    let (_, client_token) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;

    let project_id = seed_proposal_ready_project(&pool, &client_token, &admin_token).await;

    let app = common::build_test_app(pool.clone());
    let first = post_empty(
        app,
        &format!("/api/v1/projects/{project_id}/approve"),
        &client_token,
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let second = post_empty(
        app,
        &format!("/api/v1/projects/{project_id}/approve"),
        &client_token,
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_json(second).await["status"], "in_progress");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_proposal_is_idempotent_from_proposal_ready(pool: PgPool) {
    let (_, client_token) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;

    let project_id = seed_proposal_ready_project(&pool, &client_token, &admin_token).await;

    let app = common::build_test_app(pool);
    let again = post_empty(
        app,
        &format!("/api/v1/projects/{project_id}/submit-proposal"),
        &admin_token,
    )
    .await;
    assert_eq!(again.status(), StatusCode::OK);
    assert_eq!(body_json(again).await["status"], "proposal_ready");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_manual_status_transitions_are_guarded(pool: PgPool) {
    let (client_id, _) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;

    // Admin creates a draft project directly.
    let app = common::build_test_app(pool.clone());
    let project = body_json(
        post_json(
            app,
            "/api/v1/projects",
            &admin_token,
            serde_json::json!({"client_id": client_id, "title": "Warehouse"}),
        )
        .await,
    )
    .await;
    let project_id = project["id"].as_i64().unwrap();

    // Completing a draft project is a conflict (no work started).
    let app = common::build_test_app(pool.clone());
    let completed = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/status"),
        &admin_token,
        serde_json::json!({"status": "completed"}),
    )
    .await;
    assert_eq!(completed.status(), StatusCode::CONFLICT);

    // Setting a status outside the manual set is rejected outright.
    let app = common::build_test_app(pool.clone());
    let direct = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/status"),
        &admin_token,
        serde_json::json!({"status": "in_progress"}),
    )
    .await;
    assert_eq!(direct.status(), StatusCode::BAD_REQUEST);

    // Cancelling a draft is fine, and cancellation is absorbing.
    let app = common::build_test_app(pool.clone());
    let cancelled = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/status"),
        &admin_token,
        serde_json::json!({"status": "cancelled"}),
    )
    .await;
    assert_eq!(cancelled.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let held = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/status"),
        &admin_token,
        serde_json::json!({"status": "on_hold"}),
    )
    .await;
    assert_eq!(held.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_client_update_does_not_notify_self(pool: PgPool) {
    let (client_id, client_token) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone());
    let project = body_json(
        post_json(
            app,
            "/api/v1/projects",
            &admin_token,
            serde_json::json!({"client_id": client_id, "title": "Garden"}),
        )
        .await,
    )
    .await;
    let project_id = project["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/updates"),
        &client_token,
        serde_json::json!({"content": "Sent reference photos"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let notifications = body_json(get(app, "/api/v1/notifications", &client_token).await).await;
    assert!(notifications.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_long_update_content_is_truncated_in_notification(pool: PgPool) {
    let (client_id, client_token) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone());
    let project = body_json(
        post_json(
            app,
            "/api/v1/projects",
            &admin_token,
            serde_json::json!({"client_id": client_id, "title": "Clinic"}),
        )
        .await,
    )
    .await;
    let project_id = project["id"].as_i64().unwrap();

    let long_content = "a".repeat(120);
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        &format!("/api/v1/projects/{project_id}/updates"),
        &admin_token,
        serde_json::json!({"content": long_content}),
    )
    .await;

    let app = common::build_test_app(pool);
    let notifications = body_json(get(app, "/api/v1/notifications", &client_token).await).await;
    let message = notifications[0]["message"].as_str().unwrap();
    assert!(message.ends_with("..."));
    assert!(message.contains(&"a".repeat(50)));
    assert!(!message.contains(&"a".repeat(51)));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_update_content_returns_400(pool: PgPool) {
    let (client_id, _) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone());
    let project = body_json(
        post_json(
            app,
            "/api/v1/projects",
            &admin_token,
            serde_json::json!({"client_id": client_id, "title": "Kiosk"}),
        )
        .await,
    )
    .await;
    let project_id = project["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/updates"),
        &admin_token,
        serde_json::json!({"content": "   "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

/// The update itself and the tagged milestone change must both land
/// even when notification delivery is broken mid-flight.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_survives_notification_failure(pool: PgPool) {
    let (client_id, client_token) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone());
    let project = body_json(
        post_json(
            app,
            "/api/v1/projects",
            &admin_token,
            serde_json::json!({"client_id": client_id, "title": "Granary"}),
        )
        .await,
    )
    .await;
    let project_id = project["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let milestone = body_json(
        post_json(
            app,
            &format!("/api/v1/projects/{project_id}/milestones"),
            &admin_token,
            serde_json::json!({"title": "Foundation"}),
        )
        .await,
    )
    .await;
    let milestone_id = milestone["id"].as_i64().unwrap();

    // Break notification storage; the insert inside the notifier now
    // fails on every call.
    sqlx::query("DROP TABLE notifications")
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/updates"),
        &admin_token,
        serde_json::json!({
            "content": "Foundation poured and curing",
            "milestone_id": milestone_id,
            "milestone_status": "completed",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The update row exists and the milestone change was applied.
    let app = common::build_test_app(pool.clone());
    let updates = body_json(
        get(
            app,
            &format!("/api/v1/projects/{project_id}/updates"),
            &client_token,
        )
        .await,
    )
    .await;
    assert_eq!(updates.as_array().unwrap().len(), 1);
    assert_eq!(updates[0]["content"], "Foundation poured and curing");

    let app = common::build_test_app(pool);
    let detail =
        body_json(get(app, &format!("/api/v1/projects/{project_id}"), &admin_token).await).await;
    assert_eq!(detail["milestones"][0]["status"], "completed");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_with_unknown_milestone_returns_404(pool: PgPool) {
    let (client_id, _) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone());
    let project = body_json(
        post_json(
            app,
            "/api/v1/projects",
            &admin_token,
            serde_json::json!({"client_id": client_id, "title": "Granary"}),
        )
        .await,
    )
    .await;
    let project_id = project["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/updates"),
        &admin_token,
        serde_json::json!({
            "content": "Tagging a milestone that does not exist",
            "milestone_id": 999999,
            "milestone_status": "completed",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The update was not inserted.
    let app = common::build_test_app(pool);
    let updates = body_json(
        get(
            app,
            &format!("/api/v1/projects/{project_id}/updates"),
            &admin_token,
        )
        .await,
    )
    .await;
    assert!(updates.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_rejects_milestone_from_other_project(pool: PgPool) {
    let (client_id, _) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;

    let mut project_ids = Vec::new();
    for title in ["Granary", "Stable"] {
        let app = common::build_test_app(pool.clone());
        let project = body_json(
            post_json(
                app,
                "/api/v1/projects",
                &admin_token,
                serde_json::json!({"client_id": client_id, "title": title}),
            )
            .await,
        )
        .await;
        project_ids.push(project["id"].as_i64().unwrap());
    }

    let app = common::build_test_app(pool.clone());
    let milestone = body_json(
        post_json(
            app,
            &format!("/api/v1/projects/{}/milestones", project_ids[1]),
            &admin_token,
            serde_json::json!({"title": "Roof"}),
        )
        .await,
    )
    .await;
    let foreign_milestone_id = milestone["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/projects/{}/updates", project_ids[0]),
        &admin_token,
        serde_json::json!({
            "content": "Wrong milestone tag",
            "milestone_id": foreign_milestone_id,
            "milestone_status": "completed",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_resolve_change_request_is_idempotent(pool: PgPool) {
    let (client_id, client_token) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone());
    let project = body_json(
        post_json(
            app,
            "/api/v1/projects",
            &admin_token,
            serde_json::json!({"client_id": client_id, "title": "Fence"}),
        )
        .await,
    )
    .await;
    let project_id = project["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let change = body_json(
        post_json(
            app,
            &format!("/api/v1/projects/{project_id}/changes"),
            &client_token,
            serde_json::json!({"content": "Please use metal posts instead of wood"}),
        )
        .await,
    )
    .await;
    assert_eq!(change["status"], "pending");
    let change_id = change["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let first = post_empty(
        app,
        &format!("/api/v1/changes/{change_id}/resolve"),
        &admin_token,
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body_json(first).await["status"], "approved");

    let app = common::build_test_app(pool);
    let second = post_empty(
        app,
        &format!("/api/v1/changes/{change_id}/resolve"),
        &admin_token,
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_json(second).await["status"], "approved");
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Submit a request as the client, convert it, and publish the
/// proposal. Returns the project id, left in `proposal_ready`.
async fn seed_proposal_ready_project(
    pool: &PgPool,
    client_token: &str,
    admin_token: &str,
) -> i64 {
    let app = common::build_test_app(pool.clone());
    let request = body_json(
        post_json(
            app,
            "/api/v1/requests",
            client_token,
            serde_json::json!({"title": "School block", "description": "Two classrooms"}),
        )
        .await,
    )
    .await;
    let request_id = request["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let project = body_json(
        post_empty(
            app,
            &format!("/api/v1/requests/{request_id}/convert"),
            admin_token,
        )
        .await,
    )
    .await;
    let project_id = project["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_empty(
        app,
        &format!("/api/v1/projects/{project_id}/submit-proposal"),
        admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    project_id
}
