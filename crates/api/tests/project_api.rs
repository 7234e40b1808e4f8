//! Integration tests for project access control, detail views,
//! milestones, comments, dashboards, and search.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, put_json, seed_admin, seed_client, seed_user};
use sqlx::PgPool;

async fn seed_project(pool: &PgPool, admin_token: &str, client_id: i64, title: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let project = body_json(
        post_json(
            app,
            "/api/v1/projects",
            admin_token,
            serde_json::json!({"client_id": client_id, "title": title}),
        )
        .await,
    )
    .await;
    project["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_client_sees_only_own_projects(pool: PgPool) {
    let (client_id, client_token) = seed_client(&pool).await;
    let (other_id, _) = seed_user(&pool, "client", "other@example.com").await;
    let (_, admin_token) = seed_admin(&pool).await;

    seed_project(&pool, &admin_token, client_id, "Mine").await;
    seed_project(&pool, &admin_token, other_id, "Theirs").await;

    let app = common::build_test_app(pool.clone());
    let own = body_json(get(app, "/api/v1/projects", &client_token).await).await;
    assert_eq!(own.as_array().unwrap().len(), 1);
    assert_eq!(own[0]["title"], "Mine");

    // Admin sees both, with client contact info joined in.
    let app = common::build_test_app(pool);
    let all = body_json(get(app, "/api/v1/projects", &admin_token).await).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert!(all[0]["client_name"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_client_cannot_read_foreign_project(pool: PgPool) {
    let (_, client_token) = seed_client(&pool).await;
    let (other_id, _) = seed_user(&pool, "client", "other@example.com").await;
    let (_, admin_token) = seed_admin(&pool).await;

    let project_id = seed_project(&pool, &admin_token, other_id, "Theirs").await;

    let app = common::build_test_app(pool.clone());
    let detail = get(app, &format!("/api/v1/projects/{project_id}"), &client_token).await;
    assert_eq!(detail.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let updates = get(
        app,
        &format!("/api/v1/projects/{project_id}/updates"),
        &client_token,
    )
    .await;
    assert_eq!(updates.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_list_filters_by_status(pool: PgPool) {
    let (client_id, _) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;

    seed_project(&pool, &admin_token, client_id, "Alpha").await;
    seed_project(&pool, &admin_token, client_id, "Beta").await;

    let app = common::build_test_app(pool.clone());
    let drafts = body_json(get(app, "/api/v1/projects?status=draft", &admin_token).await).await;
    assert_eq!(drafts.as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool.clone());
    let done = body_json(get(app, "/api/v1/projects?status=completed", &admin_token).await).await;
    assert!(done.as_array().unwrap().is_empty());

    let app = common::build_test_app(pool);
    let bad = get(app, "/api/v1/projects?status=bogus", &admin_token).await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_milestones_ordered_by_due_date(pool: PgPool) {
    let (client_id, _) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;
    let project_id = seed_project(&pool, &admin_token, client_id, "Fence").await;

    // Created out of order; undated last.
    for (title, due) in [
        ("Undated", None),
        ("Second", Some("2026-09-15")),
        ("First", Some("2026-09-01")),
    ] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            &format!("/api/v1/projects/{project_id}/milestones"),
            &admin_token,
            serde_json::json!({"title": title, "due_date": due}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool);
    let detail =
        body_json(get(app, &format!("/api/v1/projects/{project_id}"), &admin_token).await).await;
    let titles: Vec<_> = detail["milestones"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Undated"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_milestone_update_and_status(pool: PgPool) {
    let (client_id, _) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;
    let project_id = seed_project(&pool, &admin_token, client_id, "Fence").await;

    let app = common::build_test_app(pool.clone());
    let milestone = body_json(
        post_json(
            app,
            &format!("/api/v1/projects/{project_id}/milestones"),
            &admin_token,
            serde_json::json!({"title": "Posts"}),
        )
        .await,
    )
    .await;
    assert_eq!(milestone["status"], "pending");
    let milestone_id = milestone["id"].as_i64().unwrap();

    // Partial update leaves unset fields alone.
    let app = common::build_test_app(pool.clone());
    let updated = body_json(
        put_json(
            app,
            &format!("/api/v1/milestones/{milestone_id}"),
            &admin_token,
            serde_json::json!({"description": "Concrete-set posts"}),
        )
        .await,
    )
    .await;
    assert_eq!(updated["title"], "Posts");
    assert_eq!(updated["description"], "Concrete-set posts");

    // Status can move freely between the three states.
    let app = common::build_test_app(pool.clone());
    let in_progress = body_json(
        post_json(
            app,
            &format!("/api/v1/milestones/{milestone_id}/status"),
            &admin_token,
            serde_json::json!({"status": "in_progress"}),
        )
        .await,
    )
    .await;
    assert_eq!(in_progress["status"], "in_progress");

    let app = common::build_test_app(pool);
    let missing = post_json(
        app,
        "/api/v1/milestones/999999/status",
        &admin_token,
        serde_json::json!({"status": "completed"}),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_comment_thread_round_trip(pool: PgPool) {
    let (client_id, client_token) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;
    let project_id = seed_project(&pool, &admin_token, client_id, "Fence").await;

    let app = common::build_test_app(pool.clone());
    let update = body_json(
        post_json(
            app,
            &format!("/api/v1/projects/{project_id}/updates"),
            &admin_token,
            serde_json::json!({"content": "Posts are in"}),
        )
        .await,
    )
    .await;
    let update_id = update["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/updates/{update_id}/comments"),
        &client_token,
        serde_json::json!({"content": "Looks great, thank you"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        &format!("/api/v1/updates/{update_id}/comments"),
        &admin_token,
        serde_json::json!({"content": "Panels go up Friday"}),
    )
    .await;

    // Oldest first, with author names joined in.
    let app = common::build_test_app(pool.clone());
    let comments = body_json(
        get(
            app,
            &format!("/api/v1/updates/{update_id}/comments"),
            &client_token,
        )
        .await,
    )
    .await;
    assert_eq!(comments.as_array().unwrap().len(), 2);
    assert_eq!(comments[0]["content"], "Looks great, thank you");
    assert!(comments[0]["author_name"].is_string());

    let app = common::build_test_app(pool);
    let missing = get(app, "/api/v1/updates/999999/comments", &client_token).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_dashboard_counts(pool: PgPool) {
    let (client_id, client_token) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;

    seed_project(&pool, &admin_token, client_id, "Alpha").await;
    seed_project(&pool, &admin_token, client_id, "Beta").await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/requests",
        &client_token,
        serde_json::json!({"title": "Well", "description": "Borehole"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let dashboard = body_json(get(app, "/api/v1/admin/dashboard", &admin_token).await).await;
    assert_eq!(dashboard["projects"]["total"], 2);
    assert_eq!(dashboard["projects"]["draft"], 2);
    assert_eq!(dashboard["projects"]["in_progress"], 0);
    assert_eq!(dashboard["pending_requests"], 1);
    assert_eq!(dashboard["pending_change_requests"], 0);
    assert_eq!(dashboard["clients"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_client_dashboard_counts(pool: PgPool) {
    let (client_id, client_token) = seed_client(&pool).await;
    let (other_id, _) = seed_user(&pool, "client", "other@example.com").await;
    let (_, admin_token) = seed_admin(&pool).await;

    seed_project(&pool, &admin_token, client_id, "Mine").await;
    seed_project(&pool, &admin_token, other_id, "Theirs").await;

    let app = common::build_test_app(pool);
    let dashboard = body_json(get(app, "/api/v1/dashboard", &client_token).await).await;
    assert_eq!(dashboard["projects"], 1);
    assert_eq!(dashboard["in_progress"], 0);
    assert_eq!(dashboard["completed"], 0);
    assert_eq!(dashboard["recent_notifications"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_search(pool: PgPool) {
    let (client_id, _) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;

    seed_project(&pool, &admin_token, client_id, "Fence installation").await;
    seed_project(&pool, &admin_token, client_id, "Well drilling").await;

    let app = common::build_test_app(pool.clone());
    let results = body_json(get(app, "/api/v1/admin/search?q=fence", &admin_token).await).await;
    assert_eq!(results["projects"].as_array().unwrap().len(), 1);
    assert_eq!(results["projects"][0]["title"], "Fence installation");

    // Client search matches on name and email.
    let app = common::build_test_app(pool.clone());
    let results = body_json(get(app, "/api/v1/admin/search?q=client%40", &admin_token).await).await;
    assert_eq!(results["clients"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let empty = get(app, "/api/v1/admin/search?q=%20", &admin_token).await;
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_notification_recent_count(pool: PgPool) {
    let (_, client_token) = seed_client(&pool).await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/requests",
        &client_token,
        serde_json::json!({"title": "Shed", "description": "Tool shed"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let count = body_json(get(app, "/api/v1/notifications/recent-count", &client_token).await).await;
    assert_eq!(count["count"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_get_and_update(pool: PgPool) {
    let (_, client_token) = seed_client(&pool).await;

    let app = common::build_test_app(pool.clone());
    let profile = body_json(get(app, "/api/v1/profile", &client_token).await).await;
    assert_eq!(profile["email"], "client@example.com");
    assert!(profile.get("password_hash").is_none());

    let app = common::build_test_app(pool.clone());
    let updated = body_json(
        put_json(
            app,
            "/api/v1/profile",
            &client_token,
            serde_json::json!({"full_name": "Awa Ndiaye", "phone": "+221771234567"}),
        )
        .await,
    )
    .await;
    assert_eq!(updated["full_name"], "Awa Ndiaye");
    assert_eq!(updated["phone"], "+221771234567");

    // Email is not editable through this endpoint.
    let app = common::build_test_app(pool);
    let profile = body_json(get(app, "/api/v1/profile", &client_token).await).await;
    assert_eq!(profile["email"], "client@example.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_requests_listed_for_review(pool: PgPool) {
    let (client_id, client_token) = seed_client(&pool).await;
    let (_, admin_token) = seed_admin(&pool).await;
    let project_id = seed_project(&pool, &admin_token, client_id, "Fence").await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        &format!("/api/v1/projects/{project_id}/changes"),
        &client_token,
        serde_json::json!({"content": "Raise the fence to 2m"}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let queue = body_json(get(app, "/api/v1/changes", &admin_token).await).await;
    assert_eq!(queue.as_array().unwrap().len(), 1);
    assert_eq!(queue[0]["status"], "pending");

    // The project detail view carries the same change requests.
    let app = common::build_test_app(pool.clone());
    let detail =
        body_json(get(app, &format!("/api/v1/projects/{project_id}"), &client_token).await).await;
    assert_eq!(detail["change_requests"].as_array().unwrap().len(), 1);
    assert_eq!(detail["change_requests"][0]["content"], "Raise the fence to 2m");

    // The review queue is admin-only.
    let app = common::build_test_app(pool);
    let forbidden = get(app, "/api/v1/changes", &client_token).await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_without_file_store_reports_server_error(pool: PgPool) {
    let (_, admin_token) = seed_admin(&pool).await;

    // Multipart body with no configured store.
    let boundary = "test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"project_id\"\r\n\r\n\
         1\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"plan.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n\
         fake-bytes\r\n\
         --{boundary}--\r\n"
    );

    let app = common::build_test_app(pool);
    let request = axum::http::Request::builder()
        .method(axum::http::Method::POST)
        .uri("/api/v1/uploads")
        .header(
            axum::http::header::AUTHORIZATION,
            format!("Bearer {admin_token}"),
        )
        .header(
            axum::http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(axum::body::Body::from(body))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
