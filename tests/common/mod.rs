#![allow(dead_code)]

use axum::body::Body;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use studio_ledger::app::{
    self,
    db::{self, milestones::NewMilestone, projects::NewProject, tasks::NewTask, users::NewUser},
    domain::{Email, PaymentStatus, ProjectStatus, TaskStatus, UserId, UserRole},
};
use studio_ledger::create_router;
use tower::ServiceExt;

/// Single long-lived connection: every new `sqlite::memory:` connection is a fresh database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

pub fn test_router(pool: SqlitePool) -> axum::Router {
    let state = app::AppState {
        db: pool,
        config: app::config::Config::for_tests(),
    };
    create_router(state)
}

pub fn new_id() -> String {
    ulid::Ulid::new().to_string()
}

/// Create a user and a live session. Returns (user_id, cookie header).
pub async fn user_with_cookie(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    role: UserRole,
) -> (String, String) {
    let user_id = UserId::new();
    db::users::insert(
        pool,
        &NewUser {
            id: user_id.clone(),
            name: name.to_string(),
            email: Email::new(email).unwrap(),
            role,
        },
    )
    .await
    .unwrap();

    let expires_at = time::OffsetDateTime::now_utc() + time::Duration::days(1);
    let session_id = db::sessions::create(pool, &user_id, expires_at).await.unwrap();
    (user_id.as_str(), format!("session_id={}", session_id))
}

pub async fn create_project(
    pool: &SqlitePool,
    title: &str,
    client_id: Option<&str>,
) -> String {
    let id = new_id();
    db::projects::insert(
        pool,
        &NewProject {
            id: id.clone(),
            title: title.to_string(),
            slug: format!("{}-{}", title.to_lowercase().replace(' ', "-"), id.to_lowercase()),
            status: ProjectStatus::InProgress,
            client_id: client_id.map(str::to_string),
        },
    )
    .await
    .unwrap();
    id
}

/// Unpaid, visible, unpriced milestone. Override fields with struct update syntax.
pub fn milestone(project_id: &str, title: &str, sort_order: i64) -> NewMilestone {
    NewMilestone {
        id: new_id(),
        project_id: project_id.to_string(),
        title: title.to_string(),
        sort_order,
        price: None,
        payment_status: PaymentStatus::Unpaid,
        payment_amount: None,
        payment_date: None,
        is_visible: true,
    }
}

pub async fn insert_milestone(pool: &SqlitePool, milestone: NewMilestone) -> String {
    db::milestones::insert(pool, &milestone).await.unwrap();
    milestone.id
}

pub async fn create_task(
    pool: &SqlitePool,
    milestone_id: &str,
    title: &str,
    status: TaskStatus,
    is_visible: bool,
) -> String {
    let id = new_id();
    db::tasks::insert(
        pool,
        &NewTask {
            id: id.clone(),
            milestone_id: milestone_id.to_string(),
            title: title.to_string(),
            status,
            is_visible,
        },
    )
    .await
    .unwrap();
    id
}

/// Insert `approved` APPROVED tasks and `open` TODO tasks.
pub async fn create_tasks(pool: &SqlitePool, milestone_id: &str, approved: usize, open: usize) {
    for i in 0..approved {
        create_task(pool, milestone_id, &format!("done {i}"), TaskStatus::Approved, true).await;
    }
    for i in 0..open {
        create_task(pool, milestone_id, &format!("open {i}"), TaskStatus::Todo, true).await;
    }
}

pub fn dec(n: i64) -> Option<Decimal> {
    Some(Decimal::from(n))
}

/// Read a JSON amount whether it was written as a string or a number.
pub fn amount(value: &serde_json::Value) -> Decimal {
    match value {
        serde_json::Value::String(s) => s.parse().unwrap(),
        serde_json::Value::Number(n) => n.to_string().parse().unwrap(),
        other => panic!("expected an amount, got {other}"),
    }
}

async fn send(app: &axum::Router, request: http::Request<Body>) -> (http::StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&body_bytes).into_owned())
        })
    };
    (status, body)
}

pub async fn get_json(
    app: &axum::Router,
    uri: &str,
    cookie: Option<&str>,
) -> (http::StatusCode, serde_json::Value) {
    let mut builder = http::Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn patch_json(
    app: &axum::Router,
    uri: &str,
    cookie: Option<&str>,
    body: serde_json::Value,
) -> (http::StatusCode, serde_json::Value) {
    let mut builder = http::Request::builder()
        .method("PATCH")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}
