mod common;

use crate::common::*;
use rust_decimal::Decimal;
use studio_ledger::app::domain::{PaymentStatus, TaskStatus, UserRole};
use time::macros::date;

#[tokio::test]
async fn list_requires_authentication() {
    let pool = test_pool().await;
    let app = test_router(pool);

    let (status, body) = get_json(&app, "/api/projects", None).await;
    assert_eq!(status, http::StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn unknown_session_is_unauthorized() {
    let pool = test_pool().await;
    let app = test_router(pool);

    let (status, body) = get_json(&app, "/api/projects", Some("session_id=invalid")).await;
    assert_eq!(status, http::StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn staff_lists_every_project_client_only_their_own() {
    let pool = test_pool().await;
    let app = test_router(pool.clone());
    let (_, staff) = user_with_cookie(&pool, "Sam", "sam@studio.example", UserRole::Staff).await;
    let (alice_id, alice) = user_with_cookie(&pool, "Alice", "alice@client.example", UserRole::Client).await;
    let (bob_id, _) = user_with_cookie(&pool, "Bob", "bob@client.example", UserRole::Client).await;

    create_project(&pool, "Alice site", Some(&alice_id)).await;
    create_project(&pool, "Bob app", Some(&bob_id)).await;
    create_project(&pool, "Internal", None).await;

    let (status, body) = get_json(&app, "/api/projects", Some(&staff)).await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, body) = get_json(&app, "/api/projects", Some(&alice)).await;
    assert_eq!(status, http::StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Alice site"]);
}

#[tokio::test]
async fn client_cannot_open_someone_elses_project() {
    let pool = test_pool().await;
    let app = test_router(pool.clone());
    let (_, alice) = user_with_cookie(&pool, "Alice", "alice@client.example", UserRole::Client).await;
    let (bob_id, _) = user_with_cookie(&pool, "Bob", "bob@client.example", UserRole::Client).await;
    let project_id = create_project(&pool, "Bob app", Some(&bob_id)).await;

    for uri in [
        format!("/api/projects/{}", project_id),
        format!("/api/projects/{}/summary", project_id),
    ] {
        let (status, body) = get_json(&app, &uri, Some(&alice)).await;
        assert_eq!(status, http::StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"], "Project not found");
    }
}

#[tokio::test]
async fn missing_project_is_not_found() {
    let pool = test_pool().await;
    let app = test_router(pool.clone());
    let (_, admin) = user_with_cookie(&pool, "Ada", "ada@studio.example", UserRole::Admin).await;

    let (status, _) = get_json(&app, "/api/projects/nope", Some(&admin)).await;
    assert_eq!(status, http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn summary_weights_tasks_not_milestones() {
    let pool = test_pool().await;
    let app = test_router(pool.clone());
    let (_, staff) = user_with_cookie(&pool, "Sam", "sam@studio.example", UserRole::Staff).await;
    let project_id = create_project(&pool, "Rebrand", None).await;

    let small = insert_milestone(&pool, milestone(&project_id, "Small", 0)).await;
    create_tasks(&pool, &small, 1, 0).await;
    let large = insert_milestone(&pool, milestone(&project_id, "Large", 1)).await;
    create_tasks(&pool, &large, 0, 9).await;

    let (status, body) = get_json(&app, &format!("/api/projects/{}/summary", project_id), Some(&staff)).await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(body["total_milestones"], 2);
    assert_eq!(body["total_tasks"], 10);
    assert_eq!(body["completed_tasks"], 1);
    assert_eq!(body["overall_progress"], 10);
}

#[tokio::test]
async fn summary_payment_totals() {
    let pool = test_pool().await;
    let app = test_router(pool.clone());
    let (_, admin) = user_with_cookie(&pool, "Ada", "ada@studio.example", UserRole::Admin).await;
    let project_id = create_project(&pool, "Storefront", None).await;

    insert_milestone(
        &pool,
        NewMilestoneExt::paid(milestone(&project_id, "Design", 0), 1000, date!(2024 - 03 - 10)),
    )
    .await;
    insert_milestone(
        &pool,
        studio_ledger::app::db::milestones::NewMilestone {
            price: dec(500),
            payment_status: PaymentStatus::Partial,
            payment_amount: dec(200),
            payment_date: Some(date!(2024 - 03 - 20)),
            ..milestone(&project_id, "Build", 1)
        },
    )
    .await;
    insert_milestone(
        &pool,
        studio_ledger::app::db::milestones::NewMilestone {
            price: dec(300),
            ..milestone(&project_id, "Launch", 2)
        },
    )
    .await;

    let (status, body) = get_json(&app, &format!("/api/projects/{}/summary", project_id), Some(&admin)).await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(amount(&body["total_price"]), Decimal::from(1800));
    assert_eq!(amount(&body["paid_amount"]), Decimal::from(1200));
    assert_eq!(amount(&body["unpaid_amount"]), Decimal::from(600));
    assert_eq!(body["paid_milestones"], 1);
    assert_eq!(body["overall_progress"], 0);
}

#[tokio::test]
async fn detail_hides_invisible_records_from_clients_only() {
    let pool = test_pool().await;
    let app = test_router(pool.clone());
    let (_, staff) = user_with_cookie(&pool, "Sam", "sam@studio.example", UserRole::Staff).await;
    let (client_id, client) = user_with_cookie(&pool, "Alice", "alice@client.example", UserRole::Client).await;
    let project_id = create_project(&pool, "Alice site", Some(&client_id)).await;

    let shown = insert_milestone(&pool, milestone(&project_id, "Shown", 0)).await;
    create_task(&pool, &shown, "Public task", TaskStatus::Approved, true).await;
    create_task(&pool, &shown, "Internal task", TaskStatus::Todo, false).await;
    let hidden = insert_milestone(
        &pool,
        studio_ledger::app::db::milestones::NewMilestone {
            is_visible: false,
            ..milestone(&project_id, "Hidden", 1)
        },
    )
    .await;
    create_task(&pool, &hidden, "Secret", TaskStatus::Todo, true).await;

    let uri = format!("/api/projects/{}", project_id);

    let (status, body) = get_json(&app, &uri, Some(&client)).await;
    assert_eq!(status, http::StatusCode::OK);
    let milestones = body["milestones"].as_array().unwrap();
    assert_eq!(milestones.len(), 1);
    assert_eq!(milestones[0]["title"], "Shown");
    assert_eq!(milestones[0]["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(milestones[0]["progress"]["progress_percent"], 100);
    assert_eq!(body["summary"]["total_tasks"], 1);

    let (status, body) = get_json(&app, &uri, Some(&staff)).await;
    assert_eq!(status, http::StatusCode::OK);
    let milestones = body["milestones"].as_array().unwrap();
    assert_eq!(milestones.len(), 2);
    assert_eq!(milestones[0]["progress"]["progress_percent"], 50);
    assert_eq!(body["summary"]["total_tasks"], 3);
    assert_eq!(body["summary"]["overall_progress"], 33);
}

#[tokio::test]
async fn detail_lists_milestones_in_order_with_payment_badges() {
    let pool = test_pool().await;
    let app = test_router(pool.clone());
    let (_, staff) = user_with_cookie(&pool, "Sam", "sam@studio.example", UserRole::Staff).await;
    let project_id = create_project(&pool, "Ordering", None).await;

    insert_milestone(&pool, milestone(&project_id, "Third", 2)).await;
    insert_milestone(
        &pool,
        NewMilestoneExt::paid(milestone(&project_id, "First", 0), 750, date!(2024 - 01 - 05)),
    )
    .await;
    insert_milestone(&pool, milestone(&project_id, "Second", 1)).await;

    let (status, body) = get_json(&app, &format!("/api/projects/{}", project_id), Some(&staff)).await;
    assert_eq!(status, http::StatusCode::OK);
    let milestones = body["milestones"].as_array().unwrap();
    let titles: Vec<&str> = milestones.iter().map(|m| m["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
    assert_eq!(milestones[0]["payment_status"], "PAID");
    assert_eq!(milestones[0]["payment_date"], "2024-01-05");
    assert_eq!(amount(&milestones[0]["paid_amount"]), Decimal::from(750));
    assert_eq!(amount(&milestones[1]["paid_amount"]), Decimal::ZERO);
}

#[tokio::test]
async fn milestone_progress_endpoint() {
    let pool = test_pool().await;
    let app = test_router(pool.clone());
    let (_, staff) = user_with_cookie(&pool, "Sam", "sam@studio.example", UserRole::Staff).await;
    let project_id = create_project(&pool, "Progress", None).await;
    let milestone_id = insert_milestone(&pool, milestone(&project_id, "Build", 0)).await;
    create_tasks(&pool, &milestone_id, 2, 1).await;
    create_task(&pool, &milestone_id, "In review", TaskStatus::Submitted, true).await;

    let (status, body) = get_json(
        &app,
        &format!("/api/projects/{}/milestones/{}/progress", project_id, milestone_id),
        Some(&staff),
    )
    .await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(body["total_tasks"], 4);
    assert_eq!(body["completed_tasks"], 2);
    assert_eq!(body["progress_percent"], 50);
}

#[tokio::test]
async fn empty_milestone_progress_is_zero() {
    let pool = test_pool().await;
    let app = test_router(pool.clone());
    let (_, staff) = user_with_cookie(&pool, "Sam", "sam@studio.example", UserRole::Staff).await;
    let project_id = create_project(&pool, "Empty", None).await;
    let milestone_id = insert_milestone(&pool, milestone(&project_id, "Nothing yet", 0)).await;

    let (status, body) = get_json(
        &app,
        &format!("/api/projects/{}/milestones/{}/progress", project_id, milestone_id),
        Some(&staff),
    )
    .await;
    assert_eq!(status, http::StatusCode::OK);
    assert_eq!(body["total_tasks"], 0);
    assert_eq!(body["progress_percent"], 0);
}

#[tokio::test]
async fn milestone_of_another_project_is_not_found() {
    let pool = test_pool().await;
    let app = test_router(pool.clone());
    let (_, staff) = user_with_cookie(&pool, "Sam", "sam@studio.example", UserRole::Staff).await;
    let a = create_project(&pool, "A", None).await;
    let b = create_project(&pool, "B", None).await;
    let milestone_id = insert_milestone(&pool, milestone(&b, "B1", 0)).await;

    let (status, body) = get_json(
        &app,
        &format!("/api/projects/{}/milestones/{}/progress", a, milestone_id),
        Some(&staff),
    )
    .await;
    assert_eq!(status, http::StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Milestone not found");
}

/// Shorthand for fully paid milestones.
trait NewMilestoneExt {
    fn paid(self, price: i64, on: time::Date) -> Self;
}

impl NewMilestoneExt for studio_ledger::app::db::milestones::NewMilestone {
    fn paid(self, price: i64, on: time::Date) -> Self {
        Self {
            price: dec(price),
            payment_status: PaymentStatus::Paid,
            payment_date: Some(on),
            ..self
        }
    }
}
