use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, FromRow, Row};
use time::{Date, OffsetDateTime};

use crate::app::domain::PaymentStatus;

use super::tasks::{self, Task};

/// Database row for milestones table. Amounts are stored as decimal strings.
#[derive(Debug, Clone, Serialize)]
pub struct Milestone {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub sort_order: i64,
    pub price: Option<Decimal>,
    pub payment_status: PaymentStatus,
    pub payment_amount: Option<Decimal>,
    pub payment_date: Option<Date>,
    pub is_visible: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A milestone with its tasks in creation order.
#[derive(Debug, Clone)]
pub struct MilestoneWithTasks {
    pub milestone: Milestone,
    pub tasks: Vec<Task>,
}

/// A PARTIAL or PAID milestone annotated with its project and client.
#[derive(Debug, Clone)]
pub struct PaidMilestone {
    pub id: String,
    pub title: String,
    pub price: Option<Decimal>,
    pub payment_status: PaymentStatus,
    pub payment_amount: Option<Decimal>,
    pub payment_date: Option<Date>,
    pub project_id: String,
    pub project_slug: String,
    pub project_title: String,
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
}

/// Data structure for inserting a new milestone.
pub struct NewMilestone {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub sort_order: i64,
    pub price: Option<Decimal>,
    pub payment_status: PaymentStatus,
    pub payment_amount: Option<Decimal>,
    pub payment_date: Option<Date>,
    pub is_visible: bool,
}

fn amount(row: &SqliteRow, column: &str) -> Result<Option<Decimal>, sqlx::Error> {
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|s| Decimal::from_str(s.trim()))
        .transpose()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

impl<'r> FromRow<'r, SqliteRow> for Milestone {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            project_id: row.try_get("project_id")?,
            title: row.try_get("title")?,
            sort_order: row.try_get("sort_order")?,
            price: amount(row, "price")?,
            payment_status: row.try_get("payment_status")?,
            payment_amount: amount(row, "payment_amount")?,
            payment_date: row.try_get("payment_date")?,
            is_visible: row.try_get("is_visible")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for PaidMilestone {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            price: amount(row, "price")?,
            payment_status: row.try_get("payment_status")?,
            payment_amount: amount(row, "payment_amount")?,
            payment_date: row.try_get("payment_date")?,
            project_id: row.try_get("project_id")?,
            project_slug: row.try_get("project_slug")?,
            project_title: row.try_get("project_title")?,
            client_id: row.try_get("client_id")?,
            client_name: row.try_get("client_name")?,
            client_email: row.try_get("client_email")?,
        })
    }
}

/// Insert a new milestone into the database.
pub async fn insert<'e, E>(
    executor: E,
    milestone: &NewMilestone,
) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();

    sqlx::query(
        "INSERT INTO milestones (id, project_id, title, sort_order, price, payment_status, payment_amount, payment_date, is_visible, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&milestone.id)
    .bind(&milestone.project_id)
    .bind(&milestone.title)
    .bind(milestone.sort_order)
    .bind(milestone.price.map(|d| d.to_string()))
    .bind(milestone.payment_status)
    .bind(milestone.payment_amount.map(|d| d.to_string()))
    .bind(milestone.payment_date)
    .bind(milestone.is_visible)
    .bind(now)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(())
}

/// Milestones of a project ordered by sort_order.
pub async fn find_by_project(
    pool: &sqlx::SqlitePool,
    project_id: &str,
) -> Result<Vec<Milestone>, sqlx::Error> {
    sqlx::query_as::<_, Milestone>(
        "SELECT id, project_id, title, sort_order, price, payment_status, payment_amount, payment_date, is_visible, created_at, updated_at FROM milestones WHERE project_id = ? ORDER BY sort_order, created_at, rowid",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}

/// Milestones of a project, each carrying its tasks. Milestones by sort_order,
/// tasks by creation order.
pub async fn find_by_project_with_tasks(
    pool: &sqlx::SqlitePool,
    project_id: &str,
) -> Result<Vec<MilestoneWithTasks>, sqlx::Error> {
    let (milestones, all_tasks) = tokio::try_join!(
        find_by_project(pool, project_id),
        tasks::find_by_project(pool, project_id),
    )?;

    let mut tasks_by_milestone: HashMap<String, Vec<Task>> = HashMap::new();
    for task in all_tasks {
        tasks_by_milestone
            .entry(task.milestone_id.clone())
            .or_default()
            .push(task);
    }

    Ok(milestones
        .into_iter()
        .map(|milestone| {
            let tasks = tasks_by_milestone.remove(&milestone.id).unwrap_or_default();
            MilestoneWithTasks { milestone, tasks }
        })
        .collect())
}

/// PARTIAL and PAID milestones across all projects with payment_date between
/// `first_day` and `last_day` inclusive, oldest payment first.
pub async fn find_paid_in_period(
    pool: &sqlx::SqlitePool,
    first_day: Date,
    last_day: Date,
) -> Result<Vec<PaidMilestone>, sqlx::Error> {
    sqlx::query_as::<_, PaidMilestone>(
        r#"
        SELECT m.id, m.title, m.price, m.payment_status, m.payment_amount, m.payment_date,
               p.id AS project_id, p.slug AS project_slug, p.title AS project_title,
               u.id AS client_id, u.name AS client_name, u.email AS client_email
        FROM milestones m
        JOIN projects p ON p.id = m.project_id
        LEFT JOIN users u ON u.id = p.client_id
        WHERE m.payment_status IN ('PARTIAL', 'PAID')
          AND m.payment_date IS NOT NULL
          AND m.payment_date >= ?
          AND m.payment_date <= ?
        ORDER BY m.payment_date, m.id
        "#,
    )
    .bind(first_day)
    .bind(last_day)
    .fetch_all(pool)
    .await
}
