//! Monthly paid-revenue report and inactive-client detection.
//!
//! Pure: callers fetch the paid milestones for the period and the client list,
//! then hand both in. Output ordering does not depend on input ordering.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use rust_decimal::Decimal;
use serde::Serialize;
use time::{Date, Month};

use crate::app::db::{ClientLatestProject, PaidMilestone};
use crate::app::domain::{PaymentStatus, ProjectStatus};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 9999;

/// Errors raised before any aggregation happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// A validated reporting window: one calendar year, or one month of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    year: i32,
    month: Option<u8>,
    first_day: Date,
    last_day: Date,
}

impl ReportPeriod {
    pub fn new(year: i32, month: Option<u8>) -> Result<Self, ReportError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ReportError::InvalidParameter {
                name: "year",
                reason: format!("must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"),
            });
        }

        let (first_month, last_month) = match month {
            Some(m) => {
                let m = Month::try_from(m).map_err(|_| ReportError::InvalidParameter {
                    name: "month",
                    reason: format!("must be between 1 and 12, got {m}"),
                })?;
                (m, m)
            }
            None => (Month::January, Month::December),
        };

        let out_of_range = |e: time::error::ComponentRange| ReportError::InvalidParameter {
            name: "year",
            reason: e.to_string(),
        };
        let first_day = Date::from_calendar_date(year, first_month, 1).map_err(out_of_range)?;
        let last_day = Date::from_calendar_date(
            year,
            last_month,
            time::util::days_in_year_month(year, last_month),
        )
        .map_err(out_of_range)?;

        Ok(Self {
            year,
            month,
            first_day,
            last_day,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Option<u8> {
        self.month
    }

    /// First and last day of the period, both inclusive.
    pub fn bounds(&self) -> (Date, Date) {
        (self.first_day, self.last_day)
    }

    pub fn contains(&self, date: Date) -> bool {
        self.first_day <= date && date <= self.last_day
    }
}

/// One paid milestone as it appears in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMilestone {
    pub id: String,
    pub title: String,
    pub payment_status: PaymentStatus,
    pub payment_date: Date,
    pub price: Option<Decimal>,
    pub paid_amount: Decimal,
    pub project_id: String,
    pub project_slug: String,
    pub project_title: String,
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
}

/// Paid revenue for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyBreakdown {
    pub year: i32,
    pub month: u8,
    pub total_paid: Decimal,
    pub milestones_count: usize,
    pub clients_count: usize,
    pub milestones: Vec<ReportMilestone>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total_paid: Decimal,
    pub total_milestones: usize,
    pub unique_clients: usize,
    pub inactive_clients_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestProject {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub status: ProjectStatus,
    pub updated_at: i64,
}

/// A client with no paid milestone in the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InactiveClient {
    pub client_id: String,
    pub client_name: String,
    pub client_email: String,
    pub latest_project: LatestProject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentReport {
    pub year: i32,
    pub month: Option<u8>,
    pub months: Vec<MonthlyBreakdown>,
    pub summary: ReportSummary,
    pub inactive_clients: Vec<InactiveClient>,
}

fn report_milestone(m: &PaidMilestone, payment_date: Date) -> ReportMilestone {
    ReportMilestone {
        id: m.id.clone(),
        title: m.title.clone(),
        payment_status: m.payment_status,
        payment_date,
        price: m.price,
        paid_amount: m.payment_status.paid_amount(m.price, m.payment_amount),
        project_id: m.project_id.clone(),
        project_slug: m.project_slug.clone(),
        project_title: m.project_title.clone(),
        client_id: m.client_id.clone(),
        client_name: m.client_name.clone(),
        client_email: m.client_email.clone(),
    }
}

/// Build the payment report for `period`.
///
/// `paid` is expected to hold PARTIAL/PAID milestones dated inside the period;
/// rows without a payment date or dated outside the period are left out.
/// `clients` lists every client with at least one project, each with their most
/// recently updated project.
pub fn build_payment_report(
    period: &ReportPeriod,
    paid: &[PaidMilestone],
    clients: &[ClientLatestProject],
) -> PaymentReport {
    let mut by_month: BTreeMap<(i32, u8), Vec<ReportMilestone>> = BTreeMap::new();
    for m in paid {
        let Some(date) = m.payment_date.filter(|d| period.contains(*d)) else {
            continue;
        };
        by_month
            .entry((date.year(), u8::from(date.month())))
            .or_default()
            .push(report_milestone(m, date));
    }

    let mut total_paid = Decimal::ZERO;
    let mut total_milestones = 0;
    let mut active_clients: HashSet<String> = HashSet::new();

    let months: Vec<MonthlyBreakdown> = by_month
        .into_iter()
        .map(|((year, month), mut milestones)| {
            milestones.sort_by(|a, b| {
                a.payment_date
                    .cmp(&b.payment_date)
                    .then_with(|| a.id.cmp(&b.id))
            });
            let month_total: Decimal = milestones.iter().map(|m| m.paid_amount).sum();
            let month_clients: HashSet<String> = milestones
                .iter()
                .filter_map(|m| m.client_id.clone())
                .collect();
            let clients_count = month_clients.len();

            total_paid += month_total;
            total_milestones += milestones.len();
            active_clients.extend(month_clients);

            MonthlyBreakdown {
                year,
                month,
                total_paid: month_total,
                milestones_count: milestones.len(),
                clients_count,
                milestones,
            }
        })
        .collect();

    let inactive_clients = find_inactive_clients(clients, &active_clients);

    PaymentReport {
        year: period.year(),
        month: period.month(),
        months,
        summary: ReportSummary {
            total_paid,
            total_milestones,
            unique_clients: active_clients.len(),
            inactive_clients_count: inactive_clients.len(),
        },
        inactive_clients,
    }
}

/// Clients absent from `active`, each with their most recently updated project.
/// Ordered by client name, then id.
fn find_inactive_clients(
    clients: &[ClientLatestProject],
    active: &HashSet<String>,
) -> Vec<InactiveClient> {
    let mut latest: BTreeMap<&str, &ClientLatestProject> = BTreeMap::new();
    for c in clients {
        if active.contains(&c.client_id) {
            continue;
        }
        latest
            .entry(c.client_id.as_str())
            .and_modify(|current| {
                if (c.project_updated_at, &c.project_id)
                    > (current.project_updated_at, &current.project_id)
                {
                    *current = c;
                }
            })
            .or_insert(c);
    }

    let ordered: BTreeSet<(&str, &str)> = latest
        .values()
        .map(|c| (c.client_name.as_str(), c.client_id.as_str()))
        .collect();

    ordered
        .into_iter()
        .filter_map(|(_, id)| latest.get(id))
        .map(|c| InactiveClient {
            client_id: c.client_id.clone(),
            client_name: c.client_name.clone(),
            client_email: c.client_email.clone(),
            latest_project: LatestProject {
                id: c.project_id.clone(),
                slug: c.project_slug.clone(),
                title: c.project_title.clone(),
                status: c.project_status,
                updated_at: c.project_updated_at,
            },
        })
        .collect()
}
