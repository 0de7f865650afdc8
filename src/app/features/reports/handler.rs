use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::app::{
    access, db, error::AppError, session::ApiAuthenticatedSession, AppState,
};

use super::payments::{self, PaymentReport, ReportPeriod};

/// Query string for the payment report. `month` omitted means the whole year.
#[derive(Debug, Deserialize)]
pub struct PaymentReportQuery {
    pub year: i64,
    pub month: Option<i64>,
}

impl PaymentReportQuery {
    /// Validate before any database work.
    fn period(&self) -> Result<ReportPeriod, AppError> {
        let year = i32::try_from(self.year).map_err(|_| {
            AppError::InvalidParameter(format!("invalid year: {} is out of range", self.year))
        })?;
        let month = self
            .month
            .map(u8::try_from)
            .transpose()
            .map_err(|_| {
                AppError::InvalidParameter("invalid month: must be between 1 and 12".to_string())
            })?;
        Ok(ReportPeriod::new(year, month)?)
    }
}

/// GET /api/reports/payments?year=YYYY[&month=M] — Paid revenue by month and inactive clients.
pub async fn payment_report(
    ApiAuthenticatedSession(user): ApiAuthenticatedSession,
    State(state): State<AppState>,
    query: Result<Query<PaymentReportQuery>, QueryRejection>,
) -> Result<Json<PaymentReport>, AppError> {
    if !access::can_view_reports(&user) {
        return Err(AppError::NotFound("Not found".to_string()));
    }

    let Query(query) = query.map_err(|e| AppError::InvalidParameter(e.body_text()))?;
    let period = query.period()?;
    let (first_day, last_day) = period.bounds();

    let (paid, clients) = tokio::try_join!(
        db::milestones::find_paid_in_period(&state.db, first_day, last_day),
        db::users::find_clients_with_latest_project(&state.db),
    )?;

    let report = payments::build_payment_report(&period, &paid, &clients);
    tracing::debug!(
        year = period.year(),
        month = ?period.month(),
        milestones = report.summary.total_milestones,
        inactive_clients = report.summary.inactive_clients_count,
        "payment report built"
    );

    Ok(Json(report))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/reports/payments", get(payment_report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_out_of_u8_range_is_invalid_parameter() {
        let query = PaymentReportQuery { year: 2024, month: Some(300) };
        assert!(matches!(query.period(), Err(AppError::InvalidParameter(_))));
    }

    #[test]
    fn month_thirteen_is_invalid_parameter() {
        let query = PaymentReportQuery { year: 2024, month: Some(13) };
        match query.period() {
            Err(AppError::InvalidParameter(msg)) => assert!(msg.contains("month"), "{msg}"),
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn whole_year_when_month_missing() {
        let query = PaymentReportQuery { year: 2024, month: None };
        let period = query.period().unwrap();
        assert_eq!(period.month(), None);
        assert_eq!(period.year(), 2024);
    }
}
