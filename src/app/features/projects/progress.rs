//! Progress and payment totals for project views (computed in code from milestones + tasks).

use rust_decimal::Decimal;
use serde::Serialize;

use crate::app::db::{milestones::MilestoneWithTasks, tasks::Task};
use crate::app::domain::PaymentStatus;

/// Task counts and completion for one milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MilestoneProgress {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub progress_percent: u8,
}

/// Roll-up of a project's milestones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub total_milestones: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overall_progress: u8,
    pub total_price: Decimal,
    pub paid_amount: Decimal,
    pub unpaid_amount: Decimal,
    pub paid_milestones: usize,
}

/// round(100 * completed / total), half-up. Zero when there is nothing to count.
pub fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u64;
    let total = total as u64;
    ((200 * completed + total) / (2 * total)) as u8
}

fn count_completed(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.status.is_completed()).count()
}

/// Progress of a single milestone from its tasks.
pub fn compute_milestone_progress(milestone: &MilestoneWithTasks) -> MilestoneProgress {
    let total_tasks = milestone.tasks.len();
    let completed_tasks = count_completed(&milestone.tasks);
    MilestoneProgress {
        total_tasks,
        completed_tasks,
        progress_percent: percent(completed_tasks, total_tasks),
    }
}

/// Summary over all milestones of a project.
///
/// Overall progress is taken over the flattened task set, so every task weighs the
/// same regardless of which milestone it sits in.
pub fn compute_project_summary(milestones: &[MilestoneWithTasks]) -> ProjectSummary {
    let mut total_tasks = 0;
    let mut completed_tasks = 0;
    let mut total_price = Decimal::ZERO;
    let mut paid_amount = Decimal::ZERO;
    let mut paid_milestones = 0;

    for entry in milestones {
        let m = &entry.milestone;
        total_tasks += entry.tasks.len();
        completed_tasks += count_completed(&entry.tasks);
        total_price += m.price.unwrap_or(Decimal::ZERO);
        paid_amount += m.payment_status.paid_amount(m.price, m.payment_amount);
        if m.payment_status == PaymentStatus::Paid {
            paid_milestones += 1;
        }
    }

    ProjectSummary {
        total_milestones: milestones.len(),
        total_tasks,
        completed_tasks,
        overall_progress: percent(completed_tasks, total_tasks),
        total_price,
        paid_amount,
        unpaid_amount: total_price - paid_amount,
        paid_milestones,
    }
}
