use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::app::db::{milestones::MilestoneWithTasks, Milestone, Project, Task};

use super::progress::{self, MilestoneProgress, ProjectSummary};

/// Path parameters for milestone endpoints.
#[derive(Debug, Deserialize)]
pub struct MilestonePathParams {
    pub project_id: String,
    pub milestone_id: String,
}

/// One row of the project list.
#[derive(Debug, Serialize)]
pub struct ProjectListItem {
    #[serde(flatten)]
    pub project: Project,
    pub summary: ProjectSummary,
}

/// A milestone with its tasks, progress bar and payment badge values.
#[derive(Debug, Serialize)]
pub struct MilestoneDetail {
    #[serde(flatten)]
    pub milestone: Milestone,
    pub progress: MilestoneProgress,
    pub paid_amount: Decimal,
    pub tasks: Vec<Task>,
}

impl From<MilestoneWithTasks> for MilestoneDetail {
    fn from(entry: MilestoneWithTasks) -> Self {
        let progress = progress::compute_milestone_progress(&entry);
        let m = entry.milestone;
        let paid_amount = m.payment_status.paid_amount(m.price, m.payment_amount);
        Self {
            milestone: m,
            progress,
            paid_amount,
            tasks: entry.tasks,
        }
    }
}

/// Response for the project detail view.
#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    pub project: Project,
    pub summary: ProjectSummary,
    pub milestones: Vec<MilestoneDetail>,
}
