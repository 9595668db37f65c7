use std::fmt::Display;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::record::ProjectId;
use super::task::TaskId;
use super::team::MemberId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeEntryId(u64);
impl TimeEntryId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}
impl Display for TimeEntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hours booked against a task. `project_id` duplicates the owning task's
/// project reference so per-project rollups stay a single scan; callers
/// are trusted to pass the matching project. `rate` only feeds revenue
/// when `billable` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: TimeEntryId,
    pub task_id: TaskId,
    pub project_id: ProjectId,
    pub user_id: MemberId,
    pub date: NaiveDate,
    pub hours: f64,
    pub description: String,
    pub billable: bool,
    pub rate: f64,
    pub created_at: DateTime<Utc>,
}

/// Input for [`crate::ProjectStore::add_time_entry`]; the store assigns
/// the id and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTimeEntry {
    pub task_id: TaskId,
    pub project_id: ProjectId,
    pub user_id: MemberId,
    pub date: NaiveDate,
    pub hours: f64,
    pub description: String,
    pub billable: bool,
    pub rate: f64,
}

/// Field-wise update for a time entry; unset fields keep their value.
/// Time entries carry no `updated_at` to refresh.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeEntryPatch {
    pub task_id: Option<TaskId>,
    pub project_id: Option<ProjectId>,
    pub user_id: Option<MemberId>,
    pub date: Option<NaiveDate>,
    pub hours: Option<f64>,
    pub description: Option<String>,
    pub billable: Option<bool>,
    pub rate: Option<f64>,
}

impl TimeEntry {
    pub(crate) fn apply(&mut self, patch: TimeEntryPatch) {
        if let Some(task_id) = patch.task_id {
            self.task_id = task_id;
        }
        if let Some(project_id) = patch.project_id {
            self.project_id = project_id;
        }
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(hours) = patch.hours {
            self.hours = hours;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(billable) = patch.billable {
            self.billable = billable;
        }
        if let Some(rate) = patch.rate {
            self.rate = rate;
        }
    }
}
