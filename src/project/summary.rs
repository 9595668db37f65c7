use serde::Serialize;

/// Portfolio-level totals over projects and time entries. Revenue counts
/// billable entries only, at each entry's own rate.
///
/// The `Default` value is the pre-hydration substitute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub total_budget: f64,
    pub total_actual_cost: f64,
    pub total_hours: f64,
    pub total_billable_hours: f64,
    pub total_revenue: f64,
}

/// Totals over the task collection. `completion_rate` is a percentage and
/// is defined as 0 for an empty collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TaskSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overdue_tasks: usize,
    pub total_estimated_hours: f64,
    pub total_actual_hours: f64,
    pub completion_rate: f64,
}
