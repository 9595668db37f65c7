use std::{error::Error, fmt::Display};

use crate::{ExpenseId, MemberId, ProjectId, TaskId, TimeEntryId};

/// Returned by update operations when no record carries the given id.
///
/// Deletions intentionally do not use this type: deleting an absent record
/// is an idempotent no-op and reports `false` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFound {
    Expense(ExpenseId),
    Project(ProjectId),
    Task(TaskId),
    TimeEntry(TimeEntryId),
    TeamMember(MemberId),
}
impl Display for NotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expense(id) => write!(f, "expense {id} not found"),
            Self::Project(id) => write!(f, "project {id} not found"),
            Self::Task(id) => write!(f, "task {id} not found"),
            Self::TimeEntry(id) => write!(f, "time entry {id} not found"),
            Self::TeamMember(id) => write!(f, "team member {id} not found"),
        }
    }
}
impl Error for NotFound {}

/// Rejected restore payloads. A store refuses to start from a collection
/// that holds two records with the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreInitError {
    DuplicateExpenseId(ExpenseId),
    DuplicateProjectId(ProjectId),
    DuplicateTaskId(TaskId),
    DuplicateTimeEntryId(TimeEntryId),
    DuplicateMemberId(MemberId),
}
impl Display for StoreInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateExpenseId(id) => write!(f, "duplicate expense id {id}"),
            Self::DuplicateProjectId(id) => write!(f, "duplicate project id {id}"),
            Self::DuplicateTaskId(id) => write!(f, "duplicate task id {id}"),
            Self::DuplicateTimeEntryId(id) => write!(f, "duplicate time entry id {id}"),
            Self::DuplicateMemberId(id) => write!(f, "duplicate team member id {id}"),
        }
    }
}
impl Error for StoreInitError {}
