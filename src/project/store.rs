use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use log::debug;

use crate::errors::{NotFound, StoreInitError};

use super::initial_data::{
    initial_projects, initial_tasks, initial_team_members, initial_time_entries,
};
use super::record::{NewProject, Project, ProjectId, ProjectPatch, ProjectStatus};
use super::summary::{ProjectSummary, TaskSummary};
use super::task::{NewTask, Task, TaskId, TaskPatch, TaskPriority, TaskStatus};
use super::team::{MemberId, NewTeamMember, TeamMember, TeamMemberPatch};
use super::time_entry::{NewTimeEntry, TimeEntry, TimeEntryId, TimeEntryPatch};

type PersistHook = Box<dyn Fn(&ProjectStore) + Send + Sync>;

/// Owns the four related project-domain collections: projects, tasks,
/// time entries and team members. Deleting a project takes its tasks and
/// time entries with it; deleting a task takes its time entries; deleting
/// a team member deletes nothing else.
///
/// Each collection is kept newest-first, which is also the order readers
/// display it in.
pub struct ProjectStore {
    previous_project_id: u64,
    previous_task_id: u64,
    previous_entry_id: u64,
    previous_member_id: u64,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    time_entries: Vec<TimeEntry>,
    team_members: Vec<TeamMember>,
    persist: Option<PersistHook>,
}

impl ProjectStore {
    /// Restores a store from previously persisted collections. Each id
    /// counter continues above the highest restored id of its kind.
    pub fn new(
        projects: Vec<Project>,
        tasks: Vec<Task>,
        time_entries: Vec<TimeEntry>,
        team_members: Vec<TeamMember>,
    ) -> Result<Self, StoreInitError> {
        let mut seen = HashSet::new();
        for project in &projects {
            if !seen.insert(project.id) {
                return Err(StoreInitError::DuplicateProjectId(project.id));
            }
        }
        let mut seen = HashSet::new();
        for task in &tasks {
            if !seen.insert(task.id) {
                return Err(StoreInitError::DuplicateTaskId(task.id));
            }
        }
        let mut seen = HashSet::new();
        for entry in &time_entries {
            if !seen.insert(entry.id) {
                return Err(StoreInitError::DuplicateTimeEntryId(entry.id));
            }
        }
        let mut seen = HashSet::new();
        for member in &team_members {
            if !seen.insert(member.id) {
                return Err(StoreInitError::DuplicateMemberId(member.id));
            }
        }

        Ok(Self {
            previous_project_id: projects.iter().map(|x| x.id.value()).max().unwrap_or(0),
            previous_task_id: tasks.iter().map(|x| x.id.value()).max().unwrap_or(0),
            previous_entry_id: time_entries.iter().map(|x| x.id.value()).max().unwrap_or(0),
            previous_member_id: team_members.iter().map(|x| x.id.value()).max().unwrap_or(0),
            projects,
            tasks,
            time_entries,
            team_members,
            persist: None,
        })
    }

    /// Returns a store holding the built-in seed dataset.
    pub fn seeded() -> Self {
        Self::new(
            initial_projects(),
            initial_tasks(),
            initial_time_entries(),
            initial_team_members(),
        )
        .expect("seed dataset has unique ids")
    }

    /// Installs the hook invoked after every completed mutation. The hook
    /// is fire-and-forget: its outcome never reaches the caller.
    pub fn set_persist_hook(&mut self, hook: impl Fn(&ProjectStore) + Send + Sync + 'static) {
        self.persist = Some(Box::new(hook));
    }

    fn notify_persist(&self) {
        if let Some(hook) = &self.persist {
            hook(self);
        }
    }

    fn next_project_id(&mut self) -> ProjectId {
        self.previous_project_id += 1;
        ProjectId::new(self.previous_project_id)
    }

    fn next_task_id(&mut self) -> TaskId {
        self.previous_task_id += 1;
        TaskId::new(self.previous_task_id)
    }

    fn next_entry_id(&mut self) -> TimeEntryId {
        self.previous_entry_id += 1;
        TimeEntryId::new(self.previous_entry_id)
    }

    fn next_member_id(&mut self) -> MemberId {
        self.previous_member_id += 1;
        MemberId::new(self.previous_member_id)
    }
}

impl ProjectStore {
    /// All projects, newest first.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// All tasks, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// All time entries, newest first.
    pub fn time_entries(&self) -> &[TimeEntry] {
        &self.time_entries
    }

    /// All team members, newest first.
    pub fn team_members(&self) -> &[TeamMember] {
        &self.team_members
    }

    pub fn project_from_id(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|x| x.id == id)
    }

    pub fn task_from_id(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|x| x.id == id)
    }

    pub fn time_entry_from_id(&self, id: TimeEntryId) -> Option<&TimeEntry> {
        self.time_entries.iter().find(|x| x.id == id)
    }

    /// Resolves a member reference. Returns `None` for dangling ids left
    /// behind by member deletion; readers render those as absent.
    pub fn team_member_from_id(&self, id: MemberId) -> Option<&TeamMember> {
        self.team_members.iter().find(|x| x.id == id)
    }
}

impl ProjectStore {
    /// Creates a project and returns its id. Always succeeds.
    pub fn add_project(&mut self, data: NewProject) -> ProjectId {
        let id = self.next_project_id();
        let now = Utc::now();
        self.projects.insert(
            0,
            Project {
                id,
                name: data.name,
                description: data.description,
                client: data.client,
                status: data.status,
                start_date: data.start_date,
                end_date: data.end_date,
                budget: data.budget,
                actual_cost: data.actual_cost,
                team_members: data.team_members,
                progress: data.progress,
                created_at: now,
                updated_at: now,
            },
        );
        debug!("project {id} added");
        self.notify_persist();
        id
    }

    /// Merges a partial update into a project and refreshes `updated_at`.
    pub fn update_project(&mut self, id: ProjectId, patch: ProjectPatch) -> Result<(), NotFound> {
        match self.projects.iter_mut().find(|x| x.id == id) {
            Some(project) => {
                project.apply(patch);
                project.updated_at = Utc::now();
                debug!("project {id} updated");
                self.notify_persist();
                Ok(())
            }
            None => Err(NotFound::Project(id)),
        }
    }

    /// Removes a project together with its tasks and time entries.
    /// Returns false when no project carries the id.
    pub fn delete_project(&mut self, id: ProjectId) -> bool {
        match self.projects.iter().position(|x| x.id == id) {
            Some(index) => {
                self.projects.remove(index);
                self.tasks.retain(|task| task.project_id != id);
                self.time_entries.retain(|entry| entry.project_id != id);
                debug!("project {id} deleted with its tasks and time entries");
                self.notify_persist();
                true
            }
            None => false,
        }
    }

    /// Creates a task and returns its id. Always succeeds; the owning
    /// project reference is taken as given.
    pub fn add_task(&mut self, data: NewTask) -> TaskId {
        let id = self.next_task_id();
        let now = Utc::now();
        self.tasks.insert(
            0,
            Task {
                id,
                title: data.title,
                description: data.description,
                project_id: data.project_id,
                assigned_to: data.assigned_to,
                status: data.status,
                priority: data.priority,
                due_date: data.due_date,
                estimated_hours: data.estimated_hours,
                actual_hours: data.actual_hours,
                created_at: now,
                updated_at: now,
            },
        );
        debug!("task {id} added");
        self.notify_persist();
        id
    }

    /// Merges a partial update into a task and refreshes `updated_at`.
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Result<(), NotFound> {
        match self.tasks.iter_mut().find(|x| x.id == id) {
            Some(task) => {
                task.apply(patch);
                task.updated_at = Utc::now();
                debug!("task {id} updated");
                self.notify_persist();
                Ok(())
            }
            None => Err(NotFound::Task(id)),
        }
    }

    /// Removes a task together with its time entries. Returns false when
    /// no task carries the id.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        match self.tasks.iter().position(|x| x.id == id) {
            Some(index) => {
                self.tasks.remove(index);
                self.time_entries.retain(|entry| entry.task_id != id);
                debug!("task {id} deleted with its time entries");
                self.notify_persist();
                true
            }
            None => false,
        }
    }

    /// Books a time entry and returns its id. Always succeeds.
    pub fn add_time_entry(&mut self, data: NewTimeEntry) -> TimeEntryId {
        let id = self.next_entry_id();
        self.time_entries.insert(
            0,
            TimeEntry {
                id,
                task_id: data.task_id,
                project_id: data.project_id,
                user_id: data.user_id,
                date: data.date,
                hours: data.hours,
                description: data.description,
                billable: data.billable,
                rate: data.rate,
                created_at: Utc::now(),
            },
        );
        debug!("time entry {id} added");
        self.notify_persist();
        id
    }

    /// Merges a partial update into a time entry.
    pub fn update_time_entry(
        &mut self,
        id: TimeEntryId,
        patch: TimeEntryPatch,
    ) -> Result<(), NotFound> {
        match self.time_entries.iter_mut().find(|x| x.id == id) {
            Some(entry) => {
                entry.apply(patch);
                debug!("time entry {id} updated");
                self.notify_persist();
                Ok(())
            }
            None => Err(NotFound::TimeEntry(id)),
        }
    }

    /// Removes a time entry. Returns false when no entry carries the id.
    pub fn delete_time_entry(&mut self, id: TimeEntryId) -> bool {
        match self.time_entries.iter().position(|x| x.id == id) {
            Some(index) => {
                self.time_entries.remove(index);
                debug!("time entry {id} deleted");
                self.notify_persist();
                true
            }
            None => false,
        }
    }

    /// Adds a team member and returns its id. Always succeeds.
    pub fn add_team_member(&mut self, data: NewTeamMember) -> MemberId {
        let id = self.next_member_id();
        self.team_members.insert(
            0,
            TeamMember {
                id,
                name: data.name,
                email: data.email,
                role: data.role,
                avatar: data.avatar,
            },
        );
        debug!("team member {id} added");
        self.notify_persist();
        id
    }

    /// Merges a partial update into a team member.
    pub fn update_team_member(
        &mut self,
        id: MemberId,
        patch: TeamMemberPatch,
    ) -> Result<(), NotFound> {
        match self.team_members.iter_mut().find(|x| x.id == id) {
            Some(member) => {
                member.apply(patch);
                debug!("team member {id} updated");
                self.notify_persist();
                Ok(())
            }
            None => Err(NotFound::TeamMember(id)),
        }
    }

    /// Removes a team member. Projects and tasks referencing the member
    /// keep their reference; lookups on it resolve to `None` from then
    /// on. Returns false when no member carries the id.
    pub fn delete_team_member(&mut self, id: MemberId) -> bool {
        match self.team_members.iter().position(|x| x.id == id) {
            Some(index) => {
                self.team_members.remove(index);
                debug!("team member {id} deleted, references left dangling");
                self.notify_persist();
                true
            }
            None => false,
        }
    }
}

impl ProjectStore {
    /// Portfolio totals over projects and time entries. Pure; recomputed
    /// on demand.
    pub fn project_summary(&self) -> ProjectSummary {
        let billable = || self.time_entries.iter().filter(|entry| entry.billable);
        ProjectSummary {
            total_projects: self.projects.len(),
            active_projects: self
                .projects
                .iter()
                .filter(|p| p.status == ProjectStatus::Active)
                .count(),
            completed_projects: self
                .projects
                .iter()
                .filter(|p| p.status == ProjectStatus::Completed)
                .count(),
            total_budget: self.projects.iter().map(|p| p.budget).sum(),
            total_actual_cost: self.projects.iter().map(|p| p.actual_cost).sum(),
            total_hours: self.time_entries.iter().map(|entry| entry.hours).sum(),
            total_billable_hours: billable().map(|entry| entry.hours).sum(),
            total_revenue: billable().map(|entry| entry.hours * entry.rate).sum(),
        }
    }

    /// Task totals as of `today`. A task is overdue when its due date is
    /// strictly before `today` and it is not completed.
    pub fn task_summary_on(&self, today: NaiveDate) -> TaskSummary {
        let total_tasks = self.tasks.len();
        let completed_tasks = self
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count();
        let overdue_tasks = self
            .tasks
            .iter()
            .filter(|t| t.due_date < today && t.status != TaskStatus::Completed)
            .count();
        let completion_rate = if total_tasks > 0 {
            completed_tasks as f64 / total_tasks as f64 * 100.0
        } else {
            0.0
        };

        TaskSummary {
            total_tasks,
            completed_tasks,
            overdue_tasks,
            total_estimated_hours: self.tasks.iter().map(|t| t.estimated_hours).sum(),
            total_actual_hours: self.tasks.iter().map(|t| t.actual_hours).sum(),
            completion_rate,
        }
    }

    /// Task totals as of the current date.
    pub fn task_summary(&self) -> TaskSummary {
        self.task_summary_on(Utc::now().date_naive())
    }

    /// The tasks belonging to one project, in stored order.
    pub fn project_tasks(&self, project_id: ProjectId) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.project_id == project_id)
            .collect()
    }

    /// The time entries booked against one task, in stored order.
    pub fn task_time_entries(&self, task_id: TaskId) -> Vec<&TimeEntry> {
        self.time_entries
            .iter()
            .filter(|entry| entry.task_id == task_id)
            .collect()
    }

    /// The time entries booked against one project, in stored order.
    pub fn project_time_entries(&self, project_id: ProjectId) -> Vec<&TimeEntry> {
        self.time_entries
            .iter()
            .filter(|entry| entry.project_id == project_id)
            .collect()
    }

    /// Projects matching an optional exact status and an optional
    /// case-insensitive client substring; omitted filters pass everything.
    pub fn filtered_projects(
        &self,
        status: Option<ProjectStatus>,
        client: Option<&str>,
    ) -> Vec<&Project> {
        let client = client.map(str::to_lowercase);
        self.projects
            .iter()
            .filter(|project| {
                let matches_status = status.map_or(true, |s| project.status == s);
                let matches_client = client
                    .as_deref()
                    .map_or(true, |c| project.client.to_lowercase().contains(c));
                matches_status && matches_client
            })
            .collect()
    }

    /// Tasks matching the provided exact filters, all ANDed; omitted
    /// filters pass everything.
    pub fn filtered_tasks(
        &self,
        status: Option<TaskStatus>,
        priority: Option<TaskPriority>,
        assigned_to: Option<MemberId>,
    ) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| {
                let matches_status = status.map_or(true, |s| task.status == s);
                let matches_priority = priority.map_or(true, |p| task.priority == p);
                let matches_assignee = assigned_to.map_or(true, |m| task.assigned_to == m);
                matches_status && matches_priority && matches_assignee
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use chrono::NaiveDate;

    use crate::{
        MemberId, NewProject, NewTask, NewTimeEntry, NotFound, ProjectId, ProjectPatch,
        ProjectStatus, ProjectStore, TaskId, TaskPatch, TaskPriority, TaskStatus, TeamMemberPatch,
        TimeEntryId,
    };

    fn almost_equal(a: f64, b: f64) -> bool {
        (a - b).abs() <= 0.0001
    }

    fn new_task(project_id: ProjectId, status: TaskStatus, due: NaiveDate) -> NewTask {
        NewTask {
            title: "Review deliverables".to_string(),
            description: String::new(),
            project_id,
            assigned_to: MemberId::new(1),
            status,
            priority: TaskPriority::Medium,
            due_date: due,
            estimated_hours: 2.0,
            actual_hours: 0.0,
        }
    }

    #[test]
    fn delete_project_cascades_to_tasks_and_time_entries() {
        let mut store = ProjectStore::seeded();
        let website = ProjectId::new(1);

        assert!(store.delete_project(website));

        assert!(store.project_from_id(website).is_none());
        assert!(store.tasks().iter().all(|t| t.project_id != website));
        assert!(store.time_entries().iter().all(|e| e.project_id != website));

        // The other project and its task are untouched.
        assert!(store.project_from_id(ProjectId::new(2)).is_some());
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].id, TaskId::new(3));
        // All seed time entries belonged to the deleted project.
        assert!(store.time_entries().is_empty());
    }

    #[test]
    fn delete_task_cascades_to_its_time_entries_only() {
        let mut store = ProjectStore::seeded();

        assert!(store.delete_task(TaskId::new(1)));

        assert!(store.task_from_id(TaskId::new(1)).is_none());
        let remaining: Vec<TimeEntryId> =
            store.time_entries().iter().map(|entry| entry.id).collect();
        assert_eq!(remaining, vec![TimeEntryId::new(3)]);
    }

    #[test]
    fn delete_team_member_leaves_references_dangling() {
        let mut store = ProjectStore::seeded();
        let designer = MemberId::new(3);

        assert!(store.delete_team_member(designer));

        assert!(store.team_member_from_id(designer).is_none());
        // Task 1 still points at the deleted designer.
        assert_eq!(store.task_from_id(TaskId::new(1)).unwrap().assigned_to, designer);
        assert!(store
            .project_from_id(ProjectId::new(1))
            .unwrap()
            .team_members
            .contains(&designer));
    }

    #[test]
    fn deletes_are_idempotent() {
        let mut store = ProjectStore::seeded();
        assert!(store.delete_project(ProjectId::new(2)));
        assert!(!store.delete_project(ProjectId::new(2)));
        assert!(!store.delete_task(TaskId::new(3)));
        assert!(!store.delete_time_entry(TimeEntryId::new(99)));
        assert!(!store.delete_team_member(MemberId::new(99)));
    }

    #[test]
    fn project_summary_matches_seed_portfolio() {
        let store = ProjectStore::seeded();
        let summary = store.project_summary();

        assert_eq!(summary.total_projects, 2);
        assert_eq!(summary.active_projects, 1);
        assert_eq!(summary.completed_projects, 0);
        assert!(almost_equal(summary.total_budget, 75000.0));
        assert!(almost_equal(summary.total_actual_cost, 18000.0));
        assert!(almost_equal(summary.total_hours, 18.0));
        assert!(almost_equal(summary.total_billable_hours, 18.0));
        // 4h and 6h at 75 plus 8h at 60.
        assert!(almost_equal(summary.total_revenue, 1230.0));
    }

    #[test]
    fn non_billable_hours_count_toward_hours_but_not_revenue() {
        let mut store = ProjectStore::seeded();
        store.add_time_entry(NewTimeEntry {
            task_id: TaskId::new(2),
            project_id: ProjectId::new(1),
            user_id: MemberId::new(2),
            date: NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            hours: 3.0,
            description: "Internal sync".to_string(),
            billable: false,
            rate: 60.0,
        });

        let summary = store.project_summary();
        assert!(almost_equal(summary.total_hours, 21.0));
        assert!(almost_equal(summary.total_billable_hours, 18.0));
        assert!(almost_equal(summary.total_revenue, 1230.0));
    }

    #[test]
    fn task_summary_counts_overdue_and_completion() {
        let store = ProjectStore::seeded();
        let summary = store.task_summary_on(NaiveDate::from_ymd_opt(2024, 1, 26).unwrap());

        assert_eq!(summary.total_tasks, 3);
        assert_eq!(summary.completed_tasks, 1);
        // Task 2 is past due and in progress; task 1 is past due but
        // completed; task 3 is not yet due.
        assert_eq!(summary.overdue_tasks, 1);
        assert!(almost_equal(summary.total_estimated_hours, 64.0));
        assert!(almost_equal(summary.total_actual_hours, 39.0));
        assert!(almost_equal(summary.completion_rate, 100.0 / 3.0));
    }

    #[test]
    fn due_today_is_not_overdue() {
        let store = ProjectStore::seeded();
        let summary = store.task_summary_on(NaiveDate::from_ymd_opt(2024, 1, 25).unwrap());
        assert_eq!(summary.overdue_tasks, 0);
    }

    #[test]
    fn completion_rate_is_zero_for_empty_collection() {
        let store = ProjectStore::new(Vec::new(), Vec::new(), Vec::new(), Vec::new()).unwrap();
        let summary = store.task_summary();
        assert_eq!(summary.total_tasks, 0);
        assert_eq!(summary.completion_rate, 0.0);
    }

    #[test]
    fn project_tasks_and_time_entries_filter_by_reference() {
        let store = ProjectStore::seeded();
        let website = ProjectId::new(1);

        let tasks: Vec<TaskId> = store.project_tasks(website).iter().map(|t| t.id).collect();
        assert_eq!(tasks, vec![TaskId::new(1), TaskId::new(2)]);

        let task_entries: Vec<TimeEntryId> = store
            .task_time_entries(TaskId::new(1))
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(task_entries, vec![TimeEntryId::new(1), TimeEntryId::new(2)]);

        assert_eq!(store.project_time_entries(website).len(), 3);
        assert!(store.project_time_entries(ProjectId::new(2)).is_empty());
    }

    #[test]
    fn filtered_projects_by_status_and_client_substring() {
        let store = ProjectStore::seeded();

        let active = store.filtered_projects(Some(ProjectStatus::Active), None);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Website Redesign");

        let tech = store.filtered_projects(None, Some("tech"));
        assert_eq!(tech.len(), 1);
        assert_eq!(tech[0].client, "TechCorp Inc");

        assert!(store
            .filtered_projects(Some(ProjectStatus::Planning), Some("tech"))
            .is_empty());
        assert_eq!(store.filtered_projects(None, None).len(), 2);
    }

    #[test]
    fn filtered_tasks_ands_all_provided_filters() {
        let store = ProjectStore::seeded();

        let high = store.filtered_tasks(None, Some(TaskPriority::High), None);
        assert_eq!(high.len(), 2);

        let sarah_high = store.filtered_tasks(None, Some(TaskPriority::High), Some(MemberId::new(2)));
        assert_eq!(sarah_high.len(), 1);
        assert_eq!(sarah_high[0].title, "Implement Frontend");

        assert!(store
            .filtered_tasks(
                Some(TaskStatus::Completed),
                Some(TaskPriority::High),
                Some(MemberId::new(2)),
            )
            .is_empty());
    }

    #[test]
    fn update_project_merges_patch_and_refreshes_updated_at() {
        let mut store = ProjectStore::seeded();
        let id = ProjectId::new(2);
        let before = store.project_from_id(id).unwrap().clone();

        store
            .update_project(
                id,
                ProjectPatch {
                    status: Some(ProjectStatus::Active),
                    actual_cost: Some(1200.0),
                    ..ProjectPatch::default()
                },
            )
            .unwrap();

        let after = store.project_from_id(id).unwrap();
        assert_eq!(after.status, ProjectStatus::Active);
        assert!(almost_equal(after.actual_cost, 1200.0));
        assert_eq!(after.name, before.name);
        assert!(almost_equal(after.budget, before.budget));
        assert!(after.updated_at > before.updated_at);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn update_task_refreshes_updated_at() {
        let mut store = ProjectStore::seeded();
        let id = TaskId::new(3);
        let before = store.task_from_id(id).unwrap().updated_at;

        store
            .update_task(
                id,
                TaskPatch {
                    status: Some(TaskStatus::InProgress),
                    actual_hours: Some(1.5),
                    ..TaskPatch::default()
                },
            )
            .unwrap();

        let after = store.task_from_id(id).unwrap();
        assert_eq!(after.status, TaskStatus::InProgress);
        assert!(after.updated_at > before);
    }

    #[test]
    fn updates_report_unknown_ids() {
        let mut store = ProjectStore::seeded();
        assert_eq!(
            store.update_project(ProjectId::new(99), ProjectPatch::default()),
            Err(NotFound::Project(ProjectId::new(99)))
        );
        assert_eq!(
            store.update_task(TaskId::new(99), TaskPatch::default()),
            Err(NotFound::Task(TaskId::new(99)))
        );
        assert_eq!(
            store.update_team_member(MemberId::new(99), TeamMemberPatch::default()),
            Err(NotFound::TeamMember(MemberId::new(99)))
        );
    }

    #[test]
    fn create_operations_prepend_and_assign_fresh_ids() {
        let mut store = ProjectStore::seeded();
        let project_id = store.add_project(NewProject {
            name: "Brand Refresh".to_string(),
            description: "New visual identity".to_string(),
            client: "TechCorp Inc".to_string(),
            status: ProjectStatus::Planning,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
            budget: 10000.0,
            actual_cost: 0.0,
            team_members: vec![MemberId::new(3)],
            progress: 0,
        });

        assert_eq!(project_id, ProjectId::new(3));
        assert_eq!(store.projects()[0].id, project_id);
        assert_eq!(store.projects()[0].created_at, store.projects()[0].updated_at);

        let task_id = store.add_task(new_task(
            project_id,
            TaskStatus::Todo,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        ));
        assert_eq!(task_id, TaskId::new(4));
        assert_eq!(store.tasks()[0].id, task_id);
    }

    #[test]
    fn persist_hook_fires_once_per_mutation_across_entities() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut store = ProjectStore::seeded();
        store.set_persist_hook(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let task_id = store.add_task(new_task(
            ProjectId::new(2),
            TaskStatus::Todo,
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
        ));
        store
            .update_task(task_id, TaskPatch::default())
            .unwrap();
        store.delete_task(task_id);
        // Misses mutate nothing and persist nothing.
        store.delete_task(task_id);
        let _ = store.update_time_entry(TimeEntryId::new(99), Default::default());

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
