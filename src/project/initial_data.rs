use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use super::record::{Project, ProjectId, ProjectStatus};
use super::task::{Task, TaskId, TaskPriority, TaskStatus};
use super::team::{MemberId, TeamMember};
use super::time_entry::{TimeEntry, TimeEntryId};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("seed dates are valid")
}

fn timestamp(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("seed timestamps are valid")
}

/// The built-in team a fresh workspace starts from.
pub fn initial_team_members() -> Vec<TeamMember> {
    vec![
        TeamMember {
            id: MemberId::new(1),
            name: "John Smith".to_string(),
            email: "john@company.com".to_string(),
            role: "Project Manager".to_string(),
            avatar: None,
        },
        TeamMember {
            id: MemberId::new(2),
            name: "Sarah Johnson".to_string(),
            email: "sarah@company.com".to_string(),
            role: "Developer".to_string(),
            avatar: None,
        },
        TeamMember {
            id: MemberId::new(3),
            name: "Mike Davis".to_string(),
            email: "mike@company.com".to_string(),
            role: "Designer".to_string(),
            avatar: None,
        },
    ]
}

/// The built-in project portfolio.
pub fn initial_projects() -> Vec<Project> {
    vec![
        Project {
            id: ProjectId::new(1),
            name: "Website Redesign".to_string(),
            description: "Complete redesign of company website".to_string(),
            client: "TechCorp Inc".to_string(),
            status: ProjectStatus::Active,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 3, 31),
            budget: 25000.0,
            actual_cost: 18000.0,
            team_members: vec![MemberId::new(1), MemberId::new(2), MemberId::new(3)],
            progress: 65,
            created_at: timestamp(2024, 1, 1),
            updated_at: timestamp(2024, 1, 15),
        },
        Project {
            id: ProjectId::new(2),
            name: "Mobile App Development".to_string(),
            description: "iOS and Android app for client".to_string(),
            client: "StartupXYZ".to_string(),
            status: ProjectStatus::Planning,
            start_date: date(2024, 2, 1),
            end_date: date(2024, 6, 30),
            budget: 50000.0,
            actual_cost: 0.0,
            team_members: vec![MemberId::new(1), MemberId::new(2)],
            progress: 0,
            created_at: timestamp(2024, 1, 10),
            updated_at: timestamp(2024, 1, 10),
        },
    ]
}

/// The built-in task backlog.
pub fn initial_tasks() -> Vec<Task> {
    vec![
        Task {
            id: TaskId::new(1),
            title: "Design Homepage".to_string(),
            description: "Create new homepage design mockups".to_string(),
            project_id: ProjectId::new(1),
            assigned_to: MemberId::new(3),
            status: TaskStatus::Completed,
            priority: TaskPriority::High,
            due_date: date(2024, 1, 10),
            estimated_hours: 16.0,
            actual_hours: 14.0,
            created_at: timestamp(2024, 1, 1),
            updated_at: timestamp(2024, 1, 10),
        },
        Task {
            id: TaskId::new(2),
            title: "Implement Frontend".to_string(),
            description: "Build homepage using React".to_string(),
            project_id: ProjectId::new(1),
            assigned_to: MemberId::new(2),
            status: TaskStatus::InProgress,
            priority: TaskPriority::High,
            due_date: date(2024, 1, 25),
            estimated_hours: 40.0,
            actual_hours: 25.0,
            created_at: timestamp(2024, 1, 5),
            updated_at: timestamp(2024, 1, 15),
        },
        Task {
            id: TaskId::new(3),
            title: "Project Planning".to_string(),
            description: "Create project timeline and requirements".to_string(),
            project_id: ProjectId::new(2),
            assigned_to: MemberId::new(1),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: date(2024, 1, 31),
            estimated_hours: 8.0,
            actual_hours: 0.0,
            created_at: timestamp(2024, 1, 10),
            updated_at: timestamp(2024, 1, 10),
        },
    ]
}

/// The built-in time log.
pub fn initial_time_entries() -> Vec<TimeEntry> {
    vec![
        TimeEntry {
            id: TimeEntryId::new(1),
            task_id: TaskId::new(1),
            project_id: ProjectId::new(1),
            user_id: MemberId::new(3),
            date: date(2024, 1, 8),
            hours: 4.0,
            description: "Created initial design concepts".to_string(),
            billable: true,
            rate: 75.0,
            created_at: timestamp(2024, 1, 8),
        },
        TimeEntry {
            id: TimeEntryId::new(2),
            task_id: TaskId::new(1),
            project_id: ProjectId::new(1),
            user_id: MemberId::new(3),
            date: date(2024, 1, 9),
            hours: 6.0,
            description: "Refined designs based on feedback".to_string(),
            billable: true,
            rate: 75.0,
            created_at: timestamp(2024, 1, 9),
        },
        TimeEntry {
            id: TimeEntryId::new(3),
            task_id: TaskId::new(2),
            project_id: ProjectId::new(1),
            user_id: MemberId::new(2),
            date: date(2024, 1, 15),
            hours: 8.0,
            description: "Implemented homepage components".to_string(),
            billable: true,
            rate: 60.0,
            created_at: timestamp(2024, 1, 15),
        },
    ]
}
