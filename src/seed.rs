//! Demo data the dashboard starts with.
//!
//! Three users, three projects, four tasks and three notifications. Project
//! task counters agree with the seeded tasks.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::fields::{NotificationKind, Priority, ProjectStatus, TaskStatus};
use crate::notification::Notification;
use crate::project::Project;
use crate::store::AppState;
use crate::task::Task;
use crate::user::User;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap_or_default()
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).single().unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn users() -> Vec<User> {
    let user = |id: &str, first: &str, last: &str, email: &str| User {
        id: id.into(),
        first_name: first.into(),
        last_name: last.into(),
        email: email.into(),
        avatar: None,
    };
    vec![
        user("1", "John", "Doe", "john@example.com"),
        user("2", "Jane", "Smith", "jane@example.com"),
        user("3", "Mike", "Johnson", "mike@example.com"),
    ]
}

pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: "1".into(),
            name: "E-commerce Platform".into(),
            tags: strings(&["Web Development", "React", "Node.js"]),
            manager_id: "1".into(),
            deadline: date(2024, 12, 15),
            priority: Priority::High,
            status: ProjectStatus::Services,
            image: None,
            description: "Building a comprehensive e-commerce platform with modern technologies.".into(),
            task_count: 2,
            created_at: utc(2024, 1, 15, 0, 0),
            updated_at: utc(2024, 1, 20, 0, 0),
        },
        Project {
            id: "2".into(),
            name: "Mobile Banking App".into(),
            tags: strings(&["Mobile", "React Native", "Security"]),
            manager_id: "2".into(),
            deadline: date(2024, 11, 30),
            priority: Priority::High,
            status: ProjectStatus::CustomerCare,
            image: None,
            description: "Secure mobile banking application with biometric authentication.".into(),
            task_count: 1,
            created_at: utc(2024, 1, 10, 0, 0),
            updated_at: utc(2024, 1, 18, 0, 0),
        },
        Project {
            id: "3".into(),
            name: "AI Dashboard".into(),
            tags: strings(&["AI/ML", "Python", "Data Visualization"]),
            manager_id: "3".into(),
            deadline: date(2024, 12, 1),
            priority: Priority::Medium,
            status: ProjectStatus::Development,
            image: None,
            description: "AI-powered dashboard for business intelligence and analytics.".into(),
            task_count: 1,
            created_at: utc(2024, 1, 12, 0, 0),
            updated_at: utc(2024, 1, 19, 0, 0),
        },
    ]
}

pub fn tasks() -> Vec<Task> {
    let task = |id: &str,
                name: &str,
                assignee: &str,
                project: &str,
                tags: &[&str],
                deadline: NaiveDateTime,
                status: TaskStatus,
                description: &str,
                created: DateTime<Utc>,
                updated: DateTime<Utc>| Task {
        id: id.into(),
        name: name.into(),
        assignee_id: assignee.into(),
        project_id: project.into(),
        tags: strings(tags),
        deadline,
        status,
        image: None,
        description: description.into(),
        created_at: created,
        updated_at: updated,
    };
    vec![
        task(
            "1",
            "Design user authentication flow",
            "1",
            "1",
            &["UI/UX", "Security"],
            local(2024, 2, 15, 14, 30),
            TaskStatus::Progress,
            "Create wireframes and prototypes for the authentication system.",
            utc(2024, 1, 15, 0, 0),
            utc(2024, 1, 20, 0, 0),
        ),
        task(
            "2",
            "Implement payment gateway",
            "2",
            "1",
            &["Backend", "Payment"],
            local(2024, 2, 20, 16, 0),
            TaskStatus::Feedback,
            "Integrate Stripe payment gateway for secure transactions.",
            utc(2024, 1, 16, 0, 0),
            utc(2024, 1, 21, 0, 0),
        ),
        task(
            "3",
            "Fix mobile responsiveness",
            "3",
            "2",
            &["Frontend", "Mobile"],
            local(2024, 2, 10, 12, 0),
            TaskStatus::Bug,
            "Resolve mobile layout issues on various screen sizes.",
            utc(2024, 1, 17, 0, 0),
            utc(2024, 1, 22, 0, 0),
        ),
        task(
            "4",
            "Setup CI/CD pipeline",
            "1",
            "3",
            &["DevOps", "Automation"],
            local(2024, 2, 25, 10, 0),
            TaskStatus::Completed,
            "Configure automated testing and deployment pipeline.",
            utc(2024, 1, 18, 0, 0),
            utc(2024, 1, 23, 0, 0),
        ),
    ]
}

pub fn notifications() -> Vec<Notification> {
    let notification = |id: &str, message: &str, kind, read, at| Notification {
        id: id.into(),
        message: message.into(),
        kind,
        read,
        created_at: at,
    };
    vec![
        notification(
            "1",
            "New task assigned to you: Design user authentication flow",
            NotificationKind::Info,
            false,
            utc(2024, 1, 20, 10, 30),
        ),
        notification(
            "2",
            "Project deadline approaching: Mobile Banking App",
            NotificationKind::Warning,
            false,
            utc(2024, 1, 19, 15, 45),
        ),
        notification(
            "3",
            "Task completed: Setup CI/CD pipeline",
            NotificationKind::Success,
            true,
            utc(2024, 1, 18, 9, 15),
        ),
    ]
}

/// The full demo state with default UI flags.
pub fn demo_state() -> AppState {
    AppState {
        users: users(),
        projects: projects(),
        tasks: tasks(),
        notifications: notifications(),
        ..AppState::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_counters_match_tasks() {
        let state = demo_state();
        for project in &state.projects {
            let actual = state.tasks.iter().filter(|t| t.project_id == project.id).count();
            assert_eq!(project.task_count, actual, "project {}", project.name);
        }
    }

    #[test]
    fn test_seeded_references_resolve() {
        let state = demo_state();
        for task in &state.tasks {
            assert!(state.projects.iter().any(|p| p.id == task.project_id));
            assert!(state.users.iter().any(|u| u.id == task.assignee_id));
        }
        for project in &state.projects {
            assert!(state.users.iter().any(|u| u.id == project.manager_id));
        }
    }
}
