//! Enumerations and field types for projects, tasks and notifications.
//!
//! This module defines the closed value sets used across the store, the CLI
//! and the dashboard: project priority and status, task status, notification
//! kind and the colour theme.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Project importance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Default)]
pub enum Priority {
    #[serde(alias = "low")]
    Low,
    #[default]
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
}

/// Business area a project currently sits in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Default)]
pub enum ProjectStatus {
    #[default]
    #[serde(alias = "services")]
    Services,
    #[serde(rename = "Customer Care", alias = "customer-care")]
    CustomerCare,
    #[serde(alias = "development")]
    Development,
}

/// Task workflow status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[serde(alias = "feedback")]
    Feedback,
    #[serde(alias = "bug")]
    Bug,
    #[default]
    #[serde(alias = "progress")]
    Progress,
    #[serde(alias = "completed")]
    Completed,
}

/// Severity of a notification in the feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// Colour theme of the dashboard. Dark unless a preference says otherwise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

pub const PRIORITIES: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

pub const PROJECT_STATUSES: [ProjectStatus; 3] = [
    ProjectStatus::Services,
    ProjectStatus::CustomerCare,
    ProjectStatus::Development,
];

pub const TASK_STATUSES: [TaskStatus; 4] = [
    TaskStatus::Feedback,
    TaskStatus::Bug,
    TaskStatus::Progress,
    TaskStatus::Completed,
];

/// Format a priority for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
    }
}

/// Format a project status for display.
pub fn format_project_status(s: ProjectStatus) -> &'static str {
    match s {
        ProjectStatus::Services => "Services",
        ProjectStatus::CustomerCare => "Customer Care",
        ProjectStatus::Development => "Development",
    }
}

/// Format a task status for display.
pub fn format_task_status(s: TaskStatus) -> &'static str {
    match s {
        TaskStatus::Feedback => "Feedback",
        TaskStatus::Bug => "Bug",
        TaskStatus::Progress => "Progress",
        TaskStatus::Completed => "Completed",
    }
}

/// Format a notification kind for display.
pub fn format_notification_kind(k: NotificationKind) -> &'static str {
    match k {
        NotificationKind::Info => "info",
        NotificationKind::Success => "success",
        NotificationKind::Warning => "warning",
        NotificationKind::Error => "error",
    }
}

/// Format a theme for display and persistence.
pub fn format_theme(t: Theme) -> &'static str {
    match t {
        Theme::Light => "light",
        Theme::Dark => "dark",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_dashboard_values() {
        assert_eq!(serde_json::to_string(&ProjectStatus::CustomerCare).unwrap(), "\"Customer Care\"");
        assert_eq!(serde_json::to_string(&TaskStatus::Progress).unwrap(), "\"Progress\"");
        assert_eq!(serde_json::to_string(&NotificationKind::Warning).unwrap(), "\"warning\"");
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");

        let status: ProjectStatus = serde_json::from_str("\"customer-care\"").unwrap();
        assert_eq!(status, ProjectStatus::CustomerCare);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }
}
