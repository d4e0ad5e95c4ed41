//! Plain-text tables for the listing commands.

use chrono::{NaiveDate, NaiveDateTime};

use crate::fields::*;
use crate::notification::Notification;
use crate::project::Project;
use crate::stats::{ProjectStats, TaskStats};
use crate::store::AppState;
use crate::task::Task;

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Format a deadline relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: NaiveDate, today: NaiveDate) -> String {
    let days = (due - today).num_days();
    match days {
        0 => "today".into(),
        1 => "tomorrow".into(),
        d if d > 1 => format!("in {d}d"),
        d => format!("{}d late", -d),
    }
}

fn tags_suffix(tags: &[String]) -> String {
    if tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", tags.join(","))
    }
}

fn person(state: &AppState, id: &str) -> String {
    state
        .user(id)
        .map(|u| u.full_name())
        .unwrap_or_else(|| "-".into())
}

pub fn print_project_stats(stats: &ProjectStats) {
    println!(
        "Total: {}  High priority: {}  In development: {}  Tasks: {}",
        stats.total, stats.high_priority, stats.in_development, stats.total_tasks
    );
}

pub fn print_task_stats(stats: &TaskStats) {
    println!(
        "Total: {}  Completed: {}  In progress: {}  Overdue: {}",
        stats.total, stats.completed, stats.in_progress, stats.overdue
    );
}

pub fn print_projects_table(state: &AppState, projects: &[&Project], today: NaiveDate) {
    println!(
        "{:<14} {:<7} {:<14} {:<5} {:<12} {:<16} {}",
        "ID", "Pri", "Status", "Tasks", "Deadline", "Manager", "Name [tags]"
    );
    for p in projects {
        println!(
            "{:<14} {:<7} {:<14} {:<5} {:<12} {:<16} {}{}",
            truncate(&p.id, 14),
            format_priority(p.priority),
            format_project_status(p.status),
            p.task_count,
            format_due_relative(p.deadline, today),
            truncate(&person(state, &p.manager_id), 16),
            p.name,
            tags_suffix(&p.tags)
        );
    }
}

pub fn print_tasks_table(state: &AppState, tasks: &[&Task], now: NaiveDateTime) {
    println!(
        "{:<14} {:<10} {:<12} {:<16} {:<18} {}",
        "ID", "Status", "Due", "Assignee", "Project", "Name [tags]"
    );
    for t in tasks {
        let project = state
            .project(&t.project_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "-".into());
        let due = if t.is_overdue(now) {
            format!("{}!", format_due_relative(t.deadline.date(), now.date()))
        } else {
            format_due_relative(t.deadline.date(), now.date())
        };
        println!(
            "{:<14} {:<10} {:<12} {:<16} {:<18} {}{}",
            truncate(&t.id, 14),
            format_task_status(t.status),
            due,
            truncate(&person(state, &t.assignee_id), 16),
            truncate(&project, 18),
            t.name,
            tags_suffix(&t.tags)
        );
    }
}

pub fn print_notifications(notifications: &[&Notification]) {
    for n in notifications {
        let marker = if n.read { " " } else { "*" };
        println!(
            "{} {:<8} {}  {}",
            marker,
            format_notification_kind(n.kind),
            n.created_at.format("%Y-%m-%d %H:%M"),
            n.message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("E-commerce Platform", 8), "E-comme…");
        assert_eq!(truncate("E-commerce Platform", 8).chars().count(), 8);
    }

    #[test]
    fn test_format_due_relative() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        assert_eq!(format_due_relative(today, today), "today");
        assert_eq!(format_due_relative(today.succ_opt().unwrap(), today), "tomorrow");
        assert_eq!(format_due_relative(NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(), today), "in 5d");
        assert_eq!(format_due_relative(NaiveDate::from_ymd_opt(2024, 2, 13).unwrap(), today), "2d late");
    }
}
