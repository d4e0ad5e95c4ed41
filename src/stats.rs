//! Counters shown above the project and task lists.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::fields::{Priority, ProjectStatus, TaskStatus};
use crate::project::Project;
use crate::task::Task;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total: usize,
    pub high_priority: usize,
    pub in_development: usize,
    /// Sum of the projects' task counters.
    pub total_tasks: usize,
}

pub fn project_stats(projects: &[Project]) -> ProjectStats {
    projects.iter().fold(ProjectStats::default(), |mut acc, p| {
        acc.total += 1;
        if p.priority == Priority::High {
            acc.high_priority += 1;
        }
        if p.status == ProjectStatus::Development {
            acc.in_development += 1;
        }
        acc.total_tasks += p.task_count;
        acc
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub feedback: usize,
    pub bug: usize,
    /// Past the deadline and not completed.
    pub overdue: usize,
}

impl TaskStats {
    /// Count for one status filter tab.
    pub fn count(&self, status: Option<TaskStatus>) -> usize {
        match status {
            None => self.total,
            Some(TaskStatus::Completed) => self.completed,
            Some(TaskStatus::Progress) => self.in_progress,
            Some(TaskStatus::Feedback) => self.feedback,
            Some(TaskStatus::Bug) => self.bug,
        }
    }
}

pub fn task_stats<'a>(tasks: impl IntoIterator<Item = &'a Task>, now: NaiveDateTime) -> TaskStats {
    tasks.into_iter().fold(TaskStats::default(), |mut acc, t| {
        acc.total += 1;
        match t.status {
            TaskStatus::Completed => acc.completed += 1,
            TaskStatus::Progress => acc.in_progress += 1,
            TaskStatus::Feedback => acc.feedback += 1,
            TaskStatus::Bug => acc.bug += 1,
        }
        if t.is_overdue(now) {
            acc.overdue += 1;
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_state;
    use chrono::NaiveDate;

    #[test]
    fn test_project_stats_on_demo_data() {
        let state = demo_state();
        let stats = project_stats(&state.projects);
        assert_eq!(
            stats,
            ProjectStats { total: 3, high_priority: 2, in_development: 1, total_tasks: 4 }
        );
    }

    #[test]
    fn test_task_stats_counts_overdue_open_work() {
        let state = demo_state();
        let now = NaiveDate::from_ymd_opt(2024, 2, 18).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let stats = task_stats(&state.tasks, now);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.in_progress, 1);
        // Auth flow (Feb 15) and mobile fix (Feb 10) are late; CI/CD is done.
        assert_eq!(stats.overdue, 2);
        assert_eq!(stats.count(Some(TaskStatus::Bug)), 1);
        assert_eq!(stats.count(None), 4);
    }
}
