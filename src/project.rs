//! Project records and the inputs used to create and edit them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::{Priority, ProjectStatus};

/// A project with its manager, deadline and a denormalised task counter.
///
/// `task_count` is owned by the store: it is bumped and lowered as tasks are
/// added, moved and removed, and cannot be set through a [`ProjectPatch`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
    pub manager_id: String,
    pub deadline: NaiveDate,
    pub priority: Priority,
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub description: String,
    pub task_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything the caller supplies when creating a project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub tags: Vec<String>,
    pub manager_id: String,
    pub deadline: NaiveDate,
    pub priority: Priority,
    pub status: ProjectStatus,
    pub image: Option<String>,
    pub description: String,
}

/// Partial update of a project. `None` leaves the field untouched; for
/// `image`, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
    pub manager_id: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub status: Option<ProjectStatus>,
    pub image: Option<Option<String>>,
    pub description: Option<String>,
}

impl Project {
    /// Build a fresh project with no tasks, created and updated at `now`.
    pub fn from_draft(id: String, draft: ProjectDraft, now: DateTime<Utc>) -> Self {
        Project {
            id,
            name: draft.name,
            tags: draft.tags,
            manager_id: draft.manager_id,
            deadline: draft.deadline,
            priority: draft.priority,
            status: draft.status,
            image: draft.image,
            description: draft.description,
            task_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

impl ProjectPatch {
    /// Merge the patch into `project` and stamp `updated_at`.
    pub fn apply(self, project: &mut Project, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(tags) = self.tags {
            project.tags = tags;
        }
        if let Some(manager_id) = self.manager_id {
            project.manager_id = manager_id;
        }
        if let Some(deadline) = self.deadline {
            project.deadline = deadline;
        }
        if let Some(priority) = self.priority {
            project.priority = priority;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(image) = self.image {
            project.image = image;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        project.updated_at = now;
    }

    /// Patch that overwrites every editable field with the draft's values.
    pub fn from_draft(draft: ProjectDraft) -> Self {
        ProjectPatch {
            name: Some(draft.name),
            tags: Some(draft.tags),
            manager_id: Some(draft.manager_id),
            deadline: Some(draft.deadline),
            priority: Some(draft.priority),
            status: Some(draft.status),
            image: Some(draft.image),
            description: Some(draft.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn draft() -> ProjectDraft {
        ProjectDraft {
            name: "Demo".into(),
            tags: vec!["Rust".into(), "Rust".into()],
            manager_id: "1".into(),
            deadline: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            priority: Priority::High,
            status: ProjectStatus::Development,
            image: Some("cover.png".into()),
            description: "A demo".into(),
        }
    }

    #[test]
    fn test_from_draft_keeps_duplicate_tags() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let project = Project::from_draft("42".into(), draft(), now);
        assert_eq!(project.tags, vec!["Rust", "Rust"]);
        assert_eq!(project.task_count, 0);
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn test_patch_merges_and_clears_image() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let mut project = Project::from_draft("42".into(), draft(), now);
        let later = now + Duration::hours(1);
        ProjectPatch {
            name: Some("Renamed".into()),
            image: Some(None),
            ..Default::default()
        }
        .apply(&mut project, later);

        assert_eq!(project.name, "Renamed");
        assert_eq!(project.image, None);
        assert_eq!(project.priority, Priority::High);
        assert_eq!(project.created_at, now);
        assert_eq!(project.updated_at, later);
    }
}
