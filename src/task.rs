//! Task records and the inputs used to create and edit them.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::TaskStatus;

/// A unit of work inside a project, assigned to one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    pub assignee_id: String,
    pub project_id: String,
    pub tags: Vec<String>,
    pub deadline: NaiveDateTime,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything the caller supplies when creating a task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub name: String,
    pub assignee_id: String,
    pub project_id: String,
    pub tags: Vec<String>,
    pub deadline: NaiveDateTime,
    pub status: TaskStatus,
    pub image: Option<String>,
    pub description: String,
}

/// Partial update of a task. `None` leaves the field untouched; for `image`,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub assignee_id: Option<String>,
    pub project_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub deadline: Option<NaiveDateTime>,
    pub status: Option<TaskStatus>,
    pub image: Option<Option<String>>,
    pub description: Option<String>,
}

impl Task {
    pub fn from_draft(id: String, draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Task {
            id,
            name: draft.name,
            assignee_id: draft.assignee_id,
            project_id: draft.project_id,
            tags: draft.tags,
            deadline: draft.deadline,
            status: draft.status,
            image: draft.image,
            description: draft.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Past its deadline and not yet completed.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.deadline < now && self.status != TaskStatus::Completed
    }
}

impl TaskPatch {
    /// Merge the patch into `task` and stamp `updated_at`.
    pub fn apply(self, task: &mut Task, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            task.name = name;
        }
        if let Some(assignee_id) = self.assignee_id {
            task.assignee_id = assignee_id;
        }
        if let Some(project_id) = self.project_id {
            task.project_id = project_id;
        }
        if let Some(tags) = self.tags {
            task.tags = tags;
        }
        if let Some(deadline) = self.deadline {
            task.deadline = deadline;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(image) = self.image {
            task.image = image;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        task.updated_at = now;
    }

    /// Patch that overwrites every editable field with the draft's values.
    pub fn from_draft(draft: TaskDraft) -> Self {
        TaskPatch {
            name: Some(draft.name),
            assignee_id: Some(draft.assignee_id),
            project_id: Some(draft.project_id),
            tags: Some(draft.tags),
            deadline: Some(draft.deadline),
            status: Some(draft.status),
            image: Some(draft.image),
            description: Some(draft.description),
        }
    }
}
