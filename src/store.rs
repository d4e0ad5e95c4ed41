//! Application state store.
//!
//! The [`Store`] is the single owner of every collection the dashboard shows.
//! State is published as immutable [`AppState`] snapshots: each mutation
//! clones the current snapshot, applies the change and swaps in a new
//! `Arc<AppState>` with the next version number. Snapshots handed out earlier
//! never change, which is also what makes [`Store::undo`] possible.
//!
//! Operations that name something missing (update, delete, mark read) leave
//! the state alone and report `false`. Creating or re-pointing an entity at a
//! project or user that does not exist is refused with a [`StoreError`].

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::fields::Theme;
use crate::ids::IdGenerator;
use crate::notification::{Notification, NotificationDraft};
use crate::prefs::{MemoryPreferences, PreferenceStore};
use crate::project::{Project, ProjectDraft, ProjectPatch};
use crate::search;
use crate::seed;
use crate::task::{Task, TaskDraft, TaskPatch};
use crate::user::{User, UserDraft};

/// How many earlier snapshots are kept for undo.
pub const MAX_HISTORY: usize = 20;

/// One immutable version of everything the dashboard shows.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub version: u64,
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub notifications: Vec<Notification>,
    pub theme: Theme,
    pub sidebar_collapsed: bool,
}

impl AppState {
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Look a user up by email, ignoring case.
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        let email = email.trim().to_lowercase();
        self.users.iter().find(|u| u.email.to_lowercase() == email)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn notification(&self, id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    /// Tasks belonging to a project, in insertion order.
    pub fn tasks_in_project<'a>(&'a self, project_id: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.project_id == project_id)
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}

/// Owner of the current snapshot, the undo history and the id source.
pub struct Store {
    current: Arc<AppState>,
    history: VecDeque<Arc<AppState>>,
    ids: IdGenerator,
    prefs: Box<dyn PreferenceStore>,
}

impl Store {
    /// Start from `initial`, taking the theme from `prefs` when one was saved.
    pub fn new(mut initial: AppState, prefs: Box<dyn PreferenceStore>) -> Self {
        if let Some(theme) = prefs.load_theme() {
            initial.theme = theme;
        }
        debug!(
            projects = initial.projects.len(),
            tasks = initial.tasks.len(),
            theme = ?initial.theme,
            "Store initialised"
        );
        Store {
            current: Arc::new(initial),
            history: VecDeque::new(),
            ids: IdGenerator::new(),
            prefs,
        }
    }

    /// Demo data with preferences that are not persisted.
    pub fn in_memory() -> Self {
        Store::new(seed::demo_state(), Box::new(MemoryPreferences::default()))
    }

    /// Demo data with the given preference store.
    pub fn demo(prefs: Box<dyn PreferenceStore>) -> Self {
        Store::new(seed::demo_state(), prefs)
    }

    /// A handle on the current snapshot. It stays unchanged whatever happens
    /// to the store afterwards.
    pub fn snapshot(&self) -> Arc<AppState> {
        Arc::clone(&self.current)
    }

    pub fn state(&self) -> &AppState {
        &self.current
    }

    pub fn version(&self) -> u64 {
        self.current.version
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Forget every earlier snapshot. Sessions call this so undo never
    /// reaches past the point a user signed in.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn working_copy(&self) -> AppState {
        (*self.current).clone()
    }

    /// Publish `next` as the new current snapshot.
    fn commit(&mut self, mut next: AppState) {
        next.version = self.current.version + 1;
        let previous = std::mem::replace(&mut self.current, Arc::new(next));
        self.history.push_back(previous);
        if self.history.len() > MAX_HISTORY {
            self.history.pop_front();
        }
    }

    fn persist_theme(&self, theme: Theme) {
        if let Err(e) = self.prefs.save_theme(theme) {
            warn!(?theme, "Failed to persist theme preference: {e}");
        }
    }

    // ----- users -----

    /// Add a user to the directory. Emails are unique, ignoring case.
    pub fn register_user(&mut self, draft: UserDraft) -> Result<User, StoreError> {
        if self.current.user_by_email(&draft.email).is_some() {
            return Err(StoreError::DuplicateEmail(draft.email));
        }
        let user = User::from_draft(self.ids.next_id(), draft);
        let mut next = self.working_copy();
        next.users.push(user.clone());
        self.commit(next);
        info!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    // ----- projects -----

    /// Create a project with no tasks. The manager must exist.
    pub fn add_project(&mut self, draft: ProjectDraft) -> Result<Project, StoreError> {
        if self.current.user(&draft.manager_id).is_none() {
            return Err(StoreError::UnknownUser(draft.manager_id));
        }
        let project = Project::from_draft(self.ids.next_id(), draft, Utc::now());
        let mut next = self.working_copy();
        next.projects.push(project.clone());
        self.commit(next);
        info!(project_id = %project.id, name = %project.name, "Added project");
        Ok(project)
    }

    /// Merge `patch` into the project. Returns `Ok(false)` if there is no such
    /// project.
    pub fn update_project(&mut self, id: &str, patch: ProjectPatch) -> Result<bool, StoreError> {
        let Some(idx) = self.current.projects.iter().position(|p| p.id == id) else {
            debug!(project_id = id, "Update of unknown project ignored");
            return Ok(false);
        };
        if let Some(manager_id) = &patch.manager_id {
            if self.current.user(manager_id).is_none() {
                return Err(StoreError::UnknownUser(manager_id.clone()));
            }
        }
        let mut next = self.working_copy();
        patch.apply(&mut next.projects[idx], Utc::now());
        self.commit(next);
        info!(project_id = id, "Updated project");
        Ok(true)
    }

    /// Remove a project together with all of its tasks.
    pub fn delete_project(&mut self, id: &str) -> bool {
        if self.current.project(id).is_none() {
            debug!(project_id = id, "Delete of unknown project ignored");
            return false;
        }
        let mut next = self.working_copy();
        next.projects.retain(|p| p.id != id);
        let before = next.tasks.len();
        next.tasks.retain(|t| t.project_id != id);
        let cascaded = before - next.tasks.len();
        self.commit(next);
        info!(project_id = id, cascaded, "Deleted project");
        true
    }

    // ----- tasks -----

    /// Create a task and bump its project's counter. Both the project and the
    /// assignee must exist.
    pub fn add_task(&mut self, draft: TaskDraft) -> Result<Task, StoreError> {
        let Some(project_idx) = self.current.projects.iter().position(|p| p.id == draft.project_id) else {
            return Err(StoreError::UnknownProject(draft.project_id));
        };
        if self.current.user(&draft.assignee_id).is_none() {
            return Err(StoreError::UnknownUser(draft.assignee_id));
        }
        let task = Task::from_draft(self.ids.next_id(), draft, Utc::now());
        let mut next = self.working_copy();
        next.tasks.push(task.clone());
        next.projects[project_idx].task_count += 1;
        self.commit(next);
        info!(task_id = %task.id, project_id = %task.project_id, "Added task");
        Ok(task)
    }

    /// Merge `patch` into the task. Moving a task to another project moves one
    /// unit of `task_count` with it. Returns `Ok(false)` if there is no such
    /// task.
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Result<bool, StoreError> {
        let Some(idx) = self.current.tasks.iter().position(|t| t.id == id) else {
            debug!(task_id = id, "Update of unknown task ignored");
            return Ok(false);
        };
        let old_project = self.current.tasks[idx].project_id.clone();
        let moved_to = match &patch.project_id {
            Some(new_project) if *new_project != old_project => {
                if self.current.project(new_project).is_none() {
                    return Err(StoreError::UnknownProject(new_project.clone()));
                }
                Some(new_project.clone())
            }
            _ => None,
        };
        if let Some(assignee_id) = &patch.assignee_id {
            if self.current.user(assignee_id).is_none() {
                return Err(StoreError::UnknownUser(assignee_id.clone()));
            }
        }

        let mut next = self.working_copy();
        patch.apply(&mut next.tasks[idx], Utc::now());
        if let Some(new_project) = &moved_to {
            for project in next.projects.iter_mut() {
                if project.id == old_project {
                    project.task_count = project.task_count.saturating_sub(1);
                } else if project.id == *new_project {
                    project.task_count += 1;
                }
            }
        }
        self.commit(next);
        info!(task_id = id, moved_to = ?moved_to, "Updated task");
        Ok(true)
    }

    /// Remove a task and lower its project's counter, never below zero.
    pub fn delete_task(&mut self, id: &str) -> bool {
        let Some(idx) = self.current.tasks.iter().position(|t| t.id == id) else {
            debug!(task_id = id, "Delete of unknown task ignored");
            return false;
        };
        let mut next = self.working_copy();
        let removed = next.tasks.remove(idx);
        if let Some(project) = next.projects.iter_mut().find(|p| p.id == removed.project_id) {
            project.task_count = project.task_count.saturating_sub(1);
        }
        self.commit(next);
        info!(task_id = id, project_id = %removed.project_id, "Deleted task");
        true
    }

    // ----- notifications -----

    /// Post a notification at the top of the feed.
    pub fn add_notification(&mut self, draft: NotificationDraft) -> Notification {
        let notification = Notification::from_draft(self.ids.next_id(), draft, Utc::now());
        let mut next = self.working_copy();
        next.notifications.insert(0, notification.clone());
        self.commit(next);
        debug!(notification_id = %notification.id, kind = ?notification.kind, "Posted notification");
        notification
    }

    /// Mark a notification read. Marking it again changes nothing.
    pub fn mark_notification_read(&mut self, id: &str) -> bool {
        let Some(already_read) = self.current.notification(id).map(|n| n.read) else {
            return false;
        };
        if !already_read {
            let mut next = self.working_copy();
            if let Some(n) = next.notifications.iter_mut().find(|n| n.id == id) {
                n.read = true;
            }
            self.commit(next);
        }
        true
    }

    pub fn unread_notifications(&self) -> Vec<&Notification> {
        self.current.notifications.iter().filter(|n| !n.read).collect()
    }

    // ----- UI flags -----

    /// Flip between light and dark and remember the choice.
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.current.theme.toggled();
        self.set_theme(theme);
        theme
    }

    /// Switch to `theme` and remember the choice.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.current.theme != theme {
            let mut next = self.working_copy();
            next.theme = theme;
            self.commit(next);
        }
        self.persist_theme(theme);
        info!(?theme, "Theme set");
    }

    /// Collapse or expand the sidebar, returning the new collapsed flag.
    pub fn toggle_sidebar(&mut self) -> bool {
        let mut next = self.working_copy();
        next.sidebar_collapsed = !next.sidebar_collapsed;
        let collapsed = next.sidebar_collapsed;
        self.commit(next);
        collapsed
    }

    // ----- history -----

    /// Go back to the previous snapshot. It is republished under a new
    /// version so versions keep increasing.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.pop_back() else {
            return false;
        };
        let mut restored = (*previous).clone();
        restored.version = self.current.version + 1;
        let theme_changed = restored.theme != self.current.theme;
        self.current = Arc::new(restored);
        if theme_changed {
            self.persist_theme(self.current.theme);
        }
        info!(version = self.current.version, "Undid last change");
        true
    }

    // ----- search -----

    pub fn search_projects(&self, query: &str) -> Vec<&Project> {
        search::search_projects(&self.current, query)
    }

    pub fn search_tasks(&self, query: &str) -> Vec<&Task> {
        search::search_tasks(&self.current, query)
    }
}
