//! Enumerations for TUI state management.

use crate::fields::TaskStatus;

/// Which screen currently has the keyboard.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Screen {
    Login,
    Dashboard,
    ProjectForm,
    TaskForm,
    Help,
    Confirm,
}

/// Main panel content of the dashboard.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum View {
    #[default]
    Projects,
    MyTasks,
    Notifications,
}

impl View {
    pub const ALL: [View; 3] = [View::Projects, View::MyTasks, View::Notifications];

    pub fn title(self) -> &'static str {
        match self {
            View::Projects => "Projects",
            View::MyTasks => "My Tasks",
            View::Notifications => "Notifications",
        }
    }

    pub fn next(self) -> Self {
        match self {
            View::Projects => View::MyTasks,
            View::MyTasks => View::Notifications,
            View::Notifications => View::Projects,
        }
    }
}

/// Whether the auth screen shows the login or the signup form.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

/// Input mode for the dashboard search box.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    None,
    Search,
}

/// Whether a form creates a new entity or edits the one with this id.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FormMode {
    Create,
    Edit(String),
}

/// What the confirm dialog deletes when accepted.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PendingDelete {
    Project { id: String, name: String },
    Task { id: String, name: String },
}

impl PendingDelete {
    pub fn describe(&self) -> String {
        match self {
            PendingDelete::Project { name, .. } => format!("Delete project \"{name}\" and all its tasks"),
            PendingDelete::Task { name, .. } => format!("Delete task \"{name}\""),
        }
    }
}

/// Next entry of the My Tasks status filter: All, then each status in turn.
pub fn next_status_filter(current: Option<TaskStatus>) -> Option<TaskStatus> {
    match current {
        None => Some(TaskStatus::Feedback),
        Some(TaskStatus::Feedback) => Some(TaskStatus::Bug),
        Some(TaskStatus::Bug) => Some(TaskStatus::Progress),
        Some(TaskStatus::Progress) => Some(TaskStatus::Completed),
        Some(TaskStatus::Completed) => None,
    }
}
