//! Project and task forms for the terminal user interface.
//!
//! Each form keeps its text inputs and selector positions, moves focus
//! between them in a fixed order and turns the entered values into a draft.
//! Failed submissions leave per-field messages in `errors`.

use crate::fields::{Priority, ProjectStatus, TaskStatus, PRIORITIES, PROJECT_STATUSES, TASK_STATUSES};
use crate::project::{Project, ProjectDraft};
use crate::store::AppState;
use crate::task::{Task, TaskDraft};
use crate::tui::input::InputField;
use crate::validation::{parse_deadline_date, parse_deadline_datetime, require, split_tags, FieldErrors};

/// Field order shared by both forms: five text inputs, then three selectors.
pub const NAME_ORDER: usize = 0;
pub const DESCRIPTION_ORDER: usize = 1;
pub const TAGS_ORDER: usize = 2;
pub const DEADLINE_ORDER: usize = 3;
pub const IMAGE_ORDER: usize = 4;
pub const FIRST_SELECTOR_ORDER: usize = 5;
pub const SECOND_SELECTOR_ORDER: usize = 6;
pub const THIRD_SELECTOR_ORDER: usize = 7;
pub const FIELD_COUNT: usize = 8;

/// A person or project a selector can point at: `(id, label)`.
pub type Choice = (String, String);

fn user_choices(state: &AppState) -> Vec<Choice> {
    state.users.iter().map(|u| (u.id.clone(), u.full_name())).collect()
}

fn project_choices(state: &AppState) -> Vec<Choice> {
    state.projects.iter().map(|p| (p.id.clone(), p.name.clone())).collect()
}

fn position_of(choices: &[Choice], id: &str) -> Option<usize> {
    choices.iter().position(|(cid, _)| cid == id)
}

/// Step an optional selector. From nothing, right picks the first entry and
/// left the last.
fn cycle_choice(current: Option<usize>, len: usize, right: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        None if right => 0,
        None => len - 1,
        Some(i) if right => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
    })
}

fn cycle_index(current: usize, len: usize, right: bool) -> usize {
    cycle_choice(Some(current), len, right).unwrap_or(0)
}

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// The five text inputs both forms share.
#[derive(Clone, Debug, Default)]
pub struct TextFields {
    pub name: InputField,
    pub description: InputField,
    pub tags: InputField,
    pub deadline: InputField,
    pub image: InputField,
}

impl TextFields {
    fn at(&mut self, order: usize) -> Option<&mut InputField> {
        match order {
            NAME_ORDER => Some(&mut self.name),
            DESCRIPTION_ORDER => Some(&mut self.description),
            TAGS_ORDER => Some(&mut self.tags),
            DEADLINE_ORDER => Some(&mut self.deadline),
            IMAGE_ORDER => Some(&mut self.image),
            _ => None,
        }
    }

    fn activate(&mut self, order: usize) {
        for i in 0..FIRST_SELECTOR_ORDER {
            if let Some(field) = self.at(i) {
                field.active = i == order;
            }
        }
    }
}

/// Focus handling common to both forms.
pub trait FormFocus {
    fn current_field(&self) -> usize;
    fn set_current_field(&mut self, order: usize);
    fn text_fields(&mut self) -> &mut TextFields;
    /// Step the selector at `order`.
    fn cycle_selector(&mut self, order: usize, right: bool);

    fn next_field(&mut self) {
        let next = (self.current_field() + 1) % FIELD_COUNT;
        self.set_current_field(next);
    }

    fn prev_field(&mut self) {
        let prev = (self.current_field() + FIELD_COUNT - 1) % FIELD_COUNT;
        self.set_current_field(prev);
    }

    fn handle_char(&mut self, c: char) {
        let order = self.current_field();
        if let Some(field) = self.text_fields().at(order) {
            field.handle_char(c);
        }
    }

    fn handle_backspace(&mut self) {
        let order = self.current_field();
        if let Some(field) = self.text_fields().at(order) {
            field.handle_backspace();
        }
    }

    fn handle_delete(&mut self) {
        let order = self.current_field();
        if let Some(field) = self.text_fields().at(order) {
            field.handle_delete();
        }
    }

    /// Move the cursor in a text input, or change a selector.
    fn handle_left_right(&mut self, right: bool) {
        let order = self.current_field();
        match self.text_fields().at(order) {
            Some(field) if right => field.move_cursor_right(),
            Some(field) => field.move_cursor_left(),
            None => self.cycle_selector(order, right),
        }
    }
}

/// Project create/edit form.
#[derive(Clone, Debug)]
pub struct ProjectForm {
    pub text: TextFields,
    pub managers: Vec<Choice>,
    pub manager: Option<usize>,
    pub priority: usize,
    pub status: usize,
    pub current_field: usize,
    pub errors: FieldErrors,
}

pub const MANAGER_ORDER: usize = FIRST_SELECTOR_ORDER;
pub const PRIORITY_ORDER: usize = SECOND_SELECTOR_ORDER;
pub const PROJECT_STATUS_ORDER: usize = THIRD_SELECTOR_ORDER;

impl ProjectForm {
    /// Empty form. No manager is preselected.
    pub fn new(state: &AppState) -> Self {
        let mut form = ProjectForm {
            text: TextFields::default(),
            managers: user_choices(state),
            manager: None,
            priority: PRIORITIES.iter().position(|&p| p == Priority::default()).unwrap_or(0),
            status: 0,
            current_field: NAME_ORDER,
            errors: FieldErrors::new(),
        };
        form.text.activate(NAME_ORDER);
        form
    }

    /// Form populated from an existing project.
    pub fn from_project(state: &AppState, project: &Project) -> Self {
        let mut form = Self::new(state);
        form.text.name = InputField::with_value(&project.name);
        form.text.description = InputField::with_value(&project.description);
        form.text.tags = InputField::with_value(&project.tags.join(", "));
        form.text.deadline = InputField::with_value(&project.deadline.format("%Y-%m-%d").to_string());
        form.text.image = InputField::with_value(project.image.as_deref().unwrap_or(""));
        form.manager = position_of(&form.managers, &project.manager_id);
        form.priority = PRIORITIES.iter().position(|&p| p == project.priority).unwrap_or(0);
        form.status = PROJECT_STATUSES.iter().position(|&s| s == project.status).unwrap_or(0);
        form.text.activate(NAME_ORDER);
        form
    }

    pub fn selected_priority(&self) -> Priority {
        PRIORITIES.get(self.priority).copied().unwrap_or_default()
    }

    pub fn selected_status(&self) -> ProjectStatus {
        PROJECT_STATUSES.get(self.status).copied().unwrap_or_default()
    }

    pub fn selected_manager(&self) -> Option<&Choice> {
        self.manager.and_then(|i| self.managers.get(i))
    }

    /// Validate the entered values and build a draft.
    pub fn to_draft(&self) -> Result<ProjectDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.text.name.value, "Project name is required");
        if self.selected_manager().is_none() {
            errors.insert("manager", "Project manager is required");
        }
        require(&mut errors, "deadline", &self.text.deadline.value, "Deadline is required");
        let deadline = parse_deadline_date(&self.text.deadline.value);
        if deadline.is_none() {
            errors.insert("deadline", "Deadline must look like YYYY-MM-DD");
        }

        match (deadline, self.selected_manager()) {
            (Some(deadline), Some((manager_id, _))) if errors.is_empty() => Ok(ProjectDraft {
                name: self.text.name.value.trim().to_string(),
                tags: split_tags(&self.text.tags.value),
                manager_id: manager_id.clone(),
                deadline,
                priority: self.selected_priority(),
                status: self.selected_status(),
                image: optional_text(&self.text.image.value),
                description: self.text.description.value.trim().to_string(),
            }),
            _ => Err(errors),
        }
    }
}

impl FormFocus for ProjectForm {
    fn current_field(&self) -> usize {
        self.current_field
    }

    fn set_current_field(&mut self, order: usize) {
        self.current_field = order;
        self.text.activate(order);
    }

    fn text_fields(&mut self) -> &mut TextFields {
        &mut self.text
    }

    fn cycle_selector(&mut self, order: usize, right: bool) {
        match order {
            MANAGER_ORDER => self.manager = cycle_choice(self.manager, self.managers.len(), right),
            PRIORITY_ORDER => self.priority = cycle_index(self.priority, PRIORITIES.len(), right),
            PROJECT_STATUS_ORDER => self.status = cycle_index(self.status, PROJECT_STATUSES.len(), right),
            _ => {}
        }
    }
}

/// Task create/edit form.
#[derive(Clone, Debug)]
pub struct TaskForm {
    pub text: TextFields,
    pub assignees: Vec<Choice>,
    pub projects: Vec<Choice>,
    pub assignee: Option<usize>,
    pub project: Option<usize>,
    pub status: usize,
    pub current_field: usize,
    pub errors: FieldErrors,
}

pub const ASSIGNEE_ORDER: usize = FIRST_SELECTOR_ORDER;
pub const TASK_PROJECT_ORDER: usize = SECOND_SELECTOR_ORDER;
pub const TASK_STATUS_ORDER: usize = THIRD_SELECTOR_ORDER;

impl TaskForm {
    /// Empty form, with `assignee_id` preselected when given.
    pub fn new(state: &AppState, assignee_id: Option<&str>) -> Self {
        let assignees = user_choices(state);
        let assignee = assignee_id.and_then(|id| position_of(&assignees, id));
        let mut form = TaskForm {
            text: TextFields::default(),
            assignees,
            projects: project_choices(state),
            assignee,
            project: None,
            status: TASK_STATUSES.iter().position(|&s| s == TaskStatus::default()).unwrap_or(0),
            current_field: NAME_ORDER,
            errors: FieldErrors::new(),
        };
        form.text.activate(NAME_ORDER);
        form
    }

    /// Form populated from an existing task.
    pub fn from_task(state: &AppState, task: &Task) -> Self {
        let mut form = Self::new(state, Some(&task.assignee_id));
        form.text.name = InputField::with_value(&task.name);
        form.text.description = InputField::with_value(&task.description);
        form.text.tags = InputField::with_value(&task.tags.join(", "));
        form.text.deadline = InputField::with_value(&task.deadline.format("%Y-%m-%d %H:%M").to_string());
        form.text.image = InputField::with_value(task.image.as_deref().unwrap_or(""));
        form.project = position_of(&form.projects, &task.project_id);
        form.status = TASK_STATUSES.iter().position(|&s| s == task.status).unwrap_or(0);
        form.text.activate(NAME_ORDER);
        form
    }

    pub fn selected_status(&self) -> TaskStatus {
        TASK_STATUSES.get(self.status).copied().unwrap_or_default()
    }

    pub fn selected_assignee(&self) -> Option<&Choice> {
        self.assignee.and_then(|i| self.assignees.get(i))
    }

    pub fn selected_project(&self) -> Option<&Choice> {
        self.project.and_then(|i| self.projects.get(i))
    }

    /// Validate the entered values and build a draft.
    pub fn to_draft(&self) -> Result<TaskDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.text.name.value, "Task name is required");
        if self.selected_assignee().is_none() {
            errors.insert("assignee", "Assignee is required");
        }
        if self.selected_project().is_none() {
            errors.insert("project", "Project is required");
        }
        require(&mut errors, "deadline", &self.text.deadline.value, "Deadline is required");
        let deadline = parse_deadline_datetime(&self.text.deadline.value);
        if deadline.is_none() {
            errors.insert("deadline", "Deadline must look like YYYY-MM-DD HH:MM");
        }

        match (deadline, self.selected_assignee(), self.selected_project()) {
            (Some(deadline), Some((assignee_id, _)), Some((project_id, _))) if errors.is_empty() => {
                Ok(TaskDraft {
                    name: self.text.name.value.trim().to_string(),
                    assignee_id: assignee_id.clone(),
                    project_id: project_id.clone(),
                    tags: split_tags(&self.text.tags.value),
                    deadline,
                    status: self.selected_status(),
                    image: optional_text(&self.text.image.value),
                    description: self.text.description.value.trim().to_string(),
                })
            }
            _ => Err(errors),
        }
    }
}

impl FormFocus for TaskForm {
    fn current_field(&self) -> usize {
        self.current_field
    }

    fn set_current_field(&mut self, order: usize) {
        self.current_field = order;
        self.text.activate(order);
    }

    fn text_fields(&mut self) -> &mut TextFields {
        &mut self.text
    }

    fn cycle_selector(&mut self, order: usize, right: bool) {
        match order {
            ASSIGNEE_ORDER => self.assignee = cycle_choice(self.assignee, self.assignees.len(), right),
            TASK_PROJECT_ORDER => self.project = cycle_choice(self.project, self.projects.len(), right),
            TASK_STATUS_ORDER => self.status = cycle_index(self.status, TASK_STATUSES.len(), right),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_state;

    fn type_text(form: &mut impl FormFocus, text: &str) {
        for c in text.chars() {
            form.handle_char(c);
        }
    }

    #[test]
    fn test_empty_project_form_reports_required_fields() {
        let state = demo_state();
        let errors = ProjectForm::new(&state).to_draft().unwrap_err();
        assert_eq!(errors.get("name"), Some("Project name is required"));
        assert_eq!(errors.get("manager"), Some("Project manager is required"));
        assert_eq!(errors.get("deadline"), Some("Deadline is required"));
    }

    #[test]
    fn test_project_form_builds_draft() {
        let state = demo_state();
        let mut form = ProjectForm::new(&state);
        type_text(&mut form, "Demo");
        form.set_current_field(TAGS_ORDER);
        type_text(&mut form, "Rust, CLI, Rust");
        form.set_current_field(DEADLINE_ORDER);
        type_text(&mut form, "2025-03-01");
        form.set_current_field(MANAGER_ORDER);
        form.handle_left_right(true);
        form.handle_left_right(true);
        form.set_current_field(PRIORITY_ORDER);
        form.handle_left_right(true);

        let draft = form.to_draft().unwrap();
        assert_eq!(draft.name, "Demo");
        assert_eq!(draft.tags, vec!["Rust", "CLI", "Rust"]);
        assert_eq!(draft.manager_id, "2");
        assert_eq!(draft.priority, Priority::High);
        assert_eq!(draft.status, ProjectStatus::Services);
        assert_eq!(draft.image, None);
    }

    #[test]
    fn test_bad_project_deadline() {
        let state = demo_state();
        let mut form = ProjectForm::from_project(&state, &state.projects[0]);
        form.text.deadline = InputField::with_value("15/12/2024");
        let errors = form.to_draft().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get("deadline").is_some());
    }

    #[test]
    fn test_edit_form_round_trips_project() {
        let state = demo_state();
        let project = &state.projects[1];
        let draft = ProjectForm::from_project(&state, project).to_draft().unwrap();
        assert_eq!(draft.name, project.name);
        assert_eq!(draft.manager_id, project.manager_id);
        assert_eq!(draft.deadline, project.deadline);
        assert_eq!(draft.status, project.status);
    }

    #[test]
    fn test_task_form_requires_references() {
        let state = demo_state();
        let mut form = TaskForm::new(&state, None);
        type_text(&mut form, "Write docs");
        let errors = form.to_draft().unwrap_err();
        assert_eq!(errors.get("assignee"), Some("Assignee is required"));
        assert_eq!(errors.get("project"), Some("Project is required"));
        assert_eq!(errors.get("deadline"), Some("Deadline is required"));
        assert_eq!(errors.get("name"), None);
    }

    #[test]
    fn test_task_form_builds_draft() {
        let state = demo_state();
        let mut form = TaskForm::new(&state, Some("3"));
        type_text(&mut form, "Write docs");
        form.set_current_field(DEADLINE_ORDER);
        type_text(&mut form, "2025-03-01 09:30");
        form.set_current_field(TASK_PROJECT_ORDER);
        form.handle_left_right(false);

        let draft = form.to_draft().unwrap();
        assert_eq!(draft.assignee_id, "3");
        assert_eq!(draft.project_id, "3");
        assert_eq!(draft.status, TaskStatus::Progress);
        assert_eq!(draft.deadline.format("%H:%M").to_string(), "09:30");
    }

    #[test]
    fn test_focus_wraps_around() {
        let state = demo_state();
        let mut form = TaskForm::new(&state, None);
        form.prev_field();
        assert_eq!(form.current_field, TASK_STATUS_ORDER);
        form.next_field();
        assert_eq!(form.current_field, NAME_ORDER);
        assert!(form.text.name.active);
        form.next_field();
        assert!(!form.text.name.active);
        assert!(form.text.description.active);
    }
}
