//! Main application logic for the terminal user interface.
//!
//! `App` owns the store and the auth gate, routes key presses to the active
//! screen and draws the dashboard: a collapsible sidebar, the active view with
//! its statistics header, and a status bar. Creating, editing or deleting a
//! project or task posts a notification to the feed.

use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use tracing::{debug, info};

use crate::auth::AuthGate;
use crate::display::{format_due_relative, truncate};
use crate::fields::*;
use crate::notification::NotificationDraft;
use crate::project::{Project, ProjectPatch};
use crate::search::{my_tasks, search_projects};
use crate::stats::{project_stats, task_stats};
use crate::store::{AppState, Store};
use crate::task::{Task, TaskPatch};
use crate::tui::{
    colors::{notification_color, palette, priority_color, task_status_color, Palette, DARK_RED},
    enums::{next_status_filter, FormMode, InputMode, PendingDelete, Screen, View},
    form::*,
    input::InputField,
    login::{AuthOutcome, AuthScreen},
    utils::{centered_rect, cursor_x},
};

const SIDEBAR_WIDTH: u16 = 26;

/// Main application state for the terminal user interface.
pub struct App {
    store: Store,
    auth: AuthGate,
    auth_screen: AuthScreen,
    screen: Screen,
    view: View,
    input_mode: InputMode,
    search: InputField,
    status_filter: Option<TaskStatus>,
    selected: usize,
    table_state: TableState,
    list_state: ListState,
    project_form: Option<(FormMode, ProjectForm)>,
    task_form: Option<(FormMode, TaskForm)>,
    pending_delete: Option<PendingDelete>,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Open on the dashboard when `auth` already has a user, otherwise on the
    /// login screen.
    pub fn new(mut store: Store, auth: AuthGate) -> Self {
        let screen = if auth.is_authenticated() {
            store.clear_history();
            Screen::Dashboard
        } else {
            Screen::Login
        };
        App {
            store,
            auth,
            auth_screen: AuthScreen::new(),
            screen,
            view: View::default(),
            input_mode: InputMode::None,
            search: InputField::new(),
            status_filter: None,
            selected: 0,
            table_state: TableState::default(),
            list_state: ListState::default(),
            project_form: None,
            task_form: None,
            pending_delete: None,
            status_message: String::new(),
            should_quit: false,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn current_user_id(&self) -> Option<String> {
        self.auth.user().map(|u| u.id.clone())
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn notify(&mut self, kind: NotificationKind, message: String) {
        self.store.add_notification(NotificationDraft::new(kind, message));
    }

    // ----- visible rows -----

    fn visible_projects<'a>(&self, state: &'a AppState) -> Vec<&'a Project> {
        search_projects(state, &self.search.value)
    }

    fn visible_tasks<'a>(&self, state: &'a AppState) -> Vec<&'a Task> {
        match self.auth.user() {
            Some(user) => my_tasks(state, &user.id, &self.search.value, self.status_filter),
            None => Vec::new(),
        }
    }

    fn visible_len(&self) -> usize {
        let state = self.store.state();
        match self.view {
            View::Projects => self.visible_projects(state).len(),
            View::MyTasks => self.visible_tasks(state).len(),
            View::Notifications => state.notifications.len(),
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn selected_project(&self) -> Option<Project> {
        self.visible_projects(self.store.state()).get(self.selected).map(|p| (*p).clone())
    }

    fn selected_task(&self) -> Option<Task> {
        self.visible_tasks(self.store.state()).get(self.selected).map(|t| (*t).clone())
    }

    fn selected_notification_id(&self) -> Option<String> {
        self.store.state().notifications.get(self.selected).map(|n| n.id.clone())
    }

    fn switch_view(&mut self, view: View) {
        self.view = view;
        self.selected = 0;
    }

    // ----- input -----

    /// Handle one key press. Returns true when the application should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            self.should_quit = true;
            return true;
        }
        self.status_message.clear();

        match self.screen {
            Screen::Login => self.handle_login_input(key),
            Screen::Dashboard => self.handle_dashboard_input(key),
            Screen::ProjectForm => self.handle_project_form_input(key),
            Screen::TaskForm => self.handle_task_form_input(key),
            Screen::Help => self.handle_help_input(key),
            Screen::Confirm => self.handle_confirm_input(key),
        }
        self.clamp_selection();
        self.should_quit
    }

    fn handle_login_input(&mut self, key: KeyCode) {
        match self.auth_screen.handle_key(key, &mut self.store, &mut self.auth) {
            AuthOutcome::SignedIn => {
                // Signup registers a user; that must not be undoable.
                self.store.clear_history();
                self.screen = Screen::Dashboard;
                self.switch_view(View::Projects);
                if let Some(user) = self.auth.user() {
                    self.status_message = format!("Welcome, {}", user.full_name());
                }
            }
            AuthOutcome::Quit => self.should_quit = true,
            AuthOutcome::Pending => {}
        }
    }

    fn handle_search_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.search.clear();
                self.input_mode = InputMode::None;
            }
            KeyCode::Enter => self.input_mode = InputMode::None,
            KeyCode::Backspace => self.search.handle_backspace(),
            KeyCode::Left => self.search.move_cursor_left(),
            KeyCode::Right => self.search.move_cursor_right(),
            KeyCode::Char(c) => self.search.handle_char(c),
            _ => {}
        }
        self.selected = 0;
    }

    fn handle_dashboard_input(&mut self, key: KeyCode) {
        if self.input_mode == InputMode::Search {
            self.handle_search_input(key);
            return;
        }

        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                if self.search.value.is_empty() {
                    self.should_quit = true;
                } else {
                    self.search.clear();
                }
            }
            KeyCode::Tab => self.switch_view(self.view.next()),
            KeyCode::Char('1') => self.switch_view(View::Projects),
            KeyCode::Char('2') => self.switch_view(View::MyTasks),
            KeyCode::Char('3') => self.switch_view(View::Notifications),
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.visible_len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('/') => {
                if self.view != View::Notifications {
                    self.input_mode = InputMode::Search;
                }
            }
            KeyCode::Char('s') => {
                if self.view == View::MyTasks {
                    self.status_filter = next_status_filter(self.status_filter);
                    self.selected = 0;
                }
            }
            KeyCode::Char('n') => self.open_create_form(),
            KeyCode::Char('e') => self.open_edit_form(),
            KeyCode::Char('d') => self.request_delete(),
            KeyCode::Char('r') | KeyCode::Enter => {
                if self.view == View::Notifications {
                    if let Some(id) = self.selected_notification_id() {
                        self.store.mark_notification_read(&id);
                    }
                }
            }
            KeyCode::Char('t') => {
                let theme = self.store.toggle_theme();
                self.set_status_message(format!("Theme: {}", format_theme(theme)));
            }
            KeyCode::Char('b') => {
                self.store.toggle_sidebar();
            }
            KeyCode::Char('u') => {
                if self.store.undo() {
                    self.set_status_message("Undid last change");
                } else {
                    self.set_status_message("Nothing to undo");
                }
            }
            KeyCode::Char('h') | KeyCode::F(1) => self.screen = Screen::Help,
            KeyCode::Char('L') => self.logout(),
            _ => {}
        }
    }

    fn logout(&mut self) {
        info!("Signed out from the dashboard");
        self.auth.logout();
        self.store.clear_history();
        self.auth_screen = AuthScreen::new();
        self.search.clear();
        self.input_mode = InputMode::None;
        self.status_filter = None;
        self.switch_view(View::Projects);
        self.screen = Screen::Login;
    }

    fn open_create_form(&mut self) {
        match self.view {
            View::Projects => {
                self.project_form = Some((FormMode::Create, ProjectForm::new(self.store.state())));
                self.screen = Screen::ProjectForm;
            }
            View::MyTasks => {
                let user_id = self.current_user_id();
                let form = TaskForm::new(self.store.state(), user_id.as_deref());
                self.task_form = Some((FormMode::Create, form));
                self.screen = Screen::TaskForm;
            }
            View::Notifications => {}
        }
    }

    fn open_edit_form(&mut self) {
        match self.view {
            View::Projects => {
                if let Some(project) = self.selected_project() {
                    let form = ProjectForm::from_project(self.store.state(), &project);
                    self.project_form = Some((FormMode::Edit(project.id), form));
                    self.screen = Screen::ProjectForm;
                }
            }
            View::MyTasks => {
                if let Some(task) = self.selected_task() {
                    let form = TaskForm::from_task(self.store.state(), &task);
                    self.task_form = Some((FormMode::Edit(task.id), form));
                    self.screen = Screen::TaskForm;
                }
            }
            View::Notifications => {}
        }
    }

    fn request_delete(&mut self) {
        let pending = match self.view {
            View::Projects => self
                .selected_project()
                .map(|p| PendingDelete::Project { id: p.id, name: p.name }),
            View::MyTasks => self
                .selected_task()
                .map(|t| PendingDelete::Task { id: t.id, name: t.name }),
            View::Notifications => None,
        };
        if pending.is_some() {
            self.pending_delete = pending;
            self.screen = Screen::Confirm;
        }
    }

    fn handle_form_key(form: &mut impl FormFocus, key: KeyCode) {
        match key {
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left => form.handle_left_right(false),
            KeyCode::Right => form.handle_left_right(true),
            KeyCode::Backspace => form.handle_backspace(),
            KeyCode::Delete => form.handle_delete(),
            KeyCode::Char(c) => form.handle_char(c),
            _ => {}
        }
    }

    fn handle_project_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.project_form = None;
                self.screen = Screen::Dashboard;
            }
            KeyCode::Enter => self.submit_project_form(),
            _ => {
                if let Some((_, form)) = self.project_form.as_mut() {
                    Self::handle_form_key(form, key);
                }
            }
        }
    }

    fn handle_task_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.task_form = None;
                self.screen = Screen::Dashboard;
            }
            KeyCode::Enter => self.submit_task_form(),
            _ => {
                if let Some((_, form)) = self.task_form.as_mut() {
                    Self::handle_form_key(form, key);
                }
            }
        }
    }

    fn submit_project_form(&mut self) {
        let Some((mode, mut form)) = self.project_form.take() else {
            self.screen = Screen::Dashboard;
            return;
        };
        let draft = match form.to_draft() {
            Ok(draft) => draft,
            Err(errors) => {
                debug!(%errors, "Project form rejected");
                form.errors = errors;
                self.project_form = Some((mode, form));
                return;
            }
        };
        let name = draft.name.clone();
        match mode {
            FormMode::Create => match self.store.add_project(draft) {
                Ok(_) => self.notify(
                    NotificationKind::Success,
                    format!("New project \"{name}\" has been created"),
                ),
                Err(e) => self.set_status_message(format!("Could not create project: {e}")),
            },
            FormMode::Edit(id) => match self.store.update_project(&id, ProjectPatch::from_draft(draft)) {
                Ok(true) => self.notify(
                    NotificationKind::Success,
                    format!("Project \"{name}\" has been updated"),
                ),
                Ok(false) => self.set_status_message("Project no longer exists"),
                Err(e) => self.set_status_message(format!("Could not update project: {e}")),
            },
        }
        self.screen = Screen::Dashboard;
    }

    fn submit_task_form(&mut self) {
        let Some((mode, mut form)) = self.task_form.take() else {
            self.screen = Screen::Dashboard;
            return;
        };
        let draft = match form.to_draft() {
            Ok(draft) => draft,
            Err(errors) => {
                debug!(%errors, "Task form rejected");
                form.errors = errors;
                self.task_form = Some((mode, form));
                return;
            }
        };
        let name = draft.name.clone();
        match mode {
            FormMode::Create => match self.store.add_task(draft) {
                Ok(_) => self.notify(
                    NotificationKind::Success,
                    format!("New task \"{name}\" has been created"),
                ),
                Err(e) => self.set_status_message(format!("Could not create task: {e}")),
            },
            FormMode::Edit(id) => match self.store.update_task(&id, TaskPatch::from_draft(draft)) {
                Ok(true) => self.notify(
                    NotificationKind::Success,
                    format!("Task \"{name}\" has been updated"),
                ),
                Ok(false) => self.set_status_message("Task no longer exists"),
                Err(e) => self.set_status_message(format!("Could not update task: {e}")),
            },
        }
        self.screen = Screen::Dashboard;
    }

    fn handle_confirm_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                match self.pending_delete.take() {
                    Some(PendingDelete::Project { id, name }) => {
                        if self.store.delete_project(&id) {
                            self.notify(NotificationKind::Info, format!("Project \"{name}\" has been deleted"));
                        }
                    }
                    Some(PendingDelete::Task { id, name }) => {
                        if self.store.delete_task(&id) {
                            self.notify(NotificationKind::Info, format!("Task \"{name}\" has been deleted"));
                        }
                    }
                    None => {}
                }
                self.screen = Screen::Dashboard;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.pending_delete = None;
                self.screen = Screen::Dashboard;
            }
            _ => {}
        }
    }

    fn handle_help_input(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h')) {
            self.screen = Screen::Dashboard;
        }
    }

    /// Poll for and handle one keyboard event.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key.code, key.modifiers));
                }
            }
        }
        Ok(false)
    }

    // ----- rendering -----

    fn render_sidebar(&self, f: &mut Frame, area: Rect, state: &AppState, colors: &Palette) {
        let mut lines = vec![
            Line::from(Span::styled(
                "ProHub",
                Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (i, view) in View::ALL.iter().enumerate() {
            let label = match view {
                View::Notifications => format!("{} {} ({})", i + 1, view.title(), state.unread_count()),
                _ => format!("{} {}", i + 1, view.title()),
            };
            let style = if *view == self.view {
                colors.highlight().add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg)
            };
            lines.push(Line::from(Span::styled(label, style)));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Theme: {} (t)", format_theme(state.theme)),
            Style::default().fg(colors.muted),
        )));
        if let Some(user) = self.auth.user() {
            lines.push(Line::from(""));
            lines.push(Line::from(format!("[{}] {}", user.initials(), user.full_name())));
            lines.push(Line::from(Span::styled(user.email.clone(), Style::default().fg(colors.muted))));
        }

        let sidebar = Paragraph::new(lines)
            .style(colors.base())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(sidebar, area);
    }

    fn render_header(&self, f: &mut Frame, area: Rect, state: &AppState, colors: &Palette) {
        let now = Local::now().naive_local();
        let text = match self.view {
            View::Projects => {
                let stats = project_stats(&state.projects);
                format!(
                    "Total {}   High priority {}   In development {}   Tasks {}",
                    stats.total, stats.high_priority, stats.in_development, stats.total_tasks
                )
            }
            View::MyTasks => {
                let mine = self.auth.user().map(|u| u.id.clone()).unwrap_or_default();
                let stats = task_stats(state.tasks.iter().filter(|t| t.assignee_id == mine), now);
                let filter = self.status_filter.map(format_task_status).unwrap_or("All");
                format!(
                    "Completed {}   In progress {}   Overdue {}   Total {}   Filter: {} ({})",
                    stats.completed,
                    stats.in_progress,
                    stats.overdue,
                    stats.total,
                    filter,
                    stats.count(self.status_filter)
                )
            }
            View::Notifications => format!(
                "{} notifications, {} unread",
                state.notifications.len(),
                state.unread_count()
            ),
        };
        let search = if self.input_mode == InputMode::Search || !self.search.value.is_empty() {
            format!("   Search: {}", self.search.value)
        } else {
            String::new()
        };
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                self.view.title().to_uppercase(),
                Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::raw(text),
            Span::styled(search, Style::default().add_modifier(Modifier::ITALIC)),
        ]))
        .style(colors.base())
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, area);
    }

    fn render_projects(&mut self, f: &mut Frame, area: Rect, state: &AppState, colors: &Palette) {
        let today = Local::now().date_naive();
        let projects = self.visible_projects(state);
        let header = Row::new(["Name", "Priority", "Status", "Tasks", "Deadline", "Manager", "Tags"])
            .style(colors.bar().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = projects
            .iter()
            .map(|p| {
                let manager = state.user(&p.manager_id).map(|u| u.full_name()).unwrap_or_else(|| "-".into());
                Row::new(vec![
                    Cell::from(p.name.clone()),
                    Cell::from(format_priority(p.priority)).style(Style::default().fg(priority_color(p.priority))),
                    Cell::from(format_project_status(p.status)),
                    Cell::from(p.task_count.to_string()),
                    Cell::from(format_due_relative(p.deadline, today)),
                    Cell::from(manager),
                    Cell::from(truncate(&p.tags.join(", "), 30)),
                ])
            })
            .collect();
        let widths = [
            Constraint::Min(22),
            Constraint::Length(9),
            Constraint::Length(14),
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Min(10),
        ];
        let title = format!("Projects ({}/{}) - Press 'h' for help", projects.len(), state.projects.len());
        let table = Table::new(rows, widths)
            .header(header)
            .style(colors.base())
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(colors.highlight())
            .highlight_symbol(">> ");
        self.table_state.select(if projects.is_empty() { None } else { Some(self.selected) });
        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_tasks(&mut self, f: &mut Frame, area: Rect, state: &AppState, colors: &Palette) {
        let now = Local::now().naive_local();
        let tasks = self.visible_tasks(state);
        let header = Row::new(["Name", "Status", "Deadline", "Project", "Tags"])
            .style(colors.bar().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = tasks
            .iter()
            .map(|t| {
                let project = state.project(&t.project_id).map(|p| p.name.clone()).unwrap_or_else(|| "-".into());
                let due_style = if t.is_overdue(now) {
                    Style::default().fg(colors.error).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(t.name.clone()),
                    Cell::from(format_task_status(t.status)).style(Style::default().fg(task_status_color(t.status))),
                    Cell::from(t.deadline.format("%Y-%m-%d %H:%M").to_string()).style(due_style),
                    Cell::from(project),
                    Cell::from(truncate(&t.tags.join(", "), 30)),
                ])
            })
            .collect();
        let widths = [
            Constraint::Min(34),
            Constraint::Length(10),
            Constraint::Length(17),
            Constraint::Length(22),
            Constraint::Min(10),
        ];
        let title = match self.auth.user() {
            Some(user) => format!("Tasks for {} ({})", user.first_name, tasks.len()),
            None => "Tasks".to_string(),
        };
        let table = Table::new(rows, widths)
            .header(header)
            .style(colors.base())
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(colors.highlight())
            .highlight_symbol(">> ");
        self.table_state.select(if tasks.is_empty() { None } else { Some(self.selected) });
        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_notifications(&mut self, f: &mut Frame, area: Rect, state: &AppState, colors: &Palette) {
        let items: Vec<ListItem> = state
            .notifications
            .iter()
            .map(|n| {
                let marker = if n.read { "  " } else { "● " };
                let text_style = if n.read {
                    Style::default().fg(colors.muted)
                } else {
                    Style::default().fg(colors.fg).add_modifier(Modifier::BOLD)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(notification_color(n.kind))),
                    Span::styled(
                        format!("{:<8}", format_notification_kind(n.kind)),
                        Style::default().fg(notification_color(n.kind)),
                    ),
                    Span::styled(n.message.clone(), text_style),
                    Span::styled(
                        format!("  {}", n.created_at.format("%Y-%m-%d %H:%M")),
                        Style::default().fg(colors.muted),
                    ),
                ]))
            })
            .collect();
        let empty = items.is_empty();
        let list = List::new(items)
            .style(colors.base())
            .block(Block::default().borders(Borders::ALL).title("Notifications - r/Enter mark read"))
            .highlight_style(colors.highlight())
            .highlight_symbol(">> ");
        self.list_state.select(if empty { None } else { Some(self.selected) });
        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_dashboard(&mut self, f: &mut Frame, area: Rect, state: &AppState, colors: &Palette) {
        let main = if state.sidebar_collapsed {
            area
        } else {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .split(area);
            self.render_sidebar(f, columns[0], state, colors);
            columns[1]
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(main);
        self.render_header(f, chunks[0], state, colors);
        match self.view {
            View::Projects => self.render_projects(f, chunks[1], state, colors),
            View::MyTasks => self.render_tasks(f, chunks[1], state, colors),
            View::Notifications => self.render_notifications(f, chunks[1], state, colors),
        }
    }

    fn render_text_input(f: &mut Frame, area: Rect, title: &str, field: &InputField, error: Option<&str>, colors: &Palette) {
        let border = if field.active {
            Style::default().fg(colors.accent)
        } else {
            Style::default().fg(colors.muted)
        };
        let title = match error {
            Some(message) => Line::from(vec![
                Span::raw(format!("{title} ")),
                Span::styled(message.to_string(), Style::default().fg(colors.error)),
            ]),
            None => Line::from(title.to_string()),
        };
        let widget = Paragraph::new(field.value.as_str())
            .style(colors.base())
            .block(Block::default().borders(Borders::ALL).title(title).border_style(border));
        f.render_widget(widget, area);
        if field.active {
            f.set_cursor_position((cursor_x(area, field.cursor), area.y + 1));
        }
    }

    fn render_selector(f: &mut Frame, area: Rect, title: &str, value: &str, focused: bool, error: Option<&str>, colors: &Palette) {
        let border = if focused {
            Style::default().fg(colors.accent)
        } else {
            Style::default().fg(colors.muted)
        };
        let title = match error {
            Some(message) => Line::from(vec![
                Span::raw(format!("{title} ")),
                Span::styled(message.to_string(), Style::default().fg(colors.error)),
            ]),
            None => Line::from(title.to_string()),
        };
        let widget = Paragraph::new(format!("< {value} >"))
            .style(colors.base())
            .block(Block::default().borders(Borders::ALL).title(title).border_style(border));
        f.render_widget(widget, area);
    }

    /// Two columns: text inputs on the left, selectors and help on the right.
    fn form_layout(area: Rect) -> (Vec<Rect>, Vec<Rect>) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(columns[0]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(columns[1]);
        (left.to_vec(), right.to_vec())
    }

    fn render_form_help(f: &mut Frame, area: Rect, editing: bool, colors: &Palette) {
        let action = if editing { "Save changes" } else { "Create" };
        let help = Paragraph::new(vec![
            Line::from("Tab/↑/↓  Move between fields"),
            Line::from("←/→      Change selectors"),
            Line::from(format!("Enter    {action}")),
            Line::from("Esc      Cancel"),
        ])
        .style(Style::default().fg(colors.muted).bg(colors.bg))
        .block(Block::default().borders(Borders::ALL).title("Keys"));
        f.render_widget(help, area);
    }

    fn render_project_form(&self, f: &mut Frame, area: Rect, colors: &Palette) {
        let Some((mode, form)) = self.project_form.as_ref() else {
            return;
        };
        let editing = matches!(mode, FormMode::Edit(_));
        let block = Block::default()
            .borders(Borders::ALL)
            .title(if editing { "Edit Project" } else { "New Project" })
            .style(colors.base());
        let inner = block.inner(area);
        f.render_widget(block, area);

        let (left, right) = Self::form_layout(inner);
        let err = |key: &str| form.errors.get(key);
        Self::render_text_input(f, left[0], "Name *", &form.text.name, err("name"), colors);
        Self::render_text_input(f, left[1], "Description", &form.text.description, None, colors);
        Self::render_text_input(f, left[2], "Tags (comma separated)", &form.text.tags, None, colors);
        Self::render_text_input(f, left[3], "Deadline * (YYYY-MM-DD)", &form.text.deadline, err("deadline"), colors);
        Self::render_text_input(f, left[4], "Image URL", &form.text.image, None, colors);

        let manager = form.selected_manager().map(|(_, name)| name.as_str()).unwrap_or("None");
        Self::render_selector(f, right[0], "Manager *", manager, form.current_field == MANAGER_ORDER, err("manager"), colors);
        Self::render_selector(
            f,
            right[1],
            "Priority",
            format_priority(form.selected_priority()),
            form.current_field == PRIORITY_ORDER,
            None,
            colors,
        );
        Self::render_selector(
            f,
            right[2],
            "Status",
            format_project_status(form.selected_status()),
            form.current_field == PROJECT_STATUS_ORDER,
            None,
            colors,
        );
        Self::render_form_help(f, right[3], editing, colors);
    }

    fn render_task_form(&self, f: &mut Frame, area: Rect, colors: &Palette) {
        let Some((mode, form)) = self.task_form.as_ref() else {
            return;
        };
        let editing = matches!(mode, FormMode::Edit(_));
        let block = Block::default()
            .borders(Borders::ALL)
            .title(if editing { "Edit Task" } else { "New Task" })
            .style(colors.base());
        let inner = block.inner(area);
        f.render_widget(block, area);

        let (left, right) = Self::form_layout(inner);
        let err = |key: &str| form.errors.get(key);
        Self::render_text_input(f, left[0], "Name *", &form.text.name, err("name"), colors);
        Self::render_text_input(f, left[1], "Description", &form.text.description, None, colors);
        Self::render_text_input(f, left[2], "Tags (comma separated)", &form.text.tags, None, colors);
        Self::render_text_input(f, left[3], "Deadline * (YYYY-MM-DD HH:MM)", &form.text.deadline, err("deadline"), colors);
        Self::render_text_input(f, left[4], "Image URL", &form.text.image, None, colors);

        let assignee = form.selected_assignee().map(|(_, name)| name.as_str()).unwrap_or("None");
        let project = form.selected_project().map(|(_, name)| name.as_str()).unwrap_or("None");
        Self::render_selector(f, right[0], "Assignee *", assignee, form.current_field == ASSIGNEE_ORDER, err("assignee"), colors);
        Self::render_selector(f, right[1], "Project *", project, form.current_field == TASK_PROJECT_ORDER, err("project"), colors);
        Self::render_selector(
            f,
            right[2],
            "Status",
            format_task_status(form.selected_status()),
            form.current_field == TASK_STATUS_ORDER,
            None,
            colors,
        );
        Self::render_form_help(f, right[3], editing, colors);
    }

    fn render_help(&self, f: &mut Frame, area: Rect, colors: &Palette) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Line::from(Span::styled("ProHub Help", bold)),
            Line::from(""),
            Line::from(Span::styled("Dashboard:", bold)),
            Line::from("  Tab, 1/2/3     Switch view (Projects, My Tasks, Notifications)"),
            Line::from("  ↑/↓, k/j       Move selection"),
            Line::from("  /              Search (Enter keeps it, Esc clears)"),
            Line::from("  s              Cycle task status filter"),
            Line::from("  n              New project or task"),
            Line::from("  e              Edit selected"),
            Line::from("  d              Delete selected"),
            Line::from("  r/Enter        Mark notification read"),
            Line::from("  t              Toggle light/dark theme"),
            Line::from("  b              Collapse or expand the sidebar"),
            Line::from("  u              Undo last change"),
            Line::from("  L              Sign out"),
            Line::from("  h/F1           Show this help"),
            Line::from("  q/Esc/Ctrl+C   Quit"),
            Line::from(""),
            Line::from(Span::styled("Deadlines:", bold)),
            Line::from("  Projects       YYYY-MM-DD"),
            Line::from("  Tasks          YYYY-MM-DD HH:MM"),
        ];
        let paragraph = Paragraph::new(help_text)
            .style(colors.base())
            .block(Block::default().borders(Borders::ALL).title("Help - Esc to return"))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Confirm Action")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 25, area);
        f.render_widget(Clear, area);

        let action = self.pending_delete.as_ref().map(|p| p.describe()).unwrap_or_default();
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Are you sure you want to:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(action),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel (u undoes afterwards)"),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect, colors: &Palette) {
        let text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else if self.input_mode == InputMode::Search {
            format!("Search: {} (Esc to clear, Enter to confirm)", self.search.value)
        } else {
            match self.screen {
                Screen::Login => "Sign in or create an account".to_string(),
                Screen::Dashboard => {
                    let undo = if self.store.can_undo() { " | u undo" } else { "" };
                    format!(
                        "{} | v{}{} | Press 'h' for help",
                        self.view.title(),
                        self.store.version(),
                        undo
                    )
                }
                Screen::ProjectForm | Screen::TaskForm => "Enter to save, Esc to cancel".to_string(),
                Screen::Help => "Help".to_string(),
                Screen::Confirm => "Confirm Action".to_string(),
            }
        };
        f.render_widget(Paragraph::new(text).style(colors.bar()), area);
    }

    /// Main render function that dispatches to the active screen.
    pub fn render(&mut self, f: &mut Frame) {
        let state = self.store.snapshot();
        let colors = palette(state.theme);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        match self.screen {
            Screen::Login => self.auth_screen.render(f, chunks[0], &colors),
            Screen::Dashboard => self.render_dashboard(f, chunks[0], &state, &colors),
            Screen::ProjectForm => self.render_project_form(f, chunks[0], &colors),
            Screen::TaskForm => self.render_task_form(f, chunks[0], &colors),
            Screen::Help => self.render_help(f, chunks[0], &colors),
            Screen::Confirm => {
                self.render_dashboard(f, chunks[0], &state, &colors);
                self.render_confirm(f, chunks[0]);
            }
        }
        self.render_status_bar(f, chunks[1], &colors);
    }

    /// Main event loop for the TUI application.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::SignupForm;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn signed_in_app() -> App {
        let store = Store::in_memory();
        let mut auth = AuthGate::new();
        auth.login(&store, "john@example.com", "secret").unwrap();
        App::new(store, auth)
    }

    fn screen_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_starts_on_login_without_user() {
        let app = App::new(Store::in_memory(), AuthGate::new());
        assert_eq!(app.screen(), Screen::Login);
    }

    #[test]
    fn test_login_then_quit() {
        let mut app = App::new(Store::in_memory(), AuthGate::new());
        type_text(&mut app, "jane@example.com");
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "pw");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Dashboard);
        assert!(app.status_message().contains("Jane Smith"));
        assert!(app.handle_key(KeyCode::Char('q'), KeyModifiers::NONE));
    }

    #[test]
    fn test_view_switching() {
        let mut app = signed_in_app();
        assert_eq!(app.view(), View::Projects);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view(), View::MyTasks);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.view(), View::Notifications);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.view(), View::Projects);
    }

    #[test]
    fn test_create_project_posts_notification() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.screen(), Screen::ProjectForm);
        type_text(&mut app, "Demo");
        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
        }
        type_text(&mut app, "2025-06-30");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen(), Screen::Dashboard);
        let state = app.store().state();
        let demo = state.projects.iter().find(|p| p.name == "Demo").unwrap();
        assert_eq!(demo.task_count, 0);
        assert_eq!(demo.manager_id, "1");
        assert_eq!(state.notifications[0].message, "New project \"Demo\" has been created");
        assert_eq!(state.notifications[0].kind, NotificationKind::Success);
    }

    #[test]
    fn test_invalid_form_stays_open_with_errors() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::ProjectForm);
        let text = screen_text(&mut app);
        assert!(text.contains("Project name is required"));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Dashboard);
        assert_eq!(app.store().state().projects.len(), 3);
    }

    #[test]
    fn test_delete_project_with_confirm_and_undo() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.screen(), Screen::Confirm);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.store().state().projects.len(), 3);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        let state = app.store().state();
        assert_eq!(state.projects.len(), 2);
        assert!(state.tasks.iter().all(|t| t.project_id != "1"));
        assert_eq!(state.notifications[0].message, "Project \"E-commerce Platform\" has been deleted");

        // One undo removes the notification, the next restores the project.
        press(&mut app, KeyCode::Char('u'));
        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.store().state().projects.len(), 3);
        assert_eq!(app.store().state().tasks.len(), 4);
    }

    #[test]
    fn test_my_tasks_filter_and_edit() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('2'));
        let text = screen_text(&mut app);
        assert!(text.contains("Design user auth"));
        assert!(!text.contains("Implement payment"));

        // All -> Feedback -> Bug -> Progress
        for _ in 0..3 {
            press(&mut app, KeyCode::Char('s'));
        }
        let text = screen_text(&mut app);
        assert!(text.contains("Design user auth"));
        assert!(!text.contains("Setup CI/CD"));

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.screen(), Screen::TaskForm);
        type_text(&mut app, " v2");
        press(&mut app, KeyCode::Enter);
        let state = app.store().state();
        assert_eq!(state.task("1").unwrap().name, "Design user authentication flow v2");
        assert_eq!(
            state.notifications[0].message,
            "Task \"Design user authentication flow v2\" has been updated"
        );
    }

    #[test]
    fn test_search_narrows_projects() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "BANK");
        press(&mut app, KeyCode::Enter);
        let text = screen_text(&mut app);
        assert!(text.contains("Mobile Banking App"));
        assert!(!text.contains("AI Dashboard"));
        press(&mut app, KeyCode::Esc);
        assert!(!app.should_quit());
        assert!(screen_text(&mut app).contains("AI Dashboard"));
    }

    #[test]
    fn test_mark_notification_read() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.store().state().unread_count(), 2);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.store().state().unread_count(), 1);
        assert!(app.store().state().notifications[0].read);
    }

    #[test]
    fn test_theme_and_sidebar_toggles() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.store().state().theme, Theme::Light);
        press(&mut app, KeyCode::Char('b'));
        assert!(app.store().state().sidebar_collapsed);
        assert!(!screen_text(&mut app).contains("Theme: light"));
        press(&mut app, KeyCode::Char('b'));
        assert!(screen_text(&mut app).contains("Theme: light"));
    }

    #[test]
    fn test_logout_returns_to_login() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('L'));
        assert_eq!(app.screen(), Screen::Login);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.screen(), Screen::Login);
    }

    #[test]
    fn test_undo_after_signup_keeps_new_user() {
        let mut app = App::new(Store::in_memory(), AuthGate::new());
        press(&mut app, KeyCode::Tab);
        for value in ["Ada", "Lovelace", "ada@example.com", "engine1", "engine1"] {
            type_text(&mut app, value);
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Dashboard);

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.status_message(), "Nothing to undo");
        assert!(app.store().state().user_by_email("ada@example.com").is_some());
    }

    #[test]
    fn test_undo_skips_signup_done_before_start() {
        let mut store = Store::in_memory();
        let mut auth = AuthGate::new();
        let form = SignupForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "engine1".into(),
            confirm_password: "engine1".into(),
        };
        auth.signup(&mut store, &form).unwrap();
        let mut app = App::new(store, auth);

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.status_message(), "Nothing to undo");
        assert!(app.store().state().user_by_email("ada@example.com").is_some());
    }

    #[test]
    fn test_logout_drops_undo_history() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Char('t'));
        assert!(app.store().can_undo());
        press(&mut app, KeyCode::Char('L'));
        assert!(!app.store().can_undo());
    }
}
