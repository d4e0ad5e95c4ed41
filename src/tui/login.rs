//! Login and signup screen.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tracing::debug;

use crate::auth::AuthGate;
use crate::error::Error;
use crate::store::Store;
use crate::tui::colors::Palette;
use crate::tui::enums::AuthMode;
use crate::tui::input::InputField;
use crate::tui::utils::{centered_rect, cursor_x};
use crate::validation::{FieldErrors, SignupForm};

/// What a key press on the auth screen led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Pending,
    SignedIn,
    Quit,
}

/// One labelled input, keyed by the field name validation reports against.
#[derive(Clone, Debug)]
struct LabelledField {
    key: &'static str,
    label: &'static str,
    secret: bool,
    input: InputField,
}

impl LabelledField {
    fn new(key: &'static str, label: &'static str, secret: bool) -> Self {
        LabelledField { key, label, secret, input: InputField::new() }
    }
}

pub struct AuthScreen {
    mode: AuthMode,
    login: Vec<LabelledField>,
    signup: Vec<LabelledField>,
    focus: usize,
    pub errors: FieldErrors,
}

impl Default for AuthScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthScreen {
    pub fn new() -> Self {
        let mut screen = AuthScreen {
            mode: AuthMode::Login,
            login: vec![
                LabelledField::new("email", "Email", false),
                LabelledField::new("password", "Password", true),
            ],
            signup: vec![
                LabelledField::new("firstName", "First name", false),
                LabelledField::new("lastName", "Last name", false),
                LabelledField::new("email", "Email", false),
                LabelledField::new("password", "Password", true),
                LabelledField::new("confirmPassword", "Confirm password", true),
            ],
            focus: 0,
            errors: FieldErrors::new(),
        };
        screen.sync_active();
        screen
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    fn fields(&self) -> &[LabelledField] {
        match self.mode {
            AuthMode::Login => &self.login,
            AuthMode::Signup => &self.signup,
        }
    }

    fn fields_mut(&mut self) -> &mut Vec<LabelledField> {
        match self.mode {
            AuthMode::Login => &mut self.login,
            AuthMode::Signup => &mut self.signup,
        }
    }

    fn sync_active(&mut self) {
        let focus = self.focus;
        for (i, field) in self.fields_mut().iter_mut().enumerate() {
            field.input.active = i == focus;
        }
    }

    fn value(&self, key: &str) -> String {
        self.fields()
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.input.value.clone())
            .unwrap_or_default()
    }

    fn switch_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
        self.focus = 0;
        self.errors = FieldErrors::new();
        self.sync_active();
    }

    fn submit(&mut self, store: &mut Store, auth: &mut AuthGate) -> bool {
        let result = match self.mode {
            AuthMode::Login => auth.login(store, &self.value("email"), &self.value("password")),
            AuthMode::Signup => {
                let form = SignupForm {
                    first_name: self.value("firstName"),
                    last_name: self.value("lastName"),
                    email: self.value("email"),
                    password: self.value("password"),
                    confirm_password: self.value("confirmPassword"),
                };
                auth.signup(store, &form)
            }
        };
        match result {
            Ok(_) => {
                self.errors = FieldErrors::new();
                true
            }
            Err(Error::Validation(errors)) => {
                debug!(%errors, "Auth form rejected");
                self.errors = errors;
                false
            }
            Err(e) => {
                let mut errors = FieldErrors::new();
                errors.insert("email", e.to_string());
                self.errors = errors;
                false
            }
        }
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyCode, store: &mut Store, auth: &mut AuthGate) -> AuthOutcome {
        let count = self.fields().len();
        match key {
            KeyCode::Esc => return AuthOutcome::Quit,
            KeyCode::Tab => self.switch_mode(),
            KeyCode::Down => {
                self.focus = (self.focus + 1) % count;
                self.sync_active();
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.focus = (self.focus + count - 1) % count;
                self.sync_active();
            }
            KeyCode::Enter => {
                if self.submit(store, auth) {
                    return AuthOutcome::SignedIn;
                }
            }
            KeyCode::Char(c) => {
                let focus = self.focus;
                if let Some(field) = self.fields_mut().get_mut(focus) {
                    field.input.handle_char(c);
                    let key = field.key;
                    self.errors.clear(key);
                }
            }
            KeyCode::Backspace => {
                let focus = self.focus;
                if let Some(field) = self.fields_mut().get_mut(focus) {
                    field.input.handle_backspace();
                }
            }
            KeyCode::Left => {
                let focus = self.focus;
                if let Some(field) = self.fields_mut().get_mut(focus) {
                    field.input.move_cursor_left();
                }
            }
            KeyCode::Right => {
                let focus = self.focus;
                if let Some(field) = self.fields_mut().get_mut(focus) {
                    field.input.move_cursor_right();
                }
            }
            _ => {}
        }
        AuthOutcome::Pending
    }

    pub fn render(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        f.render_widget(Block::default().style(palette.base()), area);

        let fields = self.fields();
        let popup = centered_rect(50, 80, area);
        f.render_widget(Clear, popup);

        let mut constraints = vec![Constraint::Length(3)];
        constraints.extend(fields.iter().map(|_| Constraint::Length(4)));
        constraints.push(Constraint::Min(0));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(popup);

        let title = match self.mode {
            AuthMode::Login => "Sign in to ProHub",
            AuthMode::Signup => "Create your ProHub account",
        };
        let header = Paragraph::new(Line::from(Span::styled(
            title,
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .style(palette.base());
        f.render_widget(header, chunks[0]);

        for (i, field) in fields.iter().enumerate() {
            let border = if field.input.active {
                Style::default().fg(palette.accent)
            } else {
                Style::default().fg(palette.muted)
            };
            let mut lines = vec![Line::from(field.input.display(field.secret))];
            if let Some(message) = self.errors.get(field.key) {
                lines.push(Line::from(Span::styled(message.to_string(), Style::default().fg(palette.error))));
            }
            let widget = Paragraph::new(lines)
                .style(palette.base())
                .block(Block::default().borders(Borders::ALL).title(field.label).border_style(border));
            f.render_widget(widget, chunks[i + 1]);

            if field.input.active {
                let x = cursor_x(chunks[i + 1], field.input.cursor);
                f.set_cursor_position((x, chunks[i + 1].y + 1));
            }
        }

        let hint = match self.mode {
            AuthMode::Login => "Enter sign in  Tab create account  ↑/↓ move  Esc quit",
            AuthMode::Signup => "Enter sign up  Tab back to sign in  ↑/↓ move  Esc quit",
        };
        let hint = Paragraph::new(hint)
            .style(Style::default().fg(palette.muted).bg(palette.bg))
            .alignment(Alignment::Center);
        if let Some(area) = chunks.last() {
            f.render_widget(hint, *area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(screen: &mut AuthScreen, store: &mut Store, auth: &mut AuthGate, text: &str) {
        for c in text.chars() {
            screen.handle_key(KeyCode::Char(c), store, auth);
        }
    }

    #[test]
    fn test_login_with_known_email() {
        let mut store = Store::in_memory();
        let mut auth = AuthGate::new();
        let mut screen = AuthScreen::new();
        type_text(&mut screen, &mut store, &mut auth, "JOHN@example.com");
        screen.handle_key(KeyCode::Down, &mut store, &mut auth);
        type_text(&mut screen, &mut store, &mut auth, "secret");
        assert_eq!(screen.handle_key(KeyCode::Enter, &mut store, &mut auth), AuthOutcome::SignedIn);
        assert_eq!(auth.user().map(|u| u.id.as_str()), Some("1"));
    }

    #[test]
    fn test_login_errors_are_shown_per_field() {
        let mut store = Store::in_memory();
        let mut auth = AuthGate::new();
        let mut screen = AuthScreen::new();
        type_text(&mut screen, &mut store, &mut auth, "not-an-email");
        assert_eq!(screen.handle_key(KeyCode::Enter, &mut store, &mut auth), AuthOutcome::Pending);
        assert_eq!(screen.errors.get("email"), Some("Please enter a valid email address"));
        assert_eq!(screen.errors.get("password"), Some("Password is required"));

        // Typing into the field clears its message.
        type_text(&mut screen, &mut store, &mut auth, "x");
        assert_eq!(screen.errors.get("email"), None);
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_signup_registers_and_signs_in() {
        let mut store = Store::in_memory();
        let mut auth = AuthGate::new();
        let mut screen = AuthScreen::new();
        screen.handle_key(KeyCode::Tab, &mut store, &mut auth);
        assert_eq!(screen.mode(), AuthMode::Signup);

        for value in ["Ada", "Lovelace", "ada@example.com", "engine1", "engine1"] {
            type_text(&mut screen, &mut store, &mut auth, value);
            screen.handle_key(KeyCode::Down, &mut store, &mut auth);
        }
        assert_eq!(screen.handle_key(KeyCode::Enter, &mut store, &mut auth), AuthOutcome::SignedIn);
        assert!(store.state().user_by_email("ada@example.com").is_some());
        assert_eq!(auth.user().map(|u| u.full_name()), Some("Ada Lovelace".to_string()));
    }

    #[test]
    fn test_esc_quits() {
        let mut store = Store::in_memory();
        let mut auth = AuthGate::new();
        let mut screen = AuthScreen::new();
        assert_eq!(screen.handle_key(KeyCode::Esc, &mut store, &mut auth), AuthOutcome::Quit);
    }
}
