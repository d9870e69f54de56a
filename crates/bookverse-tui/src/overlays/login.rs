//! Sign-in / register overlay.
//!
//! One dialog, two modes. Submission spawns the auth round trip; the
//! reducer applies the outcome to the session store and either closes this
//! overlay or re-arms it with the backend's failure message. Entered values
//! are kept on failure.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::render_utils::{
    FieldLine, InputHint, calculate_overlay_area, render_field_line, render_hints,
    render_overlay_container, render_status_line,
};
use super::OverlayUpdate;
use crate::effects::UiEffect;
use crate::state::TuiState;

/// Which auth operation the dialog submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    fn toggle(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthField {
    Email,
    Password,
    Name,
}

/// State for the auth overlay.
#[derive(Debug)]
pub struct LoginState {
    pub mode: AuthMode,
    focus: AuthField,
    pub email: String,
    pub password: String,
    pub name: String,
    /// Failure message from the last attempt.
    pub error: Option<String>,
    /// An auth round trip is in flight.
    pub submitting: bool,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            focus: AuthField::Email,
            email: String::new(),
            password: String::new(),
            name: String::new(),
            error: None,
            submitting: false,
        }
    }
}

impl LoginState {
    /// Marks the attempt failed and re-arms the form (values retained).
    pub fn fail(&mut self, message: String) {
        self.submitting = false;
        self.error = Some(message);
    }

    fn fields(&self) -> &'static [AuthField] {
        match self.mode {
            AuthMode::Login => &[AuthField::Email, AuthField::Password],
            AuthMode::Register => &[AuthField::Name, AuthField::Email, AuthField::Password],
        }
    }

    fn focus_next(&mut self, forward: bool) {
        let fields = self.fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % fields.len()
        } else {
            (current + fields.len() - 1) % fields.len()
        };
        self.focus = fields[next];
    }

    fn focused_value_mut(&mut self) -> &mut String {
        match self.focus {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
            AuthField::Name => &mut self.name,
        }
    }

    fn validate(&self) -> Option<&'static str> {
        if self.mode == AuthMode::Register && self.name.trim().is_empty() {
            return Some("Name cannot be empty");
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Some("Enter a valid email address");
        }
        if self.password.is_empty() {
            return Some("Password cannot be empty");
        }
        None
    }

    pub fn handle_key(&mut self, _tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Clear the error on any edit.
        if !matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.error = None;
        }

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Char('t') if ctrl => {
                self.mode = self.mode.toggle();
                self.focus = self.fields()[0];
                OverlayUpdate::stay()
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next(true);
                OverlayUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_next(false);
                OverlayUpdate::stay()
            }
            KeyCode::Enter => {
                if self.submitting {
                    self.error = Some("Signing in...".to_string());
                    return OverlayUpdate::stay();
                }
                if let Some(problem) = self.validate() {
                    self.error = Some(problem.to_string());
                    return OverlayUpdate::stay();
                }
                self.submitting = true;
                OverlayUpdate::stay().with_effects(vec![UiEffect::SubmitAuth {
                    mode: self.mode,
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                    name: self.name.trim().to_string(),
                }])
            }
            KeyCode::Backspace => {
                self.focused_value_mut().pop();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.focused_value_mut().push(c);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title = match self.mode {
            AuthMode::Login => "Sign In",
            AuthMode::Register => "Create Account",
        };
        let height = 7 + self.fields().len() as u16;
        let popup = calculate_overlay_area(area, 52, height);
        let inner = render_overlay_container(frame, popup, title, Color::Cyan);

        // Mode tabs line.
        let tabs = Line::from(vec![
            mode_span("Sign In", self.mode == AuthMode::Login),
            Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
            mode_span("Register", self.mode == AuthMode::Register),
        ]);
        frame.render_widget(
            Paragraph::new(tabs),
            Rect::new(inner.x, inner.y, inner.width, 1),
        );

        let mut y = inner.y + 2;
        for field in self.fields() {
            let (label, value, masked) = match field {
                AuthField::Email => ("Email", self.email.as_str(), false),
                AuthField::Password => ("Password", self.password.as_str(), true),
                AuthField::Name => ("Name", self.name.as_str(), false),
            };
            render_field_line(
                frame,
                Rect::new(inner.x, y, inner.width, 1),
                &FieldLine {
                    label,
                    value,
                    focused: self.focus == *field,
                    masked,
                },
            );
            y += 1;
        }

        let help = if self.submitting {
            "Signing in..."
        } else {
            "Enter to submit"
        };
        render_status_line(
            frame,
            Rect::new(inner.x, y + 1, inner.width, 1),
            self.error.as_deref(),
            help,
        );

        let hints = [
            InputHint::new("Enter", "submit"),
            InputHint::new("Tab", "next"),
            InputHint::new("Ctrl+T", "switch"),
            InputHint::new("Esc", "close"),
        ];
        render_hints(
            frame,
            Rect::new(inner.x, inner.y + inner.height.saturating_sub(1), inner.width, 1),
            &hints,
        );
    }
}

fn mode_span(label: &str, active: bool) -> Span<'_> {
    if active {
        Span::styled(
            label,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(label, Style::default().fg(Color::DarkGray))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::update::tests_support::bare_tui as tui;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Test: submit with empty fields shows a validation error, no effect.
    #[test]
    fn test_submit_empty_shows_error() {
        let tui = tui();
        let mut state = LoginState::default();

        let update = state.handle_key(&tui, key(KeyCode::Enter));
        assert!(update.effects.is_empty());
        assert!(state.error.is_some());
        assert!(!state.submitting);
    }

    /// Test: a valid submit emits the auth effect and arms submitting.
    #[test]
    fn test_submit_valid_emits_effect() {
        let tui = tui();
        let mut state = LoginState {
            email: "a@x.com".to_string(),
            password: "pw".to_string(),
            ..LoginState::default()
        };

        let update = state.handle_key(&tui, key(KeyCode::Enter));
        assert_eq!(update.effects.len(), 1);
        assert!(state.submitting);
        match &update.effects[0] {
            UiEffect::SubmitAuth { mode, email, .. } => {
                assert_eq!(*mode, AuthMode::Login);
                assert_eq!(email, "a@x.com");
            }
            other => panic!("expected SubmitAuth, got {other:?}"),
        }
    }

    /// Test: mode toggle moves focus to the first field of the new mode.
    #[test]
    fn test_mode_toggle() {
        let tui = tui();
        let mut state = LoginState::default();

        let update = state.handle_key(
            &tui,
            KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL),
        );
        assert!(update.effects.is_empty());
        assert_eq!(state.mode, AuthMode::Register);
        assert_eq!(state.focus, AuthField::Name);
    }

    /// Test: typed characters land in the focused field; values survive
    /// a failure.
    #[test]
    fn test_typing_and_failure_retention() {
        let tui = tui();
        let mut state = LoginState::default();

        state.handle_key(&tui, key(KeyCode::Char('a')));
        state.handle_key(&tui, key(KeyCode::Tab));
        state.handle_key(&tui, key(KeyCode::Char('p')));
        assert_eq!(state.email, "a");
        assert_eq!(state.password, "p");

        state.submitting = true;
        state.fail("Invalid email or password".to_string());
        assert!(!state.submitting);
        assert_eq!(state.error.as_deref(), Some("Invalid email or password"));
        assert_eq!(state.email, "a");
        assert_eq!(state.password, "p");
    }
}
