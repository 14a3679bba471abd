//! Login / registration form.

use crate::ui::centered_rect;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Username,
    Password,
}

/// What the caller should do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    None,
    Submit,
    Quit,
}

pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub register_mode: bool,
    pub error: Option<String>,
    focus: Field,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            register_mode: false,
            error: None,
            focus: Field::Username,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        match key.code {
            KeyCode::Esc => return LoginAction::Quit,
            KeyCode::Enter => {
                if self.username.is_empty() || self.password.is_empty() {
                    self.error = Some("Both fields are required".to_string());
                } else {
                    return LoginAction::Submit;
                }
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
                self.focus = match self.focus {
                    Field::Username => Field::Password,
                    Field::Password => Field::Username,
                };
            }
            KeyCode::F(2) => {
                self.register_mode = !self.register_mode;
                self.error = None;
            }
            KeyCode::Backspace => {
                self.active_field_mut().pop();
            }
            KeyCode::Char(c) if !c.is_control() => {
                let field = self.active_field_mut();
                if field.len() < 24 {
                    field.push(c);
                }
            }
            _ => {}
        }
        LoginAction::None
    }

    fn active_field_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(50, 50, area);
        frame.render_widget(Clear, modal);

        let title = if self.register_mode {
            " Register "
        } else {
            " Login "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_alignment(Alignment::Center);

        let field_line = |label: &str, value: &str, masked: bool, focused: bool| {
            let shown = if masked {
                "*".repeat(value.len())
            } else {
                value.to_string()
            };
            let cursor = if focused { "_" } else { "" };
            Line::from(vec![
                Span::styled(
                    format!("{:<10}", label),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{}{}", shown, cursor),
                    if focused {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default()
                    },
                ),
            ])
        };

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                "LUCKY DROP OS 4.0",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            field_line(
                "User:",
                &self.username,
                false,
                self.focus == Field::Username,
            ),
            field_line(
                "Password:",
                &self.password,
                true,
                self.focus == Field::Password,
            ),
            Line::raw(""),
        ];

        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
            lines.push(Line::raw(""));
        }

        lines.push(Line::from(Span::styled(
            "[Enter] Submit  [Tab] Switch field  [F2] Toggle register  [Esc] Quit",
            Style::default().fg(Color::DarkGray),
        )));

        let body = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(body, modal);
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}
