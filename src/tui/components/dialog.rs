use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::tui::components::centered_fixed;
use crate::tui::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogAnswer {
    Acknowledged,
    Yes,
    No,
    Submitted(String),
    Cancelled,
}

#[derive(Debug, Clone)]
enum DialogKind {
    Message(DialogLevel),
    Confirm { yes_selected: bool },
    Secret(Input),
}

/// Modal box: a message, a yes/no question, or masked text entry.
#[derive(Debug, Clone)]
pub struct Dialog {
    title: String,
    message: String,
    kind: DialogKind,
}

impl Dialog {
    pub fn message(level: DialogLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: DialogKind::Message(level),
        }
    }

    pub fn confirm(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: DialogKind::Confirm { yes_selected: true },
        }
    }

    pub fn secret(title: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: prompt.into(),
            kind: DialogKind::Secret(Input::default()),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    #[cfg(test)]
    pub fn message_text(&self) -> &str {
        &self.message
    }

    /// Feeds one key press. Returns the answer once the dialog is closed.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DialogAnswer> {
        let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);

        match &mut self.kind {
            DialogKind::Message(_) => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q') => {
                    Some(DialogAnswer::Acknowledged)
                }
                _ if ctrl_c => Some(DialogAnswer::Acknowledged),
                _ => None,
            },
            DialogKind::Confirm { yes_selected } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => Some(DialogAnswer::Yes),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(DialogAnswer::No),
                _ if ctrl_c => Some(DialogAnswer::No),
                KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                    *yes_selected = !*yes_selected;
                    None
                }
                KeyCode::Enter => Some(if *yes_selected {
                    DialogAnswer::Yes
                } else {
                    DialogAnswer::No
                }),
                _ => None,
            },
            DialogKind::Secret(input) => match key.code {
                KeyCode::Enter => Some(DialogAnswer::Submitted(input.value().to_string())),
                KeyCode::Esc => Some(DialogAnswer::Cancelled),
                _ if ctrl_c => Some(DialogAnswer::Cancelled),
                _ => {
                    input.handle_event(&CrosstermEvent::Key(key));
                    None
                }
            },
        }
    }

    fn border_style(&self, theme: &Theme) -> Style {
        match self.kind {
            DialogKind::Message(DialogLevel::Error) => theme.error(),
            DialogKind::Message(DialogLevel::Warning) => theme.warning(),
            _ => theme.accent(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let width = 60.min(area.width.saturating_sub(4)).max(20);
        let inner_width = width.saturating_sub(4).max(1) as usize;
        let message_lines: u16 = self
            .message
            .lines()
            .map(|line| (line.chars().count().max(1) / inner_width + 1) as u16)
            .sum::<u16>()
            .max(1);
        // borders + padding + message + blank + control row
        let height = message_lines + 5;
        let dialog_area = centered_fixed(width, height, area);

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_style(theme))
            .title(format!(" {} ", self.title))
            .style(theme.normal());
        frame.render_widget(block, dialog_area);

        let inner = dialog_area.inner(&Margin {
            vertical: 1,
            horizontal: 2,
        });
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Message
                Constraint::Length(1), // Control row
            ])
            .split(inner);

        let message = Paragraph::new(self.message.as_str())
            .wrap(Wrap { trim: false })
            .style(theme.normal());
        frame.render_widget(message, rows[0]);

        match &self.kind {
            DialogKind::Message(_) => {
                let ok = Paragraph::new(Line::from(Span::styled("[ OK ]", theme.selected())))
                    .alignment(Alignment::Center);
                frame.render_widget(ok, rows[1]);
            }
            DialogKind::Confirm { yes_selected } => {
                let (yes, no) = if *yes_selected {
                    (theme.selected(), theme.normal())
                } else {
                    (theme.normal(), theme.selected())
                };
                let buttons = Paragraph::new(Line::from(vec![
                    Span::styled("[ Yes ]", yes),
                    Span::raw("   "),
                    Span::styled("[ No ]", no),
                ]))
                .alignment(Alignment::Center);
                frame.render_widget(buttons, rows[1]);
            }
            DialogKind::Secret(input) => {
                let masked = "*".repeat(input.value().chars().count());
                let field_width = rows[1].width as usize;
                let visible: String = masked.chars().take(field_width.saturating_sub(1)).collect();
                let cursor_offset = visible.chars().count() as u16;

                let field = Paragraph::new(Line::from(Span::styled(
                    visible,
                    theme.highlight().add_modifier(Modifier::UNDERLINED),
                )));
                frame.render_widget(field, rows[1]);
                frame.set_cursor(rows[1].x + cursor_offset, rows[1].y);
            }
        }
    }
}
