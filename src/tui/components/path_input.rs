use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::tui::{components::Component, Event, Theme};

/// Single-line field where a new application path is composed.
#[derive(Debug, Clone)]
pub struct PathInput {
    input: Input,
    is_focused: bool,
    placeholder: String,
}

impl PathInput {
    pub fn new() -> Self {
        Self {
            input: Input::default(),
            is_focused: false,
            placeholder: "Path to an application (Enter: Add App, Ctrl+B: Browse)".to_string(),
        }
    }

    pub fn focus(&mut self) {
        self.is_focused = true;
    }

    pub fn unfocus(&mut self) {
        self.is_focused = false;
    }

    pub fn clear(&mut self) {
        self.input.reset();
    }

    pub fn get_content(&self) -> String {
        self.input.value().to_string()
    }

    pub fn set_content(&mut self, content: String) {
        self.input = Input::new(content);
    }
}

impl Component for PathInput {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border_style = if self.is_focused {
            theme.accent()
        } else {
            theme.border()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" New App Path ");

        if self.input.value().is_empty() {
            let content = Line::from(Span::styled(self.placeholder.as_str(), theme.secondary()));
            frame.render_widget(Paragraph::new(content).block(block).style(theme.normal()), area);
            if self.is_focused {
                frame.set_cursor(area.x + 1, area.y + 1);
            }
            return;
        }

        // Horizontal scroll so the cursor stays visible
        let available_width = area.width.saturating_sub(2) as usize;
        let cursor_pos = self.input.visual_cursor();
        let scroll_offset = if cursor_pos >= available_width {
            cursor_pos.saturating_sub(available_width) + 1
        } else {
            0
        };

        // Slice by chars, not bytes
        let chars: Vec<char> = self.input.value().chars().collect();
        let start = scroll_offset.min(chars.len());
        let end = (start + available_width).min(chars.len());
        let visible_text: String = chars[start..end].iter().collect();

        let paragraph = Paragraph::new(Line::from(visible_text))
            .block(block)
            .style(theme.normal());
        frame.render_widget(paragraph, area);

        if self.is_focused {
            let cursor_x = area.x + 1 + cursor_pos.saturating_sub(scroll_offset) as u16;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                frame.set_cursor(cursor_x, area.y + 1);
            }
        }
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        if !self.is_focused {
            return false;
        }

        match event {
            Event::Key(key) => match key.code {
                // Add / focus switch / back to list belong to the parent
                KeyCode::Enter | KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => false,
                _ if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => false,
                _ => {
                    self.input.handle_event(&CrosstermEvent::Key(*key));
                    true
                }
            },
            _ => false,
        }
    }
}
