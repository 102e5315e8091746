use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use unicode_width::UnicodeWidthStr;

use crate::tui::components::{fit_tail, Component, DialogLevel};
use crate::tui::{Event, Theme};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    key: &'static str,
    desc: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self { key, desc }
    }
}

pub struct StatusBar {
    status_message: String,
    level: DialogLevel,
    entry_count: usize,
    registry_path: String,
    key_hints: Vec<KeyHint>,
}

impl StatusBar {
    pub fn new(registry_path: String) -> Self {
        Self {
            status_message: "Ready".to_string(),
            level: DialogLevel::Info,
            entry_count: 0,
            registry_path,
            key_hints: Vec::new(),
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.level = DialogLevel::Info;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.level = DialogLevel::Error;
    }

    pub fn set_entry_count(&mut self, count: usize) {
        self.entry_count = count;
    }

    /// Hints for the focused panel, shown before the global ones.
    pub fn set_key_hints(&mut self, hints: Vec<KeyHint>) {
        self.key_hints = hints;
    }

    fn status_style(&self, theme: &Theme) -> Style {
        match self.level {
            DialogLevel::Info => theme.success(),
            DialogLevel::Warning => theme.warning(),
            DialogLevel::Error => theme.error(),
        }
    }

    /// Columns left for the registry path after the status text and count.
    fn path_room(&self, width: usize) -> usize {
        let count = format!("{} apps", self.entry_count);
        width.saturating_sub(self.status_message.width() + count.width() + 2 * " | ".len())
    }

    fn hint_line(&self, theme: &Theme) -> Line<'static> {
        let mut spans = Vec::new();
        for hint in &self.key_hints {
            spans.push(Span::styled(hint.key, theme.highlight()));
            spans.push(Span::styled(format!(": {} | ", hint.desc), theme.secondary()));
        }
        spans.push(Span::styled("F1", theme.highlight()));
        spans.push(Span::styled(": Help | ", theme.secondary()));
        spans.push(Span::styled("Ctrl+Q", theme.highlight()));
        spans.push(Span::styled(": Quit", theme.secondary()));
        Line::from(spans)
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(theme.border());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(inner);

        let info_room = self.path_room(columns[0].width as usize);
        let status_line = Line::from(vec![
            Span::styled(self.status_message.clone(), self.status_style(theme)),
            Span::raw(" | "),
            Span::styled(format!("{} apps", self.entry_count), theme.accent()),
            Span::raw(" | "),
            Span::styled(fit_tail(&self.registry_path, info_room), theme.secondary()),
        ]);
        frame.render_widget(
            Paragraph::new(status_line).alignment(Alignment::Left),
            columns[0],
        );

        frame.render_widget(
            Paragraph::new(self.hint_line(theme)).alignment(Alignment::Right),
            columns[1],
        );
    }

    fn handle_event(&mut self, _event: &Event) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_levels() {
        let mut bar = StatusBar::new("/tmp/apps.txt".to_string());
        assert_eq!(bar.status_message, "Ready");

        bar.set_error("Failed to launch");
        assert_eq!(bar.level, DialogLevel::Error);

        bar.set_status("Added /bin/ls");
        assert_eq!(bar.level, DialogLevel::Info);
        assert_eq!(bar.status_message, "Added /bin/ls");
    }

    #[test]
    fn test_path_room_counts_display_columns() {
        let mut bar = StatusBar::new("/tmp/apps.txt".to_string());
        bar.set_entry_count(3);

        bar.set_status("Ready");
        // "Ready" + " | " + "3 apps" + " | "
        assert_eq!(bar.path_room(40), 40 - 17);

        // 4 columns but 12 bytes
        bar.set_status("漢字");
        assert_eq!(bar.path_room(40), 40 - 16);
        assert_eq!(bar.path_room(10), 0);
    }

    #[test]
    fn test_hint_line_ends_with_global_keys() {
        let mut bar = StatusBar::new(String::new());
        bar.set_key_hints(vec![KeyHint::new("Enter", "Launch"), KeyHint::new("d", "Remove")]);

        let line = bar.hint_line(&Theme::default());
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Enter: Launch | d: Remove | F1: Help | Ctrl+Q: Quit");
    }
}
