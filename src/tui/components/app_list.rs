use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use app_launcher::app::display_name;

use crate::tui::components::{fit, fit_tail, Component};
use crate::tui::{Event, Theme};

const REMOVE_LABEL: &str = "[Remove]";

/// One row per registry entry: `Launch <name>` with a Remove action.
pub struct AppList {
    entries: Vec<String>,
    state: ListState,
    is_focused: bool,
    show_full_paths: bool,
}

impl AppList {
    pub fn new(show_full_paths: bool) -> Self {
        Self {
            entries: Vec::new(),
            state: ListState::default(),
            is_focused: false,
            show_full_paths,
        }
    }

    pub fn focus(&mut self) {
        self.is_focused = true;
    }

    pub fn unfocus(&mut self) {
        self.is_focused = false;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Replaces the rows, keeping the selection index where possible.
    pub fn set_entries(&mut self, entries: Vec<String>) {
        let selected = self.state.selected().unwrap_or(0);
        self.entries = entries;

        if self.entries.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(selected.min(self.entries.len() - 1)));
        }
    }

    /// Row index and path of the highlighted entry.
    pub fn selected(&self) -> Option<(usize, &str)> {
        self.state
            .selected()
            .and_then(|i| self.entries.get(i).map(|path| (i, path.as_str())))
    }

    pub fn next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.entries.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.entries.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    fn row<'a>(&self, path: &str, width: usize, theme: &Theme) -> Line<'a> {
        let label = format!("Launch {}", display_name(path));
        // Leave room for the remove action and a gap
        let label_room = width.saturating_sub(REMOVE_LABEL.len() + 2);
        let label = fit(&label, label_room);

        let mut spans = vec![Span::styled(label.clone(), theme.highlight())];
        let mut used = label.width();

        if self.show_full_paths {
            let path_room = label_room.saturating_sub(used + 2);
            if path_room > 3 {
                let shown = fit_tail(path, path_room);
                used += shown.width() + 2;
                spans.push(Span::raw("  "));
                spans.push(Span::styled(shown, theme.secondary()));
            }
        }

        let padding = width.saturating_sub(used + REMOVE_LABEL.len());
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(REMOVE_LABEL, theme.error()));
        Line::from(spans)
    }
}

impl Component for AppList {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border_style = if self.is_focused {
            theme.accent()
        } else {
            theme.border()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" Applications ({}) ", self.entries.len()));

        if self.entries.is_empty() {
            let hint = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("No applications yet.", theme.normal())),
                Line::from(Span::styled(
                    "Type a path below and press Enter, or Ctrl+B to browse.",
                    theme.secondary(),
                )),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block)
            .style(theme.normal());
            frame.render_widget(hint, area);
            return;
        }

        // Borders plus highlight symbol
        let width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|path| ListItem::new(self.row(path, width, theme)))
            .collect();

        let list = List::new(items)
            .block(block)
            .style(theme.normal())
            .highlight_style(theme.selected())
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.state);
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        if !self.is_focused {
            return false;
        }

        match event {
            Event::Key(key) => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.previous();
                    true
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.next();
                    true
                }
                KeyCode::Home => {
                    if !self.entries.is_empty() {
                        self.state.select(Some(0));
                    }
                    true
                }
                KeyCode::End => {
                    if !self.entries.is_empty() {
                        self.state.select(Some(self.entries.len() - 1));
                    }
                    true
                }
                // Enter (launch) and d/Delete (remove) are handled by the parent
                _ => false,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn list_with(entries: &[&str]) -> AppList {
        let mut list = AppList::new(true);
        list.set_entries(entries.iter().map(|e| e.to_string()).collect());
        list.focus();
        list
    }

    #[test]
    fn test_navigation_wraps() {
        let mut list = list_with(&["/bin/ls", "/bin/cat", "/bin/ls"]);
        assert_eq!(list.selected(), Some((0, "/bin/ls")));

        assert!(list.handle_event(&key(KeyCode::Up)));
        assert_eq!(list.selected(), Some((2, "/bin/ls")));
        assert!(list.handle_event(&key(KeyCode::Down)));
        assert_eq!(list.selected(), Some((0, "/bin/ls")));
        assert!(list.handle_event(&key(KeyCode::Char('j'))));
        assert_eq!(list.selected(), Some((1, "/bin/cat")));

        assert!(!list.handle_event(&key(KeyCode::Enter)));
    }

    #[test]
    fn test_selection_clamped_after_refresh() {
        let mut list = list_with(&["/a", "/b", "/c"]);
        list.handle_event(&key(KeyCode::End));
        assert_eq!(list.selected(), Some((2, "/c")));

        list.set_entries(vec!["/a".into()]);
        assert_eq!(list.selected(), Some((0, "/a")));

        list.set_entries(Vec::new());
        assert_eq!(list.selected(), None);
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut list = list_with(&["/a", "/b"]);
        list.unfocus();
        assert!(!list.handle_event(&key(KeyCode::Down)));
        assert_eq!(list.selected(), Some((0, "/a")));
    }

    #[test]
    fn test_row_layout() {
        let list = list_with(&["/usr/bin/htop"]);
        let line = list.row("/usr/bin/htop", 40, &Theme::default());
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();

        assert!(text.starts_with("Launch htop  /usr/bin/htop"));
        assert!(text.ends_with(REMOVE_LABEL));
        assert_eq!(text.width(), 40);
    }
}
