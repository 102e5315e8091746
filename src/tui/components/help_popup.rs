use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

use crate::tui::components::{centered_rect, Component};
use crate::tui::{Event, Theme};

const HELP_CONTENT: &[(&str, &str)] = &[
    ("Applications", ""),
    ("  Up/Down (k/j)", "Move the selection"),
    ("  Home / End", "First / last application"),
    ("  Enter", "Launch the selected application"),
    ("  d / Delete", "Remove the selected application"),
    ("", ""),
    ("New App Path", ""),
    ("  Enter", "Add the typed path"),
    ("  Ctrl+B / F2", "Browse for an application"),
    ("  Esc", "Back to the application list"),
    ("", ""),
    ("File Browser", ""),
    ("  Enter", "Open folder / pick file"),
    ("  Space", "Pick the highlighted folder (.app mode)"),
    ("  Backspace", "Parent folder"),
    ("  .", "Show / hide hidden files"),
    ("  Esc", "Cancel"),
    ("", ""),
    ("General", ""),
    ("  Tab / Shift+Tab", "Switch between list and path field"),
    ("  F5 / r", "Reload the application list"),
    ("  F1", "Show/hide this help"),
    ("  Ctrl+Q / Ctrl+C", "Quit"),
];

pub struct HelpPopup {
    is_visible: bool,
}

impl HelpPopup {
    pub fn new() -> Self {
        Self { is_visible: false }
    }

    pub fn hide(&mut self) {
        self.is_visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn toggle(&mut self) {
        self.is_visible = !self.is_visible;
    }
}

impl Component for HelpPopup {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.is_visible {
            return;
        }

        let popup_area = centered_rect(60, 80, area);
        frame.render_widget(Clear, popup_area);

        let items: Vec<ListItem> = HELP_CONTENT
            .iter()
            .map(|(key, description)| {
                if key.is_empty() {
                    ListItem::new(Line::from(""))
                } else if description.is_empty() {
                    ListItem::new(Line::from(Span::styled(
                        *key,
                        theme.accent().add_modifier(Modifier::BOLD),
                    )))
                } else {
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("{:<20}", key), theme.highlight()),
                        Span::styled(*description, theme.normal()),
                    ]))
                }
            })
            .collect();

        let help_list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.accent())
                    .title(" Help - Press F1 or Esc to close "),
            )
            .style(theme.normal());

        frame.render_widget(help_list, popup_area);
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        if !self.is_visible {
            return false;
        }

        if let Event::Key(key) = event {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q')) {
                self.hide();
            }
        }
        // Modal while open
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    #[test]
    fn test_visible_popup_swallows_keys() {
        let mut help = HelpPopup::new();
        let down = Event::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        assert!(!help.handle_event(&down));

        help.toggle();
        assert!(help.handle_event(&down));
        assert!(help.is_visible());

        assert!(help.handle_event(&Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))));
        assert!(!help.is_visible());
    }
}
