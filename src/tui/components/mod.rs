pub mod app_list;
pub mod dialog;
pub mod file_browser;
pub mod help_popup;
pub mod path_input;
pub mod status_bar;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::{Event, Theme};

pub use app_list::AppList;
pub use dialog::{Dialog, DialogAnswer, DialogLevel};
pub use file_browser::{BrowserAnswer, FileBrowser, PickMode};
pub use help_popup::HelpPopup;
pub use path_input::PathInput;
pub use status_bar::{KeyHint, StatusBar};

/// Base trait for the main-window panels
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Returns `true` when the event was consumed.
    fn handle_event(&mut self, event: &Event) -> bool;
}

/// A `percent_x` by `percent_y` rectangle centred in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Centred rectangle of a fixed size, clamped to `r`.
pub fn centered_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

/// Truncates `text` to at most `width` display columns, marking the cut with `…`.
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Keeps the end of `text` (where file names live) within `width` columns.
pub fn fit_tail(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut tail: Vec<char> = Vec::new();
    let mut used = 0;
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        tail.push(c);
        used += w;
    }
    std::iter::once('…').chain(tail.into_iter().rev()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit() {
        assert_eq!(fit("Launch vim", 20), "Launch vim");
        assert_eq!(fit("Launch firefox", 8), "Launch …");
        assert_eq!(fit("abc", 0), "");
        assert_eq!(fit("漢字漢字", 5), "漢字…");
    }

    #[test]
    fn test_fit_tail() {
        assert_eq!(fit_tail("/usr/bin/vim", 20), "/usr/bin/vim");
        assert_eq!(fit_tail("/usr/local/bin/htop", 8), "…in/htop");
    }

    #[test]
    fn test_centered_fixed_clamps() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_fixed(20, 4, area), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_fixed(80, 40, area), area);
    }
}
