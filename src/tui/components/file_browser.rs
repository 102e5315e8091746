use crossterm::event::{KeyCode, KeyEvent};
use directories::BaseDirs;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::tui::components::{centered_rect, fit_tail};
use crate::tui::Theme;

/// What the Browse button picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickMode {
    /// An executable file.
    File,
    /// A directory, for platforms where applications are `.app` bundles.
    Directory,
}

impl PickMode {
    pub fn for_os(os: &str) -> Self {
        if os == "macos" {
            PickMode::Directory
        } else {
            PickMode::File
        }
    }

    pub fn current() -> Self {
        Self::for_os(std::env::consts::OS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Parent,
    Dir,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEntry {
    pub name: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserAnswer {
    Selected(PathBuf),
    Cancelled,
}

pub struct FileBrowser {
    dir: PathBuf,
    entries: Vec<BrowserEntry>,
    state: ListState,
    mode: PickMode,
    show_hidden: bool,
    message: Option<String>,
}

impl FileBrowser {
    pub fn open(start: &Path, mode: PickMode) -> Self {
        let mut browser = Self {
            dir: start.to_path_buf(),
            entries: Vec::new(),
            state: ListState::default(),
            mode,
            show_hidden: false,
            message: None,
        };
        browser.reload();
        browser
    }

    /// Where to start browsing for the current contents of the path field.
    pub fn starting_dir(input: &str) -> PathBuf {
        let input = Path::new(input.trim());
        if !input.as_os_str().is_empty() {
            if input.is_dir() {
                return input.to_path_buf();
            }
            if let Some(parent) = input.parent().filter(|p| p.is_dir()) {
                return parent.to_path_buf();
            }
        }

        BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("/"))
    }

    #[cfg(test)]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[BrowserEntry] {
        &self.entries
    }

    pub fn selected_entry(&self) -> Option<&BrowserEntry> {
        self.state.selected().and_then(|i| self.entries.get(i))
    }

    fn reload(&mut self) {
        self.entries.clear();
        self.message = None;

        if self.dir.parent().is_some() {
            self.entries.push(BrowserEntry {
                name: "..".to_string(),
                kind: EntryKind::Parent,
            });
        }

        match std::fs::read_dir(&self.dir) {
            Ok(read_dir) => {
                let mut dirs = Vec::new();
                let mut files = Vec::new();
                for entry in read_dir.flatten() {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    if !self.show_hidden && name.starts_with('.') {
                        continue;
                    }
                    // Follows symlinks
                    if entry.path().is_dir() {
                        dirs.push(name);
                    } else {
                        files.push(name);
                    }
                }
                dirs.sort_by_key(|name| name.to_lowercase());
                files.sort_by_key(|name| name.to_lowercase());

                self.entries.extend(dirs.into_iter().map(|name| BrowserEntry {
                    name,
                    kind: EntryKind::Dir,
                }));
                self.entries.extend(files.into_iter().map(|name| BrowserEntry {
                    name,
                    kind: EntryKind::File,
                }));
            }
            Err(e) => {
                debug!("Cannot read {:?}: {}", self.dir, e);
                self.message = Some(format!("Cannot read directory: {}", e));
            }
        }

        self.state
            .select(if self.entries.is_empty() { None } else { Some(0) });
    }

    fn enter_dir(&mut self, path: PathBuf) {
        self.dir = path;
        self.reload();
    }

    fn go_up(&mut self) {
        if let Some(parent) = self.dir.parent() {
            let parent = parent.to_path_buf();
            self.enter_dir(parent);
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let len = self.entries.len() as isize;
        let current = self.state.selected().unwrap_or(0) as isize;
        self.state.select(Some((current + delta).rem_euclid(len) as usize));
    }

    fn is_bundle(name: &str) -> bool {
        name.to_lowercase().ends_with(".app")
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<BrowserAnswer> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Some(BrowserAnswer::Cancelled),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Home | KeyCode::Char('g') => {
                if !self.entries.is_empty() {
                    self.state.select(Some(0));
                }
            }
            KeyCode::End | KeyCode::Char('G') => {
                if !self.entries.is_empty() {
                    self.state.select(Some(self.entries.len() - 1));
                }
            }
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => self.go_up(),
            KeyCode::Char('.') => {
                self.show_hidden = !self.show_hidden;
                self.reload();
            }
            KeyCode::Char(' ') if self.mode == PickMode::Directory => {
                if let Some(entry) = self.selected_entry() {
                    let picked = match entry.kind {
                        EntryKind::Parent => self.dir.clone(),
                        EntryKind::Dir => self.dir.join(&entry.name),
                        EntryKind::File => {
                            self.message = Some("Select a directory".to_string());
                            return None;
                        }
                    };
                    return Some(BrowserAnswer::Selected(picked));
                }
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                let entry = self.selected_entry()?.clone();
                let path = self.dir.join(&entry.name);
                match entry.kind {
                    EntryKind::Parent => self.go_up(),
                    EntryKind::Dir => {
                        if self.mode == PickMode::Directory && Self::is_bundle(&entry.name) {
                            return Some(BrowserAnswer::Selected(path));
                        }
                        self.enter_dir(path);
                    }
                    EntryKind::File => match self.mode {
                        PickMode::File => return Some(BrowserAnswer::Selected(path)),
                        PickMode::Directory => {
                            self.message = Some("Select a directory (Space)".to_string());
                        }
                    },
                }
            }
            _ => {}
        }
        None
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = centered_rect(70, 70, area);
        frame.render_widget(Clear, popup_area);

        let title = match self.mode {
            PickMode::File => " Select Executable ",
            PickMode::Directory => " Select .app Folder ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.accent())
            .title(title)
            .style(theme.normal());
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Current directory
                Constraint::Min(1),    // Entries
                Constraint::Length(1), // Hints / message
            ])
            .split(inner);

        let location = fit_tail(&self.dir.display().to_string(), rows[0].width as usize);
        frame.render_widget(
            Paragraph::new(Span::styled(location, theme.highlight())),
            rows[0],
        );

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let line = match entry.kind {
                    EntryKind::Parent => Line::from(Span::styled("../", theme.secondary())),
                    EntryKind::Dir => Line::from(Span::styled(format!("{}/", entry.name), theme.accent())),
                    EntryKind::File => Line::from(Span::styled(entry.name.clone(), theme.normal())),
                };
                ListItem::new(line)
            })
            .collect();

        let list = List::new(items)
            .highlight_style(theme.selected())
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, rows[1], &mut self.state);

        let footer = match &self.message {
            Some(message) => Span::styled(message.clone(), theme.warning()),
            None => Span::styled(
                match self.mode {
                    PickMode::File => "Enter: open/select  Backspace: up  .: hidden  Esc: cancel",
                    PickMode::Directory => "Enter: open  Space: select  Backspace: up  Esc: cancel",
                },
                theme.secondary(),
            ),
        };
        frame.render_widget(Paragraph::new(footer), rows[2]);
    }
}
