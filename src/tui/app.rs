use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, warn};

use app_launcher::app::{AppCommand, AppState, CommandOutcome};
use app_launcher::Error;

use crate::tui::{
    components::{
        AppList, BrowserAnswer, Component, Dialog, DialogAnswer, DialogLevel,
        FileBrowser, HelpPopup, KeyHint, PathInput, PickMode, StatusBar,
    },
    Event, Theme,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusedPanel {
    AppList,
    PathInput,
}

/// Modal layer drawn over the main window. Keys go here first.
enum Overlay {
    /// `pending` runs when a confirmation is answered with Yes.
    Dialog {
        dialog: Dialog,
        pending: Option<AppCommand>,
    },
    Browser(FileBrowser),
}

pub struct App {
    // Components
    app_list: AppList,
    path_input: PathInput,
    status_bar: StatusBar,
    help_popup: HelpPopup,
    overlay: Option<Overlay>,

    // State
    focused_panel: FocusedPanel,
    theme: Theme,
    pick_mode: PickMode,
    should_quit: bool,

    // Backend integration
    app_state: Arc<AppState>,
    event_sender: mpsc::UnboundedSender<Event>,
}

impl App {
    pub fn new(app_state: Arc<AppState>, event_sender: mpsc::UnboundedSender<Event>) -> Self {
        let ui = &app_state.config().ui;
        let theme = Theme::from_name(&ui.theme);
        let app_list = AppList::new(ui.show_full_paths);
        let status_bar = StatusBar::new(app_state.registry().path().display().to_string());

        let mut app = Self {
            app_list,
            path_input: PathInput::new(),
            status_bar,
            help_popup: HelpPopup::new(),
            overlay: None,
            focused_panel: FocusedPanel::AppList,
            theme,
            pick_mode: PickMode::current(),
            should_quit: false,
            app_state,
            event_sender,
        };

        app.update_focus();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn initialize(&mut self) {
        self.refresh().await;
        self.status_bar.set_status("Ready");
    }

    pub async fn handle_event(&mut self, event: Event) {
        match event {
            Event::Command(command) => self.execute(command).await,
            Event::Key(key) => {
                if self.help_popup.handle_event(&Event::Key(key)) {
                    return;
                }
                if self.overlay.is_some() {
                    self.handle_overlay_key(key);
                    return;
                }
                if self.handle_global_keys(key).await {
                    return;
                }
                self.handle_panel_specific_keys(key).await;
            }
            Event::Tick | Event::Resize(_, _) => {}
        }
    }

    async fn handle_global_keys(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('q'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                true
            }
            (KeyCode::F(1), _) => {
                self.help_popup.toggle();
                true
            }
            (KeyCode::Tab, KeyModifiers::NONE) | (KeyCode::BackTab, _) => {
                self.toggle_panel();
                true
            }
            (KeyCode::Char('b'), KeyModifiers::CONTROL) | (KeyCode::F(2), _) => {
                self.open_browser();
                true
            }
            (KeyCode::F(5), _) => {
                self.refresh().await;
                self.status_bar.set_status("List reloaded");
                true
            }
            (KeyCode::Esc, KeyModifiers::NONE) if self.focused_panel == FocusedPanel::PathInput => {
                self.set_focused_panel(FocusedPanel::AppList);
                true
            }
            _ => false,
        }
    }

    async fn handle_panel_specific_keys(&mut self, key: KeyEvent) {
        let handled = match self.focused_panel {
            FocusedPanel::AppList => self.app_list.handle_event(&Event::Key(key)),
            FocusedPanel::PathInput => self.path_input.handle_event(&Event::Key(key)),
        };
        if handled {
            return;
        }

        match self.focused_panel {
            FocusedPanel::AppList => match key.code {
                KeyCode::Enter => {
                    if let Some((_, path)) = self.app_list.selected() {
                        let command = AppCommand::Launch(path.to_string());
                        self.send(command);
                    }
                }
                KeyCode::Delete | KeyCode::Char('d') => self.confirm_remove(),
                KeyCode::Char('r') => {
                    self.refresh().await;
                    self.status_bar.set_status("List reloaded");
                }
                _ => {}
            },
            FocusedPanel::PathInput => {
                if key.code == KeyCode::Enter {
                    self.send(AppCommand::Add(self.path_input.get_content()));
                }
            }
        }
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) {
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };

        match overlay {
            Overlay::Dialog { dialog, pending } => {
                if let Some(answer) = dialog.handle_key(key) {
                    let pending = pending.take();
                    self.overlay = None;
                    match (answer, pending) {
                        (DialogAnswer::Yes, Some(command)) => self.send(command),
                        (_, Some(_)) => self.status_bar.set_status("Remove cancelled"),
                        _ => {}
                    }
                }
            }
            Overlay::Browser(browser) => {
                if let Some(answer) = browser.handle_key(key) {
                    self.overlay = None;
                    match answer {
                        BrowserAnswer::Selected(path) => {
                            self.path_input.set_content(path.display().to_string());
                            self.set_focused_panel(FocusedPanel::PathInput);
                            self.status_bar.set_status("Press Enter to add the selected path");
                        }
                        BrowserAnswer::Cancelled => self.status_bar.set_status("Browse cancelled"),
                    }
                }
            }
        }
    }

    fn send(&self, command: AppCommand) {
        let _ = self.event_sender.send(Event::Command(command));
    }

    fn confirm_remove(&mut self) {
        let Some((row, path)) = self.app_list.selected() else {
            return;
        };
        let dialog = Dialog::confirm("Confirm Remove", format!("Remove {} from the list?", path));
        let pending = Some(AppCommand::Remove {
            row,
            path: path.to_string(),
        });
        self.overlay = Some(Overlay::Dialog { dialog, pending });
    }

    fn open_browser(&mut self) {
        let start = FileBrowser::starting_dir(&self.path_input.get_content());
        self.overlay = Some(Overlay::Browser(FileBrowser::open(&start, self.pick_mode)));
    }

    fn show_error(&mut self, err: &Error) {
        let level = if err.is_warning() {
            warn!("{}", err);
            DialogLevel::Warning
        } else {
            error!("{}", err);
            DialogLevel::Error
        };
        self.status_bar.set_error(err.title());
        self.overlay = Some(Overlay::Dialog {
            dialog: Dialog::message(level, err.title(), err.to_string()),
            pending: None,
        });
    }

    async fn execute(&mut self, command: AppCommand) {
        match self.app_state.dispatch(command).await {
            Ok(outcome) => {
                if let CommandOutcome::Added(_) = outcome {
                    self.path_input.clear();
                }
                if outcome.needs_refresh() {
                    self.refresh().await;
                }
                self.status_bar.set_status(outcome.describe());
            }
            Err(err) => self.show_error(&err),
        }
    }

    /// Rebuilds the list from the registry file.
    async fn refresh(&mut self) {
        match self.app_state.entries().await {
            Ok(entries) => {
                self.app_list.set_entries(entries);
                self.status_bar.set_entry_count(self.app_list.len());
            }
            Err(err) => self.show_error(&err),
        }
    }

    fn toggle_panel(&mut self) {
        let next = match self.focused_panel {
            FocusedPanel::AppList => FocusedPanel::PathInput,
            FocusedPanel::PathInput => FocusedPanel::AppList,
        };
        self.set_focused_panel(next);
    }

    fn set_focused_panel(&mut self, panel: FocusedPanel) {
        self.focused_panel = panel;
        self.update_focus();
    }

    fn update_focus(&mut self) {
        self.app_list.unfocus();
        self.path_input.unfocus();

        let key_hints = match self.focused_panel {
            FocusedPanel::AppList => {
                self.app_list.focus();
                vec![
                    KeyHint::new("Enter", "Launch"),
                    KeyHint::new("d", "Remove"),
                    KeyHint::new("Tab", "Path"),
                ]
            }
            FocusedPanel::PathInput => {
                self.path_input.focus();
                vec![
                    KeyHint::new("Enter", "Add App"),
                    KeyHint::new("Ctrl+B", "Browse"),
                    KeyHint::new("Tab", "List"),
                ]
            }
        };
        self.status_bar.set_key_hints(key_hints);
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(3),    // App list
                Constraint::Length(3), // Path row
                Constraint::Length(2), // Status bar
            ])
            .split(frame.size());

        let path_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(20),
                Constraint::Length(13), // Browse
                Constraint::Length(11), // Add
            ])
            .split(chunks[2]);

        let title = Paragraph::new(Line::from(Span::styled(
            format!("App Launcher - {}", os_title(std::env::consts::OS)),
            self.theme.accent().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .style(self.theme.normal());
        frame.render_widget(title, chunks[0]);

        self.app_list.render(frame, chunks[1], &self.theme);
        self.path_input.render(frame, path_row[0], &self.theme);
        self.render_button(frame, path_row[1], "Browse ^B");
        self.render_button(frame, path_row[2], "Add App");
        self.status_bar.render(frame, chunks[3], &self.theme);

        let area = frame.size();
        match self.overlay.as_mut() {
            Some(Overlay::Dialog { dialog, .. }) => dialog.render(frame, area, &self.theme),
            Some(Overlay::Browser(browser)) => browser.render(frame, area, &self.theme),
            None => {}
        }

        self.help_popup.render(frame, area, &self.theme);
    }

    fn render_button(&self, frame: &mut Frame, area: Rect, label: &str) {
        let button = Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(self.theme.normal())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.border()),
            );
        frame.render_widget(button, area);
    }
}

/// Platform name shown in the window title.
fn os_title(os: &str) -> &str {
    match os {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_launcher::app::AppConfig;
    use app_launcher::platform::AppPaths;
    use tempfile::TempDir;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    async fn test_app(
        entries: &str,
    ) -> (App, mpsc::UnboundedReceiver<Event>, TempDir) {
        let dir = TempDir::new().unwrap();
        let registry = dir.path().join("apps.txt");
        std::fs::write(&registry, entries).unwrap();

        let mut config = AppConfig::default();
        config.registry.path = Some(registry.display().to_string());
        let paths = AppPaths::with_base_dir(dir.path().join("config"));
        let state = Arc::new(AppState::new(config, paths).unwrap());

        let (sender, receiver) = mpsc::unbounded_channel();
        let mut app = App::new(state, sender);
        app.initialize().await;
        (app, receiver, dir)
    }

    /// Feeds every queued command back into the app.
    async fn drain(app: &mut App, receiver: &mut mpsc::UnboundedReceiver<Event>) {
        while let Ok(event) = receiver.try_recv() {
            app.handle_event(event).await;
        }
    }

    #[test]
    fn test_os_title() {
        assert_eq!(os_title("linux"), "Linux");
        assert_eq!(os_title("macos"), "Darwin");
        assert_eq!(os_title("windows"), "Windows");
        assert_eq!(os_title("freebsd"), "freebsd");
    }

    #[tokio::test]
    async fn test_initial_list_comes_from_registry() {
        let (app, _rx, _dir) = test_app("/bin/ls\n\n/bin/cat\n").await;
        assert_eq!(app.app_list.len(), 2);
        assert_eq!(app.app_list.selected(), Some((0, "/bin/ls")));
        assert_eq!(app.focused_panel, FocusedPanel::AppList);
    }

    #[tokio::test]
    async fn test_add_typed_path() {
        let (mut app, mut rx, dir) = test_app("").await;
        let target = dir.path().join("tool");
        std::fs::write(&target, "").unwrap();

        app.handle_event(press(KeyCode::Tab)).await;
        assert_eq!(app.focused_panel, FocusedPanel::PathInput);
        app.path_input.set_content(format!("  {}  ", target.display()));
        app.handle_event(press(KeyCode::Enter)).await;
        drain(&mut app, &mut rx).await;

        assert_eq!(app.app_list.len(), 1);
        assert_eq!(app.path_input.get_content(), "");
        assert!(app.overlay.is_none());

        let saved = std::fs::read_to_string(dir.path().join("apps.txt")).unwrap();
        assert_eq!(saved, format!("{}\n", target.display()));
    }

    #[tokio::test]
    async fn test_add_missing_path_warns() {
        let (mut app, mut rx, _dir) = test_app("").await;
        app.handle_event(press(KeyCode::Tab)).await;
        app.path_input.set_content("/definitely/not/here".to_string());
        app.handle_event(press(KeyCode::Enter)).await;
        drain(&mut app, &mut rx).await;

        match &app.overlay {
            Some(Overlay::Dialog { dialog, pending }) => {
                assert_eq!(dialog.title(), "Invalid Path");
                assert_eq!(dialog.message_text(), "Path does not exist:\n/definitely/not/here");
                assert!(pending.is_none());
            }
            _ => panic!("expected a warning dialog"),
        }
        // Field keeps the rejected input
        assert_eq!(app.path_input.get_content(), "/definitely/not/here");

        app.handle_event(press(KeyCode::Enter)).await;
        assert!(app.overlay.is_none());
    }

    #[tokio::test]
    async fn test_add_empty_input_warns() {
        let (mut app, mut rx, _dir) = test_app("").await;
        app.handle_event(press(KeyCode::Tab)).await;
        app.handle_event(press(KeyCode::Enter)).await;
        drain(&mut app, &mut rx).await;

        match &app.overlay {
            Some(Overlay::Dialog { dialog, .. }) => {
                assert_eq!(dialog.title(), "Empty Input");
                assert_eq!(dialog.message_text(), "Please enter a valid path.");
            }
            _ => panic!("expected a warning dialog"),
        }
    }

    #[tokio::test]
    async fn test_remove_requires_confirmation() {
        let (mut app, mut rx, dir) = test_app("/bin/ls\n/bin/cat\n/bin/ls\n").await;
        app.handle_event(press(KeyCode::End)).await;
        app.handle_event(press(KeyCode::Char('d'))).await;

        match &app.overlay {
            Some(Overlay::Dialog { dialog, .. }) => {
                assert_eq!(dialog.title(), "Confirm Remove");
                assert_eq!(dialog.message_text(), "Remove /bin/ls from the list?");
            }
            _ => panic!("expected a confirmation dialog"),
        }

        // Declining leaves the file alone
        app.handle_event(press(KeyCode::Char('n'))).await;
        drain(&mut app, &mut rx).await;
        assert_eq!(app.app_list.len(), 3);

        app.handle_event(press(KeyCode::Char('d'))).await;
        app.handle_event(press(KeyCode::Char('y'))).await;
        drain(&mut app, &mut rx).await;

        assert_eq!(app.app_list.len(), 2);
        let saved = std::fs::read_to_string(dir.path().join("apps.txt")).unwrap();
        assert_eq!(saved, "/bin/ls\n/bin/cat\n");
    }

    #[tokio::test]
    async fn test_help_and_quit() {
        let (mut app, _rx, _dir) = test_app("").await;
        app.handle_event(press(KeyCode::F(1))).await;
        assert!(app.help_popup.is_visible());
        app.handle_event(press(KeyCode::Esc)).await;
        assert!(!app.help_popup.is_visible());

        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('q'),
            KeyModifiers::CONTROL,
        )))
        .await;
        assert!(app.should_quit());
    }
}
