use async_trait::async_trait;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::debug;

use app_launcher::auth::Prompter;
use app_launcher::Result;

use crate::tui::components::{Dialog, DialogAnswer, DialogLevel};
use crate::tui::terminal::Tui;
use crate::tui::{Event, EventHandler, Theme};

/// Shows PIN dialogs over a blank, locked screen. The main window is never
/// drawn while this is in use.
pub struct TuiPrompter<'a> {
    terminal: &'a mut Tui,
    events: &'a mut EventHandler,
    theme: Theme,
}

impl<'a> TuiPrompter<'a> {
    pub fn new(terminal: &'a mut Tui, events: &'a mut EventHandler, theme: Theme) -> Self {
        Self {
            terminal,
            events,
            theme,
        }
    }

    /// Blocks on key presses until the dialog is closed.
    async fn run(&mut self, mut dialog: Dialog) -> Result<DialogAnswer> {
        debug!("Showing dialog: {}", dialog.title());

        loop {
            let theme = &self.theme;
            self.terminal.draw(|frame| {
                let area = frame.size();
                render_locked(frame, area, theme);
                dialog.render(frame, area, theme);
            })?;

            if let Some(Event::Key(key)) = self.events.next().await {
                if let Some(answer) = dialog.handle_key(key) {
                    return Ok(answer);
                }
            }
        }
    }
}

fn render_locked(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Authenticate to continue", theme.secondary())),
    ];
    let background = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(theme.normal())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(" App Launcher - Locked "),
        );
    frame.render_widget(background, area);
}

#[async_trait]
impl Prompter for TuiPrompter<'_> {
    async fn ask_secret(&mut self, title: &str, prompt: &str) -> Result<Option<String>> {
        match self.run(Dialog::secret(title, prompt)).await? {
            DialogAnswer::Submitted(value) => Ok(Some(value)),
            _ => Ok(None),
        }
    }

    async fn show_error(&mut self, title: &str, message: &str) -> Result<()> {
        self.run(Dialog::message(DialogLevel::Error, title, message))
            .await
            .map(|_| ())
    }

    async fn show_warning(&mut self, title: &str, message: &str) -> Result<()> {
        self.run(Dialog::message(DialogLevel::Warning, title, message))
            .await
            .map(|_| ())
    }
}
