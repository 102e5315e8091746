use async_trait::async_trait;

use crate::error::Result;

/// Interactive surface the PIN store talks to. The terminal UI renders these
/// as modal dialogs; tests script them.
#[async_trait]
pub trait Prompter: Send {
    /// Asks for masked input. `Ok(None)` means the user cancelled.
    async fn ask_secret(&mut self, title: &str, prompt: &str) -> Result<Option<String>>;

    async fn show_error(&mut self, title: &str, message: &str) -> Result<()>;

    async fn show_warning(&mut self, title: &str, message: &str) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod scripted {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Shown {
        Error(String, String),
        Warning(String, String),
    }

    /// Replays a fixed sequence of answers and records every dialog shown.
    #[derive(Default)]
    pub struct ScriptedPrompter {
        answers: VecDeque<Option<String>>,
        pub asked: Vec<String>,
        pub shown: Vec<Shown>,
    }

    impl ScriptedPrompter {
        pub fn new<I, S>(answers: I) -> Self
        where
            I: IntoIterator<Item = Option<S>>,
            S: Into<String>,
        {
            Self {
                answers: answers.into_iter().map(|a| a.map(Into::into)).collect(),
                ..Default::default()
            }
        }

        pub fn remaining(&self) -> usize {
            self.answers.len()
        }
    }

    #[async_trait]
    impl Prompter for ScriptedPrompter {
        async fn ask_secret(&mut self, title: &str, _prompt: &str) -> Result<Option<String>> {
            self.asked.push(title.to_string());
            // Running out of script behaves like the user closing the dialog.
            Ok(self.answers.pop_front().flatten())
        }

        async fn show_error(&mut self, title: &str, message: &str) -> Result<()> {
            self.shown.push(Shown::Error(title.into(), message.into()));
            Ok(())
        }

        async fn show_warning(&mut self, title: &str, message: &str) -> Result<()> {
            self.shown.push(Shown::Warning(title.into(), message.into()));
            Ok(())
        }
    }
}
