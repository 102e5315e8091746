use std::path::Path;

/// Everything the user can do to the app list, independent of how the UI
/// presents it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Launch(String),
    /// `row` is the position the entry was displayed at.
    Remove { row: usize, path: String },
    Add(String),
}

/// What a successfully dispatched command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Launched(String),
    Removed(String),
    /// The entry was already gone from the registry.
    NotFound(String),
    Added(String),
}

impl CommandOutcome {
    /// Whether the displayed list has to be re-read from disk.
    pub fn needs_refresh(&self) -> bool {
        !matches!(self, CommandOutcome::Launched(_))
    }

    pub fn describe(&self) -> String {
        match self {
            CommandOutcome::Launched(path) => format!("Launched {}", display_name(path)),
            CommandOutcome::Removed(path) => format!("Removed {}", path),
            CommandOutcome::NotFound(path) => format!("{} was already removed", path),
            CommandOutcome::Added(path) => format!("Added {}", path),
        }
    }
}

/// Last path component, used for `Launch <name>` labels.
pub fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("/usr/bin/vim"), "vim");
        assert_eq!(display_name("/Applications/Safari.app/"), "Safari.app");
        assert_eq!(display_name("firefox"), "firefox");
        assert_eq!(display_name("/"), "/");
    }

    #[test]
    fn test_outcomes() {
        assert!(CommandOutcome::Added("/a".into()).needs_refresh());
        assert!(CommandOutcome::Removed("/a".into()).needs_refresh());
        assert!(CommandOutcome::NotFound("/a".into()).needs_refresh());
        assert!(!CommandOutcome::Launched("/a".into()).needs_refresh());
        assert_eq!(
            CommandOutcome::Launched("/usr/bin/htop".into()).describe(),
            "Launched htop"
        );
    }
}
