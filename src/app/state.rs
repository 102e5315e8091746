use std::path::Path;
use tracing::{debug, info};

use crate::app::commands::{AppCommand, CommandOutcome};
use crate::app::config::AppConfig;
use crate::auth::PinStore;
use crate::error::{Error, Result};
use crate::platform::{AppPaths, Launcher, SystemLauncher};
use crate::storage::AppRegistry;

/// Where the process is in its single pass through the PIN gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Only PIN dialogs are shown.
    Locked,
    /// Main window is visible. Never goes back to `Locked`.
    Unlocked,
    Terminated,
}

impl Screen {
    pub fn after_verification(self, verified: bool) -> Screen {
        match (self, verified) {
            (Screen::Locked, true) => Screen::Unlocked,
            (Screen::Locked, false) => Screen::Terminated,
            (other, _) => other,
        }
    }
}

pub struct AppState {
    config: AppConfig,
    pin_store: PinStore,
    registry: AppRegistry,
    launcher: Box<dyn Launcher>,
}

impl AppState {
    pub fn new(config: AppConfig, paths: AppPaths) -> Result<Self> {
        Self::with_launcher(config, paths, Box::new(SystemLauncher::new()))
    }

    pub fn with_launcher(
        config: AppConfig,
        paths: AppPaths,
        launcher: Box<dyn Launcher>,
    ) -> Result<Self> {
        info!("Initializing application state");

        let pin_store = PinStore::new(paths.resolve_pin_path()?, config.pin_policy());
        let registry = AppRegistry::new(config.registry_file()?);
        debug!("Registry file: {:?}", registry.path());

        Ok(Self {
            config,
            pin_store,
            registry,
            launcher,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn pin_store(&self) -> &PinStore {
        &self.pin_store
    }

    pub fn registry(&self) -> &AppRegistry {
        &self.registry
    }

    /// Current list, always re-read from disk.
    pub async fn entries(&self) -> Result<Vec<String>> {
        self.registry.read_all().await
    }

    pub async fn dispatch(&self, command: AppCommand) -> Result<CommandOutcome> {
        debug!("Dispatching {:?}", command);

        match command {
            AppCommand::Launch(path) => {
                self.launcher.launch(&path)?;
                Ok(CommandOutcome::Launched(path))
            }
            AppCommand::Remove { row, path } => {
                if self.registry.remove_at(row, &path).await? {
                    info!("Removed {} from the list", path);
                    Ok(CommandOutcome::Removed(path))
                } else {
                    Ok(CommandOutcome::NotFound(path))
                }
            }
            AppCommand::Add(input) => {
                let path = input.trim();
                if path.is_empty() {
                    return Err(Error::EmptyInput);
                }
                if !Path::new(path).exists() {
                    return Err(Error::invalid_path(path));
                }
                self.registry.append(path).await?;
                info!("Added {} to the list", path);
                Ok(CommandOutcome::Added(path.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingLauncher {
        launched: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl Launcher for RecordingLauncher {
        fn launch(&self, path: &str) -> Result<()> {
            if self.fail {
                return Err(Error::launch(
                    path,
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied"),
                ));
            }
            self.launched.lock().unwrap().push(path.to_string());
            Ok(())
        }
    }

    fn state_in(dir: &Path, launcher: RecordingLauncher) -> AppState {
        let mut config = AppConfig::default();
        config.registry.path = Some(dir.join("apps.txt").to_string_lossy().into_owned());
        AppState::with_launcher(
            config,
            AppPaths::with_base_dir(dir.join("config")),
            Box::new(launcher),
        )
        .unwrap()
    }

    #[test]
    fn test_screen_transitions() {
        assert_eq!(Screen::Locked.after_verification(true), Screen::Unlocked);
        assert_eq!(Screen::Locked.after_verification(false), Screen::Terminated);
        assert_eq!(Screen::Unlocked.after_verification(false), Screen::Unlocked);
        assert_eq!(Screen::Terminated.after_verification(true), Screen::Terminated);
    }

    #[tokio::test]
    async fn test_state_wires_paths() {
        let temp = tempfile::tempdir().unwrap();
        let state = state_in(temp.path(), RecordingLauncher::default());

        assert_eq!(state.registry().path(), temp.path().join("apps.txt"));
        assert_eq!(state.pin_store().pin_file(), temp.path().join("config").join("pin.dat"));
        assert!(temp.path().join("config").is_dir());
        assert!(state.entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_validates_input() {
        let temp = tempfile::tempdir().unwrap();
        let state = state_in(temp.path(), RecordingLauncher::default());

        let err = state.dispatch(AppCommand::Add("   ".into())).await.unwrap_err();
        assert!(matches!(err, Error::EmptyInput));

        let missing = temp.path().join("missing-app");
        let err = state
            .dispatch(AppCommand::Add(missing.to_string_lossy().into_owned()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
        assert!(state.entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_then_remove() {
        let temp = tempfile::tempdir().unwrap();
        let state = state_in(temp.path(), RecordingLauncher::default());
        let app = temp.path().join("tool");
        std::fs::write(&app, "").unwrap();
        let app = app.to_string_lossy().into_owned();

        let outcome = state
            .dispatch(AppCommand::Add(format!("  {app}  ")))
            .await
            .unwrap();
        assert_eq!(outcome, CommandOutcome::Added(app.clone()));
        assert_eq!(state.entries().await.unwrap(), vec![app.clone()]);

        let outcome = state
            .dispatch(AppCommand::Remove { row: 0, path: app.clone() })
            .await
            .unwrap();
        assert_eq!(outcome, CommandOutcome::Removed(app.clone()));
        assert!(state.entries().await.unwrap().is_empty());

        let outcome = state
            .dispatch(AppCommand::Remove { row: 0, path: app.clone() })
            .await
            .unwrap();
        assert_eq!(outcome, CommandOutcome::NotFound(app));
    }

    #[tokio::test]
    async fn test_launch_goes_through_launcher() {
        let temp = tempfile::tempdir().unwrap();
        let launcher = RecordingLauncher::default();
        let state = state_in(temp.path(), launcher.clone());

        let outcome = state
            .dispatch(AppCommand::Launch("/usr/bin/htop".into()))
            .await
            .unwrap();
        assert_eq!(outcome, CommandOutcome::Launched("/usr/bin/htop".into()));
        assert_eq!(*launcher.launched.lock().unwrap(), vec!["/usr/bin/htop".to_string()]);
    }

    #[tokio::test]
    async fn test_launch_failure_is_returned() {
        let temp = tempfile::tempdir().unwrap();
        let launcher = RecordingLauncher {
            fail: true,
            ..Default::default()
        };
        let state = state_in(temp.path(), launcher);

        let err = state
            .dispatch(AppCommand::Launch("/opt/locked".into()))
            .await
            .unwrap_err();
        assert_eq!(err.title(), "Launch Error");
        assert!(err.to_string().contains("/opt/locked"));
        assert!(err.to_string().contains("Permission denied"));
    }
}
