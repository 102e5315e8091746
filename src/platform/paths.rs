use directories::BaseDirs;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const PIN_FILE_NAME: &str = "pin.dat";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const REGISTRY_FILE_NAME: &str = "apps.txt";

/// Per-user locations. On Windows everything lives under
/// `%APPDATA%\AppLauncher`, elsewhere under `~/.config/app_launcher`.
#[derive(Debug, Clone)]
pub struct AppPaths {
    base_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> Result<Self> {
        let home = BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .ok_or_else(|| Error::platform("Failed to determine home directory"))?;

        let base_dir = base_dir_for(std::env::consts::OS, std::env::var_os("APPDATA"), &home);
        Ok(Self { base_dir })
    }

    /// Paths rooted at an explicit directory instead of the per-user default.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn pin_file(&self) -> PathBuf {
        self.base_dir.join(PIN_FILE_NAME)
    }

    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE_NAME)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Location of the PIN file, creating its directory if needed.
    pub fn resolve_pin_path(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.base_dir)?;
        Ok(self.pin_file())
    }

    pub fn ensure_dirs_exist(&self) -> Result<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

fn base_dir_for(os: &str, appdata: Option<OsString>, home: &Path) -> PathBuf {
    if os == "windows" {
        let root = appdata
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| home.to_path_buf());
        root.join("AppLauncher")
    } else {
        home.join(".config").join("app_launcher")
    }
}

/// Default registry location: `apps.txt` in the working directory, made absolute.
pub fn default_registry_file() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(REGISTRY_FILE_NAME))
}

/// Resolves a configured path against the working directory when relative.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_uses_appdata() {
        let dir = base_dir_for(
            "windows",
            Some(OsString::from("C:\\Users\\me\\AppData\\Roaming")),
            Path::new("C:\\Users\\me"),
        );
        assert_eq!(
            dir,
            PathBuf::from("C:\\Users\\me\\AppData\\Roaming").join("AppLauncher")
        );
    }

    #[test]
    fn test_windows_falls_back_to_home() {
        let home = Path::new("/home/me");
        assert_eq!(base_dir_for("windows", None, home), home.join("AppLauncher"));
        assert_eq!(
            base_dir_for("windows", Some(OsString::new()), home),
            home.join("AppLauncher")
        );
    }

    #[test]
    fn test_other_platforms_use_dot_config() {
        let home = Path::new("/home/me");
        let expected = home.join(".config").join("app_launcher");
        assert_eq!(base_dir_for("linux", None, home), expected);
        assert_eq!(
            base_dir_for("macos", Some(OsString::from("/ignored")), home),
            expected
        );
    }

    #[test]
    fn test_resolve_pin_path_creates_directory() {
        let temp = tempfile::tempdir().unwrap();
        let paths = AppPaths::with_base_dir(temp.path().join("nested").join("app_launcher"));

        let pin_path = paths.resolve_pin_path().unwrap();
        assert_eq!(pin_path.file_name().unwrap(), PIN_FILE_NAME);
        assert!(pin_path.parent().unwrap().is_dir());
        assert!(!pin_path.exists());
    }

    #[test]
    fn test_absolutize_keeps_absolute_paths() {
        let temp = tempfile::tempdir().unwrap();
        let absolute = temp.path().join("apps.txt");
        assert_eq!(absolutize(&absolute).unwrap(), absolute);

        let relative = absolutize(Path::new("apps.txt")).unwrap();
        assert!(relative.is_absolute());
        assert!(relative.ends_with("apps.txt"));
    }
}
