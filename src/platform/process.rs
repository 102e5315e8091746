use std::ffi::OsString;
use std::io;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Starts applications on behalf of the user.
pub trait Launcher: Send + Sync {
    /// Starts `path` detached from this process. Never waits on the child.
    fn launch(&self, path: &str) -> Result<()>;
}

/// How a path is handed to the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMethod {
    /// `open <path>`, used for macOS application bundles.
    Open,
    /// `ShellExecuteW` with the default verb, Windows' "open by path".
    ShellExecute,
    /// Execute the path itself.
    Direct,
}

impl LaunchMethod {
    pub fn for_os(os: &str) -> Self {
        match os {
            "macos" => LaunchMethod::Open,
            "windows" => LaunchMethod::ShellExecute,
            _ => LaunchMethod::Direct,
        }
    }

    pub fn current() -> Self {
        Self::for_os(std::env::consts::OS)
    }

    /// Program and arguments that start `path` with this method. `None` when
    /// the method goes through the shell API instead of a child process.
    pub fn command_line(&self, path: &str) -> Option<(OsString, Vec<OsString>)> {
        match self {
            LaunchMethod::Open => Some(("open".into(), vec![path.into()])),
            LaunchMethod::ShellExecute => None,
            LaunchMethod::Direct => Some((path.into(), Vec::new())),
        }
    }
}

pub struct SystemLauncher {
    method: LaunchMethod,
}

impl SystemLauncher {
    pub fn new() -> Self {
        Self::with_method(LaunchMethod::current())
    }

    pub fn with_method(method: LaunchMethod) -> Self {
        Self { method }
    }

    pub fn method(&self) -> LaunchMethod {
        self.method
    }

    fn build_command(program: OsString, args: Vec<OsString>) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(args);

        // The terminal belongs to the UI; launched apps get no stdio.
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(unix)]
        {
            // New session so the child survives us and ignores our terminal's signals.
            unsafe {
                cmd.pre_exec(|| {
                    libc::setsid();
                    Ok(())
                });
            }
        }

        #[cfg(windows)]
        {
            use windows::Win32::System::Threading::{CREATE_NEW_PROCESS_GROUP, CREATE_NO_WINDOW};
            cmd.creation_flags((CREATE_NO_WINDOW | CREATE_NEW_PROCESS_GROUP).0);
        }

        cmd
    }
}

impl Default for SystemLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl Launcher for SystemLauncher {
    fn launch(&self, path: &str) -> Result<()> {
        debug!("Launching {} via {:?}", path, self.method);

        let Some((program, args)) = self.method.command_line(path) else {
            shell_execute(path).map_err(|e| {
                warn!("Failed to launch {}: {}", path, e);
                Error::launch(path, e)
            })?;
            info!("Launched {} through the shell", path);
            return Ok(());
        };

        let child = Self::build_command(program, args).spawn().map_err(|e| {
            warn!("Failed to launch {}: {}", path, e);
            Error::launch(path, e)
        })?;

        // Dropping the handle leaves the child running; tokio reaps it when it exits.
        info!("Launched {} (pid {:?})", path, child.id());
        Ok(())
    }
}

/// Maps a `ShellExecuteW` return value to an error. Values above 32 mean
/// success; the low codes share numbering with Win32 error codes.
fn shell_execute_error(code: isize) -> Option<io::Error> {
    match code {
        c if c > 32 => None,
        0 => Some(io::Error::new(
            io::ErrorKind::OutOfMemory,
            "The operating system is out of memory or resources",
        )),
        c => Some(io::Error::from_raw_os_error(c as i32)),
    }
}

#[cfg(windows)]
fn shell_execute(path: &str) -> io::Result<()> {
    use windows::core::{w, PCWSTR};
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::Shell::ShellExecuteW;
    use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;

    let file: Vec<u16> = path.encode_utf16().chain(std::iter::once(0)).collect();
    let instance = unsafe {
        ShellExecuteW(
            HWND::default(),
            w!("open"),
            PCWSTR(file.as_ptr()),
            PCWSTR::null(),
            PCWSTR::null(),
            SW_SHOWNORMAL,
        )
    };

    match shell_execute_error(instance.0) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(not(windows))]
fn shell_execute(_path: &str) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "ShellExecute is only available on Windows",
    ))
}
