pub mod paths;
pub mod process;

pub use paths::AppPaths;
pub use process::{LaunchMethod, Launcher, SystemLauncher};
