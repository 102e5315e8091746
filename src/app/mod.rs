pub mod commands;
pub mod config;
pub mod state;

pub use commands::{display_name, AppCommand, CommandOutcome};
pub use config::{AppConfig, RegistryConfig, SecurityConfig, UIConfig};
pub use state::{AppState, Screen};
