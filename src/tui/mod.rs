pub mod app;
pub mod components;
pub mod events;
pub mod prompter;
pub mod terminal;
pub mod theme;

pub use app::App;
pub use events::{Event, EventHandler};
pub use prompter::TuiPrompter;
pub use theme::Theme;
