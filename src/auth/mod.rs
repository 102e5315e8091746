//! PIN gate: hashing, storage and verification of the launcher PIN.

pub mod pin;
pub mod prompt;

pub use pin::{hash_pin, PinPolicy, PinStore};
pub use prompt::Prompter;
