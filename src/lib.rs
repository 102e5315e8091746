pub mod app;
pub mod auth;
pub mod error;
pub mod platform;
pub mod storage;

pub use error::{Error, Result};
