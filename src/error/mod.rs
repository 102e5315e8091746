use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Please enter a valid path.")]
    EmptyInput,

    #[error("Path does not exist:\n{0}")]
    InvalidPath(String),

    #[error("Failed to launch:\n{path}\n\n{source}")]
    Launch {
        path: String,
        #[source]
        source: std::io::Error,
    },

}

impl Error {
    pub fn platform(msg: impl Into<String>) -> Self {
        Error::Platform(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub fn invalid_path(path: impl Into<String>) -> Self {
        Error::InvalidPath(path.into())
    }

    pub fn launch(path: impl Into<String>, source: std::io::Error) -> Self {
        Error::Launch {
            path: path.into(),
            source,
        }
    }

    /// Title used when the error is surfaced in a dialog.
    pub fn title(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::Io(_) => "File Error",
            Error::Platform(_) => "Platform Error",
            Error::Validation(_) => "Invalid Input",
            Error::EmptyInput => "Empty Input",
            Error::InvalidPath(_) => "Invalid Path",
            Error::Launch { .. } => "Launch Error",
        }
    }

    /// Input problems are shown as warnings, everything else as errors.
    pub fn is_warning(&self) -> bool {
        matches!(self, Error::EmptyInput | Error::InvalidPath(_))
    }
}
