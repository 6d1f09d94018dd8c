//! Error type shared across the workspace.

pub type DlResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	Timeout,
	Parse,
	ConfigError(String),
	ValidationError(String),
	Transport(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::Timeout => write!(f, "timed out"),
			Error::Parse => write!(f, "parse error"),
			Error::ConfigError(msg) => write!(f, "config error: {}", msg),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::Transport(msg) => write!(f, "transport error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(e) => write!(f, "io error: {}", e),
		}
	}
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(_err: serde_json::Error) -> Self {
		Self::Parse
	}
}

// vim: ts=4
