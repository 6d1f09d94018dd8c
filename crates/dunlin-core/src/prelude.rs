pub use crate::app::App;
pub use dunlin_types::error::{DlResult, Error};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
