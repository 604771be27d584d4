mod run_error;

pub use run_error::{RunError, RunErrorKind};
