//! CI runner workflow commands.
//!
//! The runner watches stdout for `::error::` and `::warning::` lines and
//! reads step outputs from the file named by `GITHUB_OUTPUT`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use sla::RunId;

/// Escapes a message for use as workflow command data.
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Marks the step as failed with `message`. The caller sets the exit code.
pub fn set_failed(message: &str) {
    println!("::error::{}", escape_data(message));
}

/// Emits an annotation-level warning.
pub fn warning(message: &str) {
    println!("::warning::{}", escape_data(message));
}

/// Destination for step outputs.
#[derive(Debug, Clone, Default)]
pub struct StepOutputs {
    file: Option<PathBuf>,
}

impl StepOutputs {
    /// Reads the output file location from `GITHUB_OUTPUT`.
    pub fn from_env() -> Self {
        Self {
            file: std::env::var_os("GITHUB_OUTPUT")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Writes outputs to `file`.
    pub fn to_file(file: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(file.into()),
        }
    }

    /// Records a step output. Without an output file the value is only logged.
    ///
    /// # Errors
    ///
    /// Returns an error if the output file cannot be appended to.
    pub fn set(&self, name: &str, value: &str) -> std::io::Result<()> {
        tracing::info!(output = name, value, "Setting step output");

        let Some(path) = &self.file else {
            return Ok(());
        };

        let entry = if value.contains('\n') || value.contains('\r') {
            let delimiter = format!("ghadelimiter_{}", RunId::new_random());
            format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
        } else {
            format!("{name}={value}\n")
        };

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(entry.as_bytes())
    }
}
