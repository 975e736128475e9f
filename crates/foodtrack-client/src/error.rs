use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const RECORD_HELP_COMMAND: &str = "foodtrack purchase add --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `foodtrack {cmd} --help` for usage."),
            None => "Run `foodtrack --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_record(message: &str, command: &str) -> Self {
        Self::new(
            "invalid_record",
            message,
            vec![
                "Fix the value and rerun the command. Nothing was written.".to_string(),
                format!("Run `foodtrack {command} --help` to review the record fields."),
            ],
        )
        .with_data(json!({
            "command_hint": command,
            "help_command": RECORD_HELP_COMMAND,
        }))
    }

    pub fn history_unavailable(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "history_unavailable",
            &format!("History source `{location}` could not be read: {detail}"),
            vec![
                format!("Check that `{location}` is a readable file."),
                "Set `FOODTRACK_HOME` to the directory holding your history files.".to_string(),
            ],
        )
        .with_data(json!({
            "path": location,
        }))
    }

    pub fn history_write_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "history_write_failed",
            &format!("Could not append to `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `FOODTRACK_HOME` to a writable directory."
            )],
        )
        .with_data(json!({
            "path": location,
        }))
    }

    pub fn store_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_init_failed",
            &format!("History store initialization failed at `{location}`: {detail}"),
            vec!["Set `FOODTRACK_HOME` to a writable directory and retry.".to_string()],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
