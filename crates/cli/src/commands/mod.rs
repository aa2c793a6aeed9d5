pub mod config;
pub mod recommend;
pub mod weather;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stylist_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use stylist_core::{ApplicationError, WardrobeItem};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>, data: Option<Value>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Map an application error to its failure payload and exit code.
pub(crate) fn application_failure(command: &str, error: ApplicationError) -> CommandResult {
    let exit_code = match error {
        ApplicationError::Configuration(_) => 2,
        ApplicationError::Domain(_) | ApplicationError::Input(_) => 3,
        ApplicationError::Weather(_) => 5,
    };
    CommandResult::failure(command, error.error_class(), error.to_string(), exit_code)
}

/// Load configuration or produce the standard failure payload.
pub(crate) fn load_config(
    command: &str,
    overrides: ConfigOverrides,
) -> Result<AppConfig, CommandResult> {
    AppConfig::load(LoadOptions { overrides, ..LoadOptions::default() })
        .map_err(|error| application_failure(command, ApplicationError::from(error)))
}

pub(crate) fn current_thread_runtime(
    command: &str,
) -> Result<tokio::runtime::Runtime, CommandResult> {
    tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(|error| {
        CommandResult::failure(
            command,
            "runtime_init",
            format!("failed to initialize async runtime: {error}"),
            4,
        )
    })
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WardrobeFile {
    Items(Vec<WardrobeItem>),
    Wrapped { items: Vec<WardrobeItem> },
}

/// Read a wardrobe from a JSON array of items or an object with an `items` array.
pub fn load_wardrobe(path: &Path) -> Result<Vec<WardrobeItem>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("could not read wardrobe file `{}`", path.display()))?;
    let parsed: WardrobeFile = serde_json::from_str(&raw)
        .with_context(|| format!("could not parse wardrobe file `{}`", path.display()))?;

    Ok(match parsed {
        WardrobeFile::Items(items) | WardrobeFile::Wrapped { items } => items,
    })
}
