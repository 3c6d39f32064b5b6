use std::path::PathBuf;
use thiserror::Error;

/// A single field-level validation failure. Submissions are rejected with
/// every problem reported at once, as `{field, message}` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("\n  - {}: {}", i.field, i.message))
        .collect()
}

#[derive(Error, Debug)]
pub enum WoningError {
    #[error("Config directory not found at {0}. Run 'woning init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse data file {path}: {source}")]
    StoreParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Owner '{0}' not found")]
    OwnerNotFound(String),

    #[error("Property '{0}' not found")]
    PropertyNotFound(String),

    #[error("Tenant '{0}' not found")]
    TenantNotFound(String),

    #[error("Tenant '{0}' is already inactive")]
    TenantAlreadyInactive(String),

    #[error("Invalid month '{0}'. Use a number 1-12 or a French month name.")]
    InvalidMonth(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Invalid payment submission:{}", format_issues(.0))]
    Validation(Vec<ValidationIssue>),

    #[error("Remittance for owner '{owner}' already settled for {periode}")]
    AlreadySettled { owner: String, periode: String },

    #[error("Nothing collected for owner '{owner}' in {periode}; nothing to settle")]
    NothingToSettle { owner: String, periode: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WoningError>;
