use thiserror::Error;

use crate::form::FormErrors;

#[derive(Error, Debug)]
pub enum MailformError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("directory API error: {0}")]
    Api(String),

    #[error(
        "directory URL not configured. Set MAILFORM_API_URL or run: mailform config set directory.url <url>"
    )]
    DirectoryNotConfigured,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("no user matches '{0}'")]
    NoMatchingRecipient(String),

    #[error("'{query}' matches several users: {candidates}")]
    AmbiguousRecipient { query: String, candidates: String },

    #[error("form is invalid:\n{0}")]
    InvalidForm(FormErrors),
}

pub type Result<T> = std::result::Result<T, MailformError>;
