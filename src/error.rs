use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpdConfError {
    #[error("failed to stat {path}: {source}")]
    ProbeFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse ${var} into boolean: invalid value '{value}'")]
    InvalidBool { var: String, value: String },

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(#[from] confique::Error),

    #[error("failed to read HTTPD config template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse HTTPD config template {path}: {source}")]
    TemplateParse {
        path: PathBuf,
        source: minijinja::Error,
    },

    #[error("failed to render HTTPD config template {path}: {source}")]
    TemplateRender {
        path: PathBuf,
        source: minijinja::Error,
    },

    /// Destination open/write failures surface untouched.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize {what}: {source}")]
    SerializeError {
        what: &'static str,
        source: toml::ser::Error,
    },

    #[error("Failed to serialize {what} as JSON: {source}")]
    JsonError {
        what: &'static str,
        source: serde_json::Error,
    },

    #[error("Path is not valid UTF-8: {path}")]
    NonUtf8Path { path: PathBuf },

    #[error("Build did not publish ${var}")]
    NotPublished { var: &'static str },

    #[error("Working directory is required; call .working_dir() on the builder")]
    WorkingDirRequired,
}
