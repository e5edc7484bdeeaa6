//! Detection gate: decide whether the generator runs at all.

use serde::{Deserialize, Serialize};

use crate::error::HttpdConfError;

/// Name of the plan provision, and of the layer the build step creates.
pub const PHP_HTTPD_CONFIG: &str = "php-httpd-config";

/// Variable selecting the web server for PHP apps.
pub const SERVER_VAR: &str = "BP_PHP_SERVER";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildPlan {
    #[serde(default)]
    pub requires: Vec<Requirement>,
    #[serde(default)]
    pub provides: Vec<Provision>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provision {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    #[serde(default)]
    pub metadata: toml::Table,
}

impl BuildPlan {
    /// Serialize to the lifecycle's TOML plan format.
    pub fn to_toml(&self) -> Result<String, HttpdConfError> {
        toml::to_string(self).map_err(|e| HttpdConfError::SerializeError {
            what: "build plan",
            source: e,
        })
    }
}

/// Result of detection. `Fail` means "skip", not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectResult {
    Pass(BuildPlan),
    Fail(String),
}

/// Pass only when `BP_PHP_SERVER` is exactly `httpd`.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn detect(vars: impl IntoIterator<Item = (String, String)>) -> DetectResult {
    let server = vars
        .into_iter()
        .find(|(name, _)| name == SERVER_VAR)
        .map(|(_, value)| value);

    if server.as_deref() != Some("httpd") {
        return DetectResult::Fail(format!("{SERVER_VAR} is not set to 'httpd'"));
    }

    DetectResult::Pass(BuildPlan {
        requires: vec![],
        provides: vec![Provision {
            name: PHP_HTTPD_CONFIG.to_string(),
        }],
    })
}
