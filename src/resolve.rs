//! Core resolution pipeline: merge the settings layers and assemble the
//! configuration record.
//!
//! Operates on pre-loaded data (`ResolveInput`). The only I/O is a single
//! existence probe for the user fragment directory. Steps:
//!
//! 0. Make the working directory absolute; reject non-UTF-8 paths
//! 1. Probe `{working_dir}/.httpd.conf.d`
//! 2. Build the env layer from the injected variables
//! 3. Merge programmatic overrides on top (highest priority)
//! 4. Deserialize the merged table into `Settings`' layer
//! 5. Let confique fill defaults
//! 6. Assemble `HttpdConfig`

use std::path::PathBuf;

use confique::Config;
use toml::{Table, Value};
use tracing::debug;

use crate::env;
use crate::error::HttpdConfError;
use crate::probe::probe;
use crate::settings::{Settings, valid_keys};
use crate::types::{FPM_SOCKET, HttpdConfig, Probe, USER_CONF_DIR};

/// All pre-loaded data needed to resolve a config.
pub struct ResolveInput {
    /// Application root. Relative paths are made absolute against the
    /// current directory; the path must be valid UTF-8.
    pub working_dir: PathBuf,
    /// Raw environment variable pairs (pass `std::env::vars().collect()` or synthetic data).
    pub env_vars: Vec<(String, String)>,
    /// Programmatic overrides as `(settings_key, value)` pairs.
    pub cli_overrides: Vec<(String, Value)>,
}

/// Resolve the configuration record from pre-loaded inputs.
///
/// Precedence, lowest to highest: compiled defaults, environment, overrides.
/// On failure nothing partial is returned.
pub fn resolve(input: ResolveInput) -> Result<HttpdConfig, HttpdConfError> {
    // 0: Absolute, UTF-8 application root
    let working_dir = std::path::absolute(&input.working_dir)?;
    let Some(app_root) = working_dir.to_str().map(str::to_owned) else {
        return Err(HttpdConfError::NonUtf8Path { path: working_dir });
    };

    // 1: User fragments
    let conf_dir = working_dir.join(USER_CONF_DIR);
    let user_include = match probe(&conf_dir) {
        Ok(Probe::Present) => {
            let glob = conf_dir.join("*.conf").display().to_string();
            debug!("Including user-provided HTTPD configuration from: {glob}");
            glob
        }
        Ok(Probe::Absent) => String::new(),
        Err(e) => {
            return Err(HttpdConfError::ProbeFailed {
                path: conf_dir,
                source: e,
            });
        }
    };

    // 2: Env vars
    let mut merged = env::env_to_table(input.env_vars)?;

    // 3: Overrides on top
    merged.extend(overrides_to_table(&input.cli_overrides)?);

    // 4: Deserialize merged table into the sparse layer
    let layer: <Settings as Config>::Layer =
        Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| HttpdConfError::InvalidValue {
                key: "<merged>".into(),
                reason: e.to_string(),
            })?;

    // 5: confique fills defaults
    let settings = Settings::builder().preloaded(layer).load()?;

    debug!("Server admin: {}", settings.server_admin);
    debug!("Web directory: {}", settings.web_dir);
    debug!("Enable HTTPS redirect: {}", settings.enable_https_redirect);

    // 6: Assemble
    Ok(HttpdConfig {
        server_admin: settings.server_admin,
        disable_https_redirect: !settings.enable_https_redirect,
        app_root,
        web_directory: settings.web_dir,
        fpm_socket: FPM_SOCKET.to_string(),
        user_include,
    })
}

/// Convert override pairs into a table. If multiple entries target the same
/// key, the last one wins. Keys that are not settings are rejected.
fn overrides_to_table(entries: &[(String, Value)]) -> Result<Table, HttpdConfError> {
    let valid = valid_keys(&Settings::META);
    let mut table = Table::new();
    for (key, value) in entries {
        if !valid.contains(key) {
            return Err(HttpdConfError::InvalidValue {
                key: key.clone(),
                reason: "not an overridable setting".into(),
            });
        }
        table.insert(key.clone(), value.clone());
    }
    Ok(table)
}
