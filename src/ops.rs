//! Command handling: run an [`Action`] and describe what happened.
//!
//! Provides the logic behind `detect`, `build`, `resolve`, `render` and
//! `defaults`, plus the [`Outcome`] enum that callers use to display results.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::build::{
    BuildContext, BuildResult, BuildpackInfo, BuildpackPlan, Generator, PATH_VAR, build,
};
use crate::builder::{Resolver, ResolverBuilder};
use crate::detect::{DetectResult, detect};
use crate::error::HttpdConfError;
use crate::render::render;
use crate::settings::Settings;
use crate::types::{Action, HttpdConfig};

/// Result of a command. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Detection passed; carries the plan as TOML.
    Detected { plan: String },
    /// Detection did not pass. Not an error: the generator is skipped.
    Skipped { reason: String },
    /// The config layer was built and published.
    Built { var: String, path: PathBuf },
    /// A config file was rendered.
    Written { path: PathBuf },
    /// Resolved record as `key = value` pairs.
    Listing { entries: Vec<(String, String)> },
    /// Pre-formatted text (JSON listing, settings description).
    Text(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Detected { plan } => write!(f, "{plan}"),
            Outcome::Skipped { reason } => write!(f, "{reason}"),
            Outcome::Built { var, path } => write!(f, "{var}={}", path.display()),
            Outcome::Written { path } => write!(f, "{}", path.display()),
            Outcome::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
            Outcome::Text(t) => write!(f, "{t}"),
        }
    }
}

/// Settings for a single invocation that do not come from the action itself.
pub struct Invocation {
    pub env_vars: Vec<(String, String)>,
    pub cli_overrides: Vec<(String, toml::Value)>,
    pub buildpack: BuildpackInfo,
}

/// Handle an [`Action`].
pub fn handle(action: &Action, inv: &Invocation) -> Result<Outcome, HttpdConfError> {
    match action {
        Action::Detect { plan } => match detect(inv.env_vars.clone()) {
            DetectResult::Pass(build_plan) => {
                let text = build_plan.to_toml()?;
                if let Some(path) = plan {
                    std::fs::write(path, &text).map_err(|e| HttpdConfError::IoError {
                        path: path.clone(),
                        source: e,
                    })?;
                }
                Ok(Outcome::Detected { plan: text })
            }
            DetectResult::Fail(reason) => Ok(Outcome::Skipped { reason }),
        },
        Action::Build {
            layers,
            plan,
            working_dir,
            cnb_path,
        } => {
            let plan = match plan {
                Some(path) => BuildpackPlan::load(path)?,
                None => BuildpackPlan::default(),
            };
            let ctx = BuildContext {
                working_dir: working_dir.clone(),
                cnb_path: cnb_path.clone(),
                layers_dir: layers.clone(),
                plan,
                buildpack: inv.buildpack.clone(),
            };
            let writer =
                Generator::new(inv.env_vars.clone()).with_overrides(inv.cli_overrides.clone());
            let result = build(&ctx, &writer)?;

            for layer in &result.layers {
                layer.persist(layers)?;
            }
            Ok(Outcome::Built {
                var: PATH_VAR.to_string(),
                path: published_path(&result)?,
            })
        }
        Action::Resolve { working_dir, json } => {
            let config = resolver_for(working_dir, inv).resolve()?;
            if *json {
                let text = serde_json::to_string_pretty(&config).map_err(|e| {
                    HttpdConfError::JsonError {
                        what: "configuration record",
                        source: e,
                    }
                })?;
                Ok(Outcome::Text(text))
            } else {
                list_values(&config)
            }
        }
        Action::Render {
            working_dir,
            template,
            output_dir,
        } => {
            let config = resolver_for(working_dir, inv).resolve()?;
            let path = render(&config, template, output_dir)?;
            Ok(Outcome::Written { path })
        }
        Action::Defaults => Ok(Outcome::Text(describe_settings())),
    }
}

/// The config path the build published through `PHP_HTTPD_PATH`.
fn published_path(result: &BuildResult) -> Result<PathBuf, HttpdConfError> {
    result
        .layers
        .iter()
        .find_map(|layer| layer.shared_env.get(&format!("{PATH_VAR}.default")))
        .map(PathBuf::from)
        .ok_or(HttpdConfError::NotPublished { var: PATH_VAR })
}

fn resolver_for(working_dir: &Path, inv: &Invocation) -> ResolverBuilder {
    let mut builder = Resolver::builder()
        .working_dir(working_dir)
        .env_vars(inv.env_vars.clone());
    for (key, value) in &inv.cli_overrides {
        builder = builder.cli_override(key, Some(value.clone()));
    }
    builder
}

/// Commented TOML listing of the overridable settings and their defaults.
pub fn describe_settings() -> String {
    confique::toml::template::<Settings>(confique::toml::FormatOptions::default())
}

/// List the record as `key = value` pairs, sorted by key.
pub fn list_values(config: &HttpdConfig) -> Result<Outcome, HttpdConfError> {
    let entries = to_pairs(config)?;
    Ok(Outcome::Listing { entries })
}

fn to_pairs<T: Serialize>(value: &T) -> Result<Vec<(String, String)>, HttpdConfError> {
    let json = serde_json::to_value(value).map_err(|e| HttpdConfError::JsonError {
        what: "listing",
        source: e,
    })?;
    let serde_json::Value::Object(map) = json else {
        return Err(HttpdConfError::InvalidValue {
            key: "<list>".into(),
            reason: "record did not serialize to an object".into(),
        });
    };
    Ok(map
        .into_iter()
        .map(|(key, value)| {
            let display = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, display)
        })
        .collect())
}
