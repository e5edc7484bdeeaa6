//! Build step: reset the config layer, generate `httpd.conf` into it, and
//! publish its path to later stages.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use toml::Value;
use tracing::{debug, info};

use crate::detect::PHP_HTTPD_CONFIG;
use crate::error::HttpdConfError;
use crate::layer::Layer;
use crate::render::render;
use crate::resolve::{ResolveInput, resolve};
use crate::types::CONFIG_FILE_NAME;

/// Variable that later stages read to locate the generated config.
pub const PATH_VAR: &str = "PHP_HTTPD_PATH";

/// Writes the HTTPD configuration into a layer and returns the file's path.
pub trait ConfigWriter {
    fn write(
        &self,
        layer_path: &Path,
        working_dir: &Path,
        cnb_path: &Path,
    ) -> Result<PathBuf, HttpdConfError>;
}

/// The real [`ConfigWriter`]: resolves the record and renders the template
/// shipped at `{cnb_path}/config/httpd.conf`.
pub struct Generator {
    env_vars: Vec<(String, String)>,
    cli_overrides: Vec<(String, Value)>,
}

impl Generator {
    pub fn new(env_vars: Vec<(String, String)>) -> Self {
        Self {
            env_vars,
            cli_overrides: Vec::new(),
        }
    }

    pub fn with_overrides(mut self, overrides: Vec<(String, Value)>) -> Self {
        self.cli_overrides = overrides;
        self
    }
}

impl ConfigWriter for Generator {
    fn write(
        &self,
        layer_path: &Path,
        working_dir: &Path,
        cnb_path: &Path,
    ) -> Result<PathBuf, HttpdConfError> {
        let config = resolve(ResolveInput {
            working_dir: working_dir.to_path_buf(),
            env_vars: self.env_vars.clone(),
            cli_overrides: self.cli_overrides.clone(),
        })?;
        let template = cnb_path.join("config").join(CONFIG_FILE_NAME);
        render(&config, &template, layer_path)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BuildpackPlan {
    #[serde(default)]
    pub entries: Vec<PlanEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlanEntry {
    pub name: String,
    #[serde(default)]
    pub metadata: toml::Table,
}

impl BuildpackPlan {
    pub fn load(path: &Path) -> Result<Self, HttpdConfError> {
        let content = std::fs::read_to_string(path).map_err(|e| HttpdConfError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| HttpdConfError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Decide `(launch, build)` for a layer from the plan entries naming it.
/// A flag is set when any matching entry asks for it.
pub fn merge_layer_types(name: &str, entries: &[PlanEntry]) -> (bool, bool) {
    let wants = |flag: &str| {
        entries
            .iter()
            .filter(|e| e.name == name)
            .any(|e| e.metadata.get(flag).and_then(Value::as_bool) == Some(true))
    };
    (wants("launch"), wants("build"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildpackInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone)]
pub struct BuildContext {
    pub working_dir: PathBuf,
    pub cnb_path: PathBuf,
    pub layers_dir: PathBuf,
    pub plan: BuildpackPlan,
    pub buildpack: BuildpackInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildResult {
    pub layers: Vec<Layer>,
}

/// Run the build step.
///
/// The layer is reset before the writer runs, so the writer always starts
/// from an empty directory. Layer files are not persisted here; call
/// [`Layer::persist`] on the result.
pub fn build<W: ConfigWriter>(ctx: &BuildContext, writer: &W) -> Result<BuildResult, HttpdConfError> {
    info!("{} {}", ctx.buildpack.name, ctx.buildpack.version);

    debug!("Getting the layer associated with the HTTPD configuration");
    let mut layer = Layer::reset(&ctx.layers_dir, PHP_HTTPD_CONFIG)?;
    debug!("{}", layer.path.display());

    info!("Setting up the HTTPD configuration file");
    let config_path = writer.write(&layer.path, &ctx.working_dir, &ctx.cnb_path)?;

    let (launch, build) = merge_layer_types(PHP_HTTPD_CONFIG, &ctx.plan.entries);
    layer.launch = launch;
    layer.build = build;

    layer.default_env(PATH_VAR, config_path.display().to_string());
    info!("Configuring build and launch environment");
    info!("{PATH_VAR} -> \"{}\"", config_path.display());

    Ok(BuildResult {
        layers: vec![layer],
    })
}
