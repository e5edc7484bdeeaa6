use std::path::PathBuf;

use crate::error::HttpdConfError;
use crate::resolve::{self, ResolveInput};
use crate::types::HttpdConfig;

/// Entry point for resolving an HTTPD configuration record.
pub struct Resolver;

impl Resolver {
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }
}

/// Builder for assembling the resolver's inputs.
///
/// By default the process environment is read at [`resolve()`](Self::resolve)
/// time. Tests and embedders pass their own variables with
/// [`env_vars()`](Self::env_vars) instead.
pub struct ResolverBuilder {
    working_dir: Option<PathBuf>,
    env_vars: Option<Vec<(String, String)>>,
    env_enabled: bool,
    cli_overrides: Vec<(String, toml::Value)>,
}

impl ResolverBuilder {
    fn new() -> Self {
        Self {
            working_dir: None,
            env_vars: None,
            env_enabled: true,
            cli_overrides: Vec::new(),
        }
    }

    /// Set the application root.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Use these variables instead of the process environment.
    pub fn env_vars(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env_vars = Some(vars.into_iter().collect());
        self
    }

    /// Disable environment variable loading entirely.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Add an override on top of the environment. `None` values are ignored
    /// (useful for optional clap args).
    pub fn cli_override<V: Into<toml::Value>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.cli_overrides.push((key.to_string(), v.into()));
        }
        self
    }

    fn effective_env_vars(&self) -> Vec<(String, String)> {
        if !self.env_enabled {
            return Vec::new();
        }
        match &self.env_vars {
            Some(vars) => vars.clone(),
            None => std::env::vars().collect(),
        }
    }

    fn build_input(&self) -> Result<ResolveInput, HttpdConfError> {
        let working_dir = self
            .working_dir
            .clone()
            .ok_or(HttpdConfError::WorkingDirRequired)?;

        Ok(ResolveInput {
            working_dir,
            env_vars: self.effective_env_vars(),
            cli_overrides: self.cli_overrides.clone(),
        })
    }

    /// Resolve the record through all layers.
    pub fn resolve(self) -> Result<HttpdConfig, HttpdConfError> {
        let input = self.build_input()?;
        resolve::resolve(input)
    }

    #[cfg(test)]
    fn overrides(&self) -> &[(String, toml::Value)] {
        &self.cli_overrides
    }
}
