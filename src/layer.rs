//! Layer bookkeeping: a directory under the layers root plus a
//! `{name}.toml` metadata file and `env/` files the lifecycle reads.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::HttpdConfError;

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub path: PathBuf,
    pub launch: bool,
    pub build: bool,
    pub cache: bool,
    /// Shared env entries keyed `{VAR}.{modifier}`, e.g. `PHP_HTTPD_PATH.default`.
    pub shared_env: BTreeMap<String, String>,
}

#[derive(Serialize)]
struct LayerMetadata {
    types: LayerTypes,
}

#[derive(Serialize)]
struct LayerTypes {
    launch: bool,
    build: bool,
    cache: bool,
}

impl Layer {
    /// Return a fresh, empty layer directory at `{layers_dir}/{name}`.
    ///
    /// Anything left by an earlier build is removed.
    pub fn reset(layers_dir: &Path, name: &str) -> Result<Self, HttpdConfError> {
        let path = layers_dir.join(name);
        match std::fs::remove_dir_all(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(HttpdConfError::IoError { path, source: e }),
        }
        std::fs::create_dir_all(&path).map_err(|e| HttpdConfError::IoError {
            path: path.clone(),
            source: e,
        })?;

        Ok(Self {
            name: name.to_string(),
            path,
            launch: false,
            build: false,
            cache: false,
            shared_env: BTreeMap::new(),
        })
    }

    /// Set a shared env var with the `default` modifier.
    pub fn default_env(&mut self, var: &str, value: impl Into<String>) {
        self.shared_env.insert(format!("{var}.default"), value.into());
    }

    /// Write `{layers_dir}/{name}.toml` and the layer's `env/` files.
    pub fn persist(&self, layers_dir: &Path) -> Result<(), HttpdConfError> {
        let metadata = LayerMetadata {
            types: LayerTypes {
                launch: self.launch,
                build: self.build,
                cache: self.cache,
            },
        };
        let text = toml::to_string(&metadata).map_err(|e| HttpdConfError::SerializeError {
            what: "layer metadata",
            source: e,
        })?;
        write_file(&layers_dir.join(format!("{}.toml", self.name)), &text)?;

        if self.shared_env.is_empty() {
            return Ok(());
        }
        let env_dir = self.path.join("env");
        std::fs::create_dir_all(&env_dir).map_err(|e| HttpdConfError::IoError {
            path: env_dir.clone(),
            source: e,
        })?;
        for (key, value) in &self.shared_env {
            write_file(&env_dir.join(key), value)?;
        }
        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), HttpdConfError> {
    std::fs::write(path, contents).map_err(|e| HttpdConfError::IoError {
        path: path.to_path_buf(),
        source: e,
    })
}
