//! Overridable HTTPD settings and their compiled defaults.
//!
//! [`Settings`] is the schema for every value a user can change: the struct
//! carries the defaults, the doc comments feed the `defaults` listing, and
//! [`ENV_OVERRIDES`] says which environment variable drives which key.
//! Values that cannot be overridden (socket address, app root, user include)
//! live only on [`HttpdConfig`](crate::types::HttpdConfig).

use std::collections::HashSet;

use confique::Config;
use confique::meta::{FieldKind, Meta};
use serde::{Deserialize, Serialize};

/// Settings a user may override through the environment.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Contact address placed in the `ServerAdmin` directive.
    #[config(default = "admin@localhost")]
    pub server_admin: String,

    /// Document root, relative to the application root.
    #[config(default = "htdocs")]
    pub web_dir: String,

    /// Redirect plain HTTP requests to HTTPS.
    #[config(default = true)]
    pub enable_https_redirect: bool,
}

/// How an override's raw value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Free text. An empty value counts as unset.
    Text,
    /// A boolean flag. Any value that is present must parse.
    Flag,
}

/// Binding between an environment variable and a [`Settings`] key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvOverride {
    pub var: &'static str,
    pub key: &'static str,
    pub kind: ValueKind,
}

impl EnvOverride {
    const fn text(var: &'static str, key: &'static str) -> Self {
        Self {
            var,
            key,
            kind: ValueKind::Text,
        }
    }

    const fn flag(var: &'static str, key: &'static str) -> Self {
        Self {
            var,
            key,
            kind: ValueKind::Flag,
        }
    }
}

pub const ENV_OVERRIDES: &[EnvOverride] = &[
    EnvOverride::text("BP_PHP_SERVER_ADMIN", "server_admin"),
    EnvOverride::text("BP_PHP_WEB_DIR", "web_dir"),
    EnvOverride::flag("BP_PHP_ENABLE_HTTPS_REDIRECT", "enable_https_redirect"),
];

/// Collect all valid leaf keys from a confique `Meta` tree.
///
/// Nested sections are walked and joined with dots; only leaves are returned.
pub fn valid_keys(meta: &Meta) -> HashSet<String> {
    let mut keys = HashSet::new();
    collect_keys(meta, "", &mut keys);
    keys
}

fn collect_keys(meta: &Meta, prefix: &str, keys: &mut HashSet<String>) {
    for field in meta.fields {
        let dotted = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{prefix}.{}", field.name)
        };
        match &field.kind {
            FieldKind::Leaf { .. } => {
                keys.insert(dotted);
            }
            FieldKind::Nested { meta, .. } => {
                collect_keys(meta, &dotted, keys);
            }
        }
    }
}
