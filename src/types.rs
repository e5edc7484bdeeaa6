use std::path::PathBuf;

use serde::Serialize;

/// Address of the PHP-FPM endpoint the generated config proxies to.
pub const FPM_SOCKET: &str = "127.0.0.1:9000";

/// Directory under the app root holding user-supplied `*.conf` fragments.
pub const USER_CONF_DIR: &str = ".httpd.conf.d";

/// File name of the generated configuration.
pub const CONFIG_FILE_NAME: &str = "httpd.conf";

/// Values substituted into the HTTPD config template.
///
/// Built fresh by [`resolve`](crate::resolve) on every call and never mutated.
/// `user_include` is an empty string, not an absent value, when there is
/// nothing to include, so templates can test `user_include != ""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpdConfig {
    pub server_admin: String,
    pub disable_https_redirect: bool,
    pub app_root: String,
    pub web_directory: String,
    pub fpm_socket: String,
    pub user_include: String,
}

/// Outcome of probing a path that is allowed to be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Present,
    Absent,
}

/// A command, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Check the detection gate, optionally writing the build plan.
    Detect { plan: Option<PathBuf> },
    /// Run the build step into a layers directory.
    Build {
        layers: PathBuf,
        plan: Option<PathBuf>,
        working_dir: PathBuf,
        cnb_path: PathBuf,
    },
    /// Print the resolved configuration record.
    Resolve { working_dir: PathBuf, json: bool },
    /// Resolve and render a template into a directory.
    Render {
        working_dir: PathBuf,
        template: PathBuf,
        output_dir: PathBuf,
    },
    /// Print the overridable settings with their defaults.
    Defaults,
}
