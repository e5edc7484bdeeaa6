//! Clap adapter for httpdconf.
//!
//! Compiled only when the `clap` Cargo feature is enabled (on by default).
//! The only bridge to the core is [`Cli::into_action()`], which converts
//! clap-parsed arguments into an [`Action`](crate::Action); from there all
//! logic flows through the clap-free [`handle()`](crate::handle).

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand};

use crate::types::Action;

/// Generate an Apache HTTPD configuration for a PHP-FPM application.
#[derive(Debug, Parser)]
#[command(name = "httpdconf", version)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: OverrideArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Values that take precedence over the `BP_PHP_*` environment variables.
#[derive(Debug, Args)]
pub struct OverrideArgs {
    /// Override the ServerAdmin contact.
    #[arg(long, global = true)]
    pub server_admin: Option<String>,

    /// Override the document root directory (relative to the app root).
    #[arg(long, global = true)]
    pub web_dir: Option<String>,

    /// Enable or disable the HTTP to HTTPS redirect.
    #[arg(long, global = true, value_parser = BoolishValueParser::new())]
    pub https_redirect: Option<bool>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pass when BP_PHP_SERVER is "httpd"; exits 100 otherwise.
    Detect {
        /// Write the build plan to this file.
        #[arg(long)]
        plan: Option<PathBuf>,
    },
    /// Reset the config layer, write httpd.conf into it and publish PHP_HTTPD_PATH.
    Build {
        /// Layers root directory.
        #[arg(long)]
        layers: PathBuf,
        /// Buildpack plan (TOML) deciding launch/build availability.
        #[arg(long)]
        plan: Option<PathBuf>,
        /// Application root.
        #[arg(long, default_value = ".")]
        working_dir: PathBuf,
        /// Buildpack directory containing config/httpd.conf.
        #[arg(long)]
        cnb_path: PathBuf,
    },
    /// Print the resolved configuration values.
    Resolve {
        /// Application root.
        #[arg(long, default_value = ".")]
        working_dir: PathBuf,
        /// Print JSON instead of key = value lines.
        #[arg(long)]
        json: bool,
    },
    /// Render a template into <OUTPUT_DIR>/httpd.conf.
    Render {
        /// Application root.
        #[arg(long, default_value = ".")]
        working_dir: PathBuf,
        /// Template file.
        #[arg(long)]
        template: PathBuf,
        /// Directory receiving httpd.conf.
        #[arg(short, long)]
        output_dir: PathBuf,
    },
    /// Show the overridable settings and their defaults.
    Defaults,
}

impl Cli {
    /// Convert clap-parsed args into a framework-agnostic `Action`.
    pub fn into_action(self) -> Action {
        match self.command {
            Command::Detect { plan } => Action::Detect { plan },
            Command::Build {
                layers,
                plan,
                working_dir,
                cnb_path,
            } => Action::Build {
                layers,
                plan,
                working_dir,
                cnb_path,
            },
            Command::Resolve { working_dir, json } => Action::Resolve { working_dir, json },
            Command::Render {
                working_dir,
                template,
                output_dir,
            } => Action::Render {
                working_dir,
                template,
                output_dir,
            },
            Command::Defaults => Action::Defaults,
        }
    }
}

impl OverrideArgs {
    /// Override pairs keyed by settings name. Unset flags are skipped.
    pub fn to_pairs(&self) -> Vec<(String, toml::Value)> {
        let mut pairs = Vec::new();
        if let Some(v) = &self.server_admin {
            pairs.push(("server_admin".to_string(), toml::Value::from(v.as_str())));
        }
        if let Some(v) = &self.web_dir {
            pairs.push(("web_dir".to_string(), toml::Value::from(v.as_str())));
        }
        if let Some(v) = self.https_redirect {
            pairs.push(("enable_https_redirect".to_string(), toml::Value::Boolean(v)));
        }
        pairs
    }
}
