//! Generate an Apache HTTPD configuration for PHP-FPM applications.
//!
//! httpdconf turns a template, a handful of compiled defaults, `BP_PHP_*`
//! environment overrides and an optional directory of user fragments into a
//! single `httpd.conf`, and publishes the file's path for later build stages.
//!
//! ```ignore
//! let config = Resolver::builder()
//!     .working_dir("/workspace")
//!     .resolve()?;
//! let path = render(&config, Path::new("config/httpd.conf"), layer_dir)?;
//! ```
//!
//! # Pipeline
//!
//! Resolution and rendering are two separate stages with nothing shared
//! between them but the [`HttpdConfig`] record:
//!
//! 1. **Resolve** ([`resolve()`]) reads the injected environment, probes
//!    `{working_dir}/.httpd.conf.d`, applies precedence and produces the
//!    record. Nothing is written.
//! 2. **Render** ([`render()`]) parses the template, renders it fully in
//!    memory, then truncates and writes `{dest_dir}/httpd.conf`. A template
//!    error never touches the destination.
//!
//! # Layer precedence
//!
//! ```text
//! Compiled defaults     Settings #[config(default = ...)]
//!        ↑ overridden by
//! Environment vars      BP_PHP_SERVER_ADMIN, BP_PHP_WEB_DIR,
//!                       BP_PHP_ENABLE_HTTPS_REDIRECT
//!        ↑ overridden by
//! Overrides             .cli_override()
//! ```
//!
//! Empty text variables fall through to the default. The redirect flag
//! accepts `true`/`false`/`t`/`f`/`1`/`0` in any case; anything else,
//! including an empty value, is an error naming the variable and the value.
//!
//! | Env var | Record field | Default |
//! |---------|--------------|---------|
//! | `BP_PHP_SERVER_ADMIN` | `server_admin` | `admin@localhost` |
//! | `BP_PHP_WEB_DIR` | `web_directory` | `htdocs` |
//! | `BP_PHP_ENABLE_HTTPS_REDIRECT` | `disable_https_redirect` (negated) | `false` |
//!
//! `fpm_socket` is always `127.0.0.1:9000`. `user_include` is
//! `{working_dir}/.httpd.conf.d/*.conf` when that directory exists and the
//! empty string otherwise.
//!
//! # Templates
//!
//! Templates use [minijinja](https://docs.rs/minijinja) syntax with strict
//! undefined handling, so a typo in a field name fails the render instead of
//! producing an empty directive. Booleans render as `true`/`false`.
//!
//! ```text
//! ServerAdmin {{ server_admin }}
//! DocumentRoot "{{ app_root }}/{{ web_directory }}"
//! {% if user_include != "" %}IncludeOptional {{ user_include }}{% endif %}
//! ```
//!
//! # Build integration
//!
//! [`detect()`] gates the generator on `BP_PHP_SERVER=httpd`. [`build()`]
//! resets the `php-httpd-config` layer, calls a [`ConfigWriter`] (normally
//! [`Generator`]) and publishes `PHP_HTTPD_PATH`. The `clap` feature adds a
//! command-line front end over [`handle()`].
//!
//! # Error handling
//!
//! All fallible operations return [`HttpdConfError`]. Nothing is retried and
//! nothing is downgraded to a warning. Destination open and write failures
//! are passed through as the underlying [`std::io::Error`].

pub mod error;
pub mod types;

mod build;
mod builder;
#[cfg(feature = "clap")]
mod cli;
mod detect;
mod env;
mod layer;
mod ops;
mod probe;
mod render;
mod resolve;
mod settings;

#[cfg(test)]
mod fixtures;

pub use build::{
    BuildContext, BuildResult, BuildpackInfo, BuildpackPlan, ConfigWriter, Generator, PATH_VAR,
    PlanEntry, build, merge_layer_types,
};
pub use builder::{Resolver, ResolverBuilder};
#[cfg(feature = "clap")]
pub use cli::{Cli, Command, OverrideArgs};
pub use detect::{BuildPlan, DetectResult, PHP_HTTPD_CONFIG, Provision, Requirement, detect};
pub use env::parse_bool;
pub use error::HttpdConfError;
pub use layer::Layer;
pub use ops::{Invocation, Outcome, describe_settings, handle};
pub use probe::probe;
pub use render::{render, render_str};
pub use resolve::{ResolveInput, resolve};
pub use settings::Settings;
pub use types::{Action, HttpdConfig, Probe};
