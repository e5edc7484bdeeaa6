//! Template rendering and the config file write.
//!
//! Rendering is two-phase: the whole template is rendered into memory first,
//! and only then is the destination opened. A template that fails to parse or
//! execute never touches the destination, so a config left by an earlier run
//! stays intact.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use minijinja::value::{Value, ValueKind};
use minijinja::{Environment, Output, State, UndefinedBehavior};
use tracing::debug;

use crate::error::HttpdConfError;
use crate::types::{CONFIG_FILE_NAME, HttpdConfig};

/// Render `template_path` with `config` and write it to
/// `{dest_dir}/httpd.conf`, truncating any previous file.
///
/// Returns the absolute path written.
pub fn render(
    config: &HttpdConfig,
    template_path: &Path,
    dest_dir: &Path,
) -> Result<PathBuf, HttpdConfError> {
    let source =
        std::fs::read_to_string(template_path).map_err(|e| HttpdConfError::TemplateRead {
            path: template_path.to_path_buf(),
            source: e,
        })?;

    let rendered = render_str(config, &source, template_path)?;

    let dest = std::path::absolute(dest_dir.join(CONFIG_FILE_NAME))?;
    write_config(&dest, rendered.as_bytes())?;
    debug!("Wrote {} ({} bytes)", dest.display(), rendered.len());

    Ok(dest)
}

/// Render template `source` with `config` entirely in memory.
///
/// `origin` only labels errors.
pub fn render_str(
    config: &HttpdConfig,
    source: &str,
    origin: &Path,
) -> Result<String, HttpdConfError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    env.set_formatter(format_value);

    env.add_template(CONFIG_FILE_NAME, source)
        .map_err(|e| HttpdConfError::TemplateParse {
            path: origin.to_path_buf(),
            source: e,
        })?;

    let template = env
        .get_template(CONFIG_FILE_NAME)
        .map_err(|e| HttpdConfError::TemplateParse {
            path: origin.to_path_buf(),
            source: e,
        })?;

    template
        .render(config)
        .map_err(|e| HttpdConfError::TemplateRender {
            path: origin.to_path_buf(),
            source: e,
        })
}

/// Booleans print as `true`/`false` so directives read like the config
/// language expects. Everything else goes through the default formatter.
fn format_value(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &Value,
) -> Result<(), minijinja::Error> {
    if value.kind() == ValueKind::Bool {
        return out
            .write_str(if value.is_true() { "true" } else { "false" })
            .map_err(|_| {
                minijinja::Error::new(minijinja::ErrorKind::WriteFailure, "failed to write output")
            });
    }
    minijinja::escape_formatter(out, state, value)
}

/// Truncate-create `path` and write `contents`. Open and write errors are
/// returned untouched; the handle is dropped before returning either way.
fn write_config(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(contents)?;
    file.flush()
}
