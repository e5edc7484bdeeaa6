use toml::{Table, Value};

use crate::error::HttpdConfError;
use crate::settings::{ENV_OVERRIDES, ValueKind};

/// Build a sparse `toml::Table` of settings from environment variables.
///
/// Only variables listed in [`ENV_OVERRIDES`] are considered; everything
/// else in `vars` is ignored. Text overrides with an empty value are skipped
/// so the compiled default applies. Flag overrides must parse when present,
/// including when empty.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn env_to_table(
    vars: impl IntoIterator<Item = (String, String)>,
) -> Result<Table, HttpdConfError> {
    let mut table = Table::new();

    for (name, value) in vars {
        let Some(binding) = ENV_OVERRIDES.iter().find(|o| o.var == name) else {
            continue;
        };

        match binding.kind {
            ValueKind::Text => {
                if value.is_empty() {
                    continue;
                }
                table.insert(binding.key.to_string(), Value::String(value));
            }
            ValueKind::Flag => {
                let flag = parse_bool(&value).ok_or_else(|| HttpdConfError::InvalidBool {
                    var: name.clone(),
                    value: value.clone(),
                })?;
                table.insert(binding.key.to_string(), Value::Boolean(flag));
            }
        }
    }

    Ok(table)
}

/// Parse a boolean the way build tooling usually spells it.
/// Accepts `true`/`false`/`t`/`f`/`1`/`0`, case-insensitive.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}
