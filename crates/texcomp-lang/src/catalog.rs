//! Built-in command catalogs
//!
//! The catalogs are embedded YAML tables, one for regular (text-mode)
//! commands and one for math-mode commands, deserialized once on first use.
//! They replace what used to be closed enumerations: a catalog row is plain
//! data, and math-mode applicability is a capability tag on the row.

use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::{LangError, Result};
use crate::types::CommandDefinition;

/// Embedded catalog sources
fn builtin_catalogs() -> Vec<(&'static str, &'static str)> {
    vec![
        ("regular", include_str!("catalog/regular.yaml")),
        ("math", include_str!("catalog/math.yaml")),
    ]
}

#[derive(Debug, serde::Deserialize)]
struct CatalogFile {
    commands: Vec<CommandDefinition>,
}

/// Parse a YAML catalog document into a command table
pub fn load_catalog(source: &str) -> Result<Vec<CommandDefinition>> {
    let file: CatalogFile = serde_yaml::from_str(source)?;
    for def in &file.commands {
        if def.command.is_empty() {
            return Err(LangError::catalog("catalog entry with empty command name"));
        }
        if def.command.starts_with('\\') {
            return Err(LangError::catalog(format!(
                "catalog entry '{}' must not include the leading backslash",
                def.command
            )));
        }
    }
    debug!(commands = file.commands.len(), "loaded command catalog");
    Ok(file.commands)
}

// The embedded tables ship with the crate and are validated by tests, so a
// load failure here is a packaging bug.
static REGULAR: Lazy<Vec<CommandDefinition>> = Lazy::new(|| {
    load_catalog(builtin_catalogs()[0].1).expect("embedded regular command catalog is valid")
});

static MATH: Lazy<Vec<CommandDefinition>> = Lazy::new(|| {
    load_catalog(builtin_catalogs()[1].1)
        .expect("embedded math command catalog is valid")
        .into_iter()
        .map(|def| def.math())
        .collect()
});

/// The built-in regular command table
pub fn regular_commands() -> &'static [CommandDefinition] {
    &REGULAR
}

/// The built-in math command table; every entry carries the math capability
pub fn math_commands() -> &'static [CommandDefinition] {
    &MATH
}

/// The generic `\begin` command, injected into math-mode candidate sets
pub fn begin_command() -> Option<&'static CommandDefinition> {
    REGULAR.iter().find(|def| def.command == "begin")
}
