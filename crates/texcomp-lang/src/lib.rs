//! LaTeX language model for texcomp
//!
//! This crate holds the data types shared by the completion engine: packages,
//! command arguments, command definitions, and per-file command invocations as
//! delivered by an external parser. It also ships the built-in command
//! catalogs (regular and math) as embedded YAML tables, and the registries of
//! definition-introducing commands (`\newcommand` and friends) that the
//! custom-definition scanner consults.
//!
//! The catalogs are data-driven on purpose: adding a built-in command is a
//! YAML edit, not a code change.

pub mod catalog;
pub mod definitions;
pub mod error;
pub mod types;

pub use catalog::{begin_command, math_commands, regular_commands};
pub use definitions::{
    is_definition, is_environment_definition, is_math_definition, xparse_required_specifiers,
    PRIVATE_MARKER,
};
pub use error::{LangError, Result};
pub use types::{
    Argument, ArgumentKind, ArgumentType, CommandDefinition, CommandInvocation, FileKind,
    LatexPackage,
};
