//! Core data types: packages, arguments, command definitions and invocations

use std::fmt;

use serde::{Deserialize, Serialize};

/// A LaTeX package that declares a command.
///
/// The default package (empty name) means the command needs no `\usepackage`.
/// Equality is by package name only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LatexPackage {
    name: String,
}

impl LatexPackage {
    /// The default package: no `\usepackage` needed
    pub const DEFAULT: LatexPackage = LatexPackage {
        name: String::new(),
    };

    /// Create a package from its name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }

    /// Package name, empty for the default package
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the default package
    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }
}

impl Default for LatexPackage {
    fn default() -> Self {
        LatexPackage::DEFAULT
    }
}

impl fmt::Display for LatexPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Whether an argument is required (`{...}`) or optional (`[...]`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentKind {
    /// Required argument, rendered in braces
    Required,
    /// Optional argument, rendered in brackets
    Optional,
}

/// Content-type tag of an argument
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentType {
    /// Plain text content
    #[default]
    Text,
    /// A command reference, e.g. the `cmd` argument of `\newcommand`
    Command,
}

/// One argument of a command definition.
///
/// Argument order within a definition is significant and reflects source
/// order in the invocation syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Argument {
    /// Human-readable name shown in the argument placeholder
    pub name: String,
    /// Required or optional
    pub kind: ArgumentKind,
    /// Content-type tag
    #[serde(default, rename = "type")]
    pub argument_type: ArgumentType,
}

impl Argument {
    /// Create a required text argument
    pub fn required<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            kind: ArgumentKind::Required,
            argument_type: ArgumentType::Text,
        }
    }

    /// Create an optional text argument
    pub fn optional<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            kind: ArgumentKind::Optional,
            argument_type: ArgumentType::Text,
        }
    }

    /// Override the content-type tag
    pub fn with_type(mut self, argument_type: ArgumentType) -> Self {
        self.argument_type = argument_type;
        self
    }

    /// Whether the argument is optional
    pub fn is_optional(&self) -> bool {
        self.kind == ArgumentKind::Optional
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ArgumentKind::Required => write!(f, "{{{}}}", self.name),
            ArgumentKind::Optional => write!(f, "[{}]", self.name),
        }
    }
}

/// A command definition: either a built-in catalog entry or a custom command
/// discovered in the current document set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDefinition {
    /// Command text without the leading backslash
    pub command: String,
    /// Ordered argument list, source order
    #[serde(default)]
    pub arguments: Vec<Argument>,
    /// Declaring package, `LatexPackage::DEFAULT` when none is needed
    #[serde(default)]
    pub package: LatexPackage,
    /// Display/documentation string
    #[serde(default)]
    pub display: Option<String>,
    /// Whether the command is valid only inside math mode
    #[serde(default)]
    pub math_mode: bool,
}

impl CommandDefinition {
    /// Create a definition in the default package with no arguments
    pub fn new<S: Into<String>>(command: S) -> Self {
        Self {
            command: command.into(),
            arguments: Vec::new(),
            package: LatexPackage::DEFAULT,
            display: None,
            math_mode: false,
        }
    }

    /// Set the argument list
    pub fn with_arguments(mut self, arguments: Vec<Argument>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Set the declaring package
    pub fn with_package(mut self, package: LatexPackage) -> Self {
        self.package = package;
        self
    }

    /// Set the display string
    pub fn with_display<S: Into<String>>(mut self, display: S) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Mark the command as math-mode only
    pub fn math(mut self) -> Self {
        self.math_mode = true;
        self
    }

    /// Command text with the leading backslash
    pub fn command_with_slash(&self) -> String {
        format!("\\{}", self.command)
    }
}

/// Kind of a LaTeX source file.
///
/// Editing a class or style file lifts the private-name (`@`) restriction on
/// custom definitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// A regular `.tex` source file
    #[default]
    Source,
    /// A document class (`.cls`) file
    Class,
    /// A style (`.sty`) file
    Style,
}

impl FileKind {
    /// Whether private (`@`) command names are legitimate in this file
    pub fn allows_private_names(self) -> bool {
        matches!(self, FileKind::Class | FileKind::Style)
    }
}

/// One command occurrence in a file, as delivered by the external
/// parser/indexer.
///
/// `next_command` is the name of the command token immediately following this
/// invocation in the file, including tokens nested in a brace group; generic
/// definition forms (`\def\foo`, `\NewDocumentCommand{\foo}{m}`) name the
/// defined command that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInvocation {
    /// Command name with the leading backslash
    pub name: String,
    /// Required parameter texts, source order
    #[serde(default)]
    pub required_params: Vec<String>,
    /// Optional parameter texts, source order
    #[serde(default)]
    pub optional_params: Vec<String>,
    /// Name of the next command token in the file, if any
    #[serde(default)]
    pub next_command: Option<String>,
    /// Origin file name
    pub file: String,
    /// Origin line, 1-based
    pub line: u32,
}

impl CommandInvocation {
    /// Create an invocation with no parameters
    pub fn new<S: Into<String>, F: Into<String>>(name: S, file: F, line: u32) -> Self {
        Self {
            name: name.into(),
            required_params: Vec::new(),
            optional_params: Vec::new(),
            next_command: None,
            file: file.into(),
            line,
        }
    }

    /// Append a required parameter
    pub fn with_required<S: Into<String>>(mut self, param: S) -> Self {
        self.required_params.push(param.into());
        self
    }

    /// Append an optional parameter
    pub fn with_optional<S: Into<String>>(mut self, param: S) -> Self {
        self.optional_params.push(param.into());
        self
    }

    /// Set the following command token
    pub fn with_next_command<S: Into<String>>(mut self, next: S) -> Self {
        self.next_command = Some(next.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_package_is_default() {
        assert!(LatexPackage::DEFAULT.is_default());
        assert!(!LatexPackage::new("amsmath").is_default());
    }

    #[test]
    fn test_argument_display() {
        assert_eq!(Argument::required("param").to_string(), "{param}");
        assert_eq!(Argument::optional("args").to_string(), "[args]");
        assert_eq!(Argument::optional("").to_string(), "[]");
    }

    #[test]
    fn test_command_with_slash() {
        let def = CommandDefinition::new("frac");
        assert_eq!(def.command_with_slash(), "\\frac");
    }

    #[test]
    fn test_file_kind_private_names() {
        assert!(!FileKind::Source.allows_private_names());
        assert!(FileKind::Class.allows_private_names());
        assert!(FileKind::Style.allows_private_names());
    }

    #[test]
    fn test_invocation_builder() {
        let inv = CommandInvocation::new("\\newcommand", "main.tex", 4)
            .with_required("\\foo")
            .with_optional("2");
        assert_eq!(inv.required_params, vec!["\\foo"]);
        assert_eq!(inv.optional_params, vec!["2"]);
        assert_eq!(inv.file, "main.tex");
        assert_eq!(inv.line, 4);
    }

    #[test]
    fn test_catalog_entry_deserializes_with_defaults() {
        let yaml = "command: frac\n";
        let def: CommandDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.command, "frac");
        assert!(def.arguments.is_empty());
        assert!(def.package.is_default());
        assert!(!def.math_mode);
    }
}
