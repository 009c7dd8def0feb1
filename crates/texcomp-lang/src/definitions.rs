//! Registries of definition-introducing commands
//!
//! These are the fixed sets the custom-definition scanner consults to decide
//! whether an invocation defines a new command or environment, and how its
//! argument signature should be read.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// The private marker character. Commands whose name contains it are
/// internal to a package or class and are hidden outside class/style files.
pub const PRIVATE_MARKER: char = '@';

/// Definition forms valid only inside math mode
const MATH_DEFINITIONS: &[&str] = &[
    "\\DeclareMathOperator",
    "\\DeclarePairedDelimiter",
    "\\DeclarePairedDelimiterX",
    "\\DeclarePairedDelimiterXPP",
];

/// Command-definition forms (math-only forms included)
const COMMAND_DEFINITIONS: &[&str] = &[
    "\\newcommand",
    "\\newcommand*",
    "\\renewcommand",
    "\\renewcommand*",
    "\\providecommand",
    "\\providecommand*",
    "\\DeclareRobustCommand",
    "\\DeclareRobustCommand*",
    "\\newif",
    "\\def",
    "\\let",
    "\\NewDocumentCommand",
    "\\ProvideDocumentCommand",
    "\\DeclareDocumentCommand",
    "\\newcommandx",
    "\\renewcommandx",
    "\\providecommandx",
    "\\DeclareRobustCommandx",
    "\\DeclareMathOperator",
    "\\DeclarePairedDelimiter",
    "\\DeclarePairedDelimiterX",
    "\\DeclarePairedDelimiterXPP",
];

/// Environment-definition forms
const ENVIRONMENT_DEFINITIONS: &[&str] = &[
    "\\newenvironment",
    "\\renewenvironment",
    "\\NewDocumentEnvironment",
    "\\ProvideDocumentEnvironment",
    "\\DeclareDocumentEnvironment",
    "\\newtheorem",
    "\\newenvironmentx",
    "\\renewenvironmentx",
    "\\lstnewenvironment",
    "\\newtcolorbox",
];

/// Forms whose defined name sits in the first required argument
/// (the `\newcommand` family, `\newif`, and the math-only forms)
const FIRST_ARGUMENT_NAMED: &[&str] = &[
    "\\newcommand",
    "\\newcommand*",
    "\\renewcommand",
    "\\renewcommand*",
    "\\providecommand",
    "\\providecommand*",
    "\\newcommandx",
    "\\renewcommandx",
    "\\providecommandx",
    "\\newif",
    "\\DeclareMathOperator",
    "\\DeclarePairedDelimiter",
    "\\DeclarePairedDelimiterX",
    "\\DeclarePairedDelimiterXPP",
];

static COMMAND_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| COMMAND_DEFINITIONS.iter().copied().collect());
static ENVIRONMENT_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENVIRONMENT_DEFINITIONS.iter().copied().collect());
static MATH_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| MATH_DEFINITIONS.iter().copied().collect());
static FIRST_ARGUMENT_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| FIRST_ARGUMENT_NAMED.iter().copied().collect());

/// Whether `name` (with slash) introduces a command definition
pub fn is_definition(name: &str) -> bool {
    COMMAND_SET.contains(name)
}

/// Whether `name` (with slash) introduces an environment definition
pub fn is_environment_definition(name: &str) -> bool {
    ENVIRONMENT_SET.contains(name)
}

/// Whether `name` is a math-only definition form
pub fn is_math_definition(name: &str) -> bool {
    MATH_SET.contains(name)
}

/// Whether the defined name is the command token in the first required
/// argument rather than the token following the definition keyword
pub fn names_via_first_argument(name: &str) -> bool {
    FIRST_ARGUMENT_SET.contains(name)
}

/// xparse specifier letters that introduce a required argument. Any other
/// letter in a parameter specification introduces an optional one; unknown
/// letters never abort parsing.
pub fn xparse_required_specifiers() -> &'static [char] {
    &['m', 'r', 'R', 'v', 'b']
}
