//! Custom command definition scanning
//!
//! Walks the command invocations of a document set and recovers user-defined
//! commands and environments from recognized definition constructs, together
//! with their declared argument signatures. The scanner is pure: it neither
//! resolves files nor deduplicates; it reports definitions in scan order and
//! leaves collapsing to the consumer.

use tracing::trace;

use texcomp_lang::definitions::{
    is_definition, is_environment_definition, is_math_definition, names_via_first_argument,
    xparse_required_specifiers, PRIVATE_MARKER,
};
use texcomp_lang::{Argument, CommandInvocation, FileKind};

use crate::types::CompletionMode;

/// One accepted definition, in document scan order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomDefinition {
    /// Defined name: with leading backslash for commands, bare for
    /// environments
    pub name: String,
    /// Declared argument signature
    pub arguments: Vec<Argument>,
    /// File the definition appears in
    pub origin_file: String,
    /// Line the definition appears on, 1-based
    pub origin_line: u32,
    /// Whether the definition introduces an environment
    pub is_environment: bool,
}

/// Definition forms using the `\newcommand` optional-count syntax
/// (`[total][default]`), including the starred, xargs and environment forms
const COUNT_SYNTAX_FORMS: &[&str] = &[
    "\\newcommand",
    "\\renewcommand",
    "\\providecommand",
    "\\newcommandx",
    "\\renewcommandx",
    "\\providecommandx",
    "\\DeclareRobustCommand",
    "\\DeclareRobustCommandx",
    "\\newenvironment",
    "\\renewenvironment",
];

/// Extract user-defined command/environment definitions from an invocation
/// list, restricted to the provided scope.
///
/// Definitions are excluded when the construct is math-only and `mode` is not
/// [`CompletionMode::Math`], or when the defined name contains the private
/// marker and `file_kind` (the kind of the file the completion runs in) is
/// not a class/style file. The defining file's kind plays no part: editing a
/// plain `.tex` hides `@` names even when they come from the document class.
pub fn scan_definitions(
    invocations: &[CommandInvocation],
    mode: CompletionMode,
    file_kind: FileKind,
) -> Vec<CustomDefinition> {
    let mut definitions = Vec::new();

    for invocation in invocations {
        let is_env = is_environment_definition(&invocation.name);
        if !is_env && !is_definition(&invocation.name) {
            continue;
        }
        if mode != CompletionMode::Math && is_math_definition(&invocation.name) {
            continue;
        }
        let Some(name) = defined_name(invocation, is_env) else {
            trace!(construct = %invocation.name, file = %invocation.file, "definition without a name, skipped");
            continue;
        };
        if name.contains(PRIVATE_MARKER) && !file_kind.allows_private_names() {
            continue;
        }

        definitions.push(CustomDefinition {
            name,
            arguments: parse_signature(invocation),
            origin_file: invocation.file.clone(),
            origin_line: invocation.line,
            is_environment: is_env,
        });
    }

    definitions
}

/// Recover the defined name from an invocation.
///
/// Environment definitions name themselves in their first required argument
/// as plain text. The `\newcommand` family, `\newif` and the math-only forms
/// carry a command token in their first required argument; the generic forms
/// (`\def`, `\NewDocumentCommand`, ...) are followed by the command token
/// they define. Both command paths fall back to the other before giving up.
fn defined_name(invocation: &CommandInvocation, is_env: bool) -> Option<String> {
    if is_env {
        let name = invocation.required_params.first()?.trim();
        return if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        };
    }

    let from_first_argument = invocation
        .required_params
        .first()
        .and_then(|param| command_token(param));
    let from_next = invocation
        .next_command
        .as_deref()
        .and_then(command_token);

    if names_via_first_argument(&invocation.name) {
        from_first_argument.or(from_next)
    } else {
        from_next.or(from_first_argument)
    }
}

/// Extract a leading command token (`\name`) from a parameter text
fn command_token(text: &str) -> Option<String> {
    let rest = text.trim().strip_prefix('\\')?;
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphabetic() || *c == PRIVATE_MARKER)
        .collect();
    if name.is_empty() {
        None
    } else {
        Some(format!("\\{name}"))
    }
}

/// Parse the declared argument signature of a definition construct.
///
/// Malformed numeric sub-arguments degrade to zero parameters; unknown
/// xparse specifiers map to optional markers. Never fails.
fn parse_signature(invocation: &CommandInvocation) -> Vec<Argument> {
    let base = invocation.name.trim_end_matches('*');

    if COUNT_SYNTAX_FORMS.contains(&base) {
        return count_syntax_signature(&invocation.optional_params);
    }

    match base {
        "\\DeclarePairedDelimiter" => vec![Argument::required("param")],
        "\\DeclarePairedDelimiterX" | "\\DeclarePairedDelimiterXPP" => {
            let count = invocation
                .optional_params
                .first()
                .and_then(|p| parse_count(p))
                .unwrap_or(0);
            (0..count).map(|_| Argument::required("param")).collect()
        }
        "\\NewDocumentCommand"
        | "\\ProvideDocumentCommand"
        | "\\DeclareDocumentCommand"
        | "\\NewDocumentEnvironment"
        | "\\ProvideDocumentEnvironment"
        | "\\DeclareDocumentEnvironment" => {
            xparse_signature(invocation.required_params.get(1).map_or("", |s| s))
        }
        _ => Vec::new(),
    }
}

/// `[total]` or `[total][default]` signature of the `\newcommand` family.
///
/// With one optional argument all parameters are required; with two, one
/// parameter has a default value and shows up as the leading `[args]` marker
/// instead.
fn count_syntax_signature(optional_params: &[String]) -> Vec<Argument> {
    let required_count = match optional_params.len() {
        0 => 0,
        1 => parse_count(&optional_params[0]).unwrap_or(0),
        _ => parse_count(&optional_params[0])
            .map(|total| total.saturating_sub(1))
            .unwrap_or(0),
    };

    let mut arguments = Vec::new();
    if optional_params.len() == 2 {
        arguments.push(Argument::optional("args"));
    }
    arguments.extend((0..required_count).map(|_| Argument::required("param")));
    arguments
}

/// xparse parameter-specification string of the document-command forms.
///
/// Specifiers taking a required argument map to `{param}`; every other
/// letter maps to an optional marker. Whitespace is ignored and unknown
/// specifiers never abort parsing.
fn xparse_signature(specification: &str) -> Vec<Argument> {
    specification
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            if xparse_required_specifiers().contains(&c) {
                Argument::required("param")
            } else {
                Argument::optional("")
            }
        })
        .collect()
}

fn parse_count(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn newcommand(file: &str, line: u32) -> CommandInvocation {
        CommandInvocation::new("\\newcommand", file, line)
    }

    fn render(arguments: &[Argument]) -> String {
        arguments.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_newcommand_with_default_value() {
        // \newcommand{\foo}[3][x]{bar}: three parameters, one has a default
        let inv = newcommand("main.tex", 1)
            .with_required("\\foo")
            .with_optional("3")
            .with_optional("x")
            .with_required("bar");
        let defs = scan_definitions(&[inv], CompletionMode::Normal, FileKind::Source);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "\\foo");
        assert_eq!(render(&defs[0].arguments), "[args]{param}{param}");
    }

    #[test]
    fn test_newcommand_without_parameters() {
        let inv = newcommand("main.tex", 1)
            .with_required("\\foo")
            .with_required("bar");
        let defs = scan_definitions(&[inv], CompletionMode::Normal, FileKind::Source);
        assert_eq!(defs.len(), 1);
        assert!(defs[0].arguments.is_empty());
    }

    #[test]
    fn test_newcommand_single_count() {
        let inv = newcommand("main.tex", 2)
            .with_required("\\pair")
            .with_optional("2")
            .with_required("(#1, #2)");
        let defs = scan_definitions(&[inv], CompletionMode::Normal, FileKind::Source);
        assert_eq!(render(&defs[0].arguments), "{param}{param}");
    }

    #[test]
    fn test_malformed_count_degrades_to_zero() {
        let inv = newcommand("main.tex", 3)
            .with_required("\\foo")
            .with_optional("many")
            .with_required("bar");
        let defs = scan_definitions(&[inv], CompletionMode::Normal, FileKind::Source);
        assert_eq!(defs.len(), 1);
        assert!(defs[0].arguments.is_empty());
    }

    #[test]
    fn test_malformed_count_with_default_keeps_args_marker() {
        let inv = newcommand("main.tex", 3)
            .with_required("\\foo")
            .with_optional("many")
            .with_optional("x")
            .with_required("bar");
        let defs = scan_definitions(&[inv], CompletionMode::Normal, FileKind::Source);
        assert_eq!(render(&defs[0].arguments), "[args]");
    }

    #[test]
    fn test_non_definition_ignored() {
        let inv = CommandInvocation::new("\\textbf", "main.tex", 1).with_required("hello");
        assert!(scan_definitions(&[inv], CompletionMode::Normal, FileKind::Source).is_empty());
    }

    #[test]
    fn test_math_definition_mode_filter() {
        let inv = CommandInvocation::new("\\DeclareMathOperator", "main.tex", 5)
            .with_required("\\spn")
            .with_required("span");
        assert!(scan_definitions(std::slice::from_ref(&inv), CompletionMode::Normal, FileKind::Source).is_empty());

        let defs = scan_definitions(&[inv], CompletionMode::Math, FileKind::Source);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "\\spn");
    }

    #[test]
    fn test_private_name_filtered_when_editing_source_files() {
        // The private filter follows the file the completion runs in, not
        // the defining file: a class-provided @ name stays hidden in a .tex.
        let inv = newcommand("thesis.cls", 7)
            .with_required("\\my@inner")
            .with_required("bar");
        assert!(
            scan_definitions(std::slice::from_ref(&inv), CompletionMode::Normal, FileKind::Source)
                .is_empty()
        );

        for kind in [FileKind::Class, FileKind::Style] {
            let defs = scan_definitions(std::slice::from_ref(&inv), CompletionMode::Normal, kind);
            assert_eq!(defs.len(), 1);
            assert_eq!(defs[0].name, "\\my@inner");
        }
    }

    #[test]
    fn test_paired_delimiter_signatures() {
        let plain = CommandInvocation::new("\\DeclarePairedDelimiter", "m.tex", 1)
            .with_required("\\abs")
            .with_required("\\lvert")
            .with_required("\\rvert");
        let defs = scan_definitions(&[plain], CompletionMode::Math, FileKind::Source);
        assert_eq!(render(&defs[0].arguments), "{param}");

        let x_form = CommandInvocation::new("\\DeclarePairedDelimiterX", "m.tex", 2)
            .with_required("\\inner")
            .with_optional("2")
            .with_required("\\langle")
            .with_required("\\rangle")
            .with_required("#1, #2");
        let defs = scan_definitions(&[x_form], CompletionMode::Math, FileKind::Source);
        assert_eq!(render(&defs[0].arguments), "{param}{param}");

        let bad_count = CommandInvocation::new("\\DeclarePairedDelimiterXPP", "m.tex", 3)
            .with_required("\\norm")
            .with_optional("nope");
        let defs = scan_definitions(&[bad_count], CompletionMode::Math, FileKind::Source);
        assert!(defs[0].arguments.is_empty());
    }

    #[test]
    fn test_xparse_specification() {
        // m/r/v take required arguments, o/s/unknown become optional markers
        let inv = CommandInvocation::new("\\NewDocumentCommand", "m.tex", 1)
            .with_required("\\cmd")
            .with_required("s o m r v Z")
            .with_required("body");
        let defs = scan_definitions(&[inv], CompletionMode::Normal, FileKind::Source);
        assert_eq!(defs[0].name, "\\cmd");
        assert_eq!(render(&defs[0].arguments), "[][]{param}{param}{param}[]");
    }

    #[test]
    fn test_document_command_named_via_next_command() {
        let inv = CommandInvocation::new("\\def", "m.tex", 1).with_next_command("\\tmp");
        let defs = scan_definitions(&[inv], CompletionMode::Normal, FileKind::Source);
        assert_eq!(defs[0].name, "\\tmp");
        assert!(defs[0].arguments.is_empty());
    }

    #[test]
    fn test_environment_definition() {
        let inv = CommandInvocation::new("\\newenvironment", "m.tex", 9)
            .with_required("proofsketch")
            .with_optional("1")
            .with_required("begin")
            .with_required("end");
        let defs = scan_definitions(&[inv], CompletionMode::Normal, FileKind::Source);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "proofsketch");
        assert!(defs[0].is_environment);
        assert_eq!(render(&defs[0].arguments), "{param}");
    }

    #[test]
    fn test_scan_order_and_no_dedup() {
        let first = newcommand("a.tex", 1)
            .with_required("\\foo")
            .with_required("x");
        let second = newcommand("b.tex", 2)
            .with_required("\\foo")
            .with_required("y");
        let defs = scan_definitions(&[first, second], CompletionMode::Normal, FileKind::Source);
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].origin_file, "a.tex");
        assert_eq!(defs[1].origin_file, "b.tex");
    }

    #[test]
    fn test_origin_recorded() {
        let inv = newcommand("chapters/intro.tex", 42)
            .with_required("\\foo")
            .with_required("bar");
        let defs = scan_definitions(&[inv], CompletionMode::Normal, FileKind::Source);
        assert_eq!(defs[0].origin_file, "chapters/intro.tex");
        assert_eq!(defs[0].origin_line, 42);
    }
}
