//! Completion request and candidate types

use serde::{Deserialize, Serialize};
use texcomp_lang::{CommandInvocation, FileKind};

/// Which candidate subsets are considered; mutually exclusive per request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionMode {
    /// Normal text position
    Normal,
    /// Inside math mode
    Math,
    /// Environment-name position, e.g. inside `\begin{...}`
    EnvironmentName,
}

/// Icon tag of a candidate row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    /// A command candidate
    Command,
    /// An environment-name candidate
    Environment,
}

/// One row offered to the user: a command paired with one selected subset of
/// its optional arguments.
///
/// The label carries `subset_index` trailing spaces, followed by the
/// declaring package for catalog/indexed commands. Hosts that collapse
/// completion rows by label would otherwise merge the variants of one
/// command into a single row, and the same command text coming from two
/// packages into one; the padding and package suffix keep them distinct.
/// Hosts without label-collapsing can ignore both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Text inserted into the document (no leading backslash, no padding)
    pub insert_text: String,
    /// Display label, padded with `subset_index` trailing spaces
    pub label: String,
    /// Tail annotation: the rendered argument subset plus package hint
    pub tail_text: String,
    /// Type annotation: display string, or `file:line` for custom commands
    pub type_text: String,
    /// Icon tag
    pub kind: CandidateKind,
}

/// The document scope a completion request runs against: the flattened
/// command-invocation list of the current file, its reference closure, and
/// the inferred document-class file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentScope {
    /// All invocations in scope, document scan order
    pub invocations: Vec<CommandInvocation>,
    /// Name of the file the cursor is in
    pub current_file: String,
    /// Kind of the file the cursor is in
    pub current_file_kind: FileKind,
}

/// One completion request. Created fresh per request; no state survives it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Requested completion mode
    pub mode: CompletionMode,
    /// Document scope, absent when there is no active project/editor
    pub scope: Option<DocumentScope>,
}

impl CompletionRequest {
    /// Create a request over a document scope
    pub fn new(mode: CompletionMode, scope: DocumentScope) -> Self {
        Self {
            mode,
            scope: Some(scope),
        }
    }

    /// A request with no active context; yields no candidates
    pub fn empty(mode: CompletionMode) -> Self {
        Self { mode, scope: None }
    }
}
