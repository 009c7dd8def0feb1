//! Command candidate generation
//!
//! Per-mode assembly of completion candidates from three sources: the
//! externally-indexed project commands, the built-in catalogs, and the custom
//! definitions scanned from the current document set. The external index and
//! the environment-name source are injected, so the generator itself stays a
//! pure request-to-candidates function.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use texcomp_lang::{catalog, Argument, CommandDefinition, LatexPackage};

use crate::powerset::optional_powerset;
use crate::scanner::{scan_definitions, CustomDefinition};
use crate::types::{
    Candidate, CandidateKind, CompletionMode, CompletionRequest, DocumentScope,
};

/// Query capability over the host's external command index.
///
/// The index maintains project-wide knowledge of commands found in installed
/// packages; maintaining it is out of scope here. Injecting it as a trait
/// keeps the generator deterministic under test.
pub trait CommandIndex: Send + Sync {
    /// All indexed command names, with the leading backslash
    fn indexed_commands(&self) -> Vec<String>;

    /// Definitions the index knows for a command name (no backslash)
    fn lookup(&self, command: &str) -> Vec<CommandDefinition>;

    /// Declaring packages under which `command` (with backslash) is indexed
    fn packages_for(&self, command: &str) -> Vec<LatexPackage>;
}

/// Environment-name collaborator. The EnvironmentName mode delegates
/// entirely to this source; no original logic lives here.
pub trait EnvironmentSource: Send + Sync {
    /// Candidates for an environment-name position
    fn environment_candidates(&self, scope: &DocumentScope) -> Vec<Candidate>;
}

/// Environment source that offers nothing; useful for hosts without an
/// environment provider and for tests
pub struct NullEnvironmentSource;

impl EnvironmentSource for NullEnvironmentSource {
    fn environment_candidates(&self, _scope: &DocumentScope) -> Vec<Candidate> {
        Vec::new()
    }
}

/// The command candidate generator.
///
/// Candidates are created fresh per request and never cached; the only state
/// shared across requests is the immutable built-in catalog behind
/// `texcomp-lang` and whatever the injected index caches internally.
pub struct CandidateGenerator {
    index: Arc<dyn CommandIndex>,
    environments: Arc<dyn EnvironmentSource>,
}

impl CandidateGenerator {
    /// Create a generator over the given collaborators
    pub fn new(index: Arc<dyn CommandIndex>, environments: Arc<dyn EnvironmentSource>) -> Self {
        Self {
            index,
            environments,
        }
    }

    /// Generate the candidate list for one request.
    ///
    /// A request without scope (no active project/editor) yields an empty
    /// list, silently.
    pub fn generate(&self, request: &CompletionRequest) -> Vec<Candidate> {
        let Some(scope) = request.scope.as_ref() else {
            debug!("completion request without document scope");
            return Vec::new();
        };

        let mut candidates = Vec::new();
        match request.mode {
            CompletionMode::Normal => {
                self.add_indexed(&mut candidates);
                self.add_builtin_regular(&mut candidates);
                self.add_custom(scope, CompletionMode::Normal, &mut candidates);
            }
            CompletionMode::Math => {
                self.add_math(&mut candidates);
                self.add_custom(scope, CompletionMode::Math, &mut candidates);
            }
            CompletionMode::EnvironmentName => {
                candidates.extend(self.environments.environment_candidates(scope));
            }
        }
        debug!(
            mode = ?request.mode,
            file = %scope.current_file,
            count = candidates.len(),
            "generated candidates"
        );
        candidates
    }

    /// Candidates for every command the external index knows
    fn add_indexed(&self, out: &mut Vec<Candidate>) {
        for key in self.index.indexed_commands() {
            let bare = key.strip_prefix('\\').unwrap_or(&key);
            for definition in self.index.lookup(bare) {
                push_command_candidates(&definition, out);
            }
        }
    }

    /// Built-in regular commands, suppressed when the index already holds
    /// the same command under the same declaring package. The indexed copy
    /// wins because the host enriches it with documentation.
    fn add_builtin_regular(&self, out: &mut Vec<Candidate>) {
        let indexed: HashSet<String> = self.index.indexed_commands().into_iter().collect();
        for definition in catalog::regular_commands() {
            let with_slash = definition.command_with_slash();
            let already_indexed = indexed.contains(&with_slash)
                && self.index.packages_for(&with_slash).contains(&definition.package);
            if already_indexed {
                continue;
            }
            push_command_candidates(definition, out);
        }
    }

    /// Built-in math commands plus the generic `\begin`
    fn add_math(&self, out: &mut Vec<Candidate>) {
        for definition in catalog::math_commands() {
            push_command_candidates(definition, out);
        }
        if let Some(begin) = catalog::begin_command() {
            push_command_candidates(begin, out);
        }
    }

    /// Custom definitions scanned from the request scope; the private-name
    /// filter follows the kind of the file the cursor is in
    fn add_custom(&self, scope: &DocumentScope, mode: CompletionMode, out: &mut Vec<Candidate>) {
        for definition in scan_definitions(&scope.invocations, mode, scope.current_file_kind) {
            push_custom_candidates(&definition, out);
        }
    }
}

/// Render an argument subset the way it appears in a candidate tail
fn render_arguments(arguments: &[Argument]) -> String {
    arguments.iter().map(|a| a.to_string()).collect()
}

/// Expand one definition into its candidate variants.
///
/// The label carries `subset_index` trailing spaces, and the declaring
/// package when there is one, to defeat label-collapsing dedup on the host
/// side; see [`Candidate`]. Without the package suffix a host would merge
/// the same command text coming from two different packages.
fn push_command_candidates(definition: &CommandDefinition, out: &mut Vec<Candidate>) {
    for (subset_index, arguments) in optional_powerset(&definition.arguments).enumerate() {
        let mut tail_text = render_arguments(&arguments);
        let mut label = format!(
            "{}{}",
            definition.command_with_slash(),
            " ".repeat(subset_index)
        );
        if !definition.package.is_default() {
            tail_text.push_str(&format!(" ({})", definition.package));
            label.push_str(&format!(" {}", definition.package));
        }
        out.push(Candidate {
            insert_text: definition.command.clone(),
            label,
            tail_text,
            type_text: definition.display.clone().unwrap_or_default(),
            kind: CandidateKind::Command,
        });
    }
}

/// Expand one custom definition into its candidate variants; the type text
/// points back at the defining source location.
fn push_custom_candidates(definition: &CustomDefinition, out: &mut Vec<Candidate>) {
    let kind = if definition.is_environment {
        CandidateKind::Environment
    } else {
        CandidateKind::Command
    };
    for (subset_index, arguments) in optional_powerset(&definition.arguments).enumerate() {
        out.push(Candidate {
            insert_text: definition.name.trim_start_matches('\\').to_string(),
            label: format!("{}{}", definition.name, " ".repeat(subset_index)),
            tail_text: render_arguments(&arguments),
            type_text: format!("{}:{}", definition.origin_file, definition.origin_line),
            kind,
        });
    }
}
