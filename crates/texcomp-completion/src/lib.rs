//! LaTeX command completion engine
//!
//! This crate turns a cursor context (normal text, math mode, or an
//! environment-name position) and a set of known command definitions into a
//! list of completion candidates. One candidate is one command paired with
//! one admissible subset of its optional arguments; ranking and row
//! collapsing are left to the host.
//!
//! # Architecture
//!
//! The engine follows a pipeline with three pure stages:
//!
//! 1. **Powerset expansion** ([`powerset::optional_powerset`]): every subset
//!    of a command's optional arguments becomes a distinct candidate variant.
//! 2. **Custom-definition scanning** ([`scanner::scan_definitions`]): the
//!    command invocations of the current document set are searched for
//!    `\newcommand`-style definition constructs, and their declared argument
//!    signatures are recovered.
//! 3. **Candidate generation** ([`engine::CandidateGenerator`]): per-mode
//!    union of indexed commands, built-in catalog commands, and scanned
//!    custom commands.
//!
//! External collaborators are injected at the seams: the project-wide command
//! index behind [`engine::CommandIndex`] and the environment-name source
//! behind [`engine::EnvironmentSource`], so tests run against fakes.
//!
//! The whole pipeline is synchronous and request-scoped. Nothing is shared
//! across requests except the immutable built-in catalogs in `texcomp-lang`.

pub mod engine;
pub mod powerset;
pub mod scanner;
pub mod types;

pub use engine::{CandidateGenerator, CommandIndex, EnvironmentSource, NullEnvironmentSource};
pub use powerset::optional_powerset;
pub use scanner::{scan_definitions, CustomDefinition};
pub use types::{
    Candidate, CandidateKind, CompletionMode, CompletionRequest, DocumentScope,
};
