//! Version checking and crash-report helpers
//!
//! Talks to the plugin marketplace over a plain HTTP GET returning an XML
//! listing, caches the latest published version process-wide (filled at most
//! once, timeout falls back to the cached value), and formats issue-tracker
//! crash reports, including the stacktrace-filtering heuristic for overlong
//! traces.

pub mod checker;
pub mod error;
pub mod models;
pub mod report;

pub use checker::{update_advice, HttpVersionFeed, UpdateAdvice, VersionChecker, VersionFeed};
pub use error::{Result, UpdateError};
pub use models::{compare_versions, latest_in_feed, parse_plugin_feed, PluginVersion};
pub use report::{filter_interesting_lines, needs_filtering, ReportUrlBuilder};
