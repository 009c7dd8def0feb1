//! Crash-report formatting
//!
//! Builds the issue-tracker URL for a crash report. Overlong stacktraces can
//! bury the relevant frames past the URL size limit, so when the plugin
//! marker appears only deep in the trace the body is reduced to the
//! interesting lines: the head of the trace plus every marker or
//! `Caused by:` line with one line of context either side.

use std::collections::BTreeSet;

/// Maximum characters of stacktrace carried in the report URL
pub const MAX_REPORT_BODY: usize = 6000;

/// Maximum characters of the report title
pub const MAX_TITLE: usize = 500;

/// Kept characters per stacktrace line
const MAX_LINE: usize = 500;

/// Head lines always kept (indices `0..=HEAD_LINES`)
const HEAD_LINES: usize = 10;

const GAP: &str = "\n        (...)";

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Whether a stacktrace needs filtering: the marker occurs, but only past
/// the first [`MAX_REPORT_BODY`] characters
pub fn needs_filtering(body: &str, marker: &str) -> bool {
    body.contains(marker) && !truncate_chars(body, MAX_REPORT_BODY).contains(marker)
}

/// Collect the interesting lines of a stacktrace.
///
/// Keeps the first eleven non-blank lines plus every line containing
/// `marker` or `Caused by:` with one line of context either side; elided
/// runs are joined with a `(...)` separator and each kept line is truncated
/// to 500 characters.
pub fn filter_interesting_lines(body: &str, marker: &str) -> String {
    let lines: Vec<&str> = body.split('\n').filter(|l| !l.trim().is_empty()).collect();

    let mut interesting: BTreeSet<usize> = (0..=HEAD_LINES).collect();
    for (index, line) in lines.iter().enumerate() {
        if line.contains(marker) || line.contains("Caused by:") {
            interesting.insert(index.saturating_sub(1));
            interesting.insert(index);
            interesting.insert(index + 1);
        }
    }

    let mut result = String::new();
    let mut previous: Option<usize> = None;
    for &index in &interesting {
        if index >= lines.len() {
            continue;
        }
        if let Some(prev) = previous {
            if prev + 1 < index {
                result.push_str(GAP);
            }
        }
        result.push('\n');
        result.push_str(&truncate_chars(lines[index], MAX_LINE));
        previous = Some(index);
    }
    result.trim().to_string()
}

/// Builder for the issue-tracker report URL.
///
/// The base URL is expected to end in its `title=` query parameter; body
/// sections are percent-encoded and appended under `&body=`.
#[derive(Debug, Clone)]
pub struct ReportUrlBuilder {
    issue_base: String,
    title: String,
    ide_info: String,
    os_info: String,
    plugin_version: String,
    description: String,
    stacktrace: String,
    marker: Option<String>,
}

impl ReportUrlBuilder {
    /// Create a builder over an issue-tracker base URL
    pub fn new<S: Into<String>>(issue_base: S) -> Self {
        Self {
            issue_base: issue_base.into(),
            title: String::new(),
            ide_info: String::new(),
            os_info: String::new(),
            plugin_version: String::new(),
            description: String::new(),
            stacktrace: String::new(),
            marker: None,
        }
    }

    /// Report title, typically the first line of the throwable
    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    /// Host IDE name and build
    pub fn ide_info<S: Into<String>>(mut self, info: S) -> Self {
        self.ide_info = info.into();
        self
    }

    /// Operating system name, version and architecture
    pub fn os_info<S: Into<String>>(mut self, info: S) -> Self {
        self.os_info = info.into();
        self
    }

    /// Running plugin version
    pub fn plugin_version<S: Into<String>>(mut self, version: S) -> Self {
        self.plugin_version = version.into();
        self
    }

    /// User-supplied description
    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    /// Full stacktrace body
    pub fn stacktrace<S: Into<String>>(mut self, stacktrace: S) -> Self {
        self.stacktrace = stacktrace.into();
        self
    }

    /// Plugin marker that identifies interesting stacktrace lines; enables
    /// filtering of overlong traces
    pub fn marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.marker = Some(marker.into());
        self
    }

    /// Assemble the report URL
    pub fn build(&self) -> String {
        let title = if self.title.is_empty() {
            "Crash Report: <Fill in title>"
        } else {
            &self.title
        };

        let stacktrace = match &self.marker {
            Some(marker) if needs_filtering(&self.stacktrace, marker) => {
                filter_interesting_lines(&self.stacktrace, marker)
            }
            _ => self.stacktrace.clone(),
        };

        let encode = |section: &str| urlencoding::encode(section).into_owned();

        let mut url = self.issue_base.clone();
        url.push_str(&encode(&truncate_chars(title, MAX_TITLE)));
        url.push_str("&body=");
        url.push_str(&encode(&format!("### IDE and version\n{}\n\n", self.ide_info)));
        url.push_str(&encode(&format!("### Operating System\n{}\n\n", self.os_info)));
        url.push_str(&encode(&format!(
            "### Plugin version\n{}\n\n",
            self.plugin_version
        )));
        url.push_str(&encode("### Description\n"));
        url.push_str(&encode(&self.description));
        url.push_str(&encode(&format!(
            "\n\n### Stacktrace\n```\n{}\n```",
            truncate_chars(&stacktrace, MAX_REPORT_BODY)
        )));
        url
    }
}
