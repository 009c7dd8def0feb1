//! Marketplace feed model and XML parsing

use std::cmp::Ordering;

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One published plugin version from the marketplace listing.
///
/// A blank version string means "unknown" and orders lowest; callers treat
/// it as "no update available".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginVersion {
    /// Published version string
    pub version: String,
    /// Minimum host build required (`idea-version/@since-build`), possibly
    /// empty
    pub since_build: String,
}

impl PluginVersion {
    /// The blank "unknown" version
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Whether this is the blank "unknown" version
    pub fn is_unknown(&self) -> bool {
        self.version.is_empty()
    }
}

impl PartialOrd for PluginVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PluginVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_versions(&self.version, &other.version)
    }
}

/// Lenient version comparison over dot/dash separated segments.
///
/// Both-numeric segments compare numerically, everything else compares
/// lexicographically; missing segments count as zero. The feed's version
/// strings are plugin build strings, not strict semver, so this accepts any
/// shape.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    if a.is_empty() || b.is_empty() {
        return a.len().cmp(&b.len()).then_with(|| a.cmp(b));
    }

    let split = |s: &str| -> Vec<String> {
        s.split(['.', '-', '_'])
            .map(|seg| seg.to_string())
            .collect()
    };
    let left = split(a);
    let right = split(b);

    for i in 0..left.len().max(right.len()) {
        let l = left.get(i).map_or("0", |s| s.as_str());
        let r = right.get(i).map_or("0", |s| s.as_str());
        let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
            (Ok(ln), Ok(rn)) => ln.cmp(&rn),
            // A numeric segment beats a qualifier: 1.0.1 > 1.0-alpha
            (Ok(_), Err(_)) => Ordering::Greater,
            (Err(_), Ok(_)) => Ordering::Less,
            (Err(_), Err(_)) => l.cmp(r),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Parse the marketplace XML listing into its published versions.
///
/// Only the `version` element text and the `since-build` attribute of
/// `idea-version` are read; every other element and attribute is skipped,
/// never rejected.
pub fn parse_plugin_feed(xml: &str) -> Result<Vec<PluginVersion>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut versions = Vec::new();
    let mut in_plugin = false;
    let mut in_version = false;
    let mut current = PluginVersion::unknown();

    loop {
        match reader.read_event()? {
            Event::Start(element) => match element.name().as_ref() {
                b"idea-plugin" => {
                    in_plugin = true;
                    current = PluginVersion::unknown();
                }
                b"version" if in_plugin => in_version = true,
                b"idea-version" if in_plugin => {
                    current.since_build = since_build_attribute(&element);
                }
                _ => {}
            },
            Event::Empty(element) => {
                if in_plugin && element.name().as_ref() == b"idea-version" {
                    current.since_build = since_build_attribute(&element);
                }
            }
            Event::Text(text) => {
                if in_version {
                    current.version = text.unescape()?.into_owned();
                }
            }
            Event::End(element) => match element.name().as_ref() {
                b"version" => in_version = false,
                b"idea-plugin" => {
                    in_plugin = false;
                    versions.push(std::mem::take(&mut current));
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(versions)
}

fn since_build_attribute(element: &quick_xml::events::BytesStart<'_>) -> String {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"since-build")
        .and_then(|attr| attr.unescape_value().ok())
        .map(|value| value.into_owned())
        .unwrap_or_default()
}

/// The highest published version in a feed, if any
pub fn latest_in_feed(xml: &str) -> Result<Option<PluginVersion>> {
    Ok(parse_plugin_feed(xml)?.into_iter().max())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"
        <plugin-repository>
          <ff>"sort"</ff>
          <category name="Languages">
            <idea-plugin downloads="2" size="1000" date="1719238800000" url="">
              <name>TeX Helper</name>
              <id>tex.helper</id>
              <version>0.7.32</version>
              <idea-version min="n/a" max="n/a" since-build="232.1"/>
              <vendor email="" url="">contributors</vendor>
            </idea-plugin>
            <idea-plugin downloads="5" size="1200" date="1729238800000" url="">
              <name>TeX Helper</name>
              <id>tex.helper</id>
              <version>0.7.33</version>
              <idea-version min="n/a" max="n/a" since-build="233.11799.241"/>
            </idea-plugin>
          </category>
        </plugin-repository>"#;

    #[test]
    fn test_parse_feed_reads_versions() {
        let versions = parse_plugin_feed(FEED).unwrap();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].version, "0.7.32");
        assert_eq!(versions[0].since_build, "232.1");
        assert_eq!(versions[1].version, "0.7.33");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        // name, id, vendor, downloads, the stray ff element: all skipped
        let latest = latest_in_feed(FEED).unwrap().unwrap();
        assert_eq!(latest.version, "0.7.33");
        assert_eq!(latest.since_build, "233.11799.241");
    }

    #[test]
    fn test_empty_feed_has_no_latest() {
        assert_eq!(latest_in_feed("<plugin-repository/>").unwrap(), None);
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let mismatched = "<plugin-repository><idea-plugin>x</wrong></plugin-repository>";
        assert!(parse_plugin_feed(mismatched).is_err());
    }

    #[test]
    fn test_version_ordering_numeric() {
        assert_eq!(compare_versions("0.7.9", "0.7.10"), Ordering::Less);
        assert_eq!(compare_versions("1.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("2.0", "1.9.9"), Ordering::Greater);
    }

    #[test]
    fn test_version_ordering_mixed_segments() {
        assert_eq!(compare_versions("1.0-alpha", "1.0-beta"), Ordering::Less);
        assert_eq!(compare_versions("1.0.1", "1.0-alpha"), Ordering::Greater);
    }

    #[test]
    fn test_blank_version_orders_lowest() {
        assert_eq!(compare_versions("", "0.0.1"), Ordering::Less);
        assert!(PluginVersion::unknown() < PluginVersion {
            version: "0.1".to_string(),
            since_build: String::new(),
        });
    }
}
