//! Version checking with a process-wide fill-once cache

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{Result, UpdateError};
use crate::models::{compare_versions, latest_in_feed, PluginVersion};

/// Fixed timeout for the version-check GET; on expiry the checker falls
/// back to the cached value
pub const FEED_TIMEOUT: Duration = Duration::from_secs(1);

/// Transport returning the raw XML body of the plugin listing.
///
/// Injected so tests can simulate timeouts and stale feeds without network
/// I/O.
#[async_trait]
pub trait VersionFeed: Send + Sync {
    /// Fetch the feed body
    async fn fetch(&self) -> Result<String>;
}

/// reqwest-backed feed against a fixed plugin-listing URL
pub struct HttpVersionFeed {
    client: Client,
    url: String,
}

impl HttpVersionFeed {
    /// Create a feed with [`FEED_TIMEOUT`] applied to connect and read
    pub fn new<S: Into<String>>(url: S) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(FEED_TIMEOUT)
            .timeout(FEED_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl VersionFeed for HttpVersionFeed {
    async fn fetch(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .header("User-Agent", "texcomp-version-checker")
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(UpdateError::feed(format!(
                "server returned status {}",
                response.status()
            )));
        }
        Ok(response.text().await?)
    }
}

/// Version checker with a fill-once cache.
///
/// The cache is written at most once per process (on the first successful
/// fetch); concurrent callers are safe because the check-then-fetch-then-
/// store sequence runs under the write lock. Failures never propagate: the
/// checker degrades to the cached value, and the blank
/// [`PluginVersion::unknown`] means "no update available".
pub struct VersionChecker {
    feed: Arc<dyn VersionFeed>,
    cached: RwLock<PluginVersion>,
}

impl VersionChecker {
    /// Create a checker over the given transport
    pub fn new(feed: Arc<dyn VersionFeed>) -> Self {
        Self {
            feed,
            cached: RwLock::new(PluginVersion::unknown()),
        }
    }

    /// Latest published version, from cache when already known
    pub async fn latest_version(&self) -> PluginVersion {
        {
            let cached = self.cached.read().await;
            if !cached.is_unknown() {
                return cached.clone();
            }
        }

        let mut cached = self.cached.write().await;
        // Another caller may have filled the cache while we waited
        if !cached.is_unknown() {
            return cached.clone();
        }
        match self.fetch_latest().await {
            Ok(Some(latest)) => {
                debug!(version = %latest.version, "fetched latest plugin version");
                *cached = latest.clone();
                latest
            }
            Ok(None) => {
                warn!("version feed listed no plugin versions");
                cached.clone()
            }
            Err(e) => {
                warn!("version check failed, using cached value: {e}");
                cached.clone()
            }
        }
    }

    async fn fetch_latest(&self) -> Result<Option<PluginVersion>> {
        let body = self.feed.fetch().await?;
        latest_in_feed(&body)
    }
}

/// Outcome of comparing the running plugin against the latest published one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAdvice {
    /// Running the latest version, or the latest version is unknown
    UpToDate,
    /// A newer version exists and the host build satisfies it
    UpdateAvailable {
        /// The newer version
        latest: String,
    },
    /// A newer version exists but requires a newer host build first
    HostTooOld {
        /// The newer version
        latest: String,
        /// Host build it requires
        required_build: String,
    },
}

/// Decide whether an update should be suggested.
///
/// An unknown latest version means "no update available"; a newer version
/// gated on a host build newer than `current_build` is reported as
/// [`UpdateAdvice::HostTooOld`].
pub fn update_advice(
    current: &str,
    latest: &PluginVersion,
    current_build: &str,
) -> UpdateAdvice {
    if latest.is_unknown() || compare_versions(&latest.version, current) != std::cmp::Ordering::Greater
    {
        return UpdateAdvice::UpToDate;
    }
    if !latest.since_build.is_empty()
        && compare_versions(current_build, &latest.since_build) == std::cmp::Ordering::Less
    {
        return UpdateAdvice::HostTooOld {
            latest: latest.version.clone(),
            required_build: latest.since_build.clone(),
        };
    }
    UpdateAdvice::UpdateAvailable {
        latest: latest.version.clone(),
    }
}
