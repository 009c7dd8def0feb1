//! Update-check workflow tests
//!
//! Exercises the whole update path against a local HTTP server: fetch the
//! XML listing, cache the latest version, and turn it into advice for the
//! running plugin.

use std::sync::Arc;

use texcomp_updates::{update_advice, HttpVersionFeed, UpdateAdvice, VersionChecker};

const LISTING: &str = r#"
    <plugin-repository>
      <category name="Languages">
        <idea-plugin>
          <name>texcomp</name>
          <version>0.7.4</version>
          <idea-version since-build="231.0"/>
        </idea-plugin>
        <idea-plugin>
          <name>texcomp</name>
          <version>0.9.1</version>
          <idea-version since-build="233.1"/>
        </idea-plugin>
      </category>
    </plugin-repository>"#;

#[tokio::test]
async fn update_check_against_http_listing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/plugins/list")
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body(LISTING)
        .expect(1)
        .create_async()
        .await;

    let feed = HttpVersionFeed::new(format!("{}/plugins/list", server.url())).unwrap();
    let checker = VersionChecker::new(Arc::new(feed));

    let latest = checker.latest_version().await;
    assert_eq!(latest.version, "0.9.1");
    assert_eq!(latest.since_build, "233.1");

    // Outdated plugin on a capable host
    assert_eq!(
        update_advice("0.8.0", &latest, "241.0"),
        UpdateAdvice::UpdateAvailable {
            latest: "0.9.1".to_string()
        }
    );
    // Outdated plugin on a host older than the release requires
    assert_eq!(
        update_advice("0.8.0", &latest, "231.5"),
        UpdateAdvice::HostTooOld {
            latest: "0.9.1".to_string(),
            required_build: "233.1".to_string(),
        }
    );
    // Already current
    assert_eq!(update_advice("0.9.1", &latest, "241.0"), UpdateAdvice::UpToDate);

    // Second lookup is answered from the cache, the server sees one request
    let again = checker.latest_version().await;
    assert_eq!(again, latest);
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_listing_means_no_update() {
    let server = mockito::Server::new_async().await;
    // No mock registered: every request 501s
    let feed = HttpVersionFeed::new(format!("{}/plugins/list", server.url())).unwrap();
    let checker = VersionChecker::new(Arc::new(feed));

    let latest = checker.latest_version().await;
    assert!(latest.is_unknown());
    assert_eq!(update_advice("0.8.0", &latest, "241.0"), UpdateAdvice::UpToDate);
}
