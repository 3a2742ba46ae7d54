//! Latest-release lookup through the repository host's redirect.
//!
//! `GET <host>/<owner>/<repo>/releases/latest` redirects to
//! `<host>/<owner>/<repo>/releases/tag/<tag>`. The tag is read from the final
//! URL; the API is never queried, so no token is needed.

use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::config::ReleaseConfig;
use crate::error::PinError;

use super::resolver::TagResolver;

const USER_AGENT: &str = concat!("wikilearn/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;
const LATEST_RELEASE_PATH: &str = "releases/latest";

/// Resolves latest release tags by following the host's redirect.
///
/// Requests are blocking from the caller's point of view and issued one at a
/// time, each with the configured timeout and no retry.
#[derive(Debug)]
pub struct GitHubReleaseResolver {
    host: String,
    default_owner: String,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl GitHubReleaseResolver {
    pub fn new(
        host: impl Into<String>,
        default_owner: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let host = host.into();
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));
        // Local mirrors are reached directly, never through a configured proxy
        if is_loopback(&host) {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| anyhow::anyhow!("Failed to create tokio runtime: {}", e))?;

        Ok(Self {
            host,
            default_owner: default_owner.into(),
            client,
            runtime,
        })
    }

    pub fn from_config(config: &ReleaseConfig) -> anyhow::Result<Self> {
        Self::new(
            config.host.clone(),
            config.default_owner.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// The latest-release endpoint for a repository identifier.
    pub fn endpoint(&self, repository: &str) -> Result<Url, PinError> {
        release_endpoint(&self.host, &self.default_owner, repository)
    }

    async fn fetch_latest_tag(&self, repository: &str) -> Result<String, PinError> {
        let endpoint = self.endpoint(repository)?;
        debug!("Resolving latest release of {} via {}", repository, endpoint);

        let response = self
            .client
            .get(endpoint.clone())
            .send()
            .await
            .map_err(|e| PinError::resolution(repository, describe_request_error(&e)))?;

        let status = response.status();
        let final_url = response.url().clone();
        debug!("Received HTTP {} from {}", status, final_url);

        if !status.is_success() {
            return Err(PinError::resolution(
                repository,
                format!("HTTP {} from {}", status, final_url),
            ));
        }
        if same_location(&final_url, &endpoint) {
            return Err(PinError::resolution(
                repository,
                format!("{} did not redirect to a release", endpoint),
            ));
        }
        // Repositories without releases redirect to the release list
        if !is_release_tag_url(&final_url) {
            return Err(PinError::resolution(
                repository,
                format!("redirected to {}, which is not a release tag", final_url),
            ));
        }

        tag_from_release_url(&final_url).ok_or_else(|| {
            PinError::resolution(repository, format!("no tag in redirect target {}", final_url))
        })
    }
}

impl TagResolver for GitHubReleaseResolver {
    fn latest_tag(&self, repository: &str) -> Result<String, PinError> {
        let result = self.runtime.block_on(self.fetch_latest_tag(repository));
        match &result {
            Ok(tag) => debug!("Latest release of {} is {}", repository, tag),
            Err(e) => warn!("{}", e),
        }
        result
    }
}

/// Build `<host>/<owner>/<repo>/releases/latest` for a repository identifier.
///
/// Accepts `owner/repo`, a bare `repo` (prefixed with `default_owner`), or a
/// repository URL such as `git+https://github.com/owner/repo.git`.
pub fn release_endpoint(
    host: &str,
    default_owner: &str,
    repository: &str,
) -> Result<Url, PinError> {
    let path = repository_path(repository)
        .ok_or_else(|| PinError::resolution(repository, "empty repository identifier"))?;
    let path = if path.contains('/') || default_owner.is_empty() {
        path
    } else {
        format!("{}/{}", default_owner, path)
    };

    let raw = format!(
        "{}/{}/{}",
        host.trim_end_matches('/'),
        path,
        LATEST_RELEASE_PATH
    );
    Url::parse(&raw)
        .map_err(|e| PinError::resolution(repository, format!("invalid URL {raw}: {e}")))
}

/// Reduce a repository identifier to its `owner/repo` path.
fn repository_path(repository: &str) -> Option<String> {
    let trimmed = repository.trim();
    let without_vcs = trimmed.strip_prefix("git+").unwrap_or(trimmed);

    let path = match Url::parse(without_vcs) {
        Ok(url) if url.has_host() => url.path().to_string(),
        _ => without_vcs.to_string(),
    };

    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

/// Last non-empty path segment of a release URL, trailing slash ignored.
pub fn tag_from_release_url(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
}

/// Whether the path contains `releases/tag/<tag>`.
fn is_release_tag_url(url: &Url) -> bool {
    let Some(segments) = url.path_segments() else {
        return false;
    };
    let segments: Vec<&str> = segments.filter(|segment| !segment.is_empty()).collect();
    segments
        .windows(3)
        .any(|window| window[0] == "releases" && window[1] == "tag")
}

fn is_loopback(host: &str) -> bool {
    match Url::parse(host).ok().and_then(|url| url.host().map(|h| h.to_owned())) {
        Some(url::Host::Domain(domain)) => domain == "localhost",
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

fn same_location(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str()
        && a.port_or_known_default() == b.port_or_known_default()
        && a.path().trim_end_matches('/') == b.path().trim_end_matches('/')
}

fn describe_request_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out: {error}")
    } else if error.is_redirect() {
        format!("too many redirects: {error}")
    } else if error.is_connect() {
        format!("connection failed: {error}")
    } else {
        format!("request failed: {error}")
    }
}
