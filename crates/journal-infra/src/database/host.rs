//! Connection target resolution.
//!
//! Dotted public hostnames are handed to the driver as-is. Local-style names
//! (container or service aliases without a dot) are resolved up front and
//! the URL is rewritten to the address.

use std::net::IpAddr;

use reqwest::Url;

/// Where to connect and with which TLS posture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectTarget {
    pub url: String,
    /// Encrypt if the server offers it, without certificate verification.
    pub relaxed_tls: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("No database URL found. Set DATABASE_URL or NEON_DATABASE_URL.")]
    MissingUrl,

    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),

    #[error("Could not resolve database host {host}: {reason}")]
    Unresolvable { host: String, reason: String },
}

/// Dotted hostnames that are neither loopback nor `localhost`.
pub fn is_external_host(host: &str) -> bool {
    host.contains('.') && !host.starts_with("127.") && host != "localhost"
}

fn is_numeric_host(host: &str) -> bool {
    host.parse::<IpAddr>().is_ok() || host.trim_matches(['[', ']']).parse::<IpAddr>().is_ok()
}

/// Pick the primary URL, pre-resolving local-style hosts; on resolution
/// failure use `fallback` when present.
pub async fn resolve_target(
    primary: Option<&str>,
    fallback: Option<&str>,
) -> Result<ConnectTarget, HostError> {
    let url = match (primary, fallback) {
        (Some(primary), fallback) => match pre_resolve(primary).await {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(error = %err, "Primary database URL unusable");
                match fallback {
                    Some(fallback) => {
                        tracing::info!("Falling back to NEON_DATABASE_URL");
                        fallback.to_string()
                    }
                    None => primary.to_string(),
                }
            }
        },
        (None, Some(fallback)) => {
            tracing::info!("Using NEON_DATABASE_URL");
            fallback.to_string()
        }
        (None, None) => return Err(HostError::MissingUrl),
    };

    Ok(with_tls_policy(&url))
}

async fn pre_resolve(raw: &str) -> Result<String, HostError> {
    let mut url = Url::parse(raw).map_err(|e| HostError::InvalidUrl(e.to_string()))?;
    let host = url
        .host_str()
        .ok_or_else(|| HostError::InvalidUrl("missing host".to_string()))?
        .to_string();

    if is_external_host(&host) || is_numeric_host(&host) || host == "localhost" {
        tracing::info!(host = %host, "Using DATABASE_URL");
        return Ok(raw.to_string());
    }

    let port = url.port().unwrap_or(5432);
    let address = tokio::net::lookup_host((host.as_str(), port))
        .await
        .map_err(|e| HostError::Unresolvable {
            host: host.clone(),
            reason: e.to_string(),
        })?
        .next()
        .ok_or_else(|| HostError::Unresolvable {
            host: host.clone(),
            reason: "no addresses returned".to_string(),
        })?;

    url.set_ip_host(address.ip())
        .map_err(|_| HostError::InvalidUrl("cannot rewrite host".to_string()))?;
    tracing::info!(host = %host, address = %address.ip(), "Resolved database host");
    Ok(url.to_string())
}

/// Add `sslmode=prefer` for external hosts unless the URL already sets one.
fn with_tls_policy(raw: &str) -> ConnectTarget {
    let Ok(mut url) = Url::parse(raw) else {
        return ConnectTarget {
            url: raw.to_string(),
            relaxed_tls: false,
        };
    };

    let external = url.host_str().is_some_and(is_external_host);
    let has_sslmode = url.query_pairs().any(|(key, _)| key == "sslmode");
    if external && !has_sslmode {
        url.query_pairs_mut().append_pair("sslmode", "prefer");
    }

    ConnectTarget {
        url: url.to_string(),
        relaxed_tls: external,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_host_classification() {
        assert!(is_external_host("ep-cool-pond.us-east-2.aws.neon.tech"));
        assert!(is_external_host("10.0.0.5"));
        assert!(!is_external_host("localhost"));
        assert!(!is_external_host("127.0.0.1"));
        assert!(!is_external_host("db"));
    }

    #[tokio::test]
    async fn test_external_url_is_kept_and_tls_relaxed() {
        let target = resolve_target(Some("postgres://u:p@db.example.com:5432/journal"), None)
            .await
            .unwrap();

        assert!(target.relaxed_tls);
        assert_eq!(
            target.url,
            "postgres://u:p@db.example.com:5432/journal?sslmode=prefer"
        );
    }

    #[tokio::test]
    async fn test_existing_sslmode_is_respected() {
        let target = resolve_target(
            Some("postgres://u:p@db.example.com/journal?sslmode=require"),
            None,
        )
        .await
        .unwrap();

        assert_eq!(
            target.url,
            "postgres://u:p@db.example.com/journal?sslmode=require"
        );
    }

    #[tokio::test]
    async fn test_localhost_connects_without_tls() {
        let target = resolve_target(Some("postgres://u:p@localhost:5432/journal"), None)
            .await
            .unwrap();

        assert!(!target.relaxed_tls);
        assert_eq!(target.url, "postgres://u:p@localhost:5432/journal");
    }

    #[tokio::test]
    async fn test_unresolvable_local_host_uses_fallback() {
        let target = resolve_target(
            Some("postgres://u:p@no-such-db-host-for-tests:5432/journal"),
            Some("postgres://u:p@localhost:5432/neon"),
        )
        .await
        .unwrap();

        assert_eq!(target.url, "postgres://u:p@localhost:5432/neon");
    }

    #[tokio::test]
    async fn test_missing_urls_is_an_error() {
        let err = resolve_target(None, None).await.unwrap_err();

        assert!(matches!(err, HostError::MissingUrl));
    }
}
