//! URL manipulation and validation utilities.
//!
//! Seed URLs are validated here before a job is ever created, and every URL
//! that enters the crawl frontier goes through [`normalize_url`] so the
//! visited set compares like with like.

use anyhow::Result;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use thiserror::Error;
use url::{Host, Url};

/// Reasons a seed URL is refused before a crawl is scheduled
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL could not be parsed: {0}")]
    Malformed(String),

    #[error("unsupported scheme '{0}', only http and https are allowed")]
    UnsupportedScheme(String),

    #[error("URL has no host")]
    MissingHost,

    #[error("host '{0}' is private, loopback or otherwise not publicly routable")]
    DisallowedHost(String),
}

/// Normalize a URL string by stripping fragment anchors.
///
/// Fragment identifiers (#foo) are client-side navigation markers that don't
/// represent different HTTP resources.
///
/// ```
/// # use seo_crawler::utils::normalize_url;
/// let normalized = normalize_url("https://example.com/page#section").unwrap();
/// assert_eq!(normalized, "https://example.com/page");
/// ```
pub fn normalize_url(url: &str) -> Result<String> {
    let mut parsed = Url::parse(url)
        .map_err(|e| anyhow::anyhow!("Failed to parse URL for normalization: {}", e))?;
    parsed.set_fragment(None);
    Ok(parsed.to_string())
}

/// Validate a user-supplied seed URL.
///
/// Accepts only absolute http/https URLs whose host is publicly routable.
/// `localhost`, loopback, private, link-local and unspecified addresses are
/// refused so the crawler cannot be pointed at the deployment's own network.
pub fn validate_seed_url(raw: &str) -> Result<Url, UrlValidationError> {
    let parsed =
        Url::parse(raw.trim()).map_err(|e| UrlValidationError::Malformed(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }

    match parsed.host() {
        None => return Err(UrlValidationError::MissingHost),
        Some(Host::Domain(domain)) => {
            let domain = domain.trim_end_matches('.').to_ascii_lowercase();
            if domain.is_empty() || domain == "localhost" || domain.ends_with(".localhost") {
                return Err(UrlValidationError::DisallowedHost(domain));
            }
        }
        Some(Host::Ipv4(ip)) => {
            if !is_public_ip(IpAddr::V4(ip)) {
                return Err(UrlValidationError::DisallowedHost(ip.to_string()));
            }
        }
        Some(Host::Ipv6(ip)) => {
            if !is_public_ip(IpAddr::V6(ip)) {
                return Err(UrlValidationError::DisallowedHost(ip.to_string()));
            }
        }
    }

    Ok(parsed)
}

fn is_public_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_public_ipv4(v4),
        IpAddr::V6(v6) => {
            if let Some(mapped) = v6.to_ipv4_mapped() {
                return is_public_ipv4(mapped);
            }
            is_public_ipv6(v6)
        }
    }
}

fn is_public_ipv4(ip: Ipv4Addr) -> bool {
    !(ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
        || ip.is_documentation()
        // 100.64.0.0/10 carrier-grade NAT
        || (ip.octets()[0] == 100 && (ip.octets()[1] & 0xc0) == 64))
}

fn is_public_ipv6(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    !(ip.is_loopback()
        || ip.is_unspecified()
        // fc00::/7 unique local
        || (first & 0xfe00) == 0xfc00
        // fe80::/10 link local
        || (first & 0xffc0) == 0xfe80)
}

/// Origin triple used for same-site link filtering
#[must_use]
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme()
        && a.host_str() == b.host_str()
        && a.port_or_known_default() == b.port_or_known_default()
}

/// Host of a URL without a leading `www.`, used as the default brand name
#[must_use]
pub fn brand_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fragment() {
        assert_eq!(
            normalize_url("https://example.com/a?b=1#top").unwrap(),
            "https://example.com/a?b=1"
        );
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert_eq!(
            validate_seed_url("ftp://example.com/"),
            Err(UrlValidationError::UnsupportedScheme("ftp".into()))
        );
        assert!(matches!(
            validate_seed_url("not a url"),
            Err(UrlValidationError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_internal_hosts() {
        for url in [
            "http://localhost:8080/",
            "http://api.localhost/",
            "http://127.0.0.1/",
            "http://10.1.2.3/",
            "http://192.168.0.10/",
            "http://172.16.5.5/",
            "http://169.254.169.254/latest/meta-data",
            "http://0.0.0.0/",
            "http://[::1]/",
            "http://[fd00::1]/",
            "http://[fe80::1]/",
            "http://[::ffff:127.0.0.1]/",
        ] {
            assert!(
                matches!(validate_seed_url(url), Err(UrlValidationError::DisallowedHost(_))),
                "{url} should be disallowed"
            );
        }
    }

    #[test]
    fn accepts_public_hosts() {
        assert!(validate_seed_url("https://example.com/").is_ok());
        assert!(validate_seed_url("http://93.184.216.34/").is_ok());
        assert!(validate_seed_url("  https://www.rust-lang.org/learn  ").is_ok());
    }

    #[test]
    fn origin_comparison_includes_port() {
        let a = Url::parse("https://example.com/a").unwrap();
        let b = Url::parse("https://example.com:443/b").unwrap();
        let c = Url::parse("https://example.com:8443/b").unwrap();
        let d = Url::parse("http://example.com/a").unwrap();
        assert!(same_origin(&a, &b));
        assert!(!same_origin(&a, &c));
        assert!(!same_origin(&a, &d));
    }

    #[test]
    fn brand_drops_www() {
        assert_eq!(brand_from_url("https://www.example.com/x"), Some("example.com".into()));
        assert_eq!(brand_from_url("nope"), None);
    }
}
