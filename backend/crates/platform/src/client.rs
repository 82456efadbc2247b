//! Client identification utilities
//!
//! The client IP is the identity used for rate limiting.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Extract the client IP address from headers.
///
/// Checks X-Forwarded-For first (reverse proxy setups, first entry in the
/// list), then falls back to the direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}

/// Build a rate-limit key from an action name and a client IP.
///
/// Requests whose IP cannot be determined share one bucket rather than
/// bypassing the limiter.
pub fn rate_limit_key(action: &str, ip: Option<IpAddr>) -> String {
    match ip {
        Some(ip) => format!("{action}:{ip}"),
        None => format!("{action}:unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_client_ip_xff() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );

        let ip = extract_client_ip(&headers, None);
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_direct() {
        let headers = HeaderMap::new();
        let direct: IpAddr = "127.0.0.1".parse().unwrap();

        let ip = extract_client_ip(&headers, Some(direct));
        assert_eq!(ip, Some(direct));
    }

    #[test]
    fn test_extract_client_ip_malformed_xff() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("not-an-ip"));

        let direct: IpAddr = "10.1.1.1".parse().unwrap();
        assert_eq!(extract_client_ip(&headers, Some(direct)), Some(direct));
    }

    #[test]
    fn test_rate_limit_key() {
        let ip: IpAddr = "203.0.113.7".parse().unwrap();
        assert_eq!(rate_limit_key("login", Some(ip)), "login:203.0.113.7");
        assert_eq!(rate_limit_key("login", None), "login:unknown");
    }
}
