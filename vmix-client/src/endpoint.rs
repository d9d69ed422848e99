//! Device network address handling.

use std::fmt;
use std::str::FromStr;

use crate::error::EndpointError;

/// Port the vMix web controller listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 8088;

/// Host the dashboard targets before any other endpoint is committed.
pub const DEFAULT_HOST: &str = "localhost";

/// Address of a vMix instance, always rendered as `host:port`.
///
/// Values are immutable; connecting to another device replaces the whole
/// endpoint rather than editing it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointConfig {
    host: String,
    port: u16,
}

impl EndpointConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Normalize a user-supplied address.
    ///
    /// A bare host gets [`DEFAULT_PORT`]. The host itself is not validated;
    /// an unreachable or nonsensical host only fails once a request is made.
    /// IPv6 literals are accepted bare (`fe80::1`) or bracketed with a port
    /// (`[fe80::1]:8088`).
    ///
    /// # Errors
    ///
    /// `EndpointError::Empty` for an empty (or whitespace-only) string and
    /// `EndpointError::InvalidPort` when the text after the host is not a
    /// port number. Only `Empty` is fatal to a connect attempt; an invalid
    /// port is reported like an unreachable device.
    ///
    /// # Examples
    ///
    /// ```
    /// use vmix_client::EndpointConfig;
    ///
    /// let endpoint = EndpointConfig::normalize("192.168.1.20").unwrap();
    /// assert_eq!(endpoint.to_string(), "192.168.1.20:8088");
    /// ```
    pub fn normalize(raw: &str) -> Result<Self, EndpointError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(EndpointError::Empty);
        }

        if let Some(bracketed) = raw.strip_prefix('[') {
            let (host, rest) = bracketed
                .split_once(']')
                .ok_or_else(|| EndpointError::InvalidPort(raw.to_string()))?;
            return match rest {
                "" => Ok(Self::new(host, DEFAULT_PORT)),
                _ => {
                    let port = rest
                        .strip_prefix(':')
                        .and_then(|port| port.parse::<u16>().ok())
                        .ok_or_else(|| EndpointError::InvalidPort(raw.to_string()))?;
                    Ok(Self::new(host, port))
                }
            };
        }

        match raw.rsplit_once(':') {
            // More than one colon without brackets is a bare IPv6 literal
            Some((host, port)) if !host.contains(':') => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| EndpointError::InvalidPort(raw.to_string()))?;
                Ok(Self::new(host, port))
            }
            _ => Ok(Self::new(raw, DEFAULT_PORT)),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// URL of the XML status/inputs document for this device.
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Display for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for EndpointConfig {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_bare_host_gets_default_port() {
        assert_eq!(
            EndpointConfig::normalize("host").unwrap(),
            EndpointConfig::normalize("host:8088").unwrap()
        );
    }

    #[rstest]
    #[case("host:1234", "host", 1234)]
    #[case("10.0.0.5:9000", "10.0.0.5", 9000)]
    #[case("  studio-pc  ", "studio-pc", 8088)]
    #[case("localhost:8088", "localhost", 8088)]
    fn test_normalize(#[case] raw: &str, #[case] host: &str, #[case] port: u16) {
        let endpoint = EndpointConfig::normalize(raw).unwrap();
        assert_eq!(endpoint.host(), host);
        assert_eq!(endpoint.port(), port);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_empty_endpoint_is_rejected(#[case] raw: &str) {
        assert_eq!(EndpointConfig::normalize(raw), Err(EndpointError::Empty));
    }

    #[rstest]
    #[case("host:")]
    #[case("host:abc")]
    #[case("host:70000")]
    fn test_invalid_port_is_rejected(#[case] raw: &str) {
        assert!(matches!(
            EndpointConfig::normalize(raw),
            Err(EndpointError::InvalidPort(_))
        ));
    }

    #[rstest]
    #[case("::1", "::1", 8088, "[::1]:8088")]
    #[case("fe80::1", "fe80::1", 8088, "[fe80::1]:8088")]
    #[case("[fe80::1]:9000", "fe80::1", 9000, "[fe80::1]:9000")]
    #[case("[::1]", "::1", 8088, "[::1]:8088")]
    fn test_ipv6_literals(
        #[case] raw: &str,
        #[case] host: &str,
        #[case] port: u16,
        #[case] display: &str,
    ) {
        let endpoint = EndpointConfig::normalize(raw).unwrap();
        assert_eq!(endpoint.host(), host);
        assert_eq!(endpoint.port(), port);
        assert_eq!(endpoint.to_string(), display);
        assert_eq!(endpoint.api_url(), format!("http://{}/api", display));
        assert_eq!(EndpointConfig::normalize(display).unwrap(), endpoint);
    }

    #[rstest]
    #[case("[::1]:abc")]
    #[case("[::1")]
    #[case("[::1]9000")]
    fn test_invalid_bracketed_port_is_rejected(#[case] raw: &str) {
        assert!(matches!(
            EndpointConfig::normalize(raw),
            Err(EndpointError::InvalidPort(_))
        ));
    }

    #[test]
    fn test_api_url_and_display() {
        let endpoint = EndpointConfig::new("192.168.1.20", 8088);
        assert_eq!(endpoint.to_string(), "192.168.1.20:8088");
        assert_eq!(endpoint.api_url(), "http://192.168.1.20:8088/api");
        assert_eq!(EndpointConfig::default().to_string(), "localhost:8088");
    }

    #[test]
    fn test_from_str() {
        let endpoint: EndpointConfig = "studio".parse().unwrap();
        assert_eq!(endpoint.port(), DEFAULT_PORT);
    }

    proptest! {
        #[test]
        fn normalize_round_trips_through_display(host in "[a-z][a-z0-9.-]{0,30}", port in 1u16..) {
            let endpoint = EndpointConfig::normalize(&format!("{host}:{port}")).unwrap();
            prop_assert_eq!(endpoint.host(), host.as_str());
            prop_assert_eq!(endpoint.port(), port);
            prop_assert_eq!(EndpointConfig::normalize(&endpoint.to_string()).unwrap(), endpoint);
        }

        #[test]
        fn bare_host_always_uses_default_port(host in "[a-z][a-z0-9.-]{0,30}") {
            let endpoint = EndpointConfig::normalize(&host).unwrap();
            prop_assert_eq!(endpoint.port(), DEFAULT_PORT);
            prop_assert_eq!(endpoint.to_string(), format!("{host}:{DEFAULT_PORT}"));
        }
    }
}
