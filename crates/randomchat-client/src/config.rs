//! Connection configuration.

use std::fmt;

use randomchat_proto::RANDOMCHAT_PATH;

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "localhost:8080";

/// Capacity of the transport's command and notice channels.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Server endpoint.
///
/// Only the host is configurable; the path is fixed by the protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
}

impl Endpoint {
    /// Create an endpoint for `host` (`name[:port]`).
    ///
    /// A `ws://` prefix and trailing slashes are tolerated and stripped.
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        let host = host.strip_prefix("ws://").unwrap_or(&host).trim_end_matches('/').to_owned();
        Self { host }
    }

    /// Configured host (`name[:port]`).
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Full WebSocket URL of the chat endpoint.
    pub fn url(&self) -> String {
        format!("ws://{}{RANDOMCHAT_PATH}", self.host)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_uses_fixed_path() {
        assert_eq!(Endpoint::new("10.0.0.5:8080").url(), "ws://10.0.0.5:8080/randomchat");
    }

    #[test]
    fn scheme_and_trailing_slash_are_stripped() {
        let endpoint = Endpoint::new("ws://chat.example.com/");
        assert_eq!(endpoint.host(), "chat.example.com");
        assert_eq!(endpoint.url(), "ws://chat.example.com/randomchat");
    }

    #[test]
    fn default_host() {
        assert_eq!(Endpoint::default().url(), "ws://localhost:8080/randomchat");
    }
}
