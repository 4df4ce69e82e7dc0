//! Configuration for the shared reqwest client.

use std::time::Duration;

/// Default timeout for HTTP requests: 10 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the reqwest HTTP client.
#[derive(Debug, Clone)]
pub struct ReqwestConfig {
    /// Default timeout for HTTP requests.
    pub timeout: Duration,
    /// User-Agent header to send with requests.
    pub user_agent: Option<String>,
}

impl Default for ReqwestConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }
}

impl ReqwestConfig {
    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("atom/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Sets the default request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        }
    }

    /// Returns the effective user agent, using default if unset or empty.
    pub fn effective_user_agent(&self) -> String {
        match self.user_agent.as_deref() {
            Some(user_agent) if !user_agent.is_empty() => user_agent.to_owned(),
            _ => Self::default_user_agent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ReqwestConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.effective_user_agent().starts_with("atom/"));
    }

    #[test]
    fn test_effective_timeout_uses_default_when_zero() {
        let config = ReqwestConfig::default().with_timeout(Duration::ZERO);
        assert_eq!(config.effective_timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_effective_user_agent_uses_default_when_empty() {
        let config = ReqwestConfig::default().with_user_agent("");
        assert!(config.effective_user_agent().starts_with("atom/"));
    }
}
