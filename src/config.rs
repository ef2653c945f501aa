use std::time::Duration;

use bon::Builder;

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://rest-api.pay.nl";

/// Per-request timeout used unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client configuration.
///
/// ```
/// use paynl_kit::config::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .api_token("my-token")
///     .service_id("SL-1234-5678")
///     .verbose(true)
///     .build();
///
/// assert_eq!(config.base_url, "https://rest-api.pay.nl");
/// assert_eq!(config.timeout.as_secs(), 10);
/// ```
#[derive(Builder, Clone)]
pub struct ClientConfig {
    /// API token, sent as `token` in every request body.
    #[builder(into)]
    pub api_token: String,
    /// Service id (`SL-xxxx-xxxx`), sent as `serviceId` in every request body.
    #[builder(into)]
    pub service_id: String,
    /// Log status, headers and raw body of every response.
    #[builder(default)]
    pub verbose: bool,
    /// API host. Only needs changing for testing.
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    pub base_url: String,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_token", &"<redacted>")
            .field("service_id", &self.service_id)
            .field("verbose", &self.verbose)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_the_token() {
        let config = ClientConfig::builder()
            .api_token("secret-token")
            .service_id("SL-1111-2222")
            .build();

        let printed = format!("{config:?}");
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("SL-1111-2222"));
        assert!(!config.verbose);
    }
}
