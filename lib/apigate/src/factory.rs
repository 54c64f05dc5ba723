//! Client factory.
//!
//! [`create`] assembles the HTTP client with its fixed interceptor chain and
//! binds it to a base URL. The chain, outermost first:
//!
//! 1. logging,
//! 2. caller headers,
//! 3. the API gateway interceptor,
//! 4. the profiler, when enabled.
//!
//! The gateway runs after every caller interceptor; only the profiler sits
//! between it and the transport, so the profiler records what the gateway sent.

use std::sync::Arc;

use tracing::debug;

use crate::middleware::{Gateway, HeaderGateway, ProfileStore};
use crate::{ApiClient, ClientConfig, HyperClient, Result};

/// Everything [`create`] needs besides the base URL.
#[derive(Clone)]
pub struct FactoryOptions {
    config: ClientConfig,
    client_headers: Vec<(String, String)>,
    gateway: Arc<dyn Gateway>,
    profiler: Option<ProfileStore>,
    debug_logging: bool,
}

impl std::fmt::Debug for FactoryOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryOptions")
            .field("config", &self.config)
            .field("client_headers", &self.client_headers)
            .field("profiler", &self.profiler.is_some())
            .field("debug_logging", &self.debug_logging)
            .finish_non_exhaustive()
    }
}

impl Default for FactoryOptions {
    /// Default timeouts, no caller headers, a gateway adding nothing, and the
    /// profiler enabled in debug builds only.
    fn default() -> Self {
        Self {
            config: ClientConfig::default(),
            client_headers: Vec::new(),
            gateway: Arc::new(HeaderGateway::default()),
            profiler: cfg!(debug_assertions).then(ProfileStore::default),
            debug_logging: false,
        }
    }
}

impl FactoryOptions {
    /// Replace the client configuration.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a caller header, sent on every request.
    #[must_use]
    pub fn client_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.client_headers.push((name.into(), value.into()));
        self
    }

    /// Use `gateway` as the API gateway interceptor.
    #[must_use]
    pub fn gateway(mut self, gateway: impl Gateway) -> Self {
        self.gateway = Arc::new(gateway);
        self
    }

    /// Record exchanges into `store`.
    #[must_use]
    pub fn profiler(mut self, store: ProfileStore) -> Self {
        self.profiler = Some(store);
        self
    }

    /// Disable the profiler.
    #[must_use]
    pub fn without_profiler(mut self) -> Self {
        self.profiler = None;
        self
    }

    /// Log request and response headers as well.
    #[must_use]
    pub fn debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging = enabled;
        self
    }

    /// The profiler store, if profiling is enabled.
    #[must_use]
    pub fn profile_store(&self) -> Option<&ProfileStore> {
        self.profiler.as_ref()
    }
}

/// Build the HTTP client for `base_url` with the fixed interceptor chain.
///
/// # Errors
///
/// Returns an error if `base_url` cannot be parsed or does not end with `/`.
pub fn create(base_url: &str, options: FactoryOptions) -> Result<ApiClient<HyperClient>> {
    let FactoryOptions {
        config,
        client_headers,
        gateway,
        profiler,
        debug_logging,
    } = options;

    let mut builder = HyperClient::builder().config(&config);

    builder = if debug_logging {
        builder.with_debug_logging()
    } else {
        builder.with_logging()
    };

    builder = builder
        .with_client_headers(client_headers)
        .with_gateway(gateway);

    let profiling = profiler.is_some();
    if let Some(store) = profiler {
        builder = builder.with_profiler(store);
    }

    debug!(base_url, profiling, "creating API client");
    ApiClient::new(builder.build(), base_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profiler_follows_build_profile() {
        let options = FactoryOptions::default();
        assert_eq!(options.profile_store().is_some(), cfg!(debug_assertions));
        assert!(FactoryOptions::default().without_profiler().profile_store().is_none());
    }

    #[test]
    fn create_rejects_base_without_slash() {
        let result = create("http://localhost:9080/api", FactoryOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn create_keeps_config() {
        let config = ClientConfig::builder()
            .connect_timeout(std::time::Duration::from_secs(3))
            .build();
        let api = create(
            "http://localhost:9080/",
            FactoryOptions::default().config(config.clone()),
        )
        .expect("client");
        assert_eq!(api.inner().config(), &config);
    }
}
