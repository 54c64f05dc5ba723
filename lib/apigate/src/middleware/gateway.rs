//! API gateway interceptor.
//!
//! The gateway itself is an opaque collaborator behind the [`Gateway`] trait:
//! it sees every request on its way out and may attach routing or auth
//! metadata, or refuse to forward it. [`HeaderGateway`] is a plain
//! implementation driven by a [`GatewayConfig`].
//!
//! Register this interceptor after the caller interceptors so that it sees
//! the request in its final caller-defined shape.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use serde::Deserialize;
use tower::{Layer, Service};
use tracing::debug;

use crate::{Error, Request, Response, Result};

/// Processes each request on its way to the API gateway.
pub trait Gateway: Send + Sync + 'static {
    /// Attach gateway metadata to `request`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gateway`] when the request must not be forwarded.
    fn prepare(&self, request: &mut Request<Bytes>) -> Result<()>;
}

impl<F> Gateway for F
where
    F: Fn(&mut Request<Bytes>) -> Result<()> + Send + Sync + 'static,
{
    fn prepare(&self, request: &mut Request<Bytes>) -> Result<()> {
        self(request)
    }
}

/// Gateway settings, usually loaded from a JSON file.
///
/// ```json
/// {
///   "headers": { "X-Gateway-App-Id": "rideshare-test" },
///   "bearer_token": "s3cr3t"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayConfig {
    /// Static headers attached to every request, replacing caller values.
    pub headers: BTreeMap<String, String>,
    /// Token sent as `Authorization: Bearer <token>`.
    pub bearer_token: Option<String>,
}

impl GatewayConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// [`Gateway`] that attaches the headers of a [`GatewayConfig`].
///
/// The default instance attaches nothing.
#[derive(Debug, Clone, Default)]
pub struct HeaderGateway {
    headers: Vec<(String, String)>,
}

impl HeaderGateway {
    /// Validate `config` and build the gateway.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] when a header name or value cannot be
    /// sent over HTTP, or the bearer token is blank.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let mut headers = Vec::with_capacity(config.headers.len() + 1);

        for (name, value) in config.headers {
            http::HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::invalid_request(format!("invalid gateway header name: {name}")))?;
            http::HeaderValue::from_str(&value).map_err(|_| {
                Error::invalid_request(format!("invalid value for gateway header {name}"))
            })?;
            headers.push((name, value));
        }

        if let Some(token) = config.bearer_token {
            let token = token.trim();
            if token.is_empty() {
                return Err(Error::invalid_request("gateway bearer token is blank"));
            }
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }

        Ok(Self { headers })
    }
}

impl Gateway for HeaderGateway {
    fn prepare(&self, request: &mut Request<Bytes>) -> Result<()> {
        let target = request.headers_mut();
        for (name, value) in &self.headers {
            target.insert(name.clone(), value.clone());
        }
        Ok(())
    }
}

/// Layer that runs a [`Gateway`] on every request.
#[derive(Clone)]
pub struct ApiGatewayLayer {
    gateway: Arc<dyn Gateway>,
}

impl std::fmt::Debug for ApiGatewayLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiGatewayLayer").finish_non_exhaustive()
    }
}

impl ApiGatewayLayer {
    /// Create a layer around `gateway`.
    pub fn new(gateway: impl Gateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }

    /// Create a layer around an already shared gateway.
    #[must_use]
    pub fn from_arc(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

impl<S> Layer<S> for ApiGatewayLayer {
    type Service = ApiGateway<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ApiGateway {
            inner,
            gateway: Arc::clone(&self.gateway),
        }
    }
}

/// Service that runs a [`Gateway`] before forwarding requests.
#[derive(Clone)]
pub struct ApiGateway<S> {
    inner: S,
    gateway: Arc<dyn Gateway>,
}

impl<S> Service<Request<Bytes>> for ApiGateway<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Bytes>) -> Self::Future {
        if let Err(err) = self.gateway.prepare(&mut request) {
            debug!(error = %err, url = %request.url(), "gateway refused request");
            return Box::pin(async move { Err(err) });
        }

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(request).await })
    }
}
