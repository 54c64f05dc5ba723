//! HTTP client traits.
//!
//! - [`HttpClient`] - Low-level HTTP execution
//! - [`RestClient`] - Client bound to a base URL, which typed APIs are written against

use std::future::Future;

use bytes::Bytes;
use url::Url;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// Implementations run the request through their interceptor chain and the
/// transport, and resolve with the buffered response.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Rejection by an interceptor
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

/// Trait for clients that typed REST APIs are implemented against.
///
/// Combines HTTP execution with a base URL. Endpoint paths are resolved
/// relative to [`RestClient::base_url`].
pub trait RestClient: Clone + Send + Sync + 'static {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;

    /// Get the base URL for this client.
    fn base_url(&self) -> &Url;
}
