//! Generic API client wrapper.
//!
//! This module provides [`ApiClient`], a wrapper that combines any [`HttpClient`]
//! with a base URL to create a [`RestClient`].

use std::future::Future;

use bytes::Bytes;
use url::Url;

use crate::{Error, HttpClient, Request, Response, RestClient, Result};

/// An [`HttpClient`] bound to a base URL.
///
/// The base URL must end with `/`: endpoint paths are resolved relative to
/// it, and without the trailing slash the last path segment would be dropped.
///
/// # Example
///
/// ```ignore
/// use apigate::{ApiClient, HyperClient};
///
/// let http = HyperClient::builder().with_logging().build();
/// let api = ApiClient::new(http, "http://192.168.61.103:9080/")?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient<C> {
    client: C,
    base_url: Url,
}

impl<C> ApiClient<C> {
    /// Create a new API client with the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed, cannot serve as a base,
    /// or does not end with `/`.
    pub fn new(client: C, base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Self::with_url(client, base_url)
    }

    /// Create a new API client with a pre-parsed URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot serve as a base or does not end with `/`.
    pub fn with_url(client: C, base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(Error::invalid_request(format!(
                "base URL cannot be a base: {base_url}"
            )));
        }
        if !base_url.path().ends_with('/') {
            return Err(Error::invalid_request(format!(
                "base URL must end in /: {base_url}"
            )));
        }
        Ok(Self { client, base_url })
    }

    /// Get a reference to the inner HTTP client.
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.client
    }

    /// Consume the wrapper and return the inner HTTP client.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.client
    }
}

impl<C> RestClient for ApiClient<C>
where
    C: HttpClient + Clone + 'static,
{
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        self.client.execute(request)
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn accepts_base_with_trailing_slash() {
        let api = ApiClient::new((), "http://192.168.61.103:9080/").expect("client");
        check!(api.base_url.as_str() == "http://192.168.61.103:9080/");

        let api = ApiClient::new((), "https://example.com/v1/").expect("client");
        check!(api.base_url.path() == "/v1/");
    }

    #[test]
    fn host_only_url_is_normalized_with_slash() {
        // `Url` normalizes an empty path to `/`.
        let api = ApiClient::new((), "http://localhost:9080").expect("client");
        check!(api.base_url.as_str() == "http://localhost:9080/");
    }

    #[test]
    fn rejects_base_without_trailing_slash() {
        let_assert!(Err(Error::InvalidRequest(msg)) = ApiClient::new((), "https://example.com/v1"));
        check!(msg.contains("must end in /"));
    }

    #[test]
    fn rejects_unparsable_base() {
        let_assert!(Err(Error::InvalidUrl(_)) = ApiClient::new((), "not a url"));
        let_assert!(Err(Error::InvalidRequest(_)) = ApiClient::new((), "mailto:dev@example.com"));
    }
}
