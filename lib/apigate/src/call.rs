//! Typed REST calls.
//!
//! An [`Endpoint`] describes one HTTP operation relative to a base URL. Preparing
//! it against a [`RestClient`] yields a [`Call`]: the request is built and can be
//! inspected before anything is sent. A call runs once, either awaited with
//! [`Call::execute`] or handed to the runtime with [`Call::enqueue`].

use bytes::Bytes;
use tokio::task::JoinHandle;
use url::Url;

use crate::{Error, Method, Request, Response, RestClient, Result};

/// One HTTP operation of a REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    method: Method,
    path: &'static str,
}

impl Endpoint {
    /// Endpoint with the given method and path, relative to the base URL.
    #[must_use]
    pub const fn new(method: Method, path: &'static str) -> Self {
        Self { method, path }
    }

    /// A `GET` endpoint.
    #[must_use]
    pub const fn get(path: &'static str) -> Self {
        Self::new(Method::Get, path)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Path relative to the base URL.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Resolve the endpoint path against `base`.
    ///
    /// A path starting with `/` replaces the base path, as URL references do.
    pub fn resolve(&self, base: &Url) -> Result<Url> {
        Ok(base.join(self.path)?)
    }
}

/// Receives the outcome of an enqueued [`Call`].
///
/// Exactly one method is invoked, once.
pub trait Callback: Send + 'static {
    /// A response arrived, whatever its status.
    fn on_response(self, request: &Request<Bytes>, response: Response<Bytes>);

    /// The call failed before a response arrived.
    fn on_failure(self, request: &Request<Bytes>, error: Error);
}

/// A prepared request bound to a client.
#[derive(Debug)]
pub struct Call<C> {
    client: C,
    request: Request<Bytes>,
}

impl<C: RestClient> Call<C> {
    /// Bind `request` to `client`.
    #[must_use]
    pub fn new(client: C, request: Request<Bytes>) -> Self {
        Self { client, request }
    }

    /// Build the call for `endpoint` on `client`.
    pub fn prepare(client: &C, endpoint: &Endpoint) -> Result<Self> {
        let url = endpoint.resolve(client.base_url())?;
        let request = Request::builder(endpoint.method(), url).build();
        Ok(Self::new(client.clone(), request))
    }

    /// The request as built, before any interceptor ran.
    #[must_use]
    pub fn request(&self) -> &Request<Bytes> {
        &self.request
    }

    /// Send the request and wait for the response.
    pub async fn execute(self) -> Result<Response<Bytes>> {
        self.client.execute(self.request).await
    }

    /// Send the request on the Tokio runtime and report to `callback`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn enqueue<K: Callback>(self, callback: K) -> JoinHandle<()> {
        let Self { client, request } = self;
        tokio::spawn(async move {
            match client.execute(request.clone()).await {
                Ok(response) => callback.on_response(&request, response),
                Err(error) => callback.on_failure(&request, error),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_resolves_relative_path() {
        let base = Url::parse("http://192.168.61.103:9080/").expect("url");
        let endpoint = Endpoint::get("load-test/api/auth-casbin-success-plugin-test");

        assert_eq!(
            endpoint.resolve(&base).expect("url").as_str(),
            "http://192.168.61.103:9080/load-test/api/auth-casbin-success-plugin-test"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let base = Url::parse("https://example.com/gateway/").expect("url");
        let endpoint = Endpoint::get("dogs/random");
        assert_eq!(
            endpoint.resolve(&base).expect("url").as_str(),
            "https://example.com/gateway/dogs/random"
        );
    }

    #[test]
    fn endpoint_absolute_path_replaces_base_path() {
        let base = Url::parse("https://example.com/gateway/").expect("url");
        let endpoint = Endpoint::get("/health");
        assert_eq!(
            endpoint.resolve(&base).expect("url").as_str(),
            "https://example.com/health"
        );
    }
}
