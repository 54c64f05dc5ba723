//! Caller header interceptor.
//!
//! Appends a fixed list of headers to every outgoing request, before the
//! gateway interceptor sees it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use tower::{Layer, Service};

use crate::{Error, Request, Response, Result};

/// Layer that adds fixed headers to requests.
///
/// Values are appended, so a header the caller already set keeps its value
/// and gains another one.
///
/// # Example
///
/// ```ignore
/// use apigate::middleware::ClientHeadersLayer;
///
/// let layer = ClientHeadersLayer::new([
///     ("Client-Header-Name1", "xxxxxx"),
///     ("Client-Header-Name2", "yyyyyy"),
/// ]);
/// ```
#[derive(Debug, Clone)]
pub struct ClientHeadersLayer {
    headers: Arc<[(String, String)]>,
}

impl ClientHeadersLayer {
    /// Create a layer adding `headers`, in order.
    pub fn new<I, N, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            headers: headers
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        }
    }

    /// The headers this layer adds.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

impl<S> Layer<S> for ClientHeadersLayer {
    type Service = ClientHeaders<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ClientHeaders {
            inner,
            headers: Arc::clone(&self.headers),
        }
    }
}

/// Service that adds fixed headers to requests.
#[derive(Debug, Clone)]
pub struct ClientHeaders<S> {
    inner: S,
    headers: Arc<[(String, String)]>,
}

impl<S> Service<Request<Bytes>> for ClientHeaders<S>
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
        let target = request.headers_mut();
        for (name, value) in self.headers.iter() {
            target.append(name.clone(), value.clone());
        }

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(request).await })
    }
}
