//! Exchange logging interceptor.
//!
//! Outermost in the chain, so it logs the request as the caller built it and
//! the final outcome after every other interceptor ran. A gateway rejection,
//! a deadline and a transport failure are reported as distinct events.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::{Instrument, Span, debug, field, info, info_span, warn};

use crate::trace::duration_millis;
use crate::{Error, Request, Response, Result};

/// How much of an exchange is logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Method, URL, status and elapsed time.
    #[default]
    Basic,
    /// Also the request and response headers, at debug level.
    Headers,
}

/// Layer logging every exchange through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

impl LoggingLayer {
    /// Log a one-line summary per exchange.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log headers as well.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Headers,
        }
    }

    /// The configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service logging each exchange of its inner service.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

/// What an exchange ended with, as far as logging cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success(u16),
    HttpError(u16),
    Rejected,
    TimedOut,
    Failed,
}

impl Outcome {
    fn of(result: &Result<Response<Bytes>>) -> Self {
        match result {
            Ok(response) if response.is_success() => Self::Success(response.status()),
            Ok(response) => Self::HttpError(response.status()),
            Err(err) if err.is_gateway() => Self::Rejected,
            Err(err) if err.is_timeout() => Self::TimedOut,
            Err(_) => Self::Failed,
        }
    }
}

fn log_outcome(result: &Result<Response<Bytes>>, elapsed_ms: u64) {
    match (Outcome::of(result), result) {
        (Outcome::Success(status), _) => info!(status, elapsed_ms, "exchange completed"),
        (Outcome::HttpError(status), _) => {
            warn!(status, elapsed_ms, "exchange completed with HTTP error");
        }
        (Outcome::Rejected, Err(err)) => warn!(error = %err, "gateway rejected request"),
        (Outcome::TimedOut, _) => warn!(elapsed_ms, "exchange timed out"),
        (_, Err(err)) => warn!(error = %err, elapsed_ms, "exchange failed"),
        (_, Ok(_)) => {}
    }
}

impl<S> Service<Request<Bytes>> for Logging<S>
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

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let span = info_span!(
            "gateway_exchange",
            method = %request.method(),
            url = %request.url(),
            status = field::Empty,
        );
        let level = self.level;

        if level == LogLevel::Headers {
            span.in_scope(|| {
                debug!("request headers:\n{}", request.headers().format_lines());
            });
        }

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();
                let result = inner.call(request).await;
                let elapsed_ms = duration_millis(start.elapsed());

                if let Ok(response) = &result {
                    Span::current().record("status", response.status());
                    if level == LogLevel::Headers {
                        debug!("response headers:\n{}", response.headers().format_lines());
                    }
                }
                log_outcome(&result, elapsed_ms);

                result
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use tower::ServiceExt;

    use super::*;
    use crate::{Headers, Method};

    fn request() -> Request<Bytes> {
        let url = url::Url::parse("http://localhost:9080/ping").expect("url");
        Request::builder(Method::Get, url).build()
    }

    #[test]
    fn levels() {
        assert_eq!(LoggingLayer::new().level(), LogLevel::Basic);
        assert_eq!(LoggingLayer::debug().level(), LogLevel::Headers);
    }

    #[test]
    fn outcome_classification() {
        let ok = Ok(Response::new(200, Headers::new(), Bytes::new()));
        assert_eq!(Outcome::of(&ok), Outcome::Success(200));

        let forbidden = Ok(Response::new(403, Headers::new(), Bytes::new()));
        assert_eq!(Outcome::of(&forbidden), Outcome::HttpError(403));

        assert_eq!(Outcome::of(&Err(Error::gateway("no session"))), Outcome::Rejected);
        assert_eq!(Outcome::of(&Err(Error::Timeout)), Outcome::TimedOut);
        assert_eq!(
            Outcome::of(&Err(Error::connection("refused"))),
            Outcome::Failed
        );
    }

    #[tokio::test]
    async fn passes_outcome_through() {
        let rejecting = tower::service_fn(|_: Request<Bytes>| async {
            Err::<Response<Bytes>, _>(Error::gateway("no session"))
        });
        let result = LoggingLayer::debug().layer(rejecting).oneshot(request()).await;
        assert!(result.is_err_and(|err| err.is_gateway()));

        let answering = tower::service_fn(|_: Request<Bytes>| async {
            Ok::<_, Error>(Response::new(204, Headers::new(), Bytes::new()))
        });
        let response = LoggingLayer::new()
            .layer(answering)
            .oneshot(request())
            .await
            .expect("response");
        assert_eq!(response.status(), 204);
    }
}
