//! Runs a call and publishes its trace.
//!
//! [`perform_api_call`] publishes a pending trace immediately, enqueues the
//! call, and publishes the final trace once the exchange completes or fails.

use std::time::Instant;

use bytes::Bytes;
use chrono::{DateTime, Local};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::call::{Call, Callback};
use crate::trace::{body_text, failure_log, pending_log, response_log};
use crate::{Error, Request, Response, RestClient};

/// Display surface receiving trace text.
///
/// Each published text replaces the previous one.
pub trait LogSink: Send + Sync + 'static {
    /// Show `text`.
    fn publish(&self, text: String);
}

impl<F> LogSink for F
where
    F: Fn(String) + Send + Sync + 'static,
{
    fn publish(&self, text: String) {
        self(text);
    }
}

/// Run `call`, publishing its pending then final trace to `sink`.
///
/// The pending trace is published before this function returns. The final
/// trace is published from the returned task.
pub fn perform_api_call<C, S>(call: Call<C>, sink: S) -> JoinHandle<()>
where
    C: RestClient,
    S: LogSink,
{
    let started = Local::now();
    let clock = Instant::now();

    sink.publish(pending_log(&started, &call.request().head()));

    call.enqueue(TraceCallback {
        sink,
        started,
        clock,
    })
}

/// Formats the final trace of a call.
struct TraceCallback<S> {
    sink: S,
    started: DateTime<Local>,
    clock: Instant,
}

impl<S: LogSink> Callback for TraceCallback<S> {
    fn on_response(self, request: &Request<Bytes>, response: Response<Bytes>) {
        let duration = self.clock.elapsed();
        // The transport records the request after every interceptor ran.
        let sent = response
            .request()
            .cloned()
            .unwrap_or_else(|| request.head());

        let log = response_log(&self.started, duration, &sent, &body_text(&response));
        debug!(status = response.status(), "{log}");
        self.sink.publish(log);
    }

    fn on_failure(self, request: &Request<Bytes>, err: Error) {
        let duration = self.clock.elapsed();
        let log = failure_log(&self.started, duration, &request.head(), &err);
        error!(error = %err, "{log}");
        self.sink.publish(log);
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::{Arc, Mutex};

    use url::Url;

    use super::*;
    use crate::{Headers, Method, Result};

    #[derive(Clone)]
    struct Canned {
        base_url: Url,
        fail: bool,
    }

    impl RestClient for Canned {
        fn execute(
            &self,
            request: Request<Bytes>,
        ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
            let fail = self.fail;
            async move {
                if fail {
                    return Err(Error::connection("connection refused"));
                }
                let mut sent = request.head();
                sent.headers.append("X-Gateway", "added");
                Ok(Response::new(200, Headers::new(), Bytes::from("hello")).with_request(sent))
            }
        }

        fn base_url(&self) -> &Url {
            &self.base_url
        }
    }

    fn call(fail: bool) -> Call<Canned> {
        let base_url = Url::parse("http://localhost:9080/").expect("url");
        let request = Request::builder(Method::Get, base_url.join("ping").expect("url")).build();
        Call::new(Canned { base_url, fail }, request)
    }

    fn recording_sink() -> (Arc<Mutex<Vec<String>>>, impl LogSink) {
        let logs = Arc::new(Mutex::new(Vec::new()));
        let sink_logs = Arc::clone(&logs);
        let sink = move |text: String| sink_logs.lock().expect("lock").push(text);
        (logs, sink)
    }

    #[tokio::test]
    async fn publishes_pending_then_response() {
        let (logs, sink) = recording_sink();

        let handle = perform_api_call(call(false), sink);
        {
            let logs = logs.lock().expect("lock");
            assert_eq!(logs.len(), 1);
            assert!(logs[0].ends_with("Request Method: GET\nWaiting for response..."));
        }

        handle.await.expect("task");
        let logs = logs.lock().expect("lock");
        assert_eq!(logs.len(), 2);
        assert!(logs[1].contains("Request URL: http://localhost:9080/ping\n"));
        assert!(logs[1].contains("Request Headers:\nx-gateway: added\n\n"));
        assert!(logs[1].ends_with("Response Body:\nhello"));
    }

    #[tokio::test]
    async fn publishes_failure() {
        let (logs, sink) = recording_sink();

        perform_api_call(call(true), sink).await.expect("task");

        let logs = logs.lock().expect("lock");
        assert_eq!(logs.len(), 2);
        assert!(logs[1].ends_with("Failure: connection error: connection refused"));
    }
}
