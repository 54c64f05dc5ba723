//! Human-readable request/response traces.
//!
//! A call produces two texts: a pending trace published right before dispatch,
//! and a final trace published once the exchange completed or failed.
//!
//! ```text
//! Request started at: 14:03:27
//! Duration: 182ms
//!
//! Request URL: http://gateway.local/load-test/api/ping
//! Request Method: GET
//!
//! Request Headers:
//! client-header-name1: xxxxxx
//!
//! Response Body:
//! {"status":"ok"}
//! ```

use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Local};

use crate::{Error, RequestHead, Response};

/// Text used when a response carries no body.
pub const NO_BODY: &str = "No body";

/// Formats the start time of a call as `HH:mm:ss`.
#[must_use]
pub fn format_start_time(started: &DateTime<Local>) -> String {
    started.format("%H:%M:%S").to_string()
}

/// Trace published while the call is in flight.
#[must_use]
pub fn pending_log(started: &DateTime<Local>, request: &RequestHead) -> String {
    format!(
        "Request started at: {}\nRequest URL: {}\nRequest Method: {}\nWaiting for response...",
        format_start_time(started),
        request.url,
        request.method,
    )
}

/// Trace published when a response arrived, whatever its status.
///
/// `request` should be the request that reached the transport, so the listed
/// headers include what the interceptors added.
#[must_use]
pub fn response_log(
    started: &DateTime<Local>,
    duration: Duration,
    request: &RequestHead,
    body: &str,
) -> String {
    let mut log = completed_prefix(started, duration, request);
    log.push_str("Response Body:\n");
    log.push_str(body);
    log
}

/// Trace published when the call failed without a response.
#[must_use]
pub fn failure_log(
    started: &DateTime<Local>,
    duration: Duration,
    request: &RequestHead,
    error: &Error,
) -> String {
    let mut log = completed_prefix(started, duration, request);
    log.push_str(&format!("Failure: {error}"));
    log
}

/// Body text of a response, for success and error statuses alike.
#[must_use]
pub fn body_text(response: &Response<Bytes>) -> String {
    if response.body().is_empty() {
        NO_BODY.to_string()
    } else {
        response.text_lossy()
    }
}

/// Whole milliseconds of `duration`, saturating.
#[must_use]
pub fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn completed_prefix(started: &DateTime<Local>, duration: Duration, request: &RequestHead) -> String {
    format!(
        "Request started at: {}\nDuration: {}ms\n\nRequest URL: {}\nRequest Method: {}\n\nRequest Headers:\n{}\n\n",
        format_start_time(started),
        duration_millis(duration),
        request.url,
        request.method,
        request.headers.format_lines(),
    )
}
