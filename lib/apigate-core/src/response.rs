//! HTTP response handling.
//!
//! [`Response`] provides access to status, headers, body, and the head of the
//! request that produced it.

use bytes::Bytes;

use crate::{Headers, RequestHead};

/// HTTP response with status, headers, and body.
#[derive(Debug, Clone)]
pub struct Response<B = Bytes> {
    status: u16,
    headers: Headers,
    body: B,
    request: Option<RequestHead>,
}

impl<B> Response<B> {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: Headers, body: B) -> Self {
        Self {
            status,
            headers,
            body,
            request: None,
        }
    }

    /// Attach the head of the request that was sent on the wire.
    #[must_use]
    pub fn with_request(mut self, request: RequestHead) -> Self {
        self.request = Some(request);
        self
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// First header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// The request as it reached the transport, if known.
    #[must_use]
    pub const fn request(&self) -> Option<&RequestHead> {
        self.request.as_ref()
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> B {
        self.body
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }
}

impl Response<Bytes> {
    /// Deserialize the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// The body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Method;

    #[test]
    fn response_basic() {
        let headers: Headers = [("Content-Type", "application/json")].into_iter().collect();
        let response = Response::new(200, headers, Bytes::from(r#"{"id":1}"#));

        assert_eq!(response.status(), 200);
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert!(response.is_success());
        assert!(!response.is_client_error());
        assert!(response.request().is_none());
    }

    #[test]
    fn response_status_checks() {
        assert!(Response::new(404, Headers::new(), Bytes::new()).is_client_error());
        assert!(Response::new(503, Headers::new(), Bytes::new()).is_server_error());
        assert!(!Response::new(302, Headers::new(), Bytes::new()).is_success());
    }

    #[test]
    fn response_json_and_text() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Dog {
            message: String,
        }

        let response = Response::new(200, Headers::new(), Bytes::from(r#"{"message":"woof"}"#));
        let dog: Dog = response.json().expect("deserialize");
        assert_eq!(dog.message, "woof");
        assert_eq!(response.text_lossy(), r#"{"message":"woof"}"#);
    }

    #[test]
    fn response_carries_request_head() {
        let head = RequestHead {
            method: Method::Get,
            url: url::Url::parse("http://localhost/ping").expect("url"),
            headers: Headers::new(),
        };
        let response = Response::new(204, Headers::new(), Bytes::new()).with_request(head.clone());
        assert_eq!(response.request(), Some(&head));
    }
}
