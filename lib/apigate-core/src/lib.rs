//! Core types and traits for the apigate HTTP client.
//!
//! This crate provides the foundational types used by apigate:
//! - [`Method`] - HTTP method enum
//! - [`Request`], [`RequestBuilder`] and [`RequestHead`] - HTTP request types
//! - [`Response`] - HTTP response type, carrying the request that was sent
//! - [`Headers`] - Ordered header multimap
//! - [`Error`] and [`Result`] - Error handling
//! - [`HttpClient`] - Core client trait for HTTP execution
//! - [`RestClient`] - Client trait with base URL support, used by typed APIs
//! - [`trace`] - Human-readable request/response trace formatting

mod client;
mod error;
mod headers;
mod method;
pub mod prelude;
mod request;
mod response;
pub mod trace;

pub use client::{HttpClient, RestClient};
pub use error::{Error, Result};
pub use headers::Headers;
pub use method::Method;
pub use request::{Request, RequestBuilder, RequestHead};
pub use response::Response;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
