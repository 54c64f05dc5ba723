//! HTTP client with a fixed API gateway interceptor chain and request tracing.
//!
//! A client is assembled by [`factory::create`]: a hyper-based [`HyperClient`]
//! whose requests go through logging, caller headers, the API gateway
//! interceptor and, in debug builds, a profiler. Typed APIs such as
//! [`ApiService`] prepare [`Call`]s against it, and [`perform_api_call`] turns a
//! call into a human-readable trace.
//!
//! # Example
//!
//! ```ignore
//! use apigate::prelude::*;
//!
//! let api = apigate::factory::create(
//!     "http://192.168.61.103:9080/",
//!     FactoryOptions::default().client_header("Client-Header-Name1", "xxxxxx"),
//! )?;
//!
//! let call = api.auth_casbin_success_plugin_test()?;
//! perform_api_call(call, |text: String| println!("{text}")).await.ok();
//! ```

mod api;
mod api_client;
pub mod call;
mod client;
mod config;
mod connector;
pub mod factory;
pub mod middleware;
pub mod prelude;
mod runner;

pub use api::{AUTH_CASBIN_SUCCESS, ApiService};
pub use api_client::ApiClient;
pub use call::{Call, Callback, Endpoint};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use factory::FactoryOptions;
pub use runner::{LogSink, perform_api_call};

// Re-export tower for interceptor composition
pub use tower;

// Re-export core types
pub use apigate_core::{
    Error, Headers, HttpClient, Method, Request, RequestBuilder, RequestHead, Response,
    RestClient, Result, trace,
};

// Re-export http types for status codes and headers
pub use apigate_core::{StatusCode, header};

pub use url;
