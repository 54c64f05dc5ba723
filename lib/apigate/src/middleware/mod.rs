//! Tower interceptor layers for the apigate HTTP client.
//!
//! Every interceptor is a Tower [`Layer`](tower::Layer) wrapping a service over
//! `Request<Bytes>` / `Response<Bytes>`. Registered with
//! [`HyperClientBuilder::layer`](crate::HyperClientBuilder::layer), they run in
//! registration order on the way out and in reverse order on the way back.
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//! - [`ClientHeadersLayer`] - Adds fixed caller headers to every request
//! - [`ApiGatewayLayer`] - Runs a [`Gateway`] collaborator on every request
//! - [`ProfilerLayer`] - Records each exchange into a [`ProfileStore`]
//!
//! # Example
//!
//! ```ignore
//! use apigate::HyperClient;
//! use apigate::middleware::{ClientHeadersLayer, LoggingLayer};
//!
//! let client = HyperClient::builder()
//!     .layer(LoggingLayer::new())
//!     .layer(ClientHeadersLayer::new([("Client-Header-Name1", "xxxxxx")]))
//!     .build();
//! ```

mod client_headers;
mod gateway;
mod logging;
mod profiler;

pub use client_headers::{ClientHeaders, ClientHeadersLayer};
pub use gateway::{ApiGateway, ApiGatewayLayer, Gateway, GatewayConfig, HeaderGateway};
pub use logging::{LogLevel, Logging, LoggingLayer};
pub use profiler::{
    DEFAULT_PROFILE_CAPACITY, ProfileEntry, ProfileOutcome, ProfileStore, Profiler, ProfilerLayer,
};
