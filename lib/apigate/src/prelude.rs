//! Prelude module for convenient imports.
//!
//! ```ignore
//! use apigate::prelude::*;
//! ```

pub use crate::middleware::{Gateway, GatewayConfig, HeaderGateway, ProfileStore};
pub use crate::{
    ApiClient, ApiService, Call, Callback, ClientConfig, Endpoint, Error, FactoryOptions,
    HttpClient, HyperClient, LogSink, Method, Request, Response, RestClient, Result,
    perform_api_call,
};
