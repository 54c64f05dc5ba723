//! Prelude module for convenient imports.
//!
//! ```ignore
//! use apigate_core::prelude::*;
//! ```

pub use crate::{
    Error, Headers, HttpClient, Method, Request, RequestBuilder, RequestHead, Response, RestClient,
    Result,
};
