//! The typed API exercised by the sample.

use crate::call::{Call, Endpoint};
use crate::{RestClient, Result};

/// Gateway load-test endpoint guarded by the casbin authorization plugin.
pub const AUTH_CASBIN_SUCCESS: Endpoint =
    Endpoint::get("load-test/api/auth-casbin-success-plugin-test");

/// REST API served behind the API gateway.
///
/// Implemented for every [`RestClient`]; responses are returned raw.
pub trait ApiService {
    /// Client the calls are bound to.
    type Client: RestClient;

    /// `GET load-test/api/auth-casbin-success-plugin-test`.
    fn auth_casbin_success_plugin_test(&self) -> Result<Call<Self::Client>>;
}

impl<C: RestClient> ApiService for C {
    type Client = C;

    fn auth_casbin_success_plugin_test(&self) -> Result<Call<C>> {
        Call::prepare(self, &AUTH_CASBIN_SUCCESS)
    }
}
