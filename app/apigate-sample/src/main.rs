//! Gateway sample
//!
//! Issues the casbin plugin test call through the gateway client and prints
//! the trace the way the text area of the app shows it.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use apigate::middleware::{GatewayConfig, HeaderGateway, ProfileStore};
use apigate::{ApiService, FactoryOptions, RestClient, perform_api_call};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod log_box;

use log_box::LogBox;

const DEFAULT_BASE_URL: &str = "http://192.168.61.103:9080/";

/// Call the gateway test endpoint and show the request trace.
#[derive(Parser, Debug)]
#[command(name = "apigate-sample", version, about)]
struct Cli {
    /// Gateway base URL, must end with '/'
    #[arg(long, env = "APIGATE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// JSON file with extra gateway headers and an optional bearer token
    #[arg(long)]
    gateway_config: Option<PathBuf>,

    /// Record exchanges in the profiler (default in debug builds)
    #[arg(long, overrides_with = "no_profile")]
    profile: bool,

    /// Disable the profiler
    #[arg(long, overrides_with = "profile")]
    no_profile: bool,

    /// Log request and response headers
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn profiler_enabled(&self) -> bool {
        if self.no_profile {
            false
        } else {
            self.profile || cfg!(debug_assertions)
        }
    }

    fn gateway(&self) -> apigate::Result<HeaderGateway> {
        let config = match &self.gateway_config {
            Some(path) => GatewayConfig::from_file(path)?,
            None => GatewayConfig::default(),
        };
        HeaderGateway::new(config)
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("apigate=info")),
        )
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    let profiler = cli.profiler_enabled().then(ProfileStore::default);

    let mut options = FactoryOptions::default()
        .client_header("Client-Header-Name1", "xxxxxx")
        .client_header("Client-Header-Name2", "yyyyyy")
        .gateway(cli.gateway()?)
        .debug_logging(cli.verbose)
        .without_profiler();
    if let Some(store) = &profiler {
        options = options.profiler(store.clone());
    }

    let api = apigate::factory::create(&cli.base_url, options)?;
    info!(base_url = %api.base_url(), "client ready");

    let log_box = LogBox::echoing();
    println!("{}\n", log_box.render());

    let call = api.auth_casbin_success_plugin_test()?;
    perform_api_call(call, log_box).await?;

    if let Some(store) = profiler {
        println!("Profiler:\n{}", store.report());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use assert2::check;
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn last_profile_flag_wins() {
        let cli = Cli::parse_from(["apigate-sample", "--profile", "--no-profile"]);
        check!(!cli.profiler_enabled());

        let cli = Cli::parse_from(["apigate-sample", "--no-profile", "--profile"]);
        check!(cli.profiler_enabled());

        let cli = Cli::parse_from(["apigate-sample", "--profile"]);
        check!(cli.profiler_enabled());
    }

    #[test]
    fn default_base_url() {
        let cli = Cli::parse_from(["apigate-sample"]);
        check!(cli.base_url == DEFAULT_BASE_URL);
    }
}
