pub mod config;
pub mod logging;
pub mod mode;
pub mod model;
pub mod model_gateway;
pub mod prompt;
pub mod providers;
pub mod repl;
pub mod tutor;

use anyhow::{Context, Result};
use reqwest::Client;
use std::env;
use std::io;
use std::time::Duration;
use tracing::info;

use config::Config;
use model_gateway::HostModelGateway;
use repl::{print_reply, run_repl};
use tutor::Tutor;

fn build_client(cfg: &Config) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = cfg.model_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().context("Failed to initialize HTTP client")
}

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let _log_guard = logging::init();

    let cfg = Config::from_env()?;
    info!(
        model = %cfg.model,
        model_base_url = %cfg.model_base_url,
        model_timeout_secs = ?cfg.model_timeout_secs,
        "loaded runtime configuration"
    );
    let client = build_client(&cfg)?;
    let tutor = Tutor::new(HostModelGateway::new(&client, &cfg));

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        run_repl(&tutor).await
    } else {
        let prompt = args.join(" ");
        let reply = tutor.ask(&prompt).await?;
        print_reply(&mut io::stdout().lock(), &reply)
    }
}
