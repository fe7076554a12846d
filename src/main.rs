use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use armada_playground::arguments::Arguments;
use armada_playground::chains;
use armada_playground::config::Config;
use armada_playground::logger::{self, LogTag};
use armada_playground::webserver::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let arguments = Arguments::parse();

    let mut config = Config::load_or_default(&arguments.config)?;
    if let Some(host) = arguments.host {
        config.webserver.host = host;
    }
    if let Some(port) = arguments.port {
        config.webserver.port = port;
    }
    if arguments.debug {
        config.general.debug = true;
    }

    logger::set_debug(config.general.debug);
    logger::header("API server");
    logger::log(
        LogTag::Config,
        "LOADED",
        &format!("config from {}", arguments.config.display()),
    );
    let supported = chains::available_chains()
        .iter()
        .map(|c| format!("{} ({})", c.name, c.id))
        .collect::<Vec<_>>()
        .join(", ");
    logger::log(LogTag::System, "CHAINS", &supported);
    if config.sdk.api_key.is_none() {
        logger::warn(
            LogTag::Config,
            "no SDK API key configured, upstream calls may be rejected",
        );
    }

    ctrlc::set_handler(|| {
        logger::log(LogTag::System, "SIGNAL", "interrupt received, stopping");
        webserver::shutdown();
    })?;

    let state = AppState::new(Arc::new(config));
    webserver::start_server(state).await
}
