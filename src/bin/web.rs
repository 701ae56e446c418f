use anyhow::Result;
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;

use concierge::core::Config;
use concierge::features::services::Services;
use concierge::features::speech::{ConsoleVoice, NoInputListener};
use concierge::{server, Agent};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let mut config = Config::resolve()?;
    // Requests are answered in text; nothing is spoken server-side
    config.silent_mode = true;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting {} web boundary...", config.assistant_name);

    let bind_addr = config.bind_addr.clone();
    let voice = Arc::new(ConsoleVoice::new(config.assistant_name.clone()));
    let services = Services::from_config(&config)?;

    let agent = Arc::new(Agent::start(config, voice, Arc::new(NoInputListener), services).await);

    let result = server::serve(agent.clone(), &bind_addr).await;
    agent.shutdown().await;
    result
}
