use anyhow::Result;
use dotenvy::dotenv;
use log::{info, warn};
use std::sync::Arc;

use concierge::core::Config;
use concierge::features::services::Services;
use concierge::features::speech::{CommandVoice, ConsoleVoice, SpeechOutput, StdinListener};
use concierge::{Agent, VoiceLoop};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::resolve()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting {} voice assistant...", config.assistant_name);

    let voice: Arc<dyn SpeechOutput> = match config.tts_command.as_deref() {
        Some(command) => Arc::new(CommandVoice::from_command_line(
            config.assistant_name.clone(),
            command,
        )?),
        None => Arc::new(ConsoleVoice::new(config.assistant_name.clone())),
    };
    let listener = Arc::new(StdinListener::spawn());
    let services = Services::from_config(&config)?;

    let agent = Arc::new(Agent::start(config, voice, listener, services).await);
    let voice_loop = VoiceLoop::new(agent.clone());

    tokio::select! {
        () = voice_loop.run() => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!("Failed to listen for Ctrl+C: {e}");
            }
            info!("Interrupted");
        }
    }

    agent.shutdown().await;
    info!("👋 Voice assistant stopped");
    Ok(())
}
