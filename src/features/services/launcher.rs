//! Browser/media launch and system shutdown
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: URLs open through the `open` crate; announced shutdown delay matches the platform command

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Upper bound for the shutdown command to return
const SHUTDOWN_COMMAND_TIMEOUT: Duration = Duration::from_secs(15);

/// Seconds of grace the OS shutdown command is given
///
/// Unix `shutdown` only takes whole minutes.
#[cfg(windows)]
pub const SHUTDOWN_DELAY_SECS: u64 = 10;
#[cfg(not(windows))]
pub const SHUTDOWN_DELAY_SECS: u64 = 60;

#[async_trait]
pub trait Launcher: Send + Sync {
    /// Open a URL in the default browser (also used for media playback)
    async fn open_url(&self, url: &str) -> Result<()>;

    /// Ask the operating system to power off
    async fn shutdown_system(&self) -> Result<()>;
}

/// Opens URLs with the desktop's default handler and powers off via `shutdown`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl SystemLauncher {
    fn shutdown_command() -> (&'static str, Vec<String>) {
        if cfg!(windows) {
            (
                "shutdown",
                vec!["/s".into(), "/t".into(), SHUTDOWN_DELAY_SECS.to_string()],
            )
        } else {
            (
                "shutdown",
                vec!["-h".into(), format!("+{}", SHUTDOWN_DELAY_SECS.div_ceil(60))],
            )
        }
    }
}

#[async_trait]
impl Launcher for SystemLauncher {
    async fn open_url(&self, url: &str) -> Result<()> {
        info!("Opening {url}");
        let target = url.to_string();
        tokio::task::spawn_blocking(move || open::that(&target))
            .await
            .context("URL opener task failed")?
            .with_context(|| format!("Failed to open {url}"))
    }

    async fn shutdown_system(&self) -> Result<()> {
        let (program, args) = Self::shutdown_command();
        info!("Requesting system shutdown via {program} {args:?}");

        let mut cmd = Command::new(program);
        cmd.args(&args)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true);

        let output = timeout(SHUTDOWN_COMMAND_TIMEOUT, cmd.output())
            .await
            .map_err(|_| {
                anyhow::anyhow!(
                    "{program} timed out after {}s",
                    SHUTDOWN_COMMAND_TIMEOUT.as_secs()
                )
            })??;

        if output.status.success() {
            Ok(())
        } else {
            Err(anyhow::anyhow!(
                "{program} exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_command_uses_announced_delay() {
        let (program, args) = SystemLauncher::shutdown_command();
        assert_eq!(program, "shutdown");

        if cfg!(windows) {
            assert_eq!(args.last(), Some(&SHUTDOWN_DELAY_SECS.to_string()));
        } else {
            // Whole minutes, and exactly the announced number of seconds
            assert_eq!(SHUTDOWN_DELAY_SECS % 60, 0);
            assert_eq!(args, vec!["-h".to_string(), format!("+{}", SHUTDOWN_DELAY_SECS / 60)]);
        }
    }
}
