//! spire-rl-probe: observe a running bridge
//!
//! Connects to a bridge, logs a one-line summary of every snapshot, and
//! requests a restart when a run ends. Useful for checking that a game
//! host is exporting state before pointing a training harness at it.

use anyhow::Result;
use spire_rl_client::{BridgeClient, ClientConfig};
use spire_rl_core::{Command, ScreenType};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let mut config = ClientConfig::default();
    let mut args = std::env::args().skip(1);
    if let Some(host) = args.next() {
        config.host = host;
    }
    if let Some(port) = args.next() {
        config.port = port.parse()?;
    }

    let mut client = BridgeClient::connect_with(config).await?;
    info!("connected, waiting for snapshots");

    loop {
        let snapshot = client.recv_snapshot().await?;
        match &snapshot.player {
            Some(player) => info!(
                screen = ?snapshot.screen_type,
                floor = player.floor,
                hp = format!("{}/{}", player.hp, player.max_hp),
                gold = player.gold,
                monsters = snapshot.monsters.iter().filter(|m| !m.is_gone).count(),
                hand = snapshot.hand.len(),
                "snapshot"
            ),
            None => info!(screen = ?snapshot.screen_type, "snapshot (no player)"),
        }

        if matches!(
            snapshot.screen_type,
            ScreenType::GameOver | ScreenType::Victory
        ) {
            if let Some(outcome) = &snapshot.game_outcome {
                info!(
                    victory = outcome.victory,
                    score = outcome.score,
                    "run ended, requesting restart"
                );
            }
            client.send_command(&Command::Reset).await?;
        }
    }
}
