use anyhow::Context;
use tessera::config::LogConfig;
use tessera::{logging, DesktopPlatform, EngineConfig, Game};

mod scene;

const CONFIG_PATH: &str = "game.toml";

fn main() -> anyhow::Result<()> {
    // Installed before anything else logs; RUST_LOG overrides the default filter.
    logging::init(&LogConfig::default());

    let config = EngineConfig::load_or_default(CONFIG_PATH)
        .with_context(|| format!("loading {CONFIG_PATH}"))?;

    let mut game = Game::with_config(DesktopPlatform::new(), config);
    game.init(scene::populate)?;
    game.run().context("game loop failed")?;

    log::info!("bye");
    Ok(())
}
