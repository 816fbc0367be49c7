//! Flappy - headless demo runner
//!
//! Plays autopilot sessions against procedural sprites, logs what happens
//! and prints the resulting high-score table as JSON.

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;

use flappy::platform::{AlphaMask, FramePacer, HeadlessRenderer, LogSound, ScriptedInput};
use flappy::renderer::SpriteSet;
use flappy::{CollisionMode, Game, Settings, StepOutcome};

#[derive(Parser, Debug)]
#[command(about = "Run autopilot sessions of the flappy core without a window")]
struct Args {
    /// settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// sessions to play before exiting
    #[arg(long, default_value_t = 3)]
    sessions: u32,

    /// fixed RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// collision strategy: bbox or pixel
    #[arg(long)]
    collision: Option<String>,

    /// pace ticks at the configured frame rate instead of running flat out
    #[arg(long, default_value_t = false)]
    realtime: bool,

    /// give up after this many ticks
    #[arg(long, default_value_t = 200_000)]
    max_ticks: u64,
}

fn demo_sprites(trail: bool) -> SpriteSet<AlphaMask> {
    // Welcome banner: opaque frame with a clear middle
    let message = AlphaMask::from_fn(150, 150, |x, y| {
        let edge = x < 8 || y < 8 || x >= 142 || y >= 142;
        if edge { u8::MAX } else { 0 }
    });

    SpriteSet {
        player: AlphaMask::disc(35, 35),
        upper_barrier: AlphaMask::solid(88, 320),
        lower_barrier: AlphaMask::solid(88, 320),
        ground: AlphaMask::solid(289, 102),
        background_day: AlphaMask::solid(289, 511),
        background_night: AlphaMask::solid(289, 511),
        message,
        digits: std::array::from_fn(|_| AlphaMask::solid(24, 36)),
        trail: trail.then(|| AlphaMask::disc(6, 6)),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(mode) = &args.collision {
        settings.collision =
            CollisionMode::from_str(mode).ok_or_else(|| anyhow!("unknown collision mode `{}`", mode))?;
    }
    settings.autopilot = true;

    log::info!(
        "Flappy demo: {} sessions, {} collision",
        args.sessions,
        settings.collision.as_str()
    );

    let sprites = demo_sprites(settings.motion_trail);
    let mut game = Game::new(
        &settings,
        HeadlessRenderer::new(),
        sprites,
        Box::new(ScriptedInput::idle()),
        Box::new(LogSound),
    )
    .context("starting game")?;

    let shutdown = game.shutdown_handle();
    let mut pacer = FramePacer::new(settings.fps);
    while game.state().sessions_played() < args.sessions {
        if game.state().time_ticks() >= args.max_ticks {
            log::warn!("Stopping after {} ticks", args.max_ticks);
            break;
        }
        if game.step() == StepOutcome::Quit {
            break;
        }
        if args.realtime && !pacer.wait(&shutdown) {
            break;
        }
    }

    log::info!(
        "Played {} sessions in {} ticks ({} frames), best {}",
        game.state().sessions_played(),
        game.state().time_ticks(),
        game.renderer().frames(),
        game.state().high_score()
    );
    println!("{}", serde_json::to_string_pretty(game.state().high_scores())?);
    Ok(())
}
