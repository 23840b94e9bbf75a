//! Garden Guardians - headless runner
//!
//! Plays one autopilot run with the chosen weapon and prints a summary. A
//! window/renderer front end drives the same [`Session`] API.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use garden_guardians::audio::{AudioManager, LogSink};
use garden_guardians::autopilot::autopilot_intent;
use garden_guardians::consts::SIM_DT;
use garden_guardians::sim::{EnemyKind, PlayerIntent, WeaponKind};
use garden_guardians::{MenuCommand, Session, SessionPhase, Settings, Tuning};

#[derive(Debug, Parser)]
#[command(name = "garden-guardians", version, about = "Defend the garden from waves of pests")]
struct Args {
    /// Disable all sound
    #[arg(long)]
    mute: bool,
    /// Request a fullscreen window (ignored headless)
    #[arg(long)]
    fullscreen: bool,
    /// Weapon to pick from the menu: 1 Seed Blaster, 2 Thorn Fork, 3 Solar Beam
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    weapon: u8,
    /// Run seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
    /// Seconds of game time to simulate
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,
    /// JSON balance override
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Master volume (0.0 - 1.0)
    #[arg(long, default_value_t = 0.8)]
    volume: f32,
    /// Disable particle effects
    #[arg(long)]
    no_particles: bool,
}

fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {}", path.display()))?;
    Tuning::from_json(&json).with_context(|| format!("invalid tuning in {}", path.display()))
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !(args.seconds.is_finite() && args.seconds > 0.0) {
        bail!("--seconds must be a positive number (got {})", args.seconds);
    }

    let settings = Settings {
        mute: args.mute,
        fullscreen: args.fullscreen,
        master_volume: args.volume,
        particles: !args.no_particles,
        ..Default::default()
    };
    settings.validate().context("invalid settings")?;
    if settings.fullscreen {
        log::info!("Fullscreen requested; no window in headless mode");
    }

    let tuning = load_tuning(args.tuning.as_ref())?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    let mut session = Session::new(tuning, seed).context("failed to start session")?;
    let mut audio = AudioManager::new(LogSink, &settings);

    let weapon = WeaponKind::from_index(usize::from(args.weapon - 1))
        .context("weapon index out of range")?;
    log::info!("{}: {}", weapon.as_str(), weapon.description());
    audio.dispatch(&session.menu(MenuCommand::Choose(weapon)));

    let frames = (args.seconds / SIM_DT).ceil() as u64;
    for frame in 0..frames {
        let intent = session.world().map(autopilot_intent).unwrap_or_else(PlayerIntent::default);
        let events = session.frame(SIM_DT, &intent);
        audio.dispatch(&events);

        if frame % 600 == 0 {
            if let Some(snapshot) = session.snapshot() {
                let particles = if settings.particles { snapshot.particles.len() } else { 0 };
                log::info!(
                    "{} | sproutlings {} root beasts {} sporeshrooms {} | particles {}",
                    snapshot.hud_line(),
                    snapshot.enemy_count(EnemyKind::Sproutling),
                    snapshot.enemy_count(EnemyKind::RootBeast),
                    snapshot.enemy_count(EnemyKind::Sporeshroom),
                    particles
                );
            }
        }
        if session.phase() == SessionPhase::GameOver {
            break;
        }
    }

    let Some(snapshot) = session.snapshot() else {
        bail!("no run was started");
    };
    let stats = snapshot.stats;
    println!("{}", snapshot.hud_line());
    println!(
        "{} after {:.1}s (seed {seed})",
        if snapshot.terminal { "Fallen" } else { "Still standing" },
        snapshot.elapsed
    );
    println!(
        "Shots {} | projectiles {} | enemies spawned {} killed {} escaped {} | damage taken {}",
        stats.shots_fired,
        stats.projectiles_spawned,
        stats.enemies_spawned,
        stats.enemies_killed,
        stats.enemies_despawned,
        stats.damage_taken
    );
    println!("Sounds played: {}", audio.played());
    Ok(())
}
