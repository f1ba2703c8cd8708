//! Trap Runner entry point
//!
//! Headless runner: loads settings, then lets a simple autopilot play a few
//! levels and prints what happened.
//!
//! Usage: `trap-runner [SETTINGS_JSON] [FIRST_LEVEL] [LEVELS]`

use anyhow::{Context, Result};

use trap_runner::sim::{FrameOutcome, FrameSink, InputState, Level, Player, Simulation};
use trap_runner::{AudioGate, CueLog, ProgressBook, Settings, SoundCue};

const DEFAULT_SETTINGS_PATH: &str = "trap-runner.json";
/// Give up on a level after this many frames
const FRAME_BUDGET: u32 = 60 * 60;

/// Logs UI notifications instead of drawing them
#[derive(Default)]
struct ConsoleUi {
    frames: u64,
}

impl FrameSink for ConsoleUi {
    fn frame(&mut self, elapsed_seconds: u32, deaths: u32) {
        self.frames += 1;
        if self.frames % 600 == 0 {
            log::debug!("t={} deaths={}", trap_runner::format_time(elapsed_seconds), deaths);
        }
    }

    fn level_started(&mut self, level: &Level) {
        println!(
            "> {} [{}] reversed={} limit={}",
            level.name,
            level.tier.as_str(),
            level.reverse_controls,
            level.time_limit.map_or("none".to_string(), trap_runner::format_time)
        );
    }

    fn level_complete(&mut self, level_seconds: u32, deaths: u32) {
        println!(
            "  complete in {} with {} deaths",
            trap_runner::format_time(level_seconds),
            deaths
        );
    }

    fn game_complete(&mut self, total_seconds: u32, total_deaths: u32) {
        println!(
            "Game complete! {} total, {} deaths",
            trap_runner::format_time(total_seconds),
            total_deaths
        );
    }

    fn player_died(&mut self) {
        log::trace!("player died");
    }
}

/// Walk toward the door and hop whenever grounded
fn autopilot(player: &Player, level: &Level, frame: u32) -> InputState {
    let door_is_right = level.door.center().x > player.hitbox().center().x;
    // Held buttons are mirrored while controls are reversed
    let press_right = door_is_right != player.controls_reversed;
    let mut input = if press_right {
        InputState::right()
    } else {
        InputState::left()
    };
    if !player.is_jumping && frame % 20 == 0 {
        input = input.with_jump();
    }
    input
}

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match args.get(index) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid argument {}: {:?}", index, raw)),
        None => Ok(default),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Trap Runner (headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let settings_path = args.get(1).map_or(DEFAULT_SETTINGS_PATH, String::as_str);
    let first_level: usize = parse_arg(&args, 2, 1)?;
    let level_runs: usize = parse_arg(&args, 3, 5)?;

    let settings = Settings::load(settings_path)
        .with_context(|| format!("failed to load settings from {}", settings_path))?;

    let sound = AudioGate::from_settings(CueLog::new(), &settings);
    let mut sim = Simulation::new(&settings, sound, ProgressBook::new(), ConsoleUi::default());
    sim.start_at(first_level.saturating_sub(1));

    for _ in 0..level_runs {
        let mut finished = false;
        for frame in 0..FRAME_BUDGET {
            let input = autopilot(sim.player(), sim.level(), frame);
            if let FrameOutcome::LevelComplete { .. } = sim.step(&input) {
                finished = true;
                break;
            }
        }
        if !finished {
            println!("  gave up after {} deaths", sim.player().deaths);
        }
        if !sim.next_level() {
            break;
        }
    }

    let progress = sim.progress();
    println!(
        "Run: {} in {}, {} deaths, {} levels completed ({} perfect)",
        sim.level().name,
        trap_runner::format_time(sim.run_seconds()),
        sim.run_deaths(),
        progress.completed_count(),
        progress.perfect_levels()
    );
    let cues = sim.sound().inner();
    println!(
        "Sound cues: {} jump, {} death, {} trap, {} complete",
        cues.count(SoundCue::Jump),
        cues.count(SoundCue::Death),
        cues.count(SoundCue::Trap),
        cues.count(SoundCue::Complete)
    );

    Ok(())
}
