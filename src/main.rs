//! Bounce Barrage entry point
//!
//! Runs the simulation headless under the demo pilot and reports a summary.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use bounce_barrage::{QualityPreset, Settings};
use bounce_barrage::consts::FRAME_MS;
use bounce_barrage::pilot::DemoPilot;
use bounce_barrage::sim::{Achievement, GamePhase, GameState, tick};

#[derive(Parser, Debug)]
#[command(name = "bounce-barrage")]
#[command(about = "Run a seeded Bounce Barrage session under the demo pilot")]
struct Args {
    /// Run seed
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Maximum number of ticks to simulate
    #[arg(long, default_value_t = 18_000)]
    ticks: u64,
    /// Settings JSON file (missing fields keep their defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Particle quality preset (low, medium, high); overrides the config file
    #[arg(long, value_parser = parse_quality)]
    quality: Option<QualityPreset>,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    outcome: &'static str,
    stage: u8,
    score: u64,
    lives: u8,
    max_combo: u32,
    total_kills: u32,
    bosses_defeated: u32,
    achievements: Vec<Achievement>,
}

fn parse_quality(s: &str) -> Result<QualityPreset, String> {
    QualityPreset::from_str(s).ok_or_else(|| format!("unknown quality preset '{s}'"))
}

fn outcome(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::AllClear => "all-clear",
        GamePhase::GameOver => "game-over",
        _ => "time-limit",
    }
}

fn run(state: &mut GameState, max_ticks: u64) {
    let pilot = DemoPilot::default();
    while state.is_running() && state.time_ticks < max_ticks {
        let input = pilot.next_input(state);
        tick(state, &input, FRAME_MS);
        for event in &state.events {
            log::trace!("tick {}: {:?}", state.time_ticks, event);
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.ticks == 0 {
        bail!("--ticks must be > 0");
    }

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(quality) = args.quality {
        settings.quality = quality;
    }

    log::info!("Bounce Barrage starting (seed {})", args.seed);
    let mut state = GameState::with_settings(args.seed, settings);
    run(&mut state, args.ticks);

    let summary = RunSummary {
        seed: args.seed,
        ticks: state.time_ticks,
        outcome: outcome(state.phase),
        stage: state.stage,
        score: state.score,
        lives: state.lives,
        max_combo: state.max_combo,
        total_kills: state.tally.total_kills,
        bosses_defeated: state.tally.bosses_defeated,
        achievements: state.achievements.clone(),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&summary).context("serializing run summary")?;
        println!("{json}");
    } else {
        println!("=== RUN SUMMARY ===");
        println!("  Seed:       {}", summary.seed);
        println!("  Ticks:      {}", summary.ticks);
        println!("  Outcome:    {}", summary.outcome);
        println!("  Stage:      {}", summary.stage);
        println!("  Score:      {}", summary.score);
        println!("  Lives:      {}", summary.lives);
        println!("  Max combo:  {}", summary.max_combo);
        println!("  Kills:      {}", summary.total_kills);
        println!("  Bosses:     {}", summary.bosses_defeated);
        for achievement in &summary.achievements {
            println!("  * {} - {}", achievement.name(), achievement.description());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_flag() {
        let args = Args::try_parse_from(["bounce-barrage", "--quality", "LOW"]).unwrap();
        assert_eq!(args.quality, Some(QualityPreset::Low));
        assert!(Args::try_parse_from(["bounce-barrage", "--quality", "ultra"]).is_err());
    }
}
