use anyhow::{Context, Result};
use cave_autopilot::{ExplorerBot, ExplorerConfig, Observation};
use clap::Parser;
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[command(name = "cave-autopilot")]
#[command(about = "Cave exploration agent: JSON observations in, N/S/E/W moves out")]
struct Cli {
    /// Seed for the wander fallback RNG; omit for a fresh seed per run
    #[arg(long)]
    seed: Option<u64>,
    /// Capacity of the recent-position ring
    #[arg(long, default_value_t = 20)]
    recent_window: usize,
    /// Spread of the gem-signal field, in cells
    #[arg(long, default_value_t = 3.0)]
    sigma: f64,
}

fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout carries only move tokens.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = ExplorerConfig {
        recent_window: cli.recent_window,
        sigma: cli.sigma,
    };
    let mut bot = match cli.seed {
        Some(seed) => ExplorerBot::with_seed(cfg, seed),
        None => ExplorerBot::new(cfg),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut first_tick = true;

    for (line_no, line) in stdin.lock().lines().enumerate() {
        let line = line.context("failed reading observation from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let obs: Observation = serde_json::from_str(&line)
            .with_context(|| format!("malformed observation on line {}", line_no + 1))?;

        if first_tick {
            if let Some(config) = &obs.config {
                tracing::info!(
                    width = config.width,
                    height = config.height,
                    "cave autopilot started"
                );
            }
            first_tick = false;
        }

        let direction = bot.step(&obs);

        // The game loop reads in lockstep, so every move flushes immediately.
        writeln!(stdout, "{direction}")?;
        stdout.flush()?;
    }

    Ok(())
}
