//! AI Simulator CLI - bot-only games run through the engine for strategy
//! evaluation.
//!
//! Each game is a full session driven command by command, so the results
//! reflect the real rules, including stacking, declarations and penalties.

mod metrics;
mod output;
mod simulator;
mod types;

use std::time::Instant;

use clap::Parser;
use engine::config::{GameConfig, MAX_PLAYERS, MIN_PLAYERS};
use engine::domain::Status;
use metrics::build_game_metrics;
use output::OutputWriter;
use simulator::{GameResult, Simulator};
use tracing::{info, warn};
use types::{OutputFormat, Strategy};

#[derive(Parser)]
#[command(name = "ai-simulator")]
#[command(about = "Bot-only game simulator for strategy evaluation")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Number of seats
    #[arg(short, long, default_value = "4")]
    players: usize,

    /// Strategies, assigned to seats in rotation (e.g. heuristic,random)
    #[arg(long, value_delimiter = ',', default_value = "heuristic")]
    strategies: Vec<Strategy>,

    /// Base seed; game N uses seed + N. Random when absent.
    #[arg(long)]
    seed: Option<u64>,

    /// Cards dealt to each seat
    #[arg(long, default_value = "7")]
    hand_size: usize,

    /// Disable draw stacking
    #[arg(long)]
    no_stacking: bool,

    /// Let DrawTwo and WildDrawFour stack on each other
    #[arg(long)]
    cross_kind_stacking: bool,

    /// Give up on a game after this many moves
    #[arg(long, default_value = "10000")]
    max_moves: usize,

    /// Simulated milliseconds per move (drives declaration expiry)
    #[arg(long, default_value = "500")]
    clock_step_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress output files
    #[arg(long)]
    compress: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default, only warnings and errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&args.players) {
        return Err(format!("players must be {MIN_PLAYERS}..={MAX_PLAYERS}").into());
    }
    if args.strategies.is_empty() {
        return Err("at least one strategy is required".into());
    }

    let rules = GameConfig {
        initial_hand_size: args.hand_size,
        draw_stacking_enabled: !args.no_stacking,
        allow_cross_kind_stacking: args.cross_kind_stacking,
        ..GameConfig::from_env()?
    };
    rules.validate()?;

    let strategies: Vec<String> = (0..args.players)
        .map(|seat| args.strategies[seat % args.strategies.len()].name().to_string())
        .collect();
    let seat_names: Vec<&str> = strategies.iter().map(String::as_str).collect();
    let simulator = Simulator::new(&seat_names, rules.clone(), args.max_moves, args.clock_step_ms);

    if args.show_output {
        info!(games = args.games, seats = ?strategies, "Starting AI simulator");
    }

    let mut output_writer =
        OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;

    let base_seed = args.seed.unwrap_or_else(rand::random);
    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        let game_seed = base_seed.wrapping_add(u64::from(game_num));

        match simulator.simulate_game(game_seed) {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_game_metrics(
                    game_num,
                    &strategies,
                    args.games,
                    &rules,
                    &result,
                    duration_ms,
                );
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {}: {}", game_num, e);
                }
                if args.verbose {
                    info!(game = game_num, status = ?result.status, winner = ?result.winner, moves = result.moves, "Game completed");
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} failed: {}", game_num, e);
            }
        }
    }

    let elapsed = start.elapsed();
    let (results_path, csv_path) = output_writer.output_paths();
    let (results_path, csv_path) = (results_path.to_path_buf(), csv_path.to_path_buf());
    output_writer.finish()?;

    if args.show_output {
        info!("Detailed results written to: {}", results_path.display());
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&results, &strategies, errors, elapsed, args.games);
    }

    Ok(())
}

fn print_summary(
    results: &[GameResult],
    strategies: &[String],
    errors: u32,
    elapsed: std::time::Duration,
    total: u32,
) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if results.is_empty() {
        return;
    }
    println!(
        "Average time per game: {:?}",
        elapsed / results.len() as u32
    );

    let unfinished = results
        .iter()
        .filter(|r| r.status == Status::InProgress)
        .count();
    let aborted = results
        .iter()
        .filter(|r| r.status == Status::Aborted)
        .count();
    let avg_moves =
        results.iter().map(|r| r.moves as f64).sum::<f64>() / results.len() as f64;
    println!("Average moves per game: {:.1}", avg_moves);
    if unfinished > 0 || aborted > 0 {
        println!("Unfinished: {}, aborted: {}", unfinished, aborted);
    }

    let seats = strategies.len();
    let mut wins = vec![0u32; seats];
    let mut total_scores = vec![0u64; seats];
    let mut penalties = vec![0u32; seats];
    for result in results {
        if let Some(winner) = result.winner {
            wins[winner] += 1;
        }
        for (seat, score) in result.scores.iter().enumerate() {
            total_scores[seat] += u64::from(*score);
        }
        for (seat, tally) in result.seats.iter().enumerate() {
            penalties[seat] += tally.penalties_expired + tally.penalties_caught;
        }
    }

    println!("\n=== Results by Seat ===");
    for seat in 0..seats {
        let avg_score = total_scores[seat] as f64 / results.len() as f64;
        let win_rate = (wins[seat] as f64 / results.len() as f64) * 100.0;
        println!(
            "Seat {} ({}): avg score={:.1}, wins={} ({:.1}%), penalties={}",
            seat, strategies[seat], avg_score, wins[seat], win_rate, penalties[seat]
        );
    }
}
