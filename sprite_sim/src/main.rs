//! sprite_sim - Headless driver that plays a seeded session against sprite_core

mod session;

use clap::Parser;
use session::{SessionError, SessionSummary};

/// Play a seeded sprite session and print what happened
#[derive(Parser)]
#[command(name = "sprite_sim")]
#[command(about = "Walk a dungeon floor, battle, capture and fuse", long_about = None)]
#[command(version)]
struct Cli {
    /// RNG seed; the same seed replays the same session
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Dungeon floor to walk
    #[arg(long, default_value_t = 1)]
    floor: u32,

    /// Stage challenges to take on after the floor
    #[arg(long, default_value_t = 5)]
    battles: u32,

    /// Template id of the starting creature
    #[arg(long, default_value = "fire_fox")]
    starter: String,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn print_summary(summary: &SessionSummary) {
    println!("{}", "=".repeat(60));
    println!("  Floor {} - {} rooms visited", summary.floor, summary.rooms_visited);
    println!("{}", "=".repeat(60));
    println!(
        "  Battles: {} ({} won, {} lost, {} stalemates, {:.1}% win rate)",
        summary.battles(),
        summary.battles_won,
        summary.battles_lost,
        summary.stalemates,
        summary.win_rate()
    );
    println!("  Captures: {}", summary.captures);
    println!("  Exp gained: {} ({} level-ups)", summary.exp_gained, summary.level_ups);
    println!("  Gold: {}", summary.gold);
    println!("  Leader: {} (Lv {})", summary.leader, summary.leader_level);
    if !summary.stages_cleared.is_empty() {
        println!("  Stages cleared: {}", summary.stages_cleared.join(", "));
    }
    println!("  Party: {}", summary.party.join(", "));
    match &summary.fusion {
        Some(name) => println!("  Fused: {}", name),
        None => println!("  Fused: nothing (fewer than two captures)"),
    }
}

fn main() -> Result<(), SessionError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!(seed = cli.seed, floor = cli.floor, battles = cli.battles, "starting session");

    let summary = session::run(cli.seed, &cli.starter, cli.floor, cli.battles)?;

    if cli.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(err) => tracing::warn!("failed to serialize summary: {}", err),
        }
    } else {
        print_summary(&summary);
    }
    Ok(())
}
