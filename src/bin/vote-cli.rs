use std::time::Duration;

use clap::{Parser, Subcommand};
use vote_sdk::{TeamCount, VoteClient};

#[derive(Parser)]
#[command(name = "vote-cli")]
#[command(about = "Command-line client for the ashes-vote service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the service is up
    Health,
    /// Cast one vote for a team
    Vote { team: String },
    /// Print current counts
    Counts,
    /// Refresh counts until interrupted
    Watch {
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = VoteClient::new(&cli.url);

    match cli.command {
        Commands::Health => {
            println!("{}", client.health().await?);
        }
        Commands::Vote { team } => {
            client.cast_vote(&team).await?;
            println!("Vote recorded for {}", team);
            print_counts(&client.counts().await?);
        }
        Commands::Counts => {
            print_counts(&client.counts().await?);
        }
        Commands::Watch { interval_ms } => {
            let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match client.counts().await {
                            Ok(counts) => print_counts(&counts),
                            Err(e) => eprintln!("Error: {}", e),
                        }
                    }
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
        }
    }

    Ok(())
}

fn print_counts(counts: &[TeamCount]) {
    let width = counts.iter().map(|c| c.team.len()).max().unwrap_or(0);
    for c in counts {
        println!("{:<width$}  {}", c.team, c.count, width = width);
    }
    println!();
}
