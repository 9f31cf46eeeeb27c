use clap::Parser;
use std::process;
use swarm_conformity::{EXIT_FATAL, cli::Cli, handle_check};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    match handle_check(&cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(EXIT_FATAL);
        }
    }
}
