use anyhow::Result;
use clap::Parser;
use focal_stats::cli::{Cli, Commands, ScanCommandHandler};

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:?}");
        // Exit here so reads still stuck after a scan deadline do not hold the runtime open
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let handler = ScanCommandHandler::new();

    match cli.command {
        Commands::Scan(args) => handler.handle_scan_command(args).await?,
        Commands::Typical => handler.handle_typical_command()?,
        Commands::Inspect { file } => handler.handle_inspect_command(&file)?,
    }

    Ok(())
}
