use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use search_buffers::logging::init_logger;
use search_buffers::{
    Config, Workspace, collect, create_city_buffers, create_state_buffers, search_client,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "search-buffers")]
#[command(
    author,
    version,
    about = "Circular search regions for states and their largest cities",
    long_about = None
)]
struct Cli {
    /// Path to the TOML configuration
    #[arg(short, long, global = true, default_value = "search-buffers.toml")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate city and state buffers into the workspace
    Buffers,
    /// Search every stored buffer and write the collected posts
    Collect,
    /// Generate buffers, then collect posts
    Run,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = Config::from_file(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    let workspace = config
        .open_workspace()
        .context("Failed to open workspace")?;

    match cli.command {
        Commands::Buffers => buffers(&config, &workspace)?,
        Commands::Collect => collect_posts(&config, &workspace)?,
        Commands::Run => {
            buffers(&config, &workspace)?;
            collect_posts(&config, &workspace)?;
        }
    }

    Ok(())
}

fn buffers(config: &Config, workspace: &Workspace) -> Result<()> {
    let cities = create_city_buffers(config, workspace).context("City buffer generation failed")?;

    let states =
        create_state_buffers(config, workspace).context("State buffer generation failed")?;

    info!(
        "{} city and {} state buffers in {} ({} records skipped)",
        cities.specs.len(),
        states.specs.len(),
        workspace.path().display(),
        cities.rejected.len() + states.rejected.len()
    );
    Ok(())
}

fn collect_posts(config: &Config, workspace: &Workspace) -> Result<()> {
    let client = search_client(config.search()?).context("Failed to build search client")?;

    let start = Instant::now();
    let (report, path) = collect(config, workspace, &client).context("Post collection failed")?;
    let minutes = start.elapsed().as_secs_f64() / 60.0;

    let failed: Vec<&str> = report.failed().map(|o| o.name.as_str()).collect();
    if !failed.is_empty() {
        warn!("Regions without posts: {}", failed.join(", "));
    }

    info!(
        "Wrote {} posts to {} in {:.2} minutes ({} of {} regions failed)",
        report.total_posts(),
        path.display(),
        minutes,
        report.failed().count(),
        report.outcomes.len()
    );
    Ok(())
}
