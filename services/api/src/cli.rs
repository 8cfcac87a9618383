use crate::report::{run_eligibility, run_search, EligibilityArgs, SearchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lagos_rent::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "LagosRent",
    about = "Serve and query the LagosRent listing catalog from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Filter, sort and page a listing export
    Search(SearchArgs),
    /// Report whether an agent profile may publish listings right now
    Eligibility(EligibilityArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Listing export (.json or .csv) used to seed the catalog
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Search(args) => run_search(args),
        Command::Eligibility(args) => run_eligibility(args),
    }
}
