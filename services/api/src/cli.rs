use crate::report::{run_rankings_report, RankingsReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hackathon_admissions::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Hackathon Admissions",
    about = "Rank reviewed applicants and allocate admissions from the command line or over HTTP",
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
    /// Rank a roster CSV, allocate seats, and print the outcome
    Rankings(RankingsReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rankings(args) => run_rankings_report(args),
    }
}
