use crate::commands::{run_hash_password, run_score, HashPasswordArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use consultancy::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "consultancy-api",
    about = "Run the consultancy site backend and its operator tools",
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
    /// Score a hypothetical lead and print the per-axis breakdown
    Score(ScoreArgs),
    /// Print a bcrypt hash suitable for seeding an admin account
    HashPassword(HashPasswordArgs),
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
        Command::Score(args) => run_score(args),
        Command::HashPassword(args) => run_hash_password(args),
    }
}
