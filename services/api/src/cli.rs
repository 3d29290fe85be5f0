use crate::demo::{run_demo, run_directory_search, DemoArgs, SearchArgs};
use crate::server;
use aisle::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Aisle Marketplace",
    about = "Browse and serve the Aisle wedding vendor marketplace from the command line",
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
    /// Query the vendor directory without starting a server
    Directory {
        #[command(subcommand)]
        command: DirectoryCommand,
    },
    /// Run an end-to-end CLI demo covering browsing and navigation gating
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum DirectoryCommand {
    /// Filter and paginate the catalog, printing one results page
    Search(SearchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// CSV catalog to serve instead of the bundled sample
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
        Command::Directory {
            command: DirectoryCommand::Search(args),
        } => run_directory_search(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
