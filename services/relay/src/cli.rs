use crate::filing::{run_filing, FilingArgs};
use crate::preview::{run_preview, PreviewArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use taxplanner::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "MyTaxPlanners Notification Relay",
    about = "Relay intake and contact submissions to the filing team's inbox",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP relay (default command)
    Serve(ServeArgs),
    /// Render the notification email for a request JSON file
    Preview(PreviewArgs),
    /// Walk the four-step intake form from the command line and submit it
    File(FilingArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Log notifications instead of calling the email provider
    #[arg(long)]
    pub(crate) dry_run: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Preview(args) => run_preview(args),
        Command::File(args) => run_filing(args).await,
    }
}
