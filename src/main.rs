use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use cnb_daily::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for cnb_daily::AppCommand {
    fn from(cmd: Commands) -> cnb_daily::AppCommand {
        match cmd {
            Commands::Serve => cnb_daily::AppCommand::Serve,
            Commands::Fetch { json } => cnb_daily::AppCommand::Fetch { json },
            Commands::Convert {
                amount,
                code,
                reverse,
            } => cnb_daily::AppCommand::Convert {
                amount,
                code,
                reverse,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Serve the daily rates as JSON over HTTP
    Serve,
    /// Fetch today's fixing and print it
    Fetch {
        /// Print the JSON served by the API instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Convert an amount of CZK into another currency
    Convert {
        amount: f64,
        /// Currency code, e.g. USD
        code: String,
        /// Convert from the given currency into CZK instead
        #[arg(short, long)]
        reverse: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => cnb_daily::cli::setup::setup(),
        Some(cmd) => cnb_daily::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
