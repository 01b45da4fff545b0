use clap::{CommandFactory, Parser, Subcommand};
use std::process::ExitCode;
use xconv::core::log::init_logging;
use xconv::core::{ConversionError, CurrencyCode, Language};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Language for labels and messages (en, pt)
    #[arg(short, long, global = true)]
    lang: Option<Language>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for xconv::AppCommand {
    fn from(cmd: Commands) -> xconv::AppCommand {
        match cmd {
            Commands::Convert { amount, from, to } => xconv::AppCommand::Convert {
                amount,
                source: from,
                target: to,
            },
            Commands::Rates => xconv::AppCommand::Rates,
            Commands::Watch => xconv::AppCommand::Watch,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount from one currency to another
    Convert {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Source currency (USD, BRL, GBP, EUR, CAD)
        from: CurrencyCode,
        /// Target currency (USD, BRL, GBP, EUR, CAD)
        to: CurrencyCode,
    },
    /// Display the current exchange rates
    Rates,
    /// Keep refreshing and display rates whenever they change
    Watch,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => xconv::cli::setup::setup(),
        Some(cmd) => xconv::run_command(cmd.into(), cli.config_path.as_deref(), cli.lang).await,
        None => Cli::command().print_help().map_err(Into::into),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        // Already reported to the user in their language.
        Err(e) if e.is::<ConversionError>() => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "Application failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
