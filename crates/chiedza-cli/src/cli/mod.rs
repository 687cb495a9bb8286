//! CLI entry and dispatch.

use anyhow::{Context, Result};
use chiedza_core::config::{self, paths};
use chiedza_core::logging;
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "chiedza")]
#[command(version)]
#[command(about = "Chiedza MIS staff portal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Skip the login screen and explore with sample data
    #[arg(long)]
    demo: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Launch the portal (default)
    Portal {
        /// Skip the login screen and explore with sample data
        #[arg(long)]
        demo: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Sign in to the remote service and cache the session
    Login {
        /// Staff email address
        #[arg(long)]
        email: String,
        /// Password (prefer the environment variable)
        #[arg(long, env = "CHIEDZA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and clear the cached session
    Logout,

    /// Show the cached session
    Status,

    /// Print a report as a table
    Report {
        #[arg(value_enum, default_value_t = ReportKind::Strategic)]
        kind: ReportKind,
        /// Use sample data instead of the remote service
        #[arg(long)]
        demo: bool,
    },

    /// Manage savings groups
    Groups {
        #[command(subcommand)]
        command: GroupCommands,
    },

    /// Manage loans
    Loans {
        #[command(subcommand)]
        command: LoanCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub(crate) enum ReportKind {
    /// Portfolio metrics and cluster coverage
    Strategic,
    /// Registered savings groups
    Groups,
    /// Loan book
    Loans,
}

#[derive(clap::Subcommand)]
enum GroupCommands {
    /// Register a new savings group
    Add {
        /// Group name
        #[arg(long)]
        name: String,
        /// Cluster zone (Bulawayo, Waterfalls or Bindura)
        #[arg(long)]
        cluster: Option<String>,
        /// Latitude
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,
        /// Longitude
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<String>,
    },
}

#[derive(clap::Subcommand)]
enum LoanCommands {
    /// Record a repayment against a loan
    Repay {
        /// Loan id
        #[arg(long)]
        id: String,
        /// Amount repaid
        #[arg(long, allow_hyphen_values = true)]
        amount: f64,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = match logging::init(&paths::logs_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: file logging disabled: {e:#}");
            None
        }
    };

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

fn load_config() -> Result<config::Config> {
    config::Config::load().context("load config")
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, demo } = cli;

    let Some(command) = command else {
        return commands::portal::run(&load_config()?, demo).await;
    };

    match command {
        Commands::Portal { demo: sub_demo } => {
            commands::portal::run(&load_config()?, demo || sub_demo).await
        }

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },

        Commands::Login { email, password } => {
            commands::auth::login(&load_config()?, &email, password.as_deref()).await
        }
        Commands::Logout => commands::auth::logout(&load_config()?).await,
        Commands::Status => commands::auth::status(&load_config()?).await,

        Commands::Report {
            kind,
            demo: sub_demo,
        } => commands::report::run(&load_config()?, kind, demo || sub_demo).await,

        Commands::Groups { command } => match command {
            GroupCommands::Add {
                name,
                cluster,
                lat,
                lng,
            } => {
                commands::records::add_group(
                    &load_config()?,
                    &name,
                    cluster.as_deref(),
                    lat.as_deref().unwrap_or(""),
                    lng.as_deref().unwrap_or(""),
                )
                .await
            }
        },

        Commands::Loans { command } => match command {
            LoanCommands::Repay { id, amount } => {
                commands::records::repay_loan(&load_config()?, &id, amount).await
            }
        },
    }
}
