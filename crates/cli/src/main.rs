use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::roster::RosterTable;
use commands::users::UsersCommand;

#[derive(Parser)]
#[command(name = "campus", about = "School roster data and identity account tools", version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "campus.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Directory holding the roster CSV exports
        #[arg(long, default_value = "/var/lib/campus/data")]
        data_dir: String,
        /// Identity project ID; enables the `users` commands
        #[arg(long)]
        project_id: Option<String>,
    },
    /// Print roster mappings read from the CSV exports
    Roster {
        #[arg(value_enum)]
        table: RosterTable,
        /// Print as a JSON object instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },
    /// Manage identity accounts, claims, and tokens
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            data_dir,
            project_id,
        } => {
            commands::init::run(&cli.config, &data_dir, project_id.as_deref())?;
        }
        Commands::Roster { table, json } => {
            commands::roster::run(&cli.config, table, json)?;
        }
        Commands::Users { command } => {
            commands::users::run(&cli.config, command).await?;
        }
    }

    Ok(())
}
