use std::path::PathBuf;

use clap::{Parser, Subcommand};
use time::Duration;

use paperless_server::{models::Session, spawn_service, Database, ServiceConfig};

#[derive(Parser)]
#[command(name = "paperless", about = "Personal notes and files vault")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API and gateway servers
    Serve {
        /// Path to a TOML config file; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Mint a session token for a user (development helper)
    Session {
        /// Stable user id the session resolves to
        #[arg(long)]
        user_id: String,

        /// Session lifetime in hours; never expires when omitted
        #[arg(long)]
        ttl_hours: Option<f64>,

        /// Path to a TOML config file, used to locate the database
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the version
    Version,
}

impl Command {
    pub async fn execute(self) -> Result<String, CliError> {
        match self {
            Command::Serve { config } => {
                let config = ServiceConfig::load(config.as_deref())?;
                spawn_service(&config).await;
                Ok(String::new())
            }
            Command::Session {
                user_id,
                ttl_hours,
                config,
            } => {
                let config = ServiceConfig::load(config.as_deref())?;
                let path = config.sqlite_path.ok_or(CliError::NoDatabase)?;
                let url = url::Url::parse(&format!("sqlite://{}", path.display()))
                    .map_err(|_| CliError::NoDatabase)?;
                let db = Database::connect(&url).await?;

                let ttl = ttl_hours.map(|h| Duration::seconds_f64(h * 3600.0));
                let session = Session::create(&user_id, ttl, &db).await?;
                Ok(session.token)
            }
            Command::Version => Ok(env!("CARGO_PKG_VERSION").to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(#[from] paperless_server::service_config::ConfigError),

    #[error("sessions require a persistent database; set sqlite_path in the config")]
    NoDatabase,

    #[error("database error: {0}")]
    DatabaseSetup(#[from] paperless_server::DatabaseSetupError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
