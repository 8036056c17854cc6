//! Puente CLI - Banking aggregation from your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{accounts, clients, credential, login, logout, movements, providers};

/// Puente - banking aggregation from your terminal
#[derive(Parser)]
#[command(name = "puente", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported banking providers
    Providers {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log in to a provider and print the session state
    Login {
        /// Provider name (use "test" for the sandbox)
        provider: String,
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Document type, for providers that require it
        #[arg(long = "type")]
        login_type: Option<String>,
        /// One-time password for a pending OTP interaction
        #[arg(long)]
        otp: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List clients reachable under a session
    Clients {
        /// Session key
        #[arg(short, long)]
        key: String,
        /// Client to select (binds the session instead of listing)
        #[arg(long)]
        select: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the session's bank accounts
    Accounts {
        /// Session key
        #[arg(short, long)]
        key: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List movements for one account
    Movements {
        /// Session key
        #[arg(short, long)]
        key: String,
        /// Account number
        #[arg(short, long)]
        account: String,
        /// ISO 4217 currency code
        #[arg(short, long)]
        currency: String,
        /// Range start, dd/mm/yyyy (defaults to 30 days ago)
        #[arg(long)]
        from: Option<String>,
        /// Range end, dd/mm/yyyy (defaults to today)
        #[arg(long)]
        to: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// End a session
    Logout {
        /// Session key
        #[arg(short, long)]
        key: String,
    },

    /// Encrypt or decrypt stored credentials
    Credential {
        #[command(subcommand)]
        command: credential::CredentialCommands,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Providers { json } => providers::run(json).await,
        Commands::Login {
            provider,
            username,
            password,
            login_type,
            otp,
            json,
        } => login::run(provider, username, password, login_type, otp, json).await,
        Commands::Clients { key, select, json } => clients::run(&key, select, json).await,
        Commands::Accounts { key, json } => accounts::run(&key, json).await,
        Commands::Movements {
            key,
            account,
            currency,
            from,
            to,
            json,
        } => movements::run(&key, &account, &currency, from, to, json).await,
        Commands::Logout { key } => logout::run(&key).await,
        Commands::Credential { command } => credential::run(command),
    }
}
