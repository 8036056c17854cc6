//! Credential command - encrypt and decrypt stored credentials

use std::collections::HashMap;

use anyhow::Result;
use clap::Subcommand;
use puente_core::Credentials;

use super::get_context;
use crate::output;

#[derive(Subcommand)]
pub enum CredentialCommands {
    /// Encrypt credentials into the stored blob format
    Encrypt {
        /// Provider name
        #[arg(long)]
        provider: String,
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Extra auth fields as name=value pairs
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },

    /// Decrypt a stored blob back into credentials
    Decrypt {
        /// Encrypted blob
        blob: String,
        /// Output as JSON (includes the password)
        #[arg(long)]
        json: bool,
    },
}

fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))
}

pub fn run(command: CredentialCommands) -> Result<()> {
    let ctx = get_context()?;

    match command {
        CredentialCommands::Encrypt {
            provider,
            username,
            password,
            fields,
        } => {
            let credentials = Credentials {
                provider,
                username,
                password,
                extra_fields: fields.into_iter().collect::<HashMap<_, _>>(),
            };
            let blob = ctx.credential_service.encrypt_credentials(&credentials)?;
            println!("{}", blob);
        }
        CredentialCommands::Decrypt { blob, json } => {
            let credentials = ctx.credential_service.decrypt_credentials(&blob)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&credentials)?);
            } else {
                println!("Provider: {}", credentials.provider);
                println!("Username: {}", credentials.username);
                // The password is only shown on explicit request
                output::info("Password withheld; use --json to include it");
                for (name, value) in &credentials.extra_fields {
                    println!("{}: {}", name, value);
                }
            }
        }
    }

    Ok(())
}
