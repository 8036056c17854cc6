//! Login command - start a session against a provider

use anyhow::Result;
use colored::Colorize;
use puente_core::{LoginRequest, NextStep};

use super::get_context;
use crate::output;

pub async fn run(
    provider: String,
    username: String,
    password: String,
    login_type: Option<String>,
    otp: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;

    let session = ctx
        .session_service
        .login(LoginRequest {
            provider,
            username,
            password,
            login_type,
            otp,
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    match session.requires {
        NextStep::Nothing => {
            output::success("Logged in");
            println!("Session key: {}", session.key.bold());
        }
        NextStep::SpecifyClient => {
            output::info("Login pending: select a client to continue");
            println!("Session key: {}", session.key.bold());
            if let Some(clients) = &session.clients {
                let mut table = output::create_table();
                table.set_header(vec!["Client ID", "Name"]);
                for client in clients {
                    table.add_row(vec![client.id.clone(), client.name.clone()]);
                }
                println!("{}", table);
                println!("Run: puente clients --key <key> --select <client-id>");
            }
        }
        NextStep::OtpCode => {
            output::info("Login pending: an OTP code is required");
            println!("Session key: {}", session.key.bold());
            println!("Re-run login with --otp <code>");
        }
        NextStep::AnswerQuestion => {
            output::info("Login pending: the provider asked a security question");
            println!("Session key: {}", session.key.bold());
        }
    }

    Ok(())
}
