//! Accounts command - list the session's bank accounts

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output;

pub async fn run(key: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let accounts = ctx.session_service.list_accounts(key).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&accounts)?);
        return Ok(());
    }

    if accounts.is_empty() {
        output::info("No accounts visible under this session");
        return Ok(());
    }

    println!("{}", "Bank Accounts".bold());
    println!();

    let mut table = output::create_table();
    table.set_header(vec!["Name", "Number", "Branch", "Currency", "Balance"]);
    for account in &accounts {
        table.add_row(vec![
            account.name.clone(),
            account.number.clone(),
            account.branch.clone().unwrap_or_default(),
            account.currency.clone(),
            account.balance.to_string(),
        ]);
    }
    println!("{}", table);

    Ok(())
}
