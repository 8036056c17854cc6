//! Providers command - list the supported banking providers

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let providers = ctx.catalog_service.get_suppliers().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&providers)?);
        return Ok(());
    }

    if providers.is_empty() {
        output::info("No providers available for the configured country");
        return Ok(());
    }

    println!("{}", "Supported Providers".bold());
    println!();

    let mut table = output::create_table();
    table.set_header(vec!["Provider", "Bank", "Country", "Auth fields", "Accounts", "Movements"]);

    for provider in &providers {
        let auth_fields: Vec<&str> = provider.auth_fields.iter().map(|f| f.name()).collect();
        table.add_row(vec![
            provider.name.clone(),
            provider.bank.name.clone(),
            provider.country.clone(),
            auth_fields.join(", "),
            yes_no(provider.methods.accounts),
            yes_no(provider.methods.account_movements),
        ]);
    }

    println!("{}", table);
    Ok(())
}

fn yes_no(value: bool) -> String {
    if value { "yes".to_string() } else { "no".to_string() }
}
