//! Movements command - list movements for one account

use anyhow::Result;
use chrono::{Duration, Local};
use colored::Colorize;

use super::get_context;
use crate::output;

const DATE_FORMAT: &str = "%d/%m/%Y";

pub async fn run(
    key: &str,
    account: &str,
    currency: &str,
    from: Option<String>,
    to: Option<String>,
    json: bool,
) -> Result<()> {
    let today = Local::now().date_naive();
    let from = from.unwrap_or_else(|| (today - Duration::days(30)).format(DATE_FORMAT).to_string());
    let to = to.unwrap_or_else(|| today.format(DATE_FORMAT).to_string());

    let ctx = get_context()?;
    let movements = ctx
        .session_service
        .list_movements(key, account, currency, &from, &to)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&movements)?);
        return Ok(());
    }

    if movements.is_empty() {
        output::info(&format!("No movements between {} and {}", from, to));
        return Ok(());
    }

    println!("{}", format!("Movements {} ({} to {})", account, from, to).bold());
    println!();

    let mut table = output::create_table();
    table.set_header(vec!["Date", "Reference", "Detail", "Debit", "Credit"]);
    for movement in &movements {
        table.add_row(vec![
            movement.date.clone(),
            movement.reference.clone().unwrap_or_default(),
            movement.detail.clone().unwrap_or_default(),
            movement.debit.map(|d| d.to_string()).unwrap_or_default(),
            movement.credit.map(|c| c.to_string()).unwrap_or_default(),
        ]);
    }
    println!("{}", table);

    Ok(())
}
