//! Clients command - list or select the session's clients

use anyhow::Result;

use super::get_context;
use crate::output;

pub async fn run(key: &str, select: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;

    if let Some(client_id) = select {
        ctx.session_service.select_client(key, &client_id).await?;
        if json {
            println!("{}", serde_json::json!({ "selected": client_id }));
        } else {
            output::success(&format!("Session bound to client {}", client_id));
        }
        return Ok(());
    }

    let clients = ctx.session_service.get_clients(key).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&clients)?);
        return Ok(());
    }

    if clients.is_empty() {
        output::info("This provider has no client selection");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Client ID", "Name"]);
    for client in &clients {
        table.add_row(vec![client.id.clone(), client.name.clone()]);
    }
    println!("{}", table);

    Ok(())
}
