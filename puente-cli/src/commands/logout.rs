//! Logout command - end a session

use anyhow::Result;

use super::get_context;
use crate::output;

pub async fn run(key: &str) -> Result<()> {
    let ctx = get_context()?;
    ctx.session_service.logout(key).await?;
    output::success("Logged out");
    Ok(())
}
