// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delete a stored answer

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::session::Session;
use answerbank::output::print_json;

#[derive(Debug, Serialize)]
struct DeleteResult {
    id: u64,
    deleted: bool,
}

/// Run the delete command
pub async fn run(session: &mut Session, id: u64) -> Result<()> {
    let deleted = session.store.delete(id).await?;

    if session.is_json() {
        return print_json(&DeleteResult { id, deleted }, session.settings.compact);
    }
    if deleted {
        println!("{} Deleted answer #{}", "✓".green(), id);
    } else {
        println!("{} No answer with id {}", "✗".red(), id.to_string().yellow());
    }
    Ok(())
}
