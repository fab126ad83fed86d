// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remove every stored answer

use anyhow::{bail, Result};
use colored::Colorize;
use serde::Serialize;

use crate::session::Session;
use answerbank::output::print_json;

#[derive(Debug, Serialize)]
struct ClearResult {
    removed: usize,
}

/// Run the clear command
pub async fn run(session: &mut Session, yes: bool) -> Result<()> {
    if !yes {
        bail!(
            "Refusing to delete {} answers without confirmation\n\n\
             Re-run with --yes: answerbank clear --yes",
            session.store.len()
        );
    }

    let removed = session.store.clear().await?;

    if session.is_json() {
        return print_json(&ClearResult { removed }, session.settings.compact);
    }
    println!(
        "{} Removed {} answers from {}",
        "✓".green(),
        removed.to_string().cyan(),
        session.store_path_display()
    );
    Ok(())
}
