// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bulk import from a JSON file

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::session::Session;
use answerbank::output::print_json;
use answerbank::store::{parse_import, ImportSummary};

pub(crate) fn read_input(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read answers from stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

/// Run the import command
pub async fn run(session: &mut Session, file: &Path) -> Result<()> {
    let content = read_input(file)?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;
    let answers = parse_import(value).with_context(|| {
        format!(
            "{} must hold a JSON array of answers with section, fieldType, fieldName and answer",
            file.display()
        )
    })?;

    let summary = session.store.import(answers).await?;
    print_summary(session, &summary)
}

pub(crate) fn print_summary(session: &Session, summary: &ImportSummary) -> Result<()> {
    if session.is_json() {
        return print_json(summary, session.settings.compact);
    }
    println!(
        "{} Imported {} answers ({} already stored, {} rejected)",
        "✓".green(),
        summary.added.to_string().cyan(),
        summary.duplicates,
        summary.rejected
    );
    Ok(())
}
