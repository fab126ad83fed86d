// SPDX-License-Identifier: MIT OR Apache-2.0

//! List stored answers

use anyhow::Result;
use colored::Colorize;

use crate::session::Session;
use answerbank::errors::suggestions;
use answerbank::output::{format_record, print_json};
use answerbank::store::{AnswerRecord, LegacyAnswer};

/// Run the list command
pub fn run(session: &Session, section: Option<&str>, legacy: bool) -> Result<()> {
    let records: Vec<&AnswerRecord> = session
        .store
        .get_all()
        .into_iter()
        .filter(|record| section.map_or(true, |s| record.section == s))
        .collect();

    if session.is_json() {
        if legacy {
            let nested: Vec<LegacyAnswer> = records.iter().copied().map(LegacyAnswer::from).collect();
            return print_json(&nested, session.settings.compact);
        }
        return print_json(&records, session.settings.compact);
    }

    if session.store.is_empty() {
        println!(
            "{} {}",
            "ℹ".cyan(),
            suggestions::empty_store_suggestion(&session.store_path_display())
        );
        return Ok(());
    }

    let use_color = session.use_color();
    for record in &records {
        println!("{}", format_record(record, use_color));
    }
    println!(
        "\n{} {} of {} answers",
        "ℹ".cyan(),
        records.len().to_string().cyan(),
        session.store.len().to_string().cyan()
    );
    Ok(())
}
