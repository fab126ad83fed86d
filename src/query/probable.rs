// SPDX-License-Identifier: MIT OR Apache-2.0

//! Section- and type-agnostic suggestions

use anyhow::Result;
use colored::Colorize;

use super::search::print_scored;
use crate::session::Session;
use answerbank::output::print_json;

/// Run the probable command
pub fn run(session: &Session, field_name: &str, limit: Option<usize>) -> Result<()> {
    let limit = session.config.merge_probable_limit(limit);
    let results = session.store.search_probable(field_name, limit);

    if session.is_json() {
        return print_json(&results, session.settings.compact);
    }

    if results.is_empty() {
        println!(
            "{} No stored label resembles: {}",
            "✗".red(),
            field_name.yellow()
        );
        return Ok(());
    }

    println!(
        "\n{} Probable answers for: {}\n",
        "🔍".cyan(),
        field_name.yellow()
    );
    print_scored(&results, session.use_color());
    Ok(())
}
