// SPDX-License-Identifier: MIT OR Apache-2.0

//! Find answers for a form field

use anyhow::Result;
use colored::Colorize;

use crate::cli::FieldArgs;
use crate::session::Session;
use answerbank::errors::suggestions;
use answerbank::output::{colorize_match_type, format_record, print_json};
use answerbank::store::{FieldPath, ScoredAnswer};

impl From<FieldArgs> for FieldPath {
    fn from(args: FieldArgs) -> Self {
        let path = FieldPath::new(args.section, args.field_type, args.field_name);
        match args.page {
            Some(page) => path.with_page(page),
            None => path,
        }
    }
}

/// Run the search command
pub fn run(session: &Session, field: FieldArgs) -> Result<()> {
    let path = FieldPath::from(field);
    let results = session.store.search(&path);

    if session.is_json() {
        return print_json(&results, session.settings.compact);
    }

    if results.is_empty() {
        println!(
            "{} {}",
            "✗".red(),
            suggestions::no_results_suggestion(&path.field_name, &path.section)
        );
        return Ok(());
    }

    println!(
        "\n{} Answers for: {}\n",
        "🔍".cyan(),
        path.field_name.yellow()
    );
    print_scored(&results, session.use_color());
    Ok(())
}

pub(crate) fn print_scored(results: &[ScoredAnswer], use_color: bool) {
    for scored in results {
        println!(
            "  {} {}",
            colorize_match_type(&scored.match_type, use_color),
            format_record(&scored.record, use_color)
        );
    }
}
