// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store a new answer

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::session::Session;
use answerbank::output::{format_record, print_json};
use answerbank::store::{AnswerRecord, AnswerValue, NewAnswer};

#[derive(Debug, Serialize)]
struct AddResult<'a> {
    #[serde(flatten)]
    record: &'a AnswerRecord,
    created: bool,
}

pub struct AddArgs {
    pub answer: String,
    pub section: String,
    pub field_type: String,
    pub field_name: String,
    pub id: Option<u64>,
}

/// Run the add command
pub async fn run(session: &mut Session, args: AddArgs) -> Result<()> {
    let answer = NewAnswer::new(
        args.section,
        args.field_type,
        args.field_name,
        AnswerValue::parse_lenient(&args.answer),
    );
    answer.validate()?;

    let outcome = session.store.add_entry(answer, args.id).await?;
    let record = outcome.record();

    if session.is_json() {
        return print_json(
            &AddResult {
                record,
                created: outcome.is_created(),
            },
            session.settings.compact,
        );
    }

    let status = if outcome.is_created() {
        format!("{} Stored", "✓".green())
    } else {
        format!("{} Already stored", "=".yellow())
    };
    println!("{} {}", status, format_record(record, session.use_color()));
    Ok(())
}
