// SPDX-License-Identifier: MIT OR Apache-2.0

//! Change a stored answer under its existing id

use anyhow::{bail, Result};
use colored::Colorize;

use crate::session::Session;
use answerbank::output::{format_record, print_json};
use answerbank::store::{AnswerValue, NewAnswer};

pub struct UpdateArgs {
    pub answer: Option<String>,
    pub section: Option<String>,
    pub field_type: Option<String>,
    pub field_name: Option<String>,
}

/// Run the update command
pub async fn run(session: &mut Session, id: u64, args: UpdateArgs) -> Result<()> {
    let Some(existing) = session.store.get(id) else {
        bail!(
            "No answer with id {} in {}",
            id,
            session.store_path_display()
        );
    };

    let mut record = existing.clone();
    if let Some(answer) = args.answer {
        record.answer = AnswerValue::parse_lenient(&answer);
    }
    if let Some(section) = args.section {
        record.section = section;
    }
    if let Some(field_type) = args.field_type {
        record.field_type = field_type;
    }
    if let Some(field_name) = args.field_name {
        record.field_name = field_name;
    }
    NewAnswer::from(record.clone()).validate()?;

    let stored = session.store.update(record).await?;

    if session.is_json() {
        return print_json(&stored, session.settings.compact);
    }
    println!(
        "{} Updated {}",
        "✓".green(),
        format_record(&stored, session.use_color())
    );
    Ok(())
}
