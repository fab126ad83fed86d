// SPDX-License-Identifier: MIT OR Apache-2.0

//! Import answers from a parsed CV

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::import::{print_summary, read_input};
use crate::session::Session;
use answerbank::cv::{cv_to_answers, parse_cv};

/// Run the import-cv command
pub async fn run(session: &mut Session, file: &Path) -> Result<()> {
    let content = read_input(file)?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;
    let cv = parse_cv(value).with_context(|| {
        format!(
            "{} must hold extracted CV data (personalInfo, experience, education, ...)",
            file.display()
        )
    })?;

    let answers = cv_to_answers(&cv);
    debug!(answers = answers.len(), "answers derived from CV");
    let summary = session.store.import(answers).await?;
    print_summary(session, &summary)
}
