// SPDX-License-Identifier: MIT OR Apache-2.0

//! Autofill confidence for a form field

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::cli::FieldArgs;
use crate::session::Session;
use answerbank::output::{colorize_match_type, format_record, print_json};
use answerbank::store::FieldPath;
use answerbank::Confidence;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfidenceReport {
    #[serde(flatten)]
    confidence: Confidence,
    threshold: f64,
    needs_suggestion: bool,
}

/// Run the confidence command
pub fn run(session: &Session, field: FieldArgs, threshold: Option<f64>) -> Result<()> {
    let threshold = session.config.merge_confidence_threshold(threshold);
    let path = FieldPath::from(field);
    let confidence = session.store.confidence(&path);
    let report = ConfidenceReport {
        needs_suggestion: confidence.needs_suggestion(threshold),
        confidence,
        threshold,
    };

    if session.is_json() {
        return print_json(&report, session.settings.compact);
    }

    let use_color = session.use_color();
    let score = format!("{:.3}", report.confidence.confidence);
    println!(
        "Confidence for {}: {}",
        path.field_name.yellow(),
        if report.needs_suggestion {
            score.red()
        } else {
            score.green()
        }
    );
    if let Some(best) = &report.confidence.answer {
        println!(
            "  {} {}",
            colorize_match_type(&best.match_type, use_color),
            format_record(&best.record, use_color)
        );
    }
    if report.needs_suggestion {
        println!(
            "{} Below threshold {:.2}; ask for a suggestion instead of autofilling",
            "ℹ".cyan(),
            threshold
        );
    }
    Ok(())
}
