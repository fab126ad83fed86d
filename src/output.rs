// SPDX-License-Identifier: MIT OR Apache-2.0

//! Output helpers shared by the CLI commands

use std::io::IsTerminal;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::store::{AnswerRecord, MatchType};

/// Print `value` as JSON on stdout, pretty unless `compact`.
pub fn print_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{rendered}");
    Ok(())
}

/// Whether text output should be colorized.
///
/// Honors `NO_COLOR` and disables color when stdout is not a terminal.
pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

pub fn colorize_id(id: u64, use_color: bool) -> String {
    let label = format!("#{id}");
    if use_color {
        label.yellow().to_string()
    } else {
        label
    }
}

pub fn colorize_section(section: &str, use_color: bool) -> String {
    if use_color {
        section.cyan().to_string()
    } else {
        section.to_string()
    }
}

pub fn colorize_field_name(field_name: &str, use_color: bool) -> String {
    if use_color {
        field_name.green().bold().to_string()
    } else {
        field_name.to_string()
    }
}

/// Match label colored by strength: exact green, lexical blue, edit-distance magenta.
pub fn colorize_match_type(match_type: &MatchType, use_color: bool) -> String {
    let label = format!("[{match_type}]");
    if !use_color {
        return label;
    }
    match match_type {
        MatchType::Exact => label.green().to_string(),
        MatchType::Similar(_) => label.blue().to_string(),
        MatchType::Fuzzy(_) | MatchType::Probable(_) => label.magenta().to_string(),
    }
}

/// One line per record: `#id Section / Field name (type): answer`.
pub fn format_record(record: &AnswerRecord, use_color: bool) -> String {
    let field_type = format!("({})", record.field_type);
    format!(
        "{} {} / {} {}: {}",
        colorize_id(record.id, use_color),
        colorize_section(&record.section, use_color),
        colorize_field_name(&record.field_name, use_color),
        if use_color {
            field_type.dimmed().to_string()
        } else {
            field_type
        },
        record.answer
    )
}
