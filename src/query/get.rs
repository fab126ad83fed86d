// SPDX-License-Identifier: MIT OR Apache-2.0

//! Show a single stored answer

use anyhow::{bail, Result};

use crate::session::Session;
use answerbank::output::{format_record, print_json};

/// Run the get command
pub fn run(session: &Session, id: u64) -> Result<()> {
    let Some(record) = session.store.get(id) else {
        bail!(
            "No answer with id {} in {}",
            id,
            session.store_path_display()
        );
    };

    if session.is_json() {
        print_json(record, session.settings.compact)
    } else {
        println!("{}", format_record(record, session.use_color()));
        Ok(())
    }
}
