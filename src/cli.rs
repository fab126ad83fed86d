// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument parsing using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// answerbank - Local answer store for form autofill
///
/// Save answers to form fields once and find them again for new forms,
/// even when the field is labelled a little differently.
#[derive(Parser, Debug)]
#[command(name = "answerbank")]
#[command(
    author,
    version,
    about,
    long_about = None,
    after_help = "Quickstart:\n  answerbank add -s \"Personal\" -t text -f \"Email\" a@b.com\n  answerbank search -s \"Personal\" -t TextInput \"E-mail address\"\n  answerbank probable \"firstname\""
)]
pub struct Cli {
    /// JSON file holding the answers (defaults to config, then the data dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Key the answers are stored under inside the store file
    #[arg(long, global = true, value_name = "KEY")]
    pub name: Option<String>,

    /// Output format (text or json)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Compact JSON output (no pretty formatting)
    #[arg(long, global = true)]
    pub compact: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Field description shared by `search` and `confidence`
#[derive(clap::Args, Debug, Clone)]
pub struct FieldArgs {
    /// Field label as shown on the form
    pub field_name: String,

    /// Form section the field belongs to
    #[arg(short, long)]
    pub section: String,

    /// Input kind of the field (text, TextInput, textarea, ...)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub field_type: String,

    /// Page the field was seen on (informational)
    #[arg(long)]
    pub page: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store an answer for a form field
    #[command(
        visible_aliases = ["a"],
        after_help = "Examples:\n  answerbank add -s \"Personal\" -t text -f \"Email\" a@b.com\n  answerbank add -s \"Skills\" -t textarea -f \"Languages\" '[\"Rust\", \"Go\"]'"
    )]
    Add {
        /// Answer text; JSON objects and arrays are stored as structured answers
        answer: String,

        /// Form section the field belongs to
        #[arg(short, long)]
        section: String,

        /// Input kind of the field
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        field_type: String,

        /// Field label as shown on the form
        #[arg(short = 'f', long = "field", value_name = "FIELD")]
        field_name: String,

        /// Store under this id, replacing any answer that holds it (an
        /// identical stored answer is kept as is)
        #[arg(long)]
        id: Option<u64>,
    },

    /// Change parts of a stored answer, keeping its id
    #[command(visible_aliases = ["edit"])]
    Update {
        /// Id of the answer to change
        id: u64,

        /// New answer text
        answer: Option<String>,

        /// New section
        #[arg(short, long)]
        section: Option<String>,

        /// New input kind
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        field_type: Option<String>,

        /// New field label
        #[arg(short = 'f', long = "field", value_name = "FIELD")]
        field_name: Option<String>,
    },

    /// Delete a stored answer
    #[command(visible_aliases = ["rm"])]
    Delete {
        /// Id of the answer to delete
        id: u64,
    },

    /// Show one stored answer
    Get {
        /// Id of the answer
        id: u64,
    },

    /// List stored answers in insertion order
    #[command(visible_aliases = ["ls"])]
    List {
        /// Only answers from this section
        #[arg(short, long)]
        section: Option<String>,

        /// Emit JSON in the nested `{answer, id, path}` layout
        #[arg(long)]
        legacy: bool,
    },

    /// Find answers for a form field (exact, then similar, then fuzzy)
    #[command(visible_aliases = ["s"])]
    Search {
        #[command(flatten)]
        field: FieldArgs,
    },

    /// Suggest answers by label similarity across all sections and types
    #[command(visible_aliases = ["p"])]
    Probable {
        /// Field label to look for
        field_name: String,

        /// Maximum number of suggestions
        #[arg(short = 'm', long = "limit")]
        limit: Option<usize>,
    },

    /// Report how confidently a field can be autofilled
    #[command(visible_aliases = ["c"])]
    Confidence {
        #[command(flatten)]
        field: FieldArgs,

        /// Confidence below which a suggestion is needed
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Import answers from a JSON file ("-" reads stdin)
    Import {
        /// JSON array of answers, flat or nested layout
        file: PathBuf,
    },

    /// Import answers from a parsed CV ("-" reads stdin)
    #[command(name = "import-cv")]
    ImportCv {
        /// CV JSON, plain or wrapped in `extractedData`
        file: PathBuf,
    },

    /// Delete every stored answer
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
