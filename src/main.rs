//! answerbank - Local answer store for form autofill
//!
//! Saves answers to form fields in a JSON file and finds them again for new
//! fields through exact, BM25 (tantivy) and edit-distance matching.

mod cli;
mod edit;
mod logging;
mod query;
mod session;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;

use answerbank::config::Config;
use cli::{Cli, Commands};
use session::{Session, Settings};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::Verbosity::from_flags(cli.verbose, cli.quiet));

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "answerbank", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load();
    let settings = Settings::resolve(&cli, &config);
    let mut session = Session::open(settings, config).await?;

    match cli.command {
        Commands::Add {
            answer,
            section,
            field_type,
            field_name,
            id,
        } => {
            edit::add::run(
                &mut session,
                edit::add::AddArgs {
                    answer,
                    section,
                    field_type,
                    field_name,
                    id,
                },
            )
            .await?;
        }
        Commands::Update {
            id,
            answer,
            section,
            field_type,
            field_name,
        } => {
            edit::update::run(
                &mut session,
                id,
                edit::update::UpdateArgs {
                    answer,
                    section,
                    field_type,
                    field_name,
                },
            )
            .await?;
        }
        Commands::Delete { id } => {
            edit::delete::run(&mut session, id).await?;
        }
        Commands::Get { id } => {
            query::get::run(&session, id)?;
        }
        Commands::List { section, legacy } => {
            query::list::run(&session, section.as_deref(), legacy)?;
        }
        Commands::Search { field } => {
            query::search::run(&session, field)?;
        }
        Commands::Probable { field_name, limit } => {
            query::probable::run(&session, &field_name, limit)?;
        }
        Commands::Confidence { field, threshold } => {
            query::confidence::run(&session, field, threshold)?;
        }
        Commands::Import { file } => {
            edit::import::run(&mut session, &file).await?;
        }
        Commands::ImportCv { file } => {
            edit::cv::run(&mut session, &file).await?;
        }
        Commands::Clear { yes } => {
            edit::clear::run(&mut session, yes).await?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
