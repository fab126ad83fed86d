// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opened store plus the output settings every command shares

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use answerbank::config::{Config, ConfigOutputFormat};
use answerbank::output::use_colors;
use answerbank::store::{AnswerStore, FileStorage, PersistPolicy};

/// Global options resolved against the configuration file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub store_path: PathBuf,
    pub store_name: String,
    pub format: OutputFormat,
    pub compact: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        let format = cli.format.unwrap_or_else(|| match config.output_format() {
            Some(ConfigOutputFormat::Json) => OutputFormat::Json,
            Some(ConfigOutputFormat::Text) | None => OutputFormat::Text,
        });
        Self {
            store_path: config.merge_store_path(cli.store.clone()),
            store_name: config.merge_store_name(cli.name.clone()),
            format,
            compact: cli.compact,
        }
    }
}

pub struct Session {
    pub store: AnswerStore,
    pub settings: Settings,
    pub config: Config,
}

impl Session {
    /// Open and load the configured store.
    ///
    /// The process exits after one command, so a write that fails must fail
    /// the command.
    pub async fn open(settings: Settings, config: Config) -> Result<Self> {
        debug!(
            path = %settings.store_path.display(),
            name = %settings.store_name,
            "opening answer store"
        );
        let storage = Arc::new(FileStorage::new(&settings.store_path));
        let mut store = AnswerStore::new(settings.store_name.clone(), storage)
            .with_field_types(config.field_type_rules())
            .with_persist_policy(PersistPolicy::Required);
        store.load().await.with_context(|| {
            format!(
                "Failed to load answers from {}",
                settings.store_path.display()
            )
        })?;
        Ok(Self {
            store,
            settings,
            config,
        })
    }

    pub fn is_json(&self) -> bool {
        self.settings.format == OutputFormat::Json
    }

    pub fn use_color(&self) -> bool {
        !self.is_json() && use_colors()
    }

    pub fn store_path_display(&self) -> String {
        self.settings.store_path.display().to_string()
    }
}
