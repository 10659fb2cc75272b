//! Import run configuration

use crate::keywords::Keywords;
use crate::pipeline::PipelineOptions;
use crate::telemetry::VerbosityLevel;
use crate::{ImportError, Result};
use std::path::PathBuf;

/// Everything one `mtg-import import` run needs
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    /// Catalog file (.json array of raw records)
    pub catalog: PathBuf,
    /// Directory receiving rawCards.json, cards.json and sets.json
    pub output_dir: PathBuf,
    /// Optional keyword table overrides
    pub keywords: Option<PathBuf>,
    pub max_concurrency: usize,
    pub progress_interval: usize,
    pub seed: Option<u64>,
    pub verbosity: VerbosityLevel,
}

impl ImportConfig {
    pub fn new(catalog: impl Into<PathBuf>) -> Self {
        let defaults = PipelineOptions::default();
        ImportConfig {
            catalog: catalog.into(),
            output_dir: PathBuf::from("import-output"),
            keywords: None,
            max_concurrency: defaults.max_concurrency,
            progress_interval: defaults.progress_interval,
            seed: defaults.seed,
            verbosity: VerbosityLevel::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency == 0 {
            return Err(ImportError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.progress_interval == 0 {
            return Err(ImportError::Config(
                "progress interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            max_concurrency: self.max_concurrency,
            progress_interval: self.progress_interval,
            seed: self.seed,
        }
    }

    /// Built-in tables, or the override file when one is configured
    pub fn load_keywords(&self) -> Result<Keywords> {
        match &self.keywords {
            Some(path) => Keywords::load_from_file(path),
            None => Ok(Keywords::builtin()),
        }
    }
}
