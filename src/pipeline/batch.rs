use std::panic::{self, AssertUnwindSafe};

use crate::{
    foundation::{
        config::DistConfig,
        error::{PoseDistError, PoseDistResult},
    },
    pipeline::{
        archive::PoseArchive,
        convert::{ConversionPipeline, ConversionResult},
    },
    pose::catalog::{Catalog, CatalogEntry},
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// What happened to one catalog entry.
pub enum EntryOutcome {
    /// The entry was converted; frame counters attached.
    Converted(ConversionResult),
    /// Output already existed; nothing was touched.
    Skipped,
    /// The entry was abandoned with this message.
    Failed(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Per-entry outcomes of one batch run, in catalog order.
pub struct BatchReport {
    /// `(entry name, outcome)` pairs.
    pub outcomes: Vec<(String, EntryOutcome)>,
}

impl BatchReport {
    /// Entries visited.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Entries converted in this run.
    pub fn converted(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Converted(_)))
    }

    /// Entries skipped because their output already existed.
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Skipped))
    }

    /// Entries that failed.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Failed(_)))
    }

    /// Outcome for one entry.
    pub fn outcome(&self, name: &str) -> Option<&EntryOutcome> {
        self.outcomes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, outcome)| outcome)
    }

    fn count(&self, pred: impl Fn(&EntryOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Runs the conversion pipeline over every catalog entry.
#[derive(Clone, Debug)]
pub struct BatchRunner {
    config: DistConfig,
    pipeline: ConversionPipeline,
}

impl BatchRunner {
    /// Runner for validated path roots.
    pub fn new(config: DistConfig) -> PoseDistResult<Self> {
        config.validate()?;
        let pipeline = ConversionPipeline::new(&config.out_dir);
        Ok(Self { config, pipeline })
    }

    /// Path roots in use.
    pub fn config(&self) -> &DistConfig {
        &self.config
    }

    /// Visit every entry in catalog order. Never stops early.
    pub fn run(&self, catalog: &Catalog) -> BatchReport {
        let mut report = BatchReport::default();
        for (name, entry) in catalog.iter() {
            let outcome = self.run_entry(name, entry);
            report.outcomes.push((name.to_owned(), outcome));
        }
        tracing::info!(
            converted = report.converted(),
            skipped = report.skipped(),
            failed = report.failed(),
            total = report.total(),
            "batch finished"
        );
        report
    }

    /// Convert one entry, folding every error and panic into its outcome.
    pub fn run_entry(&self, name: &str, entry: &CatalogEntry) -> EntryOutcome {
        tracing::info!(entry = name, title = %entry.title, "processing");

        if self.config.entry_out_dir(name).exists() {
            tracing::info!(entry = name, "skip: output exists");
            return EntryOutcome::Skipped;
        }

        let attempt = panic::catch_unwind(AssertUnwindSafe(|| self.convert_entry(name, entry)));
        match attempt {
            Ok(Ok(result)) => EntryOutcome::Converted(result),
            Ok(Err(PoseDistError::OutputExists(_))) => {
                tracing::info!(entry = name, "skip: output appeared during conversion");
                EntryOutcome::Skipped
            }
            Ok(Err(e)) => {
                tracing::error!(entry = name, error = %e, "entry failed");
                EntryOutcome::Failed(e.to_string())
            }
            Err(payload) => {
                let msg = panic_message(payload.as_ref());
                tracing::error!(entry = name, panic = %msg, "entry panicked");
                EntryOutcome::Failed(format!("panic: {msg}"))
            }
        }
    }

    fn convert_entry(&self, name: &str, entry: &CatalogEntry) -> PoseDistResult<ConversionResult> {
        let path = self.config.locate_archive(name)?;
        tracing::info!(entry = name, archive = %path.display(), "unzipping");
        let mut archive = PoseArchive::open(&path)?;
        tracing::debug!(entry = name, members = archive.names().len(), "archive opened");
        self.pipeline.convert(name, entry, &mut archive)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/batch.rs"]
mod tests;
