//! Bulk import pipeline
//!
//! One independent workflow per raw record: resolve and persist the set,
//! mirror the raw record, then insert the card or append the printing.
//! Workflows are interleaved on a single dispatcher with a cap on how many are
//! in flight. The first fatal error stops the batch; writes that already
//! landed stay in place.

use crate::core::RawCardRecord;
use crate::keywords::Keywords;
use crate::store::{CatalogStore, RAW_CARDS};
use crate::transform::{CardNormalizer, CardOutcome, Deduplicator, PrintingExtractor, SetResolver};
use crate::{ImportError, Result};
use futures::{future, stream, StreamExt, TryStreamExt};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Tuning knobs for a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Maximum number of workflows in flight at once
    pub max_concurrency: usize,
    /// Log progress every this many completed cards
    pub progress_interval: usize,
    /// Seed for the per-card sampling values; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            max_concurrency: 100,
            progress_interval: 100,
            seed: None,
        }
    }
}

/// Counts reported at the end of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub records: usize,
    pub cards_created: usize,
    pub printings_appended: usize,
    pub sets_created: usize,
    pub unknown_sets: usize,
}

#[derive(Debug, Default)]
struct ImportStats {
    completed: AtomicUsize,
    cards_created: AtomicUsize,
    printings_appended: AtomicUsize,
    sets_created: AtomicUsize,
    unknown_sets: AtomicUsize,
}

impl ImportStats {
    fn summary(&self) -> ImportSummary {
        ImportSummary {
            records: self.completed.load(Ordering::Relaxed),
            cards_created: self.cards_created.load(Ordering::Relaxed),
            printings_appended: self.printings_appended.load(Ordering::Relaxed),
            sets_created: self.sets_created.load(Ordering::Relaxed),
            unknown_sets: self.unknown_sets.load(Ordering::Relaxed),
        }
    }
}

/// Everything one record's workflow owns
///
/// Built by value per record, so no two workflows share mutable state.
#[derive(Debug)]
pub struct CardWorkflow {
    index: usize,
    record: RawCardRecord,
    rng: ChaCha8Rng,
}

impl CardWorkflow {
    pub fn new(index: usize, record: RawCardRecord, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => ChaCha8Rng::from_entropy(),
        };
        CardWorkflow { index, record, rng }
    }
}

/// Transform-and-load pipeline over a [`CatalogStore`]
pub struct ImportPipeline<S: ?Sized> {
    store: Arc<S>,
    resolver: Arc<SetResolver>,
    dedup: Deduplicator,
    options: PipelineOptions,
}

impl<S> ImportPipeline<S>
where
    S: CatalogStore + ?Sized,
{
    pub fn new(store: Arc<S>, keywords: Arc<Keywords>, options: PipelineOptions) -> Self {
        let resolver = Arc::new(SetResolver::new(Arc::clone(&keywords)));
        let extractor = Arc::new(PrintingExtractor::new(Arc::clone(&keywords)));
        let normalizer = Arc::new(CardNormalizer::new(
            &keywords,
            Arc::clone(&resolver),
            Arc::clone(&extractor),
        ));

        ImportPipeline {
            store,
            resolver,
            dedup: Deduplicator::new(normalizer, extractor),
            options,
        }
    }

    /// Replace the store contents with the transformed catalog
    ///
    /// Wipes the collections first, so a run never depends on a previous one.
    pub async fn run(&self, records: Vec<RawCardRecord>) -> Result<ImportSummary> {
        let start = Instant::now();

        self.resolver.reset();
        self.dedup.reset();
        self.store.reset().await?;
        info!("cleared collections and ensured indexes");

        let workflows: Vec<CardWorkflow> = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| CardWorkflow::new(index, record, self.options.seed))
            .collect();
        info!(total = workflows.len(), "staged card workflows");

        let stats = ImportStats::default();
        let result = stream::iter(workflows)
            .map(|workflow| self.execute(workflow, &stats))
            .buffer_unordered(self.options.max_concurrency.max(1))
            .try_for_each(|()| future::ready(Ok(())))
            .await;

        let summary = stats.summary();
        if let Err(e) = result {
            error!(
                error = %e,
                completed = summary.records,
                "import aborted"
            );
            return Err(e);
        }

        info!(
            records = summary.records,
            cards = summary.cards_created,
            printings = summary.printings_appended,
            sets = summary.sets_created,
            unknown_sets = summary.unknown_sets,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "finished importing cards"
        );
        Ok(summary)
    }

    async fn execute(&self, workflow: CardWorkflow, stats: &ImportStats) -> Result<()> {
        let index = workflow.index;
        let name = workflow.record.name.clone();

        let outcome = self.process(workflow, stats).await.map_err(|e| {
            error!(index, name = ?name, error = %e, "card workflow failed");
            e
        })?;

        match outcome {
            CardOutcome::Created => stats.cards_created.fetch_add(1, Ordering::Relaxed),
            CardOutcome::PrintingAppended => {
                stats.printings_appended.fetch_add(1, Ordering::Relaxed)
            }
        };

        let completed = stats.completed.fetch_add(1, Ordering::Relaxed) + 1;
        if is_progress_point(completed, self.options.progress_interval) {
            info!(count = completed, "imported cards");
        }
        Ok(())
    }

    async fn process(&self, workflow: CardWorkflow, stats: &ImportStats) -> Result<CardOutcome> {
        let CardWorkflow {
            index,
            mut record,
            mut rng,
        } = workflow;

        let code = self.resolver.resolve_set(&mut record);
        if code.is_unknown() {
            stats.unknown_sets.fetch_add(1, Ordering::Relaxed);
        }

        let set_name = record.card_set_name.clone().unwrap_or_default();
        let released_at = self.resolver.card_released_at(&record).map(str::to_string);
        let created = self
            .resolver
            .ensure_set_persisted(&*self.store, &code, &set_name, released_at.as_deref())
            .await?;
        if created {
            stats.sets_created.fetch_add(1, Ordering::Relaxed);
        }

        let document = record
            .mirror_document()
            .map_err(|e| ImportError::write(RAW_CARDS, record.card_key(), e.into()))?;
        self.store
            .insert_raw_card(&document)
            .await
            .map_err(|e| ImportError::write(RAW_CARDS, record.card_key(), e))?;

        debug!(index, name = record.card_key(), set = %code, "resolved record");
        self.dedup.upsert_card(&*self.store, record, &mut rng).await
    }
}

/// Progress is logged after every `interval` completed cards
fn is_progress_point(completed: usize, interval: usize) -> bool {
    completed % interval.max(1) == 0
}
