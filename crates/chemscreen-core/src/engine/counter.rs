use super::context::ScreeningContext;
use super::enumerator::{ElementCombinations, combination_count};
use super::error::EngineError;
use super::multiplicity::{MultiplicityTable, distinct_states};
use super::progress::Progress;
use super::state::{ProgressState, RoundSummary};
use super::tasks::count::CountTask;
use crate::core::data::Element;
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use super::error::Location;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Drives one counting round per combination size through
/// initializing, table building, batched counting and reporting.
pub struct BatchCounter<'a> {
    context: ScreeningContext<'a>,
    states: Vec<i32>,
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
}

impl<'a> BatchCounter<'a> {
    pub fn new(context: ScreeningContext<'a>) -> Result<Self, EngineError> {
        let parallel = &context.config.parallel;

        #[cfg(feature = "parallel")]
        let pool = if parallel.enabled {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(parallel.workers)
                .thread_name(|i| format!("chemscreen-worker-{}", i))
                .build()
                .map_err(|e| EngineError::ThreadPool {
                    at: Location::setup(),
                    reason: e.to_string(),
                })?;
            debug!(workers = parallel.workers, "Worker pool ready.");
            Some(pool)
        } else {
            None
        };

        if cfg!(not(feature = "parallel")) && parallel.enabled {
            warn!("Built without the 'parallel' feature; counting sequentially.");
        }

        Ok(Self {
            states: distinct_states(context.universe),
            context,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    #[instrument(skip(self), name = "counting_round")]
    pub fn run_round(&self, n: usize) -> Result<RoundSummary, EngineError> {
        let config = self.context.config;
        let reporter = self.context.reporter;

        // Initializing
        let total = combination_count(self.context.universe.len(), n);
        let batch_size = batch_size(total, config.progress_reports);
        info!(n, total, batch_size, "Starting counting round.");

        // Building the multiplicity table
        reporter.report(Progress::PhaseStart {
            name: "Building multiplicity table",
        });
        let table = self.install(|| {
            MultiplicityTable::build(
                &self.states,
                n,
                config.stoichiometry_threshold,
                config.distinct_ratios,
            )
        });
        reporter.report(Progress::PhaseFinish);

        // Counting and reporting
        reporter.report(Progress::RoundStart {
            n,
            total_combinations: total,
        });
        let task = CountTask {
            n,
            table: &table,
            scale: config.electronegativity,
            filter: &config.filter,
        };
        let mut combinations = ElementCombinations::new(self.context.universe, n);
        let mut progress = ProgressState::new(n, total);
        let mut count = 0u64;

        loop {
            let batch: Vec<Vec<&Element>> = combinations.by_ref().take(batch_size).collect();
            if batch.is_empty() {
                break;
            }
            count = count.saturating_add(self.count_batch(&task, &batch)?);
            let snapshot = progress.advance(batch.len() as u64);
            debug!(processed = snapshot.processed, count, "Batch counted.");
            reporter.report(Progress::Batch(snapshot));
        }

        let summary = RoundSummary {
            n,
            combinations: progress.processed(),
            count,
            elapsed: progress.elapsed(),
        };
        info!(
            n,
            count,
            elapsed_secs = summary.elapsed.as_secs_f64(),
            "Counting round finished."
        );
        reporter.report(Progress::RoundFinish(summary.clone()));
        Ok(summary)
    }

    #[cfg(feature = "parallel")]
    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn install<R>(&self, op: impl FnOnce() -> R) -> R {
        op()
    }

    #[cfg(feature = "parallel")]
    fn count_batch(&self, task: &CountTask<'_>, batch: &[Vec<&Element>]) -> Result<u64, EngineError> {
        match &self.pool {
            Some(pool) => {
                let chunk_size = self.context.config.parallel.chunk_size;
                pool.install(|| {
                    batch
                        .par_iter()
                        .with_min_len(chunk_size)
                        .map(|combination| task.run(combination))
                        .try_reduce(|| 0, |a, b| Ok(a.saturating_add(b)))
                })
            }
            None => count_sequential(task, batch),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn count_batch(&self, task: &CountTask<'_>, batch: &[Vec<&Element>]) -> Result<u64, EngineError> {
        count_sequential(task, batch)
    }
}

fn count_sequential(task: &CountTask<'_>, batch: &[Vec<&Element>]) -> Result<u64, EngineError> {
    batch.iter().try_fold(0u64, |acc, combination| {
        Ok(acc.saturating_add(task.run(combination)?))
    })
}

/// Combinations per batch so that a round emits about `reports` progress events.
pub fn batch_size(total: u64, reports: usize) -> usize {
    let size = (total / reports.max(1) as u64).max(1);
    usize::try_from(size).unwrap_or(usize::MAX)
}
