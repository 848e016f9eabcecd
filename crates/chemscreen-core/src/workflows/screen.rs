use crate::core::data::symbols::normalize_symbol;
use crate::core::data::{DataLookupError, Element, ElementProvider, ElementTable};
use crate::engine::config::{ElementSelection, ScreeningConfig};
use crate::engine::context::ScreeningContext;
use crate::engine::counter::BatchCounter;
use crate::engine::error::{EngineError, Location};
use crate::engine::multiplicity::{distinct_states, key_space_size};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::RoundSummary;
use std::time::{Duration, Instant};
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningReport {
    /// Screened symbols in enumeration order.
    pub universe: Vec<String>,
    /// `(m, number of distinct oxidation-state keys of length m)` for m = 2..=max_n.
    pub key_space: Vec<(usize, u64)>,
    pub rounds: Vec<RoundSummary>,
    pub elapsed: Duration,
}

impl ScreeningReport {
    pub fn round(&self, n: usize) -> Option<&RoundSummary> {
        self.rounds.iter().find(|round| round.n == n)
    }
}

#[instrument(skip_all, name = "screening_workflow")]
pub fn run(
    config: &ScreeningConfig,
    reporter: &ProgressReporter,
) -> Result<ScreeningReport, EngineError> {
    let started = Instant::now();

    // === Phase 0: Configuration and element data ===
    config
        .validate()
        .map_err(|source| EngineError::Configuration {
            at: Location::setup(),
            source,
        })?;

    reporter.report(Progress::PhaseStart {
        name: "Loading element data",
    });
    let loaded;
    let table: &ElementTable = match &config.element_data_path {
        Some(path) => {
            loaded = ElementTable::from_path(path).map_err(setup_failure)?;
            &loaded
        }
        None => ElementTable::embedded().map_err(setup_failure)?,
    };
    let universe = select_universe(table, &config.elements).map_err(setup_failure)?;
    reporter.report(Progress::PhaseFinish);
    info!(
        elements = universe.len(),
        max_n = config.max_n,
        source = %config.electronegativity,
        "Element universe loaded."
    );

    // === Phase 1: Oxidation-state space summary ===
    let states = distinct_states(&universe);
    let key_space: Vec<(usize, u64)> = (2..=config.max_n)
        .map(|m| (m, key_space_size(states.len(), m)))
        .collect();
    for &(n, keys) in &key_space {
        reporter.report(Progress::KeySpace { n, keys });
    }

    // === Phase 2: One counting round per combination size ===
    let context = ScreeningContext::new(&universe, config, reporter);
    let counter = BatchCounter::new(context)?;
    let rounds = (2..=config.max_n)
        .map(|n| counter.run_round(n))
        .collect::<Result<Vec<_>, _>>()?;

    let report = ScreeningReport {
        universe: universe.iter().map(|e| e.symbol.clone()).collect(),
        key_space,
        rounds,
        elapsed: started.elapsed(),
    };
    info!(
        rounds = report.rounds.len(),
        elapsed_secs = report.elapsed.as_secs_f64(),
        "Screening complete."
    );
    Ok(report)
}

/// Resolves a selection against `provider`, keeping range order or the listed order.
pub fn select_universe<'p, P: ElementProvider>(
    provider: &'p P,
    selection: &ElementSelection,
) -> Result<Vec<&'p Element>, DataLookupError> {
    match selection {
        ElementSelection::Range { first, last } => {
            let symbols = provider.ordered_elements(*first, *last)?;
            provider.lookup_many(&symbols)
        }
        ElementSelection::Symbols(symbols) => {
            let normalized: Vec<String> = symbols.iter().map(|s| normalize_symbol(s)).collect();
            provider.lookup_many(&normalized)
        }
    }
}

fn setup_failure(source: DataLookupError) -> EngineError {
    EngineError::DataLookup {
        at: Location::setup(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::ScreeningConfigBuilder;
    use crate::engine::error::Stage;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;

    const WATER_CSV: &str = "\
symbol,number,name,oxidation_states,pauling,ionization_potential,electron_affinity
H,1,Hydrogen,-1 1,2.20,13.598,0.754
O,8,Oxygen,-2,3.44,13.618,1.461
";

    #[test]
    fn water_universe_from_a_data_file_counts_one_binary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("water.csv");
        fs::write(&path, WATER_CSV).unwrap();

        let config = ScreeningConfigBuilder::new()
            .element_data_path(path)
            .elements(ElementSelection::Symbols(vec!["h".into(), "O".into()]))
            .max_n(3)
            .build()
            .unwrap();
        let report = run(&config, &ProgressReporter::new()).unwrap();

        assert_eq!(report.universe, vec!["H", "O"]);
        assert_eq!(report.rounds.len(), 2);
        assert_eq!(report.round(2).unwrap().count, 1);
        // H-1 and H+1 share H's electronegativity, so the only triple fails ordering.
        assert_eq!(report.round(3).unwrap().count, 0);
        assert_eq!(report.key_space, vec![(2, 6), (3, 10)]);
    }

    #[test]
    fn key_space_and_rounds_are_reported_in_order() {
        let config = ScreeningConfigBuilder::new()
            .elements(ElementSelection::Range { first: 1, last: 10 })
            .max_n(3)
            .progress_reports(5)
            .build()
            .unwrap();
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            let label = match event {
                Progress::KeySpace { n, .. } => format!("keys {}", n),
                Progress::RoundStart { n, .. } => format!("start {}", n),
                Progress::RoundFinish(summary) => format!("finish {}", summary.n),
                _ => return,
            };
            events.lock().unwrap().push(label);
        }));

        let report = run(&config, &reporter).unwrap();
        drop(reporter);

        assert_eq!(
            events.into_inner().unwrap(),
            vec!["keys 2", "keys 3", "start 2", "finish 2", "start 3", "finish 3"]
        );
        assert_eq!(report.round(2).unwrap().combinations, 45);
        assert_eq!(report.round(3).unwrap().combinations, 45 + 120);
    }

    #[test]
    fn unknown_symbol_fails_during_setup() {
        let config = ScreeningConfigBuilder::new()
            .elements(ElementSelection::Symbols(vec!["H".into(), "Xx".into()]))
            .build()
            .unwrap();
        let err = run(&config, &ProgressReporter::new()).unwrap_err();

        assert_eq!(err.location().stage, Stage::Setup);
        assert!(matches!(
            err,
            EngineError::DataLookup {
                source: DataLookupError::UnknownSymbol(ref s),
                ..
            } if s == "Xx"
        ));
    }

    #[test]
    fn invalid_configuration_is_rejected_before_loading_data() {
        let config = ScreeningConfig {
            max_n: 1,
            element_data_path: Some("/nonexistent/elements.csv".into()),
            ..ScreeningConfig::default()
        };
        let err = run(&config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::Configuration { .. }));
        assert_eq!(err.location(), Location::setup());
    }

    #[test]
    fn missing_data_file_is_a_lookup_failure() {
        let dir = tempdir().unwrap();
        let config = ScreeningConfigBuilder::new()
            .element_data_path(dir.path().join("missing.csv"))
            .build()
            .unwrap();
        let err = run(&config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::DataLookup {
                source: DataLookupError::Io { .. },
                ..
            }
        ));
    }
}
