use crate::core::chemistry::pauling::PaulingTest;
use crate::core::data::ElectronegativityScale;
use crate::core::data::symbols::MAX_ATOMIC_NUMBER;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_MAX_N: usize = 4;
/// Largest combination size accepted. The multiplicity table grows as
/// C(states + n - 1, n) keys with up to threshold^n coefficient tuples each.
pub const MAX_COMBINATION_SIZE: usize = 6;
pub const DEFAULT_STOICHIOMETRY_THRESHOLD: u32 = 8;
pub const DEFAULT_PAULING_THRESHOLD: f64 = 0.0;
pub const DEFAULT_PROGRESS_REPORTS: usize = 100;
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_CHUNK_SIZE: usize = 10;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    #[error("Unrecognized electronegativity source '{0}'. Expected 'pauling' or 'mulliken'.")]
    UnknownElectronegativitySource(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementSelection {
    /// Elements `first..=last` by atomic number.
    Range { first: u8, last: u8 },
    /// Explicit symbols, screened in the given order.
    Symbols(Vec<String>),
}

impl Default for ElementSelection {
    fn default() -> Self {
        Self::Range {
            first: 1,
            last: MAX_ATOMIC_NUMBER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConfig {
    pub enabled: bool,
    pub workers: usize,
    /// Minimum number of element combinations handed to a worker at once.
    pub chunk_size: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            workers: DEFAULT_WORKERS,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningConfig {
    pub elements: ElementSelection,
    pub element_data_path: Option<PathBuf>,
    pub max_n: usize,
    pub stoichiometry_threshold: u32,
    pub distinct_ratios: bool,
    pub electronegativity: ElectronegativityScale,
    pub filter: PaulingTest,
    pub progress_reports: usize,
    pub parallel: ParallelConfig,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            elements: ElementSelection::default(),
            element_data_path: None,
            max_n: DEFAULT_MAX_N,
            stoichiometry_threshold: DEFAULT_STOICHIOMETRY_THRESHOLD,
            distinct_ratios: true,
            electronegativity: ElectronegativityScale::default(),
            filter: PaulingTest {
                threshold: DEFAULT_PAULING_THRESHOLD,
                ..PaulingTest::default()
            },
            progress_reports: DEFAULT_PROGRESS_REPORTS,
            parallel: ParallelConfig::default(),
        }
    }
}

impl ScreeningConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |parameter: &'static str, reason: &str| {
            Err(ConfigError::InvalidParameter {
                parameter,
                reason: reason.to_string(),
            })
        };

        if self.max_n < 2 {
            return invalid("max_n", "must be at least 2");
        }
        if self.max_n > MAX_COMBINATION_SIZE {
            return Err(ConfigError::InvalidParameter {
                parameter: "max_n",
                reason: format!("must be at most {}", MAX_COMBINATION_SIZE),
            });
        }
        if self.stoichiometry_threshold == 0 {
            return invalid("stoichiometry_threshold", "must be positive");
        }
        if !self.filter.threshold.is_finite() {
            return invalid("pauling_threshold", "must be a finite number");
        }
        if self.progress_reports == 0 {
            return invalid("progress_reports", "must be positive");
        }
        if self.parallel.workers == 0 {
            return invalid("workers", "must be positive");
        }
        if self.parallel.chunk_size == 0 {
            return invalid("chunk_size", "must be positive");
        }
        match &self.elements {
            ElementSelection::Range { first, last } if *first == 0 || first > last => {
                return invalid("elements", "range must satisfy 1 <= first <= last");
            }
            ElementSelection::Range { last, .. } if *last > MAX_ATOMIC_NUMBER => {
                return invalid("elements", "range extends past the last known element");
            }
            ElementSelection::Symbols(symbols) if symbols.is_empty() => {
                return invalid("elements", "symbol list must not be empty");
            }
            _ => {}
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct ScreeningConfigBuilder {
    elements: Option<ElementSelection>,
    element_data_path: Option<PathBuf>,
    max_n: Option<usize>,
    stoichiometry_threshold: Option<u32>,
    distinct_ratios: Option<bool>,
    electronegativity: Option<ElectronegativityScale>,
    electronegativity_source: Option<String>,
    pauling_threshold: Option<f64>,
    repeat_anions: Option<bool>,
    repeat_cations: Option<bool>,
    progress_reports: Option<usize>,
    parallel: Option<bool>,
    workers: Option<usize>,
    chunk_size: Option<usize>,
}

impl ScreeningConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(mut self, selection: ElementSelection) -> Self {
        self.elements = Some(selection);
        self
    }
    pub fn element_data_path(mut self, path: PathBuf) -> Self {
        self.element_data_path = Some(path);
        self
    }
    pub fn max_n(mut self, n: usize) -> Self {
        self.max_n = Some(n);
        self
    }
    pub fn stoichiometry_threshold(mut self, threshold: u32) -> Self {
        self.stoichiometry_threshold = Some(threshold);
        self
    }
    pub fn distinct_ratios(mut self, distinct: bool) -> Self {
        self.distinct_ratios = Some(distinct);
        self
    }
    pub fn electronegativity(mut self, scale: ElectronegativityScale) -> Self {
        self.electronegativity = Some(scale);
        self
    }
    /// Selects the electronegativity scale by name; resolved and validated in [`Self::build`].
    pub fn electronegativity_source(mut self, source: impl Into<String>) -> Self {
        self.electronegativity_source = Some(source.into());
        self
    }
    pub fn pauling_threshold(mut self, threshold: f64) -> Self {
        self.pauling_threshold = Some(threshold);
        self
    }
    pub fn repeat_anions(mut self, allow: bool) -> Self {
        self.repeat_anions = Some(allow);
        self
    }
    pub fn repeat_cations(mut self, allow: bool) -> Self {
        self.repeat_cations = Some(allow);
        self
    }
    pub fn progress_reports(mut self, reports: usize) -> Self {
        self.progress_reports = Some(reports);
        self
    }
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = Some(enabled);
        self
    }
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn build(self) -> Result<ScreeningConfig, ConfigError> {
        let defaults = ScreeningConfig::default();

        let electronegativity = match (self.electronegativity, self.electronegativity_source) {
            (Some(scale), _) => scale,
            (None, Some(source)) => source
                .parse::<ElectronegativityScale>()
                .map_err(|_| ConfigError::UnknownElectronegativitySource(source))?,
            (None, None) => defaults.electronegativity,
        };

        let config = ScreeningConfig {
            elements: self.elements.unwrap_or(defaults.elements),
            element_data_path: self.element_data_path,
            max_n: self.max_n.unwrap_or(defaults.max_n),
            stoichiometry_threshold: self
                .stoichiometry_threshold
                .unwrap_or(defaults.stoichiometry_threshold),
            distinct_ratios: self.distinct_ratios.unwrap_or(defaults.distinct_ratios),
            electronegativity,
            filter: PaulingTest {
                threshold: self.pauling_threshold.unwrap_or(defaults.filter.threshold),
                repeat_anions: self.repeat_anions.unwrap_or(defaults.filter.repeat_anions),
                repeat_cations: self.repeat_cations.unwrap_or(defaults.filter.repeat_cations),
            },
            progress_reports: self.progress_reports.unwrap_or(defaults.progress_reports),
            parallel: ParallelConfig {
                enabled: self.parallel.unwrap_or(defaults.parallel.enabled),
                workers: self.workers.unwrap_or(defaults.parallel.workers),
                chunk_size: self.chunk_size.unwrap_or(defaults.parallel.chunk_size),
            },
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_without_overrides_yields_defaults() {
        let config = ScreeningConfigBuilder::new().build().unwrap();
        assert_eq!(config, ScreeningConfig::default());
        assert_eq!(config.max_n, 4);
        assert_eq!(config.stoichiometry_threshold, 8);
        assert_eq!(config.progress_reports, 100);
        assert_eq!(config.parallel.workers, 4);
        assert_eq!(config.parallel.chunk_size, 10);
        assert!(config.parallel.enabled);
        assert!(config.filter.repeat_anions && config.filter.repeat_cations);
        assert_eq!(
            config.elements,
            ElementSelection::Range { first: 1, last: 103 }
        );
    }

    #[test]
    fn builder_applies_every_override() {
        let config = ScreeningConfigBuilder::new()
            .elements(ElementSelection::Symbols(vec!["H".into(), "O".into()]))
            .max_n(2)
            .stoichiometry_threshold(6)
            .distinct_ratios(false)
            .electronegativity(ElectronegativityScale::Mulliken)
            .pauling_threshold(0.5)
            .repeat_anions(false)
            .repeat_cations(false)
            .progress_reports(10)
            .parallel(false)
            .workers(2)
            .chunk_size(3)
            .build()
            .unwrap();

        assert_eq!(config.max_n, 2);
        assert_eq!(config.stoichiometry_threshold, 6);
        assert!(!config.distinct_ratios);
        assert_eq!(config.electronegativity, ElectronegativityScale::Mulliken);
        assert_eq!(config.filter.threshold, 0.5);
        assert!(!config.filter.repeat_anions && !config.filter.repeat_cations);
        assert_eq!(config.progress_reports, 10);
        assert_eq!(
            config.parallel,
            ParallelConfig {
                enabled: false,
                workers: 2,
                chunk_size: 3
            }
        );
    }

    #[test]
    fn electronegativity_source_is_parsed_by_name() {
        let config = ScreeningConfigBuilder::new()
            .electronegativity_source("Mulliken")
            .build()
            .unwrap();
        assert_eq!(config.electronegativity, ElectronegativityScale::Mulliken);
    }

    #[test]
    fn unknown_electronegativity_source_is_a_config_error() {
        let result = ScreeningConfigBuilder::new()
            .electronegativity_source("allred-rochow")
            .build();
        assert_eq!(
            result,
            Err(ConfigError::UnknownElectronegativitySource(
                "allred-rochow".to_string()
            ))
        );
    }

    #[test]
    fn max_n_is_capped_at_the_largest_tractable_size() {
        let largest = ScreeningConfigBuilder::new()
            .max_n(MAX_COMBINATION_SIZE)
            .build()
            .unwrap();
        assert_eq!(largest.max_n, MAX_COMBINATION_SIZE);

        let result = ScreeningConfigBuilder::new().max_n(30).build();
        assert_eq!(
            result,
            Err(ConfigError::InvalidParameter {
                parameter: "max_n",
                reason: format!("must be at most {}", MAX_COMBINATION_SIZE),
            })
        );
    }

    #[test]
    fn non_positive_parameters_are_rejected() {
        let cases = [
            (ScreeningConfigBuilder::new().max_n(1), "max_n"),
            (
                ScreeningConfigBuilder::new().stoichiometry_threshold(0),
                "stoichiometry_threshold",
            ),
            (
                ScreeningConfigBuilder::new().progress_reports(0),
                "progress_reports",
            ),
            (ScreeningConfigBuilder::new().workers(0), "workers"),
            (ScreeningConfigBuilder::new().chunk_size(0), "chunk_size"),
            (
                ScreeningConfigBuilder::new().pauling_threshold(f64::NAN),
                "pauling_threshold",
            ),
        ];
        for (builder, expected) in cases {
            match builder.build() {
                Err(ConfigError::InvalidParameter { parameter, .. }) => {
                    assert_eq!(parameter, expected)
                }
                other => panic!("expected invalid '{}', got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn invalid_element_selections_are_rejected() {
        for selection in [
            ElementSelection::Range { first: 0, last: 5 },
            ElementSelection::Range { first: 9, last: 3 },
            ElementSelection::Range {
                first: 1,
                last: 120,
            },
            ElementSelection::Symbols(vec![]),
        ] {
            let result = ScreeningConfigBuilder::new().elements(selection).build();
            assert!(matches!(
                result,
                Err(ConfigError::InvalidParameter {
                    parameter: "elements",
                    ..
                })
            ));
        }
    }
}
