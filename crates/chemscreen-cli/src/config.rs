pub mod defaults;

use crate::cli::{CountArgs, ElementArgs};
use crate::error::{CliError, Result};
use chemscreen::engine::config::{self as core_config, ElementSelection};
use defaults::DefaultsConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
enum PartialElementSelection {
    Symbols(Vec<String>),
    Range { first: u8, last: u8 },
}

impl From<PartialElementSelection> for ElementSelection {
    fn from(p: PartialElementSelection) -> Self {
        match p {
            PartialElementSelection::Symbols(symbols) => ElementSelection::Symbols(symbols),
            PartialElementSelection::Range { first, last } => {
                ElementSelection::Range { first, last }
            }
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialFilterConfig {
    pauling_threshold: Option<f64>,
    repeat_anions: Option<bool>,
    repeat_cations: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialParallelConfig {
    enabled: Option<bool>,
    workers: Option<usize>,
    chunk_size: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialScreeningConfig {
    elements: Option<PartialElementSelection>,
    element_data: Option<PathBuf>,
    max_n: Option<usize>,
    stoichiometry_threshold: Option<u32>,
    distinct_ratios: Option<bool>,
    electronegativity: Option<String>,
    progress_reports: Option<usize>,
    filter: Option<PartialFilterConfig>,
    parallel: Option<PartialParallelConfig>,
}

impl PartialScreeningConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn merge_with_cli(mut self, args: &CountArgs) -> Result<core_config::ScreeningConfig> {
        self.apply_set_values(&args.set_values)?;

        let defaults = DefaultsConfig::default();
        let filter = self.filter.take().unwrap_or_default();
        let parallel = self.parallel.take().unwrap_or_default();

        let elements = element_selection(&args.elements)
            .or_else(|| self.elements.take().map(Into::into))
            .unwrap_or(ElementSelection::Range {
                first: defaults.first_element,
                last: defaults.last_element,
            });

        let parallel_enabled = if args.parallelism.parallel {
            true
        } else if args.parallelism.sequential {
            false
        } else {
            parallel.enabled.unwrap_or(defaults.parallel)
        };

        let distinct_ratios = if args.raw_counts {
            false
        } else {
            self.distinct_ratios.unwrap_or(defaults.distinct_ratios)
        };

        let mut builder = core_config::ScreeningConfigBuilder::new()
            .elements(elements)
            .max_n(args.max_n.or(self.max_n).unwrap_or(defaults.max_n))
            .stoichiometry_threshold(
                args.stoichiometry_threshold
                    .or(self.stoichiometry_threshold)
                    .unwrap_or(defaults.stoichiometry_threshold),
            )
            .distinct_ratios(distinct_ratios)
            .electronegativity_source(
                args.electronegativity
                    .clone()
                    .or(self.electronegativity.take())
                    .unwrap_or(defaults.electronegativity),
            )
            .pauling_threshold(
                args.pauling_threshold
                    .or(filter.pauling_threshold)
                    .unwrap_or(defaults.pauling_threshold),
            )
            .repeat_anions(filter.repeat_anions.unwrap_or(defaults.repeat_anions))
            .repeat_cations(filter.repeat_cations.unwrap_or(defaults.repeat_cations))
            .progress_reports(
                args.progress_reports
                    .or(self.progress_reports)
                    .unwrap_or(defaults.progress_reports),
            )
            .parallel(parallel_enabled)
            .workers(args.workers.or(parallel.workers).unwrap_or(defaults.workers))
            .chunk_size(
                args.chunk_size
                    .or(parallel.chunk_size)
                    .unwrap_or(defaults.chunk_size),
            );

        if let Some(path) = args.elements.element_data.clone().or(self.element_data) {
            builder = builder.element_data_path(path);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let (key, value_str) = (key.trim(), value_str.trim());

            match key {
                "max-n" => self.max_n = Some(parse_value(key, value_str)?),
                "stoichiometry-threshold" => {
                    self.stoichiometry_threshold = Some(parse_value(key, value_str)?)
                }
                "distinct-ratios" => self.distinct_ratios = Some(parse_value(key, value_str)?),
                "electronegativity" => self.electronegativity = Some(value_str.to_string()),
                "progress-reports" => self.progress_reports = Some(parse_value(key, value_str)?),
                "element-data" => self.element_data = Some(PathBuf::from(value_str)),
                "elements" => {
                    self.elements = Some(PartialElementSelection::Symbols(
                        value_str
                            .split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect(),
                    ))
                }
                "filter.pauling-threshold" => {
                    self.filter
                        .get_or_insert_with(Default::default)
                        .pauling_threshold = Some(parse_value(key, value_str)?)
                }
                "filter.repeat-anions" => {
                    self.filter.get_or_insert_with(Default::default).repeat_anions =
                        Some(parse_value(key, value_str)?)
                }
                "filter.repeat-cations" => {
                    self.filter.get_or_insert_with(Default::default).repeat_cations =
                        Some(parse_value(key, value_str)?)
                }
                "parallel.enabled" => {
                    self.parallel.get_or_insert_with(Default::default).enabled =
                        Some(parse_value(key, value_str)?)
                }
                "parallel.workers" => {
                    self.parallel.get_or_insert_with(Default::default).workers =
                        Some(parse_value(key, value_str)?)
                }
                "parallel.chunk-size" => {
                    self.parallel.get_or_insert_with(Default::default).chunk_size =
                        Some(parse_value(key, value_str)?)
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Selection given on the command line, if any.
pub fn element_selection(args: &ElementArgs) -> Option<ElementSelection> {
    let defaults = DefaultsConfig::default();
    if let Some(symbols) = &args.elements {
        return Some(ElementSelection::Symbols(symbols.clone()));
    }
    if args.first.is_none() && args.last.is_none() {
        return None;
    }
    Some(ElementSelection::Range {
        first: args.first.unwrap_or(defaults.first_element),
        last: args.last.unwrap_or(defaults.last_element),
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!(
            "Invalid value for {}: '{}' ({})",
            key,
            value,
            std::any::type_name::<T>()
        ))
    })
}
