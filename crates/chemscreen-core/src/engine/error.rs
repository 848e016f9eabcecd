use super::config::ConfigError;
use crate::core::data::DataLookupError;
use std::fmt;
use thiserror::Error;

/// Where in the screening run a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Loading element data and validating configuration, before any round starts.
    Setup,
    /// Evaluating element combinations against the multiplicity table.
    Counting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Setup => "setup",
            Self::Counting => "counting",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Combination size of the round; `None` before the first round.
    pub n: Option<usize>,
    pub stage: Stage,
}

impl Location {
    pub fn setup() -> Self {
        Self {
            n: None,
            stage: Stage::Setup,
        }
    }

    pub fn round(n: usize, stage: Stage) -> Self {
        Self { n: Some(n), stage }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.n {
            Some(n) => write!(f, "n = {}, stage: {}", n, self.stage),
            None => write!(f, "stage: {}", self.stage),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Element data lookup failed ({at}): {source}")]
    DataLookup {
        at: Location,
        #[source]
        source: DataLookupError,
    },

    #[error("Invalid configuration ({at}): {source}")]
    Configuration {
        at: Location,
        #[source]
        source: ConfigError,
    },

    #[error("Worker failed on [{combination}] ({at}): {reason}")]
    WorkerFailure {
        at: Location,
        combination: String,
        reason: String,
    },

    #[error("Failed to build worker pool ({at}): {reason}")]
    ThreadPool { at: Location, reason: String },
}

impl EngineError {
    pub fn location(&self) -> Location {
        match self {
            Self::DataLookup { at, .. }
            | Self::Configuration { at, .. }
            | Self::WorkerFailure { at, .. }
            | Self::ThreadPool { at, .. } => *at,
        }
    }
}
