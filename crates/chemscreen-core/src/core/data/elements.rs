use super::symbols;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

const EMBEDDED_DATASET: &str = include_str!("../../../data/elements.csv");
const EMBEDDED_ORIGIN: &str = "<embedded elements.csv>";

static EMBEDDED_TABLE: OnceLock<Result<ElementTable, String>> = OnceLock::new();

#[derive(Debug, Error)]
pub enum DataLookupError {
    #[error("Element '{0}' is not present in the reference dataset")]
    UnknownSymbol(String),

    #[error("No element with atomic number {0} in the reference dataset")]
    UnknownAtomicNumber(u8),

    #[error("Invalid atomic number range {first}..={last}")]
    InvalidRange { first: u8, last: u8 },

    #[error("Duplicate element '{0}' in the reference dataset")]
    DuplicateSymbol(String),

    #[error("Invalid record for element '{symbol}': {reason}")]
    InvalidRecord { symbol: String, reason: String },

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },

    #[error("Embedded element dataset is corrupt: {0}")]
    Embedded(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unrecognized electronegativity source '{0}'. Expected 'pauling' or 'mulliken'.")]
pub struct UnknownScaleError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElectronegativityScale {
    #[default]
    Pauling,
    Mulliken,
}

impl FromStr for ElectronegativityScale {
    type Err = UnknownScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pauling" => Ok(Self::Pauling),
            "mulliken" => Ok(Self::Mulliken),
            _ => Err(UnknownScaleError(s.to_string())),
        }
    }
}

impl fmt::Display for ElectronegativityScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pauling => write!(f, "pauling"),
            Self::Mulliken => write!(f, "mulliken"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub symbol: String,
    pub atomic_number: u8,
    pub name: String,
    /// Known non-zero oxidation states, ascending.
    pub oxidation_states: Vec<i32>,
    pub pauling_eneg: Option<f64>,
    /// First ionization potential in eV.
    pub ionization_potential: Option<f64>,
    /// Electron affinity in eV.
    pub electron_affinity: Option<f64>,
}

impl Element {
    /// Mulliken electronegativity `(IP + EA) / 2` in eV; a missing EA counts as zero.
    pub fn mulliken_eneg(&self) -> Option<f64> {
        self.ionization_potential
            .map(|ip| (ip + self.electron_affinity.unwrap_or(0.0)) / 2.0)
    }

    pub fn electronegativity(&self, scale: ElectronegativityScale) -> Option<f64> {
        match scale {
            ElectronegativityScale::Pauling => self.pauling_eneg,
            ElectronegativityScale::Mulliken => self.mulliken_eneg(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ElementRecord {
    symbol: String,
    number: u8,
    name: String,
    oxidation_states: String,
    pauling: Option<f64>,
    ionization_potential: Option<f64>,
    electron_affinity: Option<f64>,
}

impl TryFrom<ElementRecord> for Element {
    type Error = DataLookupError;

    fn try_from(record: ElementRecord) -> Result<Self, Self::Error> {
        let invalid = |reason: String| DataLookupError::InvalidRecord {
            symbol: record.symbol.clone(),
            reason,
        };

        match symbols::atomic_number(&record.symbol) {
            Some(z) if z == record.number => {}
            Some(z) => {
                return Err(invalid(format!(
                    "atomic number {} does not match the expected {}",
                    record.number, z
                )));
            }
            None => return Err(invalid("not a recognized element symbol".to_string())),
        }

        let mut oxidation_states = record
            .oxidation_states
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<i32>()
                    .map_err(|_| invalid(format!("invalid oxidation state '{}'", token)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if oxidation_states.contains(&0) {
            return Err(invalid("oxidation state 0 is not allowed".to_string()));
        }
        oxidation_states.sort_unstable();
        oxidation_states.dedup();

        Ok(Self {
            symbol: record.symbol.trim().to_string(),
            atomic_number: record.number,
            name: record.name,
            oxidation_states,
            pauling_eneg: record.pauling,
            ionization_potential: record.ionization_potential,
            electron_affinity: record.electron_affinity,
        })
    }
}

/// Read access to element reference data.
///
/// The screening engine only ever reads through this trait, so any source that can answer
/// symbol and atomic-number queries can stand in for the embedded table.
pub trait ElementProvider {
    fn element(&self, symbol: &str) -> Option<&Element>;

    fn by_atomic_number(&self, atomic_number: u8) -> Option<&Element>;

    /// Symbols of elements `first..=last`, ordered by atomic number.
    fn ordered_elements(&self, first: u8, last: u8) -> Result<Vec<&str>, DataLookupError> {
        if first == 0 || first > last {
            return Err(DataLookupError::InvalidRange { first, last });
        }
        (first..=last)
            .map(|z| {
                self.by_atomic_number(z)
                    .map(|element| element.symbol.as_str())
                    .ok_or(DataLookupError::UnknownAtomicNumber(z))
            })
            .collect()
    }

    /// Resolves every symbol, preserving the requested order.
    fn lookup_many<S: AsRef<str>>(&self, symbols: &[S]) -> Result<Vec<&Element>, DataLookupError> {
        symbols
            .iter()
            .map(|symbol| {
                let symbol = symbol.as_ref();
                self.element(symbol)
                    .ok_or_else(|| DataLookupError::UnknownSymbol(symbol.to_string()))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ElementTable {
    elements: Vec<Element>,
    by_symbol: HashMap<String, usize>,
    by_number: HashMap<u8, usize>,
}

impl ElementTable {
    pub fn from_elements(elements: Vec<Element>) -> Result<Self, DataLookupError> {
        let mut by_symbol = HashMap::with_capacity(elements.len());
        let mut by_number = HashMap::with_capacity(elements.len());
        for (idx, element) in elements.iter().enumerate() {
            if by_symbol.insert(element.symbol.clone(), idx).is_some() {
                return Err(DataLookupError::DuplicateSymbol(element.symbol.clone()));
            }
            by_number.insert(element.atomic_number, idx);
        }
        Ok(Self {
            elements,
            by_symbol,
            by_number,
        })
    }

    pub fn from_reader<R: Read>(reader: R, origin: &str) -> Result<Self, DataLookupError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut elements = Vec::new();
        for result in reader.deserialize::<ElementRecord>() {
            let record = result.map_err(|e| DataLookupError::Csv {
                path: origin.to_string(),
                source: e,
            })?;
            elements.push(Element::try_from(record)?);
        }
        Self::from_elements(elements)
    }

    pub fn from_path(path: &Path) -> Result<Self, DataLookupError> {
        let file = std::fs::File::open(path).map_err(|e| DataLookupError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_reader(file, &path.to_string_lossy())
    }

    /// The bundled reference dataset, parsed on first use and cached for the process lifetime.
    pub fn embedded() -> Result<&'static Self, DataLookupError> {
        EMBEDDED_TABLE
            .get_or_init(|| {
                Self::from_reader(EMBEDDED_DATASET.as_bytes(), EMBEDDED_ORIGIN)
                    .map_err(|e| e.to_string())
            })
            .as_ref()
            .map_err(|msg| DataLookupError::Embedded(msg.clone()))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }
}

impl ElementProvider for ElementTable {
    fn element(&self, symbol: &str) -> Option<&Element> {
        self.by_symbol
            .get(symbol.trim())
            .map(|&idx| &self.elements[idx])
    }

    fn by_atomic_number(&self, atomic_number: u8) -> Option<&Element> {
        self.by_number
            .get(&atomic_number)
            .map(|&idx| &self.elements[idx])
    }
}
