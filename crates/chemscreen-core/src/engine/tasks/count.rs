use crate::core::chemistry::pauling::PaulingTest;
use crate::core::chemistry::species::CombinationKey;
use crate::core::data::{ElectronegativityScale, Element};
use crate::engine::enumerator::state_assignments;
use crate::engine::error::{EngineError, Location, Stage};
use crate::engine::multiplicity::MultiplicityTable;
use itertools::Itertools;
use tracing::trace;

/// Inputs shared by every element combination counted in one round.
#[derive(Debug, Clone, Copy)]
pub struct CountTask<'a> {
    pub n: usize,
    pub table: &'a MultiplicityTable,
    pub scale: ElectronegativityScale,
    pub filter: &'a PaulingTest,
}

impl CountTask<'_> {
    /// Sums the multiplicities of every assignment of `combination` that passes the filter.
    pub fn run(&self, combination: &[&Element]) -> Result<u64, EngineError> {
        count_element_combination(combination, self)
    }
}

pub fn count_element_combination(
    combination: &[&Element],
    task: &CountTask<'_>,
) -> Result<u64, EngineError> {
    let mut count = 0u64;

    for assignment in state_assignments(combination, task.n, task.scale) {
        if !task.filter.check(&assignment) {
            continue;
        }
        let key = CombinationKey::from_species(&assignment);
        let multiplicity = task.table.get(&key).ok_or_else(|| EngineError::WorkerFailure {
            at: Location::round(task.n, Stage::Counting),
            combination: combination.iter().map(|e| e.symbol.as_str()).join(", "),
            reason: format!("no multiplicity entry for oxidation states {}", key),
        })?;
        count = count.saturating_add(multiplicity);
    }

    trace!(
        combination = %combination.iter().map(|e| e.symbol.as_str()).join("-"),
        count,
        "Counted element combination."
    );
    Ok(count)
}
