use super::species::Species;

/// Options for the electronegativity-ordering ("Pauling") test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaulingTest {
    /// Margin by which every anion must out-rank every cation.
    pub threshold: f64,
    /// Tolerate the same element appearing more than once as an anion.
    pub repeat_anions: bool,
    /// Tolerate the same element appearing more than once as a cation.
    pub repeat_cations: bool,
}

impl Default for PaulingTest {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            repeat_anions: true,
            repeat_cations: true,
        }
    }
}

impl PaulingTest {
    pub fn check(&self, species: &[Species<'_>]) -> bool {
        let mut max_cation = f64::NEG_INFINITY;
        let mut min_anion = f64::INFINITY;
        let mut has_cation = false;
        let mut has_anion = false;

        for (i, s) in species.iter().enumerate() {
            if s.electronegativity.is_nan() {
                return false;
            }
            if s.is_cation() {
                if !self.repeat_cations && repeats_in_role(species, i, |o| o.is_cation()) {
                    return false;
                }
                has_cation = true;
                max_cation = max_cation.max(s.electronegativity);
            } else if s.is_anion() {
                if !self.repeat_anions && repeats_in_role(species, i, |o| o.is_anion()) {
                    return false;
                }
                has_anion = true;
                min_anion = min_anion.min(s.electronegativity);
            }
        }

        has_cation && has_anion && max_cation < min_anion - self.threshold
    }
}

fn repeats_in_role<F>(species: &[Species<'_>], idx: usize, role: F) -> bool
where
    F: Fn(&Species<'_>) -> bool,
{
    let symbol = species[idx].symbol;
    species[..idx]
        .iter()
        .any(|other| role(other) && other.symbol == symbol)
}

/// Charge-neutrality feasibility plus electronegativity ordering over parallel slices.
///
/// At least one cation and one anion must be present, and every cation must be less
/// electronegative than every anion by more than `options.threshold`. Slices of differing
/// or zero length fail.
pub fn pauling_test(
    symbols: &[&str],
    oxidation_states: &[i32],
    electronegativities: &[f64],
    options: &PaulingTest,
) -> bool {
    if symbols.is_empty()
        || symbols.len() != oxidation_states.len()
        || symbols.len() != electronegativities.len()
    {
        return false;
    }

    let species: Vec<Species<'_>> = symbols
        .iter()
        .zip(oxidation_states)
        .zip(electronegativities)
        .map(|((&symbol, &state), &eneg)| Species::new(symbol, state, eneg))
        .collect();
    options.check(&species)
}
