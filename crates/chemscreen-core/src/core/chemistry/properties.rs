use super::ChemistryError;
use crate::core::data::{DataLookupError, ElectronegativityScale, ElementProvider};

/// Factor bringing Pauling electronegativities onto the Mulliken (eV) scale.
pub const PAULING_TO_MULLIKEN: f64 = 2.86;

/// Electronegativity of an element on the Mulliken-like scale used for compounds.
fn scaled_electronegativity<P: ElementProvider>(
    provider: &P,
    symbol: &str,
    scale: ElectronegativityScale,
) -> Result<f64, ChemistryError> {
    let element = provider
        .element(symbol)
        .ok_or_else(|| DataLookupError::UnknownSymbol(symbol.to_string()))?;
    let value = element
        .electronegativity(scale)
        .ok_or_else(|| ChemistryError::MissingElectronegativity {
            symbol: symbol.to_string(),
            scale: scale.to_string(),
        })?;
    Ok(match scale {
        ElectronegativityScale::Pauling => PAULING_TO_MULLIKEN * value,
        ElectronegativityScale::Mulliken => value,
    })
}

/// Stoichiometry-weighted geometric mean of elemental electronegativities.
///
/// `X(Cu2S) = (X_Cu * X_Cu * X_S)^(1/3)`. Pauling values are rescaled by
/// [`PAULING_TO_MULLIKEN`] so both sources land on the same scale.
pub fn compound_electronegativity<P, S>(
    provider: &P,
    elements: &[S],
    stoichs: &[f64],
    scale: ElectronegativityScale,
) -> Result<f64, ChemistryError>
where
    P: ElementProvider,
    S: AsRef<str>,
{
    if elements.len() != stoichs.len() {
        return Err(ChemistryError::LengthMismatch {
            elements: elements.len(),
            stoichs: stoichs.len(),
        });
    }
    if stoichs.is_empty() || stoichs.iter().any(|&s| !s.is_finite() || s <= 0.0) {
        return Err(ChemistryError::InvalidStoichiometry);
    }

    let mut weighted_log_sum = 0.0;
    for (symbol, &stoich) in elements.iter().zip(stoichs) {
        let x = scaled_electronegativity(provider, symbol.as_ref(), scale)?;
        weighted_log_sum += stoich * x.ln();
    }
    let total: f64 = stoichs.iter().sum();

    Ok((weighted_log_sum / total).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{Element, ElementTable};

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    fn toy_table() -> ElementTable {
        let element = |symbol: &str, z: u8, pauling: f64, ip: f64, ea: f64| Element {
            symbol: symbol.to_string(),
            atomic_number: z,
            name: symbol.to_string(),
            oxidation_states: vec![],
            pauling_eneg: Some(pauling),
            ionization_potential: Some(ip),
            electron_affinity: Some(ea),
        };
        ElementTable::from_elements(vec![
            element("Cu", 29, 2.0, 8.0, 0.0),
            element("S", 16, 4.0, 10.0, 6.0),
        ])
        .unwrap()
    }

    #[test]
    fn mulliken_geometric_mean_matches_hand_calculation() {
        let table = toy_table();
        // Cu: (8 + 0) / 2 = 4, S: (10 + 6) / 2 = 8; (4 * 4 * 8)^(1/3) = 128^(1/3)
        let value = compound_electronegativity(
            &table,
            &["Cu", "S"],
            &[2.0, 1.0],
            ElectronegativityScale::Mulliken,
        )
        .unwrap();
        assert_close(value, 128f64.powf(1.0 / 3.0));
    }

    #[test]
    fn pauling_source_is_rescaled_to_mulliken_scale() {
        let table = toy_table();
        let value = compound_electronegativity(
            &table,
            &["Cu", "S"],
            &[1.0, 1.0],
            ElectronegativityScale::Pauling,
        )
        .unwrap();
        assert_close(value, PAULING_TO_MULLIKEN * 8f64.sqrt());
    }

    #[test]
    fn single_element_returns_its_own_value() {
        let table = ElementTable::embedded().unwrap();
        let value =
            compound_electronegativity(table, &["O"], &[3.0], ElectronegativityScale::Pauling)
                .unwrap();
        assert_close(value, PAULING_TO_MULLIKEN * 3.44);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let table = toy_table();
        let result = compound_electronegativity(
            &table,
            &["Cu", "S"],
            &[1.0],
            ElectronegativityScale::Mulliken,
        );
        assert!(matches!(
            result,
            Err(ChemistryError::LengthMismatch {
                elements: 2,
                stoichs: 1
            })
        ));
    }

    #[test]
    fn non_positive_stoichiometries_are_rejected() {
        let table = toy_table();
        for stoichs in [[0.0, 1.0], [-1.0, 1.0], [f64::NAN, 1.0]] {
            let result = compound_electronegativity(
                &table,
                &["Cu", "S"],
                &stoichs,
                ElectronegativityScale::Mulliken,
            );
            assert!(matches!(result, Err(ChemistryError::InvalidStoichiometry)));
        }
    }

    #[test]
    fn unknown_symbols_and_missing_values_are_reported() {
        let table = ElementTable::embedded().unwrap();
        let unknown =
            compound_electronegativity(table, &["Xx"], &[1.0], ElectronegativityScale::Pauling);
        assert!(matches!(unknown, Err(ChemistryError::DataLookup(_))));

        let missing =
            compound_electronegativity(table, &["He"], &[1.0], ElectronegativityScale::Pauling);
        assert!(matches!(
            missing,
            Err(ChemistryError::MissingElectronegativity { .. })
        ));
    }
}
