use super::load_table;
use crate::cli::ElectronegativityArgs;
use crate::error::{CliError, Result};
use chemscreen::core::chemistry::properties::compound_electronegativity;
use chemscreen::core::data::ElectronegativityScale;
use chemscreen::core::data::symbols::normalize_symbol;
use tracing::info;

pub fn run(args: ElectronegativityArgs) -> Result<()> {
    let scale = parse_scale(&args.source)?;
    let symbols: Vec<String> = args.symbols.iter().map(|s| normalize_symbol(s)).collect();

    let table = load_table(args.element_data.as_deref())?;
    let value = compound_electronegativity(table.as_ref(), symbols.as_slice(), &args.stoichs, scale)?;
    info!(source = %scale, value, "Computed compound electronegativity.");

    println!("{}", format_result(&symbols, &args.stoichs, value));
    Ok(())
}

fn parse_scale(source: &str) -> Result<ElectronegativityScale> {
    source
        .parse::<ElectronegativityScale>()
        .map_err(|e| CliError::Argument(e.to_string()))
}

fn format_result(symbols: &[String], stoichs: &[f64], value: f64) -> String {
    let formula: String = symbols
        .iter()
        .zip(stoichs)
        .map(|(symbol, &stoich)| {
            if stoich == 1.0 {
                symbol.clone()
            } else {
                format!("{}{}", symbol, stoich)
            }
        })
        .collect();
    format!("{}: {:.4}", formula, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_names_parse_and_unknown_names_are_argument_errors() {
        assert_eq!(parse_scale("mulliken").unwrap(), ElectronegativityScale::Mulliken);
        assert_eq!(parse_scale("Pauling").unwrap(), ElectronegativityScale::Pauling);
        assert!(matches!(parse_scale("allen"), Err(CliError::Argument(msg)) if msg.contains("allen")));
    }

    #[test]
    fn formula_omits_unit_stoichiometries() {
        let symbols = vec!["Cu".to_string(), "S".to_string()];
        assert_eq!(format_result(&symbols, &[2.0, 1.0], 4.8125), "Cu2S: 4.8125");
        assert_eq!(format_result(&symbols, &[0.5, 1.5], 1.0), "Cu0.5S1.5: 1.0000");
    }
}
