use super::{load_table, resolve_universe};
use crate::cli::ElementsArgs;
use crate::error::Result;
use chemscreen::core::data::{ElectronegativityScale, Element};

pub fn run(args: ElementsArgs) -> Result<()> {
    let table = load_table(args.elements.element_data.as_deref())?;
    let universe = resolve_universe(&table, &args.elements)?;

    println!("{}", header());
    for element in universe {
        println!("{}", row(element));
    }
    Ok(())
}

fn header() -> String {
    format!(
        "{:<6} {:>3}  {:<28} {:>7} {:>8}",
        "Symbol", "Z", "Oxidation states", "Pauling", "Mulliken"
    )
}

fn row(element: &Element) -> String {
    let eneg = |scale| {
        element
            .electronegativity(scale)
            .map(|x| format!("{:.2}", x))
            .unwrap_or_else(|| "-".to_string())
    };
    format!(
        "{:<6} {:>3}  {:<28} {:>7} {:>8}",
        element.symbol,
        element.atomic_number,
        format_states(&element.oxidation_states),
        eneg(ElectronegativityScale::Pauling),
        eneg(ElectronegativityScale::Mulliken)
    )
}

fn format_states(states: &[i32]) -> String {
    if states.is_empty() {
        return "-".to_string();
    }
    states
        .iter()
        .map(|s| format!("{:+}", s))
        .collect::<Vec<_>>()
        .join(" ")
}
