use super::{load_table, resolve_universe};
use crate::cli::CompositionsArgs;
use crate::error::{CliError, Result};
use crate::utils::parser::parse_site_states;
use chemscreen::core::chemistry::lattice::{Lattice, Prototype, SiteOccupant, possible_compositions};
use tracing::info;

pub fn run(args: CompositionsArgs) -> Result<()> {
    let prototype: Prototype = args.prototype.parse()?;
    let site_states =
        parse_site_states(&args.site_states).map_err(|e| CliError::Argument(e.to_string()))?;
    let lattice = Lattice::from_prototype(prototype, site_states)?;

    let table = load_table(args.elements.element_data.as_deref())?;
    let universe = resolve_universe(&table, &args.elements)?;
    info!(
        prototype = %prototype,
        elements = universe.len(),
        "Searching for charge-neutral site assignments."
    );

    let compositions = possible_compositions(&lattice, &universe);
    for composition in &compositions {
        println!("{}", format_composition(&lattice, composition));
    }
    println!(
        "{} charge-neutral {} composition(s) found.",
        compositions.len(),
        prototype
    );
    Ok(())
}

/// `A: Sr+2  B: Ti+4  X(3): O-2`
fn format_composition(lattice: &Lattice, occupants: &[SiteOccupant<'_>]) -> String {
    lattice
        .sites()
        .iter()
        .zip(occupants)
        .map(|(site, occupant)| {
            if site.ratio == 1 {
                format!("{}: {}", site.label, occupant)
            } else {
                format!("{}({}): {}", site.label, site.ratio, occupant)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}
