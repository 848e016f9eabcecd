pub mod compositions;
pub mod count;
pub mod electronegativity;
pub mod elements;

use crate::cli::ElementArgs;
use crate::config::element_selection;
use crate::error::Result;
use chemscreen::core::data::{Element, ElementTable};
use chemscreen::workflows::screen::select_universe;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// The embedded reference table, or the one at `path` when given.
pub(crate) fn load_table(path: Option<&Path>) -> Result<Cow<'static, ElementTable>> {
    match path {
        Some(path) => {
            info!("Loading element data from {:?}", path);
            Ok(Cow::Owned(ElementTable::from_path(path)?))
        }
        None => Ok(Cow::Borrowed(ElementTable::embedded()?)),
    }
}

/// Elements chosen on the command line, or every element of `table` in table order.
pub(crate) fn resolve_universe<'t>(
    table: &'t ElementTable,
    args: &ElementArgs,
) -> Result<Vec<&'t Element>> {
    match element_selection(args) {
        Some(selection) => Ok(select_universe(table, &selection)?),
        None => Ok(table.iter().collect()),
    }
}
