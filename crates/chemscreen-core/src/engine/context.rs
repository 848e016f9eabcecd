use super::config::ScreeningConfig;
use super::progress::ProgressReporter;
use crate::core::data::Element;

#[derive(Clone, Copy)]
pub struct ScreeningContext<'a> {
    /// Screened elements in canonical order.
    pub universe: &'a [&'a Element],
    pub config: &'a ScreeningConfig,
    pub reporter: &'a ProgressReporter<'a>,
}

impl<'a> ScreeningContext<'a> {
    pub fn new(
        universe: &'a [&'a Element],
        config: &'a ScreeningConfig,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            universe,
            config,
            reporter,
        }
    }
}
