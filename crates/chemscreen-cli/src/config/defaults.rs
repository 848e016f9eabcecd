use chemscreen::core::data::symbols::MAX_ATOMIC_NUMBER;
use chemscreen::engine::config as core_config;

/// Values used when neither the config file nor the command line sets a parameter.
pub struct DefaultsConfig {
    pub first_element: u8,
    pub last_element: u8,
    pub max_n: usize,
    pub stoichiometry_threshold: u32,
    pub distinct_ratios: bool,
    pub electronegativity: String,
    pub pauling_threshold: f64,
    pub repeat_anions: bool,
    pub repeat_cations: bool,
    pub progress_reports: usize,
    pub parallel: bool,
    pub workers: usize,
    pub chunk_size: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            first_element: 1,
            last_element: MAX_ATOMIC_NUMBER,
            max_n: core_config::DEFAULT_MAX_N,
            stoichiometry_threshold: core_config::DEFAULT_STOICHIOMETRY_THRESHOLD,
            distinct_ratios: true,
            electronegativity: "pauling".to_string(),
            pauling_threshold: core_config::DEFAULT_PAULING_THRESHOLD,
            repeat_anions: true,
            repeat_cations: true,
            progress_reports: core_config::DEFAULT_PROGRESS_REPORTS,
            parallel: true,
            workers: core_config::DEFAULT_WORKERS,
            chunk_size: core_config::DEFAULT_CHUNK_SIZE,
        }
    }
}
