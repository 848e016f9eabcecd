use super::state::{BatchProgress, RoundSummary};

#[derive(Debug, Clone)]
pub enum Progress {
    /// Number of distinct oxidation-state keys of length `n` in the element universe.
    KeySpace { n: usize, keys: u64 },

    PhaseStart { name: &'static str },
    PhaseFinish,

    RoundStart { n: usize, total_combinations: u64 },
    Batch(BatchProgress),
    RoundFinish(RoundSummary),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
