#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Evaluate the rules of one pass on the rayon pool. The result does not
    /// depend on this flag.
    pub parallel: bool,
    /// Give up with [`crate::Error::PassLimit`] if the closure needs more
    /// passes than this. `None` runs to the fixpoint.
    pub max_passes: Option<u32>,
}

impl Config {
    pub fn parallel(self, parallel: bool) -> Self {
        Self { parallel, ..self }
    }
    pub fn max_passes(self, max_passes: Option<u32>) -> Self {
        Self { max_passes, ..self }
    }
}
