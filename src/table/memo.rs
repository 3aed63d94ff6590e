use crate::error::CentileError;
use crate::table::{Lms, ReferenceTable};

/// Single-entry memo of the last resolved covariate.
///
/// A covariate of exactly zero is never served from the memo. Errors leave the
/// previous entry untouched.
#[derive(Debug, Clone, Default)]
pub struct LmsMemo {
    last: Option<(f64, Lms)>,
    hits: u64,
    misses: u64,
}

impl LmsMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, table: &ReferenceTable, covariate: f64) -> Result<Lms, CentileError> {
        if let Some((key, lms)) = self.last {
            if key == covariate && covariate != 0.0 {
                self.hits += 1;
                return Ok(lms);
            }
        }
        let lms = table.lookup(covariate)?;
        self.misses += 1;
        self.last = Some((covariate, lms));
        Ok(lms)
    }

    pub fn last(&self) -> Option<(f64, Lms)> {
        self.last
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
