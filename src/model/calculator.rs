use serde::Serialize;
use tracing::{debug, trace};

use crate::error::CentileError;
use crate::model::lms::{self, ZScore};
use crate::model::normal::NormalDistribution;
use crate::table::{Lms, LmsMemo, ReferenceTable};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub lms: Lms,
    pub z: f64,
    /// Probability in [0, 1].
    pub centile: f64,
    pub extrapolated: bool,
}

/// z-scores and centiles against one reference table.
///
/// Centiles are probabilities in [0, 1], never percentages. Memoized LMS
/// resolution needs `&mut self`; wrap the calculator in a lock before sharing
/// it between threads, or give each thread its own.
pub struct CentileCalculator<'a> {
    table: &'a ReferenceTable,
    normal: &'a dyn NormalDistribution,
    memo: LmsMemo,
}

impl<'a> CentileCalculator<'a> {
    pub fn new(table: &'a ReferenceTable, normal: &'a dyn NormalDistribution) -> Self {
        Self {
            table,
            normal,
            memo: LmsMemo::new(),
        }
    }

    pub fn table(&self) -> &ReferenceTable {
        self.table
    }

    pub fn memo(&self) -> &LmsMemo {
        &self.memo
    }

    pub fn resolve(&mut self, covariate: f64) -> Result<Lms, CentileError> {
        let lms = self.memo.resolve(self.table, covariate)?;
        trace!("LMS at {}: L={} M={} S={}", covariate, lms.l, lms.m, lms.s);
        Ok(lms)
    }

    pub fn z_score(&mut self, observed: f64, covariate: f64) -> Result<f64, CentileError> {
        Ok(self.z_score_detail(observed, covariate)?.1.z)
    }

    pub fn centile(&mut self, observed: f64, covariate: f64) -> Result<f64, CentileError> {
        let z = self.z_score(observed, covariate)?;
        Ok(self.centile_of_z(z))
    }

    pub fn centile_of_z(&self, z: f64) -> f64 {
        self.normal.cdf(z)
    }

    pub fn score(&mut self, observed: f64, covariate: f64) -> Result<Score, CentileError> {
        let (lms, zs) = self.z_score_detail(observed, covariate)?;
        let centile = self.centile_of_z(zs.z);
        debug!(
            "{} at {} -> z={} centile={}{}",
            observed,
            covariate,
            zs.z,
            centile,
            if zs.extrapolated { " (extrapolated)" } else { "" }
        );
        Ok(Score {
            lms,
            z: zs.z,
            centile,
            extrapolated: zs.extrapolated,
        })
    }

    /// Reference measurement at `z`; the linear tails apply beyond ±3.
    pub fn value_at(&mut self, z: f64, covariate: f64) -> Result<f64, CentileError> {
        let lms = self.resolve(covariate)?;
        lms::value_from_z(&lms, z)
    }

    pub fn value_for_centile(&mut self, p: f64, covariate: f64) -> Result<f64, CentileError> {
        if !(p > 0.0 && p < 1.0) {
            return Err(CentileError::InvalidProbability(p));
        }
        let z = self.normal.quantile(p);
        self.value_at(z, covariate)
    }

    fn z_score_detail(
        &mut self,
        observed: f64,
        covariate: f64,
    ) -> Result<(Lms, ZScore), CentileError> {
        let lms = self.resolve(covariate)?;
        let zs = lms::z_score(&lms, observed)?;
        Ok((lms, zs))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/calculator.rs"]
mod tests;
