use crate::error::CentileError;
use crate::table::TableRow;

/// First row whose covariate equals `covariate`.
pub fn exact_index(rows: &[TableRow], covariate: f64) -> Option<usize> {
    let idx = rows.partition_point(|r| r.covariate < covariate);
    (idx < rows.len() && rows[idx].covariate == covariate).then_some(idx)
}

/// Greatest index with covariate <= `covariate`.
pub fn floor_index(rows: &[TableRow], covariate: f64) -> Option<usize> {
    rows.partition_point(|r| r.covariate <= covariate).checked_sub(1)
}

/// Smallest index with covariate >= `covariate`.
pub fn ceil_index(rows: &[TableRow], covariate: f64) -> Option<usize> {
    let idx = rows.partition_point(|r| r.covariate < covariate);
    (idx < rows.len()).then_some(idx)
}

pub fn bounding_indices(rows: &[TableRow], covariate: f64) -> Option<(usize, usize)> {
    Some((floor_index(rows, covariate)?, ceil_index(rows, covariate)?))
}

pub fn interpolate(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> Result<f64, CentileError> {
    if x1 == x0 {
        return Err(CentileError::DegenerateInterval {
            covariate: x,
            at: x0,
        });
    }
    Ok(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
}

#[cfg(test)]
#[path = "../../tests/src_inline/table/search.rs"]
mod tests;
