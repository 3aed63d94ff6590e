use serde::Serialize;

use crate::error::CentileError;
use crate::table::Lms;

/// |z| beyond which the LMS curve is replaced by a linear tail.
pub const TAIL_Z: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZScore {
    pub z: f64,
    pub extrapolated: bool,
}

pub fn check_model(lms: &Lms) -> Result<(), CentileError> {
    if !(lms.l.is_finite() && lms.m.is_finite() && lms.s.is_finite()) {
        return Err(CentileError::InvalidModel(format!(
            "non-finite LMS ({}, {}, {})",
            lms.l, lms.m, lms.s
        )));
    }
    if lms.m <= 0.0 {
        return Err(CentileError::InvalidModel(format!(
            "median M must be positive, got {}",
            lms.m
        )));
    }
    if lms.s <= 0.0 {
        return Err(CentileError::InvalidModel(format!(
            "coefficient of variation S must be positive, got {}",
            lms.s
        )));
    }
    Ok(())
}

fn check_measurement(observed: f64) -> Result<(), CentileError> {
    if observed.is_finite() && observed > 0.0 {
        Ok(())
    } else {
        Err(CentileError::InvalidMeasurement(observed))
    }
}

/// Untruncated LMS z-score. L == 0 uses the logarithmic limit.
pub fn raw_z(lms: &Lms, observed: f64) -> Result<f64, CentileError> {
    check_model(lms)?;
    check_measurement(observed)?;
    let ratio = observed / lms.m;
    if lms.l == 0.0 {
        Ok(ratio.ln() / lms.s)
    } else {
        Ok((ratio.powf(lms.l) - 1.0) / (lms.l * lms.s))
    }
}

/// Measurement at `z` on the LMS curve: `M * (1 + L*S*z)^(1/L)`.
pub fn value_at_z(lms: &Lms, z: f64) -> Result<f64, CentileError> {
    check_model(lms)?;
    if lms.l == 0.0 {
        return Ok(lms.m * (lms.s * z).exp());
    }
    let base = 1.0 + lms.l * lms.s * z;
    if base <= 0.0 {
        return Err(CentileError::InvalidModel(format!(
            "Box-Cox base {base} is not positive at z = {z}"
        )));
    }
    Ok(lms.m * base.powf(1.0 / lms.l))
}

/// Tail anchor `v(±3)` and the SD-unit width `v(±3) - v(±2)` (always positive).
fn tail(lms: &Lms, sign: f64) -> Result<(f64, f64), CentileError> {
    let outer = value_at_z(lms, sign * TAIL_Z)?;
    let inner = value_at_z(lms, sign * (TAIL_Z - 1.0))?;
    Ok((outer, sign * (outer - inner)))
}

/// z-score with linear extrapolation beyond ±3, anchored at the LMS values for
/// z = ±2 and z = ±3.
pub fn z_score(lms: &Lms, observed: f64) -> Result<ZScore, CentileError> {
    let z = raw_z(lms, observed)?;
    if z.abs() <= TAIL_Z {
        return Ok(ZScore {
            z,
            extrapolated: false,
        });
    }
    let sign = z.signum();
    let (anchor, span) = tail(lms, sign)?;
    Ok(ZScore {
        z: sign * TAIL_Z + (observed - anchor) / span,
        extrapolated: true,
    })
}

/// Inverse of [`z_score`], including the linear tails.
pub fn value_from_z(lms: &Lms, z: f64) -> Result<f64, CentileError> {
    if !z.is_finite() {
        return Err(CentileError::InvalidModel(format!("non-finite z-score {z}")));
    }
    if z.abs() <= TAIL_Z {
        return value_at_z(lms, z);
    }
    let sign = z.signum();
    let (anchor, span) = tail(lms, sign)?;
    let value = anchor + (z - sign * TAIL_Z) * span;
    if value <= 0.0 {
        return Err(CentileError::InvalidModel(format!(
            "linear tail gives non-positive value {value} at z = {z}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/lms.rs"]
mod tests;
