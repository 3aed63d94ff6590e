//! Standard normal distribution provider.
//!
//! Calculators take a `&dyn NormalDistribution`, so a single immutable
//! provider built at startup is shared by every table.

use std::f64::consts::PI;

pub trait NormalDistribution: Send + Sync {
    /// P(Z <= z).
    fn cdf(&self, z: f64) -> f64;

    /// Inverse of [`NormalDistribution::cdf`] for `p` in (0, 1).
    fn quantile(&self, p: f64) -> f64;
}

/// Hart's double-precision CDF (absolute error below 1e-14) and Acklam's
/// quantile refined by one Halley step.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardNormal;

impl NormalDistribution for StandardNormal {
    fn cdf(&self, z: f64) -> f64 {
        if z.is_nan() {
            return f64::NAN;
        }
        let x = z.abs();
        let tail = if x > 37.0 {
            0.0
        } else {
            let e = (-x * x / 2.0).exp();
            if x < 7.071_067_811_865_47 {
                let mut num = 3.526_249_659_989_11e-2 * x + 0.700_383_064_443_688;
                num = num * x + 6.373_962_203_531_65;
                num = num * x + 33.912_866_078_383;
                num = num * x + 112.079_291_497_871;
                num = num * x + 221.213_596_169_931;
                num = num * x + 220.206_867_912_376;
                let mut den = 8.838_834_764_831_84e-2 * x + 1.755_667_163_182_64;
                den = den * x + 16.064_177_579_207;
                den = den * x + 86.780_732_202_946_1;
                den = den * x + 296.564_248_779_674;
                den = den * x + 637.333_633_378_831;
                den = den * x + 793.826_512_519_948;
                den = den * x + 440.413_735_824_752;
                e * num / den
            } else {
                let mut b = x + 0.65;
                b = x + 4.0 / b;
                b = x + 3.0 / b;
                b = x + 2.0 / b;
                b = x + 1.0 / b;
                e / b / 2.506_628_274_631
            }
        };
        if z > 0.0 { 1.0 - tail } else { tail }
    }

    fn quantile(&self, p: f64) -> f64 {
        if p.is_nan() || !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        if p == 0.0 {
            return f64::NEG_INFINITY;
        }
        if p == 1.0 {
            return f64::INFINITY;
        }
        let x = acklam(p);
        let e = self.cdf(x) - p;
        let u = e * (2.0 * PI).sqrt() * (x * x / 2.0).exp();
        x - u / (1.0 + x * u / 2.0)
    }
}

const A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_690e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];
const P_LOW: f64 = 0.024_25;

fn acklam(p: f64) -> f64 {
    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        tail_ratio(q)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -tail_ratio(q)
    }
}

fn tail_ratio(q: f64) -> f64 {
    (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
        / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/normal.rs"]
mod tests;
