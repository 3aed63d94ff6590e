pub mod calculator;
pub mod lms;
pub mod normal;

pub use calculator::{CentileCalculator, Score};
pub use normal::{NormalDistribution, StandardNormal};
