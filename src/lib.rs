//! LMS growth-reference z-scores and centiles.
//!
//! A [`ReferenceTable`] holds ordered `(covariate, L, M, S)` rows and resolves
//! the LMS triple at any covariate inside its range. A [`CentileCalculator`]
//! turns an observed measurement into a z-score (linear tails beyond ±3) and a
//! centile through an injected [`NormalDistribution`].

pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod table;

pub use error::{CentileError, TableError};
pub use model::{CentileCalculator, NormalDistribution, Score, StandardNormal};
pub use table::{Lms, ReferenceTable, TableKind, TableRow};
