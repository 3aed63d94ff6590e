use serde::Serialize;
use tracing::{info, warn};

use crate::input::Measurement;
use crate::model::{CentileCalculator, Score};

#[derive(Debug, Clone, Serialize)]
pub struct ScoreRecord {
    pub id: String,
    pub value: f64,
    pub covariate: f64,
    pub score: Option<Score>,
    pub error_kind: Option<&'static str>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Stage1Output {
    pub records: Vec<ScoreRecord>,
    pub memo_hits: u64,
    pub memo_misses: u64,
}

/// Scores every measurement in input order. Row failures are recorded on the
/// row and do not abort the batch.
pub fn run_stage1(calc: &mut CentileCalculator<'_>, measurements: &[Measurement]) -> Stage1Output {
    let mut records = Vec::with_capacity(measurements.len());
    for m in measurements {
        let record = match calc.score(m.value, m.covariate) {
            Ok(score) => ScoreRecord {
                id: m.id.clone(),
                value: m.value,
                covariate: m.covariate,
                score: Some(score),
                error_kind: None,
                error: None,
            },
            Err(err) => {
                warn!("{}: {}", m.id, err);
                ScoreRecord {
                    id: m.id.clone(),
                    value: m.value,
                    covariate: m.covariate,
                    score: None,
                    error_kind: Some(err.kind()),
                    error: Some(err.to_string()),
                }
            }
        };
        records.push(record);
    }

    let failed = records.iter().filter(|r| r.score.is_none()).count();
    info!(
        "scored {} of {} measurements against {}",
        records.len() - failed,
        records.len(),
        calc.table().name()
    );

    Stage1Output {
        records,
        memo_hits: calc.memo().hits(),
        memo_misses: calc.memo().misses(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_score.rs"]
mod tests;
