use crate::model::Score;
use crate::report::SummaryData;
use serde::Serialize;

pub fn render_summary_json(data: &SummaryData) -> serde_json::Result<String> {
    serde_json::to_string_pretty(data)
}

#[derive(Debug, Serialize)]
struct ScoreView<'a> {
    table: &'a str,
    value: f64,
    covariate: f64,
    #[serde(flatten)]
    score: &'a Score,
    percent: f64,
}

pub fn render_score_json(
    table: &str,
    value: f64,
    covariate: f64,
    score: &Score,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ScoreView {
        table,
        value,
        covariate,
        score,
        percent: score.centile * 100.0,
    })
}
