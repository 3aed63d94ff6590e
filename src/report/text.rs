use crate::report::{SummaryData, format_f64_6};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("LMS Centile Report\n");
    out.push_str("==================\n\n");

    out.push_str("1. Reference table\n");
    out.push_str(&format!("Table: {}\n", data.table.name));
    if let Some(kind) = data.table.kind {
        out.push_str(&format!("Kind: {}\n", kind));
    }
    if let (Some(measure), Some(covariate)) = (&data.table.measure, &data.table.covariate) {
        out.push_str(&format!("Measure: {} by {}\n", measure, covariate));
    }
    out.push_str(&format!(
        "Rows: {}\nCovariate range: {} .. {}\n\n",
        data.table.rows, data.table.covariate_min, data.table.covariate_max
    ));

    out.push_str("2. Measurements\n");
    out.push_str(&format!(
        "Scored: {} of {}\nExtrapolated beyond |z| > 3: {}\n",
        data.n_scored, data.n_measurements, data.n_extrapolated
    ));
    if data.n_failed > 0 {
        out.push_str(&format!("Failed: {}\n", data.n_failed));
        for (kind, count) in &data.failures_by_kind {
            out.push_str(&format!("  {}: {}\n", kind, count));
        }
    }
    out.push('\n');

    out.push_str("3. Distribution\n");
    match (&data.z, &data.bands) {
        (Some(z), Some(bands)) => {
            out.push_str(&format!(
                "z-score median: {} (p10 {}, p90 {})\n",
                format_f64_6(z.median),
                format_f64_6(z.p10),
                format_f64_6(z.p90)
            ));
            out.push_str(&format!(
                "Below 3rd centile: {}\nAbove 97th centile: {}\n",
                format_f64_6(bands.centile_below_3),
                format_f64_6(bands.centile_above_97)
            ));
        }
        _ => out.push_str("No measurement could be scored.\n"),
    }

    out
}
