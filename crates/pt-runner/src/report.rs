//! Rendering of the end-of-run Pareto report.

use crate::study::ParetoReport;
use pt_types::PtResult;

pub fn render_text(report: &ParetoReport) -> String {
    let objectives = report
        .directions
        .iter()
        .zip(["score", "sigma"])
        .map(|(direction, name)| format!("{direction} {name}"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![format!(
        "Pareto-optimal trials for {} ({} of {} completed):",
        objectives,
        report.front.len(),
        report.trials_completed
    )];
    lines.extend(report.front.iter().map(|t| {
        format!(
            "  trial {}: t1={}, t2={} -> score={}, sigma={}",
            t.number, t.t1, t.t2, t.score, t.sigma
        )
    }));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

pub fn render_json(report: &ParetoReport) -> PtResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
