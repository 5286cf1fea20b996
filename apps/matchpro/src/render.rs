//! Result Renderer: turns a finished analysis, or an error message, into
//! terminal output. Presentation only.

use clap::ValueEnum;
use serde_json::json;

use crate::analysis::models::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn render_result(
    result: &AnalysisResult,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Json => serde_json::to_string_pretty(result),
    }
}

pub fn render_error(message: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("Error: {message}"),
        OutputFormat::Json => json!({ "error": { "message": message } }).to_string(),
    }
}

fn render_text(result: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str("Analysis Report\n===============\n\n");
    out.push_str(&format!(
        "Match score: {}% ({})\n\n",
        result.match_score,
        result.band().label()
    ));

    out.push_str("Summary\n");
    out.push_str(&format!("  {}\n\n", result.summary));
    out.push_str(&format!("Experience alignment: {}\n", result.years_experience_match));
    out.push_str(&format!("Cultural fit: {}\n\n", result.cultural_fit));

    push_list(&mut out, "Matching skills", &result.matching_skills);
    push_list(&mut out, "Missing skills", &result.missing_skills);

    out.push_str("Recommendations\n");
    if result.recommendations.is_empty() {
        out.push_str("  none\n");
    }
    for (i, recommendation) in result.recommendations.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, recommendation));
    }
    out
}

fn push_list(out: &mut String, heading: &str, items: &[String]) {
    out.push_str(heading);
    out.push('\n');
    if items.is_empty() {
        out.push_str("  none\n");
    }
    for item in items {
        out.push_str(&format!("  - {item}\n"));
    }
    out.push('\n');
}
