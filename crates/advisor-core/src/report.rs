use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::analysis::{AnalysisResult, ANALYSIS_CATEGORIES, REQUIREMENT_CATEGORIES};

/// Format styles supported by the default report renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn file_extension(self) -> &'static str {
        match self {
            OutputFormat::Human => "txt",
            OutputFormat::Json => "json",
        }
    }
}

/// Produce a report string from an `AnalysisResult` in the desired format.
pub fn render_report(result: &AnalysisResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Human => render_human(result),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
    }
}

/// Reports are keyed by the uploaded filename with its extension replaced.
pub fn report_path(reports_dir: &Path, original_filename: &str, format: OutputFormat) -> PathBuf {
    let stem = Path::new(original_filename)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("report");
    reports_dir.join(format!("{stem}.{}", format.file_extension()))
}

fn render_human(result: &AnalysisResult) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "Project Analysis Report")?;
    writeln!(out)?;

    writeln!(out, "Project Overview")?;
    if result.overview.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for paragraph in &result.overview {
        writeln!(out, "{paragraph}")?;
        writeln!(out)?;
    }

    writeln!(out, "Requirements")?;
    for category in REQUIREMENT_CATEGORIES {
        render_section(
            &mut out,
            heading(category, "Requirements"),
            result.requirements.get(category),
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Analysis")?;
    for category in ANALYSIS_CATEGORIES {
        render_section(
            &mut out,
            heading(category, "Analysis"),
            result.analysis.get(category),
        )?;
    }

    if !result.uml.is_empty() {
        writeln!(out)?;
        writeln!(out, "Diagrams")?;
        writeln!(out, "{}", result.uml)?;
    }
    Ok(out)
}

fn render_section(
    out: &mut String,
    heading: String,
    items: Option<&Vec<String>>,
) -> anyhow::Result<()> {
    writeln!(out)?;
    writeln!(out, "{heading}")?;
    let items = items.map(Vec::as_slice).unwrap_or_default();
    if items.is_empty() {
        writeln!(out, "  (none)")?;
        return Ok(());
    }
    for (index, item) in items.iter().enumerate() {
        writeln!(out, "  {}. {item}", index + 1)?;
    }
    Ok(())
}

fn heading(category: &str, suffix: &str) -> String {
    let name = match category {
        "non_functional" => "Non-Functional".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        }
    };
    format!("{name} {suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            overview: vec!["A procurement platform.".into(), "It tracks orders.".into()],
            requirements: BTreeMap::from([
                ("business".to_string(), vec!["The system shall cut costs.".to_string()]),
                ("functional".to_string(), vec!["Users must upload documents.".to_string()]),
                ("non_functional".to_string(), Vec::new()),
                ("technical".to_string(), vec!["Runs on Linux.".to_string()]),
            ]),
            analysis: BTreeMap::from([
                ("functional".to_string(), vec!["Feasible; Complexity: Low".to_string()]),
                ("technical".to_string(), Vec::new()),
                ("impact".to_string(), Vec::new()),
            ]),
            uml: "Class Diagram\n\n```mermaid\nclassDiagram\n```".into(),
        }
    }

    #[test]
    fn human_report_lists_every_section() {
        let output = render_report(&sample_result(), OutputFormat::Human).unwrap();
        for heading in [
            "Project Analysis Report",
            "Project Overview",
            "Business Requirements",
            "Functional Requirements",
            "Non-Functional Requirements",
            "Technical Requirements",
            "Functional Analysis",
            "Technical Analysis",
            "Impact Analysis",
            "Diagrams",
        ] {
            assert!(output.contains(heading), "missing {heading}");
        }
        assert!(output.contains("  1. The system shall cut costs."));
        assert!(output.contains("  (none)"));
    }

    #[test]
    fn json_report_round_trips() {
        let output = render_report(&sample_result(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["overview"].as_array().unwrap().len(), 2);
        assert_eq!(
            value["requirements"]["business"][0],
            "The system shall cut costs."
        );
        assert!(value["uml"].as_str().unwrap().contains("```mermaid"));
    }

    #[test]
    fn report_path_replaces_the_upload_extension() {
        let dir = Path::new("/tmp/reports");
        assert_eq!(
            report_path(dir, "proposal.docx", OutputFormat::Human),
            dir.join("proposal.txt")
        );
        assert_eq!(
            report_path(dir, "proposal.docx", OutputFormat::Json),
            dir.join("proposal.json")
        );
    }
}
