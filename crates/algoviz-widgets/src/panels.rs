#![forbid(unsafe_code)]

//! Text panels around the canvas.
//!
//! These are plain data-display views: each function turns catalog records
//! into the lines a host shows (sidebar, header, tab bodies). They carry no
//! layout logic beyond indentation, so a terminal host can print them as-is
//! and a browser host can map each line onto an element.

use algoviz_core::catalog::{AlgorithmDescriptor, Catalog, Parameter, SampleRun};
use serde_json::Value;

use crate::chart_data::ChartData;

pub const APP_TITLE: &str = "PrimeNag";
pub const SIDEBAR_SUBTITLE: &str = "Select an algorithm to inspect.";
pub const LOADING_TEXT: &str = "Loading metadata…";
pub const NO_PARAMETERS: &str = "No parameters documented.";
pub const NO_INSTRUCTIONS: &str = "No visualization instructions yet.";
pub const NO_SAMPLE: &str = "No sample output available.";
pub const METRICS_HINT: &str = "Comparing analytic estimates against actuals.";

/// Message shown when the catalog cannot be loaded.
pub fn error_banner(message: &str) -> String {
    format!("Failed to load metadata: {message}")
}

/// Sidebar listing, grouped by category in first-seen order.
///
/// The selected entry is marked with `>`.
pub fn sidebar_lines(catalog: &Catalog, selected: Option<&str>) -> Vec<String> {
    let mut lines = vec![APP_TITLE.to_string(), SIDEBAR_SUBTITLE.to_string()];
    for group in catalog.group_by_category() {
        lines.push(String::new());
        lines.push(group.category.to_string());
        for meta in group.members {
            let marker = if selected == Some(meta.name.as_str()) {
                '>'
            } else {
                ' '
            };
            lines.push(format!("{marker} {}  {}", meta.name, meta.summary));
        }
    }
    lines
}

/// Content header for the selected algorithm.
pub fn header_lines(meta: &AlgorithmDescriptor) -> Vec<String> {
    vec![
        meta.category.clone(),
        meta.name.clone(),
        meta.summary.clone(),
        format!("Complexity: {}", meta.complexity),
    ]
}

/// Tab strip with the active label bracketed.
pub fn tab_bar(labels: &[&str], active: usize) -> String {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            if i == active {
                format!("[{label}]")
            } else {
                format!(" {label} ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a parameter default the way a browser stringifies it: strings
/// verbatim, arrays comma-joined, everything else as compact JSON.
///
/// A `null` inside an array joins as an empty item.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

fn parameter_lines(param: &Parameter, lines: &mut Vec<String>) {
    lines.push(format!("- {} ({})", param.name, param.type_label));
    lines.push(format!("  {}", param.description));
    if let Some(default) = &param.default {
        lines.push(format!("  Default: {}", display_value(default)));
    }
}

/// Overview tab: the parameter list.
pub fn overview_lines(meta: &AlgorithmDescriptor) -> Vec<String> {
    let mut lines = vec!["Parameters".to_string()];
    if meta.parameters.is_empty() {
        lines.push(NO_PARAMETERS.to_string());
    }
    for param in &meta.parameters {
        parameter_lines(param, &mut lines);
    }
    lines
}

/// Docs tab: description and references.
pub fn docs_lines(meta: &AlgorithmDescriptor) -> Vec<String> {
    let mut lines = vec!["Description".to_string(), meta.description.clone()];
    if !meta.references.is_empty() {
        lines.push(String::new());
        lines.push("References".to_string());
        lines.extend(meta.references.iter().map(|r| format!("- {r}")));
    }
    lines
}

/// One-line note about what the chart shows, if anything.
pub fn chart_hint(chart: &ChartData) -> Option<String> {
    match chart {
        ChartData::List { values } => Some(format!(
            "Rendering first {} values from sample output.",
            values.len()
        )),
        ChartData::Metrics { .. } => Some(METRICS_HINT.to_string()),
        ChartData::None => None,
    }
}

fn pretty(record: &serde_json::Map<String, Value>) -> Vec<String> {
    serde_json::to_string_pretty(record)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Details shown beside the canvas on the visualization tab.
pub fn details_lines(
    meta: &AlgorithmDescriptor,
    sample: Option<&SampleRun>,
    chart: &ChartData,
) -> Vec<String> {
    let mut lines = vec![
        "Instructions".to_string(),
        meta.visualization_steps()
            .unwrap_or(NO_INSTRUCTIONS)
            .to_string(),
    ];
    lines.extend(chart_hint(chart));

    match sample {
        Some(sample) => {
            lines.push("Sample Input".to_string());
            lines.extend(pretty(&sample.input));
            lines.push("Sample Output".to_string());
            lines.extend(pretty(&sample.output));
        }
        None => lines.push(NO_SAMPLE.to_string()),
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Catalog {
        Catalog::from_json(
            &json!([
                {"name": "trial_division", "category": "basic", "summary": "Divide",
                 "description": "d", "complexity": "O(sqrt n)",
                 "parameters": [{"name": "n", "type": "int", "description": "Upper bound", "default": 100}]},
                {"name": "sieve", "category": "sieves", "summary": "Cross out",
                 "description": "Mark multiples.", "complexity": "O(n log log n)",
                 "references": ["https://en.wikipedia.org/wiki/Sieve_of_Eratosthenes"],
                 "visualization": {"mode": "bars", "steps": "Cross out multiples"}},
                {"name": "wheel", "category": "basic", "summary": "Skip",
                 "description": "d", "complexity": "O(n)"}
            ])
            .to_string(),
        )
        .unwrap()
    }

    #[test]
    fn sidebar_groups_and_marks_selection() {
        let lines = sidebar_lines(&catalog(), Some("wheel"));
        assert_eq!(lines[0], APP_TITLE);
        assert_eq!(
            &lines[2..],
            &[
                "",
                "basic",
                "  trial_division  Divide",
                "> wheel  Skip",
                "",
                "sieves",
                "  sieve  Cross out",
            ]
        );
    }

    #[test]
    fn header_shows_complexity() {
        let cat = catalog();
        let lines = header_lines(cat.get("sieve").unwrap());
        assert_eq!(lines[3], "Complexity: O(n log log n)");
    }

    #[test]
    fn overview_lists_defaults() {
        let cat = catalog();
        let lines = overview_lines(cat.get("trial_division").unwrap());
        assert!(lines.contains(&"  Default: 100".to_string()));
        let lines = overview_lines(cat.get("wheel").unwrap());
        assert_eq!(lines, vec!["Parameters", NO_PARAMETERS]);
    }

    #[test]
    fn default_values_stringify_like_a_browser() {
        assert_eq!(display_value(&json!("auto")), "auto");
        assert_eq!(display_value(&json!([1, 2, 3])), "1,2,3");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(2.5)), "2.5");
    }

    #[test]
    fn nulls_inside_arrays_join_empty() {
        assert_eq!(display_value(&json!([1, null])), "1,");
        assert_eq!(display_value(&json!([1, [null, 2]])), "1,,2");
        assert_eq!(display_value(&json!(null)), "null");
    }

    #[test]
    fn docs_skip_empty_references() {
        let cat = catalog();
        assert_eq!(docs_lines(cat.get("wheel").unwrap()).len(), 2);
        let lines = docs_lines(cat.get("sieve").unwrap());
        assert_eq!(lines.last().unwrap(), "- https://en.wikipedia.org/wiki/Sieve_of_Eratosthenes");
    }

    #[test]
    fn details_without_sample() {
        let cat = catalog();
        let lines = details_lines(cat.get("wheel").unwrap(), None, &ChartData::None);
        assert_eq!(lines, vec!["Instructions", NO_INSTRUCTIONS, NO_SAMPLE]);
    }

    #[test]
    fn details_with_list_sample() {
        let cat = catalog();
        let sample = SampleRun::from_json(r#"{"input": {"n": 10}, "output": {"result": [2, 3, 5, 7]}}"#)
            .unwrap();
        let chart = crate::chart_data::classify(&sample);
        let lines = details_lines(cat.get("sieve").unwrap(), Some(&sample), &chart);
        assert_eq!(lines[1], "Cross out multiples");
        assert_eq!(lines[2], "Rendering first 4 values from sample output.");
        assert_eq!(lines[3], "Sample Input");
        assert_eq!(lines[4], "{");
        assert_eq!(lines[5], "  \"n\": 10");
        assert!(lines.contains(&"Sample Output".to_string()));
    }

    #[test]
    fn tab_bar_brackets_active() {
        assert_eq!(
            tab_bar(&["Overview", "Docs", "Visualization"], 1),
            " Overview  [Docs]  Visualization "
        );
    }

    #[test]
    fn error_banner_text() {
        assert_eq!(error_banner("boom"), "Failed to load metadata: boom");
    }
}
