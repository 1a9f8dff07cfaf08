#![forbid(unsafe_code)]

//! Normalizing sample output into chartable data.
//!
//! [`classify`] looks only at `output.result` of a [`SampleRun`]:
//!
//! 1. An array whose elements coerce to at least one finite number becomes
//!    [`ChartData::List`] (first [`MAX_LIST_VALUES`] survivors, in order).
//!    An array with no survivors falls through to the next rule.
//! 2. An object carrying all of `actual`, `pnt` and `li` becomes
//!    [`ChartData::Metrics`] with entries in that fixed order; entries whose
//!    value does not coerce to a finite number are dropped.
//! 3. Anything else is [`ChartData::None`].
//!
//! Nothing here fails: malformed values are skipped, never reported.

use algoviz_core::catalog::SampleRun;
use serde::Serialize;
use serde_json::Value;

/// Most list values a chart will show.
pub const MAX_LIST_VALUES: usize = 40;

/// Result keys of a prime-counting comparison, paired with their labels.
pub const METRIC_KEYS: [(&str, &str); 3] = [
    ("actual", "π(n)"),
    ("pnt", "n / ln n"),
    ("li", "Li(n)"),
];

/// A labeled quantity in a metric comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricEntry {
    pub label: String,
    pub value: f64,
}

impl MetricEntry {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// What the visualization canvas should draw under its instructions.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    /// Vertical bars, one per value.
    List { values: Vec<f64> },
    /// Horizontal comparison bars.
    Metrics { entries: Vec<MetricEntry> },
    /// Instructions only.
    #[default]
    None,
}

impl ChartData {
    /// Short name of the variant, as used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ChartData::List { .. } => "list",
            ChartData::Metrics { .. } => "metrics",
            ChartData::None => "none",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ChartData::None)
    }

    /// Number of bars the chart draws.
    pub fn len(&self) -> usize {
        match self {
            ChartData::List { values } => values.len(),
            ChartData::Metrics { entries } => entries.len(),
            ChartData::None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Coerce a JSON value to a finite number.
///
/// Numbers pass through, booleans map to `1`/`0`, and strings are parsed
/// after trimming (blank strings are rejected). Null, arrays and objects
/// never coerce. Non-finite results are rejected.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    n.is_finite().then_some(n)
}

/// Derive chart data from a sample run.
pub fn classify(sample: &SampleRun) -> ChartData {
    let chart = classify_result(sample.result());

    #[cfg(feature = "tracing")]
    tracing::debug!(kind = chart.kind(), bars = chart.len(), "classified sample");

    chart
}

/// Chart data for an optional sample; a missing sample draws no chart.
pub fn classify_optional(sample: Option<&SampleRun>) -> ChartData {
    sample.map(classify).unwrap_or_default()
}

fn classify_result(result: Option<&Value>) -> ChartData {
    let Some(result) = result else {
        return ChartData::None;
    };

    if let Value::Array(items) = result {
        let values: Vec<f64> = items
            .iter()
            .filter_map(coerce_number)
            .take(MAX_LIST_VALUES)
            .collect();
        if !values.is_empty() {
            return ChartData::List { values };
        }
    }

    if let Value::Object(record) = result
        && METRIC_KEYS.iter().all(|(key, _)| record.contains_key(*key))
    {
        let entries = METRIC_KEYS
            .iter()
            .filter_map(|(key, label)| {
                let value = coerce_number(&record[*key])?;
                Some(MetricEntry::new(*label, value))
            })
            .collect();
        return ChartData::Metrics { entries };
    }

    ChartData::None
}
