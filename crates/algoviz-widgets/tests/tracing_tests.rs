#![forbid(unsafe_code)]

//! Tracing span instrumentation tests.
//!
//! Spans enabled:
//!   cargo test -p algoviz-widgets --features tracing --test tracing_tests
//!
//! Without the feature the same renders must emit no spans at all.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use algoviz_core::catalog::AlgorithmDescriptor;
use algoviz_widgets::chart_data::ChartData;
#[cfg(feature = "tracing")]
use algoviz_widgets::chart_data::MetricEntry;
use algoviz_widgets::viz::VisualizationCanvas;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
#[allow(dead_code)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
    parent_name: Option<String>,
}

/// A tracing Layer that records every span created.
struct SpanCapture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for SpanCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);

        let parent_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());

        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
            parent_name,
        });
    }
}

fn with_captured_spans<F: FnOnce()>(f: F) -> Vec<CapturedSpan> {
    let spans = Arc::new(Mutex::new(Vec::new()));
    let layer = SpanCapture {
        spans: spans.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = spans.lock().unwrap().clone();
    captured
}

fn descriptor() -> AlgorithmDescriptor {
    serde_json::from_str(
        r#"{"name": "prime_counting", "category": "analytic", "summary": "s",
            "description": "d", "complexity": "O(n)",
            "visualization": {"mode": "comparison", "steps": "Compare estimates"}}"#,
    )
    .unwrap()
}

fn render(chart: &ChartData) {
    let canvas = VisualizationCanvas::default();
    let mut rec = canvas.config().recording();
    canvas.render(&mut rec, &descriptor(), chart);
}

// ============================================================================
// Tests
// ============================================================================

#[test]
#[cfg(feature = "tracing")]
fn canvas_span_wraps_widget_span() {
    let spans = with_captured_spans(|| {
        render(&ChartData::Metrics {
            entries: vec![MetricEntry::new("π(n)", 25.0)],
        });
    });

    let canvas = spans
        .iter()
        .find(|s| s.name == "canvas_render")
        .expect("canvas_render span");
    assert_eq!(canvas.fields.get("algorithm").map(String::as_str), Some("prime_counting"));
    assert_eq!(canvas.fields.get("chart").map(String::as_str), Some("metrics"));

    let widget = spans
        .iter()
        .find(|s| s.name == "widget_render")
        .expect("widget_render span");
    assert_eq!(widget.fields.get("widget").map(String::as_str), Some("MetricBars"));
    assert_eq!(widget.fields.get("rows").map(String::as_str), Some("1"));
    assert_eq!(widget.parent_name.as_deref(), Some("canvas_render"));
}

#[test]
#[cfg(feature = "tracing")]
fn bar_chart_span_counts_bars() {
    let spans = with_captured_spans(|| {
        render(&ChartData::List {
            values: vec![1.0, 2.0, 3.0],
        });
    });
    let widget = spans
        .iter()
        .find(|s| s.fields.get("widget").map(String::as_str) == Some("BarChart"))
        .expect("BarChart span");
    assert_eq!(widget.fields.get("bars").map(String::as_str), Some("3"));
}

#[test]
#[cfg(feature = "tracing")]
fn no_chart_has_no_widget_span() {
    let spans = with_captured_spans(|| render(&ChartData::None));
    assert!(spans.iter().any(|s| s.name == "canvas_render"));
    assert!(!spans.iter().any(|s| s.name == "widget_render"));
}

#[test]
#[cfg(not(feature = "tracing"))]
fn zero_overhead_without_feature() {
    let spans = with_captured_spans(|| {
        render(&ChartData::List {
            values: vec![1.0, 2.0],
        });
    });
    assert!(
        spans.iter().all(|s| s.name != "widget_render" && s.name != "canvas_render"),
        "spans leaked without the tracing feature: {spans:?}"
    );
}
