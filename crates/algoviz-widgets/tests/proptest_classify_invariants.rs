#![forbid(unsafe_code)]

//! Property tests for sample classification and chart layout.

use algoviz_core::catalog::SampleRun;
use algoviz_core::geometry::Rect;
use algoviz_widgets::bars::BarChart;
use algoviz_widgets::chart_data::{ChartData, MAX_LIST_VALUES, classify};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn sample(result: Value) -> SampleRun {
    let mut output = Map::new();
    output.insert("result".into(), result);
    SampleRun::new(Map::new(), output)
}

fn junk() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        "[a-z]{1,6}".prop_map(Value::String),
        Just(json!("NaN")),
        Just(json!([1])),
        Just(json!({})),
    ]
}

proptest! {
    #[test]
    fn finite_lists_keep_order_and_cap(values in prop::collection::vec(-1e6f64..1e6, 1..120)) {
        let chart = classify(&sample(json!(values)));
        let expected: Vec<f64> = values.iter().copied().take(MAX_LIST_VALUES).collect();
        prop_assert_eq!(chart, ChartData::List { values: expected });
    }

    #[test]
    fn junk_only_lists_are_none(items in prop::collection::vec(junk(), 0..20)) {
        prop_assert_eq!(classify(&sample(Value::Array(items))), ChartData::None);
    }

    #[test]
    fn junk_is_skipped_not_fatal(
        items in prop::collection::vec(prop_oneof![junk(), (-1e3f64..1e3).prop_map(|v| json!(v))], 0..60)
    ) {
        let finite = items.iter().filter(|v| v.is_number()).count();
        match classify(&sample(Value::Array(items))) {
            ChartData::List { values } => prop_assert_eq!(values.len(), finite.min(MAX_LIST_VALUES)),
            ChartData::None => prop_assert_eq!(finite, 0),
            ChartData::Metrics { .. } => prop_assert!(false, "arrays never become metrics"),
        }
    }

    #[test]
    fn metric_entries_never_exceed_three(
        actual in prop_oneof![junk(), (0f64..1e4).prop_map(|v| json!(v))],
        pnt in prop_oneof![junk(), (0f64..1e4).prop_map(|v| json!(v))],
        li in prop_oneof![junk(), (0f64..1e4).prop_map(|v| json!(v))],
    ) {
        let chart = classify(&sample(json!({"actual": actual, "pnt": pnt, "li": li})));
        let ChartData::Metrics { entries } = chart else {
            return Err(TestCaseError::fail("expected metrics"));
        };
        prop_assert!(entries.len() <= 3);
        prop_assert!(entries.iter().all(|e| e.value.is_finite()));
        let order = ["π(n)", "n / ln n", "Li(n)"];
        let positions: Vec<usize> = entries
            .iter()
            .map(|e| order.iter().position(|l| *l == e.label).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn bars_stay_inside_the_chart_band(values in prop::collection::vec(0f64..1e6, 1..80)) {
        let area = Rect::new(0.0, 0.0, 800.0, 260.0);
        let bars = BarChart::new(&values).layout(area);
        prop_assert_eq!(bars.len(), values.len());
        for bar in bars {
            prop_assert!(bar.height >= 0.0 && bar.height <= 180.0 + 1e-9);
            prop_assert!((bar.bottom() - 240.0).abs() < 1e-9);
            prop_assert!(bar.x >= 16.0 && bar.x < 784.0);
        }
    }
}
