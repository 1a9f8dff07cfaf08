#![forbid(unsafe_code)]

//! End-to-end explorer scenarios driven through the simulator.

use std::fs;

use algoviz_core::catalog::SampleRun;
use algoviz_render::recording::Recording;
use algoviz_runtime::{
    DirSource, ExplorerApp, FetchOutcome, FetchRequest, Msg, ProgramSimulator, Tab,
};
use algoviz_widgets::chart_data::ChartData;
use algoviz_widgets::theme::Theme;
use algoviz_widgets::viz::PLACEHOLDER_STEPS;
use pretty_assertions::assert_eq;

const CATALOG: &str = r#"[
  {"name": "sieve_of_eratosthenes", "category": "sieves", "summary": "Classic sieve",
   "description": "Cross out multiples of each prime.", "complexity": "O(n log log n)",
   "parameters": [{"name": "limit", "type": "int", "description": "Upper bound", "default": 30}],
   "visualization": {"mode": "bars", "steps": "Cross out multiples of each prime"}},
  {"name": "prime_counting", "category": "analytic", "summary": "Count primes",
   "description": "Compare pi(n) with estimates.", "complexity": "O(n)",
   "visualization": {"mode": "comparison"}},
  {"name": "trial_division", "category": "basic", "summary": "Divide",
   "description": "Try every divisor.", "complexity": "O(sqrt n)"}
]"#;

fn data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("algorithms.json"), CATALOG).unwrap();
    fs::create_dir(dir.path().join("examples")).unwrap();
    fs::write(
        dir.path().join("examples/sieve_of_eratosthenes.json"),
        r#"{"input": {"limit": 30}, "output": {"result": [2, 3, 5, 7, 11, 13, 17, 19, 23, 29]}}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("examples/prime_counting.json"),
        r#"{"input": {"n": 100}, "output": {"result": {"actual": 25, "pnt": 21.71, "li": 30.13}}}"#,
    )
    .unwrap();
    dir
}

fn sample_token(sim: &ProgramSimulator<ExplorerApp>, name: &str) -> algoviz_runtime::FetchToken {
    sim.pending()
        .iter()
        .rev()
        .find_map(|r| match r {
            FetchRequest::Sample { token } if token.name == name => Some(token.clone()),
            _ => None,
        })
        .expect("sample fetch pending")
}

#[test]
fn stale_sample_never_overwrites_newer_selection() {
    let dir = data_dir();
    let source = DirSource::new(dir.path());
    let mut sim = ProgramSimulator::new(ExplorerApp::default());
    sim.init();
    // Catalog only; the first selection's sample stays in flight.
    assert!(sim.resolve_next(&source));
    let token_a = sample_token(&sim, "sieve_of_eratosthenes");

    sim.send(Msg::Select("prime_counting".into()));
    let token_b = sample_token(&sim, "prime_counting");

    // B resolves first, then A's slow response arrives.
    let sample_b = SampleRun::from_json(
        &fs::read_to_string(dir.path().join("examples/prime_counting.json")).unwrap(),
    )
    .unwrap();
    let sample_a = SampleRun::from_json(
        &fs::read_to_string(dir.path().join("examples/sieve_of_eratosthenes.json")).unwrap(),
    )
    .unwrap();
    sim.complete(FetchOutcome::Sample {
        token: token_b,
        result: Ok(sample_b),
    });
    sim.complete(FetchOutcome::Sample {
        token: token_a,
        result: Ok(sample_a),
    });

    let state = sim.model().state();
    assert_eq!(state.selected_name(), Some("prime_counting"));
    assert!(matches!(state.chart(), ChartData::Metrics { entries } if entries.len() == 3));

    sim.send(Msg::SetTab(Tab::Visualization));
    let frame = sim.capture_frame(800, 260);
    let texts: Vec<&str> = frame.texts().collect();
    assert_eq!(texts[0], "Visualization hint: comparison");
    assert!(texts.contains(&"π(n): 25.00"));
    assert!(texts.contains(&"n / ln n: 21.71"));
    assert!(texts.contains(&"Li(n): 30.13"));
    assert_eq!(frame.rects_with(Theme::SLATE.bar).count(), 0);
}

#[test]
fn stale_sample_arriving_before_fresh_one_is_also_dropped() {
    let dir = data_dir();
    let source = DirSource::new(dir.path());
    let mut sim = ProgramSimulator::new(ExplorerApp::default());
    sim.init();
    sim.resolve_next(&source);
    sim.send(Msg::Select("prime_counting".into()));

    // Resolve in issue order: A (stale) then B.
    sim.resolve_all(&source);
    let state = sim.model().state();
    assert_eq!(state.selected_name(), Some("prime_counting"));
    assert_eq!(state.chart().kind(), "metrics");
}

#[test]
fn no_hint_renders_sentinel_header_and_placeholder() {
    let dir = data_dir();
    let source = DirSource::new(dir.path());
    let mut sim = ProgramSimulator::new(ExplorerApp::default());
    sim.init();
    sim.resolve_all(&source);
    sim.send_all([
        Msg::Select("trial_division".into()),
        Msg::SetTab(Tab::Visualization),
    ]);
    sim.resolve_all(&source);

    let frame = sim.capture_frame(800, 260);
    let texts: Vec<&str> = frame.texts().collect();
    assert_eq!(texts[0], "Visualization hint: N/A");
    assert_eq!(texts[1..].concat().trim_end(), PLACEHOLDER_STEPS);
    assert_eq!(frame.rects().count(), 1);
}

#[test]
fn list_sample_draws_one_bar_per_value() {
    let dir = data_dir();
    let mut sim = ProgramSimulator::new(ExplorerApp::default());
    sim.init();
    sim.resolve_all(&DirSource::new(dir.path()));
    sim.send(Msg::SetTab(Tab::Visualization));

    let frame = sim.capture_frame(800, 260);
    let bars: Vec<_> = frame.rects_with(Theme::SLATE.bar).collect();
    assert_eq!(bars.len(), 10);
    // Tallest bar is the last value.
    assert_eq!(bars[9].height, 180.0);

    let content = sim.model().content_lines();
    assert!(content.contains(&"Rendering first 10 values from sample output.".to_string()));
}

#[test]
fn selection_returns_to_overview() {
    let dir = data_dir();
    let mut sim = ProgramSimulator::new(ExplorerApp::default());
    sim.init();
    sim.resolve_all(&DirSource::new(dir.path()));
    sim.send(Msg::SetTab(Tab::Visualization));
    sim.send(Msg::Select("prime_counting".into()));
    assert_eq!(sim.model().state().tab(), Tab::Overview);
    let mut frame = Recording::new(800, 260);
    sim.render_to(&mut frame);
    assert!(frame.is_empty());
}

#[test]
fn catalog_failure_is_visible() {
    let dir = tempfile::tempdir().unwrap();
    let mut sim = ProgramSimulator::new(ExplorerApp::default());
    sim.init();
    sim.resolve_all(&DirSource::new(dir.path()));

    let content = sim.model().content_lines();
    assert_eq!(content.len(), 1);
    assert!(content[0].starts_with("Failed to load metadata: "));
    assert_eq!(sim.logs().len(), 1);
    sim.send(Msg::SetTab(Tab::Visualization));
    assert!(sim.capture_frame(800, 260).is_empty());
}
