#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// One well-formed label row as `(class_id, cx, cy, w, h, confidence)`.
pub type Row = (u32, f64, f64, f64, f64, Option<f64>);

pub fn arb_row() -> impl Strategy<Value = Row> {
    (
        0u32..20,
        0.0f64..1.0,
        0.0f64..1.0,
        0.0f64..1.0,
        0.0f64..1.0,
        proptest::option::of(0.0f64..1.0),
    )
}

/// Renders rows as label-file text, interleaving `blanks[i]` blank lines
/// before row `i`.
pub fn render_rows(rows: &[Row], blanks: &[usize]) -> String {
    let mut text = String::new();
    for (idx, (class_id, cx, cy, w, h, confidence)) in rows.iter().enumerate() {
        for _ in 0..blanks.get(idx).copied().unwrap_or(0) {
            text.push_str("  \n");
        }
        text.push_str(&format!("{class_id} {cx} {cy} {w} {h}"));
        if let Some(confidence) = confidence {
            text.push_str(&format!(" {confidence}"));
        }
        text.push('\n');
    }
    text
}

/// A path segment with no `/` and no braces.
pub fn arb_segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9._%~-]{1,12}"
}
