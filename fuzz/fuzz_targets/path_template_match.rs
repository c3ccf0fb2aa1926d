//! Fuzz target for path-template matching.
//!
//! The input is split at the first newline into a template and a request
//! path; matching must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use yolo_viewer::router::PathTemplate;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let (template, path) = text.split_once('\n').unwrap_or((text, ""));
    let _ = PathTemplate::parse(template).matches(path);
});
