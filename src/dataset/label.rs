//! YOLO label-file parser.
//!
//! A label file holds one box per line:
//!
//! ```text
//! <class_id> <cx> <cy> <width> <height> [confidence]
//! ```
//!
//! Coordinates are normalized to the image size. Blank lines are skipped.

use std::path::Path;

use super::model::{class_name_for, BoundingBox, ClassMap, LabelItem};
use crate::error::ViewerError;

/// Minimum number of whitespace-separated tokens on a label line.
const MIN_TOKENS: usize = 5;

/// Parse the full text of one label file.
///
/// `path` is only used to give errors a location. Rows come back in file
/// order; the first bad line aborts the whole file.
pub fn parse_label_file(
    content: &str,
    path: &Path,
    classes: &ClassMap,
) -> Result<Vec<LabelItem>, ViewerError> {
    let mut items = Vec::new();

    for (line_idx, line) in content.lines().enumerate() {
        let line_num = line_idx + 1;
        let Some(item) = parse_label_line(line, path, line_num, classes)? else {
            continue;
        };
        items.push(item);
    }

    Ok(items)
}

/// Parse a single label line, returning `None` for blank lines.
pub fn parse_label_line(
    line: &str,
    path: &Path,
    line_num: usize,
    classes: &ClassMap,
) -> Result<Option<LabelItem>, ViewerError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    // Anything past the confidence column is ignored, so there is no need to
    // collect it.
    let tokens: Vec<&str> = trimmed.split_whitespace().take(MIN_TOKENS + 1).collect();

    if tokens.len() < MIN_TOKENS {
        return Err(ViewerError::MalformedLabelLine {
            path: path.to_path_buf(),
            line: line_num,
            content: line.trim_end().to_string(),
        });
    }

    let invalid_numeric = || ViewerError::InvalidNumericValue {
        path: path.to_path_buf(),
        line: line_num,
        content: line.trim_end().to_string(),
    };

    let class_id = tokens[0].parse::<i64>().map_err(|_| invalid_numeric())?;
    let mut coords = [0.0_f64; 4];
    for (slot, raw) in coords.iter_mut().zip(&tokens[1..MIN_TOKENS]) {
        *slot = raw.parse::<f64>().map_err(|_| invalid_numeric())?;
    }
    let [cx, cy, width, height] = coords;

    let confidence = match tokens.get(MIN_TOKENS) {
        Some(raw) => Some(
            raw.parse::<f64>()
                .map_err(|_| ViewerError::InvalidConfidence {
                    path: path.to_path_buf(),
                    line: line_num,
                    content: line.trim_end().to_string(),
                })?,
        ),
        None => None,
    };

    Ok(Some(LabelItem {
        class_id,
        class_name: class_name_for(classes, class_id),
        bbox: BoundingBox::from_cxcywh(cx, cy, width, height),
        confidence,
    }))
}

/// Fuzz-only entrypoint for single-line label parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_label_line(input: &str) -> Result<(), ViewerError> {
    let _ = parse_label_line(input, Path::new("<fuzz>"), 1, &ClassMap::new())?;
    Ok(())
}
