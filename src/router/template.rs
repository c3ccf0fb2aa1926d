//! Path templates with `{name}` wildcard segments.

use std::fmt;

/// A compiled route path such as `/api/label/{image_id}`.
///
/// Each `/`-separated segment is either a literal that must match exactly or
/// a `{name}` wildcard that captures one whole request segment. Segment
/// counts must agree, so there are no optional or trailing wildcards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

impl PathTemplate {
    /// Compiles a template string.
    pub fn parse(template: &str) -> Self {
        let segments = split_path(template)
            .into_iter()
            .map(|segment| match param_name(segment) {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(segment.to_string()),
            })
            .collect();

        Self {
            raw: template.to_string(),
            segments,
        }
    }

    /// The template as written at registration.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Names of the wildcard segments, in path order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Matches a request path, returning the captured parameters.
    ///
    /// Captured values are the raw request segments; no percent-decoding is
    /// applied.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let request = split_path(path);
        if request.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::default();
        for (expected, actual) in self.segments.iter().zip(request) {
            match expected {
                Segment::Param(name) => params.insert(name, actual),
                Segment::Literal(literal) if literal == actual => {}
                Segment::Literal(_) => return None,
            }
        }
        Some(params)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parameters captured from a matched path, in path order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathParams {
    entries: Vec<(String, String)>,
}

impl PathParams {
    /// Returns the value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    // A repeated name keeps the last binding.
    fn insert(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }
}

/// Splits a path into segments, ignoring leading and trailing slashes.
///
/// An empty path (or `/`) has no segments. Interior empty segments are kept,
/// so `/a//b` has three.
pub(crate) fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').collect()
}

fn param_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}
