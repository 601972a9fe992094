//! Path patterns.
//!
//! A pattern is a `/`-separated list of static segments and `:name`
//! placeholders, e.g. `/tours/:slug`. Matching is structural: the path must
//! have the same number of segments, static segments must be equal ignoring
//! ASCII case, and each placeholder captures one non-empty segment.

use std::fmt;
use std::str::FromStr;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

use crate::error::RouteError;

/// Characters escaped when a parameter value is written into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern such as `/company/:slug`.
    ///
    /// # Errors
    ///
    /// The pattern must start with `/`, contain no empty segments, and use
    /// each placeholder name at most once. Placeholder names are ASCII
    /// alphanumerics and `_`.
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &str| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let body = pattern
            .strip_prefix('/')
            .ok_or_else(|| invalid("must start with '/'"))?;
        let body = body.strip_suffix('/').unwrap_or(body);

        let mut segments = Vec::new();
        if !body.is_empty() {
            for part in body.split('/') {
                if part.is_empty() {
                    return Err(invalid("empty path segment"));
                }
                match part.strip_prefix(':') {
                    Some(name) => {
                        if name.is_empty()
                            || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                        {
                            return Err(invalid("placeholder names must be alphanumeric"));
                        }
                        if segments
                            .iter()
                            .any(|s| matches!(s, Segment::Param(n) if n == name))
                        {
                            return Err(invalid("duplicate placeholder name"));
                        }
                        segments.push(Segment::Param(name.to_string()));
                    }
                    None => segments.push(Segment::Static(part.to_string())),
                }
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// Returns the pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholder names in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Whether the pattern has any placeholder.
    pub fn is_dynamic(&self) -> bool {
        self.param_names().next().is_some()
    }

    /// Match already-split path segments, capturing placeholder values.
    pub(crate) fn match_segments(&self, parts: &[&str]) -> Option<Params> {
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::default();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) => {
                    if !expected.eq_ignore_ascii_case(part) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    // Undecodable escapes are kept verbatim.
                    let value = percent_decode_str(part)
                        .decode_utf8()
                        .map_or_else(|_| part.to_string(), |v| v.into_owned());
                    params.push(name.clone(), value);
                }
            }
        }
        Some(params)
    }

    /// Match a full path.
    pub fn matches(&self, path: &str) -> Option<Params> {
        self.match_segments(&split_path(path))
    }

    /// Build a concrete path, percent-encoding parameter values.
    ///
    /// `route` names the route in error messages.
    pub(crate) fn build(&self, route: &str, params: &[(&str, &str)]) -> Result<String, RouteError> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(value) => path.push_str(value),
                Segment::Param(name) => {
                    let value = params
                        .iter()
                        .find(|(key, _)| key == name)
                        .map(|(_, value)| *value)
                        .filter(|value| !value.is_empty())
                        .ok_or_else(|| RouteError::MissingParam {
                            route: route.to_string(),
                            param: name.clone(),
                        })?;
                    path.extend(utf8_percent_encode(value, SEGMENT));
                }
            }
        }
        Ok(path)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for RoutePattern {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Split a navigation path into segments.
///
/// Drops any query string or fragment and a single trailing slash, so
/// `/tours/?page=2` and `/tours` both yield `["tours"]`. The root path yields
/// no segments.
pub(crate) fn split_path(path: &str) -> Vec<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);

    if path.is_empty() {
        Vec::new()
    } else {
        path.split('/').collect()
    }
}

/// Placeholder values captured by a match, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    fn push(&mut self, name: String, value: String) {
        self.0.push((name, value));
    }

    /// The value captured for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
