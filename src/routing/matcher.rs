//! Path pattern matching.
//!
//! # Responsibilities
//! - Compile route patterns such as `/products/{id:digits}`
//! - Match request paths segment by segment (case-sensitive)
//! - Capture named parameters, enforcing their constraints
//!
//! # Design Decisions
//! - No regex: constraints are a closed set checked per segment
//! - A trailing slash is a distinct path (`/products/` ≠ `/products`)
//! - Parameter values are returned as raw strings; typing happens in the
//!   handler's extractor

/// Restriction on what a captured segment may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Any non-empty segment.
    Any,
    /// One or more ASCII digits.
    Digits,
}

impl Constraint {
    fn admits(self, segment: &str) -> bool {
        match self {
            Constraint::Any => !segment.is_empty(),
            Constraint::Digits => !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param { name: String, constraint: Constraint },
}

/// Parameters captured from a matched path, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    /// Value captured for `name`, if the pattern declares it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern.
    ///
    /// Segments of the form `{name}` capture anything; `{name:digits}`
    /// captures digit-only segments.
    pub fn parse(pattern: &str) -> Self {
        let segments = split(pattern)
            .map(|part| match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(param) => {
                    let (name, constraint) = match param.split_once(':') {
                        Some((name, "digits")) => (name, Constraint::Digits),
                        Some((name, _)) => (name, Constraint::Any),
                        None => (param, Constraint::Any),
                    };
                    Segment::Param {
                        name: name.to_string(),
                        constraint,
                    }
                }
                None => Segment::Literal(part.to_string()),
            })
            .collect();

        Self { segments }
    }

    /// Match `path`, returning captured parameters on success.
    pub fn captures(&self, path: &str) -> Option<PathParams> {
        let mut params = Vec::new();
        let mut parts = split(path);

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(expected) => {
                    if part != expected {
                        return None;
                    }
                }
                Segment::Param { name, constraint } => {
                    if !constraint.admits(part) {
                        return None;
                    }
                    params.push((name.clone(), part.to_string()));
                }
            }
        }

        // Extra trailing segments mean the path is longer than the pattern.
        if parts.next().is_some() {
            return None;
        }
        Some(PathParams(params))
    }

    pub fn matches(&self, path: &str) -> bool {
        self.captures(path).is_some()
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    // "/" has no segments at all; everything else splits on '/'.
    let empty = trimmed.is_empty();
    trimmed.split('/').filter(move |_| !empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern() {
        let pattern = PathPattern::parse("/products");

        assert!(pattern.matches("/products"));
        assert!(!pattern.matches("/products/")); // Trailing slash is distinct
        assert!(!pattern.matches("/Products")); // Case sensitive
        assert!(!pattern.matches("/products/1"));
        assert!(!pattern.matches("/"));
    }

    #[test]
    fn test_digit_constrained_param() {
        let pattern = PathPattern::parse("/products/{id:digits}");

        let params = pattern.captures("/products/42").unwrap();
        assert_eq!(params.get("id"), Some("42"));

        assert!(pattern.matches("/products/0007"));
        assert!(!pattern.matches("/products/abc"));
        assert!(!pattern.matches("/products/-1"));
        assert!(!pattern.matches("/products/4a"));
        assert!(!pattern.matches("/products/"));
        assert!(!pattern.matches("/products/1/extra"));
    }

    #[test]
    fn test_unconstrained_param() {
        let pattern = PathPattern::parse("/tags/{tag}");
        assert_eq!(pattern.captures("/tags/blue").unwrap().get("tag"), Some("blue"));
        assert!(!pattern.matches("/tags/"));
    }

    #[test]
    fn test_root_pattern() {
        let pattern = PathPattern::parse("/");
        assert!(pattern.matches("/"));
        assert!(pattern.captures("/").unwrap().is_empty());
        assert!(!pattern.matches("/healthz"));
    }
}
