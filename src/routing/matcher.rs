//! Route matching logic.
//!
//! # Responsibilities
//! - Exact patterns: string equality with the request path
//! - Other patterns: segment-wise prefix match with `:param` and `*` support
//! - Report a specificity used to order overlapping routes
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Empty segments are ignored, so `/docs/` and `/docs` match alike for
//!   non-exact patterns
//! - No regex to guarantee O(n) matching

/// How specific a matcher is. Higher sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    /// Exact matchers outrank every pattern matcher.
    pub exact: bool,
    /// Literal segments in the pattern.
    pub static_segments: usize,
    /// All segments in the pattern.
    pub segments: usize,
}

/// Trait for matching request paths against a route pattern.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this route.
    fn matches(&self, path: &str) -> bool;

    fn specificity(&self) -> Specificity;
}

/// Matches one path by string equality.
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    pattern: String,
}

impl ExactMatcher {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl Matcher for ExactMatcher {
    fn matches(&self, path: &str) -> bool {
        path == self.pattern
    }

    fn specificity(&self) -> Specificity {
        let segments = segments(&self.pattern).count();
        Specificity {
            exact: true,
            static_segments: segments,
            segments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param,
    Wildcard,
}

/// Matches a path prefix, segment by segment.
///
/// `/docs/:page` matches `/docs/intro` and `/docs/intro/part-2` but not
/// `/docs`; `/files/*` matches anything under `/files`.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    segments: Vec<Segment>,
}

impl PatternMatcher {
    pub fn new(pattern: &str) -> Self {
        let mut parsed = Vec::new();
        for segment in segments(pattern) {
            if segment.starts_with('*') {
                parsed.push(Segment::Wildcard);
                break;
            } else if segment.starts_with(':') {
                parsed.push(Segment::Param);
            } else {
                parsed.push(Segment::Static(segment.to_string()));
            }
        }
        Self { segments: parsed }
    }
}

impl Matcher for PatternMatcher {
    fn matches(&self, path: &str) -> bool {
        let mut path_segments = segments(path);
        for expected in &self.segments {
            match expected {
                Segment::Wildcard => return true,
                Segment::Param => {
                    if path_segments.next().is_none() {
                        return false;
                    }
                }
                Segment::Static(literal) => {
                    if path_segments.next() != Some(literal.as_str()) {
                        return false;
                    }
                }
            }
        }
        true
    }

    fn specificity(&self) -> Specificity {
        Specificity {
            exact: false,
            static_segments: self
                .segments
                .iter()
                .filter(|s| matches!(s, Segment::Static(_)))
                .count(),
            segments: self.segments.len(),
        }
    }
}

/// Build the matcher for a route.
pub fn compile(pattern: &str, exact: bool) -> Box<dyn Matcher> {
    if exact {
        Box::new(ExactMatcher::new(pattern))
    } else {
        Box::new(PatternMatcher::new(pattern))
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
