//! Route table: path patterns, rewrite templates, target selection.
//!
//! Entries are parsed and validated once at startup and never mutated.
//! Selection is longest-static-prefix, first match wins; ambiguity between
//! entries is rejected at construction, not resolved at runtime.

use thiserror::Error;

/// Route configuration failures, all surfaced at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteConfigError {
    #[error("invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("rewrite {rewrite:?} references segment {name:?} not captured by the pattern")]
    UnknownRewriteSegment { rewrite: String, name: String },

    #[error("ambiguous route patterns {first:?} and {second:?} share a static prefix")]
    AmbiguousPatterns { first: String, second: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

fn parse_segments(raw: &str, allow_wildcard: bool) -> Result<(Vec<Segment>, bool), RouteConfigError> {
    let invalid = |reason: &str| RouteConfigError::InvalidPattern {
        pattern: raw.to_string(),
        reason: reason.to_string(),
    };

    let Some(rest) = raw.strip_prefix('/') else {
        return Err(invalid("must start with '/'"));
    };

    let mut segments = Vec::new();
    let mut wildcard_tail = false;
    let parts: Vec<&str> = if rest.is_empty() { Vec::new() } else { rest.split('/').collect() };

    for (index, part) in parts.iter().enumerate() {
        if *part == "**" {
            if !allow_wildcard {
                return Err(invalid("'**' is not allowed in a rewrite template"));
            }
            if index + 1 != parts.len() {
                return Err(invalid("'**' is only allowed as the final segment"));
            }
            wildcard_tail = true;
            break;
        }
        if part.is_empty() {
            return Err(invalid("empty path segment"));
        }
        if let Some(name) = part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
            if name.is_empty() {
                return Err(invalid("empty capture name"));
            }
            segments.push(Segment::Param(name.to_string()));
        } else if part.contains(['{', '}', '*']) {
            return Err(invalid("captures must span a whole segment"));
        } else {
            segments.push(Segment::Literal(part.to_string()));
        }
    }

    Ok((segments, wildcard_tail))
}

/// Path pattern: literal and `{name}` segments, optional trailing `/**`.
#[derive(Debug, Clone)]
struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
    wildcard_tail: bool,
}

impl RoutePattern {
    fn parse(raw: &str) -> Result<Self, RouteConfigError> {
        let (segments, wildcard_tail) = parse_segments(raw, true)?;
        Ok(Self {
            raw: raw.to_string(),
            segments,
            wildcard_tail,
        })
    }

    /// Leading literal segments, used for precedence and ambiguity checks.
    fn static_prefix(&self) -> String {
        let mut prefix = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => {
                    prefix.push('/');
                    prefix.push_str(text);
                }
                Segment::Param(_) => break,
            }
        }
        if prefix.is_empty() {
            prefix.push('/');
        }
        prefix
    }

    /// Match a raw request path (no query string). The wildcard tail is kept
    /// verbatim, trailing slash included.
    fn matches(&self, path: &str) -> Option<RouteMatch> {
        let mut remaining = path.strip_prefix('/')?;
        let mut captures = Vec::new();
        let mut saw_separator = false;

        for segment in &self.segments {
            if remaining.is_empty() {
                return None;
            }
            let (part, rest, separator) = match remaining.find('/') {
                Some(slash) => (&remaining[..slash], &remaining[slash + 1..], true),
                None => (remaining, "", false),
            };
            if part.is_empty() {
                return None;
            }
            match segment {
                Segment::Literal(text) => {
                    if part != text {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    captures.push((name.clone(), part.to_string()));
                }
            }
            remaining = rest;
            saw_separator = separator;
        }

        // Anything past the declared segments is the wildcard tail.
        let tail = if remaining.is_empty() {
            if saw_separator { "/".to_string() } else { String::new() }
        } else {
            format!("/{remaining}")
        };
        if !tail.is_empty() && !self.wildcard_tail {
            return None;
        }

        Some(RouteMatch { captures, tail })
    }
}

/// Result of matching a path: captured segments plus the wildcard remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    captures: Vec<(String, String)>,
    tail: String,
}

impl RouteMatch {
    fn capture(&self, name: &str) -> Option<&str> {
        self.captures
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Rewrite template: literals and `{name}` substitutions.
#[derive(Debug, Clone)]
struct RewriteTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl RewriteTemplate {
    fn parse(raw: &str) -> Result<Self, RouteConfigError> {
        let (segments, _) = parse_segments(raw, false)?;
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    fn apply(&self, matched: &RouteMatch) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(text) => path.push_str(text),
                // Validated at construction: every name is captured.
                Segment::Param(name) => path.push_str(matched.capture(name).unwrap_or_default()),
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        path
    }
}

/// One forwarding rule: pattern, rewrite, target origin.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    id: String,
    pattern: RoutePattern,
    rewrite: RewriteTemplate,
    target: String,
}

impl RouteEntry {
    /// Parse and validate a route entry. The target is a base origin such as
    /// `http://localhost:8081`; a trailing slash is dropped.
    pub fn new(
        id: impl Into<String>,
        pattern: &str,
        rewrite: &str,
        target: &str,
    ) -> Result<Self, RouteConfigError> {
        let pattern = RoutePattern::parse(pattern)?;
        let rewrite = RewriteTemplate::parse(rewrite)?;

        let captured: Vec<&String> = pattern
            .segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) => Some(name),
                Segment::Literal(_) => None,
            })
            .collect();
        for segment in &rewrite.segments {
            if let Segment::Param(name) = segment {
                if !captured.iter().any(|c| *c == name) {
                    return Err(RouteConfigError::UnknownRewriteSegment {
                        rewrite: rewrite.raw.clone(),
                        name: name.clone(),
                    });
                }
            }
        }

        Ok(Self {
            id: id.into(),
            pattern,
            rewrite,
            target: target.trim_end_matches('/').to_string(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Forwarded path: rewrite template with captures substituted, wildcard
    /// tail appended verbatim. The query string is handled by the caller.
    pub fn rewrite_path(&self, matched: &RouteMatch) -> String {
        let mut path = self.rewrite.apply(matched);
        path.push_str(&matched.tail);
        path
    }
}

/// Immutable, validated set of route entries.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Order entries by longest static prefix and reject ambiguous pairs.
    pub fn new(mut entries: Vec<RouteEntry>) -> Result<Self, RouteConfigError> {
        for (i, a) in entries.iter().enumerate() {
            for b in entries.iter().skip(i + 1) {
                if a.pattern.static_prefix() == b.pattern.static_prefix() {
                    return Err(RouteConfigError::AmbiguousPatterns {
                        first: a.pattern.raw.clone(),
                        second: b.pattern.raw.clone(),
                    });
                }
            }
        }
        entries.sort_by_key(|e| std::cmp::Reverse(e.pattern.static_prefix().len()));
        Ok(Self { entries })
    }

    /// Select the first (most specific) entry matching the path. Pure: the
    /// same path always selects the same entry.
    pub fn select(&self, path: &str) -> Option<(&RouteEntry, RouteMatch)> {
        self.entries
            .iter()
            .find_map(|entry| entry.pattern.matches(path).map(|m| (entry, m)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_entry() -> RouteEntry {
        RouteEntry::new(
            "user_service",
            "/user/v1/{operation}/**",
            "/user/v1/{operation}",
            "http://localhost:8081",
        )
        .unwrap()
    }

    #[test]
    fn pattern_must_start_with_slash() {
        let err = RouteEntry::new("r", "user/v1", "/user/v1", "http://x").unwrap_err();
        assert!(matches!(err, RouteConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn wildcard_must_be_final_segment() {
        let err = RouteEntry::new("r", "/user/**/v1", "/user/v1", "http://x").unwrap_err();
        assert!(matches!(err, RouteConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn rewrite_may_not_invent_captures() {
        let err = RouteEntry::new("r", "/user/v1/{operation}", "/core/{module}", "http://x")
            .unwrap_err();
        assert_eq!(
            err,
            RouteConfigError::UnknownRewriteSegment {
                rewrite: "/core/{module}".to_string(),
                name: "module".to_string(),
            }
        );
    }

    #[test]
    fn identity_rewrite_preserves_the_operation_path() {
        let entry = user_entry();
        let table = RouteTable::new(vec![entry]).unwrap();

        let (entry, matched) = table.select("/user/v1/registerNewUser").unwrap();
        assert_eq!(entry.id(), "user_service");
        assert_eq!(entry.rewrite_path(&matched), "/user/v1/registerNewUser");
    }

    #[test]
    fn wildcard_tail_is_preserved_verbatim() {
        let table = RouteTable::new(vec![user_entry()]).unwrap();

        let (entry, matched) = table.select("/user/v1/getUser/42/profile").unwrap();
        assert_eq!(entry.rewrite_path(&matched), "/user/v1/getUser/42/profile");

        // Trailing slash survives too.
        let (entry, matched) = table.select("/user/v1/getUser/42/").unwrap();
        assert_eq!(entry.rewrite_path(&matched), "/user/v1/getUser/42/");
    }

    #[test]
    fn missing_operation_segment_does_not_match() {
        let table = RouteTable::new(vec![user_entry()]).unwrap();
        assert!(table.select("/user/v1").is_none());
        assert!(table.select("/user/v1/").is_none());
        assert!(table.select("/account/v1/x").is_none());
    }

    #[test]
    fn captures_substitute_into_a_different_shape() {
        let entry = RouteEntry::new(
            "legacy",
            "/core/auth/v1/{operation}/**",
            "/auth/{operation}",
            "http://localhost:8082",
        )
        .unwrap();
        let table = RouteTable::new(vec![entry]).unwrap();

        let (entry, matched) = table.select("/core/auth/v1/createUser/extra").unwrap();
        assert_eq!(entry.rewrite_path(&matched), "/auth/createUser/extra");
    }

    #[test]
    fn longest_static_prefix_wins() {
        let coarse = RouteEntry::new("coarse", "/user/{rest}/**", "/user/{rest}", "http://a").unwrap();
        let fine = user_entry();
        let table = RouteTable::new(vec![coarse, fine]).unwrap();

        let (entry, _) = table.select("/user/v1/registerNewUser").unwrap();
        assert_eq!(entry.id(), "user_service");

        let (entry, _) = table.select("/user/v2/other").unwrap();
        assert_eq!(entry.id(), "coarse");
    }

    #[test]
    fn equal_static_prefixes_are_rejected_at_construction() {
        let a = user_entry();
        let b = RouteEntry::new("dup", "/user/v1/{op}/**", "/user/v1/{op}", "http://b").unwrap();
        let err = RouteTable::new(vec![a, b]).unwrap_err();
        assert!(matches!(err, RouteConfigError::AmbiguousPatterns { .. }));
    }

    #[test]
    fn selection_is_idempotent() {
        let table = RouteTable::new(vec![user_entry()]).unwrap();
        let first = table.select("/user/v1/registerNewUser").map(|(e, m)| (e.id().to_string(), m));
        let second = table.select("/user/v1/registerNewUser").map(|(e, m)| (e.id().to_string(), m));
        assert_eq!(first, second);
    }

    #[test]
    fn target_trailing_slash_is_normalized() {
        let entry =
            RouteEntry::new("r", "/user/v1/{op}", "/user/v1/{op}", "http://localhost:8081/")
                .unwrap();
        assert_eq!(entry.target(), "http://localhost:8081");
    }
}
