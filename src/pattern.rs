use crate::error::PatternError;
use crate::version::Version;
use core::{
    cmp::Ordering,
    fmt::{self, Display},
    str::FromStr,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The comparison relation a pattern applies when selecting a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `*` or the empty pattern: the first non-prerelease entry in the list.
    Any,
    /// `=`, or no operator at all: entries comparing equal to the operand.
    Eq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `latest`: the head of the list unconditionally, prerelease and build
    /// included.
    Latest,
}

impl Op {
    /// The operator's textual token. The implicit equality renders as the
    /// empty string, so `"1.2.3"` round-trips without a leading `=`.
    pub fn token(&self) -> &'static str {
        match self {
            Op::Any => "*",
            Op::Eq => "",
            Op::Gt => ">",
            Op::GtEq => ">=",
            Op::Lt => "<",
            Op::LtEq => "<=",
            Op::Latest => "latest",
        }
    }
}

/// A user-supplied rule for selecting one version out of a candidate list,
/// e.g. `">=2.3"`, `"latest"`, or `"*"`.
///
/// A pattern is an [Op] plus, for the comparison operators, a version operand
/// parsed in loose mode — so `">=2.3"` leaves the patch as a wildcard and
/// matches any `2.3.x`. `version` is `None` exactly when the operator takes
/// no operand ([Op::Any] and [Op::Latest]).
///
/// # Examples
///
/// ```
/// use fontver::{sort_descending, Version, VersionPattern};
///
/// let mut versions: Vec<Version> = ["2.0.0", "2.3.5", "2.3.4"]
///     .iter()
///     .map(|s| Version::parse(s).unwrap())
///     .collect();
/// sort_descending(&mut versions);
///
/// let pattern: VersionPattern = ">=2.3".parse().unwrap();
/// let (index, found) = pattern.find(&versions).unwrap();
/// assert_eq!(index, 0);
/// assert_eq!(found.to_string(), "2.3.5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPattern {
    /// The comparison relation.
    pub op: Op,
    /// The operand for the comparison operators; `None` for [Op::Any] and
    /// [Op::Latest].
    pub version: Option<Version>,
}

impl VersionPattern {
    /// Parses a pattern string.
    ///
    /// The grammar is: the empty string or a bare `*` for [Op::Any], the
    /// literal `latest` (case-sensitive) for [Op::Latest], or an optional
    /// operator token (`=`, `>`, `>=`, `<`, `<=`; equality when omitted)
    /// followed by a version in loose mode. Surrounding whitespace is
    /// tolerated.
    ///
    /// # Errors
    ///
    /// - [PatternError::ExpectedVersion] if an operator has no version after
    ///   it, e.g. `">="`.
    /// - [PatternError::Version] if the operand does not parse.
    pub fn parse(input: &str) -> Result<Self, PatternError> {
        let s = input.trim();

        if s.is_empty() || s == "*" {
            return Ok(VersionPattern {
                op: Op::Any,
                version: None,
            });
        }
        if s == "latest" {
            return Ok(VersionPattern {
                op: Op::Latest,
                version: None,
            });
        }

        let (op, rest) = if let Some(rest) = s.strip_prefix(">=") {
            (Op::GtEq, rest)
        } else if let Some(rest) = s.strip_prefix("<=") {
            (Op::LtEq, rest)
        } else if let Some(rest) = s.strip_prefix('>') {
            (Op::Gt, rest)
        } else if let Some(rest) = s.strip_prefix('<') {
            (Op::Lt, rest)
        } else if let Some(rest) = s.strip_prefix('=') {
            (Op::Eq, rest)
        } else {
            (Op::Eq, s)
        };

        let rest = rest.trim_start();
        if rest.is_empty() {
            return Err(PatternError::ExpectedVersion {
                input: input.to_owned(),
            });
        }

        let version = Version::parse_loose(rest)?;
        Ok(VersionPattern {
            op,
            version: Some(version),
        })
    }

    /// Finds the most recent version in `versions` matching this pattern.
    ///
    /// `versions` must already be sorted most-recent-first (see
    /// [sort_descending](crate::sort_descending)); the scan returns the first
    /// entry the operator accepts, so `">=2.0"` selects the *newest* version
    /// that is at least 2.0, not the oldest.
    ///
    /// Returns the matching entry and its index — callers map the index back
    /// to whatever per-version metadata they hold alongside the list — or
    /// `None` when nothing matches. No match is an expected outcome, not an
    /// error.
    pub fn find<'v>(&self, versions: &'v [Version]) -> Option<(usize, &'v Version)> {
        if versions.is_empty() {
            return None;
        }

        if self.op == Op::Latest {
            return Some((0, &versions[0]));
        }

        if self.op == Op::Any && self.version.is_none() {
            return versions.iter().enumerate().find(|(_, v)| !v.is_prerelease());
        }

        let operand = self.version.as_ref()?;
        versions
            .iter()
            .enumerate()
            .find(|(_, v)| match v.compare(operand) {
                Ordering::Equal => matches!(self.op, Op::Eq | Op::LtEq | Op::GtEq),
                Ordering::Less => matches!(self.op, Op::Lt | Op::LtEq),
                Ordering::Greater => matches!(self.op, Op::Gt | Op::GtEq),
            })
    }
}

impl Display for VersionPattern {
    /// Renders the operator token followed by the operand, or the fixed
    /// literals `*` / `latest`. Parsing the rendered form yields an equal
    /// pattern.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.op.token())?;
        if let Some(version) = &self.version {
            write!(f, "{version}")?;
        }
        Ok(())
    }
}

impl FromStr for VersionPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionPattern::parse(s)
    }
}

impl Serialize for VersionPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
