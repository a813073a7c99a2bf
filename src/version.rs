use crate::error::VersionError;
use core::{
    cmp::Ordering,
    fmt::{self, Display},
    str::FromStr,
};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::LazyLock;

/// The tolerant version grammar.
///
/// Finds the leftmost version-like token sequence in arbitrary text: a major
/// component (a digit run, or a bare `*` at the start of the input), then
/// optional `.`-separated minor and patch components, then at most one
/// trailing tag. Whitespace around the dots is tolerated. The trailing
/// portion is either a non-alphanumeric separator followed by a tag (group 4
/// and 5), or an alphanumeric run abutting the last numeric group (group 6).
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        (?: ^\s*\* | \b(\d+) )                 # 1: major
        (?:
            \s*\.\s* (\d+|\*)                  # 2: minor
            (?: \s*\.\s* (\d+|\*) )?           # 3: patch
        )?
        (?:
            ([^A-Za-z0-9]+) ([A-Za-z0-9.-]*)   # 4: separator, 5: tag
          | ([A-Za-z0-9.-]+)                   # 6: run fused to the last group
        )?",
    )
    .expect("version grammar is a valid regex")
});

/// One numeric slot of a [Version]: either a concrete value or explicitly
/// left unspecified.
///
/// Unspecified components come from loose/pattern parsing (`"2.3"` leaves the
/// patch unconstrained) and compare equal to any concrete value, which is what
/// makes patterns like `>=2.3` match every `2.3.x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Matches any concrete value during comparison. Rendered as `*`.
    Wildcard,
    /// A concrete numeric value.
    Numeric(u32),
}

impl Component {
    /// Returns true if this component is the wildcard.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Component::Wildcard)
    }
}

/// A version extracted from free text: up to three numeric components plus an
/// optional prerelease tag and an optional build tag.
///
/// Font metadata rarely contains clean semantic versions, so the parser is
/// deliberately tolerant: it extracts what it can from strings like
/// `"Version 2.000;GOOG;noto-source:20170915:90ef993387c0"` (which yields
/// `2.0.0+GOOG`) and only fails when the input contains no numeric content at
/// all.
///
/// Two parsing modes exist. [Version::parse] is the strict mode used for
/// concrete versions: absent components default to `0`. [Version::parse_loose]
/// is the pattern mode: absent components become [Component::Wildcard], so
/// `"2.3"` can stand for "any 2.3.x".
///
/// A `Version` is a plain value. It is constructed once, by parsing, and only
/// read afterwards.
///
/// # Examples
///
/// ```
/// use fontver::{Component, Version};
///
/// let v = Version::parse("Version 2.003;xyz").unwrap();
/// assert_eq!(v.major, Component::Numeric(2));
/// assert_eq!(v.minor, Component::Numeric(3));
/// assert_eq!(v.patch, Component::Numeric(0));
/// assert_eq!(v.build, "xyz");
/// assert_eq!(v.to_string(), "2.3.0+xyz");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    /// The major component.
    pub major: Component,
    /// The minor component.
    pub minor: Component,
    /// The patch component.
    pub patch: Component,
    /// The prerelease tag; empty means none. A version with a prerelease
    /// orders before the same version without one.
    pub prerelease: String,
    /// The build tag; empty means none. Only used as a final ordering
    /// tie-break, never as a semantic component.
    pub build: String,
}

impl Version {
    /// Creates a fully-specified version with no prerelease or build tag.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major: Component::Numeric(major),
            minor: Component::Numeric(minor),
            patch: Component::Numeric(patch),
            prerelease: String::new(),
            build: String::new(),
        }
    }

    /// Parses a version from arbitrary text in strict mode: components that
    /// are absent from the input become `0`.
    ///
    /// Surrounding non-version text is ignored, so `"Version 2.003"` parses
    /// as `2.3.0`. Leading zeros are decimal (`"001"` is `1`).
    ///
    /// # Errors
    ///
    /// - [VersionError::MalformedVersion] if the input contains no digit run
    ///   and no leading wildcard marker.
    /// - [VersionError::ComponentOverflow] if a digit run exceeds the 32-bit
    ///   unsigned range.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        Self::parse_with_default(input, Component::Numeric(0))
    }

    /// Parses a version in loose (pattern) mode: components that are absent
    /// from the input become [Component::Wildcard].
    ///
    /// This is the mode pattern operands use, so that `">=2.3"` leaves the
    /// patch unconstrained. An explicit `*` token (`"2.*.4"`) takes the
    /// mode's default too, so here it stays a wildcard, while strict mode
    /// concretizes it to `0` — strict parsing always yields fully-specified
    /// components.
    ///
    /// # Errors
    ///
    /// Same conditions as [Version::parse].
    pub fn parse_loose(input: &str) -> Result<Self, VersionError> {
        Self::parse_with_default(input, Component::Wildcard)
    }

    /// The single grammar behind both modes, parameterized by the value an
    /// absent component takes.
    fn parse_with_default(input: &str, default: Component) -> Result<Self, VersionError> {
        let caps = VERSION_RE
            .captures(input)
            .ok_or_else(|| VersionError::MalformedVersion {
                input: input.to_owned(),
            })?;

        let mut v = Version {
            major: default,
            minor: default,
            patch: default,
            prerelease: String::new(),
            build: String::new(),
        };

        // group 1 is absent when the bare-leading-wildcard alternative matched
        if let Some(major) = caps.get(1) {
            v.major = Component::Numeric(parse_component(major.as_str(), input)?);
        }

        if let Some(minor) = caps.get(2) {
            let minor = minor.as_str();
            if minor != "*" {
                v.minor = Component::Numeric(parse_component(minor, input)?);
            }

            let fused = caps.get(6).map_or("", |m| m.as_str());

            if let Some(patch) = caps.get(3) {
                let patch = patch.as_str();
                if patch != "*" {
                    v.patch = Component::Numeric(parse_component(patch, input)?);
                }
                if !fused.is_empty() {
                    // e.g. "1.2.0df73": the digits belong to a build tag, not
                    // to the patch
                    v.patch = default;
                    v.build = format!("{patch}{fused}");
                }
            } else if !fused.is_empty() {
                // e.g. "13.0d3e20": the digits belong to a build tag, not to
                // the minor
                v.minor = default;
                v.build = format!("{minor}{fused}");
            }
        }

        if let Some(tag) = caps.get(5) {
            let tag = tag.as_str();
            if !tag.is_empty() {
                if caps.get(4).is_some_and(|sep| sep.as_str() == "-") {
                    // e.g. "2.3.0-beta"
                    v.prerelease = tag.to_owned();
                } else {
                    // e.g. "2.3.0+xyz", "2.003;xyz", "1.06 uh"
                    v.build = tag.to_owned();
                }
            }
        }

        Ok(v)
    }

    /// Returns true if this version carries a prerelease tag.
    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// Three-way comparison honoring wildcard, prerelease, and build-tag
    /// precedence.
    ///
    /// Major, minor, and patch are compared in order; a pair where either
    /// side is a wildcard contributes no distinction. After the numeric
    /// components, a version with a prerelease is less than one without
    /// (`2.3.4-beta` precedes `2.3.4`); two prereleases compare lexically.
    /// Build tags compare lexically last, purely as a deterministic
    /// tie-break.
    ///
    /// Wildcards make this relation non-transitive (`2` equals both `2.1.0`
    /// and `2.2.0`, which are unequal), so `Version` deliberately does not
    /// implement [Ord]. Over fully-specified versions — which is what a
    /// repository index supplies — the relation is a total order.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::cmp::Ordering;
    /// use fontver::Version;
    ///
    /// let newer = Version::parse("2.3.5").unwrap();
    /// let older = Version::parse("2.3.4").unwrap();
    /// assert_eq!(newer.compare(&older), Ordering::Greater);
    ///
    /// let any_23 = Version::parse_loose("2.3").unwrap();
    /// assert_eq!(newer.compare(&any_23), Ordering::Equal);
    /// ```
    pub fn compare(&self, other: &Self) -> Ordering {
        let pairs = [
            (self.major, other.major),
            (self.minor, other.minor),
            (self.patch, other.patch),
        ];
        for (a, b) in pairs {
            if let (Component::Numeric(a), Component::Numeric(b)) = (a, b) {
                match a.cmp(&b) {
                    Ordering::Equal => {}
                    unequal => return unequal,
                }
            }
        }

        // a prerelease precedes its unqualified release
        match (self.prerelease.is_empty(), other.prerelease.is_empty()) {
            (false, true) => return Ordering::Less,
            (true, false) => return Ordering::Greater,
            _ => {}
        }
        match self.prerelease.cmp(&other.prerelease) {
            Ordering::Equal => {}
            unequal => return unequal,
        }

        self.build.cmp(&other.build)
    }
}

fn parse_component(digits: &str, input: &str) -> Result<u32, VersionError> {
    // the grammar only hands over digit runs, so the sole failure is overflow
    digits.parse().map_err(|_| VersionError::ComponentOverflow {
        input: input.to_owned(),
        digits: digits.to_owned(),
    })
}

/// Sorts versions most-recent-first, the order [the pattern
/// matcher](crate::VersionPattern::find) requires.
///
/// The sort is stable. Repository indexes supply fully-specified versions,
/// over which [Version::compare] is a total order; sorting a list that mixes
/// in wildcarded versions is not meaningful.
pub fn sort_descending(versions: &mut [Version]) {
    versions.sort_by(|a, b| b.compare(a));
}

impl Display for Version {
    /// Renders the canonical string form: `MAJOR.MINOR.PATCH` with `*` for
    /// wildcarded components, trailing wildcards omitted (`"2.3"`, `"2"`),
    /// then `-PRERELEASE` and `+BUILD` when present. The fully-unspecified
    /// version renders as the empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Component::{Numeric, Wildcard};

        match (self.major, self.minor, self.patch) {
            (Numeric(ma), Numeric(mi), Numeric(pa)) => write!(f, "{ma}.{mi}.{pa}")?,
            (Numeric(ma), Numeric(mi), Wildcard) => write!(f, "{ma}.{mi}")?,
            (Numeric(ma), Wildcard, Numeric(pa)) => write!(f, "{ma}.*.{pa}")?,
            (Numeric(ma), Wildcard, Wildcard) => write!(f, "{ma}")?,
            (Wildcard, Numeric(mi), Numeric(pa)) => write!(f, "*.{mi}.{pa}")?,
            (Wildcard, Numeric(mi), Wildcard) => write!(f, "*.{mi}")?,
            (Wildcard, Wildcard, Numeric(pa)) => write!(f, "*.*.{pa}")?,
            (Wildcard, Wildcard, Wildcard) => {}
        }

        if !self.prerelease.is_empty() {
            write!(f, "-{}", self.prerelease)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }

        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    /// Strict-mode parse; see [Version::parse].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The tolerant-grammar corpus: version strings as they appear in real
    /// font files, and the canonical form they normalize to in strict mode.
    #[test]
    fn test_parse_font_version_strings() {
        let cases = [
            // well-formed semver
            ("2.3.4", "2.3.4"),
            ("2.3.4+xy123", "2.3.4+xy123"),
            ("2.3.4+1.2.3b", "2.3.4+1.2.3b"),
            ("2.3.4-beta", "2.3.4-beta"),
            // common
            ("2.003", "2.3.0"),
            ("2.003;xyz", "2.3.0+xyz"),
            ("2.4;1b5054a", "2.4.0+1b5054a"),
            ("2.003 ; xyz", "2.3.0+xyz"),
            ("2.003-next", "2.3.0-next"),
            ("13.0d3e20", "13.0.0+0d3e20"),
            ("13.xd3e20", "13.0.0+xd3e20"),
            ("Version 2.003", "2.3.0"),
            ("version 2.003", "2.3.0"),
            ("version  2.003 ", "2.3.0"),
            ("Version 2912.010", "2912.10.0"),
            // uncommon (from real font files)
            ("1", "1.0.0"),
            ("0", "0.0.0"),
            ("001", "1.0.0"),
            ("001.001", "1.1.0"),
            ("Version 1.06 uh", "1.6.0+uh"),
            (
                "Version 2.000;GOOG;noto-source:20170915:90ef993387c0",
                "2.0.0+GOOG",
            ),
            (
                "Version 1.00 August 22, 2017, initial release",
                "1.0.0+August",
            ),
            (
                "Version 001.003;Core 1.0.01;otf.5.02.2298;42.06W",
                "1.3.0+Core",
            ),
            ("Version 009.014; wf-rip", "9.14.0+wf-rip"),
            (
                "Version 3.000;PS 1.000;hotconv 1.0.50;makeotf.lib2.0.16970",
                "3.0.0+PS",
            ),
            (
                "OTF 1.022;PS 001.001;Core 1.0.31;makeotf.lib1.4.1585",
                "1.22.0+PS",
            ),
        ];

        for (input, expected) in cases {
            let v = Version::parse(input).unwrap();
            assert_eq!(expected, v.to_string(), "input: {input:?}");
        }
    }

    #[test]
    fn test_parse_malformed() {
        let inputs = ["", "   ", "...", "-", ";;", "beta", "Version x"];

        for input in inputs {
            for parsed in [Version::parse(input), Version::parse_loose(input)] {
                assert_eq!(
                    Err(VersionError::MalformedVersion {
                        input: input.to_owned()
                    }),
                    parsed,
                    "input: {input:?}"
                );
            }
        }
    }

    #[test]
    fn test_parse_overflow() {
        // one past u32::MAX
        let inputs = ["4294967296", "2.4294967296", "2.3.4294967296"];

        for input in inputs {
            assert!(
                matches!(
                    Version::parse(input),
                    Err(VersionError::ComponentOverflow { .. })
                ),
                "input: {input:?}"
            );
        }

        assert!(Version::parse("4294967295").is_ok());
    }

    #[test]
    fn test_strict_round_trip() {
        let inputs = ["2.3.4", "0.0.0", "10.20.30", "2.3.4-beta", "2.3.4+xy123"];

        for input in inputs {
            let v = Version::parse(input).unwrap();
            assert_eq!(input, v.to_string());
            // idempotence: reparsing the rendered form yields an equal value
            assert_eq!(v, Version::parse(&v.to_string()).unwrap());
        }
    }

    #[test]
    fn test_loose_defaults_and_display() {
        let cases = [
            ("2.3.4", "2.3.4"),
            ("2.3", "2.3"),
            ("2", "2"),
            ("2.*.4", "2.*.4"),
            ("*.3.4", "*.3.4"),
            ("*.3", "*.3"),
            ("*.*.4", "*.*.4"),
            ("*", ""),
        ];

        for (input, rendered) in cases {
            let v = Version::parse_loose(input).unwrap();
            assert_eq!(rendered, v.to_string(), "input: {input:?}");
        }

        let v = Version::parse_loose("2.3").unwrap();
        assert_eq!(v.major, Component::Numeric(2));
        assert_eq!(v.minor, Component::Numeric(3));
        assert_eq!(v.patch, Component::Wildcard);
    }

    #[test]
    fn test_explicit_wildcard_takes_mode_default() {
        // a literal `*` token takes the same value as an absent component:
        // zero in strict mode, a wildcard in loose mode
        let strict = Version::parse("2.*.4").unwrap();
        assert_eq!(strict.minor, Component::Numeric(0));
        assert_eq!(strict.to_string(), "2.0.4");

        let loose = Version::parse_loose("2.*.4").unwrap();
        assert_eq!(loose.minor, Component::Wildcard);
        assert_eq!(loose.to_string(), "2.*.4");

        let v = Version::parse("*").unwrap();
        assert_eq!(v, Version::new(0, 0, 0));
    }

    #[test]
    fn test_fused_build_tag() {
        let v = Version::parse("13.0d3e20").unwrap();
        assert_eq!(v.major, Component::Numeric(13));
        assert_eq!(v.minor, Component::Numeric(0));
        assert_eq!(v.patch, Component::Numeric(0));
        assert_eq!(v.build, "0d3e20");

        // fused onto the patch instead of the minor
        let v = Version::parse("1.2.0df73").unwrap();
        assert_eq!(v.to_string(), "1.2.0+0df73");

        // a run abutting a bare major is not a build tag
        let v = Version::parse("13d3e20").unwrap();
        assert_eq!(v.to_string(), "13.0.0");
    }

    #[test]
    fn test_only_first_trailing_token_captured() {
        let v = Version::parse("2.000;GOOG;noto-source:20170915:90ef993387c0").unwrap();
        assert_eq!(v.build, "GOOG");
        assert_eq!(v.prerelease, "");
    }

    #[test]
    fn test_compare_wildcards_contribute_no_distinction() {
        let cases = [
            ("2", "2.9.9"),
            ("2.*.4", "2.9.4"),
            ("2.3", "2.3.1"),
            ("*", "99.99.99"),
        ];

        for (loose, strict) in cases {
            let a = Version::parse_loose(loose).unwrap();
            let b = Version::parse(strict).unwrap();
            assert_eq!(Ordering::Equal, a.compare(&b), "{loose:?} vs {strict:?}");
            assert_eq!(Ordering::Equal, b.compare(&a), "{strict:?} vs {loose:?}");
        }
    }

    #[test]
    fn test_compare_numeric_order() {
        let cases = [
            ("2.3.5", "2.3.4", Ordering::Greater),
            ("2.3.4", "2.3.5", Ordering::Less),
            ("2.3.4", "2.3.4", Ordering::Equal),
            ("3.0.0", "2.9.9", Ordering::Greater),
            ("2.4.0", "2.3.9", Ordering::Greater),
            // a wildcard minor defers the decision to the patch
            ("2.*.5", "2.9.4", Ordering::Greater),
        ];

        for (a, b, expected) in cases {
            let a = Version::parse_loose(a).unwrap();
            let b = Version::parse_loose(b).unwrap();
            assert_eq!(expected, a.compare(&b), "{a} vs {b}");
        }
    }

    #[test]
    fn test_compare_prerelease_precedence() {
        let release = Version::parse("2.3.4").unwrap();
        let beta = Version::parse("2.3.4-beta").unwrap();
        assert_eq!(Ordering::Less, beta.compare(&release));
        assert_eq!(Ordering::Greater, release.compare(&beta));

        // two prereleases compare lexically
        let alpha = Version::parse("2.3.4-alpha").unwrap();
        assert_eq!(Ordering::Less, alpha.compare(&beta));
    }

    #[test]
    fn test_compare_build_tie_break() {
        let abc = Version::parse("1.2.3+abc").unwrap();
        let def = Version::parse("1.2.3+def").unwrap();
        assert_eq!(Ordering::Less, abc.compare(&def));
        assert_eq!(Ordering::Greater, def.compare(&abc));
        assert_eq!(Ordering::Equal, abc.compare(&abc));
    }

    #[test]
    fn test_sort_descending() {
        let mut versions: Vec<Version> = ["2.3.4", "2.3.5", "2.3.4-beta"]
            .iter()
            .map(|s| Version::parse(s).unwrap())
            .collect();

        sort_descending(&mut versions);

        let rendered: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
        assert_eq!(vec!["2.3.5", "2.3.4", "2.3.4-beta"], rendered);
    }

    #[test]
    fn test_serde_string_form() {
        let v = Version::parse("Version 2.003;xyz").unwrap();
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(r#""2.3.0+xyz""#, json);

        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);

        let err = serde_json::from_str::<Version>(r#""not a version""#);
        assert!(err.is_err());
    }
}
