//! Build-tag recovery from a font's unique-identifier string.
//!
//! Many fonts carry no build metadata in their version string but do embed a
//! source revision (typically a commit hash) in the unique-ID name record,
//! e.g. `"noto-source:20170915:90ef993387c0"`. When the version string
//! yielded no build tag, these heuristics recover one from that identifier.

use crate::error::VersionError;
use crate::version::Version;
use regex::Regex;
use std::sync::LazyLock;

/// A hex-like run anchored at the end of the identifier.
static HEX_RUN_TRAILING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([0-9A-Fa-f][0-9A-Fa-f.-]*)\s*$").expect("identifier pattern is a valid regex")
});

/// A hex-like run anywhere in the identifier.
static HEX_RUN_ANY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([0-9A-Fa-f][0-9A-Fa-f.-]*)").expect("identifier pattern is a valid regex")
});

/// Searches an identifier string for a run of hex-like characters usable as
/// a build tag.
///
/// A run anchored at the end of the string wins; failing that, the first run
/// anywhere is taken. Returns `None` when the identifier contains nothing
/// hex-like.
///
/// # Examples
///
/// ```
/// use fontver::infer_build_tag;
///
/// assert_eq!(
///     infer_build_tag("noto-source:20170915:90ef993387c0"),
///     Some("90ef993387c0")
/// );
/// assert_eq!(infer_build_tag("no usable runs here"), None);
/// ```
pub fn infer_build_tag(identifier: &str) -> Option<&str> {
    HEX_RUN_TRAILING_RE
        .captures(identifier)
        .or_else(|| HEX_RUN_ANY_RE.captures(identifier))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Strict-parses a font's version string and, when it carries no build tag,
/// tries to recover one from the font's unique-identifier string.
///
/// This is the operation a metadata ingester calls with the version and
/// unique-ID name records of a scanned font. Inference finding nothing is not
/// an error; the build tag simply stays empty.
///
/// # Errors
///
/// Fails only when the version string itself does not parse; see
/// [Version::parse].
pub fn parse_with_identifier(version: &str, identifier: &str) -> Result<Version, VersionError> {
    let mut v = Version::parse(version)?;

    if v.build.is_empty() && !identifier.is_empty() {
        if let Some(tag) = infer_build_tag(identifier) {
            v.build = tag.to_owned();
        }
    }

    Ok(v)
}
