//! # fontver
//!
//! A library for parsing, ordering, and matching version identifiers found in
//! font metadata.
//!
//! Version strings in font files are rarely clean semantic versions. They are
//! decorated (`"Version 2.003"`), vendor-tagged
//! (`"Version 2.000;GOOG;noto-source:20170915:90ef993387c0"`), fused
//! (`"13.0d3e20"`), or simply partial (`"1"`). Instead of validating against
//! a rigid grammar, fontver extracts what it can from such strings and fails
//! only when there is no numeric content at all.
//!
//! ## Examples
//!
//! Parse the version strings a repository index supplies, sort them
//! most-recent-first, and select one with a user pattern:
//!
//! ```
//! use fontver::{sort_descending, Version, VersionPattern};
//!
//! let mut versions: Vec<Version> = ["2.0.0", "2.3.4-beta", "2.3.4", "2.3.5"]
//!     .iter()
//!     .map(|s| Version::parse(s).unwrap())
//!     .collect();
//! sort_descending(&mut versions);
//!
//! let pattern: VersionPattern = ">=2.3".parse().unwrap();
//! let (index, found) = pattern.find(&versions).unwrap();
//! assert_eq!(index, 0);
//! assert_eq!(found.to_string(), "2.3.5");
//! ```
//!
//! Ingest a scanned font's metadata, recovering a build tag from its
//! unique-ID record when the version string has none:
//!
//! ```
//! use fontver::parse_with_identifier;
//!
//! let v = parse_with_identifier(
//!     "Version 2.003",
//!     "noto-source:20170915:90ef993387c0",
//! )
//! .unwrap();
//! assert_eq!(v.to_string(), "2.3.0+90ef993387c0");
//! ```
//!
//! ## Important terms
//!
//! - **Strict mode** ([`Version::parse`]): components absent from the input
//!   become `0`. Used for concrete versions from font files and repository
//!   indexes.
//! - **Loose mode** ([`Version::parse_loose`]): absent components become
//!   wildcards that match anything. Used for pattern operands, so `">=2.3"`
//!   covers every `2.3.x`.
//! - **Pattern** ([`VersionPattern`]): an operator (`=`, `>`, `>=`, `<`,
//!   `<=`, `*`, `latest`) plus an optional operand, selecting the most recent
//!   matching entry of a descending-sorted list.
//! - **Build tag**: an opaque trailing qualifier (often a commit hash), used
//!   only as a deterministic ordering tie-break.
//!
//! ## Scope
//!
//! fontver is purely computational: no I/O, no font-file decoding, no state
//! across calls. Fetching indexes, scanning font directories, and loading
//! configuration are the caller's business; this crate turns the strings they
//! produce into decisions.
#![warn(missing_docs)]

mod error;
mod infer;
mod pattern;
mod version;

pub use crate::error::{PatternError, VersionError};
pub use crate::infer::{infer_build_tag, parse_with_identifier};
pub use crate::pattern::{Op, VersionPattern};
pub use crate::version::{sort_descending, Component, Version};

/// A convenience module appropriate for glob imports (`use fontver::prelude::*;`).
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::Component;
    #[doc(no_inline)]
    pub use crate::Op;
    #[doc(no_inline)]
    pub use crate::PatternError;
    #[doc(no_inline)]
    pub use crate::Version;
    #[doc(no_inline)]
    pub use crate::VersionError;
    #[doc(no_inline)]
    pub use crate::VersionPattern;
    #[doc(no_inline)]
    pub use crate::{infer_build_tag, parse_with_identifier, sort_descending};
}
