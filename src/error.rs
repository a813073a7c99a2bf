/// Errors from parsing a version string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The input contains no digit run and no wildcard marker, so there is
    /// nothing to extract a version from.
    #[error("malformed version `{input}`: no version number found")]
    MalformedVersion {
        /// The rejected input string.
        input: String,
    },

    /// A numeric component does not fit the unsigned 32-bit component range.
    #[error("malformed version `{input}`: component `{digits}` is out of range")]
    ComponentOverflow {
        /// The rejected input string.
        input: String,
        /// The digit run that overflowed.
        digits: String,
    },
}

/// Errors from parsing a version pattern string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// An operator token was given with no version after it, e.g. `">="`.
    #[error("invalid version pattern `{input}`: expected a version after the operator")]
    ExpectedVersion {
        /// The rejected pattern string.
        input: String,
    },

    /// The version operand of the pattern did not parse.
    #[error(transparent)]
    Version(#[from] VersionError),
}
