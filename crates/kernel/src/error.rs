/// Errors raised while interpreting API values.
///
/// The transformer never surfaces these; it skips offending entries. They are
/// returned by the parsing helpers so callers that need strictness can have it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A date key is not in the `M/D/YY` form, or falls outside 2020–2099.
    #[error("unsupported date `{input}`: {reason}")]
    UnsupportedDate { input: String, reason: &'static str },

    /// A metric name is not one of the known fields.
    #[error("unknown metric `{0}`")]
    UnknownMetric(String),

    /// A sort order name is not `asc`, `desc` or `none`.
    #[error("unknown sort order `{0}`")]
    UnknownSortOrder(String),
}
