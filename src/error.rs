/// Errors raised while building or compiling a filter tree.
///
/// These indicate programming errors in the caller (a malformed tree handed
/// to the builder, or a comparison name outside the closed table), not user
/// input problems. The query-string surface never raises them: unrecognized
/// input there is dropped instead.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// A structural shape the builder's rules do not cover
    MalformedFilterTree(String),

    /// A comparison name absent from the operator table
    UnknownComparison(String),
}

impl std::fmt::Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterError::MalformedFilterTree(msg) => write!(f, "Malformed filter tree: {}", msg),
            FilterError::UnknownComparison(name) => {
                write!(f, "Unknown comparison: '{}' is not in the operator table", name)
            }
        }
    }
}

impl std::error::Error for FilterError {}
