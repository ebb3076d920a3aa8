use thiserror::Error;

/// A single search token that could not be used.
///
/// Never surfaced to clients: the builder drops the token and carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("{param}: '{token}' is not a whole number")]
    NotNumeric { param: &'static str, token: String },

    #[error("{param}: '{token}' is not a known value")]
    UnknownValue { param: &'static str, token: String },
}
