use crate::schema::ArgType;

/// Schema violations and account-data decode failures.
///
/// Every variant maps to a caller mistake or corrupted account data; none of
/// these are retryable.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InterfaceError {
    #[error("argument count mismatch for `{operation}`: expected {expected}, got {got}")]
    ArgumentCountMismatch {
        operation: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("argument `{name}` of `{operation}` expects {expected:?}")]
    ArgumentTypeMismatch {
        operation: &'static str,
        name: &'static str,
        expected: ArgType,
    },
    #[error("account data too short: expected at least {expected} bytes, got {got}")]
    InsufficientByteLength { expected: usize, got: usize },
    #[error("account discriminator does not match the counter account layout")]
    InvalidAccountDiscriminator,
    #[error("account data is not a valid counter account: {0}")]
    MalformedAccountData(String),
}
