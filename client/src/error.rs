use counter_interface::error::InterfaceError;

/// Failure taxonomy for every client operation.
///
/// Precondition variants are reported before any network call is made.
/// `Rejected` carries the program's verdict verbatim; `Transport` is a
/// could-not-determine outcome and is never conflated with the valid
/// absent-account state.
#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    #[error("counter is already initialized; the program rejects a second initialize")]
    AlreadyInitialized,
    #[error("counter has not been initialized; initialize it before updating")]
    NotInitialized,
    #[error("bump seed search exhausted while deriving the counter address")]
    BumpSeedExhausted,
    #[error("rejected by the program: {0}")]
    Rejected(String),
    #[error("failed to sign the transaction: {0}")]
    Signing(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error(transparent)]
    Interface(#[from] InterfaceError),
}
