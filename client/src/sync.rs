//! The fetch → decode → reconcile cycle and its two mutations.
//!
//! The on-chain account is the only authority on the counter value. Every
//! mutation ends with a mandatory refetch; nothing here ever writes the local
//! mirror optimistically. No operation retries on its own: blind retry of a
//! state-mutating submission risks double-application, so retry is left to
//! the caller.

use counter_interface::{
    schema::{
        ArgValue,
        Operation,
    },
    state::Counter,
};
use solana_sdk::{
    pubkey::Pubkey,
    signature::Signature,
};

use crate::{
    channels::{
        AccountFetch,
        FetchChannel,
        SubmissionChannel,
    },
    context::Session,
    encode::{
        self,
        ResolvedAccounts,
    },
    error::CounterError,
    logs::log_info,
    transactions,
};

/// What the client currently knows about the remote account.
///
/// `Absent` is a valid, expected state ("not created yet"), `Unknown` means
/// the last fetch could not determine ground truth. The two are never
/// interchangeable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterState {
    Unknown,
    Absent,
    Present(u8),
}

/// Best-effort local copy of the remote account for the presentation layer.
///
/// Written only by [`CounterSync`], and always replaced wholesale so a
/// concurrent reader never observes a half-updated mirror.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CounterMirror {
    pub value: u8,
    pub initialized: bool,
    pub loading: bool,
}

pub struct CounterSync<F, S> {
    session: Session<F, S>,
    accounts: ResolvedAccounts,
    state: CounterState,
    mirror: CounterMirror,
}

impl<F: FetchChannel, S: SubmissionChannel> CounterSync<F, S> {
    /// Derives the session owner's counter address once up front. Derivation
    /// failure is fatal configuration trouble, not something to retry.
    pub fn new(session: Session<F, S>) -> Result<Self, CounterError> {
        let accounts = encode::resolve_accounts(&session.owner())?;
        Ok(Self {
            session,
            accounts,
            state: CounterState::Unknown,
            mirror: CounterMirror::default(),
        })
    }

    pub fn state(&self) -> CounterState {
        self.state
    }

    pub fn mirror(&self) -> CounterMirror {
        self.mirror
    }

    pub fn counter_address(&self) -> Pubkey {
        self.accounts.counter
    }

    pub fn bump(&self) -> u8 {
        self.accounts.bump
    }

    /// Fetches and decodes the remote account, reconciling the local mirror.
    ///
    /// A missing account is the modeled `Absent` state with value 0. Any
    /// transport or decode failure leaves the state `Unknown` and surfaces
    /// the error, so callers can tell "not created yet" from "could not
    /// determine".
    pub async fn sync(&mut self) -> Result<CounterState, CounterError> {
        self.mirror = CounterMirror {
            loading: true,
            ..self.mirror
        };

        let fetched = self.session.fetch.fetch_account(&self.accounts.counter).await;

        match fetched {
            Ok(AccountFetch::Missing) => {
                self.state = CounterState::Absent;
                self.mirror = CounterMirror {
                    value: 0,
                    initialized: false,
                    loading: false,
                };
                Ok(self.state)
            }
            Ok(AccountFetch::Present(data)) => match Counter::try_from_bytes(&data) {
                Ok(counter) => {
                    self.state = CounterState::Present(counter.count);
                    self.mirror = CounterMirror {
                        value: counter.count,
                        initialized: true,
                        loading: false,
                    };
                    Ok(self.state)
                }
                Err(error) => {
                    self.state = CounterState::Unknown;
                    self.mirror = CounterMirror {
                        loading: false,
                        ..self.mirror
                    };
                    Err(error.into())
                }
            },
            Err(error) => {
                self.state = CounterState::Unknown;
                self.mirror = CounterMirror {
                    loading: false,
                    ..self.mirror
                };
                Err(error)
            }
        }
    }

    /// Creates the counter account.
    ///
    /// Re-initializing an existing account is rejected by the program, so a
    /// `Present` state is rejected here before any network call. On any
    /// submission failure the state is left untouched.
    pub async fn initialize(&mut self) -> Result<Signature, CounterError> {
        if matches!(self.state, CounterState::Present(_)) {
            return Err(CounterError::AlreadyInitialized);
        }

        let instruction = encode::encode(Operation::InitializeCounter, &[], &self.accounts)?;
        let unit = transactions::compose(instruction);

        log_info("Initializing counter", self.accounts.counter);
        let signature = self.submit(&unit).await?;

        self.sync().await?;
        Ok(signature)
    }

    /// Sets the counter to `new_count`.
    ///
    /// Requires a `Present` state; the value is submitted as given, without
    /// clamping, since range and wraparound are the program's to enforce. The
    /// composed unit carries the update strictly before its memo annotation.
    pub async fn update(&mut self, new_count: u8) -> Result<Signature, CounterError> {
        if !matches!(self.state, CounterState::Present(_)) {
            return Err(CounterError::NotInitialized);
        }

        let instruction = encode::encode(
            Operation::UpdateCounter,
            &[ArgValue::U8(new_count)],
            &self.accounts,
        )?;
        let unit = transactions::compose_update(instruction);

        log_info("Updating counter to", new_count);
        let signature = self.submit(&unit).await?;

        self.sync().await?;
        Ok(signature)
    }

    async fn submit(
        &mut self,
        unit: &transactions::SubmissionUnit,
    ) -> Result<Signature, CounterError> {
        self.mirror = CounterMirror {
            loading: true,
            ..self.mirror
        };

        let submitted = self
            .session
            .submit
            .submit_and_confirm(unit, self.session.wallet())
            .await;

        if submitted.is_err() {
            // State is deliberately untouched; only the loading flag drops.
            self.mirror = CounterMirror {
                loading: false,
                ..self.mirror
            };
        }
        submitted
    }
}
