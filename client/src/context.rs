//! Per-session context.

use solana_sdk::{
    pubkey::Pubkey,
    signature::{
        Keypair,
        Signer,
    },
};

use crate::channels::{
    FetchChannel,
    SubmissionChannel,
};

/// Everything one user session needs: the wallet (owner identity plus signing
/// capability) and the two ledger channels. Constructed once per session and
/// passed explicitly to every operation; there is no ambient global provider.
pub struct Session<F, S> {
    wallet: Keypair,
    pub fetch: F,
    pub submit: S,
}

impl<F: FetchChannel, S: SubmissionChannel> Session<F, S> {
    pub fn new(wallet: Keypair, fetch: F, submit: S) -> Self {
        Self {
            wallet,
            fetch,
            submit,
        }
    }

    /// The owner identity. Key material itself never leaves the session.
    pub fn owner(&self) -> Pubkey {
        self.wallet.pubkey()
    }

    pub(crate) fn wallet(&self) -> &Keypair {
        &self.wallet
    }
}
