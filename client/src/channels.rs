//! Fetch and submission channels.
//!
//! The synchronizer talks to the ledger through these two traits so the
//! transport can be swapped; [`RpcChannel`] is the real implementation over a
//! JSON-RPC endpoint, and the test ledger in [`crate::fixtures`] is the other.

use std::sync::Arc;

use async_trait::async_trait;
use solana_client::{
    client_error::{
        ClientError,
        ClientErrorKind,
    },
    rpc_client::RpcClient,
    rpc_response::RpcSimulateTransactionResult,
};
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{
    message::Message,
    pubkey::Pubkey,
    signature::{
        Keypair,
        Signature,
        Signer,
    },
    transaction::Transaction,
};

use crate::{
    error::CounterError,
    logs::{
        log_error,
        log_info,
        log_success,
    },
    transactions::SubmissionUnit,
};

/// Outcome of an account fetch. A missing account is a modeled result, not an
/// error; transport failures come back through `Err` instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountFetch {
    Missing,
    Present(Vec<u8>),
}

#[async_trait]
pub trait FetchChannel {
    async fn fetch_account(&self, address: &Pubkey) -> Result<AccountFetch, CounterError>;
}

#[async_trait]
pub trait SubmissionChannel {
    /// Signs the unit with the wallet, submits it, and waits for the channel's
    /// commitment level before returning the signature.
    async fn submit_and_confirm(
        &self,
        unit: &SubmissionUnit,
        wallet: &Keypair,
    ) -> Result<Signature, CounterError>;
}

#[async_trait]
impl<T: FetchChannel + Send + Sync> FetchChannel for Arc<T> {
    async fn fetch_account(&self, address: &Pubkey) -> Result<AccountFetch, CounterError> {
        self.as_ref().fetch_account(address).await
    }
}

#[async_trait]
impl<T: SubmissionChannel + Send + Sync> SubmissionChannel for Arc<T> {
    async fn submit_and_confirm(
        &self,
        unit: &SubmissionUnit,
        wallet: &Keypair,
    ) -> Result<Signature, CounterError> {
        self.as_ref().submit_and_confirm(unit, wallet).await
    }
}

/// JSON-RPC implementation of both channels.
pub struct RpcChannel {
    rpc: RpcClient,
    commitment: CommitmentConfig,
}

impl RpcChannel {
    pub fn new(url: impl ToString) -> Self {
        Self::new_with_commitment(url, CommitmentConfig::confirmed())
    }

    pub fn new_with_commitment(url: impl ToString, commitment: CommitmentConfig) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(url.to_string(), commitment),
            commitment,
        }
    }

    /// Airdrops lamports to an account and waits for the airdrop to land.
    /// Test-validator and devnet convenience for the example flows.
    pub async fn fund_account(&self, address: &Pubkey) -> Result<(), CounterError> {
        let signature = self
            .rpc
            .request_airdrop(address, 10_000_000_000)
            .map_err(transport)?;

        let mut i = 0;
        while !self.rpc.confirm_transaction(&signature).map_err(transport)? && i < 10 {
            std::thread::sleep(std::time::Duration::from_millis(500));
            i += 1;
        }
        Ok(())
    }
}

#[async_trait]
impl FetchChannel for RpcChannel {
    async fn fetch_account(&self, address: &Pubkey) -> Result<AccountFetch, CounterError> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.commitment)
            .map_err(transport)?;

        match response.value {
            Some(account) => Ok(AccountFetch::Present(account.data)),
            None => Ok(AccountFetch::Missing),
        }
    }
}

#[async_trait]
impl SubmissionChannel for RpcChannel {
    async fn submit_and_confirm(
        &self,
        unit: &SubmissionUnit,
        wallet: &Keypair,
    ) -> Result<Signature, CounterError> {
        let blockhash = self.rpc.get_latest_blockhash().map_err(transport)?;

        let message = Message::new(unit.instructions(), Some(&wallet.pubkey()));
        let mut tx = Transaction::new_unsigned(message);
        tx.try_sign(&[wallet], blockhash)
            .map_err(|e| CounterError::Signing(e.to_string()))?;

        match self.rpc.send_and_confirm_transaction(&tx) {
            Ok(signature) => {
                log_success("Signature", signature);
                Ok(signature)
            }
            Err(error) => {
                let classified = classify_client_error(error);
                log_error("Submission failed", &classified);
                log_info("Payer", wallet.pubkey());
                Err(classified)
            }
        }
    }
}

fn transport(error: ClientError) -> CounterError {
    CounterError::Transport(error.to_string())
}

/// Separates the program's verdict from plain transport trouble: preflight
/// simulation failures and transaction errors are rejections, everything else
/// is a could-not-determine transport failure.
fn classify_client_error(error: ClientError) -> CounterError {
    use solana_client::rpc_request::{
        RpcError::RpcResponseError,
        RpcResponseErrorData,
    };

    if let ClientErrorKind::RpcError(RpcResponseError {
        data:
            RpcResponseErrorData::SendTransactionPreflightFailure(RpcSimulateTransactionResult {
                err: Some(tx_err),
                ..
            }),
        ..
    }) = error.kind()
    {
        return CounterError::Rejected(tx_err.to_string());
    }

    if let ClientErrorKind::TransactionError(tx_err) = error.kind() {
        return CounterError::Rejected(tx_err.to_string());
    }

    transport(error)
}
