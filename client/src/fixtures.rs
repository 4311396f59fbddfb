//! In-memory ledger for tests and offline scenarios.
//!
//! [`MockLedger`] implements both channels and executes the counter program's
//! account semantics locally: initialize creates the account (and rejects a
//! second create), update rewrites the count, memos are recorded. Units apply
//! atomically, matching the chain's all-or-nothing behavior, and every
//! applied unit is kept for ordering assertions.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        Mutex,
    },
};

use async_trait::async_trait;
use counter_interface::{
    memo_program,
    program,
    schema::{
        Operation,
        DISCRIMINATOR_LEN,
    },
    state::Counter,
};
use solana_instruction::Instruction;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{
        Keypair,
        Signature,
    },
};

use crate::{
    channels::{
        AccountFetch,
        FetchChannel,
        SubmissionChannel,
    },
    error::CounterError,
    transactions::SubmissionUnit,
};

#[derive(Clone, Default)]
pub struct MockLedger {
    inner: Arc<Mutex<LedgerInner>>,
}

#[derive(Default)]
struct LedgerInner {
    accounts: HashMap<Pubkey, Vec<u8>>,
    applied_units: Vec<Vec<Instruction>>,
    memos: Vec<String>,
    next_signature: u64,
    fail_fetches: bool,
    fail_submissions: bool,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent fetch fail at the transport level.
    pub fn fail_fetches(&self, fail: bool) {
        self.lock().fail_fetches = fail;
    }

    /// Makes every subsequent submission fail at the transport level.
    pub fn fail_submissions(&self, fail: bool) {
        self.lock().fail_submissions = fail;
    }

    /// Overwrites raw account data, bypassing program semantics. For
    /// corrupted-account scenarios.
    pub fn set_account(&self, address: Pubkey, data: Vec<u8>) {
        self.lock().accounts.insert(address, data);
    }

    pub fn account(&self, address: &Pubkey) -> Option<Vec<u8>> {
        self.lock().accounts.get(address).cloned()
    }

    /// Every unit that was applied, in submission order.
    pub fn applied_units(&self) -> Vec<Vec<Instruction>> {
        self.lock().applied_units.clone()
    }

    pub fn memos(&self) -> Vec<String> {
        self.lock().memos.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LedgerInner> {
        self.inner.lock().expect("ledger lock poisoned")
    }
}

fn execute(
    accounts: &mut HashMap<Pubkey, Vec<u8>>,
    memos: &mut Vec<String>,
    instruction: &Instruction,
) -> Result<(), CounterError> {
    if instruction.program_id == memo_program::ID {
        let text = String::from_utf8(instruction.data.clone())
            .map_err(|_| CounterError::Rejected("memo is not valid UTF-8".to_string()))?;
        memos.push(text);
        return Ok(());
    }

    if instruction.program_id != program::ID {
        return Err(CounterError::Rejected(format!(
            "unknown program {}",
            instruction.program_id
        )));
    }

    let discriminator = instruction
        .data
        .get(..DISCRIMINATOR_LEN)
        .ok_or_else(|| CounterError::Rejected("instruction data too short".to_string()))?;
    let counter_address = instruction
        .accounts
        .get(1)
        .map(|meta| meta.pubkey)
        .ok_or_else(|| CounterError::Rejected("missing counter account".to_string()))?;

    if discriminator == Operation::InitializeCounter.def().discriminator.as_slice() {
        if accounts.contains_key(&counter_address) {
            return Err(CounterError::Rejected(format!(
                "account {counter_address} already in use"
            )));
        }
        accounts.insert(counter_address, Counter::default().to_account_bytes());
        Ok(())
    } else if discriminator == Operation::UpdateCounter.def().discriminator.as_slice() {
        if !accounts.contains_key(&counter_address) {
            return Err(CounterError::Rejected(format!(
                "account {counter_address} does not exist"
            )));
        }
        let new_count = *instruction
            .data
            .get(DISCRIMINATOR_LEN)
            .ok_or_else(|| CounterError::Rejected("missing newCount argument".to_string()))?;
        accounts.insert(counter_address, Counter { count: new_count }.to_account_bytes());
        Ok(())
    } else {
        Err(CounterError::Rejected(
            "unknown instruction discriminator".to_string(),
        ))
    }
}

#[async_trait]
impl FetchChannel for MockLedger {
    async fn fetch_account(&self, address: &Pubkey) -> Result<AccountFetch, CounterError> {
        let inner = self.lock();
        if inner.fail_fetches {
            return Err(CounterError::Transport("fetch channel down".to_string()));
        }
        match inner.accounts.get(address) {
            Some(data) => Ok(AccountFetch::Present(data.clone())),
            None => Ok(AccountFetch::Missing),
        }
    }
}

#[async_trait]
impl SubmissionChannel for MockLedger {
    async fn submit_and_confirm(
        &self,
        unit: &SubmissionUnit,
        _wallet: &Keypair,
    ) -> Result<Signature, CounterError> {
        let mut inner = self.lock();
        if inner.fail_submissions {
            return Err(CounterError::Transport(
                "submission channel down".to_string(),
            ));
        }

        // All-or-nothing: run the unit against scratch copies and commit only
        // if every instruction succeeds.
        let mut accounts = inner.accounts.clone();
        let mut memos = inner.memos.clone();
        for instruction in unit.instructions() {
            execute(&mut accounts, &mut memos, instruction)?;
        }

        inner.accounts = accounts;
        inner.memos = memos;
        inner.applied_units.push(unit.instructions().to_vec());

        inner.next_signature += 1;
        let mut bytes = [0u8; 64];
        bytes[..8].copy_from_slice(&inner.next_signature.to_le_bytes());
        Ok(Signature::from(bytes))
    }
}
