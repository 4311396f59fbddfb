//! Composition of atomic submission units.
//!
//! A [`SubmissionUnit`] is an ordered instruction list that the ledger either
//! applies entirely or rejects entirely; atomicity comes from the chain, this
//! module only guarantees ordering and inclusion. Signing happens later, in
//! the submission channel.

use counter_interface::{
    memo_program,
    program,
};
use solana_instruction::{
    AccountMeta,
    Instruction,
};
use solana_sdk::pubkey::Pubkey;

/// Prefix of the memo text attached to every counter update.
pub const MEMO_PREFIX: &str = "CounterUpdated:";

#[derive(Clone, Debug)]
pub struct SubmissionUnit {
    instructions: Vec<Instruction>,
}

impl SubmissionUnit {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

/// Wraps a single instruction as its own atomic unit.
pub fn compose(instruction: Instruction) -> SubmissionUnit {
    SubmissionUnit {
        instructions: vec![instruction],
    }
}

/// Composes the update unit: the counter mutation strictly before its memo
/// annotation. The ordering is audit-cosmetic as far as anyone can tell from
/// the client side, but it is treated as a fixed contract.
pub fn compose_update(update: Instruction) -> SubmissionUnit {
    let memo = build_memo(&update_memo_text(), &[]);
    SubmissionUnit {
        instructions: vec![update, memo],
    }
}

pub fn update_memo_text() -> String {
    format!("{MEMO_PREFIX}{}", program::ID)
}

/// Builds the well-known memo instruction: raw UTF-8 data, with any provided
/// signer pubkeys listed as readonly signers.
pub fn build_memo(text: &str, signers: &[&Pubkey]) -> Instruction {
    Instruction {
        program_id: memo_program::ID,
        accounts: signers
            .iter()
            .map(|signer| AccountMeta::new_readonly(**signer, true))
            .collect(),
        data: text.as_bytes().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use counter_interface::schema::{
        ArgValue,
        Operation,
    };

    use super::*;
    use crate::encode::{
        encode,
        resolve_accounts,
    };

    #[test]
    fn update_unit_orders_mutation_before_memo() {
        let accounts = resolve_accounts(&Pubkey::new_unique()).unwrap();
        let update = encode(Operation::UpdateCounter, &[ArgValue::U8(1)], &accounts).unwrap();

        let unit = compose_update(update);
        let instructions = unit.instructions();

        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0].program_id, program::ID);
        assert_eq!(instructions[1].program_id, memo_program::ID);
    }

    #[test]
    fn memo_text_tags_the_program() {
        let text = update_memo_text();
        assert_eq!(
            text,
            "CounterUpdated:794WyttcZeD1xWA3aXN4er2DW4JhjS48qigdmGM2cbvL"
        );

        let memo = build_memo(&text, &[]);
        assert!(memo.accounts.is_empty());
        assert_eq!(memo.data, text.as_bytes());
    }

    #[test]
    fn memo_signers_are_readonly_signers() {
        let signer = Pubkey::new_unique();
        let memo = build_memo("x", &[&signer]);
        assert_eq!(memo.accounts.len(), 1);
        assert_eq!(memo.accounts[0].pubkey, signer);
        assert!(memo.accounts[0].is_signer && !memo.accounts[0].is_writable);
    }

    #[test]
    fn single_instruction_unit_keeps_inclusion() {
        let accounts = resolve_accounts(&Pubkey::new_unique()).unwrap();
        let init = encode(Operation::InitializeCounter, &[], &accounts).unwrap();
        let unit = compose(init.clone());
        assert_eq!(unit.instructions(), &[init]);
    }
}
