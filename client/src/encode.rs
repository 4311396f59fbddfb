//! Schema-driven instruction encoding.
//!
//! The interface crate owns the byte layout; this module resolves each
//! declared account role to a concrete address and emits a ready-to-submit
//! [`Instruction`]. Writability and signer flags are taken from the schema
//! verbatim: if they are wrong for the deployed program, submission fails and
//! that failure is surfaced rather than patched over here.

use counter_interface::{
    program,
    schema::{
        ArgValue,
        Operation,
        RoleKind,
    },
};
use solana_instruction::{
    AccountMeta,
    Instruction,
};
use solana_sdk::pubkey::Pubkey;

use crate::{
    error::CounterError,
    pda,
};

/// Concrete addresses for every role kind the schema can declare.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedAccounts {
    pub owner: Pubkey,
    pub counter: Pubkey,
    pub bump: u8,
}

pub fn resolve_accounts(owner: &Pubkey) -> Result<ResolvedAccounts, CounterError> {
    let (counter, bump) = pda::derive_counter_address(owner)?;
    Ok(ResolvedAccounts {
        owner: *owner,
        counter,
        bump,
    })
}

pub fn encode(
    op: Operation,
    args: &[ArgValue],
    accounts: &ResolvedAccounts,
) -> Result<Instruction, CounterError> {
    let data = counter_interface::schema::pack_operation_data(op, args)?;

    let metas = op
        .def()
        .accounts
        .iter()
        .map(|role| {
            let pubkey = match role.kind {
                RoleKind::Signer => accounts.owner,
                RoleKind::Derived => accounts.counter,
                RoleKind::Fixed(address) => address,
            };
            if role.writable {
                AccountMeta::new(pubkey, role.signer)
            } else {
                AccountMeta::new_readonly(pubkey, role.signer)
            }
        })
        .collect();

    Ok(Instruction {
        program_id: program::ID,
        accounts: metas,
        data,
    })
}
