//! PDA derivation for per-owner counter accounts.

use counter_interface::{
    program,
    COUNTER_SEED,
};
use solana_sdk::pubkey::Pubkey;

use crate::error::CounterError;

/// Derives the owner's counter address and its bump seed.
///
/// Searches bumps from 255 downward and accepts the first seed combination
/// that hashes off the ed25519 curve, so the resulting address has no
/// corresponding private key and can only be controlled by the program. The
/// search is pure and deterministic: any party running it for the same owner
/// lands on the same address, which is what lets the client locate its
/// account without a directory.
///
/// Exhausting all 256 bumps means the seed/program configuration itself is
/// broken and is reported as a fatal error rather than retried.
pub fn derive_counter_address(owner: &Pubkey) -> Result<(Pubkey, u8), CounterError> {
    for bump in (0..=u8::MAX).rev() {
        if let Ok(address) = Pubkey::create_program_address(
            &[COUNTER_SEED, owner.as_ref(), &[bump]],
            &program::ID,
        ) {
            return Ok((address, bump));
        }
        // On-curve result; keep searching.
    }
    Err(CounterError::BumpSeedExhausted)
}
