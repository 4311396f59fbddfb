//! Static interface description of the on-chain counter program.
//!
//! Everything here is compiled-in configuration recovered from the program's
//! IDL: operation discriminators, account roles, argument layouts, and the
//! counter account's on-chain layout. No I/O happens in this crate.

pub mod error;
pub mod schema;
pub mod state;

pub mod program {
    use solana_pubkey::Pubkey;

    pub const ID: Pubkey = Pubkey::from_str_const("794WyttcZeD1xWA3aXN4er2DW4JhjS48qigdmGM2cbvL");
}

pub mod memo_program {
    use solana_pubkey::Pubkey;

    pub const ID: Pubkey = Pubkey::from_str_const("MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcQb");
}

/// Constant seed prefix for the per-owner counter PDA.
pub const COUNTER_SEED: &[u8] = b"Counter";

/// Version of the program interface this crate describes.
pub const INTERFACE_VERSION: &str = "0.1.0";
