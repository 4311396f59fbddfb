//! On-chain account layouts.

use borsh::{
    BorshDeserialize,
    BorshSerialize,
};

use crate::{
    error::InterfaceError,
    schema::DISCRIMINATOR_LEN,
};

/// The per-owner counter account.
///
/// On chain the account is the discriminator followed by `borsh(Counter)` with spare
/// trailing space from the program's allocation, so decoding reads from the
/// front and ignores whatever follows the `count` field.
#[derive(BorshDeserialize, BorshSerialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counter {
    pub count: u8,
}

impl Counter {
    pub const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] = [255, 176, 4, 245, 188, 253, 124, 25];

    pub fn try_from_bytes(data: &[u8]) -> Result<Self, InterfaceError> {
        if data.len() < DISCRIMINATOR_LEN + 1 {
            return Err(InterfaceError::InsufficientByteLength {
                expected: DISCRIMINATOR_LEN + 1,
                got: data.len(),
            });
        }
        if data[..DISCRIMINATOR_LEN] != Self::DISCRIMINATOR {
            return Err(InterfaceError::InvalidAccountDiscriminator);
        }

        let mut fields = &data[DISCRIMINATOR_LEN..];
        Counter::deserialize(&mut fields)
            .map_err(|e| InterfaceError::MalformedAccountData(e.to_string()))
    }

    /// Serializes the account exactly as the program lays it out, spare
    /// space included.
    pub fn to_account_bytes(&self) -> Vec<u8> {
        let mut data = Self::DISCRIMINATOR.to_vec();
        borsh::to_writer(&mut data, self).expect("vec write is infallible");
        data.resize(DISCRIMINATOR_LEN + 4, 0);
        data
    }
}
