//! Operation definitions for the counter program, as declared by its IDL.
//!
//! Each operation carries a fixed 8-byte discriminator, an ordered list of
//! account roles, and an ordered list of typed arguments. Instruction data is
//! always the discriminator followed by the args, with integers packed as fixed-width
//! little-endian bytes and variable-length values as a u32 little-endian
//! length prefix followed by the raw bytes.

use solana_pubkey::Pubkey;

use crate::error::InterfaceError;

pub const DISCRIMINATOR_LEN: usize = 8;

/// How an account role is resolved to a concrete address at encode time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoleKind {
    /// Resolves to the owner identity supplied by the wallet.
    Signer,
    /// Resolves to the owner's counter PDA.
    Derived,
    /// Resolves to a well-known constant address.
    Fixed(Pubkey),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountRoleDef {
    pub name: &'static str,
    pub writable: bool,
    pub signer: bool,
    pub kind: RoleKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgType {
    U8,
    U16,
    U32,
    U64,
    Bytes,
    Str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArgDef {
    pub name: &'static str,
    pub ty: ArgType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperationDef {
    pub name: &'static str,
    pub discriminator: [u8; DISCRIMINATOR_LEN],
    pub accounts: &'static [AccountRoleDef],
    pub args: &'static [ArgDef],
}

/// A concrete argument value paired against an [`ArgDef`] at pack time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgValue<'a> {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Bytes(&'a [u8]),
    Str(&'a str),
}

impl ArgValue<'_> {
    pub fn ty(&self) -> ArgType {
        match self {
            ArgValue::U8(_) => ArgType::U8,
            ArgValue::U16(_) => ArgType::U16,
            ArgValue::U32(_) => ArgType::U32,
            ArgValue::U64(_) => ArgType::U64,
            ArgValue::Bytes(_) => ArgType::Bytes,
            ArgValue::Str(_) => ArgType::Str,
        }
    }

    fn write_into(&self, out: &mut Vec<u8>) {
        match self {
            ArgValue::U8(v) => out.push(*v),
            ArgValue::U16(v) => out.extend_from_slice(&v.to_le_bytes()),
            ArgValue::U32(v) => out.extend_from_slice(&v.to_le_bytes()),
            ArgValue::U64(v) => out.extend_from_slice(&v.to_le_bytes()),
            ArgValue::Bytes(v) => {
                out.extend_from_slice(&(v.len() as u32).to_le_bytes());
                out.extend_from_slice(v);
            }
            ArgValue::Str(v) => {
                out.extend_from_slice(&(v.len() as u32).to_le_bytes());
                out.extend_from_slice(v.as_bytes());
            }
        }
    }
}

const SIGNER_ROLE: AccountRoleDef = AccountRoleDef {
    name: "signer",
    writable: true,
    signer: true,
    kind: RoleKind::Signer,
};

const COUNTER_ROLE: AccountRoleDef = AccountRoleDef {
    name: "counter",
    writable: true,
    signer: false,
    kind: RoleKind::Derived,
};

const SYSTEM_PROGRAM_ROLE: AccountRoleDef = AccountRoleDef {
    name: "system_program",
    writable: false,
    signer: false,
    kind: RoleKind::Fixed(solana_system_interface::program::ID),
};

const INITIALIZE_COUNTER: OperationDef = OperationDef {
    name: "initializeCounter",
    discriminator: [67, 89, 100, 87, 231, 172, 35, 124],
    accounts: &[SIGNER_ROLE, COUNTER_ROLE, SYSTEM_PROGRAM_ROLE],
    args: &[],
};

const UPDATE_COUNTER: OperationDef = OperationDef {
    name: "updateCounter",
    discriminator: [171, 200, 174, 106, 229, 34, 80, 175],
    accounts: &[SIGNER_ROLE, COUNTER_ROLE, SYSTEM_PROGRAM_ROLE],
    args: &[ArgDef {
        name: "newCount",
        ty: ArgType::U8,
    }],
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum Operation {
    InitializeCounter,
    UpdateCounter,
}

impl Operation {
    pub fn def(&self) -> &'static OperationDef {
        match self {
            Operation::InitializeCounter => &INITIALIZE_COUNTER,
            Operation::UpdateCounter => &UPDATE_COUNTER,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "initializeCounter" => Some(Operation::InitializeCounter),
            "updateCounter" => Some(Operation::UpdateCounter),
            _ => None,
        }
    }
}

/// Packs the discriminator followed by the args, after validating the values against the
/// operation's declared argument list.
pub fn pack_operation_data(
    op: Operation,
    args: &[ArgValue],
) -> Result<Vec<u8>, InterfaceError> {
    let def = op.def();

    if args.len() != def.args.len() {
        return Err(InterfaceError::ArgumentCountMismatch {
            operation: def.name,
            expected: def.args.len(),
            got: args.len(),
        });
    }

    let mut data = Vec::with_capacity(DISCRIMINATOR_LEN + args.len());
    data.extend_from_slice(&def.discriminator);

    for (decl, value) in def.args.iter().zip(args) {
        if decl.ty != value.ty() {
            return Err(InterfaceError::ArgumentTypeMismatch {
                operation: def.name,
                name: decl.name,
                expected: decl.ty,
            });
        }
        value.write_into(&mut data);
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn update_counter_data_is_discriminator_then_value() {
        let data = pack_operation_data(Operation::UpdateCounter, &[ArgValue::U8(5)]).unwrap();
        assert_eq!(data, vec![171, 200, 174, 106, 229, 34, 80, 175, 5]);
    }

    #[test]
    fn initialize_counter_data_is_discriminator_only() {
        let data = pack_operation_data(Operation::InitializeCounter, &[]).unwrap();
        assert_eq!(data, INITIALIZE_COUNTER.discriminator.to_vec());
    }

    #[test]
    fn argument_count_is_enforced() {
        let err = pack_operation_data(Operation::InitializeCounter, &[ArgValue::U8(1)])
            .unwrap_err();
        assert!(matches!(
            err,
            InterfaceError::ArgumentCountMismatch {
                expected: 0,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn argument_type_is_enforced() {
        let err = pack_operation_data(Operation::UpdateCounter, &[ArgValue::U16(5)]).unwrap_err();
        assert!(matches!(
            err,
            InterfaceError::ArgumentTypeMismatch {
                name: "newCount",
                expected: ArgType::U8,
                ..
            }
        ));
    }

    #[test]
    fn variable_length_values_are_length_prefixed() {
        let mut out = Vec::new();
        ArgValue::Str("abc").write_into(&mut out);
        assert_eq!(out, vec![3, 0, 0, 0, b'a', b'b', b'c']);

        out.clear();
        ArgValue::Bytes(&[9, 9]).write_into(&mut out);
        assert_eq!(out, vec![2, 0, 0, 0, 9, 9]);
    }

    #[test]
    fn operation_names_round_trip() {
        for op in Operation::iter() {
            assert_eq!(Operation::from_name(op.def().name), Some(op));
        }
        assert_eq!(Operation::from_name("closeCounter"), None);
    }

    #[test]
    fn account_roles_match_the_idl() {
        for op in Operation::iter() {
            let accounts = op.def().accounts;
            assert_eq!(accounts.len(), 3);
            assert!(accounts[0].signer && accounts[0].writable);
            assert_eq!(accounts[1].kind, RoleKind::Derived);
            assert!(accounts[1].writable && !accounts[1].signer);
            assert_eq!(
                accounts[2].kind,
                RoleKind::Fixed(solana_system_interface::program::ID)
            );
        }
    }
}
