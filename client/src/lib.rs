//! Client-side synchronizer for the on-chain counter program.
//!
//! Derives the per-owner counter PDA, encodes instructions against the
//! program's declared interface, composes atomic submission units, and keeps
//! a local mirror reconciled with the on-chain account.

pub mod channels;
pub mod context;
pub mod encode;
pub mod error;
pub mod fixtures;
pub mod logs;
pub mod pda;
pub mod sync;
pub mod transactions;

pub use error::CounterError;
pub use logs::LogColor;
