pub mod ledger;

#[cfg(test)]
pub(crate) mod mock_node;

pub use ledger::{from_wire, to_wire, LedgerClient, TransientError};
