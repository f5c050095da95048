//! Entity parsers and serializers.
//!
//! One module per entity, each exposing a `parse_*` function from a wire
//! [`serde_json::Value`] to the canonical model and a `*_to_json` inverse.
//! All operations are pure transformations of their arguments; independent
//! calls can run concurrently without synchronization.

pub mod block;
mod field;
pub mod log;
pub mod receipt;
pub mod transaction;
pub mod withdrawal;

pub use block::{block_to_json, parse_block, parse_transactions};
pub use log::{log_to_json, parse_log};
pub use receipt::{parse_receipt, receipt_to_json};
pub use transaction::{parse_transaction, transaction_to_json};
pub use withdrawal::{parse_withdrawal, withdrawal_to_json};
