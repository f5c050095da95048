//! Bidirectional codec between EVM JSON-RPC wire objects and canonical
//! typed entities.
//!
//! The wire side is loosely typed: field presence and encoding (QUANTITY
//! hex, fixed-width DATA hex, decimal strings, JSON booleans) vary by chain
//! and transaction type. The canonical side is a fixed schema where every
//! field has a defined width and optionality. This crate converts losslessly
//! in both directions across the legacy/EIP-1559/2930/4844/7702 transaction
//! types and the L2 extension fields used by OP-stack/Base, Arbitrum, and
//! Celo-style chains.
//!
//! ```
//! use evmwire_core::codec::{parse_transaction, transaction_to_json};
//!
//! let wire = serde_json::json!({
//!     "hash": "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060",
//!     "nonce": "0x15",
//!     "from": "0xa7d9ddbe1f17865597fbd27ec712455208b6b76d",
//!     "to": null,
//!     "input": "0x",
//!     "gas": "0x5208",
//!     "value": "0x38d7ea4c68000",
//!     "r": "0x02",
//!     "s": "0x04",
//!     "v": "0x1b",
//! });
//! let tx = parse_transaction(&wire, None)?;
//! assert_eq!(tx.gas_limit, 21000);
//! assert_eq!(transaction_to_json(&tx)["value"], "0x38d7ea4c68000");
//! # Ok::<(), evmwire_core::CodecError>(())
//! ```
//!
//! Parsing only validates syntactic well-formedness (hex shape, numeric
//! range); signatures, hashes, and consensus rules are trusted as given.

pub mod codec;
pub mod error;
pub mod hex;
pub mod model;
pub mod primitives;

pub use error::{CodecError, ErrorKind, HexError};
pub use model::{
    AccessListItem, AuthorizationListItem, Block, BlockHeader, Log, Receipt, Transaction,
    Withdrawal,
};
pub use primitives::{Address, Hash, Topic};
