//! Fixed-width value types: addresses, hashes and log topics.
//!
//! Construction never fails: short inputs are left-padded with zeros and
//! long inputs keep their rightmost bytes, matching big-endian numeric
//! semantics. Validation of hex syntax happens in [`crate::hex`]; these
//! types only deal in bytes.

use serde::{Deserialize, Serialize};

use crate::error::HexError;
use crate::hex::{bytes_to_hex, hex_to_bytes};

/// Byte length of an [`Address`].
pub const ADDRESS_LENGTH: usize = 20;
/// Byte length of a [`Hash`].
pub const HASH_LENGTH: usize = 32;
/// Byte length of a [`Topic`].
pub const TOPIC_LENGTH: usize = 32;
/// Byte length of a logs bloom filter.
pub const BLOOM_LENGTH: usize = 256;
/// Maximum number of topics a log can carry.
pub const MAX_TOPICS: usize = 4;

macro_rules! fixed_bytes {
    ($(#[$doc:meta])* $name:ident, $len:expr) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
        )]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Builds from an arbitrary-length slice: shorter input is
            /// left-padded with zeros, longer input keeps the rightmost
            /// bytes.
            #[must_use]
            pub fn from_slice(bytes: &[u8]) -> Self {
                let mut out = [0u8; $len];
                if bytes.len() >= $len {
                    out.copy_from_slice(&bytes[bytes.len() - $len..]);
                } else {
                    out[$len - bytes.len()..].copy_from_slice(bytes);
                }
                Self(out)
            }

            /// Parses a hex string (`0x` prefix optional) into this width.
            ///
            /// # Errors
            /// Returns [`HexError::MalformedHex`] for invalid hex.
            pub fn from_hex(s: &str) -> Result<Self, HexError> {
                Ok(Self::from_slice(&hex_to_bytes(s)?))
            }

            /// Full-width lowercase DATA hex.
            #[must_use]
            pub fn to_hex(&self) -> String {
                bytes_to_hex(&self.0)
            }

            #[must_use]
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            #[must_use]
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

fixed_bytes!(
    /// A 20-byte account address.
    Address,
    ADDRESS_LENGTH
);
fixed_bytes!(
    /// A 32-byte block or transaction hash.
    Hash,
    HASH_LENGTH
);
fixed_bytes!(
    /// A 32-byte indexed log topic.
    Topic,
    TOPIC_LENGTH
);

/// The all-zero address, used by deposit and system transactions.
pub const ZERO_ADDRESS: Address = Address([0u8; ADDRESS_LENGTH]);

/// Parses a compile-time-known address literal.
///
/// # Panics
/// Panics on invalid hex. Only for constants known valid at build time;
/// runtime input goes through [`Address::from_hex`].
#[must_use]
pub fn must_address(s: &str) -> Address {
    match Address::from_hex(s) {
        Ok(a) => a,
        Err(e) => panic!("invalid address literal {s:?}: {e}"),
    }
}

/// Parses a compile-time-known hash literal.
///
/// # Panics
/// Panics on invalid hex; see [`must_address`].
#[must_use]
pub fn must_hash(s: &str) -> Hash {
    match Hash::from_hex(s) {
        Ok(h) => h,
        Err(e) => panic!("invalid hash literal {s:?}: {e}"),
    }
}

/// Parses a compile-time-known topic literal.
///
/// # Panics
/// Panics on invalid hex; see [`must_address`].
#[must_use]
pub fn must_topic(s: &str) -> Topic {
    match Topic::from_hex(s) {
        Ok(t) => t,
        Err(e) => panic!("invalid topic literal {s:?}: {e}"),
    }
}

/// keccak256("Transfer(address,address,uint256)"), topic 0 of ERC-20/721
/// transfer events.
pub const TRANSFER_EVENT_SIGNATURE: &str =
    "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";

/// keccak256("Approval(address,address,uint256)").
pub const APPROVAL_EVENT_SIGNATURE: &str =
    "0x8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925";
