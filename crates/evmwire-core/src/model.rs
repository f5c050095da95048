//! Canonical entity types.
//!
//! These are plain data: constructed by the parsers in [`crate::codec`],
//! consumed by the serializers there or by downstream storage, never mutated
//! in place. Field names are a stable contract that storage keys on.
//!
//! Optionality is load-bearing everywhere. Roughly forty fields across these
//! structs are chain-variant extensions (OP-stack/Base deposit and L1-fee
//! fields, Arbitrum retryable-ticket fields, Celo gateway-fee fields) and
//! each one is independently nullable; `None` means the wire omitted the
//! field, which is different from a present zero. Amounts that can exceed
//! 2^64 (`value`, `gasPrice`, the fee families, `difficulty`) are stored as
//! the opaque string the wire delivered, not as integers.

use serde::{Deserialize, Serialize};

use crate::primitives::{Address, Hash, Topic};

/// A validator withdrawal (EIP-4895). All fields required, fixed width.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Withdrawal {
    pub index: u64,
    pub validator_index: u64,
    pub address: Address,
    pub amount: u64,
}

/// An event log. `topics` is order-preserving: position 0 is the event
/// signature, the rest are indexed parameters (at most four total).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Log {
    pub address: Address,
    pub topics: Vec<Topic>,
    pub data: Vec<u8>,
    pub block_number: u64,
    pub block_hash: Hash,
    /// Absent on legacy responses.
    pub block_timestamp: Option<u64>,
    pub transaction_hash: Hash,
    pub transaction_index: u32,
    pub log_index: u32,
}

/// One EIP-2930 access-list entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccessListItem {
    pub address: Address,
    pub storage_keys: Vec<Hash>,
}

/// One EIP-7702 authorization-list entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthorizationListItem {
    pub chain_id: u64,
    pub address: Address,
    pub nonce: u64,
    pub y_parity: u32,
    pub r: Vec<u8>,
    pub s: Vec<u8>,
    /// Recovered signer, when the node supplies it.
    pub authority: Option<Address>,
}

/// A transaction in canonical form.
///
/// The required core covers every transaction type; the optional groups are
/// mutually exclusive by type in practice (legacy `gas_price` vs EIP-1559
/// fees vs blob fees) but the codec does not enforce that exclusivity, it
/// faithfully carries whatever the wire supplied.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: Hash,
    pub nonce: u64,
    pub from: Address,
    /// `None` encodes contract creation (wire `null`, absent, or `"0x"`).
    pub to: Option<Address>,
    /// Opaque amount string; `"0"` when the wire omitted the field.
    pub value: String,
    pub input: Vec<u8>,
    pub gas_limit: u64,
    /// Transaction type; 0 (legacy) when the wire omits or mangles it.
    pub tx_type: u32,

    // Signature. r and s are variable-length here and fixed 32-byte DATA on
    // the wire; v is absent for deposit-style transactions.
    pub r: Vec<u8>,
    pub s: Vec<u8>,
    pub v: Option<Vec<u8>>,
    pub y_parity: Option<u32>,
    pub chain_id: Option<u64>,

    // Block linkage, populated once mined (or inherited from a containing
    // block's header at parse time).
    pub block_number: Option<u64>,
    pub block_hash: Option<Hash>,
    pub block_timestamp: Option<u64>,
    pub transaction_index: Option<u32>,

    // Fee fields, grouped by family. All amounts are opaque strings.
    pub gas_price: Option<String>,
    pub max_fee_per_gas: Option<String>,
    pub max_priority_fee_per_gas: Option<String>,

    // EIP-2930 / EIP-7702.
    pub access_list: Vec<AccessListItem>,
    pub authorization_list: Vec<AuthorizationListItem>,

    // EIP-4844.
    pub max_fee_per_blob_gas: Option<String>,
    pub blob_versioned_hashes: Vec<Hash>,

    // Execution results, only present for mined transactions.
    pub gas_used: Option<u64>,
    pub effective_gas_price: Option<String>,
    pub blob_gas_used: Option<u64>,
    pub blob_gas_price: Option<String>,

    // OP-stack L1 fee breakdown.
    pub l1_fee: Option<String>,
    pub l1_gas_price: Option<String>,
    pub l1_gas_used: Option<String>,
    pub l1_fee_scalar: Option<f64>,
    pub l1_blob_base_fee: Option<String>,
    pub l1_blob_base_fee_scalar: Option<u64>,

    // Celo-style gateway fees.
    pub gateway_fee: Option<String>,
    pub fee_currency: Option<Address>,
    pub gateway_fee_recipient: Option<Address>,

    // Arbitrum retryable tickets.
    pub beneficiary: Option<Address>,
    pub deposit_value: Option<String>,
    pub l1_base_fee: Option<String>,
    pub max_submission_fee: Option<String>,
    pub refund_to: Option<Address>,
    pub request_id: Option<Vec<u8>>,
    pub retry_data: Option<Vec<u8>>,
    pub retry_to: Option<Address>,
    pub retry_value: Option<String>,
    pub max_refund: Option<String>,
    pub submission_fee_refund: Option<String>,
    pub ticket_id: Option<Vec<u8>>,

    // OP-stack/Base deposit transactions.
    pub is_system_tx: Option<bool>,
    pub deposit_receipt_version: Option<String>,
}

/// A transaction execution outcome.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Receipt {
    pub transaction_hash: Hash,
    pub transaction_index: u32,
    pub block_hash: Hash,
    pub block_number: u64,
    pub block_timestamp: Option<u64>,
    /// 0 when the wire omits the field.
    pub tx_type: u32,
    pub from: Address,
    pub to: Option<Address>,
    /// Post-Byzantium outcome flag; pre-Byzantium receipts carry `root`
    /// instead. Both may independently be absent.
    pub status: Option<u32>,
    pub root: Option<Hash>,
    pub contract_address: Option<Address>,
    pub gas_used: u64,
    pub cumulative_gas_used: u64,
    pub effective_gas_price: Option<String>,
    pub logs_bloom: Vec<u8>,
    pub logs: Vec<Log>,

    // EIP-4844.
    pub blob_gas_used: Option<u64>,
    pub blob_gas_price: Option<String>,

    // OP-stack L1 fee breakdown. `l1_fee_scalar` is the one float in the
    // whole model; fee scalars are legitimately fractional multipliers.
    pub l1_fee: Option<String>,
    pub l1_gas_used: Option<String>,
    pub l1_gas_price: Option<String>,
    pub l1_fee_scalar: Option<f64>,
    pub l1_base_fee_scalar: Option<u64>,
    pub l1_blob_base_fee: Option<String>,
    pub l1_blob_base_fee_scalar: Option<u64>,

    // Arbitrum.
    pub gas_used_for_l1: Option<u64>,
    pub l1_block_number: Option<u64>,
    pub timeboosted: Option<bool>,

    // Celo.
    pub gateway_fee: Option<String>,

    // OP-stack deposits.
    pub deposit_nonce: Option<String>,
    pub deposit_receipt_version: Option<String>,
}

/// Block metadata. Required core plus optional families gated by chain era
/// and variant: post-merge (`mix_hash`, `withdrawals_root`), EIP-4844 blob
/// accounting, EIP-7685 `requests_hash`, and L2-specific fields (Arbitrum
/// `l1_block_number`/`send_*`, epoch/slot/proposer metadata).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockHeader {
    pub number: u64,
    pub hash: Hash,
    pub parent_hash: Hash,
    pub timestamp: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    /// 0 when the wire omits it.
    pub size: u64,
    pub state_root: Hash,
    pub transactions_root: Hash,
    pub receipts_root: Hash,
    pub sha3_uncles: Hash,
    pub miner: Address,
    pub logs_bloom: Vec<u8>,
    pub extra_data: Vec<u8>,
    pub uncles: Vec<Hash>,

    /// Proof-of-work nonce, fixed 8-byte DATA on the wire.
    pub nonce: Option<u64>,
    // Amounts that can exceed 2^64; opaque strings.
    pub base_fee_per_gas: Option<String>,
    pub difficulty: Option<String>,
    pub total_difficulty: Option<String>,

    pub mix_hash: Option<Hash>,
    pub withdrawals_root: Option<Hash>,
    pub requests_hash: Option<Hash>,

    pub blob_gas_used: Option<u64>,
    pub excess_blob_gas: Option<u64>,
    pub parent_beacon_block_root: Option<Hash>,

    // L2 extensions.
    pub l1_block_number: Option<u64>,
    pub send_count: Option<u64>,
    pub send_root: Option<Hash>,
    pub epoch: Option<u64>,
    pub slot: Option<u64>,
    pub proposer_index: Option<u64>,
    pub transaction_count: Option<u32>,
    /// Kept verbatim; not hex-decoded (key format varies by chain).
    pub proposer_public_key: Option<String>,
    pub canonical_rlp: Option<Vec<u8>>,
}

/// A parsed block: header plus both views of its transaction list.
///
/// `transaction_hashes` is always complete regardless of which view the wire
/// carried; `transactions` holds only elements that arrived as full objects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transaction_hashes: Vec<Hash>,
    pub transactions: Vec<Transaction>,
    pub withdrawals: Vec<Withdrawal>,
}
