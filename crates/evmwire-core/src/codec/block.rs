//! Block parse/serialize and transaction-list orchestration.
//!
//! A block's `transactions` array comes in two shapes depending on how the
//! block was requested: hash strings (compact view) or full transaction
//! objects (full view), and a response may legally mix both.
//! [`parse_transactions`] keeps the hash list complete in either case: a
//! full object contributes its hash to the hash list as well as itself to
//! the full-object list.

use serde_json::{Map, Value};

use crate::codec::field::Fields;
use crate::codec::transaction::{parse_transaction, transaction_to_json};
use crate::codec::withdrawal::{parse_withdrawal, withdrawal_to_json};
use crate::error::CodecError;
use crate::hex::{bytes_to_hex, u32_to_quantity_hex, u64_to_quantity_hex};
use crate::model::{Block, BlockHeader, Transaction, Withdrawal};
use crate::primitives::Hash;

/// Parses a wire block object, including its header, transactions (either
/// view), uncles and withdrawals. Any contained parse failure aborts the
/// whole block.
pub fn parse_block(value: &Value) -> Result<Block, CodecError> {
    let f = Fields::of(value, "block")?;

    let mut uncles = Vec::new();
    if let Some(items) = f.list("uncles")? {
        uncles.reserve(items.len());
        for item in items {
            let raw = item.as_str().ok_or(CodecError::UnsupportedShape {
                field: "uncles",
                expected: "string",
            })?;
            uncles.push(Hash::from_hex(raw).map_err(|e| CodecError::field("uncles", e))?);
        }
    }

    let header = BlockHeader {
        number: f.required_quantity("number")?,
        hash: f.required_hash("hash")?,
        parent_hash: f.required_hash("parentHash")?,
        timestamp: f.required_quantity("timestamp")?,
        gas_limit: f.required_quantity("gasLimit")?,
        gas_used: f.required_quantity("gasUsed")?,
        // size predates every optional family; consumers treat it as
        // required, so absence collapses to 0.
        size: f.quantity("size")?.unwrap_or(0),
        logs_bloom: f.required_bytes("logsBloom")?,
        transactions_root: f.required_hash("transactionsRoot")?,
        state_root: f.required_hash("stateRoot")?,
        receipts_root: f.required_hash("receiptsRoot")?,
        sha3_uncles: f.required_hash("sha3Uncles")?,
        miner: f.required_address("miner")?,
        extra_data: f.required_bytes("extraData")?,
        uncles,
        nonce: f.quantity("nonce")?,
        base_fee_per_gas: f.amount("baseFeePerGas")?,
        difficulty: f.amount("difficulty")?,
        total_difficulty: f.amount("totalDifficulty")?,
        mix_hash: f.hash("mixHash")?,
        withdrawals_root: f.hash("withdrawalsRoot")?,
        requests_hash: f.hash("requestsHash")?,
        blob_gas_used: f.quantity("blobGasUsed")?,
        excess_blob_gas: f.quantity("excessBlobGas")?,
        parent_beacon_block_root: f.hash("parentBeaconBlockRoot")?,
        l1_block_number: f.quantity("l1BlockNumber")?,
        send_count: f.quantity("sendCount")?,
        send_root: f.hash("sendRoot")?,
        epoch: f.quantity("epoch")?,
        slot: f.quantity("slot")?,
        proposer_index: f.quantity("proposerIndex")?,
        transaction_count: f.quantity_u32("transactionCount")?,
        proposer_public_key: f.str("proposerPublicKey")?.map(str::to_owned),
        canonical_rlp: f.bytes("canonicalRlp")?,
    };

    let (transaction_hashes, transactions) = match f.list("transactions")? {
        Some(items) => parse_transactions(items, Some(&header))?,
        None => (Vec::new(), Vec::new()),
    };

    let mut withdrawals = Vec::new();
    if let Some(items) = f.list("withdrawals")? {
        withdrawals.reserve(items.len());
        for item in items {
            withdrawals.push(parse_withdrawal(item)?);
        }
    }

    Ok(Block { header, transaction_hashes, transactions, withdrawals })
}

/// Partitions a mixed transactions array into a complete hash list and a
/// full-object list.
///
/// Hash strings land only in the hash list; full objects are parsed (with
/// `header` supplying block-context defaults) and contribute their hash to
/// the hash list too. Any other element shape is an error.
pub fn parse_transactions(
    items: &[Value],
    header: Option<&BlockHeader>,
) -> Result<(Vec<Hash>, Vec<Transaction>), CodecError> {
    let mut hashes = Vec::with_capacity(items.len());
    let mut txs = Vec::new();
    for item in items {
        match item {
            Value::String(s) => {
                hashes.push(Hash::from_hex(s).map_err(|e| CodecError::field("transactions", e))?);
            }
            Value::Object(_) => {
                let tx = parse_transaction(item, header)?;
                hashes.push(tx.hash);
                txs.push(tx);
            }
            _ => {
                return Err(CodecError::UnsupportedShape {
                    field: "transactions",
                    expected: "string or object",
                })
            }
        }
    }
    Ok((hashes, txs))
}

/// Serializes a block back to its wire shape.
///
/// Transaction precedence: full objects when available, hash strings
/// otherwise, an empty array when neither exists (never `null`).
/// `withdrawals` appears only when the caller supplies them; `uncles` is
/// always an array.
#[must_use]
pub fn block_to_json(
    header: &BlockHeader,
    tx_hashes: &[Hash],
    full_txs: &[Transaction],
    withdrawals: Option<&[Withdrawal]>,
) -> Value {
    let mut o = Map::new();
    o.insert("number".into(), u64_to_quantity_hex(header.number).into());
    o.insert("hash".into(), header.hash.to_hex().into());
    o.insert("parentHash".into(), header.parent_hash.to_hex().into());
    o.insert("sha3Uncles".into(), header.sha3_uncles.to_hex().into());
    o.insert("logsBloom".into(), bytes_to_hex(&header.logs_bloom).into());
    o.insert("transactionsRoot".into(), header.transactions_root.to_hex().into());
    o.insert("stateRoot".into(), header.state_root.to_hex().into());
    o.insert("receiptsRoot".into(), header.receipts_root.to_hex().into());
    o.insert("miner".into(), header.miner.to_hex().into());
    o.insert("extraData".into(), bytes_to_hex(&header.extra_data).into());
    o.insert("size".into(), u64_to_quantity_hex(header.size).into());
    o.insert("gasLimit".into(), u64_to_quantity_hex(header.gas_limit).into());
    o.insert("gasUsed".into(), u64_to_quantity_hex(header.gas_used).into());
    o.insert("timestamp".into(), u64_to_quantity_hex(header.timestamp).into());

    if let Some(nonce) = header.nonce {
        // Header nonce is fixed 8-byte DATA, unlike every other quantity.
        o.insert("nonce".into(), format!("0x{nonce:016x}").into());
    }
    put_opt_amount(&mut o, "baseFeePerGas", header.base_fee_per_gas.as_ref());
    put_opt_amount(&mut o, "difficulty", header.difficulty.as_ref());
    put_opt_amount(&mut o, "totalDifficulty", header.total_difficulty.as_ref());
    if let Some(h) = header.mix_hash {
        o.insert("mixHash".into(), h.to_hex().into());
    }
    if let Some(h) = header.withdrawals_root {
        o.insert("withdrawalsRoot".into(), h.to_hex().into());
    }
    if let Some(h) = header.requests_hash {
        o.insert("requestsHash".into(), h.to_hex().into());
    }
    if let Some(n) = header.blob_gas_used {
        o.insert("blobGasUsed".into(), u64_to_quantity_hex(n).into());
    }
    if let Some(n) = header.excess_blob_gas {
        o.insert("excessBlobGas".into(), u64_to_quantity_hex(n).into());
    }
    if let Some(h) = header.parent_beacon_block_root {
        o.insert("parentBeaconBlockRoot".into(), h.to_hex().into());
    }
    if let Some(n) = header.l1_block_number {
        o.insert("l1BlockNumber".into(), u64_to_quantity_hex(n).into());
    }
    if let Some(n) = header.send_count {
        o.insert("sendCount".into(), u64_to_quantity_hex(n).into());
    }
    if let Some(h) = header.send_root {
        o.insert("sendRoot".into(), h.to_hex().into());
    }
    if let Some(n) = header.epoch {
        o.insert("epoch".into(), u64_to_quantity_hex(n).into());
    }
    if let Some(n) = header.slot {
        o.insert("slot".into(), u64_to_quantity_hex(n).into());
    }
    if let Some(n) = header.proposer_index {
        o.insert("proposerIndex".into(), u64_to_quantity_hex(n).into());
    }
    if let Some(n) = header.transaction_count {
        o.insert("transactionCount".into(), u32_to_quantity_hex(n).into());
    }
    if let Some(key) = &header.proposer_public_key {
        o.insert("proposerPublicKey".into(), key.clone().into());
    }
    if let Some(w) = withdrawals {
        o.insert("withdrawals".into(), Value::Array(w.iter().map(withdrawal_to_json).collect()));
    }
    if let Some(rlp) = &header.canonical_rlp {
        o.insert("canonicalRlp".into(), bytes_to_hex(rlp).into());
    }

    o.insert(
        "uncles".into(),
        Value::Array(header.uncles.iter().map(|u| u.to_hex().into()).collect()),
    );

    let transactions = if !full_txs.is_empty() {
        Value::Array(full_txs.iter().map(transaction_to_json).collect())
    } else if !tx_hashes.is_empty() {
        Value::Array(tx_hashes.iter().map(|h| h.to_hex().into()).collect())
    } else {
        Value::Array(Vec::new())
    };
    o.insert("transactions".into(), transactions);

    Value::Object(o)
}

fn put_opt_amount(o: &mut Map<String, Value>, key: &str, amount: Option<&String>) {
    if let Some(hex) = amount.and_then(|a| crate::hex::decimal_string_to_hex(a).ok()) {
        o.insert(key.to_string(), hex.into());
    }
}
