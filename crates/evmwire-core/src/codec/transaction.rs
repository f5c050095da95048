//! Transaction parse/serialize.
//!
//! The transaction surface is the widest in the codec: beyond the required
//! core it carries the legacy/EIP-1559/EIP-4844 fee families, EIP-2930
//! access lists, EIP-7702 authorization lists, execution results, and the
//! chain-variant extensions (OP-stack L1 fees and deposits, Arbitrum
//! retryable tickets, Celo gateway fees). Every optional field is
//! independently nullable; a present-but-malformed optional field aborts the
//! parse, with two documented exceptions (`type` and the block-linkage
//! overrides).

use serde_json::{Map, Value};

use crate::codec::field::Fields;
use crate::error::CodecError;
use crate::hex::{
    bytes_to_hex, bytes_to_hex_fixed, bytes_to_quantity_hex, decimal_string_to_hex,
    numberish_to_u32, numberish_to_u64, u32_to_quantity_hex, u64_to_quantity_hex,
};
use crate::model::{AccessListItem, AuthorizationListItem, BlockHeader, Transaction};
use crate::primitives::Hash;

/// Byte width of the `r`/`s` signature components on the wire.
const SIGNATURE_WIDTH: usize = 32;

/// Parses a wire transaction object.
///
/// When `header` is supplied (parsing inside a block), the block-linkage
/// fields default from it; explicit, parseable values on the transaction
/// itself override those defaults, and explicit-but-unparsable values fall
/// back to the default rather than erroring. Standalone responses carry
/// explicit linkage and need no header.
pub fn parse_transaction(
    value: &Value,
    header: Option<&BlockHeader>,
) -> Result<Transaction, CodecError> {
    let f = Fields::of(value, "transaction")?;

    let hash = f.required_hash("hash")?;
    let nonce = f.required_quantity("nonce")?;
    let from = f.required_address("from")?;
    let to = f.address("to")?;
    let value_amount = f.amount("value")?.unwrap_or_else(|| "0".to_string());
    let input = f.required_bytes("input")?;
    let gas_limit = f.required_quantity("gas")?;

    // Some producers strip r/s entirely from unsigned system transactions;
    // an absent component is the empty byte string and serializes back as 32
    // zero bytes of fixed-width DATA.
    let r = f.bytes("r")?.unwrap_or_default();
    let s = f.bytes("s")?.unwrap_or_default();
    let v = f.bytes("v")?;

    // Missing or unparsable type means legacy 0. This is the one malformed
    // field that does not abort; wire producers routinely omit `type` for
    // pre-typed-transaction data.
    let tx_type = match f.str("type")? {
        Some(raw) => match numberish_to_u32(raw) {
            Ok(t) => t,
            Err(_) => {
                tracing::warn!(value = raw, "unparsable transaction type, defaulting to legacy 0");
                0
            }
        },
        None => 0,
    };

    let chain_id = f.quantity("chainId")?;
    let y_parity = f.quantity_u32("yParity")?;

    let access_list = parse_access_list(&f)?;
    let authorization_list = parse_authorization_list(&f)?;

    // Block linkage: header-derived defaults, overridden by explicit
    // parseable values. Unparsable overrides are derived context, not
    // payload, and silently lose to the default.
    let mut block_number = header.map(|h| h.number);
    let mut block_hash = header.map(|h| h.hash);
    let mut block_timestamp = header.map(|h| h.timestamp);
    let mut transaction_index = None;

    if let Some(raw) = linkage_str(&f, "blockNumber") {
        if let Ok(n) = numberish_to_u64(raw) {
            block_number = Some(n);
        }
    }
    if let Some(raw) = linkage_str(&f, "blockHash") {
        if let Ok(h) = Hash::from_hex(raw) {
            block_hash = Some(h);
        }
    }
    if let Some(raw) = linkage_str(&f, "blockTimestamp") {
        if let Ok(ts) = numberish_to_u64(raw) {
            block_timestamp = Some(ts);
        }
    }
    if let Some(raw) = linkage_str(&f, "transactionIndex") {
        if let Ok(idx) = numberish_to_u32(raw) {
            transaction_index = Some(idx);
        }
    }

    let mut blob_versioned_hashes = Vec::new();
    if let Some(items) = f.list("blobVersionedHashes")? {
        blob_versioned_hashes.reserve(items.len());
        for item in items {
            let raw = item.as_str().ok_or(CodecError::UnsupportedShape {
                field: "blobVersionedHashes",
                expected: "string",
            })?;
            blob_versioned_hashes.push(
                Hash::from_hex(raw).map_err(|e| CodecError::field("blobVersionedHashes", e))?,
            );
        }
    }

    Ok(Transaction {
        hash,
        nonce,
        from,
        to,
        value: value_amount,
        input,
        gas_limit,
        tx_type,
        r,
        s,
        v,
        y_parity,
        chain_id,
        block_number,
        block_hash,
        block_timestamp,
        transaction_index,
        gas_price: f.amount("gasPrice")?,
        max_fee_per_gas: f.amount("maxFeePerGas")?,
        max_priority_fee_per_gas: f.amount("maxPriorityFeePerGas")?,
        access_list,
        authorization_list,
        max_fee_per_blob_gas: f.amount("maxFeePerBlobGas")?,
        blob_versioned_hashes,
        // Execution results exist only for mined transactions.
        gas_used: f.quantity("gasUsed")?,
        effective_gas_price: f.amount("effectiveGasPrice")?,
        blob_gas_used: f.quantity("blobGasUsed")?,
        blob_gas_price: f.amount("blobGasPrice")?,
        l1_fee: f.amount("l1Fee")?,
        l1_gas_price: f.amount("l1GasPrice")?,
        l1_gas_used: f.amount("l1GasUsed")?,
        l1_fee_scalar: f.scalar_f64("l1FeeScalar")?,
        l1_blob_base_fee: f.amount("l1BlobBaseFee")?,
        l1_blob_base_fee_scalar: f.quantity("l1BlobBaseFeeScalar")?,
        gateway_fee: f.amount("gatewayFee")?,
        fee_currency: f.address("feeCurrency")?,
        gateway_fee_recipient: f.address("gatewayFeeRecipient")?,
        beneficiary: f.address("beneficiary")?,
        deposit_value: f.amount("depositValue")?,
        l1_base_fee: f.amount("l1BaseFee")?,
        max_submission_fee: f.amount("maxSubmissionFee")?,
        refund_to: f.address("refundTo")?,
        request_id: f.bytes("requestId")?,
        retry_data: f.bytes("retryData")?,
        retry_to: f.address("retryTo")?,
        retry_value: f.amount("retryValue")?,
        max_refund: f.amount("maxRefund")?,
        submission_fee_refund: f.amount("submissionFeeRefund")?,
        ticket_id: f.bytes("ticketId")?,
        is_system_tx: f.flag("isSystemTx")?,
        deposit_receipt_version: f.amount("depositReceiptVersion")?,
    })
}

/// A linkage override only counts when it is a present, non-empty string;
/// any other shape loses to the header default.
fn linkage_str<'a>(f: &Fields<'a>, name: &'static str) -> Option<&'a str> {
    f.str(name).ok().flatten()
}

fn parse_access_list(f: &Fields<'_>) -> Result<Vec<AccessListItem>, CodecError> {
    let Some(items) = f.list("accessList")? else {
        return Ok(Vec::new());
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let entry = Fields::of(item, "accessList")?;
        let address = entry.required_address("address")?;
        let mut storage_keys = Vec::new();
        if let Some(keys) = entry.list("storageKeys")? {
            storage_keys.reserve(keys.len());
            for key in keys {
                let raw = key.as_str().ok_or(CodecError::UnsupportedShape {
                    field: "storageKeys",
                    expected: "string",
                })?;
                storage_keys
                    .push(Hash::from_hex(raw).map_err(|e| CodecError::field("storageKeys", e))?);
            }
        }
        out.push(AccessListItem { address, storage_keys });
    }
    Ok(out)
}

fn parse_authorization_list(f: &Fields<'_>) -> Result<Vec<AuthorizationListItem>, CodecError> {
    let Some(items) = f.list("authorizationList")? else {
        return Ok(Vec::new());
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let entry = Fields::of(item, "authorizationList")?;
        out.push(AuthorizationListItem {
            chain_id: entry.required_quantity("chainId")?,
            address: entry.required_address("address")?,
            nonce: entry.required_quantity("nonce")?,
            r: entry.required_bytes("r")?,
            s: entry.required_bytes("s")?,
            y_parity: entry.required_quantity_u32("yParity")?,
            authority: entry.address("authority")?,
        });
    }
    Ok(out)
}

fn put_amount(o: &mut Map<String, Value>, key: &str, amount: &str) {
    // Amounts are validated at parse time; a hand-built entity carrying a
    // bad amount just loses the key.
    if let Ok(hex) = decimal_string_to_hex(amount) {
        o.insert(key.to_string(), hex.into());
    }
}

fn put_opt_amount(o: &mut Map<String, Value>, key: &str, amount: Option<&String>) {
    if let Some(a) = amount {
        put_amount(o, key, a);
    }
}

/// Serializes a transaction back to its wire shape.
///
/// Absent optional fields are omitted, except `to`, `chainId` and `yParity`
/// which are emitted as explicit `null`; consumers expect those keys to
/// always exist. `accessList` is always an array (possibly empty);
/// `authorizationList` and `blobVersionedHashes` appear only when non-empty.
#[must_use]
pub fn transaction_to_json(tx: &Transaction) -> Value {
    let mut o = Map::new();
    o.insert("hash".into(), tx.hash.to_hex().into());
    o.insert("nonce".into(), u64_to_quantity_hex(tx.nonce).into());
    o.insert("from".into(), tx.from.to_hex().into());
    o.insert("gas".into(), u64_to_quantity_hex(tx.gas_limit).into());
    o.insert("input".into(), bytes_to_hex(&tx.input).into());
    o.insert("type".into(), u32_to_quantity_hex(tx.tx_type).into());

    o.insert("to".into(), tx.to.map_or(Value::Null, |a| a.to_hex().into()));

    if let Some(h) = tx.block_hash {
        o.insert("blockHash".into(), h.to_hex().into());
    }
    if let Some(n) = tx.block_number {
        o.insert("blockNumber".into(), u64_to_quantity_hex(n).into());
    }
    if let Some(idx) = tx.transaction_index {
        o.insert("transactionIndex".into(), u32_to_quantity_hex(idx).into());
    }
    if let Some(ts) = tx.block_timestamp {
        o.insert("blockTimestamp".into(), u64_to_quantity_hex(ts).into());
    }

    if !tx.value.is_empty() {
        put_amount(&mut o, "value", &tx.value);
    }
    put_opt_amount(&mut o, "gasPrice", tx.gas_price.as_ref());
    put_opt_amount(&mut o, "maxFeePerGas", tx.max_fee_per_gas.as_ref());
    put_opt_amount(&mut o, "maxPriorityFeePerGas", tx.max_priority_fee_per_gas.as_ref());

    if let Some(gas_used) = tx.gas_used {
        o.insert("gasUsed".into(), u64_to_quantity_hex(gas_used).into());
    }
    put_opt_amount(&mut o, "effectiveGasPrice", tx.effective_gas_price.as_ref());

    // r/s are fixed-width DATA, v is QUANTITY.
    o.insert("r".into(), bytes_to_hex_fixed(&tx.r, SIGNATURE_WIDTH).into());
    o.insert("s".into(), bytes_to_hex_fixed(&tx.s, SIGNATURE_WIDTH).into());
    if let Some(v) = &tx.v {
        o.insert("v".into(), bytes_to_quantity_hex(v).into());
    }

    o.insert(
        "chainId".into(),
        tx.chain_id.map_or(Value::Null, |c| u64_to_quantity_hex(c).into()),
    );
    o.insert(
        "yParity".into(),
        tx.y_parity.map_or(Value::Null, |y| u32_to_quantity_hex(y).into()),
    );

    let access_list: Vec<Value> = tx
        .access_list
        .iter()
        .map(|item| {
            let mut entry = Map::new();
            entry.insert("address".into(), item.address.to_hex().into());
            entry.insert(
                "storageKeys".into(),
                Value::Array(item.storage_keys.iter().map(|k| k.to_hex().into()).collect()),
            );
            Value::Object(entry)
        })
        .collect();
    o.insert("accessList".into(), Value::Array(access_list));

    put_opt_amount(&mut o, "maxFeePerBlobGas", tx.max_fee_per_blob_gas.as_ref());
    if !tx.blob_versioned_hashes.is_empty() {
        o.insert(
            "blobVersionedHashes".into(),
            Value::Array(tx.blob_versioned_hashes.iter().map(|h| h.to_hex().into()).collect()),
        );
    }
    if let Some(used) = tx.blob_gas_used {
        o.insert("blobGasUsed".into(), u64_to_quantity_hex(used).into());
    }
    put_opt_amount(&mut o, "blobGasPrice", tx.blob_gas_price.as_ref());

    if !tx.authorization_list.is_empty() {
        let auth_list: Vec<Value> = tx
            .authorization_list
            .iter()
            .map(|auth| {
                let mut entry = Map::new();
                entry.insert("chainId".into(), u64_to_quantity_hex(auth.chain_id).into());
                entry.insert("address".into(), auth.address.to_hex().into());
                entry.insert("nonce".into(), u64_to_quantity_hex(auth.nonce).into());
                entry.insert("r".into(), bytes_to_hex_fixed(&auth.r, SIGNATURE_WIDTH).into());
                entry.insert("s".into(), bytes_to_hex_fixed(&auth.s, SIGNATURE_WIDTH).into());
                entry.insert("yParity".into(), u32_to_quantity_hex(auth.y_parity).into());
                if let Some(authority) = auth.authority {
                    entry.insert("authority".into(), authority.to_hex().into());
                }
                Value::Object(entry)
            })
            .collect();
        o.insert("authorizationList".into(), Value::Array(auth_list));
    }

    put_opt_amount(&mut o, "l1Fee", tx.l1_fee.as_ref());
    put_opt_amount(&mut o, "l1GasUsed", tx.l1_gas_used.as_ref());
    put_opt_amount(&mut o, "l1GasPrice", tx.l1_gas_price.as_ref());
    if let Some(scalar) = tx.l1_fee_scalar {
        o.insert("l1FeeScalar".into(), scalar.into());
    }
    put_opt_amount(&mut o, "l1BlobBaseFee", tx.l1_blob_base_fee.as_ref());
    if let Some(scalar) = tx.l1_blob_base_fee_scalar {
        o.insert("l1BlobBaseFeeScalar".into(), u64_to_quantity_hex(scalar).into());
    }

    put_opt_amount(&mut o, "gatewayFee", tx.gateway_fee.as_ref());
    if let Some(currency) = tx.fee_currency {
        o.insert("feeCurrency".into(), currency.to_hex().into());
    }
    if let Some(recipient) = tx.gateway_fee_recipient {
        o.insert("gatewayFeeRecipient".into(), recipient.to_hex().into());
    }

    if let Some(beneficiary) = tx.beneficiary {
        o.insert("beneficiary".into(), beneficiary.to_hex().into());
    }
    put_opt_amount(&mut o, "depositValue", tx.deposit_value.as_ref());
    put_opt_amount(&mut o, "l1BaseFee", tx.l1_base_fee.as_ref());
    put_opt_amount(&mut o, "maxSubmissionFee", tx.max_submission_fee.as_ref());
    if let Some(refund_to) = tx.refund_to {
        o.insert("refundTo".into(), refund_to.to_hex().into());
    }
    if let Some(request_id) = &tx.request_id {
        o.insert("requestId".into(), bytes_to_hex(request_id).into());
    }
    if let Some(retry_data) = &tx.retry_data {
        o.insert("retryData".into(), bytes_to_hex(retry_data).into());
    }
    if let Some(retry_to) = tx.retry_to {
        o.insert("retryTo".into(), retry_to.to_hex().into());
    }
    put_opt_amount(&mut o, "retryValue", tx.retry_value.as_ref());
    put_opt_amount(&mut o, "maxRefund", tx.max_refund.as_ref());
    put_opt_amount(&mut o, "submissionFeeRefund", tx.submission_fee_refund.as_ref());
    if let Some(ticket_id) = &tx.ticket_id {
        o.insert("ticketId".into(), bytes_to_hex(ticket_id).into());
    }

    if let Some(is_system) = tx.is_system_tx {
        o.insert("isSystemTx".into(), Value::Bool(is_system));
    }
    put_opt_amount(&mut o, "depositReceiptVersion", tx.deposit_receipt_version.as_ref());

    Value::Object(o)
}
