//! Receipt parse/serialize.
//!
//! Receipts carry the same chain-variant fee families as transactions plus
//! the `status`/`root` split: post-Byzantium receipts carry `status`,
//! pre-Byzantium ones carry `root`, and either may independently be absent.
//! The codec emits whichever was parsed and never synthesizes one from the
//! other.

use serde_json::{Map, Value};

use crate::codec::field::Fields;
use crate::codec::log::{log_to_json, parse_log};
use crate::error::CodecError;
use crate::hex::{bytes_to_hex, decimal_string_to_hex, u32_to_quantity_hex, u64_to_quantity_hex};
use crate::model::Receipt;

/// Parses a wire receipt object.
pub fn parse_receipt(value: &Value) -> Result<Receipt, CodecError> {
    let f = Fields::of(value, "receipt")?;

    let block_number = f.required_quantity("blockNumber")?;
    let transaction_index = f.required_quantity_u32("transactionIndex")?;
    let gas_used = f.required_quantity("gasUsed")?;
    let cumulative_gas_used = f.required_quantity("cumulativeGasUsed")?;
    let logs_bloom = f.required_bytes("logsBloom")?;
    let block_hash = f.required_hash("blockHash")?;
    let transaction_hash = f.required_hash("transactionHash")?;
    let from = f.required_address("from")?;
    let to = f.address("to")?;

    // Absent type means legacy 0; unlike transactions, a present-but-bad
    // receipt type is a hard error.
    let tx_type = f.quantity_u32("type")?.unwrap_or(0);

    let status = f.quantity_u32("status")?;
    let contract_address = f.address("contractAddress")?;
    let root = f.hash("root")?;

    let mut logs = Vec::new();
    if let Some(items) = f.list("logs")? {
        logs.reserve(items.len());
        for item in items {
            logs.push(parse_log(item)?);
        }
    }

    Ok(Receipt {
        transaction_hash,
        transaction_index,
        block_hash,
        block_number,
        block_timestamp: f.quantity("blockTimestamp")?,
        tx_type,
        from,
        to,
        status,
        root,
        contract_address,
        gas_used,
        cumulative_gas_used,
        effective_gas_price: f.amount("effectiveGasPrice")?,
        logs_bloom,
        logs,
        blob_gas_used: f.quantity("blobGasUsed")?,
        blob_gas_price: f.amount("blobGasPrice")?,
        l1_fee: f.amount("l1Fee")?,
        l1_gas_used: f.amount("l1GasUsed")?,
        l1_gas_price: f.amount("l1GasPrice")?,
        l1_fee_scalar: f.scalar_f64("l1FeeScalar")?,
        l1_base_fee_scalar: f.quantity("l1BaseFeeScalar")?,
        l1_blob_base_fee: f.amount("l1BlobBaseFee")?,
        l1_blob_base_fee_scalar: f.quantity("l1BlobBaseFeeScalar")?,
        gas_used_for_l1: f.quantity("gasUsedForL1")?,
        l1_block_number: f.quantity("l1BlockNumber")?,
        timeboosted: f.flag("timeboosted")?,
        gateway_fee: f.amount("gatewayFee")?,
        deposit_nonce: f.amount("depositNonce")?,
        deposit_receipt_version: f.amount("depositReceiptVersion")?,
    })
}

fn put_amount_or_null(o: &mut Map<String, Value>, key: &str, amount: Option<&String>) {
    let value = amount
        .and_then(|a| decimal_string_to_hex(a).ok())
        .map_or(Value::Null, Value::String);
    o.insert(key.to_string(), value);
}

fn put_opt_amount(o: &mut Map<String, Value>, key: &str, amount: Option<&String>) {
    if let Some(hex) = amount.and_then(|a| decimal_string_to_hex(a).ok()) {
        o.insert(key.to_string(), hex.into());
    }
}

/// Serializes a receipt back to its wire shape.
///
/// `to`, `contractAddress`, `l1Fee`, `l1GasUsed` and `l1GasPrice` keys are
/// always present, as explicit `null` when unset; wire consumers key on
/// their existence. `type` is always emitted. `status` and `root` appear
/// only when parsed.
#[must_use]
pub fn receipt_to_json(r: &Receipt) -> Value {
    let mut o = Map::new();
    o.insert("transactionHash".into(), r.transaction_hash.to_hex().into());
    o.insert("transactionIndex".into(), u32_to_quantity_hex(r.transaction_index).into());
    o.insert("blockHash".into(), r.block_hash.to_hex().into());
    o.insert("blockNumber".into(), u64_to_quantity_hex(r.block_number).into());
    o.insert("from".into(), r.from.to_hex().into());
    o.insert("cumulativeGasUsed".into(), u64_to_quantity_hex(r.cumulative_gas_used).into());
    o.insert("gasUsed".into(), u64_to_quantity_hex(r.gas_used).into());
    o.insert("logsBloom".into(), bytes_to_hex(&r.logs_bloom).into());
    o.insert("logs".into(), Value::Array(r.logs.iter().map(log_to_json).collect()));
    o.insert("type".into(), u32_to_quantity_hex(r.tx_type).into());

    o.insert("to".into(), r.to.map_or(Value::Null, |a| a.to_hex().into()));
    o.insert(
        "contractAddress".into(),
        r.contract_address.map_or(Value::Null, |a| a.to_hex().into()),
    );

    if let Some(status) = r.status {
        o.insert("status".into(), u32_to_quantity_hex(status).into());
    }
    if let Some(root) = r.root {
        o.insert("root".into(), root.to_hex().into());
    }

    put_opt_amount(&mut o, "effectiveGasPrice", r.effective_gas_price.as_ref());

    if let Some(ts) = r.block_timestamp {
        o.insert("blockTimestamp".into(), u64_to_quantity_hex(ts).into());
    }
    if let Some(gas) = r.gas_used_for_l1 {
        o.insert("gasUsedForL1".into(), u64_to_quantity_hex(gas).into());
    }
    if let Some(n) = r.l1_block_number {
        o.insert("l1BlockNumber".into(), u64_to_quantity_hex(n).into());
    }

    put_amount_or_null(&mut o, "l1Fee", r.l1_fee.as_ref());
    put_amount_or_null(&mut o, "l1GasUsed", r.l1_gas_used.as_ref());
    put_amount_or_null(&mut o, "l1GasPrice", r.l1_gas_price.as_ref());
    put_opt_amount(&mut o, "gatewayFee", r.gateway_fee.as_ref());

    if let Some(used) = r.blob_gas_used {
        o.insert("blobGasUsed".into(), u64_to_quantity_hex(used).into());
    }
    put_opt_amount(&mut o, "blobGasPrice", r.blob_gas_price.as_ref());

    if let Some(scalar) = r.l1_fee_scalar {
        o.insert("l1FeeScalar".into(), scalar.into());
    }
    if let Some(scalar) = r.l1_base_fee_scalar {
        o.insert("l1BaseFeeScalar".into(), u64_to_quantity_hex(scalar).into());
    }
    put_opt_amount(&mut o, "l1BlobBaseFee", r.l1_blob_base_fee.as_ref());
    if let Some(scalar) = r.l1_blob_base_fee_scalar {
        o.insert("l1BlobBaseFeeScalar".into(), u64_to_quantity_hex(scalar).into());
    }
    put_opt_amount(&mut o, "depositNonce", r.deposit_nonce.as_ref());
    put_opt_amount(&mut o, "depositReceiptVersion", r.deposit_receipt_version.as_ref());
    if let Some(timeboosted) = r.timeboosted {
        o.insert("timeboosted".into(), Value::Bool(timeboosted));
    }

    Value::Object(o)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    fn base_receipt() -> Value {
        json!({
            "transactionHash": "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b",
            "transactionIndex": "0x41",
            "blockHash": "0x8243343df08b9751f5ca0c5f8c9c0460d8a9b6351066fae0acbd4d3e776de8bb",
            "blockNumber": "0x14d7e10",
            "from": "0xa7d9ddbe1f17865597fbd27ec712455208b6b76d",
            "to": "0xf02c1c8e6114b1dbe8937a76194cc8b8d1c4f1e8",
            "gasUsed": "0x5208",
            "cumulativeGasUsed": "0x79ccd3",
            "logsBloom": format!("0x{}", "00".repeat(256)),
            "logs": [],
            "status": "0x1",
            "type": "0x2",
            "effectiveGasPrice": "0x4a817c800",
        })
    }

    #[test]
    fn parses_required_and_status() {
        let r = parse_receipt(&base_receipt()).unwrap();
        assert_eq!(r.transaction_index, 0x41);
        assert_eq!(r.status, Some(1));
        assert_eq!(r.root, None);
        assert_eq!(r.tx_type, 2);
        assert_eq!(r.logs_bloom.len(), 256);
        assert_eq!(r.effective_gas_price.as_deref(), Some("0x4a817c800"));
    }

    #[test]
    fn missing_type_defaults_to_zero_but_bad_type_errors() {
        let mut wire = base_receipt();
        wire.as_object_mut().unwrap().remove("type");
        assert_eq!(parse_receipt(&wire).unwrap().tx_type, 0);

        wire["type"] = json!("0xzz");
        let err = parse_receipt(&wire).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumeral);
        assert_eq!(err.field_name(), "type");
    }

    #[test]
    fn serializer_null_key_family_is_always_present() {
        let r = parse_receipt(&base_receipt()).unwrap();
        let out = receipt_to_json(&r);
        for key in ["to", "contractAddress", "l1Fee", "l1GasUsed", "l1GasPrice"] {
            assert!(out.get(key).is_some(), "{key} key must exist");
        }
        assert_eq!(out["contractAddress"], Value::Null);
        assert_eq!(out["l1Fee"], Value::Null);
        assert_eq!(out["to"], json!("0xf02c1c8e6114b1dbe8937a76194cc8b8d1c4f1e8"));
        // status present, root absent and not synthesized.
        assert_eq!(out["status"], json!("0x1"));
        assert!(out.get("root").is_none());
    }

    #[test]
    fn l1_blob_base_fee_scalar_round_trips_hex() {
        let mut wire = base_receipt();
        wire["l1BlobBaseFeeScalar"] = json!("0x101c12");
        let r = parse_receipt(&wire).unwrap();
        assert_eq!(r.l1_blob_base_fee_scalar, Some(0x0010_1c12));
        assert_eq!(receipt_to_json(&r)["l1BlobBaseFeeScalar"], json!("0x101c12"));
    }

    #[test]
    fn absent_l1_blob_base_fee_stays_absent() {
        let r = parse_receipt(&base_receipt()).unwrap();
        assert_eq!(r.l1_blob_base_fee, None);
        assert!(receipt_to_json(&r).get("l1BlobBaseFee").is_none());
    }

    #[test]
    fn op_stack_fee_family_round_trips() {
        let mut wire = base_receipt();
        wire["l1Fee"] = json!("0x37f21ae0");
        wire["l1GasUsed"] = json!("0x640");
        wire["l1GasPrice"] = json!("0x49b5f4a48");
        wire["l1FeeScalar"] = json!("0.684");
        wire["l1BaseFeeScalar"] = json!("0x146b");

        let r = parse_receipt(&wire).unwrap();
        assert_eq!(r.l1_fee.as_deref(), Some("0x37f21ae0"));
        assert_eq!(r.l1_fee_scalar, Some(0.684));

        let out = receipt_to_json(&r);
        assert_eq!(out["l1Fee"], json!("0x37f21ae0"));
        assert_eq!(out["l1FeeScalar"], json!(0.684));
        assert_eq!(out["l1BaseFeeScalar"], json!("0x146b"));

        // The scalar comes back as a JSON number; re-parsing still works.
        assert_eq!(parse_receipt(&out).unwrap(), r);
    }

    #[test]
    fn deposit_receipt_fields_round_trip() {
        let mut wire = base_receipt();
        wire["type"] = json!("0x7e");
        wire["depositNonce"] = json!("0x10ba1");
        wire["depositReceiptVersion"] = json!("0x1");

        let r = parse_receipt(&wire).unwrap();
        let out = receipt_to_json(&r);
        assert_eq!(out["depositNonce"], json!("0x10ba1"));
        assert_eq!(out["depositReceiptVersion"], json!("0x1"));
    }

    #[test]
    fn timeboosted_is_a_plain_boolean() {
        let mut wire = base_receipt();
        wire["timeboosted"] = json!(false);
        let r = parse_receipt(&wire).unwrap();
        assert_eq!(r.timeboosted, Some(false));
        assert_eq!(receipt_to_json(&r)["timeboosted"], json!(false));

        let absent = parse_receipt(&base_receipt()).unwrap();
        assert_eq!(absent.timeboosted, None);
        assert!(receipt_to_json(&absent).get("timeboosted").is_none());
    }

    #[test]
    fn malformed_amount_string_aborts() {
        let mut wire = base_receipt();
        wire["l1Fee"] = json!("banana");
        let err = parse_receipt(&wire).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumeral);
        assert_eq!(err.field_name(), "l1Fee");

        let mut wire = base_receipt();
        wire["depositNonce"] = json!("0xzz");
        let err = parse_receipt(&wire).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedHex);
        assert_eq!(err.field_name(), "depositNonce");
    }

    #[test]
    fn contained_log_errors_surface() {
        let mut wire = base_receipt();
        wire["logs"] = json!([{ "address": "0xbad" }]);
        assert!(parse_receipt(&wire).is_err());
    }

    #[test]
    fn pre_byzantium_root_round_trips() {
        let mut wire = base_receipt();
        wire.as_object_mut().unwrap().remove("status");
        wire["root"] =
            json!("0x27f38f5a85b3f284f2a2b1659a057f76eb6d36acc502c1a6c4eb7cb4e53dfdfb");
        let r = parse_receipt(&wire).unwrap();
        assert_eq!(r.status, None);
        let out = receipt_to_json(&r);
        assert_eq!(out["root"], wire["root"]);
        assert!(out.get("status").is_none());
    }
}
