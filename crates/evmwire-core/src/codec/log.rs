//! Log parse/serialize.

use serde_json::{Map, Value};

use crate::codec::field::Fields;
use crate::error::CodecError;
use crate::hex::{bytes_to_hex, u32_to_quantity_hex, u64_to_quantity_hex};
use crate::model::Log;
use crate::primitives::Topic;

/// Parses one wire log object.
///
/// Topic order is preserved: position 0 carries the event signature, later
/// positions the indexed parameters. Any malformed topic aborts the parse.
pub fn parse_log(value: &Value) -> Result<Log, CodecError> {
    let f = Fields::of(value, "log")?;

    let address = f.required_address("address")?;
    let block_number = f.required_quantity("blockNumber")?;
    let block_timestamp = f.quantity("blockTimestamp")?;
    let data = f.required_bytes("data")?;
    let log_index = f.required_quantity_u32("logIndex")?;
    let transaction_index = f.required_quantity_u32("transactionIndex")?;
    let transaction_hash = f.required_hash("transactionHash")?;
    let block_hash = f.required_hash("blockHash")?;

    let mut topics = Vec::new();
    if let Some(items) = f.list("topics")? {
        topics.reserve(items.len());
        for item in items {
            let s = item.as_str().ok_or(CodecError::UnsupportedShape {
                field: "topics",
                expected: "string",
            })?;
            topics.push(Topic::from_hex(s).map_err(|e| CodecError::field("topics", e))?);
        }
    }

    Ok(Log {
        address,
        topics,
        data,
        block_number,
        block_hash,
        block_timestamp,
        transaction_hash,
        transaction_index,
        log_index,
    })
}

/// Serializes a log back to its wire shape.
///
/// The canonical model only holds canonical-chain logs, so `removed` is
/// constant `false` on output. `blockTimestamp` is emitted only when set.
#[must_use]
pub fn log_to_json(log: &Log) -> Value {
    let mut o = Map::new();
    o.insert("address".into(), log.address.to_hex().into());
    o.insert(
        "topics".into(),
        Value::Array(log.topics.iter().map(|t| t.to_hex().into()).collect()),
    );
    o.insert("data".into(), bytes_to_hex(&log.data).into());
    o.insert("blockNumber".into(), u64_to_quantity_hex(log.block_number).into());
    o.insert("transactionHash".into(), log.transaction_hash.to_hex().into());
    o.insert(
        "transactionIndex".into(),
        u32_to_quantity_hex(log.transaction_index).into(),
    );
    o.insert("blockHash".into(), log.block_hash.to_hex().into());
    o.insert("logIndex".into(), u32_to_quantity_hex(log.log_index).into());
    o.insert("removed".into(), Value::Bool(false));
    if let Some(ts) = log.block_timestamp {
        o.insert("blockTimestamp".into(), u64_to_quantity_hex(ts).into());
    }
    Value::Object(o)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;
    use crate::primitives::{must_topic, TRANSFER_EVENT_SIGNATURE};

    fn transfer_log() -> Value {
        json!({
            "address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            "topics": [
                TRANSFER_EVENT_SIGNATURE,
                "0x000000000000000000000000f39fd6e51aad88f6f4ce6ab8827279cfffb92266",
                "0x00000000000000000000000070997970c51812dc3a010c7d01b50e0d17dc79c8",
            ],
            "data": "0x00000000000000000000000000000000000000000000000000000000000f4240",
            "blockNumber": "0x14d7e10",
            "transactionHash": "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b",
            "transactionIndex": "0x41",
            "blockHash": "0x8243343df08b9751f5ca0c5f8c9c0460d8a9b6351066fae0acbd4d3e776de8bb",
            "logIndex": "0x9e",
        })
    }

    #[test]
    fn parses_topics_in_order() {
        let log = parse_log(&transfer_log()).unwrap();
        assert_eq!(log.topics.len(), 3);
        assert_eq!(log.topics[0], must_topic(TRANSFER_EVENT_SIGNATURE));
        assert_eq!(log.block_number, 0x14d_7e10);
        assert_eq!(log.block_timestamp, None);
    }

    #[test]
    fn serializer_adds_removed_and_skips_absent_timestamp() {
        let log = parse_log(&transfer_log()).unwrap();
        let out = log_to_json(&log);
        assert_eq!(out["removed"], json!(false));
        assert!(out.get("blockTimestamp").is_none());
        // Everything the input carried survives.
        assert_eq!(out["topics"], transfer_log()["topics"]);
        assert_eq!(out["logIndex"], json!("0x9e"));
    }

    #[test]
    fn block_timestamp_round_trips_when_present() {
        let mut wire = transfer_log();
        wire["blockTimestamp"] = json!("0x66c1a2f0");
        let log = parse_log(&wire).unwrap();
        assert_eq!(log.block_timestamp, Some(0x66c1_a2f0));
        assert_eq!(log_to_json(&log)["blockTimestamp"], json!("0x66c1a2f0"));
    }

    #[test]
    fn malformed_topic_aborts() {
        let mut wire = transfer_log();
        wire["topics"][1] = json!("0xnot-a-topic");
        let err = parse_log(&wire).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedHex);
        assert_eq!(err.field_name(), "topics");
    }
}
