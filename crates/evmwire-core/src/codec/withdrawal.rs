//! Withdrawal parse/serialize.

use serde_json::{json, Value};

use crate::codec::field::Fields;
use crate::error::CodecError;
use crate::hex::u64_to_quantity_hex;
use crate::model::Withdrawal;

/// Parses one wire withdrawal object. All four fields are required.
pub fn parse_withdrawal(value: &Value) -> Result<Withdrawal, CodecError> {
    let f = Fields::of(value, "withdrawal")?;
    Ok(Withdrawal {
        index: f.required_quantity("index")?,
        validator_index: f.required_quantity("validatorIndex")?,
        address: f.required_address("address")?,
        amount: f.required_quantity("amount")?,
    })
}

/// Serializes a withdrawal back to its wire shape.
#[must_use]
pub fn withdrawal_to_json(w: &Withdrawal) -> Value {
    json!({
        "index": u64_to_quantity_hex(w.index),
        "validatorIndex": u64_to_quantity_hex(w.validator_index),
        "address": w.address.to_hex(),
        "amount": u64_to_quantity_hex(w.amount),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn parses_and_serializes_round_trip() {
        let wire = json!({
            "index": "0x11d2e9",
            "validatorIndex": "0x5e19b",
            "address": "0xb9d7934878b5fb9610b3fe8a5e441e8fad7e293f",
            "amount": "0x11657cf",
        });
        let w = parse_withdrawal(&wire).unwrap();
        assert_eq!(w.index, 0x0011_d2e9);
        assert_eq!(w.validator_index, 0x0005_e19b);
        assert_eq!(w.amount, 0x0116_57cf);
        assert_eq!(withdrawal_to_json(&w), wire);
    }

    #[test]
    fn missing_field_aborts() {
        let wire = json!({
            "index": "0x0",
            "address": "0xb9d7934878b5fb9610b3fe8a5e441e8fad7e293f",
            "amount": "0x1",
        });
        let err = parse_withdrawal(&wire).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
        assert_eq!(err.field_name(), "validatorIndex");
    }

    #[test]
    fn bad_amount_names_the_field() {
        let wire = json!({
            "index": "0x0",
            "validatorIndex": "0x1",
            "address": "0xb9d7934878b5fb9610b3fe8a5e441e8fad7e293f",
            "amount": "lots",
        });
        let err = parse_withdrawal(&wire).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumeral);
        assert_eq!(err.field_name(), "amount");
    }
}
