//! Typed field extraction from wire objects.
//!
//! Every parser pulls its fields through [`Fields`] so the presence, JSON
//! type, and encoding contract of a field lives in exactly one place instead
//! of ad hoc `get`/`as_str` chains in each parser.
//!
//! Absence conventions, applied uniformly: a missing key, an explicit
//! `null`, and an empty string all mean "absent". Addresses additionally
//! treat the literal `"0x"` as absent (the wire's contract-creation
//! convention for `to`). A key that is present with the wrong JSON type is
//! an [`UnsupportedShape`](crate::ErrorKind::UnsupportedShape) error, never
//! silently skipped.

use serde_json::{Map, Value};

use crate::error::{CodecError, HexError};
use crate::hex::{decimal_string_to_hex, hex_to_bytes, numberish_to_u32, numberish_to_u64};
use crate::primitives::{Address, Hash};

#[derive(Debug)]
pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// Views a wire value as an object, naming `field` on shape mismatch.
    pub(crate) fn of(value: &'a Value, field: &'static str) -> Result<Self, CodecError> {
        match value.as_object() {
            Some(map) => Ok(Self::new(map)),
            None => Err(CodecError::UnsupportedShape { field, expected: "object" }),
        }
    }

    fn raw(&self, name: &str) -> Option<&'a Value> {
        match self.map.get(name) {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        }
    }

    /// Optional string. Empty strings count as absent; wire producers emit
    /// `""` and omission interchangeably.
    pub(crate) fn str(&self, name: &'static str) -> Result<Option<&'a str>, CodecError> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(CodecError::UnsupportedShape { field: name, expected: "string" }),
        }
    }

    pub(crate) fn required_str(&self, name: &'static str) -> Result<&'a str, CodecError> {
        self.str(name)?.ok_or(CodecError::MissingRequiredField(name))
    }

    /// Optional DATA bytes.
    pub(crate) fn bytes(&self, name: &'static str) -> Result<Option<Vec<u8>>, CodecError> {
        self.str(name)?
            .map(|s| hex_to_bytes(s).map_err(|e| CodecError::field(name, e)))
            .transpose()
    }

    pub(crate) fn required_bytes(&self, name: &'static str) -> Result<Vec<u8>, CodecError> {
        hex_to_bytes(self.required_str(name)?).map_err(|e| CodecError::field(name, e))
    }

    /// Optional address. `"0x"` counts as absent alongside the usual forms;
    /// absence is never represented as a zero-filled address.
    pub(crate) fn address(&self, name: &'static str) -> Result<Option<Address>, CodecError> {
        match self.str(name)? {
            None | Some("0x") => Ok(None),
            Some(s) => Address::from_hex(s)
                .map(Some)
                .map_err(|e| CodecError::field(name, e)),
        }
    }

    pub(crate) fn required_address(&self, name: &'static str) -> Result<Address, CodecError> {
        Address::from_hex(self.required_str(name)?).map_err(|e| CodecError::field(name, e))
    }

    pub(crate) fn hash(&self, name: &'static str) -> Result<Option<Hash>, CodecError> {
        self.str(name)?
            .map(|s| Hash::from_hex(s).map_err(|e| CodecError::field(name, e)))
            .transpose()
    }

    pub(crate) fn required_hash(&self, name: &'static str) -> Result<Hash, CodecError> {
        Hash::from_hex(self.required_str(name)?).map_err(|e| CodecError::field(name, e))
    }

    /// Optional QUANTITY, hex or decimal.
    pub(crate) fn quantity(&self, name: &'static str) -> Result<Option<u64>, CodecError> {
        self.str(name)?
            .map(|s| numberish_to_u64(s).map_err(|e| CodecError::field(name, e)))
            .transpose()
    }

    pub(crate) fn required_quantity(&self, name: &'static str) -> Result<u64, CodecError> {
        numberish_to_u64(self.required_str(name)?).map_err(|e| CodecError::field(name, e))
    }

    pub(crate) fn quantity_u32(&self, name: &'static str) -> Result<Option<u32>, CodecError> {
        self.str(name)?
            .map(|s| numberish_to_u32(s).map_err(|e| CodecError::field(name, e)))
            .transpose()
    }

    pub(crate) fn required_quantity_u32(&self, name: &'static str) -> Result<u32, CodecError> {
        numberish_to_u32(self.required_str(name)?).map_err(|e| CodecError::field(name, e))
    }

    /// Optional amount: the raw wire string, kept verbatim so later
    /// serialization reproduces whatever radix the producer chose. The
    /// string must still be a well-formed numeral in either radix; a
    /// present-but-malformed amount aborts like any other bad field.
    pub(crate) fn amount(&self, name: &'static str) -> Result<Option<String>, CodecError> {
        self.str(name)?
            .map(|s| {
                decimal_string_to_hex(s)
                    .map(|_| s.to_owned())
                    .map_err(|e| CodecError::field(name, e))
            })
            .transpose()
    }

    /// Optional fractional scalar. Producers send it as a decimal string or
    /// a plain JSON number; both are accepted so serialized output stays
    /// re-parseable.
    pub(crate) fn scalar_f64(&self, name: &'static str) -> Result<Option<f64>, CodecError> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => s
                .parse::<f64>()
                .map(Some)
                .map_err(|_| CodecError::field(name, HexError::InvalidNumeral(s.clone()))),
            Some(_) => {
                Err(CodecError::UnsupportedShape { field: name, expected: "number or string" })
            }
        }
    }

    /// Optional JSON boolean (`isSystemTx`, `timeboosted`); never hex.
    pub(crate) fn flag(&self, name: &'static str) -> Result<Option<bool>, CodecError> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(CodecError::UnsupportedShape { field: name, expected: "boolean" }),
        }
    }

    /// Optional JSON array.
    pub(crate) fn list(&self, name: &'static str) -> Result<Option<&'a [Value]>, CodecError> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(_) => Err(CodecError::UnsupportedShape { field: name, expected: "array" }),
        }
    }
}
