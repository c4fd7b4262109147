//! Decoded ABI values and their flattened key/value representation
//!
//! ABI decoding yields positional [`DynSolValue`]s. Whether a tuple carries
//! field names is only known from the ABI parameter definitions, so values
//! are first shaped into a [`DecodedValue`] (scalar, named fields or
//! positional list) and then flattened into [`FlatArgs`], an ordered list of
//! `{ key, value }` entries.
//!
//! - Tuples whose components are all named become named entries
//! - Unnamed tuples and arrays become index-keyed entries
//! - Scalars are kept as-is, numbers render as exact decimal strings

use std::{any::TypeId, collections::HashSet, fmt};

use alloy::{
    dyn_abi::DynSolValue,
    json_abi::{EventParam, Param},
    primitives::{Address, Bytes, I256, U256},
};
use serde::{Serialize, Serializer};

/// Terminal value of a decoded argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Bool(bool),
    Uint(U256),
    Int(I256),
    Address(Address),
    /// `bytesN`, truncated to its declared size
    FixedBytes(Bytes),
    Bytes(Bytes),
    String(String),
    /// External function pointer (address + selector)
    Function(Bytes),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Uint(v) => write!(f, "{v}"),
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Address(a) => write!(f, "{}", a.to_checksum(None)),
            Scalar::FixedBytes(b) | Scalar::Bytes(b) | Scalar::Function(b) => write!(f, "{b}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

// Integers are rendered as decimal strings so no precision is lost in JSON.
impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::String(s) => serializer.serialize_str(s),
            other => serializer.collect_str(other),
        }
    }
}

impl From<U256> for Scalar {
    fn from(value: U256) -> Self {
        Scalar::Uint(value)
    }
}

impl From<I256> for Scalar {
    fn from(value: I256) -> Self {
        Scalar::Int(value)
    }
}

impl From<Address> for Scalar {
    fn from(value: Address) -> Self {
        Scalar::Address(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

/// A decoded value whose shape (named vs positional) has been resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    /// Leaf value
    Scalar(Scalar),
    /// Struct/tuple with a name for every field, in declaration order
    NamedFields(Vec<(String, DecodedValue)>),
    /// Array or unnamed tuple
    PositionalList(Vec<DecodedValue>),
}

impl DecodedValue {
    /// Shape a single decoded value using its ABI components
    ///
    /// `components` are the tuple components of the parameter the value was
    /// decoded from (for arrays of tuples, the element's components).
    pub fn from_dyn(value: DynSolValue, components: &[Param]) -> Self {
        match value {
            DynSolValue::Tuple(values) => Self::from_fields(
                values,
                components
                    .iter()
                    .map(|p| (p.name.as_str(), p.components.as_slice()))
                    .collect(),
            ),
            DynSolValue::Array(values) | DynSolValue::FixedArray(values) => Self::PositionalList(
                values
                    .into_iter()
                    .map(|v| Self::from_dyn(v, components))
                    .collect(),
            ),
            DynSolValue::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            DynSolValue::Uint(v, _) => Self::Scalar(Scalar::Uint(v)),
            DynSolValue::Int(v, _) => Self::Scalar(Scalar::Int(v)),
            DynSolValue::Address(a) => Self::Scalar(Scalar::Address(a)),
            DynSolValue::FixedBytes(word, size) => {
                Self::Scalar(Scalar::FixedBytes(Bytes::copy_from_slice(&word[..size])))
            }
            DynSolValue::Bytes(b) => Self::Scalar(Scalar::Bytes(b.into())),
            DynSolValue::String(s) => Self::Scalar(Scalar::String(s)),
            DynSolValue::Function(f) => Self::Scalar(Scalar::Function(Bytes::copy_from_slice(f.as_slice()))),
            #[allow(unreachable_patterns)]
            other => Self::Scalar(Scalar::Bytes(other.abi_encode().into())),
        }
    }

    /// Shape a top-level parameter list (function, constructor or error inputs)
    pub fn from_params(values: Vec<DynSolValue>, params: &[Param]) -> Self {
        Self::from_fields(
            values,
            params
                .iter()
                .map(|p| (p.name.as_str(), p.components.as_slice()))
                .collect(),
        )
    }

    /// Shape event arguments, already merged back into declaration order
    pub fn from_event_params(values: Vec<DynSolValue>, params: &[EventParam]) -> Self {
        Self::from_fields(
            values,
            params
                .iter()
                .map(|p| (p.name.as_str(), p.components.as_slice()))
                .collect(),
        )
    }

    fn from_fields(values: Vec<DynSolValue>, shapes: Vec<(&str, &[Param])>) -> Self {
        let mut seen = HashSet::with_capacity(shapes.len());
        let named = !values.is_empty()
            && shapes.len() == values.len()
            && shapes.iter().all(|(name, _)| !name.is_empty() && seen.insert(*name));

        let components = |i: usize| shapes.get(i).map(|(_, c)| *c).unwrap_or_default();

        if named {
            Self::NamedFields(
                values
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (shapes[i].0.to_string(), Self::from_dyn(v, components(i))))
                    .collect(),
            )
        } else {
            Self::PositionalList(
                values
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| Self::from_dyn(v, components(i)))
                    .collect(),
            )
        }
    }
}

/// One flattened `{ key, value }` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatArg {
    pub key: String,
    pub value: FlatValue,
}

/// Value of a flattened entry: a scalar or a nested list of entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FlatValue {
    Scalar(Scalar),
    Nested(FlatArgs),
}

/// Ordered flattened arguments
pub type FlatArgs = Vec<FlatArg>;

/// Flatten a shaped value into nested `{ key, value }` entries
///
/// Named fields keep their names as keys, positional entries use their
/// index. Source order is preserved at every level.
pub fn flatten(value: DecodedValue) -> FlatValue {
    match value {
        DecodedValue::Scalar(s) => FlatValue::Scalar(s),
        DecodedValue::NamedFields(fields) => FlatValue::Nested(
            fields
                .into_iter()
                .map(|(key, v)| FlatArg { key, value: flatten(v) })
                .collect(),
        ),
        DecodedValue::PositionalList(items) => FlatValue::Nested(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| FlatArg { key: i.to_string(), value: flatten(v) })
                .collect(),
        ),
    }
}

/// Flatten a top-level argument list
pub fn flatten_args(value: DecodedValue) -> FlatArgs {
    match flatten(value) {
        FlatValue::Nested(args) => args,
        FlatValue::Scalar(s) => vec![FlatArg { key: "0".to_string(), value: FlatValue::Scalar(s) }],
    }
}

/// Render any serializable value for display
///
/// JSON strings and numbers are returned bare (no quoting); everything else
/// is pretty-printed JSON. Decoded integers serialize as decimal strings, so
/// large values keep every digit. Raw `U256`, `I256` and `u128` values also
/// render as decimal digits. A `U256` nested inside another serializable type
/// keeps alloy's `0x` quantity encoding; wrap it in a [`Scalar`] to get digits.
pub fn stringify<T: Serialize + ?Sized + 'static>(value: &T) -> serde_json::Result<String> {
    let compact = serde_json::to_string(value)?;
    if compact.starts_with('"') {
        let text: String = serde_json::from_str(&compact)?;
        return Ok(quantity_digits::<T>(text));
    }
    if compact.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
        return Ok(compact);
    }
    serde_json::to_string_pretty(value)
}

/// Decimal form of a big integer that serialized as a hex quantity string
fn quantity_digits<T: ?Sized + 'static>(text: String) -> String {
    let is_uint = TypeId::of::<T>() == TypeId::of::<U256>();
    let is_int = TypeId::of::<T>() == TypeId::of::<I256>();
    if !(is_uint || is_int) || !text.starts_with("0x") {
        return text;
    }
    match text.parse::<U256>() {
        Ok(raw) if is_int => I256::from_raw(raw).to_string(),
        Ok(raw) => raw.to_string(),
        Err(_) => text,
    }
}
