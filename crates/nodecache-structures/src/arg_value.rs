//! The argument tree handed to node computations.
//!
//! `ArgValue` is a closed tagged union over everything a computation may
//! receive: primitive scalars, ordered sequences, string-keyed mappings,
//! tensor buffers, and an opaque string fallback for anything else. Being an
//! owned tree it is finite-depth and acyclic by construction.

use std::fmt::{Display, Formatter};
use crate::TensorBuffer;

/// A primitive scalar argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

/// A single node in the argument tree.
///
/// `Opaque` carries the canonical string representation of a value outside
/// the closed set; it keeps hashing total instead of failing on types the
/// engine does not discriminate.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Scalar(ScalarValue),
    Sequence(Vec<ArgValue>),
    Mapping(Vec<(String, ArgValue)>),
    Buffer(TensorBuffer),
    Opaque(String),
}

macro_rules! implement_scalar_conversions {
    ($source_type:ty, $scalar_variant:ident) => {
        impl From<$source_type> for ScalarValue {
            fn from(value: $source_type) -> Self {
                ScalarValue::$scalar_variant(value.into())
            }
        }

        impl From<$source_type> for ArgValue {
            fn from(value: $source_type) -> Self {
                ArgValue::Scalar(ScalarValue::$scalar_variant(value.into()))
            }
        }
    };
}

implement_scalar_conversions!(i64, Int);
implement_scalar_conversions!(i32, Int);
implement_scalar_conversions!(f64, Float);
implement_scalar_conversions!(bool, Bool);
implement_scalar_conversions!(String, Text);
implement_scalar_conversions!(&str, Text);

impl From<TensorBuffer> for ArgValue {
    fn from(value: TensorBuffer) -> Self {
        ArgValue::Buffer(value)
    }
}

impl From<Vec<ArgValue>> for ArgValue {
    fn from(value: Vec<ArgValue>) -> Self {
        ArgValue::Sequence(value)
    }
}

impl Display for ScalarValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarValue::Int(v) => write!(f, "{}", v),
            ScalarValue::Float(v) => write!(f, "{}", v),
            ScalarValue::Bool(v) => write!(f, "{}", v),
            ScalarValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl Display for ArgValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgValue::Scalar(scalar) => write!(f, "ArgValue({})", scalar),
            ArgValue::Sequence(items) => write!(f, "ArgValue(sequence[{}])", items.len()),
            ArgValue::Mapping(entries) => write!(f, "ArgValue(mapping[{}])", entries.len()),
            ArgValue::Buffer(buffer) => write!(f, "ArgValue({})", buffer),
            ArgValue::Opaque(repr) => write!(f, "ArgValue(opaque:{})", repr),
        }
    }
}

/// The positional and named arguments of one computation call.
///
/// Named entries keep their insertion order structurally; the structural hash
/// treats them as unordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArguments {
    pub positional: Vec<ArgValue>,
    pub named: Vec<(String, ArgValue)>,
}

impl CallArguments {
    pub fn new() -> CallArguments {
        CallArguments::default()
    }

    /// Builds call arguments from positional values only.
    pub fn from_positional(positional: Vec<ArgValue>) -> CallArguments {
        CallArguments { positional, named: Vec::new() }
    }

    /// Appends one positional argument.
    pub fn push(&mut self, value: impl Into<ArgValue>) -> &mut Self {
        self.positional.push(value.into());
        self
    }

    /// Appends one named argument.
    pub fn push_named(&mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> &mut Self {
        self.named.push((name.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}
