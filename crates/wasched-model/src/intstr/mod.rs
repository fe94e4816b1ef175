//! Tagged union holding either an `i32` or a string.
//!
//! Used by configuration fields that accept both forms, e.g. `maxSkew: 1` or `maxSkew: "25%"`.
mod wire;
pub use wire::IntOrStringProto;

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::{ModelError, ModelResult};

/// Discriminant selecting which side of an [`IntOrString`] is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntOrStringKind {
    /// The integer side holds the value.
    Int,
    /// The string side holds the value.
    String,
}

impl IntOrStringKind {
    /// Numeric wire value of the discriminant.
    #[inline]
    pub fn as_i64(&self) -> i64 {
        match self {
            IntOrStringKind::Int => 0,
            IntOrStringKind::String => 1,
        }
    }
}

impl TryFrom<i64> for IntOrStringKind {
    type Error = ModelError;
    fn try_from(v: i64) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Int),
            1 => Ok(Self::String),
            other => Err(ModelError::UnknownKind(other)),
        }
    }
}

/// A value that is either a 32-bit signed integer or a string.
///
/// Exactly one side is meaningful, selected by [`IntOrString::kind`].
/// Reading the other side yields its zero value (`0` or `""`); callers check the kind first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntOrString {
    kind: IntOrStringKind,
    int_val: i32,
    str_val: String,
}

impl IntOrString {
    /// Integer form.
    pub fn from_int(v: i32) -> Self {
        Self {
            kind: IntOrStringKind::Int,
            int_val: v,
            str_val: String::new(),
        }
    }

    /// String form.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self {
            kind: IntOrStringKind::String,
            int_val: 0,
            str_val: s.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> IntOrStringKind {
        self.kind
    }

    #[inline]
    pub fn is_int(&self) -> bool {
        self.kind == IntOrStringKind::Int
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        self.kind == IntOrStringKind::String
    }

    /// Integer value, or `0` when the string side is populated.
    #[inline]
    pub fn int_value(&self) -> i32 {
        match self.kind {
            IntOrStringKind::Int => self.int_val,
            IntOrStringKind::String => 0,
        }
    }

    /// String value, or `""` when the integer side is populated.
    #[inline]
    pub fn str_value(&self) -> &str {
        match self.kind {
            IntOrStringKind::Int => "",
            IntOrStringKind::String => &self.str_val,
        }
    }

    /// Resolve the value against `total`.
    ///
    /// Integer form is returned as is. String form must be a percentage (`"25%"`),
    /// scaled against `total` and rounded up or down per `round_up`.
    pub fn int_or_percent(&self, total: i32, round_up: bool) -> ModelResult<i32> {
        match self.kind {
            IntOrStringKind::Int => Ok(self.int_val),
            IntOrStringKind::String => {
                let raw = self
                    .str_val
                    .strip_suffix('%')
                    .ok_or_else(|| ModelError::InvalidPercent(self.str_val.clone()))?;
                let pct: i32 = raw
                    .parse()
                    .map_err(|_| ModelError::InvalidPercent(self.str_val.clone()))?;

                // i32 * i32 always fits in i64.
                let scaled = i64::from(pct) * i64::from(total);
                let value = if round_up {
                    scaled.div_euclid(100) + i64::from(scaled.rem_euclid(100) != 0)
                } else {
                    scaled.div_euclid(100)
                };
                i32::try_from(value).map_err(|_| ModelError::InvalidPercent(self.str_val.clone()))
            }
        }
    }
}

impl Default for IntOrString {
    fn default() -> Self {
        Self::from_int(0)
    }
}

impl From<i32> for IntOrString {
    fn from(v: i32) -> Self {
        Self::from_int(v)
    }
}

impl From<&str> for IntOrString {
    fn from(s: &str) -> Self {
        Self::from_string(s)
    }
}

impl From<String> for IntOrString {
    fn from(s: String) -> Self {
        Self::from_string(s)
    }
}

/// Text that parses as `i32` becomes the integer form; anything else the string form.
impl FromStr for IntOrString {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i32>() {
            Ok(v) => Self::from_int(v),
            Err(_) => Self::from_string(s),
        })
    }
}

impl fmt::Display for IntOrString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IntOrStringKind::Int => write!(f, "{}", self.int_val),
            IntOrStringKind::String => f.write_str(&self.str_val),
        }
    }
}

impl Serialize for IntOrString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.kind {
            IntOrStringKind::Int => serializer.serialize_i32(self.int_val),
            IntOrStringKind::String => serializer.serialize_str(&self.str_val),
        }
    }
}

impl<'de> Deserialize<'de> for IntOrString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IntOrStringVisitor;

        impl de::Visitor<'_> for IntOrStringVisitor {
            type Value = IntOrString;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 32-bit integer or a string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                i32::try_from(v)
                    .map(IntOrString::from_int)
                    .map_err(|_| E::custom(format!("integer {v} out of range for int32")))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i32::try_from(v)
                    .map(IntOrString::from_int)
                    .map_err(|_| E::custom(format!("integer {v} out of range for int32")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(IntOrString::from_string(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(IntOrString::from_string(v))
            }
        }

        deserializer.deserialize_any(IntOrStringVisitor)
    }
}
