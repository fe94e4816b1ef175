use prost::Message;

use crate::error::ModelResult;

use super::{IntOrString, IntOrStringKind};

/// Wire record for [`IntOrString`].
///
/// Field layout: `1: int64 type`, `2: int32 intVal`, `3: string strVal`, all optional.
#[derive(Clone, PartialEq, Message)]
pub struct IntOrStringProto {
    #[prost(int64, optional, tag = "1")]
    pub r#type: Option<i64>,
    #[prost(int32, optional, tag = "2")]
    pub int_val: Option<i32>,
    #[prost(string, optional, tag = "3")]
    pub str_val: Option<String>,
}

impl From<&IntOrString> for IntOrStringProto {
    fn from(v: &IntOrString) -> Self {
        match v.kind {
            IntOrStringKind::Int => Self {
                r#type: Some(IntOrStringKind::Int.as_i64()),
                int_val: Some(v.int_val),
                str_val: None,
            },
            IntOrStringKind::String => Self {
                r#type: Some(IntOrStringKind::String.as_i64()),
                int_val: None,
                str_val: Some(v.str_val.clone()),
            },
        }
    }
}

impl TryFrom<IntOrStringProto> for IntOrString {
    type Error = crate::ModelError;

    /// A missing `type` means integer form; a missing value decodes to its zero value.
    fn try_from(p: IntOrStringProto) -> Result<Self, Self::Error> {
        let kind = IntOrStringKind::try_from(p.r#type.unwrap_or_default())?;
        Ok(match kind {
            IntOrStringKind::Int => IntOrString::from_int(p.int_val.unwrap_or_default()),
            IntOrStringKind::String => IntOrString::from_string(p.str_val.unwrap_or_default()),
        })
    }
}

impl IntOrString {
    /// Encode into the wire record format.
    pub fn encode_to_vec(&self) -> Vec<u8> {
        IntOrStringProto::from(self).encode_to_vec()
    }

    /// Decode from the wire record format.
    pub fn decode(buf: &[u8]) -> ModelResult<Self> {
        let proto = IntOrStringProto::decode(buf)?;
        IntOrString::try_from(proto)
    }
}
