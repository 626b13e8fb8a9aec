// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! Transaction attributes and the usage-code registry that decides their wire shape.
//!
//! A usage with a fixed length is written as `usage ‖ data` with exactly `fixed` data bytes.
//! Every other usage is written as `usage ‖ u16 length ‖ data`.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use neo_base::encoding::bin::{NeoEncode, NeoRead, NeoWrite};
use neo_base::encoding::{trim_0x, FromHex, ToHex};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Malformed, TxError};

/// The largest payload a two-byte length prefix can describe.
pub const MAX_VARIABLE_DATA_SIZE: usize = u16::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeUsage {
    name: String,
    code: u8,
    max_len: usize,
    fixed_len: Option<usize>,
}

impl AttributeUsage {
    fn fixed(name: impl Into<String>, code: u8, len: usize) -> Self {
        Self { name: name.into(), code, max_len: len, fixed_len: Some(len) }
    }

    fn variable(name: impl Into<String>, code: u8, max_len: usize) -> Self {
        Self { name: name.into(), code, max_len, fixed_len: None }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn code(&self) -> u8 {
        self.code
    }

    #[inline]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    #[inline]
    pub fn fixed_len(&self) -> Option<usize> {
        self.fixed_len
    }

    pub fn lookup(code: u8) -> Option<&'static AttributeUsage> {
        USAGES.get(&code)
    }

    pub fn by_name(name: &str) -> Option<&'static AttributeUsage> {
        USAGES.values().find(|usage| usage.name == name)
    }

    /// All registered usages in ascending code order.
    pub fn all() -> impl Iterator<Item = &'static AttributeUsage> {
        USAGES.values()
    }
}

static USAGES: Lazy<BTreeMap<u8, AttributeUsage>> = Lazy::new(|| {
    let mut usages = vec![
        AttributeUsage::fixed("ContractHash", 0x00, 32),
        AttributeUsage::fixed("ECDH02", 0x02, 32),
        AttributeUsage::fixed("ECDH03", 0x03, 32),
        AttributeUsage::fixed("Script", 0x20, 20),
        AttributeUsage::variable("Vote", 0x30, 255),
        AttributeUsage::variable("DescriptionUrl", 0x81, 255),
        AttributeUsage::variable("Description", 0x90, MAX_VARIABLE_DATA_SIZE),
        AttributeUsage::variable("Remark", 0xf0, MAX_VARIABLE_DATA_SIZE),
    ];

    // Hash1..Hash15 at 0xa1..=0xaf, Remark1..Remark15 at 0xf1..=0xff
    for slot in 1..=15u8 {
        usages.push(AttributeUsage::fixed(format!("Hash{slot}"), 0xa0 + slot, 32));
        usages.push(AttributeUsage::variable(
            format!("Remark{slot}"),
            0xf0 + slot,
            MAX_VARIABLE_DATA_SIZE,
        ));
    }

    usages.into_iter().map(|usage| (usage.code, usage)).collect()
});

/// Caller-facing attribute: a usage code and hex data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Attribute {
    pub usage: u8,
    pub data: String,
}

impl Attribute {
    pub fn new(usage: u8, data: impl Into<String>) -> Self {
        Self { usage, data: data.into() }
    }
}

/// An attribute in wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxAttribute {
    usage: &'static AttributeUsage,
    data: Vec<u8>,
}

impl TxAttribute {
    /// Fixed-length data is zero-padded or truncated to the registered length.
    pub fn new(code: u8, mut data: Vec<u8>) -> Result<Self, TxError> {
        let usage = AttributeUsage::lookup(code).ok_or(TxError::UnknownAttributeUsage(code))?;
        match usage.fixed_len {
            Some(fixed) => data.resize(fixed, 0),
            None if data.len() > MAX_VARIABLE_DATA_SIZE => {
                return Err(TxError::InvalidAttributeData { usage: code, len: data.len() });
            }
            None if data.len() > usage.max_len => {
                warn!(
                    usage = usage.name(),
                    len = data.len(),
                    max = usage.max_len,
                    "attribute data exceeds usage maximum"
                );
            }
            None => {}
        }

        Ok(Self { usage, data })
    }

    pub fn from_attribute(attr: &Attribute) -> Result<Self, TxError> {
        let data = Vec::from_hex(trim_0x(&attr.data))
            .map_err(|_err| TxError::InvalidHexInput { context: "attribute data" })?;
        Self::new(attr.usage, data)
    }

    #[inline]
    pub fn usage(&self) -> &'static AttributeUsage {
        self.usage
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn decode_from<R: NeoRead>(r: &mut R) -> Result<Self, Malformed> {
        let code = r.read_u8()?;
        let usage = AttributeUsage::lookup(code).ok_or(Malformed::UnknownUsage(code))?;
        let len = match usage.fixed_len {
            Some(fixed) => fixed,
            None => r.read_u16()? as usize,
        };

        Ok(Self { usage, data: r.read_bytes(len)? })
    }
}

impl NeoEncode for TxAttribute {
    fn neo_encode<W: NeoWrite>(&self, w: &mut W) {
        w.write_u8(self.usage.code);
        if self.usage.fixed_len.is_none() {
            w.write_u16(self.data.len() as u16);
        }
        w.write_bytes(&self.data);
    }
}

impl Display for TxAttribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02x}):{}", self.usage.name, self.usage.code, self.data.to_hex_lower())
    }
}
