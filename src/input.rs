// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use std::fmt::{self, Display, Formatter};

use neo_base::encoding::bin::{DecodeError, NeoDecode, NeoEncode, NeoRead, NeoWrite};
use neo_base::encoding::{FromRevHex, ToRevHex};
use neo_base::hash::HASH256_SIZE;
use serde::{Deserialize, Serialize};

use crate::error::TxError;

pub const TX_IN_SIZE: usize = HASH256_SIZE + 2;

/// Caller-facing reference to a previous output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Vin {
    /// Previous transaction id in display (big-endian) hex.
    pub txid: String,
    pub vout: u16,
}

impl Vin {
    pub fn new(txid: impl Into<String>, vout: u16) -> Self {
        Self { txid: txid.into(), vout }
    }
}

/// An input in wire form: the previous txid stored byte-reversed and a little-endian index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxIn {
    prev_hash: [u8; HASH256_SIZE],
    index: u16,
}

impl TxIn {
    #[inline]
    pub fn new(prev_hash: [u8; HASH256_SIZE], index: u16) -> Self {
        Self { prev_hash, index }
    }

    pub fn from_vin(vin: &Vin) -> Result<Self, TxError> {
        let prev_hash =
            <[u8; HASH256_SIZE]>::from_rev_hex(&vin.txid).map_err(|_err| TxError::InvalidTxId)?;
        Ok(Self { prev_hash, index: vin.vout })
    }

    /// Wire order, i.e. reversed relative to `txid()`.
    #[inline]
    pub fn prev_hash(&self) -> &[u8; HASH256_SIZE] {
        &self.prev_hash
    }

    #[inline]
    pub fn txid(&self) -> String {
        self.prev_hash.to_rev_hex_lower()
    }

    #[inline]
    pub fn vout(&self) -> u16 {
        self.index
    }
}

impl NeoEncode for TxIn {
    fn neo_encode<W: NeoWrite>(&self, w: &mut W) {
        w.write_bytes(&self.prev_hash);
        w.write_u16(self.index);
    }
}

impl NeoDecode for TxIn {
    fn neo_decode<R: NeoRead>(r: &mut R) -> Result<Self, DecodeError> {
        let prev_hash = r.read_array()?;
        let index = r.read_u16()?;
        Ok(Self { prev_hash, index })
    }
}

impl Display for TxIn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid(), self.index)
    }
}
