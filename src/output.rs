// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use std::fmt::{self, Display, Formatter};

use neo_base::encoding::bin::{DecodeError, NeoDecode, NeoEncode, NeoRead, NeoWrite};
use neo_base::encoding::{FromRevHex, ToHex, ToRevHex};
use neo_base::hash::{HASH160_SIZE, HASH256_SIZE};
use serde::{Deserialize, Serialize};

use crate::address::AddressCodec;
use crate::error::TxError;

pub const TX_OUT_SIZE: usize = HASH256_SIZE + 8 + HASH160_SIZE;

pub const NEO_ASSET_ID: &str = "c56f33fc6ecfcd0c225c4ab356fee59390af8560be0e930faebe74a6daff7c9b";
pub const GAS_ASSET_ID: &str = "602c79718b16e442de58778e148d0b1084e3b2dffd5de6b7b16cee7969282de7";

/// Caller-facing output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Vout {
    /// Asset id in display (big-endian) hex.
    pub asset_id: String,
    pub address: String,
    /// Amount in the asset's base units, written to the wire unscaled.
    pub value: u64,
}

impl Vout {
    pub fn new(asset_id: impl Into<String>, address: impl Into<String>, value: u64) -> Self {
        Self { asset_id: asset_id.into(), address: address.into(), value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxOut {
    asset_id: [u8; HASH256_SIZE],
    value: u64,
    script_hash: [u8; HASH160_SIZE],
}

impl TxOut {
    #[inline]
    pub fn new(asset_id: [u8; HASH256_SIZE], value: u64, script_hash: [u8; HASH160_SIZE]) -> Self {
        Self { asset_id, value, script_hash }
    }

    pub fn from_vout<C: AddressCodec + ?Sized>(vout: &Vout, codec: &C) -> Result<Self, TxError> {
        let asset_id = <[u8; HASH256_SIZE]>::from_rev_hex(&vout.asset_id)
            .map_err(|_err| TxError::InvalidAssetId)?;
        let script_hash = codec.decode_address(&vout.address)?;
        Ok(Self { asset_id, value: vout.value, script_hash })
    }

    /// Display order hex.
    #[inline]
    pub fn asset_id(&self) -> String {
        self.asset_id.to_rev_hex_lower()
    }

    #[inline]
    pub fn value(&self) -> u64 {
        self.value
    }

    #[inline]
    pub fn script_hash(&self) -> &[u8; HASH160_SIZE] {
        &self.script_hash
    }
}

impl NeoEncode for TxOut {
    fn neo_encode<W: NeoWrite>(&self, w: &mut W) {
        w.write_bytes(&self.asset_id);
        w.write_u64(self.value);
        w.write_bytes(&self.script_hash);
    }
}

impl NeoDecode for TxOut {
    fn neo_decode<R: NeoRead>(r: &mut R) -> Result<Self, DecodeError> {
        let asset_id = r.read_array()?;
        let value = r.read_u64()?;
        let script_hash = r.read_array()?;
        Ok(Self { asset_id, value, script_hash })
    }
}

impl Display for TxOut {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}->{}", self.asset_id(), self.value, self.script_hash.to_hex_lower())
    }
}
