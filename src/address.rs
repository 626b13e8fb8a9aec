// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use neo_base::encoding::{FromBase58Check, ToBase58Check, WifDecode, WifEncode};
use neo_base::hash::{hash160, HASH160_SIZE};
use neo_crypto::{PrivateKey, KEY_SIZE};

use crate::error::TxError;
use crate::script::build_verification;

/// Version byte of NEO legacy addresses, the leading `A`.
pub const ADDRESS_VERSION: u8 = 0x17;

pub const WIF_VERSION: u8 = 0x80;

/// Maps address text to the 20-byte script hash stored in outputs and back.
pub trait AddressCodec {
    fn decode_address(&self, address: &str) -> Result<[u8; HASH160_SIZE], TxError>;

    fn encode_address(&self, script_hash: &[u8; HASH160_SIZE]) -> String;

    /// Address of the single-signature verification script for `public_key`.
    fn address_from_public_key(&self, public_key: &[u8]) -> Result<String, TxError> {
        script_hash_from_public_key(public_key).map(|hash| self.encode_address(&hash))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Base58CheckAddress {
    version: u8,
}

impl Base58CheckAddress {
    #[inline]
    pub fn new(version: u8) -> Self {
        Self { version }
    }

    #[inline]
    pub fn version(&self) -> u8 {
        self.version
    }
}

impl Default for Base58CheckAddress {
    fn default() -> Self {
        Self::new(ADDRESS_VERSION)
    }
}

impl AddressCodec for Base58CheckAddress {
    fn decode_address(&self, address: &str) -> Result<[u8; HASH160_SIZE], TxError> {
        Vec::from_base58_check(address, Some(self.version))
            .ok()
            .and_then(|hash| <[u8; HASH160_SIZE]>::try_from(hash.as_slice()).ok())
            .ok_or_else(|| TxError::InvalidAddress(address.to_string()))
    }

    #[inline]
    fn encode_address(&self, script_hash: &[u8; HASH160_SIZE]) -> String {
        script_hash.to_base58_check(Some(self.version))
    }
}

/// Hash160 of the 35-byte verification script.
pub fn script_hash_from_public_key(public_key: &[u8]) -> Result<[u8; HASH160_SIZE], TxError> {
    build_verification(public_key).map(hash160)
}

/// Compressed WIF of a private key.
pub fn private_key_to_wif(key: &PrivateKey, version: u8) -> String {
    key.as_be_bytes().wif_encode(version, true)
}

pub fn wif_to_private_key(wif: &str, version: u8) -> Result<PrivateKey, TxError> {
    let wif = wif.wif_decode(KEY_SIZE).map_err(|_err| TxError::InvalidWif)?;
    if wif.version() != version || !wif.compressed() {
        return Err(TxError::InvalidWif);
    }

    Ok(PrivateKey::from_slice(wif.data())?)
}
